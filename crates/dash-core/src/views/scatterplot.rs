// File: crates/dash-core/src/views/scatterplot.rs
// Summary: Death rate against a selectable factor, one dot per state, with a least-squares
// trend line whose tooltip reports the correlation.

use std::rc::Rc;
use std::time::Duration;

use crate::axis::{Axis, Orient};
use crate::color::{Color, Quantile};
use crate::config::DashboardConfig;
use crate::data::{Datasets, Factor};
use crate::event::{Event, EventKind, UpdateOptions};
use crate::format;
use crate::regression::{fit, Fit};
use crate::scale::LinearScale;
use crate::scene::{Anchor, Mark, Shape, Style, Weight};
use crate::types::{Containers, Insets, SizeGroup};
use crate::view::{handle_resize, handle_update, Handler, View, ViewBase};

use super::{death_rate_colors, HIGHLIGHTED};

pub const CONTAINER: &str = "scatterplot";
pub const TITLE_LAYER: &str = "title";
pub const AXES_LAYER: &str = "axes";
pub const DOTS_LAYER: &str = "dots";
pub const TREND_LAYER: &str = "trend";
pub const TREND_KEY: &str = "trend";

/// Aggregate row present in every per-state file; never plotted.
pub const NATIONAL_ID: &str = "United States";

const MARGIN: Insets = Insets::new(20.0, 20.0, 40.0, 70.0);
const PADDING: f64 = 10.0;
const DOT_RADIUS: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub id: String,
    pub death_rate: f64,
    pub factor: f64,
}

pub struct Scatterplot {
    base: ViewBase,
    data: Datasets,
    colors: Quantile,
    factor: Factor,
    factor_year: i32,
    death_rate_year: i32,
    y_domain: [f64; 2],
    x: LinearScale,
    y: LinearScale,
    default_duration: Duration,
    display: Vec<Dot>,
    trend: Fit,
}

impl Scatterplot {
    pub fn new(containers: Rc<Containers>, data: Datasets, config: &DashboardConfig) -> Self {
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            data,
            colors: death_rate_colors(&config.key_domain),
            factor: config.default_factor,
            factor_year: config.default_year,
            death_rate_year: config.default_year,
            y_domain: config.death_rate_domain,
            x: LinearScale::default(),
            y: LinearScale::default(),
            default_duration: config.transition(),
            display: Vec::new(),
            trend: Fit::NAN,
        }
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    /// `(death_rate_year, factor_year)`.
    pub fn years(&self) -> (i32, i32) {
        (self.death_rate_year, self.factor_year)
    }

    /// Fit over the current dots; non-finite when the selection is degenerate.
    pub fn trend(&self) -> Fit {
        self.trend
    }

    pub fn x_scale(&self) -> LinearScale {
        self.x
    }

    pub fn y_scale(&self) -> LinearScale {
        self.y
    }

    fn label_font_size(&self) -> f64 {
        match self.base.size_group {
            SizeGroup::Medium => 13.0,
            SizeGroup::Small => 11.0,
        }
    }

    fn y_axis_ticks(&self) -> usize {
        match self.base.size_group {
            SizeGroup::Medium => 10,
            SizeGroup::Small => 4,
        }
    }

    pub fn highlight_state(&mut self, id: &str) {
        self.draw_highlight(id);
        self.base.broadcast(Event::MouseoverState { id: id.to_string() });
    }

    pub fn unhighlight_state(&mut self, id: &str) {
        self.remove_highlight(id);
        self.base.broadcast(Event::MouseoutState { id: id.to_string() });
    }

    /// Ring and enlarge the dot, and show its tooltip.
    pub fn draw_highlight(&mut self, id: &str) {
        if !self.base.scene.classed(DOTS_LAYER, id, HIGHLIGHTED, true) {
            log::trace!("scatterplot: no dot '{id}' to highlight");
            return;
        }
        let Some(dot) = self.display.iter().find(|d| d.id == id) else {
            return;
        };
        let text = format!(
            "{}\nDeath Rate: {}\n{}: {}",
            dot.id,
            format::identity(dot.death_rate),
            self.factor.label(),
            self.factor.format(dot.factor)
        );
        let (x, y) = (self.x.map(dot.factor), self.y.map(dot.death_rate) + 5.0);
        self.base.scene.show_tooltip(text, x, y);
    }

    /// Idempotent.
    pub fn remove_highlight(&mut self, id: &str) {
        self.base.scene.classed(DOTS_LAYER, id, HIGHLIGHTED, false);
        self.base.scene.hide_tooltip();
    }

    /// Hover on the trend line. Returns whether a trend line is shown.
    pub fn highlight_trend(&mut self) -> bool {
        if !self.base.scene.classed(TREND_LAYER, TREND_KEY, HIGHLIGHTED, true) {
            return false;
        }
        let text = format!(
            "Death Rate ({})\n{} ({})\nCorrelation: {:.2}",
            self.death_rate_year,
            self.factor.short_label(),
            self.factor_year,
            self.trend.correlation()
        );
        let x = (self.x.range.0 + self.x.range.1) / 2.0;
        let y = self.y.map(self.trend.predict(self.x.invert(x))) + 5.0;
        self.base.scene.show_tooltip(text, x, y);
        true
    }

    pub fn unhighlight_trend(&mut self) {
        self.base.scene.classed(TREND_LAYER, TREND_KEY, HIGHLIGHTED, false);
        self.base.scene.hide_tooltip();
    }

    fn on_mouseover(&mut self, event: &Event) {
        if let Event::MouseoverState { id } = event {
            self.draw_highlight(id);
        }
    }

    fn on_mouseout(&mut self, event: &Event) {
        if let Event::MouseoutState { id } = event {
            self.remove_highlight(id);
        }
    }

    fn title_marks(&self) -> Vec<Mark> {
        let size = self.label_font_size();
        let ink = Style::fill(Color::BLACK);
        vec![
            Mark::new(
                "title",
                Shape::Text {
                    x: self.base.width / 2.0,
                    y: 6.0,
                    text: "What Factors Influence Drug Deaths?".into(),
                    size,
                    anchor: Anchor::Middle,
                    weight: Weight::Bold,
                    rotate: 0.0,
                },
                ink,
            ),
            Mark::new(
                "x-title",
                Shape::text(
                    self.base.width / 2.0,
                    self.base.height + self.base.margin.bottom - 2.0,
                    format!("{} ({})", self.factor.label(), self.factor_year),
                    size,
                ),
                ink,
            ),
            Mark::new(
                "y-title",
                Shape::Text {
                    x: -self.base.margin.left * 0.75,
                    y: self.base.height / 2.0,
                    text: format!("{} ({})", Factor::DeathRate.label(), self.death_rate_year),
                    size,
                    anchor: Anchor::Middle,
                    weight: Weight::Normal,
                    rotate: -90.0,
                },
                ink,
            ),
        ]
    }

    fn axis_marks(&self) -> Vec<Mark> {
        let factor = self.factor;
        let x_format = move |v: f64| factor.format(v);
        let y_format = format::identity;
        let mut marks = Axis::new("x-axis", Orient::Bottom, &x_format).ticks(6).marks(&self.x, (0.0, self.base.height));
        marks.extend(Axis::new("y-axis", Orient::Left, &y_format).ticks(self.y_axis_ticks()).marks(&self.y, (0.0, 0.0)));
        marks
    }

    fn dot_marks(&self) -> Vec<Mark> {
        self.display
            .iter()
            .map(|d| {
                Mark::new(
                    d.id.clone(),
                    Shape::Circle { cx: self.x.map(d.factor), cy: self.y.map(d.death_rate), r: DOT_RADIUS },
                    Style::fill(self.colors.color(d.death_rate)).with_stroke(Color::rgb(0x33, 0x33, 0x33), 0.5),
                )
            })
            .collect()
    }

    fn trend_marks(&self) -> Vec<Mark> {
        if !self.trend.is_finite() {
            log::debug!("scatterplot: degenerate fit for {:?}, trend line hidden", self.factor);
            return Vec::new();
        }
        let (x1, x2) = self.x.domain;
        vec![Mark::new(
            TREND_KEY,
            Shape::Line {
                x1: self.x.map(x1),
                y1: self.y.map(self.trend.predict(x1)),
                x2: self.x.map(x2),
                y2: self.y.map(self.trend.predict(x2)),
            },
            Style::stroke(Color::rgb(0x54, 0x27, 0x8f), 2.0),
        )]
    }
}

impl View for Scatterplot {
    type Display = Vec<Dot>;

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn handlers() -> Vec<(EventKind, Handler<Self>)> {
        let table: [(EventKind, Handler<Self>); 4] = [
            (EventKind::Update, handle_update),
            (EventKind::Resize, handle_resize),
            (EventKind::MouseoverState, Self::on_mouseover),
            (EventKind::MouseoutState, Self::on_mouseout),
        ];
        table.to_vec()
    }

    fn initialize(&mut self) {
        for layer in [TITLE_LAYER, AXES_LAYER, DOTS_LAYER, TREND_LAYER] {
            self.base.scene.add_layer(layer);
        }
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|w| w);
        let (w, h) = (self.base.width, self.base.height);
        self.x.set_range(PADDING, w - PADDING);
        self.y.set_range(h - PADDING, PADDING);
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, options: &UpdateOptions) {
        if let Some([death_rate_year, factor_year]) = options.years {
            self.death_rate_year = death_rate_year;
            self.factor_year = factor_year;
        }
        if let Some(factor) = options.factor {
            self.factor = factor;
        }
        let mut dots = Vec::with_capacity(self.data.state_count());
        for (i, state) in self.data.deaths.iter().enumerate() {
            if state.id == NATIONAL_ID {
                continue;
            }
            let death_rate = self.data.factor_value(Factor::DeathRate, i, self.death_rate_year);
            let factor = self.data.factor_value(self.factor, i, self.factor_year);
            match (death_rate, factor) {
                (Some(death_rate), Some(factor)) => dots.push(Dot { id: state.id.clone(), death_rate, factor }),
                _ => log::debug!(
                    "scatterplot: '{}' has no data for {}/{}",
                    state.id,
                    self.death_rate_year,
                    self.factor_year
                ),
            }
        }
        self.display = dots;
        let xs: Vec<f64> = self.display.iter().map(|d| d.factor).collect();
        let ys: Vec<f64> = self.display.iter().map(|d| d.death_rate).collect();
        self.trend = fit(&xs, &ys);
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(self.default_duration);
        let (lo, hi) = self.data.factor_extent(self.factor);
        self.x.set_domain(lo, hi);
        self.y.set_domain(self.y_domain[0], self.y_domain[1]);

        let title = self.title_marks();
        let axes = self.axis_marks();
        let dots = self.dot_marks();
        let trend = self.trend_marks();
        let scene = &mut self.base.scene;
        scene.join(TITLE_LAYER, title, Duration::ZERO);
        scene.join(AXES_LAYER, axes, duration);
        scene.join(DOTS_LAYER, dots, duration);
        scene.join(TREND_LAYER, trend, duration);
        self.base.last_transition = Some(duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
