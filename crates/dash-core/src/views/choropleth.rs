// File: crates/dash-core/src/views/choropleth.rs
// Summary: State map coloured by death rate for the selected year, with a bucket key.

use std::rc::Rc;
use std::time::Duration;

use crate::color::{Color, Quantile};
use crate::config::DashboardConfig;
use crate::data::{DeathRecord, StateShape, StateYears};
use crate::event::{Event, EventKind, UpdateOptions};
use crate::scene::{Anchor, Mark, Shape, Style, Weight};
use crate::types::{Containers, Insets, SizeGroup};
use crate::view::{handle_resize, handle_update, Handler, View, ViewBase};

use super::{death_rate_colors, HIGHLIGHTED};

pub const CONTAINER: &str = "choropleth";
pub const STATES_LAYER: &str = "states";
pub const KEY_LAYER: &str = "key";

const MARGIN: Insets = Insets::new(100.0, 20.0, 20.0, 20.0);
const KEY_HEIGHT: f64 = 80.0;
const KEY_RECT_HEIGHT: f64 = 20.0;
const KEY_OFFSET_Y: f64 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub struct StateRate {
    pub id: String,
    pub death_rate: f64,
}

pub struct Choropleth {
    base: ViewBase,
    shapes: Rc<[StateShape]>,
    deaths: Rc<[StateYears<DeathRecord>]>,
    colors: Quantile,
    key_domain: Vec<f64>,
    death_rate_year: i32,
    default_duration: Duration,
    key_width: f64,
    display: Vec<StateRate>,
}

impl Choropleth {
    pub fn new(
        containers: Rc<Containers>,
        shapes: Rc<[StateShape]>,
        deaths: Rc<[StateYears<DeathRecord>]>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            shapes,
            deaths,
            colors: death_rate_colors(&config.key_domain),
            key_domain: config.key_domain.clone(),
            death_rate_year: config.default_year,
            default_duration: config.transition(),
            key_width: 0.0,
            display: Vec::new(),
        }
    }

    pub fn death_rate_year(&self) -> i32 {
        self.death_rate_year
    }

    pub fn key_width(&self) -> f64 {
        self.key_width
    }

    fn key_label_offset(&self) -> f64 {
        match self.base.size_group {
            SizeGroup::Medium => 55.0,
            SizeGroup::Small => 50.0,
        }
    }

    fn font_size(&self) -> f64 {
        match self.base.size_group {
            SizeGroup::Medium => 14.0,
            SizeGroup::Small => 12.0,
        }
    }

    fn rate_of(&self, id: &str) -> f64 {
        self.display.iter().find(|s| s.id == id).map_or(0.0, |s| s.death_rate)
    }

    /// Hover entry point: highlight locally, then tell the other views.
    pub fn highlight_state(&mut self, id: &str) {
        self.draw_highlight(id);
        self.base.broadcast(Event::MouseoverState { id: id.to_string() });
    }

    pub fn unhighlight_state(&mut self, id: &str) {
        self.remove_highlight(id);
        self.base.broadcast(Event::MouseoutState { id: id.to_string() });
    }

    pub fn draw_highlight(&mut self, id: &str) {
        if !self.base.scene.classed(STATES_LAYER, id, HIGHLIGHTED, true) {
            log::trace!("choropleth: no state '{id}' to highlight");
        }
    }

    /// Idempotent; unknown or unhighlighted states are left alone.
    pub fn remove_highlight(&mut self, id: &str) {
        self.base.scene.classed(STATES_LAYER, id, HIGHLIGHTED, false);
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

    fn key_marks(&self) -> Vec<Mark> {
        // The key hangs off the top-left of the svg, not the margin-translated graph.
        let ox = -self.base.margin.left;
        let oy = KEY_OFFSET_Y - self.base.margin.top;
        let last = self.key_domain.len().saturating_sub(1);
        let mut marks = vec![Mark::new(
            "key-title",
            Shape::Text {
                x: ox + self.base.width / 2.0,
                y: oy + 10.0,
                text: "Deaths Per 100,000".into(),
                size: self.font_size(),
                anchor: Anchor::Middle,
                weight: Weight::Normal,
                rotate: 0.0,
            },
            Style::fill(Color::BLACK),
        )];
        for (i, d) in self.key_domain.iter().enumerate() {
            let x = ox + i as f64 * self.key_width;
            marks.push(Mark::new(
                format!("key-rect-{i}"),
                Shape::Rect { x, y: oy + KEY_RECT_HEIGHT, width: self.key_width, height: KEY_RECT_HEIGHT },
                Style::fill(self.colors.color(*d)),
            ));
            let text = if i == last { format!("{d}+") } else { format!("{d}") };
            marks.push(Mark::new(
                format!("key-label-{i}"),
                Shape::Text {
                    x: x + 2.0,
                    y: oy + self.key_label_offset(),
                    text,
                    size: self.font_size(),
                    anchor: Anchor::Start,
                    weight: Weight::Normal,
                    rotate: 0.0,
                },
                Style::fill(Color::BLACK),
            ));
        }
        marks
    }

    fn state_marks(&self) -> Vec<Mark> {
        let project = fit_outlines(&self.shapes, self.base.width, self.base.height);
        self.shapes
            .iter()
            .map(|shape| {
                let points = shape.outline.iter().map(|p| project(*p)).collect();
                let style = Style::fill(self.colors.color(self.rate_of(&shape.id))).with_stroke(Color::WHITE, 1.0);
                Mark::new(shape.id.clone(), Shape::Polygon { points }, style)
            })
            .collect()
    }
}

/// Uniformly scale every `[lon, lat]` outline into `width` x `height`, centred, north up.
fn fit_outlines(shapes: &[StateShape], width: f64, height: f64) -> impl Fn([f64; 2]) -> (f64, f64) {
    let mut lo = [f64::INFINITY; 2];
    let mut hi = [f64::NEG_INFINITY; 2];
    for p in shapes.iter().flat_map(|s| s.outline.iter()) {
        for k in 0..2 {
            lo[k] = lo[k].min(p[k]);
            hi[k] = hi[k].max(p[k]);
        }
    }
    let span_x = hi[0] - lo[0];
    let span_y = hi[1] - lo[1];
    let scale = if span_x > 0.0 && span_y > 0.0 { (width / span_x).min(height / span_y) } else { 0.0 };
    let pad_x = (width - span_x * scale) / 2.0;
    let pad_y = (height - span_y * scale) / 2.0;
    move |p| (pad_x + (p[0] - lo[0]) * scale, pad_y + (hi[1] - p[1]) * scale)
}

impl View for Choropleth {
    type Display = Vec<StateRate>;

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
        self.base.scene.add_layer(KEY_LAYER);
        self.base.scene.add_layer(STATES_LAYER);
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|w| w * 0.85 - MARGIN.vsum());
        let (w, h) = self.base.scene.size();
        self.base.scene.set_size(w, h + KEY_HEIGHT);
        self.key_width = (self.base.width / 6.0).floor();
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, options: &UpdateOptions) {
        if let Some([death_rate_year, _]) = options.years {
            self.death_rate_year = death_rate_year;
        }
        let year = self.death_rate_year;
        self.display = self
            .deaths
            .iter()
            .map(|state| StateRate {
                id: state.id.clone(),
                death_rate: state.years.iter().filter(|r| r.year == year).map(|r| r.death_rate).sum(),
            })
            .collect();
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(self.default_duration);
        let key = self.key_marks();
        let states = self.state_marks();
        self.base.scene.join(KEY_LAYER, key, duration);
        self.base.scene.join(STATES_LAYER, states, duration);
        self.base.last_transition = Some(duration);
        log::debug!("choropleth updated for {} ({:?})", self.death_rate_year, duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
