// File: crates/dash-core/src/views/stacked_area.rs
// Summary: Zero-offset stacked area of treatment admissions per substance over time.
// Starts invisible; `switchView` fades it in and out opposite the treemap.

use std::rc::Rc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};

use crate::axis::{Axis, Orient};
use crate::color::{Color, Ordinal};
use crate::config::DashboardConfig;
use crate::data::DrugSeries;
use crate::event::{Event, EventKind, UpdateOptions};
use crate::format;
use crate::hierarchy::Hierarchy;
use crate::scale::LinearScale;
use crate::scene::{Group, Mark, Shape, Style};
use crate::types::{Containers, Insets};
use crate::view::{handle_resize, Handler, View, ViewBase};

use super::drug_colors;

pub const CONTAINER: &str = "stacked-area";
pub const AREAS_LAYER: &str = "areas";
pub const AXES_LAYER: &str = "axes";

const MARGIN: Insets = Insets::new(10.0, 100.0, 30.0, 100.0);

#[derive(Clone, Debug, PartialEq)]
pub struct StackPoint {
    pub date: NaiveDate,
    /// Baseline: sum of every earlier substance at this date.
    pub y0: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubstanceStack {
    pub name: String,
    pub values: Vec<StackPoint>,
}

pub struct StackedAreaChart {
    base: ViewBase,
    series: Rc<DrugSeries>,
    colors: Ordinal,
    x: LinearScale,
    y: LinearScale,
    y_max: f64,
    visible: bool,
    switch_duration: Duration,
    display: Vec<SubstanceStack>,
}

/// Dates as fractional years, so axis ticks land on whole years.
fn year_fraction(date: NaiveDate) -> f64 {
    date.year() as f64 + date.ordinal0() as f64 / 365.25
}

impl StackedAreaChart {
    pub fn new(
        containers: Rc<Containers>,
        series: Rc<DrugSeries>,
        tree: &Hierarchy,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            series,
            colors: drug_colors(tree),
            x: LinearScale::default(),
            y: LinearScale::default(),
            y_max: config.stacked_max,
            visible: false,
            switch_duration: config.switch_transition(),
            display: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn switch_view(&mut self, _event: &Event) {
        self.visible = !self.visible;
        if !self.visible {
            self.base.scene.hide_tooltip();
        }
        let offset = self.base.scene.group().offset;
        let opacity = if self.visible { 1.0 } else { 0.0 };
        self.base.scene.set_group(Group { offset, opacity }, self.switch_duration);
    }

    /// Tooltip table for a substance; only while the chart is visible.
    pub fn highlight_substance(&mut self, name: &str) -> bool {
        if !self.visible {
            return false;
        }
        let Some(stack) = self.display.iter().find(|s| s.name == name) else {
            return false;
        };
        let mut text = format!("Substance Type: {}\nYear  Admissions to Treatment", stack.name);
        for p in &stack.values {
            text.push_str(&format!("\n{}  {}", p.date.year(), format::thousands(p.y)));
        }
        let x = self.base.width / 2.0;
        let y = self.base.height / 2.0;
        self.base.scene.show_tooltip(text, x, y);
        true
    }

    pub fn unhighlight_substance(&mut self) {
        self.base.scene.hide_tooltip();
    }

    fn area_marks(&self) -> Vec<Mark> {
        self.display
            .iter()
            .map(|stack| {
                let top = stack.values.iter().map(|p| (self.x.map(year_fraction(p.date)), self.y.map(p.y0 + p.y)));
                let bottom =
                    stack.values.iter().rev().map(|p| (self.x.map(year_fraction(p.date)), self.y.map(p.y0)));
                Mark::new(
                    stack.name.clone(),
                    Shape::Polygon { points: top.chain(bottom).collect() },
                    Style::fill(self.colors.color(&stack.name)).with_stroke(Color::WHITE, 2.0),
                )
            })
            .collect()
    }

    fn axis_marks(&self) -> Vec<Mark> {
        let years = format::identity;
        let counts = format::thousands;
        let mut marks = Axis::new("x-axis", Orient::Bottom, &years).marks(&self.x, (0.0, self.base.height));
        marks.extend(Axis::new("y-axis", Orient::Left, &counts).marks(&self.y, (0.0, 0.0)));
        marks
    }
}

impl View for StackedAreaChart {
    type Display = Vec<SubstanceStack>;

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn handlers() -> Vec<(EventKind, Handler<Self>)> {
        let table: [(EventKind, Handler<Self>); 2] =
            [(EventKind::Resize, handle_resize), (EventKind::SwitchView, Self::switch_view)];
        table.to_vec()
    }

    fn initialize(&mut self) {
        self.base.scene.add_layer(AREAS_LAYER);
        self.base.scene.add_layer(AXES_LAYER);
        self.resize();
        let offset = self.base.scene.group().offset;
        self.base.scene.set_group(Group { offset, opacity: 0.0 }, Duration::ZERO);
    }

    fn resize(&mut self) {
        self.base.measure(|w| w * 0.66 - MARGIN.vsum());
        self.x.set_range(0.0, self.base.width);
        self.y.set_range(self.base.height, 0.0);
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, _options: &UpdateOptions) {
        let mut baseline = vec![0.0; self.series.rows.len()];
        self.display = self
            .series
            .substances
            .iter()
            .enumerate()
            .map(|(k, name)| {
                let values = self
                    .series
                    .rows
                    .iter()
                    .zip(baseline.iter_mut())
                    .map(|(row, y0)| {
                        let y = row.values.get(k).copied().unwrap_or(0.0);
                        let point = StackPoint { date: row.date, y0: *y0, y };
                        *y0 += y;
                        point
                    })
                    .collect();
                SubstanceStack { name: name.clone(), values }
            })
            .collect();
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(Duration::ZERO);
        if let Some((first, last)) = self.series.date_extent() {
            self.x.set_domain(year_fraction(first), year_fraction(last));
        }
        self.y.set_domain(0.0, self.y_max);
        let areas = self.area_marks();
        let axes = self.axis_marks();
        self.base.scene.join(AREAS_LAYER, areas, duration);
        self.base.scene.join(AXES_LAYER, axes, duration);
        self.base.last_transition = Some(duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
