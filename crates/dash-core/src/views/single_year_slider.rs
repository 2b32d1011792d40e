// File: crates/dash-core/src/views/single_year_slider.rs
// Summary: Single-handle brush over the drug-series years. User brushing broadcasts
// `updateDrugs`; programmatic moves do not.

use std::rc::Rc;
use std::time::Duration;

use crate::axis::{Axis, Orient};
use crate::color::Color;
use crate::config::DashboardConfig;
use crate::event::{Event, EventKind, UpdateOptions};
use crate::format;
use crate::scale::LinearScale;
use crate::scene::{Mark, Shape, Style};
use crate::types::{Containers, Insets};
use crate::view::{handle_resize, Handler, View, ViewBase};

pub const CONTAINER: &str = "single-year-slider";
pub const TRACK_LAYER: &str = "track";
pub const HANDLE_LAYER: &str = "handle";

const MARGIN: Insets = Insets::new(10.0, 100.0, 0.0, 100.0);
const OUTER_HEIGHT: f64 = 50.0;
const HANDLE_RADIUS: f64 = 9.0;

pub struct SingleYearSlider {
    base: ViewBase,
    years: [i32; 2],
    year: i32,
    x: LinearScale,
    brush_duration: Duration,
}

impl SingleYearSlider {
    pub fn new(containers: Rc<Containers>, config: &DashboardConfig) -> Self {
        let years = config.drug_years;
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            years,
            year: years[1],
            x: LinearScale::new((years[0] as f64, years[1] as f64), (0.0, 1.0)).clamped(),
            brush_duration: config.brush_transition(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn position_of(&self, year: i32) -> f64 {
        self.x.map(year as f64)
    }

    /// Brush callback. `Some(px)` is a user gesture at `px` along the track and is
    /// broadcast; `None` is a programmatic refresh and stays local.
    pub fn brushed(&mut self, px: Option<f64>) -> i32 {
        match px {
            Some(px) => {
                self.year = self.x.invert(px).round() as i32;
                self.update(&UpdateOptions::immediate());
                self.base.broadcast(Event::UpdateDrugs { year: self.year });
            }
            None => self.update(&UpdateOptions::immediate()),
        }
        self.year
    }

    /// Programmatic move, animated with the brush transition. Not broadcast.
    pub fn set_year(&mut self, year: i32) {
        self.year = year.clamp(self.years[0].min(self.years[1]), self.years[0].max(self.years[1]));
        self.update(&UpdateOptions::default().with_duration(self.brush_duration));
    }

    fn track_marks(&self) -> Vec<Mark> {
        let mut marks = vec![Mark::new(
            "slider-background",
            Shape::Rect { x: 0.0, y: 0.0, width: self.base.width, height: 4.0 },
            Style::fill(Color::rgb(0xdd, 0xdd, 0xdd)),
        )];
        let label = format::identity;
        let axis = Axis::new("x-axis", Orient::Bottom, &label).tick_size(0.0).ticks(
            (self.years[1] - self.years[0]).unsigned_abs().max(1) as usize,
        );
        marks.extend(axis.marks(&self.x, (0.0, 12.0)));
        marks
    }

    fn handle_marks(&self) -> Vec<Mark> {
        vec![Mark::new(
            "handle",
            Shape::Circle { cx: self.position_of(self.year), cy: 2.0, r: HANDLE_RADIUS },
            Style::fill(Color::WHITE).with_stroke(Color::rgb(0x77, 0x77, 0x77), 1.0),
        )]
    }
}

impl View for SingleYearSlider {
    type Display = i32;

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn handlers() -> Vec<(EventKind, Handler<Self>)> {
        let table: [(EventKind, Handler<Self>); 1] = [(EventKind::Resize, handle_resize)];
        table.to_vec()
    }

    fn initialize(&mut self) {
        self.base.scene.add_layer(TRACK_LAYER);
        self.base.scene.add_layer(HANDLE_LAYER);
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|_| OUTER_HEIGHT - MARGIN.vsum());
        self.x.set_range(0.0, self.base.width);
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, _options: &UpdateOptions) {}

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(self.brush_duration);
        let track = self.track_marks();
        let handle = self.handle_marks();
        self.base.scene.join(TRACK_LAYER, track, Duration::ZERO);
        self.base.scene.join(HANDLE_LAYER, handle, duration);
        self.base.last_transition = Some(duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.year
    }
}
