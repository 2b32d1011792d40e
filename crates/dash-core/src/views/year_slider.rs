// File: crates/dash-core/src/views/year_slider.rs
// Summary: Two-handle year picker: the top handle selects the death-rate year, the bottom
// handle the factor year. Only the end of a drag is broadcast.
// Notes:
// - The handles are independent; either may sit above the other. The highlighted span is
//   min/max of the two, computed when drawing.

use std::rc::Rc;
use std::time::Duration;

use crate::color::Color;
use crate::config::DashboardConfig;
use crate::event::{Event, EventKind, UpdateOptions};
use crate::geometry::clamp;
use crate::scale::LinearScale;
use crate::scene::{Anchor, Mark, Shape, Style, Weight};
use crate::types::{Containers, Insets};
use crate::view::{handle_resize, Handler, View, ViewBase};

pub const CONTAINER: &str = "year-slider";
pub const TRACKS_LAYER: &str = "tracks";
pub const SPAN_LAYER: &str = "span";
pub const MARKERS_LAYER: &str = "markers";
pub const YEARS_LAYER: &str = "years";
pub const QUESTION_KEY: &str = "question";

const MARGIN: Insets = Insets::new(10.0, 20.0, 10.0, 20.0);
const MARKER_RADIUS: f64 = 10.0;
const TOP_COLOR: Color = Color::rgb(0x54, 0x27, 0x8f);
const BOTTOM_COLOR: Color = Color::rgb(0x23, 0xa9, 0x23);
const TEXT_SIZE: f64 = 11.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    /// Death-rate year.
    Top,
    /// Factor year.
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderState {
    pub top: i32,
    pub bottom: i32,
    /// `(min, max)` of the two handles.
    pub span: (i32, i32),
}

struct Drag {
    handle: Handle,
    px: f64,
}

pub struct YearSlider {
    base: ViewBase,
    range: [i32; 2],
    top: i32,
    bottom: i32,
    x: LinearScale,
    drag: Option<Drag>,
    default_duration: Duration,
    display: SliderState,
}

impl YearSlider {
    pub fn new(containers: Rc<Containers>, config: &DashboardConfig) -> Self {
        let range = config.death_rate_years;
        let start = range[1];
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            range,
            top: start,
            bottom: start,
            x: LinearScale::new((range[0] as f64, range[1] as f64), (0.0, 1.0)),
            drag: None,
            default_duration: config.slider_transition(),
            display: SliderState { top: start, bottom: start, span: (start, start) },
        }
    }

    /// `(top, bottom)` years.
    pub fn years(&self) -> (i32, i32) {
        (self.top, self.bottom)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pixel position of a year along the track.
    pub fn position_of(&self, year: i32) -> f64 {
        self.x.map(year as f64)
    }

    pub fn begin_drag(&mut self, handle: Handle) {
        let year = match handle {
            Handle::Top => self.top,
            Handle::Bottom => self.bottom,
        };
        self.drag = Some(Drag { handle, px: self.position_of(year) });
    }

    /// Move the dragged handle to `px` (clamped to the track). Updates locally only.
    pub fn drag_to(&mut self, px: f64) {
        let x = clamp(px, 0.0, self.base.width);
        let year = self.x.invert(x).round() as i32;
        let Some(drag) = self.drag.as_mut() else {
            log::debug!("year slider: drag_to without an active handle");
            return;
        };
        drag.px = x;
        match drag.handle {
            Handle::Top => self.top = year,
            Handle::Bottom => self.bottom = year,
        }
        self.update(&UpdateOptions::immediate());
    }

    /// Snap the handle onto its year and broadcast the selection.
    pub fn end_drag(&mut self) -> Option<[i32; 2]> {
        self.drag.take()?;
        self.update(&UpdateOptions::default());
        let years = [self.top, self.bottom];
        self.base.broadcast(Event::Update(UpdateOptions::default().with_years(years[0], years[1])));
        Some(years)
    }

    pub fn question_clicked(&mut self) {
        self.base.broadcast(Event::QuestionClicked);
    }

    fn top_y(&self) -> f64 {
        (self.base.height / 4.0).floor()
    }

    fn bottom_y(&self) -> f64 {
        self.base.height / 4.0 * 3.0
    }

    fn handle_x(&self, handle: Handle, year: i32) -> f64 {
        match &self.drag {
            Some(drag) if drag.handle == handle => drag.px,
            _ => self.position_of(year),
        }
    }

    fn track_marks(&self) -> Vec<Mark> {
        let w = self.base.width;
        let track = Style::stroke(Color::rgb(0xcc, 0xcc, 0xcc), 4.0);
        let ink = Style::fill(Color::rgb(0x33, 0x33, 0x33));
        vec![
            Mark::new("top-track", Shape::Line { x1: 0.0, y1: self.top_y(), x2: w, y2: self.top_y() }, track),
            Mark::new("bottom-track", Shape::Line { x1: 0.0, y1: self.bottom_y(), x2: w, y2: self.bottom_y() }, track),
            Mark::new("top-label", Shape::text(w / 2.0, self.top_y() - 15.0, "Death Rate", TEXT_SIZE), ink),
            Mark::new("bottom-label", Shape::text(w / 2.0, self.bottom_y() + 25.0, "Factor Data", TEXT_SIZE), ink),
            Mark::new(
                QUESTION_KEY,
                Shape::Text {
                    x: w,
                    y: self.base.height + 5.0,
                    text: "?".into(),
                    size: 14.0,
                    anchor: Anchor::End,
                    weight: Weight::Bold,
                    rotate: 0.0,
                },
                ink,
            ),
        ]
    }

    fn span_marks(&self) -> Vec<Mark> {
        let (lo, hi) = self.display.span;
        let left = self.position_of(lo) - MARKER_RADIUS;
        let width = self.position_of(hi) - self.position_of(lo) + 2.0 * MARKER_RADIUS;
        vec![Mark::new(
            "dragging-box",
            Shape::Rect { x: left, y: self.base.height / 4.0, width, height: self.base.height / 2.0 },
            Style::fill(Color::BLACK).with_opacity(0.8),
        )]
    }

    fn marker_marks(&self) -> Vec<Mark> {
        vec![
            Mark::new(
                "top-marker",
                Shape::Circle { cx: self.handle_x(Handle::Top, self.top), cy: self.top_y(), r: MARKER_RADIUS },
                Style::fill(TOP_COLOR),
            ),
            Mark::new(
                "bottom-marker",
                Shape::Circle {
                    cx: self.handle_x(Handle::Bottom, self.bottom),
                    cy: self.bottom_y(),
                    r: MARKER_RADIUS,
                },
                Style::fill(BOTTOM_COLOR),
            ),
        ]
    }

    fn year_marks(&self) -> Vec<Mark> {
        let (lo, hi) = self.display.span;
        (self.range[0]..=self.range[1])
            .map(|year| {
                let selected = year >= lo && year <= hi;
                let color = if selected { Color::WHITE } else { Color::rgb(0x33, 0x33, 0x33) };
                Mark::new(
                    format!("year-{year}"),
                    Shape::Text {
                        x: self.position_of(year) - 4.0,
                        y: self.base.height / 2.0,
                        text: year.to_string(),
                        size: TEXT_SIZE,
                        anchor: Anchor::Middle,
                        weight: if selected { Weight::Bold } else { Weight::Light },
                        rotate: 90.0,
                    },
                    Style::fill(color),
                )
            })
            .collect()
    }
}

impl View for YearSlider {
    type Display = SliderState;

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
        for layer in [TRACKS_LAYER, SPAN_LAYER, MARKERS_LAYER, YEARS_LAYER] {
            self.base.scene.add_layer(layer);
        }
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|w| w / 3.0);
        self.x.set_range(0.0, self.base.width);
        if let Some(drag) = self.drag.as_mut() {
            let year = match drag.handle {
                Handle::Top => self.top,
                Handle::Bottom => self.bottom,
            };
            drag.px = self.x.map(year as f64);
        }
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, _options: &UpdateOptions) {
        self.display = SliderState {
            top: self.top,
            bottom: self.bottom,
            span: (self.top.min(self.bottom), self.top.max(self.bottom)),
        };
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(self.default_duration);
        let tracks = self.track_marks();
        let span = self.span_marks();
        let markers = self.marker_marks();
        let years = self.year_marks();
        let scene = &mut self.base.scene;
        scene.join(TRACKS_LAYER, tracks, Duration::ZERO);
        scene.join(SPAN_LAYER, span, duration);
        scene.join(MARKERS_LAYER, markers, duration);
        scene.join(YEARS_LAYER, years, Duration::ZERO);
        self.base.last_transition = Some(duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
