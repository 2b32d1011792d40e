// File: crates/dash-core/src/axis.rs
// Summary: Axis model; turns a scale and a tick formatter into line/tick/label marks.

use crate::color::Color;
use crate::scale::LinearScale;
use crate::scene::{Anchor, Mark, Shape, Style, Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

pub struct Axis<'a> {
    pub key: &'a str,
    pub orient: Orient,
    pub ticks: usize,
    pub tick_size: f64,
    pub font_size: f64,
    pub color: Color,
    pub format: &'a dyn Fn(f64) -> String,
}

impl<'a> Axis<'a> {
    pub fn new(key: &'a str, orient: Orient, format: &'a dyn Fn(f64) -> String) -> Self {
        Self { key, orient, ticks: 10, tick_size: 6.0, font_size: 10.0, color: Color::rgb(0x33, 0x33, 0x33), format }
    }

    pub fn ticks(mut self, count: usize) -> Self {
        self.ticks = count;
        self
    }

    pub fn tick_size(mut self, size: f64) -> Self {
        self.tick_size = size;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Marks for the domain line, ticks and tick labels, positioned at `origin`
    /// (the translate of the axis group).
    pub fn marks(&self, scale: &LinearScale, origin: (f64, f64)) -> Vec<Mark> {
        let (ox, oy) = origin;
        let stroke = Style::stroke(self.color, 1.0);
        let label_style = Style::fill(self.color);
        let (r0, r1) = scale.range;
        let mut out = Vec::new();
        match self.orient {
            Orient::Bottom => {
                out.push(Mark::new(
                    format!("{}-domain", self.key),
                    Shape::Line { x1: ox + r0, y1: oy, x2: ox + r1, y2: oy },
                    stroke,
                ));
                for t in scale.ticks(self.ticks) {
                    let x = ox + scale.map(t);
                    out.push(Mark::new(
                        format!("{}-tick-{t}", self.key),
                        Shape::Line { x1: x, y1: oy, x2: x, y2: oy + self.tick_size },
                        stroke,
                    ));
                    out.push(Mark::new(
                        format!("{}-label-{t}", self.key),
                        Shape::Text {
                            x,
                            y: oy + self.tick_size + 3.0 + self.font_size,
                            text: (self.format)(t),
                            size: self.font_size,
                            anchor: Anchor::Middle,
                            weight: Weight::Normal,
                            rotate: 0.0,
                        },
                        label_style,
                    ));
                }
            }
            Orient::Left => {
                out.push(Mark::new(
                    format!("{}-domain", self.key),
                    Shape::Line { x1: ox, y1: oy + r0, x2: ox, y2: oy + r1 },
                    stroke,
                ));
                for t in scale.ticks(self.ticks) {
                    let y = oy + scale.map(t);
                    out.push(Mark::new(
                        format!("{}-tick-{t}", self.key),
                        Shape::Line { x1: ox - self.tick_size, y1: y, x2: ox, y2: y },
                        stroke,
                    ));
                    out.push(Mark::new(
                        format!("{}-label-{t}", self.key),
                        Shape::Text {
                            x: ox - self.tick_size - 3.0,
                            y: y + self.font_size * 0.35,
                            text: (self.format)(t),
                            size: self.font_size,
                            anchor: Anchor::End,
                            weight: Weight::Normal,
                            rotate: 0.0,
                        },
                        label_style,
                    ));
                }
            }
        }
        out
    }
}
