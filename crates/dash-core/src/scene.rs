// File: crates/dash-core/src/scene.rs
// Summary: Retained, keyed element tree per view; the contract between views and renderers.
// Notes:
// - `join` reconciles a layer against a new list of marks by key (enter/update/exit).
// - Transitions are fire-and-forget: a later join retargets in-flight elements from
//   their current interpolated state, it never queues behind them.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::color::Color;
use crate::geometry::lerp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    Start,
    #[default]
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weight {
    Light,
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Polygon { points: Vec<(f64, f64)> },
    Text { x: f64, y: f64, text: String, size: f64, anchor: Anchor, weight: Weight, rotate: f64 },
}

impl Shape {
    /// Plain text mark, middle-anchored, normal weight.
    pub fn text(x: f64, y: f64, text: impl Into<String>, size: f64) -> Self {
        Shape::Text { x, y, text: text.into(), size, anchor: Anchor::Middle, weight: Weight::Normal, rotate: 0.0 }
    }

    fn lerp(&self, to: &Shape, t: f64) -> Shape {
        use Shape::*;
        match (self, to) {
            (Rect { x, y, width, height }, Rect { x: x2, y: y2, width: w2, height: h2 }) => Rect {
                x: lerp(*x, *x2, t),
                y: lerp(*y, *y2, t),
                width: lerp(*width, *w2, t),
                height: lerp(*height, *h2, t),
            },
            (Circle { cx, cy, r }, Circle { cx: cx2, cy: cy2, r: r2 }) => Circle {
                cx: lerp(*cx, *cx2, t),
                cy: lerp(*cy, *cy2, t),
                r: lerp(*r, *r2, t),
            },
            (Line { x1, y1, x2, y2 }, Line { x1: a1, y1: b1, x2: a2, y2: b2 }) => Line {
                x1: lerp(*x1, *a1, t),
                y1: lerp(*y1, *b1, t),
                x2: lerp(*x2, *a2, t),
                y2: lerp(*y2, *b2, t),
            },
            (Polygon { points: from }, Polygon { points }) if from.len() == points.len() => Polygon {
                points: from
                    .iter()
                    .zip(points)
                    .map(|(a, b)| (lerp(a.0, b.0, t), lerp(a.1, b.1, t)))
                    .collect(),
            },
            (Text { x, y, size, .. }, Text { x: x2, y: y2, text, size: s2, anchor, weight, rotate }) => Text {
                x: lerp(*x, *x2, t),
                y: lerp(*y, *y2, t),
                text: text.clone(),
                size: lerp(*size, *s2, t),
                anchor: *anchor,
                weight: *weight,
                rotate: *rotate,
            },
            _ => to.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, opacity: 1.0 }
    }
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    fn lerp(&self, to: &Style, t: f64) -> Style {
        let mix = |a: Option<Color>, b: Option<Color>| match (a, b) {
            (Some(a), Some(b)) => Some(a.lerp(b, t)),
            (_, b) => b,
        };
        Style {
            fill: mix(self.fill, to.fill),
            stroke: mix(self.stroke, to.stroke),
            stroke_width: lerp(self.stroke_width, to.stroke_width, t),
            opacity: lerp(self.opacity, to.opacity, t),
        }
    }
}

/// A keyed visual element: identity, geometry and style.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub key: String,
    pub shape: Shape,
    pub style: Style,
}

impl Mark {
    pub fn new(key: impl Into<String>, shape: Shape, style: Style) -> Self {
        Self { key: key.into(), shape, style }
    }

    fn lerp(&self, to: &Mark, t: f64) -> Mark {
        Mark { key: to.key.clone(), shape: self.shape.lerp(&to.shape, t), style: self.style.lerp(&to.style, t) }
    }
}

#[derive(Clone, Debug)]
struct Element {
    from: Mark,
    to: Mark,
    elapsed: Duration,
    duration: Duration,
    classes: BTreeSet<String>,
}

impl Element {
    fn progress(&self) -> f64 {
        progress(self.elapsed, self.duration)
    }

    fn current(&self) -> Mark {
        let t = self.progress();
        if t >= 1.0 { self.to.clone() } else { self.from.lerp(&self.to, ease_cubic_in_out(t)) }
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t2 = t * 2.0;
    if t2 <= 1.0 { t2 * t2 * t2 / 2.0 } else { ((t2 - 2.0) * (t2 - 2.0) * (t2 - 2.0) + 2.0) / 2.0 }
}

#[derive(Clone, Debug)]
struct Layer {
    name: String,
    elements: Vec<Element>,
    last_duration: Option<Duration>,
}

/// Whole-view transform: translation of the drawing group and its opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Group {
    pub offset: (f64, f64),
    pub opacity: f64,
}

impl Default for Group {
    fn default() -> Self {
        Self { offset: (0.0, 0.0), opacity: 1.0 }
    }
}

impl Group {
    fn lerp(&self, to: &Group, t: f64) -> Group {
        Group {
            offset: (lerp(self.offset.0, to.offset.0, t), lerp(self.offset.1, to.offset.1, t)),
            opacity: lerp(self.opacity, to.opacity, t),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct GroupState {
    from: Group,
    to: Group,
    elapsed: Duration,
    duration: Duration,
}

impl GroupState {
    fn current(&self) -> Group {
        let t = progress(self.elapsed, self.duration);
        if t >= 1.0 { self.to } else { self.from.lerp(&self.to, ease_cubic_in_out(t)) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Counts reported by [`Scene::join`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// One mark as it should be drawn right now, with the classes applied to it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameItem {
    pub mark: Mark,
    pub classes: Vec<String>,
}

impl FrameItem {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameLayer {
    pub name: String,
    pub items: Vec<FrameItem>,
}

/// Interpolated snapshot of a scene, ready for a backend to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub group: Group,
    pub layers: Vec<FrameLayer>,
    pub tooltip: Option<Tooltip>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    container: String,
    width: f64,
    height: f64,
    layers: Vec<Layer>,
    group: GroupState,
    tooltip: Option<Tooltip>,
}

impl Scene {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            width: 0.0,
            height: 0.0,
            layers: Vec::new(),
            group: GroupState::default(),
            tooltip: None,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Ensure a layer exists. Layers paint in creation order.
    pub fn add_layer(&mut self, name: &str) {
        if self.layer(name).is_none() {
            self.layers.push(Layer { name: name.to_string(), elements: Vec::new(), last_duration: None });
        }
    }

    fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    fn layer_mut(&mut self, name: &str) -> &mut Layer {
        self.add_layer(name);
        let idx = self.layers.iter().position(|l| l.name == name).unwrap_or(self.layers.len() - 1);
        &mut self.layers[idx]
    }

    /// Reconcile `layer` against `marks`: new keys enter at their target, existing keys
    /// transition over `duration`, keys no longer present exit immediately.
    pub fn join(&mut self, layer: &str, marks: Vec<Mark>, duration: Duration) -> JoinStats {
        let layer = self.layer_mut(layer);
        let mut old = std::mem::take(&mut layer.elements);
        let mut stats = JoinStats::default();
        let mut next = Vec::with_capacity(marks.len());
        for mark in marks {
            match old.iter().position(|e| e.to.key == mark.key) {
                Some(i) => {
                    let prev = old.swap_remove(i);
                    let from = if duration.is_zero() { mark.clone() } else { prev.current() };
                    next.push(Element { from, to: mark, elapsed: Duration::ZERO, duration, classes: prev.classes });
                    stats.updated += 1;
                }
                None => {
                    next.push(Element {
                        from: mark.clone(),
                        to: mark,
                        elapsed: Duration::ZERO,
                        duration,
                        classes: BTreeSet::new(),
                    });
                    stats.entered += 1;
                }
            }
        }
        stats.exited = old.len();
        layer.elements = next;
        layer.last_duration = Some(duration);
        stats
    }

    /// Add or remove `class` on one element. Returns whether the element exists.
    /// Removing a class that is not set is a no-op.
    pub fn classed(&mut self, layer: &str, key: &str, class: &str, on: bool) -> bool {
        let layer = self.layer_mut(layer);
        match layer.elements.iter_mut().find(|e| e.to.key == key) {
            Some(e) => {
                if on {
                    e.classes.insert(class.to_string());
                } else {
                    e.classes.remove(class);
                }
                true
            }
            None => false,
        }
    }

    pub fn has_class(&self, layer: &str, key: &str, class: &str) -> bool {
        self.layer(layer)
            .and_then(|l| l.elements.iter().find(|e| e.to.key == key))
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Target marks of a layer, in paint order.
    pub fn marks(&self, layer: &str) -> Vec<&Mark> {
        self.layer(layer).map(|l| l.elements.iter().map(|e| &e.to).collect()).unwrap_or_default()
    }

    pub fn mark(&self, layer: &str, key: &str) -> Option<&Mark> {
        self.layer(layer)?.elements.iter().find(|e| e.to.key == key).map(|e| &e.to)
    }

    /// Duration of the most recent join on `layer`.
    pub fn last_duration(&self, layer: &str) -> Option<Duration> {
        self.layer(layer)?.last_duration
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// Transition the whole drawing group toward `group`.
    pub fn set_group(&mut self, group: Group, duration: Duration) {
        let from = if duration.is_zero() { group } else { self.group.current() };
        self.group = GroupState { from, to: group, elapsed: Duration::ZERO, duration };
    }

    /// Target group transform.
    pub fn group(&self) -> Group {
        self.group.to
    }

    pub fn show_tooltip(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.tooltip = Some(Tooltip { text: text.into(), x, y });
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Move every running transition forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        for layer in &mut self.layers {
            for e in &mut layer.elements {
                e.elapsed = (e.elapsed + dt).min(e.duration);
            }
        }
        self.group.elapsed = (self.group.elapsed + dt).min(self.group.duration);
    }

    pub fn is_animating(&self) -> bool {
        self.group.elapsed < self.group.duration
            || self.layers.iter().any(|l| l.elements.iter().any(|e| e.elapsed < e.duration))
    }

    pub fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            group: self.group.current(),
            layers: self
                .layers
                .iter()
                .map(|l| FrameLayer {
                    name: l.name.clone(),
                    items: l
                        .elements
                        .iter()
                        .map(|e| FrameItem { mark: e.current(), classes: e.classes.iter().cloned().collect() })
                        .collect(),
                })
                .collect(),
            tooltip: self.tooltip.clone(),
        }
    }
}
