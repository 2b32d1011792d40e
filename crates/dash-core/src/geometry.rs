// File: crates/dash-core/src/geometry.rs
// Summary: Rectangle helpers shared by the treemap layout and the focus viewport.

/// Axis-aligned rectangle in the `{x, y, dx, dy}` form the treemap layout produces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }
    pub fn right(&self) -> f64 { self.x + self.dx }
    pub fn bottom(&self) -> f64 { self.y + self.dy }
    pub fn area(&self) -> f64 { self.dx * self.dy }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.dx / 2.0, self.y + self.dy / 2.0)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
