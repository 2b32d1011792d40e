// File: crates/dash-core/src/types.rs
// Summary: Shared view types (margins, size groups, container sizes).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Width used for a container nobody has measured yet.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 960.0;

/// View margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Create margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(20.0, 20.0, 20.0, 20.0)
    }
}

/// Coarse responsive breakpoint. Drives label and font choices, never geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeGroup {
    Small,
    #[default]
    Medium,
}

impl SizeGroup {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width > breakpoint { SizeGroup::Medium } else { SizeGroup::Small }
    }
}

/// Current pixel widths of the host containers, keyed by container id.
///
/// Stands in for querying the page layout; the orchestrator writes it on window
/// resize and each view reads its own entry when it measures itself.
#[derive(Debug)]
pub struct Containers {
    widths: RefCell<HashMap<String, f64>>,
    fallback: Cell<f64>,
}

impl Containers {
    pub fn new(fallback: f64) -> Self {
        Self { widths: RefCell::new(HashMap::new()), fallback: Cell::new(fallback) }
    }

    pub fn width(&self, id: &str) -> f64 {
        self.widths.borrow().get(id).copied().unwrap_or(self.fallback.get())
    }

    pub fn set_width(&self, id: &str, width: f64) {
        self.widths.borrow_mut().insert(id.to_string(), width.max(0.0));
    }

    /// Set every known container, and the fallback, to `width`.
    pub fn set_all(&self, width: f64) {
        let width = width.max(0.0);
        self.fallback.set(width);
        for w in self.widths.borrow_mut().values_mut() {
            *w = width;
        }
    }
}

impl Default for Containers {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_WIDTH)
    }
}
