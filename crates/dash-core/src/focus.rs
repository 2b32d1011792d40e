// File: crates/dash-core/src/focus.rs
// Summary: Treemap zoom state machine (focus, year index, visibility) and the viewport
// that maps the focused rectangle onto the full view.
// Notes:
// - Zoom is a toggle, not a stack: activating a node inside the focused group zooms out
//   to the root, activating anything else focuses that node's parent.
// - The focus is a plain `NodeId` into an immutable `Hierarchy`; it never owns nodes.

use std::time::Duration;

use crate::geometry::Rect;
use crate::hierarchy::{Hierarchy, NodeId};
use crate::layout::Layout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusState {
    Root,
    Subtree(NodeId),
}

/// Zoom transition lengths; the slow one is selected by the slow-motion modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomDurations {
    pub normal: Duration,
    pub slow_motion: Duration,
}

impl Default for ZoomDurations {
    fn default() -> Self {
        Self { normal: Duration::from_millis(750), slow_motion: Duration::from_millis(7500) }
    }
}

impl ZoomDurations {
    pub fn new(normal: Duration, slow_motion: Duration) -> Self {
        Self { normal, slow_motion }
    }

    #[inline]
    pub fn select(&self, slow_motion: bool) -> Duration {
        if slow_motion { self.slow_motion } else { self.normal }
    }
}

/// Result of a zoom transition: the new focus and how long cells should take to get there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zoom {
    pub focus: NodeId,
    pub duration: Duration,
}

#[derive(Clone, Debug)]
pub struct FocusMachine {
    root: NodeId,
    focus: NodeId,
    year_index: usize,
    visible: bool,
    durations: ZoomDurations,
}

impl FocusMachine {
    pub fn new(tree: &Hierarchy, year_index: usize, durations: ZoomDurations) -> Self {
        Self { root: tree.root(), focus: tree.root(), year_index, visible: true, durations }
    }

    pub fn state(&self) -> FocusState {
        if self.focus == self.root { FocusState::Root } else { FocusState::Subtree(self.focus) }
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    pub fn durations(&self) -> ZoomDurations {
        self.durations
    }

    /// Activate `target`. Returns `None` (and leaves the focus alone) when `target` has no parent.
    pub fn zoom_in(&mut self, tree: &Hierarchy, target: NodeId, slow_motion: bool) -> Option<Zoom> {
        let Some(parent) = tree.parent(target) else {
            log::debug!("zoom on node {} ignored: no parent", target.index());
            return None;
        };
        self.focus = if self.focus == parent { self.root } else { parent };
        log::debug!("treemap focus -> '{}'", tree.node(self.focus).name);
        Some(Zoom { focus: self.focus, duration: self.durations.select(slow_motion) })
    }

    /// Switch the size series index. Returns whether anything changed.
    pub fn reindex(&mut self, year_index: usize) -> bool {
        if year_index == self.year_index {
            return false;
        }
        self.year_index = year_index;
        true
    }

    /// Flip visibility; returns the new value.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn year_index(&self) -> usize {
        self.year_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Viewport that stretches the focused node's rectangle over `width` x `height`.
    pub fn viewport(&self, layout: &Layout, width: f64, height: f64) -> Viewport {
        Viewport::new(layout.rect(self.focus), width, height)
    }
}

/// Maps layout coordinates into view coordinates with the focus rectangle as the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(focus: Rect, width: f64, height: f64) -> Self {
        Self {
            x_domain: (focus.x, focus.right()),
            y_domain: (focus.y, focus.bottom()),
            width,
            height,
        }
    }

    fn kx(&self) -> f64 {
        let span = self.x_domain.1 - self.x_domain.0;
        if span > 0.0 { self.width / span } else { 0.0 }
    }

    fn ky(&self) -> f64 {
        let span = self.y_domain.1 - self.y_domain.0;
        if span > 0.0 { self.height / span } else { 0.0 }
    }

    pub fn project(&self, rect: Rect) -> Rect {
        let (kx, ky) = (self.kx(), self.ky());
        Rect::new((rect.x - self.x_domain.0) * kx, (rect.y - self.y_domain.0) * ky, rect.dx * kx, rect.dy * ky)
    }

    /// Inverse of `project` for a single point.
    pub fn unproject(&self, px: f64, py: f64) -> (f64, f64) {
        let (kx, ky) = (self.kx(), self.ky());
        let x = if kx > 0.0 { self.x_domain.0 + px / kx } else { self.x_domain.0 };
        let y = if ky > 0.0 { self.y_domain.0 + py / ky } else { self.y_domain.0 };
        (x, y)
    }
}
