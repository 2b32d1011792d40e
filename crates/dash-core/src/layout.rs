// File: crates/dash-core/src/layout.rs
// Summary: Squarified treemap layout over a `Hierarchy`.
// Notes:
// - Rows are laid along the shorter side of the remaining rectangle and closed when
//   adding another child would worsen the row's worst aspect ratio (target: golden ratio).
// - Internal node values are the sum of their leaves; zero or NaN values get no area.

use crate::geometry::Rect;
use crate::hierarchy::{Hierarchy, NodeId};

const RATIO: f64 = 1.618_033_988_749_895;

/// Geometry and value for every node of a hierarchy, indexed by `NodeId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    rects: Vec<Rect>,
    values: Vec<f64>,
}

impl Layout {
    pub fn rect(&self, id: NodeId) -> Rect {
        self.rects.get(id.index()).copied().unwrap_or_default()
    }

    pub fn value(&self, id: NodeId) -> f64 {
        self.values.get(id.index()).copied().unwrap_or(0.0)
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}

/// Lay out `tree` inside `width` x `height`; `value` is consulted for leaves only.
pub fn squarify<F>(tree: &Hierarchy, width: f64, height: f64, value: F) -> Layout
where
    F: Fn(NodeId) -> f64,
{
    let n = tree.len();
    let mut values = vec![0.0; n];
    // Children always have larger indices than their parent, so a reverse sweep sums bottom-up.
    for i in (0..n).rev() {
        let id = NodeId::from_index(i);
        let v = if tree.is_leaf(id) {
            sanitize(value(id))
        } else {
            tree.children(id).iter().map(|c| values[c.index()]).sum()
        };
        values[i] = v;
    }

    let mut rects = vec![Rect::default(); n];
    if n == 0 {
        return Layout { rects, values };
    }
    rects[tree.root().index()] = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let children = tree.children(id);
        if children.is_empty() {
            continue;
        }
        layout_children(children, rects[id.index()], values[id.index()], &values, &mut rects);
        stack.extend(children.iter().copied());
    }
    Layout { rects, values }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

struct Item {
    id: NodeId,
    area: f64,
}

fn layout_children(children: &[NodeId], parent: Rect, parent_value: f64, values: &[f64], rects: &mut [Rect]) {
    let k = if parent_value > 0.0 { parent.area() / parent_value } else { 0.0 };
    let mut remaining: Vec<Item> = children
        .iter()
        .map(|&id| Item { id, area: sanitize(values[id.index()] * k) })
        .collect();
    // Largest first: popped from the back.
    remaining.sort_by(|a, b| a.area.total_cmp(&b.area));

    let mut rect = parent;
    let mut row: Vec<Item> = Vec::new();
    let mut row_area = 0.0;
    let mut best = f64::INFINITY;
    let mut side = rect.dx.min(rect.dy);

    while let Some(item) = remaining.pop() {
        row_area += item.area;
        row.push(item);
        let score = worst(&row, row_area, side);
        if score <= best {
            best = score;
        } else {
            // Undo, close the row, and retry this item in a fresh row.
            if let Some(last) = row.pop() {
                row_area -= last.area;
                remaining.push(last);
            }
            position(&row, row_area, side, &mut rect, false, rects);
            side = rect.dx.min(rect.dy);
            row.clear();
            row_area = 0.0;
            best = f64::INFINITY;
        }
    }
    if !row.is_empty() {
        position(&row, row_area, side, &mut rect, true, rects);
    }
}

/// Worst aspect ratio in `row` when laid along a side of length `side`.
fn worst(row: &[Item], area: f64, side: f64) -> f64 {
    let mut rmin = f64::INFINITY;
    let mut rmax = 0.0f64;
    for item in row {
        if item.area > 0.0 {
            rmin = rmin.min(item.area);
            rmax = rmax.max(item.area);
        }
    }
    let s2 = area * area;
    let u2 = side * side;
    if s2 > 0.0 && rmin.is_finite() {
        (u2 * rmax * RATIO / s2).max(s2 / (u2 * rmin * RATIO))
    } else {
        f64::INFINITY
    }
}

/// Place a row along the side of length `side` and shrink `rect` by the row's thickness.
fn position(row: &[Item], area: f64, side: f64, rect: &mut Rect, flush: bool, rects: &mut [Rect]) {
    let mut x = rect.x;
    let mut y = rect.y;
    let mut thickness = if side > 0.0 { area / side } else { 0.0 };
    if side == rect.dx {
        // Horizontal row across the top of the remaining space.
        if flush || thickness > rect.dy {
            thickness = rect.dy;
        }
        for item in row {
            let dx = (rect.right() - x).min(if thickness > 0.0 { item.area / thickness } else { 0.0 });
            rects[item.id.index()] = Rect::new(x, y, dx, thickness);
            x += dx;
        }
        if let Some(last) = row.last() {
            rects[last.id.index()].dx += rect.right() - x;
        }
        rect.y += thickness;
        rect.dy -= thickness;
    } else {
        // Vertical column down the left of the remaining space.
        if flush || thickness > rect.dx {
            thickness = rect.dx;
        }
        for item in row {
            let dy = (rect.bottom() - y).min(if thickness > 0.0 { item.area / thickness } else { 0.0 });
            rects[item.id.index()] = Rect::new(x, y, thickness, dy);
            y += dy;
        }
        if let Some(last) = row.last() {
            rects[last.id.index()].dy += rect.bottom() - y;
        }
        rect.x += thickness;
        rect.dx -= thickness;
    }
}
