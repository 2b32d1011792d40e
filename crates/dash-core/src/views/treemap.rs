// File: crates/dash-core/src/views/treemap.rs
// Summary: Drug-treatment treemap with one-level zoom, a year index driven by the drug
// slider, and a horizontal slide-out when the chart is switched away.
// Notes:
// - Cell geometry comes from `squarify` in layout space; the focus viewport stretches the
//   focused rectangle over the view, so zooming only changes the projection.
// - The focus survives a year change: node ids are stable across relayouts.

use std::rc::Rc;
use std::time::Duration;

use crate::color::{Color, Ordinal};
use crate::config::DashboardConfig;
use crate::event::{Event, EventKind, UpdateOptions};
use crate::focus::{FocusMachine, FocusState, Viewport, Zoom};
use crate::format;
use crate::geometry::Rect;
use crate::hierarchy::{Hierarchy, NodeId};
use crate::layout::{squarify, Layout};
use crate::scene::{Anchor, Group, Mark, Shape, Style, Weight};
use crate::types::{Containers, Insets};
use crate::view::{handle_resize, Handler, View, ViewBase};

use super::{drug_colors, text_width};

pub const CONTAINER: &str = "treemap-area";
pub const CELLS_LAYER: &str = "cells";
pub const LABELS_LAYER: &str = "labels";

const MARGIN: Insets = Insets::new(25.0, 100.0, 30.0, 100.0);
/// Horizontal offset that parks the chart off-screen.
pub const HIDDEN_OFFSET: f64 = -3000.0;
const LABEL_SIZE: f64 = 11.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TreemapCell {
    pub id: NodeId,
    pub name: String,
    pub category: String,
    pub value: f64,
    /// Layout-space rectangle (before the focus projection).
    pub rect: Rect,
}

pub struct Treemap {
    base: ViewBase,
    tree: Rc<Hierarchy>,
    machine: FocusMachine,
    first_year: i32,
    colors: Ordinal,
    default_duration: Duration,
    switch_duration: Duration,
    layout: Layout,
    display: Vec<TreemapCell>,
}

impl Treemap {
    pub fn new(containers: Rc<Containers>, tree: Rc<Hierarchy>, config: &DashboardConfig) -> Self {
        let first_year = tree.years().map_or(config.drug_years[0], |y| y[0]);
        // Start on the most recent year.
        let year_index = tree.series_len().saturating_sub(1);
        let machine = FocusMachine::new(&tree, year_index, config.zoom_durations());
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            colors: drug_colors(&tree),
            machine,
            tree,
            first_year,
            default_duration: config.transition(),
            switch_duration: config.switch_transition(),
            layout: Layout::default(),
            display: Vec::new(),
        }
    }

    pub fn focus(&self) -> NodeId {
        self.machine.focus()
    }

    pub fn focus_state(&self) -> FocusState {
        self.machine.state()
    }

    pub fn year_index(&self) -> usize {
        self.machine.year_index()
    }

    pub fn is_visible(&self) -> bool {
        self.machine.is_visible()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    fn viewport(&self) -> Viewport {
        self.machine.viewport(&self.layout, self.base.width, self.base.height)
    }

    /// Click on a cell: apply the zoom toggle and animate every cell to the new viewport.
    pub fn activate(&mut self, target: NodeId, slow_motion: bool) -> Option<Zoom> {
        let zoom = self.machine.zoom_in(&self.tree, target, slow_motion)?;
        self.render(zoom.duration);
        Some(zoom)
    }

    /// Click at a point in view coordinates (inside the margin).
    pub fn activate_at(&mut self, px: f64, py: f64, slow_motion: bool) -> Option<Zoom> {
        let target = self.cell_at(px, py)?;
        self.activate(target, slow_motion)
    }

    /// Leaf whose projected cell contains the point.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<NodeId> {
        let vp = self.viewport();
        self.display.iter().find(|c| vp.project(c.rect).contains(px, py)).map(|c| c.id)
    }

    pub fn highlight_substance(&mut self, id: NodeId) {
        let Some(cell) = self.display.iter().find(|c| c.id == id) else {
            return;
        };
        let text = format!(
            "Substance Type: {}\nNumber of People Seeking Treatment: {}",
            cell.name,
            format::thousands(cell.value)
        );
        let (x, y) = self.viewport().project(cell.rect).center();
        self.base.scene.show_tooltip(text, x, y);
    }

    pub fn unhighlight_substance(&mut self) {
        self.base.scene.hide_tooltip();
    }

    fn offset(&self) -> f64 {
        if self.machine.is_visible() { self.base.margin.left } else { HIDDEN_OFFSET }
    }

    fn switch_view(&mut self, _event: &Event) {
        let visible = self.machine.toggle_visibility();
        let group = Group { offset: (self.offset(), self.base.margin.top), opacity: 1.0 };
        self.base.scene.set_group(group, self.switch_duration);
        log::debug!("treemap {}", if visible { "shown" } else { "hidden" });
    }

    fn on_update_drugs(&mut self, event: &Event) {
        let Event::UpdateDrugs { year } = event else {
            return;
        };
        let offset = year - self.first_year;
        if offset < 0 || offset as usize >= self.tree.series_len() {
            log::debug!("treemap: year {year} outside the drug series, ignored");
            return;
        }
        if self.machine.reindex(offset as usize) {
            self.update(&UpdateOptions::default());
        }
    }

    fn render(&mut self, duration: Duration) {
        let vp = self.viewport();
        let mut cells = Vec::with_capacity(self.display.len());
        let mut labels = Vec::with_capacity(self.display.len());
        for cell in &self.display {
            let r = vp.project(cell.rect);
            let key = self.tree.path(cell.id);
            cells.push(Mark::new(
                key.clone(),
                Shape::Rect { x: r.x, y: r.y, width: (r.dx - 1.0).max(0.0), height: (r.dy - 1.0).max(0.0) },
                Style::fill(self.colors.color(&cell.category)).with_stroke(Color::WHITE, 1.0),
            ));
            let fits = r.dx > text_width(&cell.name, LABEL_SIZE);
            let (cx, cy) = r.center();
            labels.push(Mark::new(
                format!("label-{key}"),
                Shape::Text {
                    x: cx,
                    y: cy + LABEL_SIZE * 0.35,
                    text: cell.name.clone(),
                    size: LABEL_SIZE,
                    anchor: Anchor::Middle,
                    weight: Weight::Normal,
                    rotate: 0.0,
                },
                Style::fill(Color::BLACK).with_opacity(if fits { 1.0 } else { 0.0 }),
            ));
        }
        self.base.scene.join(CELLS_LAYER, cells, duration);
        self.base.scene.join(LABELS_LAYER, labels, duration);
        self.base.last_transition = Some(duration);
    }
}

/// Name of the top-level category `id` belongs to.
fn category_of(tree: &Hierarchy, id: NodeId) -> String {
    let mut cur = id;
    while let Some(parent) = tree.parent(cur) {
        if parent == tree.root() {
            return tree.node(cur).name.clone();
        }
        cur = parent;
    }
    tree.node(cur).name.clone()
}

impl View for Treemap {
    type Display = Vec<TreemapCell>;

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn handlers() -> Vec<(EventKind, Handler<Self>)> {
        let table: [(EventKind, Handler<Self>); 3] = [
            (EventKind::SwitchView, Self::switch_view),
            (EventKind::UpdateDrugs, Self::on_update_drugs),
            (EventKind::Resize, handle_resize),
        ];
        table.to_vec()
    }

    fn initialize(&mut self) {
        self.base.scene.add_layer(CELLS_LAYER);
        self.base.scene.add_layer(LABELS_LAYER);
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|w| w * 0.66 - MARGIN.vsum());
        let group = Group { offset: (self.offset(), self.base.margin.top), opacity: 1.0 };
        self.base.scene.set_group(group, Duration::ZERO);
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, _options: &UpdateOptions) {
        let index = self.machine.year_index();
        let tree = &self.tree;
        self.layout = squarify(tree, self.base.width, self.base.height, |id| tree.leaf_size(id, index));
        self.display = tree
            .leaves()
            .filter(|id| *id != tree.root())
            .map(|id| TreemapCell {
                id,
                name: tree.node(id).name.clone(),
                category: category_of(tree, id),
                value: self.layout.value(id),
                rect: self.layout.rect(id),
            })
            .collect();
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        self.render(options.duration_or(self.default_duration));
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
