// File: crates/dash-core/src/views/legend.rs
// Summary: Swatch and label for every top-level drug category.

use std::rc::Rc;
use std::time::Duration;

use crate::color::{Color, Ordinal};
use crate::config::DashboardConfig;
use crate::event::{EventKind, UpdateOptions};
use crate::hierarchy::Hierarchy;
use crate::scene::{Mark, Shape, Style};
use crate::types::{Containers, Insets};
use crate::view::{handle_resize, Handler, View, ViewBase};

use super::drug_colors;

pub const CONTAINER: &str = "drug-legend";
pub const ENTRIES_LAYER: &str = "entries";

const MARGIN: Insets = Insets::new(0.0, 100.0, 0.0, 100.0);
const HEIGHT: f64 = 40.0;
const SWATCH: f64 = 10.0;
const LABEL_SIZE: f64 = 11.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub label: String,
    pub color: Color,
}

pub struct DrugTypeLegend {
    base: ViewBase,
    categories: Vec<String>,
    colors: Ordinal,
    display: Vec<LegendEntry>,
}

impl DrugTypeLegend {
    pub fn new(containers: Rc<Containers>, tree: &Hierarchy, config: &DashboardConfig) -> Self {
        Self {
            base: ViewBase::new(CONTAINER, containers, MARGIN, config.size_breakpoint),
            categories: tree.category_names(),
            colors: drug_colors(tree),
            display: Vec::new(),
        }
    }

    fn entry_x(&self, i: usize) -> f64 {
        let n = self.display.len().max(1) as f64;
        i as f64 * (self.base.width * 0.8) / n + 25.0
    }
}

impl View for DrugTypeLegend {
    type Display = Vec<LegendEntry>;

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
        self.base.scene.add_layer(ENTRIES_LAYER);
        self.resize();
    }

    fn resize(&mut self) {
        self.base.measure(|_| HEIGHT);
        self.update(&UpdateOptions::immediate());
    }

    fn wrangle(&mut self, _options: &UpdateOptions) {
        self.display = self
            .categories
            .iter()
            .map(|name| LegendEntry { name: name.clone(), label: name.replace('_', " "), color: self.colors.color(name) })
            .collect();
    }

    fn update(&mut self, options: &UpdateOptions) {
        self.wrangle(options);
        let duration = options.duration_or(Duration::ZERO);
        let mut marks = Vec::with_capacity(self.display.len() * 2);
        for (i, entry) in self.display.iter().enumerate() {
            let x = self.entry_x(i);
            marks.push(Mark::new(
                format!("swatch-{}", entry.name),
                Shape::Rect { x, y: 10.0, width: SWATCH, height: SWATCH },
                Style::fill(entry.color),
            ));
            marks.push(Mark::new(
                format!("label-{}", entry.name),
                Shape::text(x + 5.0, 30.0 + LABEL_SIZE * 0.35, entry.label.clone(), LABEL_SIZE),
                Style::fill(Color::rgb(0x33, 0x33, 0x33)),
            ));
        }
        self.base.scene.join(ENTRIES_LAYER, marks, duration);
        self.base.last_transition = Some(duration);
    }

    fn display_data(&self) -> &Self::Display {
        &self.display
    }
}
