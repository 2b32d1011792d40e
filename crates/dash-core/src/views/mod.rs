// File: crates/dash-core/src/views/mod.rs
// Summary: Concrete dashboard views and the helpers they share.

pub mod choropleth;
pub mod legend;
pub mod scatterplot;
pub mod single_year_slider;
pub mod stacked_area;
pub mod treemap;
pub mod year_slider;

pub use choropleth::{Choropleth, StateRate};
pub use legend::{DrugTypeLegend, LegendEntry};
pub use scatterplot::{Dot, Scatterplot};
pub use single_year_slider::SingleYearSlider;
pub use stacked_area::{StackPoint, StackedAreaChart, SubstanceStack};
pub use treemap::{Treemap, TreemapCell};
pub use year_slider::{Handle, SliderState, YearSlider};

use crate::color::{Ordinal, CATEGORY10, PURPLES};
use crate::hierarchy::Hierarchy;
use crate::color::Quantile;

pub const HIGHLIGHTED: &str = "highlighted";

/// Colour per top-level drug category, shared by the treemap, stacked area and legend.
pub fn drug_colors(tree: &Hierarchy) -> Ordinal {
    Ordinal::new(tree.category_names(), &CATEGORY10)
}

/// Death-rate colours over the key buckets, shared by the map and the scatterplot.
pub fn death_rate_colors(key_domain: &[f64]) -> Quantile {
    Quantile::new(key_domain, &PURPLES)
}

/// Rough rendered width of `text` at `size` px; enough to decide whether a label fits.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}
