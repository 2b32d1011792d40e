// File: crates/dash-core/src/lib.rs
// Summary: Core library entry point; exports the event bus, view lifecycle, treemap focus,
// regression and the retained scene model the renderers consume.

pub mod axis;
pub mod bus;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod event;
pub mod focus;
pub mod format;
pub mod geometry;
pub mod hierarchy;
pub mod layout;
pub mod regression;
pub mod scale;
pub mod scene;
pub mod types;
pub mod view;
pub mod views;

pub use bus::{EventBus, ListenerId};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::Dashboard;
pub use data::{Datasets, Factor, LoadError};
pub use event::{Event, EventKind, UpdateOptions};
pub use focus::{FocusMachine, FocusState, Viewport, Zoom, ZoomDurations};
pub use geometry::Rect;
pub use hierarchy::{Hierarchy, NodeId, TreeRecord};
pub use layout::{squarify, Layout};
pub use regression::{fit, Fit};
pub use scene::{Mark, Scene, Shape, Style};
pub use types::{Containers, Insets, SizeGroup};
pub use view::{attach, View, ViewBase};
