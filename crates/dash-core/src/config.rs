// File: crates/dash-core/src/config.rs
// Summary: Dashboard configuration (year ranges, durations, breakpoints, domains).
// Every field has a default, so an empty JSON object is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::data::Factor;
use crate::focus::ZoomDurations;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Span of years the death-rate series (and the year slider) covers.
    pub death_rate_years: [i32; 2],
    /// Span of years the drug hierarchy and series cover.
    pub drug_years: [i32; 2],
    pub default_year: i32,
    pub default_factor: Factor,
    pub transition_ms: u64,
    pub slider_transition_ms: u64,
    pub brush_transition_ms: u64,
    pub zoom_ms: u64,
    pub slow_zoom_ms: u64,
    pub switch_ms: u64,
    /// Widths above this are `SizeGroup::Medium`.
    pub size_breakpoint: f64,
    pub death_rate_domain: [f64; 2],
    pub key_domain: Vec<f64>,
    pub stacked_max: f64,
    pub container_width: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            death_rate_years: [2002, 2014],
            drug_years: [2003, 2013],
            default_year: 2014,
            default_factor: Factor::MedianIncome,
            transition_ms: 1000,
            slider_transition_ms: 250,
            brush_transition_ms: 750,
            zoom_ms: 750,
            slow_zoom_ms: 7500,
            switch_ms: 1000,
            size_breakpoint: 256.0,
            death_rate_domain: [0.0, 35.0],
            key_domain: vec![0.0, 1.0, 5.0, 10.0, 15.0, 20.0],
            stacked_max: 2_100_000.0,
            container_width: crate::types::DEFAULT_CONTAINER_WIDTH,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json_str(&text)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn slider_transition(&self) -> Duration {
        Duration::from_millis(self.slider_transition_ms)
    }

    pub fn brush_transition(&self) -> Duration {
        Duration::from_millis(self.brush_transition_ms)
    }

    pub fn switch_transition(&self) -> Duration {
        Duration::from_millis(self.switch_ms)
    }

    pub fn zoom_durations(&self) -> ZoomDurations {
        ZoomDurations::new(Duration::from_millis(self.zoom_ms), Duration::from_millis(self.slow_zoom_ms))
    }
}
