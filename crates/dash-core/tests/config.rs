// File: crates/dash-core/tests/config.rs
// Purpose: Configuration defaults and partial JSON overrides.

use std::time::Duration;

use dash_core::{ConfigError, DashboardConfig, Factor};

#[test]
fn empty_object_is_the_default() {
    let cfg = DashboardConfig::from_json_str("{}").expect("valid");
    assert_eq!(cfg, DashboardConfig::default());
    assert_eq!(cfg.transition(), Duration::from_secs(1));
    assert_eq!(cfg.zoom_durations().select(true), Duration::from_millis(7500));
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = DashboardConfig::from_json_str(r#"{ "default_factor": "unemployment", "switch_ms": 200 }"#)
        .expect("valid");
    assert_eq!(cfg.default_factor, Factor::Unemployment);
    assert_eq!(cfg.switch_transition(), Duration::from_millis(200));
    assert_eq!(cfg.drug_years, [2003, 2013]);
}

#[test]
fn bad_input_is_reported() {
    assert!(matches!(DashboardConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
    assert!(matches!(
        DashboardConfig::from_path("/definitely/not/here/config.json"),
        Err(ConfigError::Io { .. })
    ));
}
