// File: crates/dash-core/tests/end_to_end.rs
// Purpose: Build the full dashboard, drive it through the bus and check the frames.

mod common;

use std::time::Duration;

use dash_core::dashboard::CONTAINER_IDS;
use dash_core::views::StateRate;
use dash_core::{Dashboard, DashboardConfig, Event, Factor, UpdateOptions, View};

#[test]
fn update_selects_year_in_input_order() {
    let dash = Dashboard::build(common::sample_datasets(), DashboardConfig::default());
    dash.bus().broadcast(&Event::Update(UpdateOptions::default().with_years(2014, 2014)), None);

    let rates = dash.choropleth().borrow().display_data().clone();
    assert_eq!(
        rates,
        vec![
            StateRate { id: "Ohio".into(), death_rate: 24.6 },
            StateRate { id: "Texas".into(), death_rate: 9.7 },
            StateRate { id: "United States".into(), death_rate: 14.7 },
        ]
    );
    // The national row is never plotted.
    let dots = dash.scatterplot().borrow().display_data().clone();
    assert_eq!(dots.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["Ohio", "Texas"]);
}

#[test]
fn factor_change_reaches_scatterplot_only() {
    let dash = Dashboard::build(common::sample_datasets(), DashboardConfig::default());
    dash.update_factor(Factor::Unemployment);
    let scatter = dash.scatterplot();
    assert_eq!(scatter.borrow().factor(), Factor::Unemployment);
    let ohio = scatter.borrow().display_data().iter().find(|d| d.id == "Ohio").map(|d| d.factor);
    assert_eq!(ohio, Some(5.7));
    // The map keeps its year.
    assert_eq!(dash.choropleth().borrow().death_rate_year(), 2014);
}

#[test]
fn frames_cover_every_container_and_settle() {
    let dash = Dashboard::build(common::sample_datasets(), DashboardConfig::default());
    let frames = dash.frames();
    let ids: Vec<&str> = frames.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, CONTAINER_IDS.to_vec());
    for (id, frame) in &frames {
        assert!(frame.width > 0.0 && frame.height > 0.0, "{id} has no size");
    }

    dash.update_factor(Factor::DeathRate);
    dash.switch_view();
    assert!(dash.is_animating());
    dash.advance(Duration::from_millis(16));
    assert!(dash.is_animating());
    dash.advance(Duration::from_secs(10));
    assert!(!dash.is_animating());
}
