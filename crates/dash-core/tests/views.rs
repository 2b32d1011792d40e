// File: crates/dash-core/tests/views.rs
// Purpose: View lifecycle and cross-view coordination over the bus.

mod common;

use std::rc::Rc;
use std::time::Duration;

use dash_core::views::{choropleth, scatterplot, Choropleth, Handle, HIGHLIGHTED};
use dash_core::{Containers, Dashboard, DashboardConfig, Event, FocusState, UpdateOptions, View};

fn dashboard() -> Dashboard {
    Dashboard::build(common::sample_datasets(), DashboardConfig::default())
}

#[test]
fn wrangle_is_idempotent() {
    let data = common::sample_datasets();
    let config = DashboardConfig::default();
    let mut map = Choropleth::new(Rc::new(Containers::default()), data.shapes, data.deaths, &config);
    map.initialize();

    let opts = UpdateOptions::default().with_years(2013, 2013);
    map.wrangle(&opts);
    let first = map.display_data().clone();
    map.wrangle(&opts);
    assert_eq!(map.display_data(), &first);
    assert_eq!(first[0].death_rate, 20.0);
}

#[test]
fn resize_never_animates() {
    let dash = dashboard();
    dash.update_factor(dash_core::Factor::Unemployment);
    assert_eq!(dash.scatterplot().borrow().base().last_transition, Some(Duration::from_millis(1000)));

    dash.resize_window(700.0);
    assert_eq!(dash.choropleth().borrow().base().last_transition, Some(Duration::ZERO));
    assert_eq!(dash.scatterplot().borrow().base().last_transition, Some(Duration::ZERO));
    assert_eq!(dash.treemap().borrow().base().last_transition, Some(Duration::ZERO));
    assert_eq!(dash.year_slider().borrow().base().last_transition, Some(Duration::ZERO));
    assert_eq!(dash.choropleth().borrow().base().width, 660.0);
    // The selection survives a resize.
    assert_eq!(dash.scatterplot().borrow().factor(), dash_core::Factor::Unemployment);
}

#[test]
fn size_group_follows_breakpoint() {
    let dash = dashboard();
    dash.resize_window(200.0);
    assert_eq!(dash.choropleth().borrow().base().size_group, dash_core::SizeGroup::Small);
    dash.resize_window(800.0);
    assert_eq!(dash.choropleth().borrow().base().size_group, dash_core::SizeGroup::Medium);
}

#[test]
fn hover_highlight_is_mirrored_and_idempotent() {
    let dash = dashboard();
    let map = dash.choropleth();
    let scatter = dash.scatterplot();

    map.borrow_mut().highlight_state("Ohio");
    map.borrow_mut().highlight_state("Ohio");
    assert!(map.borrow().scene().has_class(choropleth::STATES_LAYER, "Ohio", HIGHLIGHTED));
    assert!(scatter.borrow().scene().has_class(scatterplot::DOTS_LAYER, "Ohio", HIGHLIGHTED));
    let tip = scatter.borrow().scene().tooltip().map(|t| t.text.clone()).unwrap_or_default();
    assert!(tip.starts_with("Ohio"), "{tip}");

    map.borrow_mut().unhighlight_state("Ohio");
    map.borrow_mut().unhighlight_state("Ohio");
    assert!(!map.borrow().scene().has_class(choropleth::STATES_LAYER, "Ohio", HIGHLIGHTED));
    assert!(!scatter.borrow().scene().has_class(scatterplot::DOTS_LAYER, "Ohio", HIGHLIGHTED));
    assert!(scatter.borrow().scene().tooltip().is_none());

    // Hover from the scatterplot reaches the map.
    scatter.borrow_mut().highlight_state("Texas");
    assert!(map.borrow().scene().has_class(choropleth::STATES_LAYER, "Texas", HIGHLIGHTED));
}

#[test]
fn slider_broadcasts_only_on_drag_end() {
    let dash = dashboard();
    let slider = dash.year_slider();
    let px = slider.borrow().position_of(2013);

    slider.borrow_mut().begin_drag(Handle::Top);
    slider.borrow_mut().drag_to(px);
    assert!(slider.borrow().is_dragging());
    assert_eq!(slider.borrow().years(), (2013, 2014));
    assert_eq!(dash.choropleth().borrow().death_rate_year(), 2014);

    let years = slider.borrow_mut().end_drag();
    assert_eq!(years, Some([2013, 2014]));
    assert!(!slider.borrow().is_dragging());
    assert_eq!(dash.choropleth().borrow().death_rate_year(), 2013);
    assert_eq!(dash.scatterplot().borrow().years(), (2013, 2014));
    assert_eq!(slider.borrow().display_data().span, (2013, 2014));

    // No drag in progress: nothing to end.
    assert_eq!(slider.borrow_mut().end_drag(), None);
}

#[test]
fn drag_is_clamped_to_the_track() {
    let dash = dashboard();
    let slider = dash.year_slider();
    slider.borrow_mut().begin_drag(Handle::Bottom);
    slider.borrow_mut().drag_to(-500.0);
    assert_eq!(slider.borrow_mut().end_drag(), Some([2014, 2002]));
    assert_eq!(slider.borrow().display_data().span, (2002, 2014));
}

#[test]
fn drug_slider_reindexes_treemap() {
    let dash = dashboard();
    let slider = dash.single_year_slider();
    let treemap = dash.treemap();
    assert_eq!(treemap.borrow().year_index(), 10);

    let px = slider.borrow().position_of(2005);
    assert_eq!(slider.borrow_mut().brushed(Some(px)), 2005);
    assert_eq!(treemap.borrow().year_index(), 2);

    // Programmatic moves stay local.
    slider.borrow_mut().set_year(2010);
    assert_eq!(slider.borrow().year(), 2010);
    assert_eq!(treemap.borrow().year_index(), 2);

    // Years outside the series are ignored.
    dash.bus().broadcast(&Event::UpdateDrugs { year: 1990 }, None);
    assert_eq!(treemap.borrow().year_index(), 2);
}

#[test]
fn treemap_click_toggles_zoom_and_survives_reindex() {
    let dash = dashboard();
    let treemap = dash.treemap();
    let heroin = treemap.borrow().tree().find("Heroin").expect("leaf");
    let opioids = treemap.borrow().tree().find("Opioids").expect("group");
    let (cx, cy) = treemap.borrow().layout().rect(heroin).center();

    assert_eq!(treemap.borrow().cell_at(cx, cy), Some(heroin));
    let zoom = treemap.borrow_mut().activate_at(cx, cy, false).expect("zoomed");
    assert_eq!(zoom.focus, opioids);
    assert_eq!(treemap.borrow().base().last_transition, Some(Duration::from_millis(750)));

    dash.bus().broadcast(&Event::UpdateDrugs { year: 2004 }, None);
    assert_eq!(treemap.borrow().focus_state(), FocusState::Subtree(opioids));

    treemap.borrow_mut().activate(heroin, true);
    assert_eq!(treemap.borrow().focus_state(), FocusState::Root);
    assert_eq!(treemap.borrow().base().last_transition, Some(Duration::from_millis(7500)));
}

#[test]
fn switch_view_swaps_treemap_and_stacked_area() {
    let dash = dashboard();
    let stacked = dash.stacked_area();
    assert!(!stacked.borrow_mut().highlight_substance("Heroin"));
    assert_eq!(stacked.borrow().scene().group().opacity, 0.0);

    dash.switch_view();
    assert!(!dash.treemap().borrow().is_visible());
    assert_eq!(dash.treemap().borrow().scene().group().offset.0, dash_core::views::treemap::HIDDEN_OFFSET);
    assert!(stacked.borrow().is_visible());
    assert_eq!(stacked.borrow().scene().group().opacity, 1.0);
    assert!(stacked.borrow_mut().highlight_substance("Heroin"));

    dash.switch_view();
    assert!(dash.treemap().borrow().is_visible());
    assert!(stacked.borrow().scene().tooltip().is_none());
}

#[test]
fn stacked_area_stacks_in_substance_order() {
    let dash = dashboard();
    let stacked = dash.stacked_area();
    let stacks = stacked.borrow().display_data().clone();
    assert_eq!(stacks.len(), 3);
    let first = &stacks[1].values[0];
    assert_eq!((first.y0, first.y), (3003.0, 500.0));
    assert_eq!(stacks[2].values[0].y0, 3503.0);
}

#[test]
fn legend_lists_categories() {
    let dash = dashboard();
    let legend = dash.legend();
    let names: Vec<String> = legend.borrow().display_data().iter().map(|e| e.label.clone()).collect();
    assert_eq!(names, vec!["Opioids", "Stimulants"]);
}

#[test]
fn degenerate_selection_hides_trend() {
    let dash = dashboard();
    dash.bus().broadcast(&Event::Update(UpdateOptions::immediate().with_years(2014, 2001)), None);
    let scatter = dash.scatterplot();
    assert!(scatter.borrow().display_data().is_empty());
    assert!(!scatter.borrow().trend().is_finite());
    assert!(scatter.borrow().scene().marks(scatterplot::TREND_LAYER).is_empty());
    assert!(!scatter.borrow_mut().highlight_trend());
}

#[test]
fn trend_tooltip_reports_correlation() {
    let dash = dashboard();
    let scatter = dash.scatterplot();
    assert!(scatter.borrow_mut().highlight_trend());
    let tip = scatter.borrow().scene().tooltip().map(|t| t.text.clone()).unwrap_or_default();
    assert!(tip.ends_with("Correlation: 1.00"), "{tip}");
    scatter.borrow_mut().unhighlight_trend();
    assert!(scatter.borrow().scene().tooltip().is_none());
}
