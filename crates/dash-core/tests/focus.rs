// File: crates/dash-core/tests/focus.rs
// Purpose: Treemap zoom toggle, year reindexing and the focus viewport.

mod common;

use std::time::Duration;

use dash_core::{squarify, FocusMachine, FocusState, Rect, Viewport, ZoomDurations};

#[test]
fn zoom_toggles_between_parent_and_root() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 10, ZoomDurations::default());
    let heroin = tree.find("Heroin").expect("leaf");
    let opioids = tree.find("Opioids").expect("group");

    let zoom = m.zoom_in(&tree, heroin, false).expect("has parent");
    assert_eq!(zoom.focus, opioids);
    assert_eq!(zoom.duration, Duration::from_millis(750));
    assert_eq!(m.state(), FocusState::Subtree(opioids));

    // Same target again: back to the root, slow-motion duration.
    let zoom = m.zoom_in(&tree, heroin, true).expect("has parent");
    assert_eq!(zoom.focus, tree.root());
    assert_eq!(zoom.duration, Duration::from_millis(7500));
    assert_eq!(m.state(), FocusState::Root);
}

#[test]
fn zoom_from_other_subtree_moves_to_its_parent() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 0, ZoomDurations::default());
    m.zoom_in(&tree, tree.find("Heroin").expect("leaf"), false);
    let zoom = m.zoom_in(&tree, tree.find("Cocaine").expect("leaf"), false).expect("has parent");
    assert_eq!(zoom.focus, tree.find("Stimulants").expect("group"));
}

#[test]
fn zoom_on_root_is_a_no_op() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 0, ZoomDurations::default());
    assert!(m.zoom_in(&tree, tree.root(), false).is_none());
    assert_eq!(m.focus(), tree.root());
}

#[test]
fn reindex_reports_change_and_keeps_focus() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 10, ZoomDurations::default());
    m.zoom_in(&tree, tree.find("Cocaine").expect("leaf"), false);
    let focus = m.focus();
    assert!(m.reindex(3));
    assert!(!m.reindex(3));
    assert_eq!(m.year_index(), 3);
    assert_eq!(m.focus(), focus);
}

#[test]
fn visibility_toggles() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 0, ZoomDurations::default());
    assert!(m.is_visible());
    assert!(!m.toggle_visibility());
    assert!(m.toggle_visibility());
}

#[test]
fn viewport_stretches_focus_over_view() {
    let tree = common::sample_tree();
    let mut m = FocusMachine::new(&tree, 0, ZoomDurations::default());
    let layout = squarify(&tree, 400.0, 200.0, |id| tree.leaf_size(id, 0));

    let root_vp = m.viewport(&layout, 400.0, 200.0);
    let opioids = tree.find("Opioids").expect("group");
    assert_eq!(root_vp.project(layout.rect(opioids)), layout.rect(opioids));

    m.zoom_in(&tree, tree.find("Heroin").expect("leaf"), false);
    let vp = m.viewport(&layout, 400.0, 200.0);
    let r = vp.project(layout.rect(opioids));
    assert!(r.x.abs() < 1e-9 && r.y.abs() < 1e-9);
    assert!((r.dx - 400.0).abs() < 1e-9 && (r.dy - 200.0).abs() < 1e-9);
}

#[test]
fn unproject_inverts_project() {
    let vp = Viewport::new(Rect::new(10.0, 20.0, 50.0, 25.0), 200.0, 100.0);
    let r = vp.project(Rect::new(35.0, 30.0, 5.0, 5.0));
    let (x, y) = vp.unproject(r.x, r.y);
    assert!((x - 35.0).abs() < 1e-9 && (y - 30.0).abs() < 1e-9);
}
