// File: crates/dash-core/tests/scene.rs
// Purpose: Keyed joins, last-writer-wins transitions, classes and group fades.

use std::time::Duration;

use dash_core::color::Color;
use dash_core::scene::Group;
use dash_core::{Mark, Scene, Shape, Style};

fn dot(key: &str, cx: f64) -> Mark {
    Mark::new(key, Shape::Circle { cx, cy: 0.0, r: 5.0 }, Style::fill(Color::BLACK))
}

fn cx_of(scene: &Scene, key: &str) -> f64 {
    let frame = scene.frame();
    let item = frame.layers[0].items.iter().find(|i| i.mark.key == key).expect("item present");
    match item.mark.shape {
        Shape::Circle { cx, .. } => cx,
        _ => panic!("not a circle"),
    }
}

#[test]
fn join_reports_enter_update_exit() {
    let mut scene = Scene::new("test");
    let stats = scene.join("dots", vec![dot("a", 0.0), dot("b", 0.0)], Duration::ZERO);
    assert_eq!((stats.entered, stats.updated, stats.exited), (2, 0, 0));

    let stats = scene.join("dots", vec![dot("b", 1.0), dot("c", 1.0)], Duration::ZERO);
    assert_eq!((stats.entered, stats.updated, stats.exited), (1, 1, 1));
    let keys: Vec<&str> = scene.marks("dots").iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "c"]);
}

#[test]
fn transition_interpolates_and_settles() {
    let mut scene = Scene::new("test");
    scene.join("dots", vec![dot("a", 0.0)], Duration::ZERO);
    scene.join("dots", vec![dot("a", 100.0)], Duration::from_millis(1000));
    assert!(scene.is_animating());
    assert_eq!(cx_of(&scene, "a"), 0.0);

    scene.advance(Duration::from_millis(500));
    // Cubic in-out is exactly half way at t = 0.5.
    assert!((cx_of(&scene, "a") - 50.0).abs() < 1e-9);

    scene.advance(Duration::from_millis(600));
    assert!(!scene.is_animating());
    assert_eq!(cx_of(&scene, "a"), 100.0);
}

#[test]
fn later_join_replaces_running_transition() {
    let mut scene = Scene::new("test");
    scene.join("dots", vec![dot("a", 0.0)], Duration::ZERO);
    scene.join("dots", vec![dot("a", 100.0)], Duration::from_millis(1000));
    scene.advance(Duration::from_millis(500));
    scene.join("dots", vec![dot("a", 10.0)], Duration::ZERO);
    assert!(!scene.is_animating());
    assert_eq!(cx_of(&scene, "a"), 10.0);
    assert_eq!(scene.last_duration("dots"), Some(Duration::ZERO));
}

#[test]
fn classes_survive_updates_and_removal_is_idempotent() {
    let mut scene = Scene::new("test");
    scene.join("dots", vec![dot("a", 0.0)], Duration::ZERO);
    assert!(scene.classed("dots", "a", "highlighted", true));
    assert!(!scene.classed("dots", "missing", "highlighted", true));

    scene.join("dots", vec![dot("a", 5.0)], Duration::ZERO);
    assert!(scene.has_class("dots", "a", "highlighted"));
    assert!(scene.frame().layers[0].items[0].has_class("highlighted"));

    scene.classed("dots", "a", "highlighted", false);
    scene.classed("dots", "a", "highlighted", false);
    assert!(!scene.has_class("dots", "a", "highlighted"));
}

#[test]
fn group_fade_and_tooltip() {
    let mut scene = Scene::new("test");
    scene.set_group(Group { offset: (10.0, 10.0), opacity: 0.0 }, Duration::ZERO);
    scene.set_group(Group { offset: (10.0, 10.0), opacity: 1.0 }, Duration::from_millis(1000));
    assert_eq!(scene.frame().group.opacity, 0.0);
    assert_eq!(scene.group().opacity, 1.0);
    scene.advance(Duration::from_secs(1));
    assert_eq!(scene.frame().group.opacity, 1.0);

    scene.show_tooltip("Ohio", 3.0, 4.0);
    assert_eq!(scene.tooltip().map(|t| t.text.as_str()), Some("Ohio"));
    scene.hide_tooltip();
    assert!(scene.frame().tooltip.is_none());
}

#[test]
fn layers_paint_in_creation_order() {
    let mut scene = Scene::new("test");
    scene.add_layer("back");
    scene.add_layer("front");
    scene.add_layer("back");
    assert_eq!(scene.layer_names().collect::<Vec<_>>(), vec!["back", "front"]);
}
