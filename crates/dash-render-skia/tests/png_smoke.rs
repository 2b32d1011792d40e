// File: crates/dash-render-skia/tests/png_smoke.rs
// Purpose: Render scene frames to PNG and check decoded pixels.

use std::time::Duration;

use dash_core::color::Color;
use dash_core::scene::Group;
use dash_core::{Dashboard, DashboardConfig, Mark, Scene, Shape, Style};
use dash_render_skia::{theme, RenderOptions, SkiaRenderer, Theme};

fn no_labels() -> RenderOptions {
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

fn sample_scene() -> Scene {
    let mut scene = Scene::new("smoke");
    scene.set_size(100.0, 60.0);
    scene.set_group(Group { offset: (10.0, 5.0), opacity: 1.0 }, Duration::ZERO);
    scene.join(
        "marks",
        vec![
            Mark::new("box", Shape::Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0 }, Style::fill(Color::rgb(255, 0, 0))),
            Mark::new("dot", Shape::Circle { cx: 60.0, cy: 30.0, r: 5.0 }, Style::fill(Color::rgb(0, 0, 255))),
            Mark::new("label", Shape::text(40.0, 10.0, "Ohio", 12.0), Style::fill(Color::BLACK)),
        ],
        Duration::ZERO,
    );
    scene
}

#[test]
fn render_smoke_png() {
    let renderer = SkiaRenderer::new(Theme::light()).with_options(no_labels());
    let bytes = renderer.render_to_png_bytes(&sample_scene().frame()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (100, 60));
    // Background outside the group.
    assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 255]);
    // Rect interior, shifted by the group offset.
    assert_eq!(img.get_pixel(20, 15).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(70, 35).0, [0, 0, 255, 255]);
}

#[test]
fn hidden_group_paints_only_background() {
    let mut scene = sample_scene();
    scene.set_group(Group { offset: (10.0, 5.0), opacity: 0.0 }, Duration::ZERO);
    let renderer = SkiaRenderer::new(theme::find("dark")).with_options(no_labels());
    let img = image::load_from_memory(&renderer.render_to_png_bytes(&scene.frame()).expect("render"))
        .expect("decode")
        .to_rgba8();
    assert_eq!(img.get_pixel(20, 15).0, [18, 18, 20, 255]);
}

#[test]
fn highlighted_circle_is_enlarged() {
    let mut scene = sample_scene();
    scene.classed("marks", "dot", "highlighted", true);
    let renderer = SkiaRenderer::default().with_options(no_labels());
    let img = image::load_from_memory(&renderer.render_to_png_bytes(&scene.frame()).expect("render"))
        .expect("decode")
        .to_rgba8();
    // 8px from the centre: outside r = 5, inside the doubled radius.
    assert_eq!(img.get_pixel(78, 35).0, [0, 0, 255, 255]);
}

#[test]
fn unknown_theme_falls_back_to_light() {
    assert_eq!(theme::find("nope").name, "light");
    assert_eq!(theme::find("DARK").name, "dark");
}

#[test]
fn renders_every_dashboard_view() {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demo/data");
    let data = dash_core::data::load_dir(&data_dir).expect("demo data loads");
    let dash = Dashboard::build(data, DashboardConfig::default());
    dash.advance(Duration::from_secs(10));

    let out = std::path::PathBuf::from("target/test_out/dashboard");
    let written = SkiaRenderer::default().render_all(&dash.frames(), &out).expect("render all");
    assert_eq!(written.len(), dash_core::dashboard::CONTAINER_IDS.len());
    for path in written {
        let meta = std::fs::metadata(&path).expect("output exists");
        assert!(meta.len() > 0, "{} is empty", path.display());
    }
}
