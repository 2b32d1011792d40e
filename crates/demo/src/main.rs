// File: crates/demo/src/main.rs
// Summary: Loads the sample datasets, drives a short scripted dashboard session, and
// writes one PNG per view after each step.
// Notes:
// - Usage: dash-demo [DATA_DIR] [CONFIG_JSON|-] [THEME]
// - Output lands in target/out/step1 and target/out/step2.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dash_core::views::Handle;
use dash_core::{Dashboard, DashboardConfig, Factor};
use dash_render_skia::{theme, SkiaRenderer};
use env_logger::Env;
use log::{error, info, warn};

const FRAME: Duration = Duration::from_millis(16);
// A minute of 16 ms frames; longer than the slowest zoom.
const MAX_FRAMES: usize = 3750;
const WINDOW_WIDTH: f64 = 1200.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")));
    let config = match args.next().as_deref() {
        None | Some("-") => DashboardConfig::default(),
        Some(path) => DashboardConfig::from_path(path).with_context(|| format!("config '{path}'"))?,
    };
    let theme = theme::find(args.next().as_deref().unwrap_or("light"));

    let datasets = match dash_core::data::load_dir(&data_dir) {
        Ok(d) => d,
        Err(err) => {
            error!("failed to load data from {}: {err}", data_dir.display());
            std::process::exit(1);
        }
    };
    info!("loaded data from {} (theme: {})", data_dir.display(), theme.name);

    let dash = Dashboard::build(datasets, config);
    let renderer = SkiaRenderer::new(theme);

    dash.resize_window(WINDOW_WIDTH);
    explore_years(&dash, 2008, 2012);

    dash.choropleth().borrow_mut().highlight_state("West Virginia");
    zoom_into(&dash, "Heroin");
    {
        let slider = dash.single_year_slider();
        let mut slider = slider.borrow_mut();
        let px = slider.position_of(2008);
        let year = slider.brushed(Some(px));
        info!("drug year brushed to {year}");
    }
    dash.update_factor(Factor::Unemployment);
    if !dash.scatterplot().borrow_mut().highlight_trend() {
        warn!("no trend line to highlight");
    }
    settle(&dash);
    render_step(&renderer, &dash, "step1")?;

    dash.switch_view();
    if !dash.stacked_area().borrow_mut().highlight_substance("Heroin") {
        warn!("stacked area has no 'Heroin' series");
    }
    settle(&dash);
    render_step(&renderer, &dash, "step2")?;
    Ok(())
}

/// Drag both year handles the way a pointer would, a few pixels at a time.
fn explore_years(dash: &Dashboard, death_year: i32, factor_year: i32) {
    let slider = dash.year_slider();
    for (handle, year) in [(Handle::Top, death_year), (Handle::Bottom, factor_year)] {
        let (from, to) = {
            let s = slider.borrow();
            let current = match handle {
                Handle::Top => s.years().0,
                Handle::Bottom => s.years().1,
            };
            (s.position_of(current), s.position_of(year))
        };
        let mut s = slider.borrow_mut();
        s.begin_drag(handle);
        for step in 1..=8 {
            s.drag_to(from + (to - from) * step as f64 / 8.0);
        }
        match s.end_drag() {
            Some([top, bottom]) => info!("year slider released at {top}/{bottom}"),
            None => warn!("year slider drag was not active"),
        }
    }
}

/// Click the centre of `name`'s treemap cell, then show its tooltip.
fn zoom_into(dash: &Dashboard, name: &str) {
    let treemap = dash.treemap();
    let mut map = treemap.borrow_mut();
    let Some(id) = map.tree().find(name) else {
        warn!("treemap has no '{name}' cell");
        return;
    };
    let (x, y) = map.layout().rect(id).center();
    match map.activate_at(x, y, false) {
        Some(zoom) => info!("treemap focus {:?} over {:?}", map.focus_state(), zoom.duration),
        None => warn!("click at ({x:.0}, {y:.0}) hit no cell"),
    }
    map.highlight_substance(id);
}

fn settle(dash: &Dashboard) {
    let mut frames = 0;
    while dash.is_animating() && frames < MAX_FRAMES {
        dash.advance(FRAME);
        frames += 1;
    }
    info!("animations settled after {frames} frames");
}

fn render_step(renderer: &SkiaRenderer, dash: &Dashboard, step: &str) -> Result<()> {
    let dir = Path::new("target/out").join(step);
    let written = renderer
        .render_all(&dash.frames(), &dir)
        .with_context(|| format!("render {step}"))?;
    info!("{step}: {} views written to {}", written.len(), dir.display());
    Ok(())
}
