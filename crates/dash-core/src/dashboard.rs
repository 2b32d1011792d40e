// File: crates/dash-core/src/dashboard.rs
// Summary: Application context. Builds the bus and every view once, then only forwards
// window-level input; all later coordination is view-to-view over the bus.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::bus::EventBus;
use crate::config::DashboardConfig;
use crate::data::{Datasets, Factor};
use crate::event::{Event, UpdateOptions};
use crate::scene::{Frame, Scene};
use crate::types::Containers;
use crate::view::{attach, View};
use crate::views::{
    choropleth, legend, scatterplot, single_year_slider, stacked_area, treemap, year_slider, Choropleth,
    DrugTypeLegend, Scatterplot, SingleYearSlider, StackedAreaChart, Treemap, YearSlider,
};

/// Ids of every container the dashboard draws into, in paint order.
pub const CONTAINER_IDS: [&str; 7] = [
    choropleth::CONTAINER,
    scatterplot::CONTAINER,
    year_slider::CONTAINER,
    treemap::CONTAINER,
    stacked_area::CONTAINER,
    single_year_slider::CONTAINER,
    legend::CONTAINER,
];

/// Exists only once every dataset loaded; there is no partially built dashboard.
pub struct Dashboard {
    bus: Rc<EventBus>,
    config: DashboardConfig,
    containers: Rc<Containers>,
    datasets: Datasets,
    choropleth: Rc<RefCell<Choropleth>>,
    scatterplot: Rc<RefCell<Scatterplot>>,
    year_slider: Rc<RefCell<YearSlider>>,
    treemap: Rc<RefCell<Treemap>>,
    stacked_area: Rc<RefCell<StackedAreaChart>>,
    single_year_slider: Rc<RefCell<SingleYearSlider>>,
    legend: Rc<RefCell<DrugTypeLegend>>,
}

fn install<V: View>(view: V, bus: &Rc<EventBus>) -> Rc<RefCell<V>> {
    let view = Rc::new(RefCell::new(view));
    attach(&view, bus);
    view.borrow_mut().initialize();
    view
}

impl Dashboard {
    pub fn build(datasets: Datasets, config: DashboardConfig) -> Self {
        let bus = Rc::new(EventBus::new());
        let containers = Rc::new(Containers::new(config.container_width));
        for id in CONTAINER_IDS {
            containers.set_width(id, config.container_width);
        }

        let choropleth = install(
            Choropleth::new(Rc::clone(&containers), Rc::clone(&datasets.shapes), Rc::clone(&datasets.deaths), &config),
            &bus,
        );
        let scatterplot = install(Scatterplot::new(Rc::clone(&containers), datasets.clone(), &config), &bus);
        let year_slider = install(YearSlider::new(Rc::clone(&containers), &config), &bus);
        let treemap = install(Treemap::new(Rc::clone(&containers), Rc::clone(&datasets.tree), &config), &bus);
        let stacked_area = install(
            StackedAreaChart::new(Rc::clone(&containers), Rc::clone(&datasets.drugs), &datasets.tree, &config),
            &bus,
        );
        let single_year_slider = install(SingleYearSlider::new(Rc::clone(&containers), &config), &bus);
        let legend = install(DrugTypeLegend::new(Rc::clone(&containers), &datasets.tree, &config), &bus);

        log::info!("dashboard built: {} views, {:?}", CONTAINER_IDS.len(), bus);
        Self {
            bus,
            config,
            containers,
            datasets,
            choropleth,
            scatterplot,
            year_slider,
            treemap,
            stacked_area,
            single_year_slider,
            legend,
        }
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Window resize: every container takes the new width, then views re-measure.
    pub fn resize_window(&self, width: f64) {
        self.containers.set_all(width);
        self.bus.broadcast(&Event::Resize, None);
    }

    /// Change one container's width without notifying anybody.
    pub fn set_container_width(&self, id: &str, width: f64) {
        self.containers.set_width(id, width);
    }

    /// Factor picker: switch the scatterplot's x dimension.
    pub fn update_factor(&self, factor: Factor) {
        let options = UpdateOptions::default().with_factor(factor).with_duration(self.config.transition());
        self.bus.broadcast(&Event::Update(options), None);
    }

    /// Toggle between the treemap and the stacked area chart.
    pub fn switch_view(&self) {
        self.bus.broadcast(&Event::SwitchView, None);
    }

    /// Move every view's transitions forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.for_each_scene_mut(|scene| scene.advance(dt));
    }

    pub fn is_animating(&self) -> bool {
        self.scenes().iter().any(|s| s.is_animating())
    }

    /// Snapshot of every view's scene, in paint order.
    pub fn scenes(&self) -> Vec<Scene> {
        vec![
            self.choropleth.borrow().scene().clone(),
            self.scatterplot.borrow().scene().clone(),
            self.year_slider.borrow().scene().clone(),
            self.treemap.borrow().scene().clone(),
            self.stacked_area.borrow().scene().clone(),
            self.single_year_slider.borrow().scene().clone(),
            self.legend.borrow().scene().clone(),
        ]
    }

    /// Current frames keyed by container id.
    pub fn frames(&self) -> Vec<(String, Frame)> {
        self.scenes().into_iter().map(|s| (s.container().to_string(), s.frame())).collect()
    }

    fn for_each_scene_mut(&self, mut f: impl FnMut(&mut Scene)) {
        f(&mut self.choropleth.borrow_mut().base_mut().scene);
        f(&mut self.scatterplot.borrow_mut().base_mut().scene);
        f(&mut self.year_slider.borrow_mut().base_mut().scene);
        f(&mut self.treemap.borrow_mut().base_mut().scene);
        f(&mut self.stacked_area.borrow_mut().base_mut().scene);
        f(&mut self.single_year_slider.borrow_mut().base_mut().scene);
        f(&mut self.legend.borrow_mut().base_mut().scene);
    }

    pub fn choropleth(&self) -> Rc<RefCell<Choropleth>> {
        Rc::clone(&self.choropleth)
    }

    pub fn scatterplot(&self) -> Rc<RefCell<Scatterplot>> {
        Rc::clone(&self.scatterplot)
    }

    pub fn year_slider(&self) -> Rc<RefCell<YearSlider>> {
        Rc::clone(&self.year_slider)
    }

    pub fn treemap(&self) -> Rc<RefCell<Treemap>> {
        Rc::clone(&self.treemap)
    }

    pub fn stacked_area(&self) -> Rc<RefCell<StackedAreaChart>> {
        Rc::clone(&self.stacked_area)
    }

    pub fn single_year_slider(&self) -> Rc<RefCell<SingleYearSlider>> {
        Rc::clone(&self.single_year_slider)
    }

    pub fn legend(&self) -> Rc<RefCell<DrugTypeLegend>> {
        Rc::clone(&self.legend)
    }
}
