// File: crates/dash-core/src/view.rs
// Summary: View lifecycle contract (initialize -> resize -> wrangle -> update) and the
// shared state every chart carries.
// Notes:
// - Views live in `Rc<RefCell<_>>`; bus callbacks hold a `Weak`, so the bus never keeps a
//   view alive.
// - `resize` must end with `update(&UpdateOptions::immediate())`: resizing never animates.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::bus::{EventBus, ListenerId};
use crate::event::{Event, EventKind, UpdateOptions};
use crate::scene::{Group, Scene};
use crate::types::{Containers, Insets, SizeGroup};

/// Bus handler bound to a concrete view type.
pub type Handler<V> = fn(&mut V, &Event);

pub trait View: Sized + 'static {
    /// Render-ready projection produced by `wrangle`.
    type Display: Clone + PartialEq + std::fmt::Debug;

    fn base(&self) -> &ViewBase;
    fn base_mut(&mut self) -> &mut ViewBase;

    /// Events this view reacts to, in registration order.
    fn handlers() -> Vec<(EventKind, Handler<Self>)>;

    /// Build static scene structure, then size the view.
    fn initialize(&mut self) {
        self.resize();
    }

    fn resize(&mut self);

    /// Project backing data and the current selection into display data.
    /// Must not touch backing data; calling it twice yields the same result.
    fn wrangle(&mut self, options: &UpdateOptions);

    fn update(&mut self, options: &UpdateOptions);

    fn display_data(&self) -> &Self::Display;

    fn listener(&self) -> ListenerId {
        self.base().listener
    }

    fn bus(&self) -> Option<Rc<EventBus>> {
        self.base().bus.clone()
    }

    fn scene(&self) -> &Scene {
        &self.base().scene
    }
}

/// Store `bus` on the view and subscribe its handlers.
pub fn attach<V: View>(view: &Rc<RefCell<V>>, bus: &Rc<EventBus>) {
    let listener = {
        let mut v = view.borrow_mut();
        v.base_mut().bus = Some(Rc::clone(bus));
        v.listener()
    };
    for (kind, handler) in V::handlers() {
        let weak = Rc::downgrade(view);
        bus.on(kind, listener, move |event| {
            let Some(view) = weak.upgrade() else {
                return;
            };
            match view.try_borrow_mut() {
                Ok(mut v) => handler(&mut *v, event),
                Err(_) => log::warn!(
                    "skipping re-entrant '{}' delivery to {}",
                    event.name(),
                    std::any::type_name::<V>()
                ),
            };
        });
    }
    log::debug!("attached {} ({} handler(s))", std::any::type_name::<V>(), V::handlers().len());
}

pub fn handle_resize<V: View>(view: &mut V, _event: &Event) {
    view.resize();
}

pub fn handle_update<V: View>(view: &mut V, event: &Event) {
    if let Event::Update(options) = event {
        view.update(options);
    }
}

/// State shared by every view: identity, bus handle, sizing and the owned scene.
#[derive(Debug)]
pub struct ViewBase {
    pub listener: ListenerId,
    bus: Option<Rc<EventBus>>,
    containers: Rc<Containers>,
    pub scene: Scene,
    pub margin: Insets,
    /// Inner drawing width (container minus margins).
    pub width: f64,
    /// Inner drawing height.
    pub height: f64,
    pub size_group: SizeGroup,
    pub breakpoint: f64,
    /// Duration used by the most recent `update`.
    pub last_transition: Option<Duration>,
}

impl ViewBase {
    pub fn new(container: &str, containers: Rc<Containers>, margin: Insets, breakpoint: f64) -> Self {
        Self {
            listener: ListenerId::next(),
            bus: None,
            containers,
            scene: Scene::new(container),
            margin,
            width: 0.0,
            height: 0.0,
            size_group: SizeGroup::default(),
            breakpoint,
            last_transition: None,
        }
    }

    pub fn container(&self) -> &str {
        self.scene.container()
    }

    pub fn container_width(&self) -> f64 {
        self.containers.width(self.scene.container())
    }

    /// Recompute inner width from the container, inner height from `height_of(width)`,
    /// the size group, and the scene's outer size. The drawing group is moved to the margin.
    pub fn measure(&mut self, height_of: impl FnOnce(f64) -> f64) {
        self.width = (self.container_width() - self.margin.hsum()).max(0.0);
        self.height = height_of(self.width).max(0.0);
        self.size_group = SizeGroup::from_width(self.width, self.breakpoint);
        self.scene.set_size(self.width + self.margin.hsum(), self.height + self.margin.vsum());
        let opacity = self.scene.group().opacity;
        self.scene.set_group(Group { offset: (self.margin.left, self.margin.top), opacity }, Duration::ZERO);
    }

    pub fn has_bus(&self) -> bool {
        self.bus.is_some()
    }

    /// Broadcast `event` with this view as sender.
    pub fn broadcast(&self, event: Event) {
        match &self.bus {
            Some(bus) => {
                bus.broadcast(&event, Some(self.listener));
            }
            None => log::debug!("'{}' not broadcast: {} has no bus", event.name(), self.container()),
        }
    }
}
