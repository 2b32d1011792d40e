// File: crates/dash-core/src/bus.rs
// Summary: Single-threaded publish/subscribe bus with sender self-exclusion.
// Notes:
// - Registration is not deduplicated: registering the same callback twice yields
//   two deliveries per broadcast.
// - Delivery order is registration order. A callback may broadcast again; that
//   nested broadcast is fully delivered before the outer one continues.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{Event, EventKind};

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a subscriber, used for self-exclusion on broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh, process-unique identity.
    pub fn next() -> Self {
        Self(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback = Rc<dyn Fn(&Event)>;

struct Subscription {
    listener: ListenerId,
    callback: Callback,
}

#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventKind, Vec<Subscription>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every broadcast of `kind`, on behalf of `listener`.
    pub fn on<F>(&self, kind: EventKind, listener: ListenerId, callback: F) -> &Self
    where
        F: Fn(&Event) + 'static,
    {
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Subscription { listener, callback: Rc::new(callback) });
        self
    }

    /// Deliver `event` to every subscription of its kind except those owned by `sender`.
    pub fn broadcast(&self, event: &Event, sender: Option<ListenerId>) -> &Self {
        // Snapshot first so callbacks can broadcast or subscribe while we deliver.
        let targets: Vec<Callback> = match self.listeners.borrow().get(&event.kind()) {
            Some(subs) => subs
                .iter()
                .filter(|s| Some(s.listener) != sender)
                .map(|s| Rc::clone(&s.callback))
                .collect(),
            None => Vec::new(),
        };
        log::trace!("broadcast '{}' to {} subscriber(s)", event.name(), targets.len());
        for callback in targets {
            callback(event);
        }
        self
    }

    /// Number of registrations (duplicates included) for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.borrow();
        let mut counts: Vec<(&'static str, usize)> =
            listeners.iter().map(|(k, v)| (k.name(), v.len())).collect();
        counts.sort_unstable();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
