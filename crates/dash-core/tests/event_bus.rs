// File: crates/dash-core/tests/event_bus.rs
// Purpose: Broadcast delivery order, sender self-exclusion, duplicates and nesting.

use std::cell::RefCell;
use std::rc::Rc;

use dash_core::{Event, EventBus, EventKind, ListenerId};

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&Event)>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let make = move |tag: &str| -> Box<dyn Fn(&Event)> {
        let sink = Rc::clone(&sink);
        let tag = tag.to_string();
        Box::new(move |e: &Event| sink.borrow_mut().push(format!("{tag}:{}", e.name())))
    };
    (log, make)
}

#[test]
fn sender_is_excluded_and_others_run_in_registration_order() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let (a, b, c) = (ListenerId::next(), ListenerId::next(), ListenerId::next());
    bus.on(EventKind::Resize, a, make("a"));
    bus.on(EventKind::Resize, b, make("b"));
    bus.on(EventKind::Resize, c, make("c"));

    bus.broadcast(&Event::Resize, Some(b));
    assert_eq!(*log.borrow(), vec!["a:resize", "c:resize"]);

    log.borrow_mut().clear();
    bus.broadcast(&Event::Resize, None);
    assert_eq!(*log.borrow(), vec!["a:resize", "b:resize", "c:resize"]);
}

#[test]
fn only_matching_kind_is_delivered() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    bus.on(EventKind::SwitchView, ListenerId::next(), make("s"));
    bus.broadcast(&Event::UpdateDrugs { year: 2010 }, None);
    assert!(log.borrow().is_empty());
    assert_eq!(bus.subscriber_count(EventKind::UpdateDrugs), 0);
}

#[test]
fn duplicate_registration_delivers_twice() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let id = ListenerId::next();
    bus.on(EventKind::SwitchView, id, make("x"));
    bus.on(EventKind::SwitchView, id, make("x"));
    assert_eq!(bus.subscriber_count(EventKind::SwitchView), 2);

    bus.broadcast(&Event::SwitchView, None);
    assert_eq!(log.borrow().len(), 2);

    // Self-exclusion removes every registration of the sender.
    log.borrow_mut().clear();
    bus.broadcast(&Event::SwitchView, Some(id));
    assert!(log.borrow().is_empty());
}

#[test]
fn nested_broadcast_completes_before_outer_continues() {
    let bus = Rc::new(EventBus::new());
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    let first = ListenerId::next();
    let nested_bus = Rc::downgrade(&bus);
    let sink = Rc::clone(&log);
    bus.on(EventKind::Resize, first, move |_| {
        sink.borrow_mut().push("first".into());
        if let Some(bus) = nested_bus.upgrade() {
            bus.broadcast(&Event::SwitchView, Some(first));
        }
    });
    let sink = Rc::clone(&log);
    bus.on(EventKind::SwitchView, ListenerId::next(), move |_| sink.borrow_mut().push("switch".into()));
    let sink = Rc::clone(&log);
    bus.on(EventKind::Resize, ListenerId::next(), move |_| sink.borrow_mut().push("second".into()));

    bus.broadcast(&Event::Resize, None);
    assert_eq!(*log.borrow(), vec!["first", "switch", "second"]);
}

#[test]
fn subscribing_during_delivery_takes_effect_next_broadcast() {
    let bus = Rc::new(EventBus::new());
    let count = Rc::new(RefCell::new(0));
    let weak = Rc::downgrade(&bus);
    let counter = Rc::clone(&count);
    bus.on(EventKind::QuestionClicked, ListenerId::next(), move |_| {
        let counter = Rc::clone(&counter);
        if let Some(bus) = weak.upgrade() {
            bus.on(EventKind::QuestionClicked, ListenerId::next(), move |_| *counter.borrow_mut() += 1);
        }
    });

    bus.broadcast(&Event::QuestionClicked, None);
    assert_eq!(*count.borrow(), 0);
    bus.broadcast(&Event::QuestionClicked, None);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn event_names_match_wire_names() {
    assert_eq!(Event::MouseoverState { id: "Ohio".into() }.name(), "mouseoverState");
    assert_eq!(Event::UpdateDrugs { year: 2003 }.name(), "updateDrugs");
    assert_eq!(Event::QuestionClicked.name(), "question-clicked");
}
