// File: crates/dash-core/src/event.rs
// Summary: Typed dashboard events; each variant carries the payload its name implies.

use std::time::Duration;

use crate::data::Factor;

/// Tag used to key subscriptions on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Update,
    MouseoverState,
    MouseoutState,
    UpdateDrugs,
    SwitchView,
    QuestionClicked,
}

/// A broadcast event. Delivered by shared reference, never mutated after broadcast.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Resize,
    Update(UpdateOptions),
    MouseoverState { id: String },
    MouseoutState { id: String },
    UpdateDrugs { year: i32 },
    SwitchView,
    QuestionClicked,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Resize => EventKind::Resize,
            Event::Update(_) => EventKind::Update,
            Event::MouseoverState { .. } => EventKind::MouseoverState,
            Event::MouseoutState { .. } => EventKind::MouseoutState,
            Event::UpdateDrugs { .. } => EventKind::UpdateDrugs,
            Event::SwitchView => EventKind::SwitchView,
            Event::QuestionClicked => EventKind::QuestionClicked,
        }
    }

    /// Wire name of the event, as used by the page scripts.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Resize => "resize",
            EventKind::Update => "update",
            EventKind::MouseoverState => "mouseoverState",
            EventKind::MouseoutState => "mouseoutState",
            EventKind::UpdateDrugs => "updateDrugs",
            EventKind::SwitchView => "switchView",
            EventKind::QuestionClicked => "question-clicked",
        }
    }
}

/// Selection and timing options carried by `update` events.
///
/// `years[0]` selects the death-rate year, `years[1]` the factor year.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateOptions {
    pub years: Option<[i32; 2]>,
    pub factor: Option<Factor>,
    pub duration: Option<Duration>,
}

impl UpdateOptions {
    /// Neutral option set used by `resize`: no selection change, no animation.
    pub fn immediate() -> Self {
        Self { duration: Some(Duration::ZERO), ..Self::default() }
    }

    pub fn with_years(mut self, death_rate_year: i32, factor_year: i32) -> Self {
        self.years = Some([death_rate_year, factor_year]);
        self
    }

    pub fn with_factor(mut self, factor: Factor) -> Self {
        self.factor = Some(factor);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Requested duration, or `default` when none was given. An explicit zero is kept.
    #[inline]
    pub fn duration_or(&self, default: Duration) -> Duration {
        self.duration.unwrap_or(default)
    }
}
