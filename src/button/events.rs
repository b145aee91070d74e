//! Observation of button state changes across a scope.
//!
//! Every mounted button publishes its transitions to the [`ButtonEvents`] bus of
//! its scope. Several buttons share one bus, so the bus reconciles what it
//! receives: an event is delivered only when it is newer than the last event
//! delivered. Stale or duplicated events are dropped.

use super::error::ActionError;
use super::id::ButtonId;
use super::state::{ActionState, Completion, TaskHandle};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

// Breaks ties between events stamped within the same clock tick.
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A button changed state.
#[derive(Debug, Clone)]
pub struct StateChangedEvent {
    pub button_id: ButtonId,
    pub state: ActionState,
    pub time: DateTime<Utc>,
    sequence: u64,
}

impl StateChangedEvent {
    pub fn new(button_id: ButtonId, state: ActionState) -> Self {
        Self {
            button_id,
            state,
            time: Utc::now(),
            sequence: NEXT_SEQUENCE.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    pub fn is_newer_than(&self, other: &StateChangedEvent) -> bool {
        match self.time.cmp(&other.time) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.sequence > other.sequence,
        }
    }
}

/// A button action failed.
#[derive(Debug, Clone)]
pub struct ErrorOccurredEvent {
    pub button_id: ButtonId,
    pub error: ActionError,
    pub time: DateTime<Utc>,
}

type StateHandler = Arc<dyn Fn(&StateChangedEvent) + Send + Sync>;
type ErrorHandler = Arc<dyn Fn(&ErrorOccurredEvent) + Send + Sync>;

/// Scope-wide bus of button events.
#[derive(Default)]
pub struct ButtonEvents {
    latest: Mutex<Option<StateChangedEvent>>,
    state_handlers: Mutex<Vec<StateHandler>>,
    error_handlers: Mutex<Vec<ErrorHandler>>,
}

impl ButtonEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every delivered state change of any button of the scope.
    pub fn on_state_change(&self, handler: impl Fn(&StateChangedEvent) + Send + Sync + 'static) {
        self.state_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(handler));
    }

    /// Called only when a delivered state change is an errored completion.
    pub fn on_error(&self, handler: impl Fn(&ErrorOccurredEvent) + Send + Sync + 'static) {
        self.error_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(handler));
    }

    /// Called when any button of the scope starts a run.
    pub fn on_task_started(&self, handler: impl Fn(&ButtonId, &TaskHandle) + Send + Sync + 'static) {
        self.on_state_change(move |event| {
            if let ActionState::Started(task) = &event.state {
                handler(&event.button_id, task);
            }
        });
    }

    /// Called when any button of the scope finishes a run, whatever the outcome.
    pub fn on_task_ended(&self, handler: impl Fn(&ButtonId, &Completion) + Send + Sync + 'static) {
        self.on_state_change(move |event| {
            if let ActionState::Ended(completion) = &event.state {
                handler(&event.button_id, completion);
            }
        });
    }

    /// The last event delivered to handlers.
    pub fn latest(&self) -> Option<StateChangedEvent> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn publish(&self, button_id: ButtonId, state: ActionState) {
        self.deliver(StateChangedEvent::new(button_id, state));
    }

    /// Hand an event to the handlers if it is newer than the last one delivered.
    ///
    /// Returns `false` when the event was stale and dropped.
    pub fn deliver(&self, event: StateChangedEvent) -> bool {
        {
            let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(current) = latest.as_ref() {
                if !event.is_newer_than(current) {
                    log::debug!(
                        "Dropping stale {} event from button {}",
                        event.state.label(),
                        event.button_id
                    );
                    return false;
                }
            }
            *latest = Some(event.clone());
        }

        let state_handlers = self.state_handlers.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for handler in &state_handlers {
            handler(&event);
        }

        if let Some(error) = event.state.error() {
            let error_event = ErrorOccurredEvent {
                button_id: event.button_id.clone(),
                error: error.clone(),
                time: event.time,
            };
            let error_handlers = self.error_handlers.lock().unwrap_or_else(PoisonError::into_inner).clone();
            for handler in &error_handlers {
                handler(&error_event);
            }
        }

        true
    }
}
