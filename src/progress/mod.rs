//! Progress reporting for button actions.
//!
//! A progress reporter is handed to the action of an [`AsyncButton`](crate::button::AsyncButton)
//! so the action can report how far along it is. Every reporter exposes the same
//! observable value, the fraction completed, which is `None` when the work is
//! indeterminate.
//!
//! # Reporters
//!
//! - [`IndeterminateProgress`] - no known fraction, styles show a spinner
//! - [`DiscreteProgress`] - a known total of units, completed one by one
//! - [`EstimatedProgress`] - simulated from an expected duration, capped below 100%
//! - [`BridgedProgress`] - mirrors an external progress source
//!
//! The fraction is stored in a tokio `watch` channel, so presentation code can
//! [`subscribe`](TaskProgress::subscribe) and redraw on change instead of polling.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;

pub mod bridged;
pub mod discrete;
pub mod estimated;
pub mod indeterminate;

pub use bridged::{BridgedProgress, ExternalProgress};
pub use discrete::DiscreteProgress;
pub use estimated::EstimatedProgress;
pub use indeterminate::IndeterminateProgress;

/// Errors raised when a progress reporter is misused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Discrete progress requires a positive total unit count, got {0}")]
    InvalidTotal(u64),

    #[error("Completed unit count {completed} is outside 0...{total}")]
    OutOfRange { completed: u64, total: u64 },
}

/// The flavour of a progress reporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressKind {
    Indeterminate,
    Discrete { total: u64 },
    Estimated { duration: Duration },
    Bridged,
}

/// Contract shared by all progress reporters.
///
/// `reset` is called synchronously when a button starts a new run, then
/// `started` right before the action and `ended` right after it settles,
/// whatever the outcome.
#[async_trait]
pub trait TaskProgress: Send + Sync + 'static {
    fn kind(&self) -> ProgressKind;

    /// Back to the initial value. Must be idempotent.
    fn reset(&self);

    /// Current fraction in `0.0..=1.0`, `None` when indeterminate.
    fn fraction_completed(&self) -> Option<f64>;

    /// Observe the fraction completed.
    fn subscribe(&self) -> watch::Receiver<Option<f64>>;

    async fn started(&self) {}

    async fn ended(&self) {}
}

/// Observable storage for a fraction completed.
#[derive(Debug)]
pub(crate) struct ProgressCell {
    sender: watch::Sender<Option<f64>>,
}

impl ProgressCell {
    pub(crate) fn new(initial: Option<f64>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub(crate) fn get(&self) -> Option<f64> {
        *self.sender.borrow()
    }

    /// Store a new value, waking subscribers only when it actually changed.
    pub(crate) fn set(&self, value: Option<f64>) {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.sender.subscribe()
    }
}
