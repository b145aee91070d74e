use super::{ProgressCell, ProgressKind, TaskProgress};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mirrors a progress value owned by someone else.
///
/// Actions that delegate to a library exposing its own progress (a download,
/// an archive extraction, ...) [`bridge`](Self::bridge) its `watch` receiver and
/// the button follows along. Resetting detaches the source.
#[derive(Debug)]
pub struct BridgedProgress {
    fraction: Arc<ProgressCell>,
    forwarder: Mutex<Option<JoinHandle<()>>>,
}

impl BridgedProgress {
    pub fn new() -> Self {
        Self {
            fraction: Arc::new(ProgressCell::new(None)),
            forwarder: Mutex::new(None),
        }
    }

    /// Start mirroring `source`, replacing any previously bridged source.
    ///
    /// The current value of the source is visible right away. Must be called
    /// from within a tokio runtime.
    pub fn bridge(&self, mut source: watch::Receiver<Option<f64>>) {
        self.detach();

        self.fraction.set(normalize(*source.borrow_and_update()));

        let fraction = Arc::clone(&self.fraction);
        let handle = tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let value = normalize(*source.borrow_and_update());
                fraction.set(value);
            }
        });

        if let Ok(mut forwarder) = self.forwarder.lock() {
            *forwarder = Some(handle);
        }
    }

    pub fn is_bridged(&self) -> bool {
        self.forwarder
            .lock()
            .map(|forwarder| forwarder.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    fn detach(&self) {
        if let Ok(mut forwarder) = self.forwarder.lock() {
            if let Some(handle) = forwarder.take() {
                handle.abort();
            }
        }
    }
}

impl Default for BridgedProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskProgress for BridgedProgress {
    fn kind(&self) -> ProgressKind {
        ProgressKind::Bridged
    }

    fn reset(&self) {
        self.detach();
        self.fraction.set(None);
    }

    fn fraction_completed(&self) -> Option<f64> {
        self.fraction.get()
    }

    fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.fraction.subscribe()
    }
}

impl Drop for BridgedProgress {
    fn drop(&mut self) {
        self.detach();
    }
}

fn normalize(value: Option<f64>) -> Option<f64> {
    value.map(|fraction| if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) })
}

/// A unit-counted progress source living outside the button, meant to be
/// bridged with [`BridgedProgress::bridge`].
#[derive(Debug)]
pub struct ExternalProgress {
    total: u64,
    state: Mutex<ExternalState>,
    sender: watch::Sender<Option<f64>>,
}

#[derive(Debug, Default)]
struct ExternalState {
    completed: u64,
    indeterminate: bool,
}

impl ExternalProgress {
    /// A total of zero makes the source indeterminate.
    pub fn new(total: u64) -> Self {
        let indeterminate = total == 0;
        let initial = if indeterminate { None } else { Some(0.0) };
        let (sender, _) = watch::channel(initial);
        Self {
            total,
            state: Mutex::new(ExternalState {
                completed: 0,
                indeterminate,
            }),
            sender,
        }
    }

    pub fn receiver(&self) -> watch::Receiver<Option<f64>> {
        self.sender.subscribe()
    }

    /// Set completed units, clamped to the total.
    pub fn set_completed_unit_count(&self, completed: u64) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.completed = completed.min(self.total);
        self.publish(&state);
    }

    pub fn increment(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.completed = state.completed.saturating_add(1).min(self.total);
        self.publish(&state);
    }

    pub fn set_indeterminate(&self, indeterminate: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.indeterminate = indeterminate || self.total == 0;
        self.publish(&state);
    }

    fn publish(&self, state: &ExternalState) {
        let value = if state.indeterminate {
            None
        } else {
            Some(state.completed as f64 / self.total as f64)
        };
        self.sender.send_replace(value);
    }
}
