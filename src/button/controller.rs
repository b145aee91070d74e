//! Runs a button action and drives its [`ActionState`].
//!
//! The controller owns everything a single button needs at runtime: the bound
//! action, the progress reporter, the state cell, the failure log and the
//! callbacks. It guarantees at most one run in flight: `perform` checks and
//! flips the state in one step, so a second call while running is ignored.

use super::error::{ActionError, ButtonError};
use super::events::ButtonEvents;
use super::id::ButtonId;
use super::state::{ActionState, Completion, TaskHandle};
use crate::progress::TaskProgress;
use log::{debug, info, warn};
use std::future::Future;
use std::pin::Pin;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
type BoxedAction<P> = Arc<dyn Fn(ActionContext<P>) -> BoxFuture<anyhow::Result<()>> + Send + Sync>;

pub type StateCallback = Arc<dyn Fn(&ActionState) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&ActionError) + Send + Sync>;

/// What an action receives when it runs.
pub struct ActionContext<P> {
    progress: Arc<P>,
    token: CancellationToken,
}

impl<P> Clone for ActionContext<P> {
    fn clone(&self) -> Self {
        Self {
            progress: Arc::clone(&self.progress),
            token: self.token.clone(),
        }
    }
}

impl<P> ActionContext<P> {
    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn progress_handle(&self) -> Arc<P> {
        Arc::clone(&self.progress)
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the run has been cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Bail out with [`ButtonError::Cancelled`] if the run has been cancelled.
    pub fn check_cancelled(&self) -> Result<(), ButtonError> {
        if self.is_cancelled() {
            Err(ButtonError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Run `future` unless the run gets cancelled first.
    pub async fn cancellable<F: Future>(&self, future: F) -> Result<F::Output, ButtonError> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ButtonError::Cancelled),
            output = future => Ok(output),
        }
    }
}

/// Optional observers of a single button.
#[derive(Clone, Default)]
pub struct Callbacks {
    /// Fired for every transition of this button
    pub on_state_change: Option<StateCallback>,
    /// Fired only when a run ends with an error
    pub on_error: Option<ErrorCallback>,
}

#[derive(Debug, Default)]
struct FailureLog {
    count: u32,
    latest_error: Option<ActionError>,
}

enum Outcome {
    Completed,
    Cancelled,
    Failed(anyhow::Error),
}

pub(crate) struct ControllerInner<P> {
    id: ButtonId,
    progress: Arc<P>,
    action: BoxedAction<P>,
    state: watch::Sender<ActionState>,
    failures: Mutex<FailureLog>,
    enabled: AtomicBool,
    callbacks: Callbacks,
    events: Mutex<Option<Arc<ButtonEvents>>>,
    task: Mutex<Option<JoinHandle<()>>>,
    /// Bumped by every `perform`; only the newest run may drive the progress
    generation: AtomicU64,
}

/// Cheap, cloneable handle on a button's runtime.
pub struct ActionController<P> {
    inner: Arc<ControllerInner<P>>,
}

impl<P> Clone for ActionController<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: TaskProgress> ActionController<P> {
    pub fn new<F, Fut>(id: ButtonId, progress: Arc<P>, action: F, callbacks: Callbacks) -> Self
    where
        F: Fn(ActionContext<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let action: BoxedAction<P> = Arc::new(move |context| Box::pin(action(context)));
        let (state, _) = watch::channel(ActionState::Idle);

        Self {
            inner: Arc::new(ControllerInner {
                id,
                progress,
                action,
                state,
                failures: Mutex::new(FailureLog::default()),
                enabled: AtomicBool::new(true),
                callbacks,
                events: Mutex::new(None),
                task: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn id(&self) -> &ButtonId {
        &self.inner.id
    }

    pub fn progress(&self) -> &Arc<P> {
        &self.inner.progress
    }

    pub fn state(&self) -> ActionState {
        self.inner.state.borrow().clone()
    }

    /// Observe every state of this button.
    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    pub fn number_of_failures(&self) -> u32 {
        self.inner.failures.lock().unwrap_or_else(PoisonError::into_inner).count
    }

    pub fn latest_error(&self) -> Option<ActionError> {
        self.inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .latest_error
            .clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// A disabled button ignores `perform`. Runs already in flight continue.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Route this button's transitions to a scope bus, or stop doing so.
    pub fn attach_events(&self, events: Option<Arc<ButtonEvents>>) {
        *self.inner.events.lock().unwrap_or_else(PoisonError::into_inner) = events;
    }

    /// Start a run of the action.
    ///
    /// Returns `false` without doing anything when the button is disabled or
    /// a run is already in flight. Must be called from within a tokio runtime.
    pub fn perform(&self) -> bool {
        let id = &self.inner.id;
        if !self.is_enabled() {
            debug!("Button {id} is disabled, ignoring perform");
            return false;
        }

        let handle = TaskHandle::new();
        let started = self.inner.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = ActionState::Started(handle.clone());
                true
            }
        });

        if !started {
            debug!("Button {id} is already running, ignoring perform");
            return false;
        }

        info!("▶ Button {id} started");
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.progress.reset();
        self.inner.notify(&ActionState::Started(handle.clone()));

        let inner = Arc::clone(&self.inner);
        let mut task = self.inner.task.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = task.take();
        *task = Some(tokio::spawn(async move {
            inner.run(handle, generation, previous).await;
        }));

        true
    }

    /// Cancel the run in flight.
    ///
    /// The state becomes `Ended(Cancelled)` right away; the action itself stops
    /// whenever it next observes the cancellation. Returns `false` when nothing
    /// was running.
    pub fn cancel(&self) -> bool {
        let cancelled = self.inner.state.send_if_modified(|state| match state {
            ActionState::Started(handle) => {
                handle.cancel();
                *state = ActionState::Ended(Completion::Cancelled);
                true
            }
            _ => false,
        });

        if cancelled {
            info!("⏹ Button {} cancelled", self.inner.id);
            self.inner.notify(&ActionState::Ended(Completion::Cancelled));
        }

        cancelled
    }

    /// Wait until the visible state is no longer loading.
    pub async fn settled(&self) -> ActionState {
        let mut receiver = self.inner.state.subscribe();
        let result = receiver.wait_for(|state| !state.is_loading()).await.map(|state| state.clone());
        match result {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Wait for the last spawned run to return, including its progress
    /// teardown. Unlike [`settled`](Self::settled) this also waits for
    /// cancelled actions that have not stopped yet, since every run first
    /// waits for the one before it.
    pub async fn join(&self) {
        let task = self.inner.task.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Button {} task did not finish cleanly: {}", self.inner.id, e);
            }
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<ControllerInner<P>> {
        Arc::downgrade(&self.inner)
    }

    /// Identity of this controller, for registrations that must only be
    /// removed by the button that made them.
    pub(crate) fn owner(&self) -> Weak<dyn Any + Send + Sync> {
        let weak: Weak<ControllerInner<P>> = Arc::downgrade(&self.inner);
        weak
    }

    pub(crate) fn upgrade(weak: &Weak<ControllerInner<P>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

impl<P: TaskProgress> ControllerInner<P> {
    async fn run(self: Arc<Self>, handle: TaskHandle, generation: u64, previous: Option<JoinHandle<()>>) {
        // A cancelled run may still be draining. Its action shares the
        // reporter, so this run starts from a clean reset once it is gone.
        if let Some(previous) = previous {
            if !previous.is_finished() {
                debug!("Button {} waiting for its cancelled run to stop", self.id);
            }
            if let Err(e) = previous.await {
                warn!("Button {} previous task did not finish cleanly: {}", self.id, e);
            }
            if handle.is_cancelled() {
                self.finish(&handle, Outcome::Cancelled);
                return;
            }
            if self.is_current(generation) {
                self.progress.reset();
            }
        }

        let context = ActionContext {
            progress: Arc::clone(&self.progress),
            token: handle.token(),
        };

        if self.is_current(generation) {
            self.progress.started().await;
        }

        // Spawned separately so a panicking action still settles the button.
        let result = match tokio::spawn((self.action)(context)).await {
            Ok(result) => result,
            Err(e) => Err(anyhow::anyhow!("Action task failed: {e}")),
        };

        let outcome = match result {
            _ if handle.is_cancelled() => Outcome::Cancelled,
            Err(e) if matches!(e.downcast_ref::<ButtonError>(), Some(ButtonError::Cancelled)) => Outcome::Cancelled,
            Err(e) => Outcome::Failed(e),
            Ok(()) => Outcome::Completed,
        };

        if self.is_current(generation) {
            self.progress.ended().await;
        } else {
            debug!("Button {} run was superseded, leaving progress to the newer run", self.id);
        }
        self.finish(&handle, outcome);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn finish(&self, handle: &TaskHandle, outcome: Outcome) {
        let mut failure = None;
        let mut ended = None;

        self.state.send_if_modified(|state| {
            if state.task() != Some(handle) {
                return false;
            }

            let completion = match outcome {
                Outcome::Completed => Completion::Completed,
                Outcome::Cancelled => Completion::Cancelled,
                Outcome::Failed(e) => {
                    let error = ActionError::new(e);
                    let number_of_failures = self.record_failure(&error);
                    failure = Some(error.clone());
                    Completion::Errored {
                        error,
                        number_of_failures,
                    }
                }
            };

            *state = ActionState::Ended(completion);
            ended = Some(state.clone());
            true
        });

        let Some(state) = ended else {
            debug!("Button {} run settled after its state was already final", self.id);
            return;
        };

        match &state {
            ActionState::Ended(Completion::Errored {
                error,
                number_of_failures,
            }) => warn!("❌ Button {} failed ({} so far): {}", self.id, number_of_failures, error),
            _ => info!("✅ Button {} {}", self.id, state.label()),
        }

        self.notify(&state);

        if let (Some(error), Some(on_error)) = (failure, &self.callbacks.on_error) {
            on_error(&error);
        }
    }

    fn record_failure(&self, error: &ActionError) -> u32 {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        failures.count += 1;
        failures.latest_error = Some(error.clone());
        failures.count
    }

    fn notify(&self, state: &ActionState) {
        if let Some(on_state_change) = &self.callbacks.on_state_change {
            on_state_change(state);
        }

        let events = self.events.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(events) = events {
            events.publish(self.id.clone(), state.clone());
        }
    }
}
