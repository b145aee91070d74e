use super::error::ActionError;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// How a run of a button action ended.
#[derive(Debug, Clone)]
pub enum Completion {
    Completed,
    Cancelled,
    Errored {
        error: ActionError,
        /// Failures of this button so far, this one included
        number_of_failures: u32,
    },
}

// Errors are not comparable, two errored completions are equal when they
// carry the same failure count.
impl PartialEq for Completion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Completion::Completed, Completion::Completed) => true,
            (Completion::Cancelled, Completion::Cancelled) => true,
            (
                Completion::Errored {
                    number_of_failures: lhs,
                    ..
                },
                Completion::Errored {
                    number_of_failures: rhs,
                    ..
                },
            ) => lhs == rhs,
            _ => false,
        }
    }
}

impl Completion {
    pub fn label(&self) -> &'static str {
        match self {
            Completion::Completed => "completed",
            Completion::Cancelled => "cancelled",
            Completion::Errored { .. } => "errored",
        }
    }
}

/// Opaque handle on an in-flight action run.
///
/// Handles compare by identity: two handles are equal only when they refer to
/// the same run.
#[derive(Clone)]
pub struct TaskHandle {
    inner: Arc<TaskInner>,
}

struct TaskInner {
    token: CancellationToken,
    started_at: Instant,
}

impl TaskHandle {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(TaskInner {
                token: CancellationToken::new(),
                started_at: Instant::now(),
            }),
        }
    }

    pub(crate) fn cancel(&self) {
        self.inner.token.cancel();
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.inner.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    pub fn started_at(&self) -> Instant {
        self.inner.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.inner.started_at.elapsed()
    }
}

impl PartialEq for TaskHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TaskHandle {}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &Arc::as_ptr(&self.inner))
            .field("cancelled", &self.is_cancelled())
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

/// Lifecycle of a button action.
///
/// `Idle` only holds until the first run. From then on the button alternates
/// between `Started` and `Ended`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Started(TaskHandle),
    Ended(Completion),
}

impl ActionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Started(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActionState::Idle)
    }

    pub fn task(&self) -> Option<&TaskHandle> {
        match self {
            ActionState::Started(task) => Some(task),
            _ => None,
        }
    }

    pub fn completion(&self) -> Option<&Completion> {
        match self {
            ActionState::Ended(completion) => Some(completion),
            _ => None,
        }
    }

    /// The error of an errored run, `None` in every other state.
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionState::Ended(Completion::Errored { error, .. }) => Some(error),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionState::Idle => "idle",
            ActionState::Started(_) => "started",
            ActionState::Ended(completion) => completion.label(),
        }
    }
}
