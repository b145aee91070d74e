use super::{ProgressCell, ProgressKind, TaskProgress};
use async_trait::async_trait;
use tokio::sync::watch;

/// Progress without any known fraction. This is what buttons use when the
/// action does not care about reporting progress.
#[derive(Debug)]
pub struct IndeterminateProgress {
    fraction: ProgressCell,
}

impl IndeterminateProgress {
    pub fn new() -> Self {
        Self {
            fraction: ProgressCell::new(None),
        }
    }
}

impl Default for IndeterminateProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskProgress for IndeterminateProgress {
    fn kind(&self) -> ProgressKind {
        ProgressKind::Indeterminate
    }

    fn reset(&self) {}

    fn fraction_completed(&self) -> Option<f64> {
        None
    }

    fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.fraction.subscribe()
    }
}
