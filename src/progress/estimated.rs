use super::{ProgressCell, ProgressKind, TaskProgress};
use crate::config::ProgressConfig;
use crate::constants::{ESTIMATED_PROGRESS_CEILING, ESTIMATED_PROGRESS_STEPS, PROGRESS_SETTLE_MILLIS};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Progress simulated from the time the work is expected to take.
///
/// While the action runs, a background ticker moves the fraction toward the
/// ceiling in equal steps spread over the estimated duration. The ticker alone
/// never reaches 1.0: only [`ended`](TaskProgress::ended) does, once the work
/// has actually finished.
#[derive(Debug)]
pub struct EstimatedProgress {
    estimation: Duration,
    ceiling: f64,
    steps: u32,
    settle: Duration,
    fraction: Arc<ProgressCell>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl EstimatedProgress {
    pub fn new(estimation: Duration) -> Self {
        Self {
            estimation,
            ceiling: ESTIMATED_PROGRESS_CEILING,
            steps: ESTIMATED_PROGRESS_STEPS,
            settle: Duration::from_millis(PROGRESS_SETTLE_MILLIS),
            fraction: Arc::new(ProgressCell::new(Some(0.0))),
            ticker: Mutex::new(None),
        }
    }

    /// Build an estimated progress using the tuning from the configuration file.
    pub fn from_config(config: &ProgressConfig, estimation: Duration) -> Self {
        Self::new(estimation)
            .with_ceiling(config.estimated_ceiling)
            .with_steps(config.estimated_steps)
            .with_settle(Duration::from_millis(config.settle_millis))
    }

    /// Highest fraction the ticker may reach, clamped to `0.0..=1.0`.
    /// NaN falls back to the default ceiling.
    #[must_use]
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = if ceiling.is_nan() {
            ESTIMATED_PROGRESS_CEILING
        } else {
            ceiling.clamp(0.0, 1.0)
        };
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps.max(1);
        self
    }

    /// Delay `ended` holds after snapping to 1.0 so observers can draw it.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn estimation(&self) -> Duration {
        self.estimation
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    fn stop_ticker(&self) {
        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(handle) = ticker.take() {
                handle.abort();
            }
        }
    }
}

#[async_trait]
impl TaskProgress for EstimatedProgress {
    fn kind(&self) -> ProgressKind {
        ProgressKind::Estimated {
            duration: self.estimation,
        }
    }

    fn reset(&self) {
        self.stop_ticker();
        self.fraction.set(Some(0.0));
    }

    fn fraction_completed(&self) -> Option<f64> {
        self.fraction.get()
    }

    fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.fraction.subscribe()
    }

    async fn started(&self) {
        self.stop_ticker();

        let fraction = Arc::clone(&self.fraction);
        let steps = self.steps;
        let ceiling = self.ceiling;
        let tick = self.estimation / steps;
        let increment = ceiling / f64::from(steps);

        let handle = tokio::spawn(async move {
            for step in 1..=steps {
                tokio::time::sleep(tick).await;
                fraction.set(Some((increment * f64::from(step)).min(ceiling)));
            }
        });

        if let Ok(mut ticker) = self.ticker.lock() {
            *ticker = Some(handle);
        }
    }

    async fn ended(&self) {
        self.stop_ticker();
        self.fraction.set(Some(1.0));
        tokio::time::sleep(self.settle).await;
    }
}

impl Drop for EstimatedProgress {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
