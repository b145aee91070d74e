use super::{ProgressCell, ProgressError, ProgressKind, TaskProgress};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

/// Discrete and linear progress over a fixed number of units.
///
/// Assigning a unit count outside `0..=total` is a programming error. It is
/// rejected with [`ProgressError::OutOfRange`] and the stored count is left
/// untouched, in debug and release builds alike.
#[derive(Debug)]
pub struct DiscreteProgress {
    total: u64,
    completed: Mutex<u64>,
    fraction: ProgressCell,
}

impl DiscreteProgress {
    /// Create a discrete progress of `total` units.
    ///
    /// # Errors
    /// Returns [`ProgressError::InvalidTotal`] when `total` is zero
    pub fn new(total: u64) -> Result<Self, ProgressError> {
        if total == 0 {
            return Err(ProgressError::InvalidTotal(total));
        }

        Ok(Self {
            total,
            completed: Mutex::new(0),
            fraction: ProgressCell::new(Some(0.0)),
        })
    }

    pub fn total_unit_count(&self) -> u64 {
        self.total
    }

    pub fn completed_unit_count(&self) -> u64 {
        *self.completed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the number of completed units.
    ///
    /// # Errors
    /// Returns [`ProgressError::OutOfRange`] when `completed` exceeds the total
    pub fn set_completed_unit_count(&self, completed: u64) -> Result<(), ProgressError> {
        self.update(|_| completed)
    }

    /// Mark one more unit as completed.
    ///
    /// # Errors
    /// Returns [`ProgressError::OutOfRange`] when every unit is already completed
    pub fn increment(&self) -> Result<(), ProgressError> {
        self.increment_by(1)
    }

    /// Mark `units` more units as completed.
    ///
    /// # Errors
    /// Returns [`ProgressError::OutOfRange`] when the result would exceed the total
    pub fn increment_by(&self, units: u64) -> Result<(), ProgressError> {
        self.update(|current| current.saturating_add(units))
    }

    fn update(&self, next: impl FnOnce(u64) -> u64) -> Result<(), ProgressError> {
        let mut completed = self.completed.lock().unwrap_or_else(PoisonError::into_inner);
        let value = next(*completed);
        if value > self.total {
            return Err(ProgressError::OutOfRange {
                completed: value,
                total: self.total,
            });
        }

        *completed = value;
        self.fraction.set(Some(self.fraction_of(value)));
        Ok(())
    }

    fn fraction_of(&self, completed: u64) -> f64 {
        completed as f64 / self.total as f64
    }
}

#[async_trait]
impl TaskProgress for DiscreteProgress {
    fn kind(&self) -> ProgressKind {
        ProgressKind::Discrete { total: self.total }
    }

    fn reset(&self) {
        let mut completed = self.completed.lock().unwrap_or_else(PoisonError::into_inner);
        *completed = 0;
        self.fraction.set(Some(0.0));
    }

    fn fraction_completed(&self) -> Option<f64> {
        self.fraction.get()
    }

    fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.fraction.subscribe()
    }
}
