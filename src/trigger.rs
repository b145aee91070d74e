//! Trigger registry for invoking identified buttons programmatically.
//!
//! This module provides the `TriggerRegistry`, which maps a [`ButtonId`] to the
//! perform action of the button currently mounted under that id. One part of
//! the UI (say a text field submitting on return) can then trigger a button
//! living elsewhere in the same scope without holding a reference to it.

use crate::button::ButtonId;
use crate::constants::{WARN_TRIGGER_NOT_MOUNTED, WARN_TRIGGER_OVERRIDDEN};
use log::{debug, warn};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// What happened when a button was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerResult {
    /// The button started a new run
    Started,
    /// The button is mounted but ignored the trigger (running or disabled)
    Ignored,
    /// No button is mounted under this id
    NotMounted,
}

impl TriggerResult {
    pub fn is_started(self) -> bool {
        self == TriggerResult::Started
    }
}

type PerformFn = Arc<dyn Fn() -> TriggerResult + Send + Sync>;

/// Identity of whoever registered an entry.
pub type Owner = Weak<dyn Any + Send + Sync>;

struct Registration {
    perform: PerformFn,
    owner: Option<Owner>,
}

/// Registry of mounted, identified buttons.
///
/// Misuse is never an error: triggering an id nobody registered or registering
/// an id twice logs a warning and carries on.
#[derive(Default)]
pub struct TriggerRegistry {
    buttons: Mutex<HashMap<ButtonId, Registration>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `id` with a perform action.
    ///
    /// # Returns
    /// `true` when an existing registration was overridden
    pub fn register(&self, id: ButtonId, perform: impl Fn() -> TriggerResult + Send + Sync + 'static) -> bool {
        self.insert(
            id,
            Registration {
                perform: Arc::new(perform),
                owner: None,
            },
        )
    }

    /// Like [`register`](Self::register), remembering `owner` so that
    /// [`unregister_owned`](Self::unregister_owned) leaves an entry alone once
    /// someone else has overridden it.
    pub fn register_owned(
        &self,
        id: ButtonId,
        owner: Owner,
        perform: impl Fn() -> TriggerResult + Send + Sync + 'static,
    ) -> bool {
        self.insert(
            id,
            Registration {
                perform: Arc::new(perform),
                owner: Some(owner),
            },
        )
    }

    fn insert(&self, id: ButtonId, registration: Registration) -> bool {
        let mut buttons = self.buttons.lock().unwrap_or_else(PoisonError::into_inner);
        let replaced = buttons.insert(id.clone(), registration).is_some();
        if replaced {
            warn!("{WARN_TRIGGER_OVERRIDDEN}: {id}");
        } else {
            debug!("Registered button {id}");
        }
        replaced
    }

    /// Forget `id`. Does nothing when it is not registered.
    pub fn unregister(&self, id: &ButtonId) -> bool {
        let removed = self
            .buttons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            debug!("Unregistered button {id}");
        }
        removed
    }

    /// Forget `id` only if it is still registered by `owner`.
    pub fn unregister_owned(&self, id: &ButtonId, owner: &Owner) -> bool {
        let mut buttons = self.buttons.lock().unwrap_or_else(PoisonError::into_inner);
        let owned = matches!(
            buttons.get(id),
            Some(Registration { owner: Some(current), .. }) if Weak::ptr_eq(current, owner)
        );
        if !owned {
            debug!("Button {id} is not registered by this owner, leaving the registry as is");
            return false;
        }
        buttons.remove(id);
        debug!("Unregistered button {id}");
        true
    }

    /// Trigger the button registered under `id`.
    pub fn invoke(&self, id: &ButtonId) -> TriggerResult {
        // Cloned out so the button runs without the registry locked.
        let perform = self
            .buttons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .map(|registration| Arc::clone(&registration.perform));

        let result = match perform {
            Some(perform) => perform(),
            None => TriggerResult::NotMounted,
        };

        if result == TriggerResult::NotMounted {
            warn!("{WARN_TRIGGER_NOT_MOUNTED}: {id}");
        }
        result
    }

    pub fn contains(&self, id: &ButtonId) -> bool {
        self.buttons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn ids(&self) -> Vec<ButtonId> {
        let mut ids: Vec<ButtonId> = self
            .buttons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.buttons.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
