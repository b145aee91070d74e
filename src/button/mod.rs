//! The async button and the state machine behind it.
//!
//! # Module Components
//!
//! - [`state`] - [`ActionState`] and [`Completion`], the lifecycle of a run
//! - [`controller`] - [`ActionController`], runs the action and drives the state
//! - [`events`] - [`ButtonEvents`], scope-wide observation of state changes
//! - [`component`] - [`AsyncButton`], the mountable component tying it together
//! - [`id`] - [`ButtonId`], identifiers used for triggering and reporting
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──perform──▶ Started ──action returns──▶ Ended(Completed)
//!                      │  ├───action fails────▶ Ended(Errored)
//!                      │  └───cancel──────────▶ Ended(Cancelled)
//! Ended ──perform──▶ Started
//! ```
//!
//! The first transition out of `Started` wins: an action that ignores a
//! cancellation and later returns does not overwrite `Cancelled`.

pub mod component;
pub mod controller;
pub mod error;
pub mod events;
pub mod id;
pub mod state;

pub use component::{AsyncButton, AsyncButtonBuilder, ButtonSnapshot, Component};
pub use controller::{ActionContext, ActionController, Callbacks, ErrorCallback, StateCallback};
pub use error::{ActionError, ButtonError};
pub use events::{ButtonEvents, ErrorOccurredEvent, StateChangedEvent};
pub use id::ButtonId;
pub use state::{ActionState, Completion, TaskHandle};
