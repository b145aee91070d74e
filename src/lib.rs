//! buttonkit - Asynchronous, fallible buttons with progress reporting
//!
//! This library provides the runtime core of a button whose action is an
//! async, possibly failing task. It tracks the lifecycle of every run, reports
//! progress, lets other parts of the UI trigger buttons by identifier and
//! broadcasts state changes to observers. Presentation is pluggable, and a
//! terminal rendering built with Ratatui is included.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`button`] - The async button, its controller and its state machine
//! * [`progress`] - Progress reporters handed to button actions
//! * [`scope`] - Shared context of a UI subtree (styles, triggers, events)
//! * [`style`] - Style traits and their configurations
//! * [`trigger`] - Programmatic triggering of buttons by identifier
//! * [`tui`] - Terminal styles rendering buttons to Ratatui lines
//! * [`config`] - Library configuration management

/// Async buttons, their lifecycle and their events
pub mod button;

/// Configuration module for managing library settings
pub mod config;

/// Library constants and default values
pub mod constants;

/// Logging backend with an in-memory tail and optional log file
pub mod logger;

/// Progress reporting for button actions
pub mod progress;

/// Context shared by the buttons of a UI subtree
pub mod scope;

/// Pluggable presentation of buttons
pub mod style;

/// Registry used to trigger buttons by identifier
pub mod trigger;

/// Terminal presentation built on Ratatui
pub mod tui;

// Re-export the types needed to declare and mount a button
pub use button::{ActionState, AsyncButton, ButtonId, Completion, Component};
pub use progress::{DiscreteProgress, EstimatedProgress, IndeterminateProgress, TaskProgress};
pub use scope::ButtonScope;
pub use trigger::TriggerResult;
