//! Pluggable presentation of buttons.
//!
//! Styles never see the button itself. At render time the button builds
//! immutable configurations from its state and hands them to two styles:
//!
//! 1. the [`ThrowableButtonStyle`] decorates the label and the button from the
//!    failure history (latest error, number of failures)
//! 2. the [`AsyncButtonStyle`] then decorates the result from the loading state
//!    (is loading, fraction completed)
//!
//! `V` is the presentation type of the host UI framework. Both traits default
//! to passing the presentation through unchanged, so a style only overrides the
//! maker it cares about.

pub mod async_style;
pub mod throwable;

pub use async_style::{
    AnyAsyncButtonStyle, AsyncButtonConfiguration, AsyncButtonStyle, AsyncLabelConfiguration, PlainAsyncButtonStyle,
};
pub use throwable::{
    AnyThrowableButtonStyle, PlainThrowableButtonStyle, ThrowableButtonConfiguration, ThrowableButtonStyle,
    ThrowableLabelConfiguration,
};

use std::fmt;
use std::sync::Arc;

/// Cancels the run of the button a configuration was built for.
///
/// This is the only way a style can act on a button.
#[derive(Clone)]
pub struct CancelAction(Arc<dyn Fn() + Send + Sync>);

impl CancelAction {
    pub fn new(cancel: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(cancel))
    }

    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for CancelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelAction")
    }
}
