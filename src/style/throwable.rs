use crate::button::ActionError;
use std::sync::Arc;

/// Snapshot handed to [`ThrowableButtonStyle::make_label`].
#[derive(Debug, Clone)]
pub struct ThrowableLabelConfiguration<V> {
    pub label: V,
    pub latest_error: Option<ActionError>,
    /// Incremented on every new error, never reset
    pub number_of_failures: u32,
}

/// Snapshot handed to [`ThrowableButtonStyle::make_button`].
#[derive(Debug, Clone)]
pub struct ThrowableButtonConfiguration<V> {
    pub button: V,
    pub latest_error: Option<ActionError>,
    /// Incremented on every new error, never reset
    pub number_of_failures: u32,
}

/// Presentation of the failure history.
pub trait ThrowableButtonStyle<V>: Send + Sync {
    fn make_label(&self, configuration: ThrowableLabelConfiguration<V>) -> V {
        configuration.label
    }

    fn make_button(&self, configuration: ThrowableButtonConfiguration<V>) -> V {
        configuration.button
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainThrowableButtonStyle;

impl<V> ThrowableButtonStyle<V> for PlainThrowableButtonStyle {}

/// Type-erased [`ThrowableButtonStyle`].
pub struct AnyThrowableButtonStyle<V: 'static> {
    style: Arc<dyn ThrowableButtonStyle<V>>,
}

impl<V: 'static> AnyThrowableButtonStyle<V> {
    pub fn new(style: impl ThrowableButtonStyle<V> + 'static) -> Self {
        Self { style: Arc::new(style) }
    }
}

impl<V: 'static> Clone for AnyThrowableButtonStyle<V> {
    fn clone(&self) -> Self {
        Self {
            style: Arc::clone(&self.style),
        }
    }
}

impl<V: 'static> Default for AnyThrowableButtonStyle<V> {
    fn default() -> Self {
        Self::new(PlainThrowableButtonStyle)
    }
}

impl<V: 'static> ThrowableButtonStyle<V> for AnyThrowableButtonStyle<V> {
    fn make_label(&self, configuration: ThrowableLabelConfiguration<V>) -> V {
        self.style.make_label(configuration)
    }

    fn make_button(&self, configuration: ThrowableButtonConfiguration<V>) -> V {
        self.style.make_button(configuration)
    }
}
