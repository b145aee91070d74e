use super::CancelAction;
use std::sync::Arc;

/// Snapshot handed to [`AsyncButtonStyle::make_label`].
#[derive(Debug, Clone)]
pub struct AsyncLabelConfiguration<V> {
    pub label: V,
    /// True while a run is in flight
    pub is_loading: bool,
    /// `None` when the progress is indeterminate
    pub fraction_completed: Option<f64>,
    pub cancel: CancelAction,
}

/// Snapshot handed to [`AsyncButtonStyle::make_button`].
#[derive(Debug, Clone)]
pub struct AsyncButtonConfiguration<V> {
    pub button: V,
    /// True while a run is in flight
    pub is_loading: bool,
    /// `None` when the progress is indeterminate
    pub fraction_completed: Option<f64>,
    pub cancel: CancelAction,
}

/// Presentation of the loading state.
pub trait AsyncButtonStyle<V>: Send + Sync {
    fn make_label(&self, configuration: AsyncLabelConfiguration<V>) -> V {
        configuration.label
    }

    fn make_button(&self, configuration: AsyncButtonConfiguration<V>) -> V {
        configuration.button
    }
}

/// Leaves label and button untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAsyncButtonStyle;

impl<V> AsyncButtonStyle<V> for PlainAsyncButtonStyle {}

/// Type-erased [`AsyncButtonStyle`], so scopes can store any style.
pub struct AnyAsyncButtonStyle<V: 'static> {
    style: Arc<dyn AsyncButtonStyle<V>>,
}

impl<V: 'static> AnyAsyncButtonStyle<V> {
    pub fn new(style: impl AsyncButtonStyle<V> + 'static) -> Self {
        Self { style: Arc::new(style) }
    }
}

impl<V: 'static> Clone for AnyAsyncButtonStyle<V> {
    fn clone(&self) -> Self {
        Self {
            style: Arc::clone(&self.style),
        }
    }
}

impl<V: 'static> Default for AnyAsyncButtonStyle<V> {
    fn default() -> Self {
        Self::new(PlainAsyncButtonStyle)
    }
}

impl<V: 'static> AsyncButtonStyle<V> for AnyAsyncButtonStyle<V> {
    fn make_label(&self, configuration: AsyncLabelConfiguration<V>) -> V {
        self.style.make_label(configuration)
    }

    fn make_button(&self, configuration: AsyncButtonConfiguration<V>) -> V {
        self.style.make_button(configuration)
    }
}
