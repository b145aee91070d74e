use crate::button::{ButtonEvents, ButtonId};
use crate::config::BehaviorConfig;
use crate::style::{AnyAsyncButtonStyle, AnyThrowableButtonStyle, AsyncButtonStyle, ThrowableButtonStyle};
use crate::trigger::{TriggerRegistry, TriggerResult};
use std::sync::Arc;

/// How buttons react to presses while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonBehavior {
    /// Report the button as disabled while it is loading
    pub disabled_when_loading: bool,
    /// Let presses reach the button while it is loading
    pub allows_hit_testing_when_loading: bool,
}

impl From<&BehaviorConfig> for ButtonBehavior {
    fn from(config: &BehaviorConfig) -> Self {
        Self {
            disabled_when_loading: config.disabled_when_loading,
            allows_hit_testing_when_loading: config.allows_hit_testing_when_loading,
        }
    }
}

/// Context shared by the buttons of a UI subtree.
///
/// A scope carries the styles and behavior buttons render with, the trigger
/// registry they mount into and the event bus they publish to. Host frameworks
/// thread it down their tree; [`child`](Self::child) scopes share the registry
/// and the bus of their parent but may override styles and behavior.
pub struct ButtonScope<V: 'static> {
    registry: Arc<TriggerRegistry>,
    events: Arc<ButtonEvents>,
    async_style: AnyAsyncButtonStyle<V>,
    throwable_style: AnyThrowableButtonStyle<V>,
    behavior: ButtonBehavior,
}

impl<V: 'static> ButtonScope<V> {
    /// A fresh scope with its own registry and bus, and pass-through styles.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(TriggerRegistry::new()),
            events: Arc::new(ButtonEvents::new()),
            async_style: AnyAsyncButtonStyle::default(),
            throwable_style: AnyThrowableButtonStyle::default(),
            behavior: ButtonBehavior::default(),
        }
    }

    /// A scope for a subtree, inheriting everything from this one.
    pub fn child(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub fn with_async_style(mut self, style: impl AsyncButtonStyle<V> + 'static) -> Self {
        self.async_style = AnyAsyncButtonStyle::new(style);
        self
    }

    #[must_use]
    pub fn with_throwable_style(mut self, style: impl ThrowableButtonStyle<V> + 'static) -> Self {
        self.throwable_style = AnyThrowableButtonStyle::new(style);
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: ButtonBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[must_use]
    pub fn disabled_when_loading(mut self, disabled: bool) -> Self {
        self.behavior.disabled_when_loading = disabled;
        self
    }

    #[must_use]
    pub fn allows_hit_testing_when_loading(mut self, enabled: bool) -> Self {
        self.behavior.allows_hit_testing_when_loading = enabled;
        self
    }

    pub fn registry(&self) -> &Arc<TriggerRegistry> {
        &self.registry
    }

    pub fn events(&self) -> &Arc<ButtonEvents> {
        &self.events
    }

    pub fn async_style(&self) -> &AnyAsyncButtonStyle<V> {
        &self.async_style
    }

    pub fn throwable_style(&self) -> &AnyThrowableButtonStyle<V> {
        &self.throwable_style
    }

    pub fn behavior(&self) -> ButtonBehavior {
        self.behavior
    }

    /// Trigger the button mounted under `id` in this scope.
    pub fn trigger(&self, id: impl Into<ButtonId>) -> TriggerResult {
        self.registry.invoke(&id.into())
    }
}

impl<V: 'static> Clone for ButtonScope<V> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            events: Arc::clone(&self.events),
            async_style: self.async_style.clone(),
            throwable_style: self.throwable_style.clone(),
            behavior: self.behavior,
        }
    }
}

impl<V: 'static> Default for ButtonScope<V> {
    fn default() -> Self {
        Self::new()
    }
}
