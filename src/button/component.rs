use super::controller::{ActionContext, ActionController, Callbacks};
use super::error::ActionError;
use super::id::ButtonId;
use super::state::ActionState;
use crate::progress::{IndeterminateProgress, TaskProgress};
use crate::scope::ButtonScope;
use crate::style::{
    AnyAsyncButtonStyle, AnyThrowableButtonStyle, AsyncButtonConfiguration, AsyncButtonStyle, AsyncLabelConfiguration,
    CancelAction, ThrowableButtonConfiguration, ThrowableButtonStyle, ThrowableLabelConfiguration,
};
use crate::trigger::TriggerResult;
use std::future::Future;
use std::sync::Arc;

/// Lifecycle shared by mountable UI components.
pub trait Component<V: 'static> {
    /// Attach the component to a scope. Mounting again moves it to the new scope.
    fn mount(&mut self, scope: &ButtonScope<V>);

    fn unmount(&mut self);

    fn render(&self) -> V;
}

/// Everything a presentation layer may read about a button at one instant.
#[derive(Debug, Clone)]
pub struct ButtonSnapshot {
    pub button_id: ButtonId,
    pub state: ActionState,
    pub is_loading: bool,
    pub is_disabled: bool,
    pub fraction_completed: Option<f64>,
    pub latest_error: Option<ActionError>,
    pub number_of_failures: u32,
    pub cancel: CancelAction,
}

/// A button running an asynchronous, fallible action.
///
/// ```no_run
/// use buttonkit::button::AsyncButton;
/// use buttonkit::progress::DiscreteProgress;
///
/// # fn build() -> anyhow::Result<()> {
/// let button = AsyncButton::builder("Download".to_string())
///     .id("download")
///     .progress(DiscreteProgress::new(100)?)
///     .action(|context| async move {
///         for _ in 0..100 {
///             context.progress().increment()?;
///         }
///         anyhow::Ok(())
///     });
/// # Ok(())
/// # }
/// ```
pub struct AsyncButton<P: TaskProgress, V: 'static> {
    controller: ActionController<P>,
    label: V,
    explicit_id: bool,
    scope: Option<ButtonScope<V>>,
}

/// Builder for [`AsyncButton`], finished by [`action`](Self::action).
pub struct AsyncButtonBuilder<P, V> {
    label: V,
    id: Option<ButtonId>,
    progress: Arc<P>,
    callbacks: Callbacks,
}

impl<V: 'static> AsyncButton<IndeterminateProgress, V> {
    pub fn builder(label: V) -> AsyncButtonBuilder<IndeterminateProgress, V> {
        AsyncButtonBuilder {
            label,
            id: None,
            progress: Arc::new(IndeterminateProgress::new()),
            callbacks: Callbacks::default(),
        }
    }

    /// A button without identifier nor progress reporting.
    pub fn new<F, Fut>(label: V, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::builder(label).action(move |_| action())
    }
}

impl<P: TaskProgress, V: 'static> AsyncButtonBuilder<P, V> {
    /// Identify the button so it can be triggered through its scope.
    #[must_use]
    pub fn id(mut self, id: impl Into<ButtonId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn progress<Q: TaskProgress>(self, progress: Q) -> AsyncButtonBuilder<Q, V> {
        self.shared_progress(Arc::new(progress))
    }

    /// Use a progress reporter the caller keeps a handle on.
    pub fn shared_progress<Q: TaskProgress>(self, progress: Arc<Q>) -> AsyncButtonBuilder<Q, V> {
        AsyncButtonBuilder {
            label: self.label,
            id: self.id,
            progress,
            callbacks: self.callbacks,
        }
    }

    #[must_use]
    pub fn on_state_change(mut self, handler: impl Fn(&ActionState) + Send + Sync + 'static) -> Self {
        self.callbacks.on_state_change = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn on_error(mut self, handler: impl Fn(&ActionError) + Send + Sync + 'static) -> Self {
        self.callbacks.on_error = Some(Arc::new(handler));
        self
    }

    pub fn action<F, Fut>(self, action: F) -> AsyncButton<P, V>
    where
        F: Fn(ActionContext<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let explicit_id = self.id.is_some();
        let id = self.id.unwrap_or_else(ButtonId::generate);

        AsyncButton {
            controller: ActionController::new(id, self.progress, action, self.callbacks),
            label: self.label,
            explicit_id,
            scope: None,
        }
    }
}

impl<P: TaskProgress, V: 'static> AsyncButton<P, V> {
    pub fn id(&self) -> &ButtonId {
        self.controller.id()
    }

    pub fn controller(&self) -> &ActionController<P> {
        &self.controller
    }

    pub fn progress(&self) -> &Arc<P> {
        self.controller.progress()
    }

    pub fn label(&self) -> &V {
        &self.label
    }

    pub fn set_label(&mut self, label: V) {
        self.label = label;
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_some()
    }

    pub fn state(&self) -> ActionState {
        self.controller.state()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.controller.set_enabled(enabled);
    }

    /// Disabled either explicitly or because it is loading in a scope that
    /// disables loading buttons.
    pub fn is_disabled(&self) -> bool {
        !self.controller.is_enabled() || (self.behavior().disabled_when_loading && self.is_loading())
    }

    /// Start a run, exactly as a trigger would.
    pub fn perform(&self) -> bool {
        self.controller.perform()
    }

    /// Handle a press from the user.
    ///
    /// Presses on a loading button only reach it when the scope allows hit
    /// testing while loading, and are then ignored by `perform` anyway.
    pub fn press(&self) -> bool {
        if self.is_loading() && !self.behavior().allows_hit_testing_when_loading {
            return false;
        }
        if self.is_disabled() {
            return false;
        }
        self.perform()
    }

    pub fn cancel(&self) -> bool {
        self.controller.cancel()
    }

    pub fn snapshot(&self) -> ButtonSnapshot {
        let state = self.controller.state();
        ButtonSnapshot {
            button_id: self.id().clone(),
            is_loading: state.is_loading(),
            is_disabled: self.is_disabled(),
            fraction_completed: self.controller.progress().fraction_completed(),
            latest_error: self.controller.latest_error(),
            number_of_failures: self.controller.number_of_failures(),
            cancel: self.cancel_action(),
            state,
        }
    }

    fn behavior(&self) -> crate::scope::ButtonBehavior {
        self.scope.as_ref().map(ButtonScope::behavior).unwrap_or_default()
    }

    fn cancel_action(&self) -> CancelAction {
        let controller = self.controller.downgrade();
        CancelAction::new(move || {
            if let Some(controller) = ActionController::upgrade(&controller) {
                controller.cancel();
            }
        })
    }

    fn release_scope(&mut self) {
        if let Some(scope) = self.scope.take() {
            if self.explicit_id {
                scope.registry().unregister_owned(self.id(), &self.controller.owner());
            }
        }
    }

    fn styles(&self) -> (AnyAsyncButtonStyle<V>, AnyThrowableButtonStyle<V>) {
        match &self.scope {
            Some(scope) => (scope.async_style().clone(), scope.throwable_style().clone()),
            None => (AnyAsyncButtonStyle::default(), AnyThrowableButtonStyle::default()),
        }
    }
}

impl<P: TaskProgress, V: Clone + 'static> Component<V> for AsyncButton<P, V> {
    fn mount(&mut self, scope: &ButtonScope<V>) {
        if self.scope.is_some() {
            self.unmount();
        }

        self.controller.attach_events(Some(Arc::clone(scope.events())));

        if self.explicit_id {
            let controller = self.controller.downgrade();
            scope.registry().register_owned(self.id().clone(), self.controller.owner(), move || {
                match ActionController::upgrade(&controller) {
                    Some(controller) if controller.perform() => TriggerResult::Started,
                    Some(_) => TriggerResult::Ignored,
                    None => TriggerResult::NotMounted,
                }
            });
        }

        self.scope = Some(scope.clone());
    }

    // The run in flight, if any, keeps going and keeps reporting to the bus.
    fn unmount(&mut self) {
        self.release_scope();
    }

    /// Compose the styles: throwable first, then async around it.
    fn render(&self) -> V {
        let (async_style, throwable_style) = self.styles();
        let snapshot = self.snapshot();

        let label = throwable_style.make_label(ThrowableLabelConfiguration {
            label: self.label.clone(),
            latest_error: snapshot.latest_error.clone(),
            number_of_failures: snapshot.number_of_failures,
        });
        let label = async_style.make_label(AsyncLabelConfiguration {
            label,
            is_loading: snapshot.is_loading,
            fraction_completed: snapshot.fraction_completed,
            cancel: snapshot.cancel.clone(),
        });

        let button = throwable_style.make_button(ThrowableButtonConfiguration {
            button: label,
            latest_error: snapshot.latest_error,
            number_of_failures: snapshot.number_of_failures,
        });
        async_style.make_button(AsyncButtonConfiguration {
            button,
            is_loading: snapshot.is_loading,
            fraction_completed: snapshot.fraction_completed,
            cancel: snapshot.cancel,
        })
    }
}

impl<P: TaskProgress, V: 'static> Drop for AsyncButton<P, V> {
    fn drop(&mut self) {
        self.release_scope();
    }
}
