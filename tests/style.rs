use buttonkit::button::{AsyncButton, Component};
use buttonkit::progress::{DiscreteProgress, TaskProgress};
use buttonkit::scope::ButtonScope;
use buttonkit::style::{
    AsyncButtonConfiguration, AsyncButtonStyle, AsyncLabelConfiguration, CancelAction, ThrowableButtonConfiguration,
    ThrowableButtonStyle, ThrowableLabelConfiguration,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Wraps everything it is given so the composition order shows in the output
struct Wrapping;

impl AsyncButtonStyle<String> for Wrapping {
    fn make_label(&self, configuration: AsyncLabelConfiguration<String>) -> String {
        let marker = if configuration.is_loading { "loading" } else { "idle" };
        format!("label[{}]({})", marker, configuration.label)
    }

    fn make_button(&self, configuration: AsyncButtonConfiguration<String>) -> String {
        match configuration.fraction_completed {
            Some(fraction) => format!("button[{fraction}]({})", configuration.button),
            None => format!("button({})", configuration.button),
        }
    }
}

impl ThrowableButtonStyle<String> for Wrapping {
    fn make_label(&self, configuration: ThrowableLabelConfiguration<String>) -> String {
        format!("failures[{}]({})", configuration.number_of_failures, configuration.label)
    }

    fn make_button(&self, configuration: ThrowableButtonConfiguration<String>) -> String {
        match configuration.latest_error {
            Some(error) => format!("error[{error}]({})", configuration.button),
            None => format!("ok({})", configuration.button),
        }
    }
}

/// Keeps the cancel action of the last loading render
#[derive(Default)]
struct CancelOnDemand {
    cancel: Arc<Mutex<Option<CancelAction>>>,
}

impl AsyncButtonStyle<String> for CancelOnDemand {
    fn make_label(&self, configuration: AsyncLabelConfiguration<String>) -> String {
        if configuration.is_loading {
            *self.cancel.lock().unwrap() = Some(configuration.cancel);
        }
        configuration.label
    }
}

#[tokio::test]
async fn test_unmounted_button_renders_label() {
    let button = AsyncButton::new("Save".to_string(), || async { anyhow::Ok(()) });
    assert_eq!(button.render(), "Save");
}

#[tokio::test]
async fn test_styles_compose_in_order() {
    let scope = ButtonScope::<String>::new()
        .with_async_style(Wrapping)
        .with_throwable_style(Wrapping);
    let mut button = AsyncButton::new("Save".to_string(), || async { anyhow::Ok(()) });
    button.mount(&scope);

    assert_eq!(button.render(), "button(ok(label[idle](failures[0](Save))))");
}

#[tokio::test]
async fn test_configurations_reflect_state() {
    let scope = ButtonScope::<String>::new()
        .with_async_style(Wrapping)
        .with_throwable_style(Wrapping);
    let gate = Arc::new(Notify::new());
    let action_gate = Arc::clone(&gate);
    let mut button = AsyncButton::builder("Sync".to_string())
        .progress(DiscreteProgress::new(4).unwrap())
        .action(move |context| {
            let gate = Arc::clone(&action_gate);
            async move {
                context.progress().increment()?;
                gate.notified().await;
                Err::<(), _>(anyhow::anyhow!("offline"))
            }
        });
    button.mount(&scope);

    button.perform();
    let mut fraction = button.progress().subscribe();
    fraction.wait_for(|value| *value == Some(0.25)).await.unwrap();
    assert_eq!(button.render(), "button[0.25](ok(label[loading](failures[0](Sync))))");

    gate.notify_one();
    button.controller().settled().await;
    assert_eq!(
        button.render(),
        "button[0.25](error[offline](label[idle](failures[1](Sync))))"
    );
}

#[tokio::test]
async fn test_style_cancels_through_configuration() {
    let style = CancelOnDemand::default();
    let cancel = Arc::clone(&style.cancel);
    let scope = ButtonScope::<String>::new().with_async_style(style);
    let mut button = AsyncButton::builder("Upload".to_string()).action(|context| async move {
        context.cancelled().await;
        anyhow::Ok(())
    });
    button.mount(&scope);

    button.perform();
    assert_eq!(button.render(), "Upload");

    let action = cancel.lock().unwrap().take().unwrap();
    action.call();
    assert!(!button.is_loading());
    button.controller().join().await;
}
