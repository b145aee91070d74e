use buttonkit::button::{ActionState, AsyncButton, ButtonId, Completion, Component};
use buttonkit::scope::ButtonScope;
use buttonkit::trigger::{TriggerRegistry, TriggerResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::Notify;

#[test]
fn test_registry_register_and_invoke() {
    let registry = TriggerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    assert!(!registry.register(ButtonId::from("save"), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        TriggerResult::Started
    }));
    assert!(registry.contains(&ButtonId::from("save")));

    assert_eq!(registry.invoke(&ButtonId::from("save")), TriggerResult::Started);
    assert_eq!(registry.invoke(&ButtonId::from("save")), TriggerResult::Started);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_registry_missing_id() {
    let registry = TriggerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.invoke(&ButtonId::from("missing")), TriggerResult::NotMounted);
    assert!(!registry.unregister(&ButtonId::from("missing")));
}

#[test]
fn test_registry_override_and_unregister() {
    let registry = TriggerRegistry::new();
    registry.register(ButtonId::from("b"), || TriggerResult::Started);
    registry.register(ButtonId::from("a"), || TriggerResult::Started);

    // The latest registration wins
    assert!(registry.register(ButtonId::from("b"), || TriggerResult::Ignored));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.invoke(&ButtonId::from("b")), TriggerResult::Ignored);
    assert_eq!(registry.ids(), vec![ButtonId::from("a"), ButtonId::from("b")]);

    assert!(registry.unregister(&ButtonId::from("b")));
    assert_eq!(registry.invoke(&ButtonId::from("b")), TriggerResult::NotMounted);
    assert_eq!(registry.ids(), vec![ButtonId::from("a")]);
}

#[test]
fn test_registry_unregister_owned_checks_owner() {
    let registry = TriggerRegistry::new();
    let first: Arc<dyn Any + Send + Sync> = Arc::new(1u8);
    let second: Arc<dyn Any + Send + Sync> = Arc::new(2u8);

    registry.register_owned(ButtonId::from("save"), Arc::downgrade(&first), || TriggerResult::Started);
    assert!(registry.register_owned(ButtonId::from("save"), Arc::downgrade(&second), || TriggerResult::Ignored));

    // The overridden owner cannot remove the newer entry
    assert!(!registry.unregister_owned(&ButtonId::from("save"), &Arc::downgrade(&first)));
    assert_eq!(registry.invoke(&ButtonId::from("save")), TriggerResult::Ignored);

    assert!(registry.unregister_owned(&ButtonId::from("save"), &Arc::downgrade(&second)));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_login_triggered_from_elsewhere() {
    let scope = ButtonScope::<String>::new();
    let gate = Arc::new(Notify::new());
    let runs = Arc::new(AtomicUsize::new(0));

    let action_gate = Arc::clone(&gate);
    let action_runs = Arc::clone(&runs);
    let mut login = AsyncButton::builder("Log in".to_string())
        .id("login")
        .action(move |_| {
            let gate = Arc::clone(&action_gate);
            let runs = Arc::clone(&action_runs);
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
                gate.notified().await;
                anyhow::Ok(())
            }
        });

    // Nothing to trigger before the button is mounted
    assert_eq!(scope.trigger("login"), TriggerResult::NotMounted);
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    login.mount(&scope);

    // e.g. a password field submitting on return
    assert_eq!(scope.trigger("login"), TriggerResult::Started);
    assert!(login.is_loading());
    assert_eq!(scope.trigger("login"), TriggerResult::Ignored);

    // Unmounting mid-run stops triggers but not the run
    login.unmount();
    assert!(!login.is_mounted());
    assert_eq!(scope.trigger("login"), TriggerResult::NotMounted);
    assert!(login.is_loading());

    gate.notify_one();
    assert_eq!(login.controller().settled().await, ActionState::Ended(Completion::Completed));
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // The run still reported to the scope it started in
    let latest = scope.events().latest().unwrap();
    assert_eq!(latest.button_id, ButtonId::from("login"));
    assert_eq!(latest.state, ActionState::Ended(Completion::Completed));
}

#[tokio::test]
async fn test_disabled_button_ignores_trigger() {
    let scope = ButtonScope::<String>::new();
    let mut button = AsyncButton::builder("Save".to_string())
        .id("save")
        .action(|_| async { anyhow::Ok(()) });
    button.mount(&scope);
    button.set_enabled(false);

    assert_eq!(scope.trigger("save"), TriggerResult::Ignored);
    assert!(button.state().is_idle());
}

#[tokio::test]
async fn test_buttons_without_id_are_not_registered() {
    let scope = ButtonScope::<String>::new();
    let mut button = AsyncButton::new("Save".to_string(), || async { anyhow::Ok(()) });
    button.mount(&scope);

    assert!(button.is_mounted());
    assert!(scope.registry().is_empty());
}

#[tokio::test]
async fn test_dropping_button_unregisters() {
    let scope = ButtonScope::<String>::new();
    {
        let mut button = AsyncButton::builder("Save".to_string())
            .id("save")
            .action(|_| async { anyhow::Ok(()) });
        button.mount(&scope);
        assert!(scope.registry().contains(&ButtonId::from("save")));
    }
    assert!(scope.registry().is_empty());
    assert_eq!(scope.trigger("save"), TriggerResult::NotMounted);
}

#[tokio::test]
async fn test_remount_moves_registration() {
    let first = ButtonScope::<String>::new();
    let second = ButtonScope::<String>::new();
    let mut button = AsyncButton::builder("Save".to_string())
        .id("save")
        .action(|_| async { anyhow::Ok(()) });

    button.mount(&first);
    button.mount(&second);

    assert_eq!(first.trigger("save"), TriggerResult::NotMounted);
    assert_eq!(second.trigger("save"), TriggerResult::Started);
    button.controller().settled().await;
}

#[tokio::test]
async fn test_child_scope_shares_registry() {
    let parent = ButtonScope::<String>::new();
    let child = parent.child().disabled_when_loading(true);
    let mut button = AsyncButton::builder("Save".to_string())
        .id("save")
        .action(|_| async { anyhow::Ok(()) });
    button.mount(&child);

    assert!(child.behavior().disabled_when_loading);
    assert!(!parent.behavior().disabled_when_loading);
    assert_eq!(parent.trigger("save"), TriggerResult::Started);
    button.controller().settled().await;
}

#[tokio::test]
async fn test_unmounting_overridden_button_keeps_newer_one() {
    let scope = ButtonScope::<String>::new();
    let mut first = AsyncButton::builder("Log in".to_string())
        .id("login")
        .action(|_| async { anyhow::Ok(()) });
    let mut second = AsyncButton::builder("Log in".to_string())
        .id("login")
        .action(|_| async { anyhow::Ok(()) });

    first.mount(&scope);
    second.mount(&scope);
    first.unmount();

    assert!(scope.registry().contains(&ButtonId::from("login")));
    assert_eq!(scope.trigger("login"), TriggerResult::Started);
    assert!(second.is_loading());
    assert!(first.state().is_idle());
    second.controller().settled().await;

    drop(second);
    assert!(scope.registry().is_empty());
}
