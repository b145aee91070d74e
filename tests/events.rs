use buttonkit::button::{
    ActionState, AsyncButton, ButtonEvents, ButtonId, Completion, Component, StateChangedEvent,
};
use buttonkit::scope::ButtonScope;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_stale_events_are_dropped() {
    let events = ButtonEvents::new();
    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&delivered);
    events.on_state_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let older = StateChangedEvent::new(ButtonId::from("a"), ActionState::Idle);
    let newer = StateChangedEvent::new(ButtonId::from("b"), ActionState::Ended(Completion::Completed));
    assert!(newer.is_newer_than(&older));
    assert!(!older.is_newer_than(&newer));

    assert!(events.deliver(newer.clone()));
    assert!(!events.deliver(older));
    // Duplicates are not newer either
    assert!(!events.deliver(newer));

    assert_eq!(delivered.load(Ordering::SeqCst), 1);
    assert_eq!(events.latest().unwrap().button_id, ButtonId::from("b"));
}

#[test]
fn test_error_handlers_only_see_errors() {
    let events = ButtonEvents::new();
    let errors = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&errors);
    events.on_error(move |event| seen.lock().unwrap().push(event.button_id.clone()));

    events.deliver(StateChangedEvent::new(
        ButtonId::from("ok"),
        ActionState::Ended(Completion::Completed),
    ));
    events.deliver(StateChangedEvent::new(
        ButtonId::from("failed"),
        ActionState::Ended(Completion::Errored {
            error: anyhow::anyhow!("boom").into(),
            number_of_failures: 1,
        }),
    ));

    assert_eq!(*errors.lock().unwrap(), vec![ButtonId::from("failed")]);
}

#[tokio::test]
async fn test_scope_bus_collects_all_buttons() {
    let scope = ButtonScope::<String>::new();
    let states = Arc::new(Mutex::new(Vec::new()));
    let errors = Arc::new(Mutex::new(Vec::new()));
    let seen_states = Arc::clone(&states);
    let seen_errors = Arc::clone(&errors);
    scope.events().on_state_change(move |event| {
        seen_states
            .lock()
            .unwrap()
            .push((event.button_id.to_string(), event.state.label()))
    });
    scope.events().on_error(move |event| seen_errors.lock().unwrap().push(event.error.to_string()));

    let mut save = AsyncButton::builder("Save".to_string())
        .id("save")
        .action(|_| async { anyhow::Ok(()) });
    let mut sync = AsyncButton::builder("Sync".to_string())
        .id("sync")
        .action(|_| async { Err::<(), _>(anyhow::anyhow!("offline")) });
    save.mount(&scope);
    sync.mount(&scope);

    save.perform();
    save.controller().settled().await;
    sync.perform();
    sync.controller().settled().await;

    assert_eq!(
        *states.lock().unwrap(),
        vec![
            ("save".to_string(), "started"),
            ("save".to_string(), "completed"),
            ("sync".to_string(), "started"),
            ("sync".to_string(), "errored"),
        ]
    );
    assert_eq!(*errors.lock().unwrap(), vec!["offline".to_string()]);
}

#[tokio::test]
async fn test_task_started_and_ended_hooks() {
    let scope = ButtonScope::<String>::new();
    let started = Arc::new(Mutex::new(Vec::new()));
    let ended = Arc::new(Mutex::new(Vec::new()));
    let seen_started = Arc::clone(&started);
    let seen_ended = Arc::clone(&ended);
    scope
        .events()
        .on_task_started(move |id, task| seen_started.lock().unwrap().push((id.clone(), task.is_cancelled())));
    scope
        .events()
        .on_task_ended(move |id, completion| seen_ended.lock().unwrap().push((id.clone(), completion.clone())));

    let mut button = AsyncButton::builder("Upload".to_string())
        .id(7u64)
        .action(|context| async move {
            context.cancelled().await;
            anyhow::Ok(())
        });
    button.mount(&scope);

    button.perform();
    button.cancel();
    button.controller().join().await;

    assert_eq!(*started.lock().unwrap(), vec![(ButtonId::Numeric(7), false)]);
    assert_eq!(*ended.lock().unwrap(), vec![(ButtonId::Numeric(7), Completion::Cancelled)]);
}

#[tokio::test]
async fn test_unmounted_button_does_not_publish() {
    let scope = ButtonScope::<String>::new();
    let button = AsyncButton::new("Save".to_string(), || async { anyhow::Ok(()) });

    button.perform();
    button.controller().settled().await;
    assert!(scope.events().latest().is_none());
}
