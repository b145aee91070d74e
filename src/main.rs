use anyhow::Result;
use buttonkit::button::{AsyncButton, Component, StateChangedEvent};
use buttonkit::config::Config;
use buttonkit::constants::GLYPH_CANCEL;
use buttonkit::logger::Logger;
use buttonkit::progress::{BridgedProgress, DiscreteProgress, EstimatedProgress, ExternalProgress, TaskProgress};
use buttonkit::tui::{self, plain_text, TerminalScope};
use ratatui::text::Line;
use std::sync::Arc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(120);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let logger = Logger::from_config(&config.logging)?;
    logger.install()?;

    let scope = tui::scope_from_config(&config);
    if config.demo.json_events {
        scope.events().on_state_change(|event| println!("{}", event_json(event)));
    }

    println!("📦 Discrete progress");
    download(&scope).await?;

    println!("\n⏱  Estimated progress");
    estimated(&scope, &config).await;

    println!("\n🔗 Bridged progress");
    bridged(&scope).await;

    println!("\n💥 Failing action");
    failing(&scope).await;

    println!("\n🎯 Trigger by id");
    trigger(&scope).await;

    println!("\n{GLYPH_CANCEL} Cancellation");
    cancel(&scope).await;

    if logger.is_enabled() {
        if let Ok(path) = Logger::get_log_file_path() {
            println!("\n📝 Logs written to {}", path.display());
        }
    }

    Ok(())
}

async fn download(scope: &TerminalScope) -> Result<()> {
    let mut button = AsyncButton::builder(Line::from("Download"))
        .id("download")
        .progress(DiscreteProgress::new(20)?)
        .action(|context| async move {
            for _ in 0..20 {
                tokio::time::sleep(Duration::from_millis(40)).await;
                context.progress().increment()?;
            }
            anyhow::Ok(())
        });
    button.mount(scope);

    button.perform();
    frames(&button).await;
    Ok(())
}

async fn estimated(scope: &TerminalScope, config: &Config) {
    let mut button = AsyncButton::builder(Line::from("Compile"))
        .progress(EstimatedProgress::from_config(&config.progress, Duration::from_secs(1)))
        .action(|_| async move {
            tokio::time::sleep(Duration::from_millis(700)).await;
            anyhow::Ok(())
        });
    button.mount(scope);

    button.perform();
    frames(&button).await;
}

async fn bridged(scope: &TerminalScope) {
    let mut button = AsyncButton::builder(Line::from("Extract"))
        .progress(BridgedProgress::new())
        .action(|context| async move {
            let source = Arc::new(ExternalProgress::new(8));
            context.progress().bridge(source.receiver());
            for _ in 0..8 {
                tokio::time::sleep(Duration::from_millis(60)).await;
                source.increment();
            }
            anyhow::Ok(())
        });
    button.mount(scope);

    button.perform();
    frames(&button).await;
}

async fn failing(scope: &TerminalScope) {
    let mut button = AsyncButton::new(Line::from("Sync"), || async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Err::<(), _>(anyhow::anyhow!("server unreachable"))
    });
    button.mount(scope);

    for _ in 0..3 {
        button.press();
        button.controller().settled().await;
        println!("  {:<10} │ {}", button.state().label(), plain_text(&button.render()));
    }
}

async fn trigger(scope: &TerminalScope) {
    let mut login = AsyncButton::builder(Line::from("Log in"))
        .id("login")
        .on_state_change(|state| println!("  login is now {}", state.label()))
        .action(|_| async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            anyhow::Ok(())
        });
    login.mount(scope);

    println!("  trigger(login)   -> {:?}", scope.trigger("login"));
    println!("  trigger(login)   -> {:?}", scope.trigger("login"));
    println!("  trigger(missing) -> {:?}", scope.trigger("missing"));
    login.controller().settled().await;
}

async fn cancel(scope: &TerminalScope) {
    let mut button = AsyncButton::builder(Line::from("Upload")).action(|context| async move {
        context.cancellable(tokio::time::sleep(Duration::from_secs(10))).await?;
        anyhow::Ok(())
    });
    button.mount(scope);

    button.perform();
    tokio::time::sleep(Duration::from_millis(300)).await;
    button.snapshot().cancel.call();
    button.controller().join().await;
    println!("  {:<10} │ {}", button.state().label(), plain_text(&button.render()));
}

async fn frames<P: TaskProgress>(button: &AsyncButton<P, Line<'static>>) {
    loop {
        let frame = button.render();
        println!("  {:<10} │ {}", button.state().label(), plain_text(&frame));
        if !button.is_loading() {
            break;
        }
        tokio::time::sleep(FRAME).await;
    }
}

fn event_json(event: &StateChangedEvent) -> String {
    serde_json::json!({
        "button": event.button_id,
        "state": event.state.label(),
        "time": event.time.to_rfc3339(),
        "error": event.state.error().map(ToString::to_string),
    })
    .to_string()
}
