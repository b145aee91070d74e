use buttonkit::config::{AsyncStyleKind, Config, ThrowableStyleKind};
use buttonkit::constants::{BAR_DEFAULT_WIDTH, ESTIMATED_PROGRESS_CEILING};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("buttonkit-test-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.behavior.disabled_when_loading);
    assert!(!config.behavior.allows_hit_testing_when_loading);
    assert_eq!(config.progress.estimated_ceiling, ESTIMATED_PROGRESS_CEILING);
    assert_eq!(config.progress.estimated_steps, 100);
    assert_eq!(config.progress.settle_millis, 100);
    assert_eq!(config.style.async_style, AsyncStyleKind::Overlay);
    assert_eq!(config.style.throwable_style, ThrowableStyleKind::Shake);
    assert_eq!(config.style.bar_width, BAR_DEFAULT_WIDTH);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(!config.demo.json_events);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // A ceiling of 1.0 would let the estimate claim completion
    config.progress.estimated_ceiling = 1.0;
    assert!(config.validate().is_err());

    config.progress.estimated_ceiling = 0.9;
    config.progress.estimated_steps = 0;
    assert!(config.validate().is_err());

    config.progress.estimated_steps = 50;
    config.progress.settle_millis = 10_000;
    assert!(config.validate().is_err());

    config.progress.settle_millis = 0;
    config.style.bar_width = 2;
    assert!(config.validate().is_err());

    config.style.bar_width = 20;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("async_style = \"overlay\""));
    assert!(toml_str.contains("throwable_style = \"shake\""));
    assert!(toml_str.contains("estimated_steps = 100"));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[behavior]
disabled_when_loading = true

[style]
async_style = "trailing"
throwable_style = "mark"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert!(config.behavior.disabled_when_loading);
    assert_eq!(config.style.async_style, AsyncStyleKind::Trailing);
    assert_eq!(config.style.throwable_style, ThrowableStyleKind::Mark);
    assert!(config.logging.enabled);

    assert!(!config.behavior.allows_hit_testing_when_loading);
    assert_eq!(config.style.bar_width, BAR_DEFAULT_WIDTH);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.progress.estimated_steps, 100);
}

#[test]
fn test_unknown_style_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[style]\nasync_style = \"sparkles\"\n");
    assert!(result.is_err());
}

#[test]
fn test_load_from_file_validates() {
    let path = temp_path("config.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[progress]\nestimated_ceiling = 1.5\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("estimated_ceiling"));

    std::fs::write(&path, "[style]\nbar_width = 24\n").unwrap();
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.style.bar_width, 24);

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_load_missing_file_fails() {
    assert!(Config::load_from_file(temp_path("absent.toml")).is_err());
}

#[test]
fn test_generate_default_config() {
    let path = temp_path("nested/config.toml");
    Config::generate_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# buttonkit Configuration File"));

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.style.async_style, AsyncStyleKind::Overlay);

    std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap()).unwrap();
}

#[test]
fn test_default_config_path() {
    if let Ok(path) = Config::get_default_config_path() {
        assert!(path.ends_with("buttonkit/config.toml"));
    }
}
