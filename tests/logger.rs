use buttonkit::config::LoggingConfig;
use buttonkit::logger::Logger;

fn config(enabled: bool, level: &str) -> LoggingConfig {
    LoggingConfig {
        enabled,
        level: level.to_string(),
    }
}

#[test]
fn test_logger_from_config() {
    let logger = Logger::from_config(&config(false, "debug")).unwrap();
    assert!(!logger.is_enabled());
    assert_eq!(logger.level(), log::LevelFilter::Debug);

    assert!(Logger::from_config(&config(false, "chatty")).is_err());
}

#[test]
fn test_memory_logs_newest_first() {
    let logger = Logger::from_config(&LoggingConfig::default()).unwrap();
    logger.push("first".to_string());
    logger.push("second".to_string());

    assert_eq!(logger.get_logs(), vec!["second".to_string(), "first".to_string()]);

    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_memory_logs_are_bounded() {
    let logger = Logger::from_config(&LoggingConfig::default()).unwrap();
    for i in 0..510 {
        logger.push(format!("message {i}"));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 500);
    assert_eq!(logs[0], "message 509");
    assert_eq!(logs[499], "message 10");
}

#[test]
fn test_install_captures_records() {
    let logger = Logger::from_config(&config(false, "info")).unwrap();
    assert!(logger.install().unwrap());

    log::info!("button save started");
    log::debug!("filtered out");

    let logs = logger.get_logs();
    assert!(logs.iter().any(|line| line.contains("button save started") && line.contains("INFO")));
    assert!(!logs.iter().any(|line| line.contains("filtered out")));

    // Only the first installation takes effect
    let other = Logger::from_config(&config(false, "trace")).unwrap();
    assert!(!other.install().unwrap());
}

#[test]
fn test_log_file_path() {
    if let Ok(path) = Logger::get_log_file_path() {
        assert!(path.ends_with("buttonkit/buttonkit.log"));
    }
}
