use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use once_cell::sync::OnceCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Records kept in memory for display.
const MEMORY_CAPACITY: usize = 500;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Logging backend for the `log` facade, built on fern.
///
/// Every record is kept in a bounded in-memory tail so a UI can show recent
/// diagnostics. When logging is enabled in the configuration, records are also
/// appended to the log file.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    level: LevelFilter,
    enabled: bool,
}

impl Logger {
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let level = config
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid logging level '{}'", config.level))?;

        Ok(Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(MEMORY_CAPACITY))),
            level,
            enabled: config.enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Install this logger as the global `log` backend.
    ///
    /// Only the first installation in a process takes effect, later calls
    /// return `Ok(false)`.
    pub fn install(&self) -> Result<bool> {
        if INSTALLED.get().is_some() {
            return Ok(false);
        }

        let memory = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {} - {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .chain(fern::Output::call(move |record| {
                memory.push(record.args().to_string());
            }));

        if self.enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        dispatch.apply().context("A global logger is already set")?;
        let _ = INSTALLED.set(());
        Ok(true)
    }

    /// Add a log entry
    pub fn push(&self, message: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == MEMORY_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Location of the log file under the platform cache directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join("buttonkit").join("buttonkit.log"))
    }
}
