//! Configuration management for buttonkit
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    BAR_DEFAULT_WIDTH, BAR_MAX_WIDTH, BAR_MIN_WIDTH, CONFIG_GENERATED, ESTIMATED_PROGRESS_CEILING,
    ESTIMATED_PROGRESS_STEPS, PROGRESS_SETTLE_MILLIS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub behavior: BehaviorConfig,
    pub progress: ProgressConfig,
    pub style: StyleConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

/// How buttons react while loading
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Report loading buttons as disabled
    pub disabled_when_loading: bool,
    /// Let presses reach loading buttons
    pub allows_hit_testing_when_loading: bool,
}

/// Tuning of the estimated progress reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Highest fraction reached before the work actually ends (0.0 - 1.0)
    pub estimated_ceiling: f64,
    /// Number of increments used to reach the ceiling
    pub estimated_steps: u32,
    /// Milliseconds to hold the completed state before tearing it down
    pub settle_millis: u64,
}

/// Loading state presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStyleKind {
    #[default]
    Overlay,
    Leading,
    Trailing,
    None,
}

/// Failure presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThrowableStyleKind {
    #[default]
    Shake,
    Mark,
    None,
}

/// Terminal style configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Options: "overlay", "leading", "trailing", "none"
    pub async_style: AsyncStyleKind,
    /// Options: "shake", "mark", "none"
    pub throwable_style: ThrowableStyleKind,
    /// Width of determinate progress bars in columns
    pub bar_width: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to the log file
    pub enabled: bool,
    /// Options: "off", "error", "warn", "info", "debug", "trace"
    pub level: String,
}

/// Demo binary configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Print button events as JSON lines
    pub json_events: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            estimated_ceiling: ESTIMATED_PROGRESS_CEILING,
            estimated_steps: ESTIMATED_PROGRESS_STEPS,
            settle_millis: PROGRESS_SETTLE_MILLIS,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            async_style: AsyncStyleKind::default(),
            throwable_style: ThrowableStyleKind::default(),
            bar_width: BAR_DEFAULT_WIDTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("buttonkit.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("buttonkit").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let ceiling = self.progress.estimated_ceiling;
        if !(ceiling > 0.0 && ceiling < 1.0) {
            anyhow::bail!("estimated_ceiling must be strictly between 0 and 1, got {}", ceiling);
        }

        if self.progress.estimated_steps == 0 {
            anyhow::bail!("estimated_steps must be at least 1");
        }

        // Holding the completed state longer than a few seconds reads as a hang
        if self.progress.settle_millis > 5_000 {
            anyhow::bail!("settle_millis cannot exceed 5000, got {}", self.progress.settle_millis);
        }

        if self.style.bar_width < BAR_MIN_WIDTH || self.style.bar_width > BAR_MAX_WIDTH {
            anyhow::bail!(
                "bar_width must be between {} and {} columns, got {}",
                BAR_MIN_WIDTH,
                BAR_MAX_WIDTH,
                self.style.bar_width
            );
        }

        if let Err(e) = self.logging.level.parse::<log::LevelFilter>() {
            anyhow::bail!("Invalid logging level '{}': {}", self.logging.level, e);
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# buttonkit Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("buttonkit"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
