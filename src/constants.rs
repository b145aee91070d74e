//! Constants used throughout the library
//!
//! This module centralizes default values, glyphs and diagnostic messages
//! to improve maintainability and consistency.

// Estimated progress defaults
/// Fraction the estimated ticker advances toward but never passes
pub const ESTIMATED_PROGRESS_CEILING: f64 = 0.85;
/// Number of equal increments the ticker takes to reach the ceiling
pub const ESTIMATED_PROGRESS_STEPS: u32 = 100;
/// How long `ended()` holds after snapping to 1.0
pub const PROGRESS_SETTLE_MILLIS: u64 = 100;

// Terminal glyphs
pub const GLYPH_SPINNER: &str = "⠋";
pub const GLYPH_BAR_FILLED: &str = "█";
pub const GLYPH_BAR_EMPTY: &str = "░";
pub const GLYPH_FAILURE: &str = "✗";
pub const GLYPH_CANCEL: &str = "⊘";

/// Default width of the determinate progress bar in columns
pub const BAR_DEFAULT_WIDTH: u16 = 10;
/// Minimum bar width that still reads as a bar
pub const BAR_MIN_WIDTH: u16 = 3;
/// Maximum bar width
pub const BAR_MAX_WIDTH: u16 = 80;

// Diagnostics
pub const WARN_TRIGGER_NOT_MOUNTED: &str = "⚠️ Could not trigger button, it is not currently mounted";
pub const WARN_TRIGGER_OVERRIDDEN: &str = "⚠️ Registering a button with an already existing id, the previous one was overridden";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
