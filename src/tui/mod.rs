//! Terminal presentation of buttons with ratatui.
//!
//! Buttons render to a single [`Line`]. The styles here only draw static
//! glyphs, the host application decides how often to redraw.

pub mod async_styles;
pub mod indicator;
pub mod throwable_styles;

pub use async_styles::{LeadingAsyncStyle, OverlayAsyncStyle, TrailingAsyncStyle};
pub use indicator::{plain_text, ProgressIndicator};
pub use throwable_styles::{MarkThrowableStyle, ShakeThrowableStyle};

use crate::config::{AsyncStyleKind, Config, ThrowableStyleKind};
use crate::scope::{ButtonBehavior, ButtonScope};
use crate::style::{PlainAsyncButtonStyle, PlainThrowableButtonStyle};
use ratatui::text::Line;

pub type TerminalScope = ButtonScope<Line<'static>>;

/// Overlay progress bar and shake on failure.
pub fn default_scope() -> TerminalScope {
    ButtonScope::new()
        .with_async_style(OverlayAsyncStyle::default())
        .with_throwable_style(ShakeThrowableStyle)
}

/// Scope with the styles and behavior selected in the configuration.
pub fn scope_from_config(config: &Config) -> TerminalScope {
    let bar_width = config.style.bar_width;
    let scope = ButtonScope::new().with_behavior(ButtonBehavior::from(&config.behavior));

    let scope = match config.style.async_style {
        AsyncStyleKind::Overlay => scope.with_async_style(OverlayAsyncStyle {
            indicator: ProgressIndicator::Bar,
            bar_width,
        }),
        AsyncStyleKind::Leading => scope.with_async_style(LeadingAsyncStyle),
        AsyncStyleKind::Trailing => scope.with_async_style(TrailingAsyncStyle {
            indicator: ProgressIndicator::Bar,
            bar_width,
        }),
        AsyncStyleKind::None => scope.with_async_style(PlainAsyncButtonStyle),
    };

    match config.style.throwable_style {
        ThrowableStyleKind::Shake => scope.with_throwable_style(ShakeThrowableStyle),
        ThrowableStyleKind::Mark => scope.with_throwable_style(MarkThrowableStyle),
        ThrowableStyleKind::None => scope.with_throwable_style(PlainThrowableButtonStyle),
    }
}
