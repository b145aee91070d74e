use crate::constants::{GLYPH_BAR_EMPTY, GLYPH_BAR_FILLED, GLYPH_SPINNER};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// How a determinate fraction is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressIndicator {
    #[default]
    Bar,
    Percent,
}

/// Indeterminate progress glyph
#[must_use]
pub fn spinner() -> Span<'static> {
    Span::styled(GLYPH_SPINNER, Style::default().fg(Color::Cyan))
}

/// Determinate progress bar of `width` columns
#[must_use]
pub fn bar(fraction: f64, width: u16) -> Span<'static> {
    let width = usize::from(width);
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Span::styled(
        format!("{}{}", GLYPH_BAR_FILLED.repeat(filled), GLYPH_BAR_EMPTY.repeat(width - filled)),
        Style::default().fg(Color::Green),
    )
}

/// Determinate progress as a right-aligned percentage, e.g. ` 42%`
#[must_use]
pub fn percent(fraction: f64) -> Span<'static> {
    let value = (fraction.clamp(0.0, 1.0) * 100.0).round() as u32;
    Span::styled(format!("{value:>3}%"), Style::default().fg(Color::Green))
}

/// Spinner when indeterminate, `indicator` otherwise
#[must_use]
pub fn progress(fraction: Option<f64>, indicator: ProgressIndicator, bar_width: u16) -> Span<'static> {
    match (fraction, indicator) {
        (None, _) => spinner(),
        (Some(fraction), ProgressIndicator::Bar) => bar(fraction, bar_width),
        (Some(fraction), ProgressIndicator::Percent) => percent(fraction),
    }
}

/// The text of a line without any styling.
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
