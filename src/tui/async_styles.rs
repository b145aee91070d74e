//! Loading state styles for terminal buttons.

use super::indicator::{self, ProgressIndicator};
use crate::constants::BAR_DEFAULT_WIDTH;
use crate::style::{AsyncButtonStyle, AsyncLabelConfiguration};
use ratatui::text::{Line, Span};

/// Replaces the label with the progress while loading, keeping the label's
/// width so the button does not jump around.
#[derive(Debug, Clone, Copy)]
pub struct OverlayAsyncStyle {
    pub indicator: ProgressIndicator,
    pub bar_width: u16,
}

impl Default for OverlayAsyncStyle {
    fn default() -> Self {
        Self {
            indicator: ProgressIndicator::Bar,
            bar_width: BAR_DEFAULT_WIDTH,
        }
    }
}

impl AsyncButtonStyle<Line<'static>> for OverlayAsyncStyle {
    fn make_label(&self, configuration: AsyncLabelConfiguration<Line<'static>>) -> Line<'static> {
        let label = configuration.label;
        if !configuration.is_loading {
            return label;
        }

        let progress = indicator::progress(configuration.fraction_completed, self.indicator, self.bar_width);
        let total = label.width().max(progress.width());
        let left = (total - progress.width()) / 2;
        let right = total - progress.width() - left;

        let mut line = Line::from(vec![Span::raw(" ".repeat(left)), progress, Span::raw(" ".repeat(right))]);
        line.style = label.style;
        line
    }
}

/// Shows the progress before the label while loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingAsyncStyle;

impl AsyncButtonStyle<Line<'static>> for LeadingAsyncStyle {
    fn make_label(&self, configuration: AsyncLabelConfiguration<Line<'static>>) -> Line<'static> {
        let mut label = configuration.label;
        if configuration.is_loading {
            let progress = indicator::progress(configuration.fraction_completed, ProgressIndicator::Percent, 0);
            label.spans.splice(0..0, [progress, Span::raw(" ")]);
        }
        label
    }
}

/// Shows the progress after the label while loading.
#[derive(Debug, Clone, Copy)]
pub struct TrailingAsyncStyle {
    pub indicator: ProgressIndicator,
    pub bar_width: u16,
}

impl Default for TrailingAsyncStyle {
    fn default() -> Self {
        Self {
            indicator: ProgressIndicator::Percent,
            bar_width: BAR_DEFAULT_WIDTH,
        }
    }
}

impl AsyncButtonStyle<Line<'static>> for TrailingAsyncStyle {
    fn make_label(&self, configuration: AsyncLabelConfiguration<Line<'static>>) -> Line<'static> {
        let mut label = configuration.label;
        if configuration.is_loading {
            let progress = indicator::progress(configuration.fraction_completed, self.indicator, self.bar_width);
            label.spans.push(Span::raw(" "));
            label.spans.push(progress);
        }
        label
    }
}
