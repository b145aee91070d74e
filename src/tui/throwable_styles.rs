//! Failure styles for terminal buttons.

use crate::constants::GLYPH_FAILURE;
use crate::style::{ThrowableButtonConfiguration, ThrowableButtonStyle, ThrowableLabelConfiguration};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Nudges the button one column sideways on every new failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakeThrowableStyle;

impl ThrowableButtonStyle<Line<'static>> for ShakeThrowableStyle {
    fn make_button(&self, configuration: ThrowableButtonConfiguration<Line<'static>>) -> Line<'static> {
        let mut button = configuration.button;
        match configuration.number_of_failures {
            0 => {}
            n if n % 2 == 1 => button.spans.insert(0, Span::raw(" ")),
            _ => button.spans.push(Span::raw(" ")),
        }
        button
    }
}

/// Prefixes the label with a failure mark after an error, with the failure
/// count once it failed more than once.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkThrowableStyle;

impl ThrowableButtonStyle<Line<'static>> for MarkThrowableStyle {
    fn make_label(&self, configuration: ThrowableLabelConfiguration<Line<'static>>) -> Line<'static> {
        let mut label = configuration.label;
        if configuration.latest_error.is_none() {
            return label;
        }

        let mark = match configuration.number_of_failures {
            0 | 1 => format!("{GLYPH_FAILURE} "),
            n => format!("{GLYPH_FAILURE}{n} "),
        };
        let style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        label.spans.insert(0, Span::styled(mark, style));
        label
    }
}
