//! Time-of-day input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

const TIME_INPUT_MAX_LEN: usize = 5;

/// `HH:MM` input field. Accepts digits and `:` only.
#[derive(Debug, Clone)]
pub struct TimeInput {
    value: String,
    cursor: usize,
    focused: bool,
    label: String,
}

impl TimeInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            label: label.into(),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Inserts character at cursor. Returns whether it was accepted.
    pub fn input_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == ':') || self.value.len() >= TIME_INPUT_MAX_LEN {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.value.remove(self.cursor);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }
}

/// Renders a `TimeInput` with the active theme.
pub struct TimeInputView<'a> {
    input: &'a TimeInput,
    theme: &'a Theme,
}

impl<'a> TimeInputView<'a> {
    #[must_use]
    pub const fn new(input: &'a TimeInput, theme: &'a Theme) -> Self {
        Self { input, theme }
    }
}

impl Widget for TimeInputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.input.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let (display, text_style) = if self.input.value.is_empty() {
            ("HH:MM", self.theme.placeholder_style)
        } else {
            (self.input.value.as_str(), self.theme.base_style)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.input.label.as_str());

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(display).style(text_style).render(inner, buf);

        if self.input.focused && inner.width > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + self.input.cursor as u16;
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_input_basic() {
        let mut input = TimeInput::new("ON");
        assert!(input.value().is_empty());

        for c in "08:30".chars() {
            assert!(input.input_char(c));
        }
        assert_eq!(input.value(), "08:30");

        input.backspace();
        assert_eq!(input.value(), "08:3");
    }

    #[test]
    fn test_rejects_letters_and_overflow() {
        let mut input = TimeInput::new("OFF");
        assert!(!input.input_char('a'));
        input.set_value("20:00");
        assert!(!input.input_char('1'));
        assert_eq!(input.value(), "20:00");
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = TimeInput::new("ON");
        input.set_value("0830");
        input.move_left();
        input.move_left();
        assert!(input.input_char(':'));
        assert_eq!(input.value(), "08:30");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "8:30");
    }
}
