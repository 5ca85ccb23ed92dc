use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

const LABEL: &str = "Set Schedule";

/// Submit control. Rendered dimmed while disabled.
pub struct SubmitButton<'a> {
    theme: &'a Theme,
    enabled: bool,
    focused: bool,
}

impl<'a> SubmitButton<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            enabled: false,
            focused: false,
        }
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SubmitButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (style, label) = if self.enabled {
            (self.theme.button_style, format!(" {LABEL} "))
        } else {
            (self.theme.button_disabled_style, format!(" {LABEL} (waiting) "))
        };
        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .render(area, buf);
    }
}
