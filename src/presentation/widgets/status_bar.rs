//! Status bar widget.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::domain::ports::StatusSink;
use crate::domain::status::StatusMessage;
use crate::presentation::theme::Theme;

/// Status state shared between the connection manager and the screen.
#[derive(Debug, Clone, Default)]
pub struct StatusPanel {
    message: StatusMessage,
    submit_enabled: bool,
    updated_at: Option<DateTime<Local>>,
}

impl StatusPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(&self) -> &StatusMessage {
        &self.message
    }

    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }
}

impl StatusSink for StatusPanel {
    fn set_status(&mut self, message: StatusMessage) {
        self.message = message;
        self.updated_at = Some(Local::now());
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}

/// Renders a `StatusPanel`.
pub struct StatusBar<'a> {
    panel: &'a StatusPanel,
    theme: &'a Theme,
    timestamp_format: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(panel: &'a StatusPanel, theme: &'a Theme) -> Self {
        Self {
            panel,
            theme,
            timestamp_format: None,
        }
    }

    /// Shows when the status last changed, formatted with `format`.
    #[must_use]
    pub const fn timestamp(mut self, format: Option<&'a str>) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = self.panel.message();
        let style = Style::default()
            .fg(Theme::severity_color(message.severity))
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        if let (Some(format), Some(at)) = (self.timestamp_format, self.panel.updated_at()) {
            spans.push(Span::styled(
                format!("[{}] ", at.format(format)),
                self.theme.dimmed_style,
            ));
        }
        spans.push(Span::styled(message.text.as_str(), style));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title("Status");

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
