//! Schedule form screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::domain::connection::ConnectionState;
use crate::domain::schedule::Schedule;
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{StatusBar, StatusPanel, SubmitButton, TimeInput, TimeInputView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFocus {
    OnTime,
    OffTime,
    Submit,
}

impl ScheduleFocus {
    const fn next(self) -> Self {
        match self {
            Self::OnTime => Self::OffTime,
            Self::OffTime => Self::Submit,
            Self::Submit => Self::OnTime,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::OnTime => Self::Submit,
            Self::OffTime => Self::OnTime,
            Self::Submit => Self::OffTime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleAction {
    None,
    Submit(Schedule),
    ToggleTheme,
    Reconnect,
    Quit,
}

/// ON/OFF time form.
pub struct ScheduleScreen {
    on_input: TimeInput,
    off_input: TimeInput,
    focus: ScheduleFocus,
}

impl ScheduleScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut on_input = TimeInput::new(" ON time ");
        on_input.set_focused(true);

        Self {
            on_input,
            off_input: TimeInput::new(" OFF time "),
            focus: ScheduleFocus::OnTime,
        }
    }

    #[must_use]
    pub const fn focus(&self) -> ScheduleFocus {
        self.focus
    }

    /// Returns the schedule currently entered in the form.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.on_input.value(), self.off_input.value())
    }

    fn set_focus(&mut self, focus: ScheduleFocus) {
        self.focus = focus;
        self.on_input.set_focused(focus == ScheduleFocus::OnTime);
        self.off_input.set_focused(focus == ScheduleFocus::OffTime);
    }

    fn focused_input(&mut self) -> Option<&mut TimeInput> {
        match self.focus {
            ScheduleFocus::OnTime => Some(&mut self.on_input),
            ScheduleFocus::OffTime => Some(&mut self.off_input),
            ScheduleFocus::Submit => None,
        }
    }

    /// Handles key event, returns action.
    ///
    /// `Enter` only yields a submission while `submit_enabled` is set.
    pub fn handle_key(&mut self, key: KeyEvent, submit_enabled: bool) -> ScheduleAction {
        if EventHandler::is_quit_event(&key) {
            return ScheduleAction::Quit;
        }
        if EventHandler::is_theme_toggle_event(&key) {
            return ScheduleAction::ToggleTheme;
        }
        if EventHandler::is_reconnect_event(&key) {
            return ScheduleAction::Reconnect;
        }
        if EventHandler::is_submit_event(&key) {
            return if submit_enabled {
                ScheduleAction::Submit(self.schedule())
            } else {
                ScheduleAction::None
            };
        }
        if EventHandler::is_focus_next_event(&key) {
            self.set_focus(self.focus.next());
            return ScheduleAction::None;
        }
        if EventHandler::is_focus_prev_event(&key) {
            self.set_focus(self.focus.prev());
            return ScheduleAction::None;
        }

        let Some(input) = self.focused_input() else {
            return ScheduleAction::None;
        };
        match key.code {
            KeyCode::Char(c) => {
                input.input_char(c);
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => {}
        }

        ScheduleAction::None
    }
}

impl Default for ScheduleScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the schedule form together with the status line.
pub struct ScheduleView<'a> {
    pub screen: &'a ScheduleScreen,
    pub panel: &'a StatusPanel,
    pub theme: &'a Theme,
    pub state: ConnectionState,
    pub endpoint: &'a str,
    pub timestamp_format: Option<&'a str>,
}

impl ScheduleView<'_> {
    fn render_hints(&self, area: Rect, buf: &mut Buffer) {
        let key_style = self.theme.dimmed_style.add_modifier(Modifier::BOLD);
        let hints = [
            ("Tab", "Focus"),
            ("Enter", "Set schedule"),
            ("Ctrl+T", "Theme"),
            ("Ctrl+R", "Reconnect"),
            ("Esc", "Quit"),
        ];

        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", self.theme.dimmed_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(": {label}"), self.theme.dimmed_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

impl Widget for ScheduleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base_style);

        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(56),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);
        buf.set_style(content_area, self.theme.base_style);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(" Relay Scheduler ")
            .title_bottom(Line::from(format!(" {} · {} ", self.endpoint, self.state)).right_aligned());

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [inputs_area, _, button_area, status_area, hints_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(inner);

        let [on_area, off_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inputs_area);
        TimeInputView::new(&self.screen.on_input, self.theme).render(on_area, buf);
        TimeInputView::new(&self.screen.off_input, self.theme).render(off_area, buf);

        SubmitButton::new(self.theme)
            .enabled(self.panel.submit_enabled())
            .focused(self.screen.focus == ScheduleFocus::Submit)
            .render(button_area, buf);

        StatusBar::new(self.panel, self.theme)
            .timestamp(self.timestamp_format)
            .render(status_area, buf);

        self.render_hints(hints_area, buf);
    }
}
