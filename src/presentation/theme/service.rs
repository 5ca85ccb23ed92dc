use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

use crate::domain::status::Severity;
use crate::domain::theme::ThemeMode;

const ORANGE: Color = Color::Indexed(208);
const NEUTRAL_GRAY: Color = Color::Rgb(0x66, 0x66, 0x66);

/// Resolved styles for one theme mode.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub mode: ThemeMode,
    pub base_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub dimmed_style: Style,
    pub placeholder_style: Style,
    pub button_style: Style,
    pub button_disabled_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

impl Theme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let (fg, bg, accent, dimmed) = match mode {
            ThemeMode::Light => (
                Color::Rgb(0x22, 0x22, 0x22),
                Color::Rgb(0xf5, 0xf5, 0xf5),
                Color::Rgb(0x1e, 0x66, 0xf5),
                Color::Rgb(0x88, 0x88, 0x88),
            ),
            ThemeMode::Dark => (
                Color::Rgb(0xe6, 0xe6, 0xe6),
                Color::Rgb(0x1e, 0x1e, 0x2e),
                Color::Rgb(0x89, 0xb4, 0xfa),
                Color::Rgb(0x6c, 0x70, 0x86),
            ),
        };

        Self {
            mode,
            base_style: Style::default().fg(fg).bg(bg),
            border_style: Style::default().fg(dimmed),
            focused_border_style: Style::default().fg(accent),
            dimmed_style: Style::default().fg(dimmed),
            placeholder_style: Style::default().fg(dimmed).add_modifier(Modifier::ITALIC),
            button_style: Style::default()
                .fg(bg)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(dimmed).add_modifier(Modifier::DIM),
        }
    }

    /// Maps a status severity to its display color.
    #[must_use]
    pub const fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Info => Color::Blue,
            Severity::Warning => ORANGE,
            Severity::Default => NEUTRAL_GRAY,
        }
    }
}

/// Returns whether the terminal reports a dark background.
///
/// Terminals that do not answer the background query within `timeout` are
/// treated as having no preference.
#[must_use]
pub fn prefers_dark(timeout: std::time::Duration) -> bool {
    match termbg::theme(timeout) {
        Ok(termbg::Theme::Dark) => true,
        Ok(termbg::Theme::Light) => false,
        Err(e) => {
            debug!(error = ?e, "Terminal background detection failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Severity::Success, Color::Green ; "success_green")]
    #[test_case(Severity::Error, Color::Red ; "error_red")]
    #[test_case(Severity::Info, Color::Blue ; "info_blue")]
    #[test_case(Severity::Warning, Color::Indexed(208) ; "warning_orange")]
    #[test_case(Severity::Default, Color::Rgb(0x66, 0x66, 0x66) ; "default_gray")]
    fn test_severity_color(severity: Severity, expected: Color) {
        assert_eq!(Theme::severity_color(severity), expected);
    }

    #[test]
    fn test_modes_differ() {
        let light = Theme::new(ThemeMode::Light);
        let dark = Theme::new(ThemeMode::Dark);

        assert_eq!(light.mode, ThemeMode::Light);
        assert_ne!(light.base_style.bg, dark.base_style.bg);
        assert_ne!(light.focused_border_style, dark.focused_border_style);
    }
}
