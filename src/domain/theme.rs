//! Light/dark theme preference.

use serde::{Deserialize, Serialize};

/// Color scheme selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl ThemeMode {
    /// Picks the saved preference, otherwise follows the environment.
    #[must_use]
    pub const fn resolve(saved: Option<Self>, prefers_dark: bool) -> Self {
        match saved {
            Some(mode) => mode,
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }

    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(ThemeMode::Dark), false, ThemeMode::Dark ; "saved_dark_wins")]
    #[test_case(Some(ThemeMode::Light), true, ThemeMode::Light ; "saved_light_wins")]
    #[test_case(None, true, ThemeMode::Dark ; "prefers_dark")]
    #[test_case(None, false, ThemeMode::Light ; "no_preference")]
    fn test_resolve(saved: Option<ThemeMode>, prefers_dark: bool, expected: ThemeMode) {
        assert_eq!(ThemeMode::resolve(saved, prefers_dark), expected);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
