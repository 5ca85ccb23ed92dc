//! Status messages shown to the user.

/// Severity of a status message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information.
    #[default]
    Default,
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Informational update.
    Info,
    /// Degraded but recovering.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Single status line with its severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    /// Text to display.
    pub text: String,
    /// Severity classification.
    pub severity: Severity,
}

impl StatusMessage {
    /// Creates a status message.
    #[must_use]
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// Creates a default-severity message.
    #[must_use]
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Default)
    }

    /// Creates a success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    /// Creates an info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    /// Creates a warning message.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning)
    }
}
