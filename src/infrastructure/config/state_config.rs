use serde::{Deserialize, Serialize};

use crate::domain::theme::ThemeMode;

/// Locally persisted UI state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Theme chosen with the toggle. Unset until the user toggles once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}
