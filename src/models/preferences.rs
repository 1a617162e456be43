//! Assistant preference data model.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_FLAG_MARKER, DEFAULT_VAR_MARKER, DirectiveConfig};

/// Per-user assistant preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantPreferences {
    /// Name the assistant addresses the user by.
    pub display_name: String,
    /// Reply tone hint passed into the system prompt.
    pub tone: String,
    /// IANA timezone name used when rendering times.
    pub timezone: String,
    /// Variable marker this user types, e.g. `.`.
    pub var_marker: char,
    /// Flag marker this user types, e.g. `-`.
    pub flag_marker: char,
}

impl Default for AssistantPreferences {
    fn default() -> Self {
        Self {
            display_name: "there".to_string(),
            tone: "concise".to_string(),
            timezone: "UTC".to_string(),
            var_marker: DEFAULT_VAR_MARKER,
            flag_marker: DEFAULT_FLAG_MARKER,
        }
    }
}

impl AssistantPreferences {
    /// The directive markers this user's messages should be parsed with.
    pub fn directive_config(&self) -> DirectiveConfig {
        DirectiveConfig {
            var_marker: self.var_marker,
            flag_marker: self.flag_marker,
        }
    }
}
