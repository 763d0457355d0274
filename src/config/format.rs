//! Editor formatting options

use serde::{Deserialize, Serialize};

/// Indentation settings of the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl FormatOptions {
    /// One indentation unit
    pub fn indentation(&self) -> String {
        self.indent(1)
    }

    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }
}
