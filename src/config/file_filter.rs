//! Named allow/deny rules evaluated before a document is sharpened.

use serde::{Deserialize, Serialize};

use crate::core::{Result, SharpenError};

/// Outcome of checking a document against file filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFilterStatus {
    Allow,
    Deny,
    /// Deny unless the user confirms.
    Confirm,
}

/// A filter rule.
///
/// The rule fires when `file_name` (if given) matches the document path and
/// whether `pattern` matches the content equals `match_logic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFilter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub pattern: String,
    pub match_logic: bool,
    pub confirm_on_deny: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            file_name: None,
            pattern: String::new(),
            match_logic: true,
            confirm_on_deny: false,
            reason: None,
        }
    }
}

/// The first filter that did not allow a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterVerdict {
    pub status: FileFilterStatus,
    pub reason: Option<String>,
}

impl FilterVerdict {
    pub fn allow() -> Self {
        Self {
            status: FileFilterStatus::Allow,
            reason: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.status == FileFilterStatus::Allow
    }
}

impl FileFilter {
    /// Reason reported when this filter fires.
    pub fn ignored_reason(&self) -> String {
        match &self.reason {
            Some(reason) if !reason.is_empty() => reason.clone(),
            _ => format!("File filter: {}", self.name),
        }
    }

    pub fn check(&self, file_name: &str, content: &str) -> Result<FileFilterStatus> {
        let file_name_applies = match self.file_name.as_deref() {
            Some(pattern) if !pattern.is_empty() => SharpenError::compile(pattern)?.is_match(file_name),
            _ => true,
        };
        if !file_name_applies {
            return Ok(FileFilterStatus::Allow);
        }

        let matches = SharpenError::compile(&self.pattern)?.is_match(content);
        Ok(if matches != self.match_logic {
            FileFilterStatus::Allow
        } else if self.confirm_on_deny {
            FileFilterStatus::Confirm
        } else {
            FileFilterStatus::Deny
        })
    }

    /// Check filters in order; the first one that does not allow wins.
    pub fn check_all(file_name: &str, content: &str, filters: &[FileFilter]) -> Result<FilterVerdict> {
        for filter in filters {
            let status = filter.check(file_name, content)?;
            if status != FileFilterStatus::Allow {
                tracing::debug!("[FILTER] '{}' {:?} for {}", filter.name, status, file_name);
                return Ok(FilterVerdict {
                    status,
                    reason: Some(filter.ignored_reason()),
                });
            }
        }
        Ok(FilterVerdict::allow())
    }

    /// Shipped filters.
    pub fn defaults() -> Vec<FileFilter> {
        vec![
            FileFilter {
                name: "ProgramClass".to_string(),
                file_name: Some(r"/[Pp]rogram\.cs$".to_string()),
                pattern: r"\bclass\s+Program\s*\{".to_string(),
                match_logic: false,
                confirm_on_deny: false,
                reason: Some("Program.cs requires a Program class".to_string()),
            },
            FileFilter {
                name: "ProgramClassMainMethod".to_string(),
                file_name: Some(r"/[Pp]rogram\.cs$".to_string()),
                pattern: r"\bstatic\s+((void)|(int)|((System\.)?Int32)|(async\s+Task(<((int)|((System\.)?Int32))>)?))\s+Main\s*\(.*?\)".to_string(),
                match_logic: false,
                confirm_on_deny: false,
                reason: Some("Program class requires a static Main method".to_string()),
            },
            FileFilter {
                name: "PreprocessorDirective:#elif".to_string(),
                file_name: None,
                pattern: r"\n\s*?#elif\s+.*?[\r\n]+".to_string(),
                match_logic: true,
                confirm_on_deny: true,
                reason: Some(
                    "Preprocessor directive #elif is detected. If outside of type members, it may cause unexpected behavior."
                        .to_string(),
                ),
            },
            FileFilter {
                name: "PreprocessorDirective:#else".to_string(),
                file_name: None,
                pattern: r"\n\s*?#else\s*?[\r\n]+".to_string(),
                match_logic: true,
                confirm_on_deny: true,
                reason: Some(
                    "Preprocessor directive #else is detected. If outside of type members, it may cause unexpected behavior."
                        .to_string(),
                ),
            },
        ]
    }
}

/// Default auto-generated file marker.
pub const DEFAULT_AUTO_GENERATED_PATTERN: &str = r"^[ \t]*/{2,3}[^\r\n]*<auto-generated\b";

/// Whether any of `patterns` matches a line of `text`.
pub fn is_auto_generated(text: &str, patterns: &[String]) -> Result<bool> {
    for pattern in patterns {
        if SharpenError::compile(&format!("(?m){pattern}"))?.is_match(text) {
            return Ok(true);
        }
    }
    Ok(false)
}
