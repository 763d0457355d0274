//! Error types for symbol reconstruction, reorganization and settings.

use thiserror::Error;

/// Errors surfaced while sharpening a document.
///
/// Structural errors are fatal for the current document. Collaborator
/// errors are reported so a workflow can skip the item and continue.
#[derive(Debug, Error)]
pub enum SharpenError {
    /// A container declaration has no `{` after its modifiers.
    #[error("Symbol signature does not have an open brace: {symbol}")]
    MissingOpenBrace { symbol: String },

    /// A single-line re-derivation was requested for a multi-line range.
    #[error("Symbol range spans multiple lines: {symbol}")]
    MultiLineDeclaration { symbol: String },

    /// The symbol name could not be located in its declaration text.
    #[error("Unable to locate symbol name boundary: {symbol}")]
    UnresolvedName { symbol: String },

    /// Terminator-bodied namespaces mixed with other namespace declarations.
    #[error("Malformed namespace structure: {0}")]
    MalformedNamespaces(String),

    /// A declaration keyword that maps to no symbol type.
    #[error("Unknown symbol type keyword: {0}")]
    UnknownKeyword(String),

    /// A user-supplied regular expression failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Settings could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error while reading settings.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading settings.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An external collaborator reported a failure.
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

impl SharpenError {
    /// Create a missing-open-brace error.
    pub fn missing_open_brace(symbol: impl Into<String>) -> Self {
        Self::MissingOpenBrace {
            symbol: symbol.into(),
        }
    }

    /// Create a multi-line-declaration error.
    pub fn multi_line(symbol: impl Into<String>) -> Self {
        Self::MultiLineDeclaration {
            symbol: symbol.into(),
        }
    }

    /// Create an unresolved-name error.
    pub fn unresolved_name(symbol: impl Into<String>) -> Self {
        Self::UnresolvedName {
            symbol: symbol.into(),
        }
    }

    /// Create a malformed-namespace error.
    pub fn namespaces(message: impl Into<String>) -> Self {
        Self::MalformedNamespaces(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a collaborator error.
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Compile a user-supplied pattern.
    pub fn compile(pattern: &str) -> Result<regex::Regex> {
        regex::Regex::new(pattern).map_err(|source| Self::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
    }

    /// Whether this error means the document text did not have the expected shape.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingOpenBrace { .. }
                | Self::MultiLineDeclaration { .. }
                | Self::UnresolvedName { .. }
                | Self::MalformedNamespaces(_)
                | Self::UnknownKeyword(_)
        )
    }
}

/// Result type for sharpen operations.
pub type Result<T, E = SharpenError> = std::result::Result<T, E>;
