//! Host-facing workflows over external language-service collaborators.
//!
//! The crate never parses C# on its own. A host supplies:
//!
//! - an [`OutlineProvider`] for document symbols,
//! - a [`DiagnosticsProvider`] for unnecessary-using diagnostics,
//! - a [`RenameProvider`] that computes rename edits including references,
//! - a [`TextEditor`] that owns the document text and applies edit sets.
//!
//! All calls are synchronous; each one stands for a single request to the
//! host, and documents are processed strictly one at a time.
//!
//! ## Usage
//!
//! ```ignore
//! use sharpen::config::SharpenSettings;
//! use sharpen::ide::{MemoryDocument, Sharpener};
//!
//! let settings = SharpenSettings::default();
//! let sharpener = Sharpener::new(&settings, &outline, &diagnostics, &renamer);
//! let mut document = MemoryDocument::new("src/Ledger.cs", text);
//! let outcome = sharpener.sharpen(&mut document)?;
//! ```

mod diagnostics;
mod edits;
mod workflow;

pub use diagnostics::{Diagnostic, Severity, UNNECESSARY_USING, unused_using_edits};
pub use edits::{MemoryDocument, TextEdit, apply_text_edits, whole_document};
pub use workflow::{BatchItem, RenamedSymbol, SharpenOutcome, Sharpener};

use crate::base::Position;
use crate::core::Result;
use crate::symbols::OutlineEntry;

/// Produces the symbol outline of a document.
pub trait OutlineProvider {
    fn document_symbols(&self, path: &str, text: &str) -> Result<Vec<OutlineEntry>>;
}

/// Produces the diagnostics of a document.
pub trait DiagnosticsProvider {
    fn diagnostics(&self, path: &str, text: &str) -> Result<Vec<Diagnostic>>;
}

/// Computes the edits renaming the symbol at `position` and its references.
///
/// `Ok(None)` means the provider declined.
pub trait RenameProvider {
    fn rename(&self, path: &str, text: &str, position: Position, new_name: &str) -> Result<Option<Vec<TextEdit>>>;
}

/// An open document.
pub trait TextEditor {
    fn path(&self) -> &str;

    fn text(&self) -> &str;

    /// Apply `edits` as one change. `Ok(false)` when the host rejected them.
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<bool>;

    /// Replace the whole document.
    fn replace_all(&mut self, new_text: &str) -> Result<bool> {
        let edit = TextEdit::new(whole_document(self.text()), new_text);
        self.apply_edits(&[edit])
    }

    fn format_document(&mut self) -> Result<()> {
        Ok(())
    }
}
