//! Sharpening: filter check, unused-using removal, reorganization and
//! symbol renaming for one document or a batch.

use rustc_hash::FxHashSet;

use crate::config::{FileFilter, FileFilterStatus, SharpenSettings, is_auto_generated};
use crate::core::Result;
use crate::matching::{RenameRule, find_candidate};
use crate::symbols::{Symbol, TextRenderer, build};

use super::diagnostics::unused_using_edits;
use super::{DiagnosticsProvider, OutlineProvider, RenameProvider, TextEditor};

/// A rename that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedSymbol {
    pub rule: String,
    pub old_name: String,
    pub new_name: String,
    pub member_name: String,
}

/// What sharpening did to one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharpenOutcome {
    pub sharpened: bool,
    pub removed_usings: usize,
    pub renamed: Vec<RenamedSymbol>,
    /// Why the document was left alone, when it was.
    pub skipped: Option<String>,
}

impl SharpenOutcome {
    fn skipped(reason: impl Into<String>, removed_usings: usize) -> Self {
        Self {
            skipped: Some(reason.into()),
            removed_usings,
            ..Self::default()
        }
    }
}

/// Result for one document of a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: String,
    pub result: Result<SharpenOutcome>,
}

type Confirm<'a> = Box<dyn Fn(&str) -> bool + 'a>;

/// Runs the sharpen workflow against host collaborators.
pub struct Sharpener<'a> {
    settings: &'a SharpenSettings,
    outline: &'a dyn OutlineProvider,
    diagnostics: &'a dyn DiagnosticsProvider,
    renamer: &'a dyn RenameProvider,
    confirm: Confirm<'a>,
}

impl<'a> Sharpener<'a> {
    /// Documents needing confirmation are skipped until
    /// [`with_confirmation`](Self::with_confirmation) says otherwise.
    pub fn new(
        settings: &'a SharpenSettings,
        outline: &'a dyn OutlineProvider,
        diagnostics: &'a dyn DiagnosticsProvider,
        renamer: &'a dyn RenameProvider,
    ) -> Self {
        Self {
            settings,
            outline,
            diagnostics,
            renamer,
            confirm: Box::new(|_| false),
        }
    }

    /// Ask `confirm` whether to continue when a filter or diagnostic errors
    /// call for confirmation.
    pub fn with_confirmation(mut self, confirm: impl Fn(&str) -> bool + 'a) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Build the symbol tree of the current document text.
    pub fn build(&self, editor: &dyn TextEditor) -> Result<Vec<Symbol>> {
        let entries = self.outline.document_symbols(editor.path(), editor.text())?;
        build(editor.text(), &entries)
    }

    /// Sharpen one document, renaming symbols when enabled.
    pub fn sharpen(&self, editor: &mut dyn TextEditor) -> Result<SharpenOutcome> {
        self.sharpen_document(editor, false)
    }

    /// Sharpen documents in order; a failing document does not stop the rest.
    /// Symbol renaming is skipped in batches, as are auto-generated files.
    pub fn sharpen_batch<E: TextEditor>(&self, editors: &mut [E]) -> Vec<BatchItem> {
        editors
            .iter_mut()
            .map(|editor| {
                let result = is_auto_generated(editor.text(), &self.settings.auto_generated_patterns).and_then(
                    |generated| {
                        if generated {
                            Ok(SharpenOutcome::skipped("Auto-generated file", 0))
                        } else {
                            self.sharpen_document(editor, true)
                        }
                    },
                );
                if let Err(error) = &result {
                    tracing::warn!("[SHARPEN] {}: {}", editor.path(), error);
                }
                BatchItem {
                    path: editor.path().to_string(),
                    result,
                }
            })
            .collect()
    }

    fn sharpen_document(&self, editor: &mut dyn TextEditor, batch: bool) -> Result<SharpenOutcome> {
        let settings = self.settings;
        let verdict = FileFilter::check_all(editor.path(), editor.text(), &settings.file_filters)?;
        let reason = verdict.reason.unwrap_or_default();
        match verdict.status {
            FileFilterStatus::Allow => {}
            FileFilterStatus::Deny => return Ok(SharpenOutcome::skipped(reason, 0)),
            FileFilterStatus::Confirm => {
                if !(self.confirm)(&reason) {
                    return Ok(SharpenOutcome::skipped(format!("Canceled: {reason}"), 0));
                }
            }
        }

        if !settings.allow_sharpen_with_file_diagnostic_errors {
            let diagnostics = self.diagnostics.diagnostics(editor.path(), editor.text())?;
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            if errors > 0 {
                let reason = format!("File contains {errors} diagnostic errors");
                if !(self.confirm)(&reason) {
                    return Ok(SharpenOutcome::skipped(format!("Canceled: {reason}"), 0));
                }
            }
        }

        let removed_usings = if settings.remove_unused_usings_on_sharpen {
            self.remove_unused_usings(editor)?
        } else {
            0
        };

        if settings.format_document_on_sharpen {
            editor.format_document()?;
        }

        let symbols = self.build(editor)?;
        if symbols.is_empty() {
            return Ok(SharpenOutcome::skipped("No C# symbols found", removed_usings));
        }

        let organized = settings.organizer().organize(symbols);
        let indentation = settings.indentation();
        let text = TextRenderer::new(&indentation).render(&organized);
        if text != editor.text() && !editor.replace_all(&text)? {
            return Err(crate::core::SharpenError::collaborator(format!(
                "editor rejected the sharpened text of {}",
                editor.path()
            )));
        }
        tracing::debug!("[SHARPEN] {} organized", editor.path());

        if settings.format_document_on_sharpen {
            editor.format_document()?;
        }

        let renamed = if batch {
            Vec::new()
        } else {
            self.rename_with(editor, &settings.rename_rules()?)?
        };

        Ok(SharpenOutcome {
            sharpened: true,
            removed_usings,
            renamed,
            skipped: None,
        })
    }

    /// Delete unnecessary using directives in one edit set. Returns how many
    /// were removed.
    pub fn remove_unused_usings(&self, editor: &mut dyn TextEditor) -> Result<usize> {
        let diagnostics = self.diagnostics.diagnostics(editor.path(), editor.text())?;
        let edits = unused_using_edits(editor.text(), &diagnostics);
        if edits.is_empty() {
            return Ok(0);
        }
        if !editor.apply_edits(&edits)? {
            tracing::warn!("[USINGS] {}: editor rejected using removal", editor.path());
            return Ok(0);
        }
        tracing::debug!("[USINGS] {}: removed {} unused usings", editor.path(), edits.len());
        Ok(edits.len())
    }

    /// Apply the enabled rename rules until none matches.
    pub fn rename_symbols(&self, editor: &mut dyn TextEditor) -> Result<Vec<RenamedSymbol>> {
        let rules = RenameRule::compile_enabled(&self.settings.symbol_renaming)?;
        self.rename_with(editor, &rules)
    }

    /// One rename per round; positions move after every edit, so the tree is
    /// rebuilt each time.
    fn rename_with(&self, editor: &mut dyn TextEditor, rules: &[RenameRule]) -> Result<Vec<RenamedSymbol>> {
        let mut renamed = Vec::new();
        if rules.is_empty() {
            return Ok(renamed);
        }

        let mut skip = FxHashSet::default();
        loop {
            let symbols = self.build(editor)?;
            let Some(candidate) = find_candidate(rules, &symbols, &skip) else {
                break;
            };
            skip.insert(candidate.key.clone());

            let Some(selection) = candidate.selection else {
                tracing::warn!("[RENAME] {}: '{}' has no name position", candidate.rule, candidate.member_name);
                continue;
            };

            let edits = match self
                .renamer
                .rename(editor.path(), editor.text(), selection.start, &candidate.new_name)
            {
                Ok(Some(edits)) => edits,
                Ok(None) => {
                    tracing::warn!(
                        "[RENAME] {}: '{}' cannot be renamed: rename provider returned no edits",
                        candidate.rule,
                        candidate.member_name
                    );
                    continue;
                }
                Err(error) => {
                    tracing::warn!("[RENAME] {}: '{}' cannot be renamed: {}", candidate.rule, candidate.member_name, error);
                    continue;
                }
            };

            match editor.apply_edits(&edits) {
                Ok(true) => {
                    tracing::info!(
                        "[RENAME] {}: {} -> {}",
                        candidate.rule,
                        candidate.old_name,
                        candidate.new_name
                    );
                    renamed.push(RenamedSymbol {
                        rule: candidate.rule,
                        old_name: candidate.old_name,
                        new_name: candidate.new_name,
                        member_name: candidate.member_name,
                    });
                }
                Ok(false) => {
                    tracing::warn!(
                        "[RENAME] {}: '{}' cannot be renamed: edit was not applied",
                        candidate.rule,
                        candidate.member_name
                    );
                }
                Err(error) => {
                    tracing::warn!("[RENAME] {}: '{}' cannot be renamed: {}", candidate.rule, candidate.member_name, error);
                }
            }
        }
        Ok(renamed)
    }
}
