//! Settings: shipped defaults, the `.csharpen.json` workspace override, and
//! a shared snapshot cache.
//!
//! ```text
//! defaults ──overlay──▶ workspace file ──▶ SharpenSettings ──▶ SettingsCache
//! ```

mod file_filter;
mod format;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::matching::{RenameRule, SymbolRename};
use crate::organize::{Capability, Organizer, OrganizePolicy};

pub use file_filter::{
    DEFAULT_AUTO_GENERATED_PATTERN, FileFilter, FileFilterStatus, FilterVerdict, is_auto_generated,
};
pub use format::FormatOptions;

/// Workspace override file name.
pub const WORKSPACE_FILE_NAME: &str = ".csharpen.json";

/// Effective settings for sharpening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharpenSettings {
    pub allow_sharpen_with_file_diagnostic_errors: bool,
    pub auto_generated_patterns: Vec<String>,
    pub file_filters: Vec<FileFilter>,
    pub format_document_on_sharpen: bool,
    pub format: FormatOptions,
    pub namespace_level_organization: OrganizePolicy,
    pub type_level_organization: OrganizePolicy,
    /// Capability names, `*` for all.
    pub regionalize_interface_implementations: Vec<String>,
    pub remove_unused_usings_on_sharpen: bool,
    pub symbol_renaming: Vec<SymbolRename>,
    pub symbol_renaming_enabled: bool,
}

impl Default for SharpenSettings {
    fn default() -> Self {
        Self {
            allow_sharpen_with_file_diagnostic_errors: false,
            auto_generated_patterns: vec![DEFAULT_AUTO_GENERATED_PATTERN.to_string()],
            file_filters: FileFilter::defaults(),
            format_document_on_sharpen: true,
            format: FormatOptions::default(),
            namespace_level_organization: OrganizePolicy::namespace_level(),
            type_level_organization: OrganizePolicy::type_level(),
            regionalize_interface_implementations: vec!["*".to_string()],
            remove_unused_usings_on_sharpen: true,
            symbol_renaming: Vec::new(),
            symbol_renaming_enabled: false,
        }
    }
}

/// Partial settings as written in a workspace file. Present fields override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceSettings {
    pub allow_sharpen_with_file_diagnostic_errors: Option<bool>,
    pub auto_generated_patterns: Option<Vec<String>>,
    pub file_filters: Option<Vec<FileFilter>>,
    pub format_document_on_sharpen: Option<bool>,
    pub format: Option<FormatOptions>,
    pub namespace_level_organization: Option<OrganizePolicy>,
    pub type_level_organization: Option<OrganizePolicy>,
    pub regionalize_interface_implementations: Option<Vec<String>>,
    pub remove_unused_usings_on_sharpen: Option<bool>,
    pub symbol_renaming: Option<Vec<SymbolRename>>,
    pub symbol_renaming_enabled: Option<bool>,
}

impl WorkspaceSettings {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(WORKSPACE_FILE_NAME)
    }

    /// Read the workspace file; `None` when there is none.
    pub fn read(dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(dir);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        tracing::debug!("[CONFIG] loaded {}", path.display());
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl SharpenSettings {
    /// Defaults overridden by the fields present in `json`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let workspace: WorkspaceSettings = serde_json::from_str(json)?;
        let mut settings = Self::default();
        settings.overlay(workspace);
        Ok(settings)
    }

    /// Defaults overridden by `dir`'s workspace file, if any.
    pub fn from_workspace(dir: &Path) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(workspace) = WorkspaceSettings::read(dir)? {
            settings.overlay(workspace);
        }
        Ok(settings)
    }

    /// Apply the fields present in `workspace`.
    pub fn overlay(&mut self, workspace: WorkspaceSettings) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(
            &mut self.allow_sharpen_with_file_diagnostic_errors,
            workspace.allow_sharpen_with_file_diagnostic_errors,
        );
        set(&mut self.auto_generated_patterns, workspace.auto_generated_patterns);
        set(&mut self.file_filters, workspace.file_filters);
        set(&mut self.format_document_on_sharpen, workspace.format_document_on_sharpen);
        set(&mut self.format, workspace.format);
        set(
            &mut self.regionalize_interface_implementations,
            workspace.regionalize_interface_implementations,
        );
        set(
            &mut self.remove_unused_usings_on_sharpen,
            workspace.remove_unused_usings_on_sharpen,
        );
        set(&mut self.symbol_renaming, workspace.symbol_renaming);
        set(&mut self.symbol_renaming_enabled, workspace.symbol_renaming_enabled);

        if let Some(policy) = &workspace.namespace_level_organization {
            self.namespace_level_organization.overlay(policy);
        }
        if let Some(policy) = &workspace.type_level_organization {
            self.type_level_organization.overlay(policy);
        }
    }

    /// Write these settings as a workspace file in `dir`.
    pub fn write_workspace_file(&self, dir: &Path) -> Result<PathBuf> {
        let path = WorkspaceSettings::path(dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::expand(&self.regionalize_interface_implementations)
    }

    pub fn organizer(&self) -> Organizer {
        Organizer::new(
            self.namespace_level_organization.clone(),
            self.type_level_organization.clone(),
            self.capabilities(),
        )
    }

    /// Compiled rename rules, empty when renaming is disabled.
    pub fn rename_rules(&self) -> Result<Vec<RenameRule>> {
        if !self.symbol_renaming_enabled {
            return Ok(Vec::new());
        }
        RenameRule::compile_enabled(&self.symbol_renaming)
    }

    pub fn indentation(&self) -> String {
        self.format.indentation()
    }
}

/// Shared settings snapshot, reloaded on demand.
#[derive(Debug, Default)]
pub struct SettingsCache {
    current: RwLock<Arc<SharpenSettings>>,
}

impl SettingsCache {
    pub fn new(settings: SharpenSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Current snapshot; later refreshes do not affect it.
    pub fn get(&self) -> Arc<SharpenSettings> {
        Arc::clone(&self.current.read())
    }

    /// Reload from `dir` and publish the result.
    pub fn refresh(&self, dir: &Path) -> Result<Arc<SharpenSettings>> {
        let settings = Arc::new(SharpenSettings::from_workspace(dir)?);
        *self.current.write() = Arc::clone(&settings);
        Ok(settings)
    }

    pub fn replace(&self, settings: SharpenSettings) {
        *self.current.write() = Arc::new(settings);
    }
}

#[cfg(test)]
mod tests;
