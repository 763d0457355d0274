use std::fs;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::core::SharpenError;
use crate::organize::{OrderKey, RegionKey};
use crate::syntax::SymbolType;

// ============================================================================
// SETTINGS
// ============================================================================

#[test]
fn test_defaults() {
    let settings = SharpenSettings::default();

    assert!(settings.remove_unused_usings_on_sharpen);
    assert!(settings.format_document_on_sharpen);
    assert!(!settings.symbol_renaming_enabled);
    assert_eq!(settings.file_filters.len(), 4);
    assert_eq!(settings.indentation(), "    ");
    assert_eq!(settings.capabilities().len(), 10);
    assert_eq!(
        settings.type_level_organization.regionalization,
        vec![RegionKey::Access, RegionKey::Type]
    );
    assert!(settings.namespace_level_organization.regionalization.is_empty());
}

#[test]
fn test_json_overrides_present_fields_only() {
    let json = r#"{
        "removeUnusedUsingsOnSharpen": false,
        "regionalizeInterfaceImplementations": ["ICollection"],
        "format": { "tabSize": 2, "insertSpaces": true },
        "typeLevelOrganization": {
            "ordering": ["access", "name"],
            "typeSort": ["namespace", "method"],
            "regionThreshold": 0
        }
    }"#;
    let settings = SharpenSettings::from_json_str(json).unwrap();

    assert!(!settings.remove_unused_usings_on_sharpen);
    assert!(settings.format_document_on_sharpen);
    assert_eq!(settings.indentation(), "  ");
    assert_eq!(
        settings.capabilities(),
        vec![Capability::Collection, Capability::Enumerable]
    );

    let policy = &settings.type_level_organization;
    assert_eq!(policy.ordering, vec![OrderKey::Access, OrderKey::Name]);
    assert_eq!(policy.type_sort, vec![SymbolType::Method]);
    assert_eq!(policy.region_threshold, 0);
    assert_eq!(policy.regionalization, vec![RegionKey::Access, RegionKey::Type]);
    assert_eq!(settings.namespace_level_organization, OrganizePolicy::namespace_level());
}

#[test]
fn test_invalid_json_is_an_error() {
    let error = SharpenSettings::from_json_str("{ not json").unwrap_err();
    assert!(matches!(error, SharpenError::Json(_)));
}

#[test]
fn test_unknown_symbol_type_in_policy_is_an_error() {
    let json = r#"{ "typeLevelOrganization": { "typeSort": ["gadget"] } }"#;
    assert!(SharpenSettings::from_json_str(json).is_err());
}

#[test]
fn test_workspace_file_missing_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = SharpenSettings::from_workspace(dir.path()).unwrap();
    assert_eq!(settings, SharpenSettings::default());
}

#[test]
fn test_workspace_file_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(WORKSPACE_FILE_NAME),
        r#"{ "symbolRenamingEnabled": true, "symbolRenaming": [
            { "name": "Underscore", "replacement": "_{name}", "types": "field",
              "accessModifiers": "private", "namePattern": "^(?P<name>[a-z]\\w*)$" }
        ] }"#,
    )
    .unwrap();

    let settings = SharpenSettings::from_workspace(dir.path()).unwrap();
    assert!(settings.symbol_renaming_enabled);
    let rules = settings.rename_rules().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name(), "Underscore");
}

#[test]
fn test_rename_rules_empty_when_disabled() {
    let mut settings = SharpenSettings::default();
    settings.symbol_renaming = vec![SymbolRename {
        name: "Never".to_string(),
        replacement: "{name}".to_string(),
        ..Default::default()
    }];
    assert!(settings.rename_rules().unwrap().is_empty());
}

#[test]
fn test_written_workspace_file_reads_back() {
    let dir = TempDir::new().unwrap();
    let mut settings = SharpenSettings::default();
    settings.format_document_on_sharpen = false;
    settings.regionalize_interface_implementations = vec!["IDisposable".to_string()];

    let path = settings.write_workspace_file(dir.path()).unwrap();
    assert!(path.ends_with(WORKSPACE_FILE_NAME));
    assert_eq!(SharpenSettings::from_workspace(dir.path()).unwrap(), settings);
}

#[test]
fn test_settings_cache_snapshots() {
    let dir = TempDir::new().unwrap();
    let cache = SettingsCache::default();
    let before = cache.get();
    assert!(before.remove_unused_usings_on_sharpen);

    fs::write(dir.path().join(WORKSPACE_FILE_NAME), r#"{ "removeUnusedUsingsOnSharpen": false }"#).unwrap();
    let refreshed = cache.refresh(dir.path()).unwrap();

    assert!(!refreshed.remove_unused_usings_on_sharpen);
    assert!(!cache.get().remove_unused_usings_on_sharpen);
    assert!(before.remove_unused_usings_on_sharpen);

    cache.replace(SharpenSettings::default());
    assert!(cache.get().remove_unused_usings_on_sharpen);
}

#[rstest]
#[case(4, true, 1, "    ")]
#[case(2, true, 3, "      ")]
#[case(4, false, 2, "\t\t")]
fn test_format_indent(#[case] tab_size: usize, #[case] insert_spaces: bool, #[case] level: usize, #[case] expected: &str) {
    let options = FormatOptions {
        tab_size,
        insert_spaces,
    };
    assert_eq!(options.indent(level), expected);
}

// ============================================================================
// FILE FILTERS
// ============================================================================

const PROGRAM: &str = "namespace App;\n\nclass Program\n{\n    static void Main(string[] args) { }\n}\n";

#[test]
fn test_program_file_with_main_is_allowed() {
    let verdict = FileFilter::check_all("src/Program.cs", PROGRAM, &FileFilter::defaults()).unwrap();
    assert!(verdict.is_allowed());
    assert_eq!(verdict.reason, None);
}

#[test]
fn test_program_file_without_program_class_is_denied() {
    let text = "namespace App;\n\nclass Startup\n{\n}\n";
    let verdict = FileFilter::check_all("src/Program.cs", text, &FileFilter::defaults()).unwrap();
    assert_eq!(verdict.status, FileFilterStatus::Deny);
    assert_eq!(verdict.reason.as_deref(), Some("Program.cs requires a Program class"));

    let elsewhere = FileFilter::check_all("src/Startup.cs", text, &FileFilter::defaults()).unwrap();
    assert!(elsewhere.is_allowed());
}

#[test]
fn test_else_directive_asks_for_confirmation() {
    let text = "class A\n{\n#if DEBUG\n    int a;\n#else\n    int b;\n#endif\n}\n";
    let verdict = FileFilter::check_all("A.cs", text, &FileFilter::defaults()).unwrap();
    assert_eq!(verdict.status, FileFilterStatus::Confirm);
}

#[test]
fn test_filter_reason_falls_back_to_name() {
    let filter = FileFilter {
        name: "NoTodo".to_string(),
        pattern: "TODO".to_string(),
        ..Default::default()
    };
    assert_eq!(filter.check("A.cs", "// TODO").unwrap(), FileFilterStatus::Deny);
    assert_eq!(filter.ignored_reason(), "File filter: NoTodo");
}

#[test]
fn test_invalid_filter_pattern_is_an_error() {
    let filter = FileFilter {
        name: "Broken".to_string(),
        pattern: "(".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        filter.check("A.cs", "x"),
        Err(SharpenError::InvalidPattern { .. })
    ));
}

#[rstest]
#[case("// <auto-generated>\nclass A {}", true)]
#[case("using System;\n  /// <auto-generated/>\n", true)]
#[case("class A {} // not <auto-generated", false)]
#[case("class A {}", false)]
fn test_auto_generated_detection(#[case] text: &str, #[case] expected: bool) {
    let patterns = vec![DEFAULT_AUTO_GENERATED_PATTERN.to_string()];
    assert_eq!(is_auto_generated(text, &patterns).unwrap(), expected);
}
