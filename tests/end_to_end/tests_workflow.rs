//! The sharpen workflow over fixture collaborators and workspace settings.

use std::fs;

use pretty_assertions::assert_eq;
use sharpen::base::Position;
use sharpen::config::WORKSPACE_FILE_NAME;
use sharpen::core::Result;
use sharpen::ide::{Diagnostic, DiagnosticsProvider, MemoryDocument, RenameProvider, Sharpener, TextEdit, TextEditor};
use sharpen::SharpenSettings;
use tempfile::TempDir;

use crate::helpers::outline_fixtures::FixtureOutline;

struct NoDiagnostics;

impl DiagnosticsProvider for NoDiagnostics {
    fn diagnostics(&self, _path: &str, _text: &str) -> Result<Vec<Diagnostic>> {
        Ok(Vec::new())
    }
}

struct NoRename;

impl RenameProvider for NoRename {
    fn rename(&self, _path: &str, _text: &str, _position: Position, _new_name: &str) -> Result<Option<Vec<TextEdit>>> {
        Ok(None)
    }
}

const WIDGET: &str = "public class Widget
{
    public void Stop() { }

    private int b;

    public void Run() { }

    private int a;
}";

#[test]
fn test_workspace_threshold_applies_to_sharpen() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(WORKSPACE_FILE_NAME),
        r#"{ "typeLevelOrganization": { "regionThreshold": 1 } }"#,
    )
    .unwrap();
    let settings = SharpenSettings::from_workspace(dir.path()).unwrap();
    assert_eq!(settings.type_level_organization.region_threshold, 1);

    let sharpener = Sharpener::new(&settings, &FixtureOutline, &NoDiagnostics, &NoRename);
    let mut document = MemoryDocument::new("src/Widget.cs", WIDGET);
    let outcome = sharpener.sharpen(&mut document).unwrap();

    assert!(outcome.sharpened);
    assert_eq!(
        document.text(),
        "public class Widget
{
    #region private fields
    private int a;
    private int b;
    #endregion

    #region public methods
    public void Run() { }

    public void Stop() { }
    #endregion
}"
    );

    let again = sharpener.sharpen(&mut document).unwrap();
    assert!(again.sharpened);
    assert!(document.text().starts_with("public class Widget\n{\n    #region private fields\n"));
}

#[test]
fn test_default_threshold_leaves_small_groups_plain() {
    let settings = SharpenSettings::default();
    let sharpener = Sharpener::new(&settings, &FixtureOutline, &NoDiagnostics, &NoRename);
    let mut document = MemoryDocument::new("src/Widget.cs", WIDGET);
    sharpener.sharpen(&mut document).unwrap();

    assert_eq!(
        document.into_text(),
        "public class Widget
{
    private int a;
    private int b;

    public void Run() { }

    public void Stop() { }
}"
    );
}

#[test]
fn test_batch_reports_every_document() {
    let settings = SharpenSettings::default();
    let sharpener = Sharpener::new(&settings, &FixtureOutline, &NoDiagnostics, &NoRename);
    let mut documents = vec![
        MemoryDocument::new("src/Widget.cs", WIDGET),
        MemoryDocument::new("src/Program.cs", "public class Startup\n{\n}"),
    ];

    let results = sharpener.sharpen_batch(&mut documents);
    let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["src/Widget.cs", "src/Program.cs"]);
    assert!(results[0].result.as_ref().unwrap().sharpened);
    assert_eq!(
        results[1].result.as_ref().unwrap().skipped.as_deref(),
        Some("Program.cs requires a Program class")
    );
    assert_eq!(documents[1].text(), "public class Startup\n{\n}");
}
