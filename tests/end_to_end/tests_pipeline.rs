//! Build, organize and render whole documents.

use pretty_assertions::assert_eq;
use sharpen::{Organizer, Symbol, SymbolType, TextRenderer, build};

use crate::helpers::outline_fixtures::outline;
use crate::helpers::symbol_assertions::{assert_children, assert_contained, assert_no_primary_constructors, get_symbol};

const LEDGER: &str = "using System.IO;
using System;

namespace Contoso.Billing;

public sealed class Ledger : IDisposable
{
    public void Dispose() { }

    public Ledger(string name) { _name = name; }

    private readonly string _name;

    public string Name => _name;

    private bool _disposed;

    public void Add(decimal amount) { }

    internal const int Limit = 10;
}

public interface IAccount
{
    void Close();

    decimal Balance { get; }
}

public enum Mode
{
    Open,
    Closed
}";

const ORGANIZED_LEDGER: &str = "using System;
using System.IO;

namespace Contoso.Billing;

public interface IAccount
{
    decimal Balance { get; }

    void Close();
}

public enum Mode
{
    Open,
    Closed
}

public sealed class Ledger : IDisposable
{
    internal const int Limit = 10;

    private readonly string _name;

    public Ledger(string name) { _name = name; }

    public string Name => _name;

    public void Add(decimal amount) { }

    #region IDisposable
    public void Dispose() { }

    private bool _disposed;
    #endregion
}";

fn sharpen_text(text: &str) -> (Vec<Symbol>, String) {
    let symbols = build(text, &outline(text)).unwrap();
    let organized = Organizer::default().organize(symbols);
    let rendered = TextRenderer::default().render(&organized);
    (organized, rendered)
}

#[test]
fn test_unchanged_round_trip() {
    let symbols = build(LEDGER, &outline(LEDGER)).unwrap();
    assert_contained(&symbols);
    assert_eq!(TextRenderer::default().render(&symbols), LEDGER);
}

#[test]
fn test_built_tree_shape() {
    let symbols = build(LEDGER, &outline(LEDGER)).unwrap();

    let ledger = get_symbol(&symbols, "Contoso.Billing/Ledger");
    assert_eq!(ledger.symbol_type, SymbolType::Class);
    assert_eq!(ledger.implements, vec!["IDisposable"]);
    assert_children(
        &symbols,
        "Contoso.Billing/Ledger",
        &["Dispose", "Ledger", "_name", "Name", "_disposed", "Add", "Limit"],
    );

    let types: Vec<SymbolType> = ledger.children.iter().map(|c| c.symbol_type).collect();
    assert_eq!(
        types,
        vec![
            SymbolType::Method,
            SymbolType::Constructor,
            SymbolType::Field,
            SymbolType::Property,
            SymbolType::Field,
            SymbolType::Method,
            SymbolType::Constant,
        ]
    );
    assert_eq!(get_symbol(&symbols, "Contoso.Billing/Mode").symbol_type, SymbolType::Enum);
}

#[test]
fn test_organize_whole_document() {
    let (organized, rendered) = sharpen_text(LEDGER);

    assert_contained(&organized);
    assert_no_primary_constructors(&organized);
    assert_children(&organized, "Contoso.Billing", &["IAccount", "Mode", "Ledger"]);
    assert_children(
        &organized,
        "Contoso.Billing/Ledger",
        &["Limit", "_name", "Ledger", "Name", "Add", "Dispose", "_disposed"],
    );
    assert_eq!(rendered, ORGANIZED_LEDGER);
}

#[test]
fn test_organized_output_is_a_fixed_point() {
    let (_, once) = sharpen_text(LEDGER);
    let (_, twice) = sharpen_text(&once);
    assert_eq!(twice, once);
}

#[test]
fn test_bodied_namespaces_keep_their_types() {
    let text = "namespace Alpha
{
    public class Zeta
    {
        public void Run() { }

        private int _count;
    }

    public interface IAlpha
    {
    }
}";

    let (organized, rendered) = sharpen_text(text);
    assert_children(&organized, "Alpha", &["IAlpha", "Zeta"]);
    assert_children(&organized, "Alpha/Zeta", &["_count", "Run"]);
    assert_eq!(
        rendered,
        "namespace Alpha
{
    public interface IAlpha
    {
    }

    public class Zeta
    {
        private int _count;

        public void Run() { }
    }
}"
    );
}
