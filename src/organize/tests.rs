use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::symbols::{ParentRef, Symbol, SymbolId};
use crate::syntax::{AccessModifier, SymbolType};

// ============================================================================
// FIXTURES
// ============================================================================

fn member(symbol_type: SymbolType, name: &str, access: AccessModifier, body: &str) -> Symbol {
    let mut symbol = Symbol::with_body(symbol_type, name, body);
    symbol.access = access;
    symbol
}

fn field(name: &str, access: AccessModifier) -> Symbol {
    member(SymbolType::Field, name, access, &format!("    {access} int {name};"))
}

fn method(name: &str) -> Symbol {
    member(
        SymbolType::Method,
        name,
        AccessModifier::Public,
        &format!("    public void {name}() {{ }}"),
    )
}

fn adopt_children(parent: &mut Symbol) {
    let parent_ref = ParentRef::of(parent);
    for child in &mut parent.children {
        child.parent = Some(parent_ref.clone());
    }
}

fn class(name: &str, implements: &[&str], children: Vec<Symbol>) -> Symbol {
    let base_list = if implements.is_empty() {
        String::new()
    } else {
        format!(" : {}", implements.join(", "))
    };
    let mut class = Symbol::with_block(SymbolType::Class, name, format!("public class {name}{base_list}\n{{"), "}");
    class.access = AccessModifier::Public;
    class.implements = implements.iter().map(|i| i.to_string()).collect();
    class.children = children;
    adopt_children(&mut class);
    class
}

fn names(symbols: &[Symbol]) -> Vec<&str> {
    symbols.iter().map(|s| s.name.as_str()).collect()
}

fn id_of(symbol: &Symbol, name: &str) -> SymbolId {
    symbol.children.iter().find(|c| c.name == name).unwrap().id
}

fn child<'a>(symbol: &'a Symbol, name: &str) -> &'a Symbol {
    symbol.children.iter().find(|c| c.name == name).unwrap()
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_fields_precede_members_and_public_precedes_private() {
    let ledger = class(
        "Ledger",
        &[],
        vec![
            method("Post"),
            field("_balance", AccessModifier::Private),
            member(SymbolType::Property, "Total", AccessModifier::Public, "    public int Total { get; }"),
            field("Currency", AccessModifier::Public),
        ],
    );

    let organized = Organizer::default().organize(vec![ledger]);
    assert_eq!(names(&organized[0].children), vec!["Currency", "_balance", "Total", "Post"]);
}

#[test]
fn test_namespace_level_places_directives_first() {
    let symbols = vec![
        class("Zeta", &[], Vec::new()),
        member(SymbolType::Interface, "IShape", AccessModifier::Public, "public interface IShape { }"),
        member(SymbolType::Using, "System.Text", AccessModifier::None, "using System.Text;"),
        member(SymbolType::Using, "System", AccessModifier::None, "using System;"),
        member(SymbolType::Enum, "Color", AccessModifier::Public, "public enum Color { }"),
    ];

    let organized = Organizer::default().organize(symbols);
    assert_eq!(names(&organized), vec!["System", "System.Text", "IShape", "Color", "Zeta"]);
}

#[test]
fn test_unlisted_types_sort_last_in_first_occurrence_order() {
    let policy = OrganizePolicy {
        ordering: vec![OrderKey::Type],
        type_sort: vec![SymbolType::Field],
        ..OrganizePolicy::unchanged()
    };
    let organizer = Organizer::new(policy.clone(), policy, Vec::new());

    let symbols = vec![
        method("Run"),
        member(SymbolType::Property, "Size", AccessModifier::Public, "int Size { get; }"),
        field("count", AccessModifier::Private),
        method("Stop"),
    ];
    let organized = organizer.organize(symbols);
    assert_eq!(names(&organized), vec!["count", "Run", "Stop", "Size"]);
}

#[test]
fn test_name_order_is_case_insensitive_then_ordinal() {
    let policy = OrganizePolicy {
        ordering: vec![OrderKey::Name],
        type_sort: vec![SymbolType::Method],
        ..OrganizePolicy::unchanged()
    };
    let organizer = Organizer::new(policy.clone(), policy, Vec::new());

    let organized = organizer.organize(vec![method("beta"), method("alpha"), method("Alpha")]);
    assert_eq!(names(&organized), vec!["Alpha", "alpha", "beta"]);
}

#[test]
fn test_primary_constructor_is_dropped_from_sorted_members() {
    let mut person = Symbol::with_block(SymbolType::RecordClass, "Person", "public record Person(string Name)\n{", "}");
    person.children = vec![
        Symbol::new(SymbolType::PrimaryConstructor, "Person"),
        member(SymbolType::Property, "Display", AccessModifier::Public, "    public string Display => Name;"),
    ];
    adopt_children(&mut person);

    let organized = Organizer::default().organize(vec![person]);
    assert_eq!(names(&organized[0].children), vec!["Display"]);
}

#[test]
fn test_unchanged_policy_keeps_order_and_labels() {
    let symbols = vec![
        class("B", &["IDisposable"], vec![method("Dispose"), field("_disposed", AccessModifier::Private)]),
        member(SymbolType::Using, "System", AccessModifier::None, "using System;"),
        class("A", &[], vec![method("Z"), method("Y")]),
    ];
    let before: Vec<String> = symbols.iter().map(Symbol::text).collect();

    let organized = Organizer::unchanged().organize(symbols);
    assert_eq!(names(&organized), vec!["B", "System", "A"]);
    assert_eq!(names(&organized[2].children), vec!["Z", "Y"]);
    assert!(organized.iter().flat_map(Symbol::descendants).all(|s| s.regions.is_empty()));
    let after: Vec<String> = organized.iter().map(Symbol::text).collect();
    assert_eq!(after, before);
}

#[test]
fn test_leaf_symbols_never_gain_children() {
    let symbols = vec![class(
        "Outer",
        &[],
        vec![class("Inner", &[], vec![field("a", AccessModifier::Private)]), method("Run")],
    )];

    let organized = Organizer::default().organize(symbols);
    for symbol in organized.iter().flat_map(Symbol::descendants) {
        if !symbol.can_have_children() {
            assert!(symbol.children.is_empty(), "{} has children", symbol.name);
        }
    }
}

// ============================================================================
// REGIONS
// ============================================================================

fn threshold_policy(threshold: usize) -> OrganizePolicy {
    OrganizePolicy {
        regionalization: vec![RegionKey::Access, RegionKey::Type],
        region_threshold: threshold,
        ..OrganizePolicy::unchanged()
    }
}

#[test]
fn test_region_key_combines_access_and_plural_type() {
    let symbol = field("a", AccessModifier::Private);
    assert_eq!(region_key(&symbol, &[RegionKey::Access, RegionKey::Type]), "private fields");
    assert_eq!(region_key(&symbol, &[RegionKey::Type]), "fields");
    assert_eq!(region_key(&symbol, &[RegionKey::Access]), "private");
}

#[test]
fn test_members_without_access_share_the_none_region() {
    let policy = OrganizePolicy {
        regionalization: vec![RegionKey::Access],
        region_threshold: 1,
        ..OrganizePolicy::unchanged()
    };
    let mut symbols = vec![
        field("a", AccessModifier::None),
        field("b", AccessModifier::None),
        field("c", AccessModifier::Private),
    ];

    assert_eq!(region_key(&symbols[0], &policy.regionalization), "none");
    assert_eq!(regionalize(&policy, &mut symbols, &[]), 1);
    assert_eq!(symbols[0].regions.start.as_deref(), Some("none"));
    assert_eq!(symbols[1].regions.end.as_deref(), Some(""));
    assert!(symbols[2].regions.is_empty());
}

#[test]
fn test_run_at_threshold_is_not_wrapped() {
    let mut symbols = vec![
        field("a", AccessModifier::Private),
        field("b", AccessModifier::Private),
        method("Run"),
    ];

    assert_eq!(regionalize(&threshold_policy(2), &mut symbols, &[]), 0);
    assert!(symbols.iter().all(|s| s.regions.is_empty()));
}

#[test]
fn test_run_above_threshold_is_wrapped() {
    let mut symbols = vec![
        field("a", AccessModifier::Private),
        field("b", AccessModifier::Private),
        field("c", AccessModifier::Private),
        method("Run"),
    ];

    assert_eq!(regionalize(&threshold_policy(2), &mut symbols, &[]), 1);
    assert_eq!(symbols[0].regions.start.as_deref(), Some("private fields"));
    assert_eq!(symbols[0].regions.end, None);
    assert!(symbols[1].regions.is_empty());
    assert_eq!(symbols[2].regions.start, None);
    assert_eq!(symbols[2].regions.end.as_deref(), Some(""));
    assert!(symbols[3].regions.is_empty());
}

#[test]
fn test_excluded_members_do_not_break_or_join_runs() {
    let mut policy = threshold_policy(1);
    policy.do_not_regionalize_types = vec![SymbolType::Method];

    let mut symbols = vec![
        field("a", AccessModifier::Private),
        method("Run"),
        field("b", AccessModifier::Private),
    ];
    assert_eq!(regionalize(&policy, &mut symbols, &[]), 1);
    assert_eq!(symbols[0].regions.start.as_deref(), Some("private fields"));
    assert!(symbols[1].regions.is_empty());
    assert_eq!(symbols[2].regions.end.as_deref(), Some(""));
}

#[test]
fn test_interface_members_are_not_regionalized() {
    let mut contract = Symbol::with_block(SymbolType::Interface, "IShape", "public interface IShape\n{", "}");
    contract.children = (0..8)
        .map(|i| member(SymbolType::Method, &format!("M{i}"), AccessModifier::Public, &format!("    void M{i}();")))
        .collect();
    adopt_children(&mut contract);

    let organized = Organizer::default().organize(vec![contract]);
    assert!(organized[0].children.iter().all(|s| s.regions.is_empty()));
}

#[test]
fn test_type_level_regions_render() {
    let children = (0..6).map(|i| field(&format!("f{i}"), AccessModifier::Private)).collect();
    let organized = Organizer::default().organize(vec![class("Grid", &[], children)]);

    let text = organized[0].text();
    assert!(text.starts_with("public class Grid\n{\n    #region private fields\n    private int f0;\n"));
    assert!(text.ends_with("    private int f5;\n    #endregion\n}"));
}

// ============================================================================
// CAPABILITIES
// ============================================================================

#[test]
fn test_capability_expansion() {
    let list = |names: &[&str]| Capability::expand(&names.iter().map(|n| n.to_string()).collect::<Vec<_>>());

    assert_eq!(
        list(&["IList"]),
        vec![Capability::List, Capability::Collection, Capability::Enumerable]
    );
    assert_eq!(list(&["IDisposable", "IAsyncDisposable"]), vec![Capability::Disposable]);
    assert_eq!(list(&["Bogus", "ICloneable"]), vec![Capability::Cloneable]);
    assert_eq!(
        list(&["*"]),
        vec![
            Capability::Disposable,
            Capability::List,
            Capability::Collection,
            Capability::Enumerable,
            Capability::Cloneable,
            Capability::Comparable,
            Capability::Convertible,
            Capability::Formattable,
            Capability::EqualityComparer,
            Capability::Equatable,
        ]
    );
}

#[rstest]
#[case("IDisposable", Capability::Disposable, true)]
#[case("IComparable<Ledger>", Capability::Comparable, true)]
#[case("IComparable", Capability::Comparable, true)]
#[case("IEquatable", Capability::Equatable, false)]
#[case("IEquatable<Money>", Capability::Equatable, true)]
#[case("ICloneable<T>", Capability::Cloneable, false)]
#[case("IDisposableThing", Capability::Disposable, false)]
fn test_direct_implementation(#[case] declared: &str, #[case] capability: Capability, #[case] expected: bool) {
    let symbol = class("C", &[declared], vec![method("Run")]);
    assert_eq!(does_implement(&symbol, capability, &[]), expected);
}

#[test]
fn test_transitive_implementation_through_sibling_interface() {
    let mut base = Symbol::with_block(SymbolType::Interface, "IRepository", "public interface IRepository\n{", "}");
    base.implements = vec!["IEnumerable<Item>".to_string()];
    let repository = class("Repository", &["IRepository"], vec![method("GetEnumerator")]);
    let symbols = vec![base, repository];

    assert!(does_implement(&symbols[1], Capability::Enumerable, &symbols));
    assert!(!does_implement(&symbols[1], Capability::Disposable, &symbols));
}

#[test]
fn test_cyclic_contracts_terminate() {
    let symbols = vec![
        class("A", &["B"], vec![method("Run")]),
        class("B", &["A"], vec![method("Run")]),
    ];
    assert!(!does_implement(&symbols[0], Capability::Disposable, &symbols));
}

fn resource() -> Symbol {
    let mut disposed = field("_disposed", AccessModifier::Private);
    disposed.return_type = Some("bool".to_string());
    disposed.body = "    private bool _disposed;".to_string();

    class(
        "Resource",
        &["IDisposable"],
        vec![
            method("Dispose"),
            disposed,
            method("Run"),
            member(SymbolType::Finalizer, "~Resource", AccessModifier::None, "    ~Resource() { }"),
        ],
    )
}

#[test]
fn test_disposable_members_form_one_region() {
    let mut symbols = vec![resource()];
    assert_eq!(regionalize_capabilities(&mut symbols, &[Capability::Disposable]), 1);

    let resource = &symbols[0];
    let group = resource.region_group("IDisposable").unwrap();
    assert_eq!(
        group.symbols,
        vec![
            id_of(resource, "Dispose"),
            id_of(resource, "_disposed"),
            id_of(resource, "~Resource"),
        ]
    );
    assert_eq!(child(resource, "Dispose").regions.start.as_deref(), Some("IDisposable"));
    assert_eq!(child(resource, "~Resource").regions.end.as_deref(), Some(""));
    assert!(child(resource, "Run").regions.is_empty());
}

#[test]
fn test_capability_regionalization_is_idempotent() {
    let mut resource = resource();

    let mut first = Vec::new();
    assert!(regionalize_capability(&mut resource, Capability::Disposable, &mut first, None));
    assert!(!regionalize_capability(&mut resource, Capability::AsyncDisposable, &mut first, None));

    let mut second = Vec::new();
    assert!(!regionalize_capability(&mut resource, Capability::Disposable, &mut second, None));

    assert_eq!(resource.region_groups.len(), 1);
    assert_eq!(resource.region_groups[0].symbols.len(), 3);
}

#[test]
fn test_list_region_pulls_in_collection_and_enumeration() {
    let mut bag = class(
        "Bag",
        &["IList<int>"],
        vec![
            member(SymbolType::Property, "Count", AccessModifier::Public, "    public int Count => 0;"),
            member(SymbolType::Property, "IsReadOnly", AccessModifier::Public, "    public bool IsReadOnly => false;"),
            member(SymbolType::Indexer, "this[]", AccessModifier::Public, "    public int this[int i] => 0;"),
            method("Add"),
            method("GetEnumerator"),
            method("IndexOf"),
            method("Other"),
        ],
    );

    let mut regionalized = Vec::new();
    assert!(regionalize_capability(&mut bag, Capability::List, &mut regionalized, None));
    assert_eq!(
        regionalized,
        vec![Capability::List, Capability::Collection, Capability::Enumerable]
    );

    assert_eq!(bag.region_groups.len(), 1);
    let group = bag.region_group("IList").unwrap();
    let grouped: Vec<&str> = group
        .symbols
        .iter()
        .map(|id| bag.child(*id).unwrap().name.as_str())
        .collect();
    assert_eq!(grouped, vec!["GetEnumerator", "Count", "IsReadOnly", "Add", "this[]", "IndexOf"]);
    assert_eq!(child(&bag, "GetEnumerator").regions.start.as_deref(), Some("IList"));
    assert_eq!(child(&bag, "IndexOf").regions.end.as_deref(), Some(""));
    assert!(child(&bag, "Count").regions.is_empty());
}

#[test]
fn test_small_contracts_share_the_interfaces_region() {
    let mut symbols = vec![class(
        "Money",
        &["ICloneable", "IEquatable<Money>"],
        vec![method("Equals"), method("Clone"), method("ToString")],
    )];

    let enabled = Capability::expand(&["*".to_string()]);
    assert_eq!(regionalize_capabilities(&mut symbols, &enabled), 2);

    let money = &symbols[0];
    assert_eq!(money.region_groups.len(), 1);
    let group = money.region_group(capabilities::SHARED_REGION).unwrap();
    assert_eq!(group.symbols, vec![id_of(money, "Clone"), id_of(money, "Equals")]);
    assert_eq!(child(money, "Clone").regions.start.as_deref(), Some("interfaces"));
    assert_eq!(child(money, "Clone").regions.end, None);
    assert_eq!(child(money, "Equals").regions.end.as_deref(), Some(""));
    assert!(child(money, "ToString").regions.is_empty());
}

#[test]
fn test_class_without_matching_members_gets_no_region() {
    let mut symbols = vec![class("Handle", &["IDisposable"], vec![method("Close")])];
    assert_eq!(regionalize_capabilities(&mut symbols, &[Capability::Disposable]), 0);
    assert!(symbols[0].region_groups.is_empty());
}

#[test]
fn test_capability_region_moves_to_end_and_renders() {
    let organized = Organizer::default().organize(vec![resource()]);
    let resource = &organized[0];

    assert_eq!(names(&resource.children), vec!["Run", "Dispose", "_disposed", "~Resource"]);
    assert_eq!(
        resource.text(),
        "public class Resource : IDisposable\n{\n    public void Run() { }\n\n    #region IDisposable\n    public void Dispose() { }\n\n    private bool _disposed;\n\n    ~Resource() { }\n    #endregion\n}"
    );
}

#[test]
fn test_organizing_twice_is_stable() {
    let organizer = Organizer::default();
    let mut children: Vec<Symbol> = (0..6).map(|i| field(&format!("f{i}"), AccessModifier::Private)).collect();
    children.push(method("Run"));
    let mut disposed = field("_disposed", AccessModifier::Private);
    disposed.return_type = Some("bool".to_string());
    children.push(disposed);
    children.push(method("Dispose"));

    let once = organizer.organize(vec![class("Pool", &["IDisposable"], children)]);
    let twice = organizer.organize(once.clone());
    assert_eq!(twice[0].text(), once[0].text());
}

#[test]
fn test_capability_labels_and_serde() {
    assert_eq!(Capability::EqualityComparer.to_string(), "IEqualityComparer");
    assert_eq!("IList".parse::<Capability>().unwrap(), Capability::List);
    assert!("IUnknown".parse::<Capability>().is_err());

    let parsed: Vec<Capability> = serde_json::from_str(r#"["IDisposable", "IFormattable"]"#).unwrap();
    assert_eq!(parsed, vec![Capability::Disposable, Capability::Formattable]);
}

#[test]
fn test_policy_overlay_and_serde() {
    let mut policy = OrganizePolicy::type_level();
    let json = r#"{ "typeSort": ["using", "method", "field"], "regionThreshold": 2 }"#;
    let overlay: OrganizePolicy = serde_json::from_str(json).unwrap();
    policy.overlay(&overlay);

    assert_eq!(policy.type_sort, vec![SymbolType::Method, SymbolType::Field]);
    assert_eq!(policy.region_threshold, 2);
    assert_eq!(policy.ordering, vec![OrderKey::Type, OrderKey::Access, OrderKey::Name]);
    assert_eq!(policy.do_not_regionalize_members_of, vec![SymbolType::Interface]);
}
