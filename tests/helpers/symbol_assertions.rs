//! Symbol tree assertion helpers.

use sharpen::{Symbol, SymbolType};

/// Names of `symbols`, in order.
pub fn names(symbols: &[Symbol]) -> Vec<&str> {
    symbols.iter().map(|s| s.name.as_str()).collect()
}

/// Follow a `/`-separated path of names from the file level.
pub fn get_symbol<'a>(symbols: &'a [Symbol], path: &str) -> &'a Symbol {
    let mut current = symbols;
    let mut found = None;
    for name in path.split('/') {
        let symbol = current
            .iter()
            .find(|s| s.name.as_str() == name)
            .unwrap_or_else(|| panic!("Expected symbol '{}' in path '{}', found {:?}", name, path, names(current)));
        current = &symbol.children;
        found = Some(symbol);
    }
    found.unwrap_or_else(|| panic!("Empty symbol path"))
}

/// Assert the children of the symbol at `path` are named `expected`, in order.
pub fn assert_children(symbols: &[Symbol], path: &str, expected: &[&str]) {
    let symbol = get_symbol(symbols, path);
    assert_eq!(
        names(&symbol.children),
        expected,
        "Unexpected children of '{}'",
        path
    );
}

/// Assert every child sits under a container and points back at it.
pub fn assert_contained(symbols: &[Symbol]) {
    for symbol in symbols {
        if !symbol.can_have_children() {
            assert!(
                symbol.children.is_empty(),
                "'{}' ({:?}) cannot own children",
                symbol.name,
                symbol.symbol_type
            );
        }
        for child in &symbol.children {
            let parent = child
                .parent
                .as_ref()
                .unwrap_or_else(|| panic!("'{}' has no parent reference", child.name));
            assert_eq!(parent.id, symbol.id, "'{}' points at the wrong parent", child.name);
        }
        assert_contained(&symbol.children);
    }
}

/// Assert no primary constructor would be written back.
pub fn assert_no_primary_constructors(symbols: &[Symbol]) {
    for symbol in symbols.iter().flat_map(|s| s.descendants()) {
        assert_ne!(
            symbol.symbol_type,
            SymbolType::PrimaryConstructor,
            "primary constructor '{}' survived",
            symbol.name
        );
    }
}
