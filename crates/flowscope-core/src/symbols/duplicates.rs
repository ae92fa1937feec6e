//! Project-wide duplicate declaration detection

use std::collections::BTreeMap;

use super::model::{DuplicateGroup, ProjectSymbol, SymbolKind};
use crate::structure::CodeStructure;

/// Flatten one file's declarations into symbol records.
///
/// Methods are named `Receiver.Method` so that the same method name on two
/// types is not a duplicate.
#[must_use]
pub fn project_symbols(structure: &CodeStructure) -> Vec<ProjectSymbol> {
    let file = &structure.file_path;
    let record = |name: &str, kind: SymbolKind, line: u32| ProjectSymbol {
        name: name.to_string(),
        kind,
        file_path: file.clone(),
        line,
    };

    let mut symbols = Vec::new();
    for f in &structure.functions {
        symbols.push(match &f.receiver {
            Some(r) => record(&format!("{}.{}", r.type_name, f.name), SymbolKind::Method, f.line),
            None => record(&f.name, SymbolKind::Function, f.line),
        });
    }
    symbols.extend(structure.structs.iter().map(|s| record(&s.name, SymbolKind::Struct, s.line)));
    symbols.extend(
        structure
            .interfaces
            .iter()
            .map(|i| record(&i.name, SymbolKind::Interface, i.line)),
    );
    symbols.extend(structure.types.iter().map(|t| record(&t.name, SymbolKind::TypeAlias, t.line)));
    symbols.extend(
        structure
            .constants
            .iter()
            .map(|c| record(&c.name, SymbolKind::Constant, c.line)),
    );
    symbols.extend(
        structure
            .variables
            .iter()
            .map(|v| record(&v.name, SymbolKind::Variable, v.line)),
    );
    symbols.retain(|s| s.name != "_");
    symbols
}

/// Group symbols by (kind, name) and keep groups with more than one member.
///
/// Groups come out ordered by kind, then name; members keep input order.
#[must_use]
pub fn find_duplicates(symbols: impl IntoIterator<Item = ProjectSymbol>) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<(SymbolKind, String), Vec<ProjectSymbol>> = BTreeMap::new();
    for symbol in symbols {
        groups
            .entry((symbol.kind, symbol.name.clone()))
            .or_default()
            .push(symbol);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|((kind, name), symbols)| DuplicateGroup {
            kind,
            name,
            symbols,
        })
        .collect()
}
