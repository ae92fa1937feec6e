//! Symbols module: Definition lookup, usages and duplicates
//!
//! Definitions are found by running an ordered rule table over every
//! project file. The first match wins; there is no disambiguation by
//! import context.

mod duplicates;
pub mod model;
mod paths;
mod resolver;
pub mod rules;

pub use duplicates::{find_duplicates, project_symbols};
pub use model::{DuplicateGroup, ProjectSymbol, SymbolInfo, SymbolKind, SymbolUsage};
pub use paths::resolve_path;
pub use resolver::{identifier_at, project_root_for, SymbolResolver};
pub use rules::{CompiledRules, DefinitionRule, RuleScope, DEFINITION_RULES};

#[cfg(test)]
mod tests;
