//! Ordered definition rules
//!
//! Each rule pairs a line pattern with the kind it classifies. Rules are
//! tried strictly in table order and the first hit wins, so a `type Foo
//! struct` is reported before a later `var Foo`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::SymbolKind;
use crate::pattern::{compile, with_name};
use crate::scanner::{extract_block, Delimiter};

/// Where a rule's pattern is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Every line of the file
    Line,
    /// Spec lines inside a `keyword ( ... )` group
    Group(&'static str),
}

/// One row of the definition table
#[derive(Debug, Clone, Copy)]
pub struct DefinitionRule {
    pub kind: SymbolKind,
    pub scope: RuleScope,
    /// Pattern with `{name}` standing for the escaped symbol name
    pub template: &'static str,
}

static CONST_GROUP: Lazy<Regex> = Lazy::new(|| compile(r"^\s*const\s*\("));
static VAR_GROUP: Lazy<Regex> = Lazy::new(|| compile(r"^\s*var\s*\("));

/// Spec line inside a const/var group naming `{name}`
const GROUP_SPEC: &str = r"^\s*(?:[A-Za-z_]\w*\s*,\s*)*{name}(?:\s*[=,]|\s+[A-Za-z_*\[(]|\s*$)";

pub const DEFINITION_RULES: &[DefinitionRule] = &[
    DefinitionRule {
        kind: SymbolKind::Function,
        scope: RuleScope::Line,
        template: r"^\s*func\s+{name}\s*[\[(]",
    },
    DefinitionRule {
        kind: SymbolKind::Method,
        scope: RuleScope::Line,
        template: r"^\s*func\s*\(\s*(?:[A-Za-z_]\w*\s+)?[A-Za-z_][\w.\[\], ]*\)\s*{name}\s*[\[(]",
    },
    DefinitionRule {
        kind: SymbolKind::Method,
        scope: RuleScope::Line,
        template: r"^\s*func\s*\(\s*(?:[A-Za-z_]\w*\s+)?\*\s*[A-Za-z_][\w.\[\], ]*\)\s*{name}\s*[\[(]",
    },
    DefinitionRule {
        kind: SymbolKind::Struct,
        scope: RuleScope::Line,
        template: r"^\s*type\s+{name}\s*(?:\[[^\]]*\])?\s*struct\b",
    },
    DefinitionRule {
        kind: SymbolKind::Interface,
        scope: RuleScope::Line,
        template: r"^\s*type\s+{name}\s*(?:\[[^\]]*\])?\s*interface\b",
    },
    DefinitionRule {
        kind: SymbolKind::TypeAlias,
        scope: RuleScope::Line,
        template: r"^\s*type\s+{name}\b",
    },
    DefinitionRule {
        kind: SymbolKind::Constant,
        scope: RuleScope::Line,
        template: r"^\s*const\s+(?:[A-Za-z_]\w*\s*,\s*)*{name}\b",
    },
    DefinitionRule {
        kind: SymbolKind::Constant,
        scope: RuleScope::Group("const"),
        template: GROUP_SPEC,
    },
    DefinitionRule {
        kind: SymbolKind::Variable,
        scope: RuleScope::Line,
        template: r"^\s*var\s+(?:[A-Za-z_]\w*\s*,\s*)*{name}\b",
    },
    DefinitionRule {
        kind: SymbolKind::Variable,
        scope: RuleScope::Group("var"),
        template: GROUP_SPEC,
    },
    DefinitionRule {
        kind: SymbolKind::ShortVar,
        scope: RuleScope::Line,
        template: r"(?:^|[\s,(]){name}\s*(?:,\s*[A-Za-z_]\w*\s*)*:=",
    },
];

/// A definition hit within one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub kind: SymbolKind,
    pub scope: RuleScope,
    /// 0-based line index
    pub line: usize,
}

/// Rules compiled for one symbol name
pub struct CompiledRules {
    rules: Vec<(DefinitionRule, Regex)>,
}

impl CompiledRules {
    /// Compile the table for `name`. Names that do not form a valid pattern
    /// yield an empty rule set.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        let rules = DEFINITION_RULES
            .iter()
            .filter_map(|rule| with_name(rule.template, name).map(|re| (*rule, re)))
            .collect();
        Self { rules }
    }

    /// First hit in table order, then line order
    #[must_use]
    pub fn find(&self, lines: &[&str]) -> Option<RuleMatch> {
        self.rules.iter().find_map(|(rule, re)| {
            let line = match rule.scope {
                RuleScope::Line => lines.iter().position(|l| re.is_match(l)),
                RuleScope::Group(keyword) => find_in_groups(lines, keyword, re),
            }?;
            Some(RuleMatch {
                kind: rule.kind,
                scope: rule.scope,
                line,
            })
        })
    }
}

/// Opening line of a `keyword ( ... )` group
fn group_opener(keyword: &str) -> Option<&'static Regex> {
    match keyword {
        "const" => Some(&CONST_GROUP),
        "var" => Some(&VAR_GROUP),
        _ => None,
    }
}

fn find_in_groups(lines: &[&str], keyword: &str, re: &Regex) -> Option<usize> {
    let opener = group_opener(keyword)?;
    let mut i = 0;
    while i < lines.len() {
        if !opener.is_match(lines[i]) {
            i += 1;
            continue;
        }
        let block = extract_block(lines, i, Delimiter::Paren);
        if let Some(offset) = block.inner(lines).iter().position(|l| re.is_match(l)) {
            return Some(block.start + 1 + offset);
        }
        i = block.end + 1;
    }
    None
}
