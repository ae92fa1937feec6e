//! Ordered heuristics for node roles and edge labels
//!
//! Every table is checked top to bottom and the first matching row wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{DataType, FlowNodeKind, Transformation};
use crate::pattern::compile;

/// One row of the role table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub kind: FlowNodeKind,
    /// Substrings looked for in the lower-cased callee name
    pub name_markers: &'static [&'static str],
    /// Substrings looked for in the lower-cased call-site line
    pub content_markers: &'static [&'static str],
}

pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        kind: FlowNodeKind::Dto,
        name_markers: &["dto", "model", "request", "response"],
        content_markers: &["dto", "model", "request", "response", "json.marshal", "json.unmarshal"],
    },
    ClassificationRule {
        kind: FlowNodeKind::Database,
        name_markers: &["db", "query", "exec", "scan"],
        content_markers: &["select ", "insert into", "update ", "delete from", "db.", "sql."],
    },
    ClassificationRule {
        kind: FlowNodeKind::Repository,
        name_markers: &["repo", "find", "save", "get", "create"],
        content_markers: &["repo"],
    },
    ClassificationRule {
        kind: FlowNodeKind::External,
        name_markers: &["http", "client", "api"],
        content_markers: &["http.", "client.", ".do("],
    },
];

/// Role of a callee; [`FlowNodeKind::Service`] when no rule matches
#[must_use]
pub fn classify_call(name: &str, call_site: &str) -> FlowNodeKind {
    let name = name.to_lowercase();
    let content = call_site.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| {
            rule.name_markers.iter().any(|m| name.contains(m))
                || rule.content_markers.iter().any(|m| content.contains(m))
        })
        .map_or(FlowNodeKind::Service, |rule| rule.kind)
}

const DATA_TYPE_RULES: &[(DataType, &[&str])] = &[
    (DataType::Json, &["json"]),
    (DataType::Xml, &["xml"]),
    (DataType::Array, &["[]", "append(", "slice", "list"]),
    (DataType::Number, &["strconv.atoi", "strconv.parse", "int(", "int64(", "float64(", "count"]),
    (DataType::Boolean, &["bool", "true", "false"]),
    (DataType::String, &["string(", "sprintf", "strings.", "\""]),
];

/// Data type carried along an edge, judged from the call-site text
#[must_use]
pub fn infer_data_type(call_site: &str) -> DataType {
    let content = call_site.to_lowercase();
    DATA_TYPE_RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| content.contains(m)))
        .map_or(DataType::Data, |(data_type, _)| *data_type)
}

const TRANSFORMATION_RULES: &[(Transformation, &[&str])] = &[
    (
        Transformation::JsonConversion,
        &["json.marshal", "json.unmarshal", ".encode(", ".decode("],
    ),
    (
        Transformation::TypeConversion,
        &["strconv.", "int(", "int64(", "float64(", "string(", ".(type)"],
    ),
    (
        Transformation::StringProcessing,
        &["strings.", "sprintf", "fmt.sprint", "regexp."],
    ),
];

/// Conversion applied at the call site, if any
#[must_use]
pub fn infer_transformation(call_site: &str) -> Option<Transformation> {
    let content = call_site.to_lowercase();
    TRANSFORMATION_RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| content.contains(m)))
        .map(|(t, _)| *t)
}

static SQL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?is)(?:`([^`]*\b(?:select|insert|update|delete)\b[^`]*)`|"((?:[^"\\]|\\.)*\b(?:select|insert|update|delete)\b(?:[^"\\]|\\.)*)")"#)
});

static SQL_TABLE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)\b(?:from|into|update|join)\s+([A-Za-z_][\w.]*)"));

/// First string literal in `text` that looks like SQL, whitespace collapsed
#[must_use]
pub fn extract_sql(text: &str) -> Option<String> {
    let caps = SQL_LITERAL.captures(text)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    Some(raw.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Table named after FROM / INTO / UPDATE / JOIN in a query
#[must_use]
pub fn extract_table(query: &str) -> Option<String> {
    SQL_TABLE.captures(query).map(|c| c[1].to_string())
}
