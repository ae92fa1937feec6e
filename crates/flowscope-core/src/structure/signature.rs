//! Go function signature parsing
//!
//! Splits a `func` header into receiver, name, type parameters, parameter
//! list and result list. Parameter names and types follow Go grouping
//! (`a, b int`); a name with no type anywhere after it gets [`UNKNOWN_TYPE`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Parameter, Receiver, UNKNOWN_TYPE};
use crate::pattern::compile;

static FUNC_HEAD: Lazy<Regex> =
    Lazy::new(|| compile(r"^func(?:\s*\(([^)]*)\)\s*|\s+)([A-Za-z_][A-Za-z0-9_]*)\s*"));

static FUNC_HEADER_START: Lazy<Regex> =
    Lazy::new(|| compile(r"^func(?:\s*\([^)]*\)\s*|\s+)[A-Za-z_][A-Za-z0-9_]*\s*[\[(]"));

static IDENT: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z_][A-Za-z0-9_]*$"));

/// Type keywords that may start a type expression containing whitespace
const TYPE_KEYWORDS: &[&str] = &["chan", "func", "map", "struct", "interface"];

/// A parsed function header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub receiver: Option<Receiver>,
    pub name: String,
    pub type_params: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<String>,
}

/// Whether a trimmed line starts a named function declaration
#[must_use]
pub fn is_func_header(trimmed: &str) -> bool {
    FUNC_HEADER_START.is_match(trimmed)
}

/// Parse a function header. `header` may span several lines and may include
/// the body; parsing stops at the first top-level `{`.
#[must_use]
pub fn parse_signature(header: &str) -> Option<Signature> {
    let header = header.trim_start();
    let caps = FUNC_HEAD.captures(header)?;
    let name = caps.get(2)?.as_str().to_string();
    let receiver = caps.get(1).and_then(|m| parse_receiver(m.as_str()));
    let mut rest = &header[caps.get(0)?.end()..];

    let mut type_params = None;
    if rest.starts_with('[') {
        let (inner, after) = balanced(rest, '[', ']')?;
        type_params = Some(format!("[{inner}]"));
        rest = after.trim_start();
    }

    if !rest.starts_with('(') {
        return None;
    }
    let (params_text, after) = balanced(rest, '(', ')')?;
    let returns_text = until_body(after).trim();

    Some(Signature {
        receiver,
        name,
        type_params,
        parameters: parse_parameters(params_text),
        return_types: parse_results(returns_text),
    })
}

/// Parse a receiver clause body such as `h *Handler` or `Stack[T]`
#[must_use]
pub fn parse_receiver(text: &str) -> Option<Receiver> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let (name, ty) = match text.split_once(char::is_whitespace) {
        Some((n, t)) if IDENT.is_match(n) => (Some(n.to_string()), t.trim()),
        _ => (None, text),
    };
    let pointer = ty.starts_with('*');
    let base = ty.trim_start_matches('*').trim();
    let base = base.split('[').next().unwrap_or(base).trim();
    Some(Receiver {
        name,
        type_name: base.to_string(),
        pointer,
    })
}

/// Parse a parameter list body (without the surrounding parens)
#[must_use]
pub fn parse_parameters(text: &str) -> Vec<Parameter> {
    let tokens = split_top_level(text, ',');
    let parsed: Vec<(String, Option<String>)> = tokens
        .iter()
        .map(|token| match split_named(token) {
            Some((name, ty)) => (name, Some(ty)),
            None => (token.clone(), None),
        })
        .collect();

    let any_named = parsed.iter().any(|(_, ty)| ty.is_some());
    if !any_named {
        return parsed
            .into_iter()
            .map(|(ty, _)| Parameter {
                name: "_".to_string(),
                type_name: ty,
            })
            .collect();
    }

    let mut params = Vec::with_capacity(parsed.len());
    let mut next_type: Option<String> = None;
    for (name, ty) in parsed.into_iter().rev() {
        let type_name = match ty {
            Some(t) => {
                next_type = Some(t.clone());
                t
            }
            None => next_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        };
        params.push(Parameter { name, type_name });
    }
    params.reverse();
    params
}

/// Parse a result clause: a bare type, or a parenthesised list
#[must_use]
pub fn parse_results(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.starts_with('(') {
        return match balanced(text, '(', ')') {
            Some((inner, _)) => parse_parameters(inner)
                .into_iter()
                .map(|p| p.type_name)
                .collect(),
            None => vec![text.to_string()],
        };
    }
    vec![text.to_string()]
}

/// Split `name type` when the first word is a plain identifier
fn split_named(token: &str) -> Option<(String, String)> {
    let token = token.trim();
    let (first, rest) = token.split_once(char::is_whitespace)?;
    if !IDENT.is_match(first) || TYPE_KEYWORDS.contains(&first) {
        return None;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some((first.to_string(), rest.to_string()))
}

/// Split on `sep` outside (), [] and {}; empty pieces are dropped
#[must_use]
pub fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c == sep && depth == 0 {
            push_part(&mut parts, &current);
            current.clear();
        } else {
            current.push(c);
        }
    }
    push_part(&mut parts, &current);
    parts
}

fn push_part(parts: &mut Vec<String>, raw: &str) {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        parts.push(collapsed);
    }
}

/// Given text starting with `open`, return the inner text and the remainder
/// after the matching `close`
fn balanced(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some((&text[open.len_utf8()..idx], &text[idx + close.len_utf8()..]));
            }
        }
    }
    None
}

/// Text before the body-opening brace at nesting depth zero
fn until_body(text: &str) -> &str {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '{' if depth == 0 && !preceded_by_type_keyword(&text[..idx]) => return &text[..idx],
            _ => {}
        }
    }
    text
}

/// `interface{}` and `struct{}` in a result type are not the body
fn preceded_by_type_keyword(before: &str) -> bool {
    let before = before.trim_end();
    before.ends_with("interface") || before.ends_with("struct")
}
