//! Route path, method and identifier normalization

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::METHOD_ALL;
use crate::pattern::compile;

const HTTP_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD", "CONNECT", "TRACE",
];

static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| compile(r"\{([A-Za-z_][A-Za-z0-9_]*)(?::[^}]*)?\}|:([A-Za-z_][A-Za-z0-9_]*)"));

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| compile(r"[^A-Za-z0-9]+"));

/// Upper-case a method name; `Any`/`All` become [`METHOD_ALL`].
///
/// Method constants such as `http.MethodPost` are read as the method they
/// name.
#[must_use]
pub fn normalize_method(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_matches('"');
    let name = match raw.rsplit_once('.') {
        Some((_, constant)) => constant.strip_prefix("Method").unwrap_or(constant),
        None => raw,
    };
    let upper = name.to_ascii_uppercase();
    if upper.is_empty() {
        return None;
    }
    if upper == "ALL" || upper == "ANY" {
        return Some(METHOD_ALL.to_string());
    }
    HTTP_METHODS.contains(&upper.as_str()).then_some(upper)
}

/// Leading slash, no empty segments, no trailing slash except for `/`
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.trim().split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Split a Go 1.22 `"METHOD /path"` pattern
#[must_use]
pub fn split_method_pattern(raw: &str) -> (Option<String>, &str) {
    let trimmed = raw.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((method, path)) => match normalize_method(method) {
            Some(method) => (Some(method), path.trim()),
            None => (None, trimmed),
        },
        None => (None, trimmed),
    }
}

/// Names of `{param}` and `:param` segments, in order
#[must_use]
pub fn path_params(path: &str) -> Vec<String> {
    PATH_PARAM
        .captures_iter(path)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Stable route key: every run of non-alphanumerics becomes one `-`
#[must_use]
pub fn route_id(method: &str, path: &str, handler: &str, file: &str, line: u32) -> String {
    let raw = format!("{method}-{path}-{handler}-{file}-{line}");
    NON_ALNUM
        .replace_all(&raw, "-")
        .trim_matches('-')
        .to_string()
}
