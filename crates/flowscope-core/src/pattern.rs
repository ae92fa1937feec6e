//! Regex construction helpers shared by the extractors

use regex::Regex;

/// Compile a pattern that is a compile-time constant of this crate.
///
/// # Panics
/// Panics if the pattern is not a valid regex, which only happens when a
/// constant in this crate is wrong.
#[allow(clippy::expect_used)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("flowscope: invalid built-in regex")
}

/// Build a pattern from a template where `{name}` stands for a literal symbol name
pub(crate) fn with_name(template: &str, name: &str) -> Option<Regex> {
    Regex::new(&template.replace("{name}", &regex::escape(name))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_name_escapes_metacharacters() {
        let re = with_name(r"^func\s+{name}\(", "a.b").expect("valid pattern");
        assert!(re.is_match("func a.b("));
        assert!(!re.is_match("func axb("));
    }
}
