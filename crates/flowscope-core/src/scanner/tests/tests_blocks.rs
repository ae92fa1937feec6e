//! Tests for delimiter-balanced block extraction

use crate::scanner::{extract_block, Block, Delimiter};

fn lines(src: &str) -> Vec<&str> {
    src.lines().collect()
}

#[test]
fn test_brace_block_simple_function() {
    let src = "func a() {\n\treturn\n}\nfunc b() {}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace), Block { start: 0, end: 2 });
    assert_eq!(extract_block(&l, 3, Delimiter::Brace), Block { start: 3, end: 3 });
}

#[test]
fn test_brace_block_nested() {
    let src = "func a() {\n\tif x {\n\t\tfor {\n\t\t}\n\t}\n}\n// after";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 5);
}

#[test]
fn test_brace_in_string_literal_is_ignored() {
    let src = "type S struct {\n\tA string `json:\"a{\"`\n}\nfunc f() {\n\ts := \"foo{bar\"\n\t_ = s\n}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 2);
    assert_eq!(extract_block(&l, 3, Delimiter::Brace).end, 6);
}

#[test]
fn test_brace_in_comments_and_runes_is_ignored() {
    let src = "func f() {\n\t// closing } here\n\t/* { */\n\tr := '{'\n\t_ = r\n}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 5);
}

#[test]
fn test_brace_in_multiline_raw_string_is_ignored() {
    let src = "func q() string {\n\treturn `\n}\n{`\n}\nfunc next() {}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 4);
}

#[test]
fn test_escaped_quote_does_not_end_string() {
    let src = "func f() {\n\ts := \"a\\\"}\"\n}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 2);
}

#[test]
fn test_multiline_signature() {
    let src = "func Long(\n\ta int,\n\tb string,\n) (int, error) {\n\treturn 0, nil\n}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 5);
}

#[test]
fn test_bodyless_function_is_single_line() {
    let src = "func asmAdd(a, b int) int\n\nfunc other() {\n}";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 0);
}

#[test]
fn test_unterminated_block_runs_to_end() {
    let src = "func broken() {\n\tx := 1\n";
    let l = lines(src);

    assert_eq!(extract_block(&l, 0, Delimiter::Brace).end, 1);
}

#[test]
fn test_paren_block_import_group() {
    let src = "import (\n\t\"fmt\"\n\t\"net/http\"\n)\n\nfunc main() {}";
    let l = lines(src);

    let block = extract_block(&l, 0, Delimiter::Paren);
    assert_eq!(block.end, 3);
    assert_eq!(block.inner(&l), &["\t\"fmt\"", "\t\"net/http\""]);
}

#[test]
fn test_paren_block_single_line_statement() {
    let l = lines("import \"fmt\"\nfunc main() {}");
    assert_eq!(extract_block(&l, 0, Delimiter::Paren).end, 0);
}

#[test]
fn test_block_text_and_line_count() {
    let l = lines("type A struct {\n\tX int\n}");
    let block = extract_block(&l, 0, Delimiter::Brace);

    assert_eq!(block.line_count(), 3);
    assert_eq!(block.text(&l), "type A struct {\n\tX int\n}");
}

#[test]
fn test_start_past_end() {
    let l = lines("package main");
    assert_eq!(extract_block(&l, 5, Delimiter::Brace), Block { start: 5, end: 5 });
}
