//! Declaration extractor: one linear pass over a file's lines
//!
//! Each trimmed line is tested against an ordered statement table. On a
//! match the matching block primitive captures the whole construct and a
//! kind-specific parser fills in the structured fields. Lines that match
//! nothing are skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use super::comments::{doc_comment, extract_comments};
use super::model::{
    CodeStructure, DocComment, FunctionDecl, Import, InterfaceDecl, InterfaceMethod, StructDecl, StructField,
    TypeDecl, ValueDecl,
};
use super::signature::{is_func_header, parse_signature, split_top_level};
use crate::config::DEFAULT_SNIPPET_MAX_LINES;
use crate::pattern::compile;
use crate::scanner::{extract_block, find_line_comment, join_snippet, leading_comments, Block, Delimiter};

/// Optional generic parameter list on a type declaration
const TYPE_PARAMS: &str = r"(\[[A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*\s+[^\]]+\])?";

/// Statement starts, checked in this order; `func` headers are tried last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statement {
    Package,
    ImportGroup,
    Import,
    Struct,
    Interface,
    TypeGroup,
    TypeAlias,
    ConstGroup,
    Const,
    VarGroup,
    Var,
}

static STATEMENTS: Lazy<Vec<(Statement, Regex)>> = Lazy::new(|| {
    vec![
        (Statement::Package, compile(r"^package\s+([A-Za-z_]\w*)")),
        (Statement::ImportGroup, compile(r"^import\s*\(")),
        (
            Statement::Import,
            compile(r#"^import\s+(?:([A-Za-z_]\w*|\.|_)\s+)?"([^"]+)""#),
        ),
        (
            Statement::Struct,
            compile(&format!(r"^type\s+([A-Za-z_]\w*)\s*{TYPE_PARAMS}\s*struct\s*\{{")),
        ),
        (
            Statement::Interface,
            compile(&format!(r"^type\s+([A-Za-z_]\w*)\s*{TYPE_PARAMS}\s*interface\s*\{{")),
        ),
        (Statement::TypeGroup, compile(r"^type\s*\(")),
        (
            Statement::TypeAlias,
            compile(&format!(r"^type\s+([A-Za-z_]\w*)\s*{TYPE_PARAMS}\s*(=)?\s*(\S.*)$")),
        ),
        (Statement::ConstGroup, compile(r"^const\s*\(")),
        (Statement::Const, compile(r"^const\s+(\S.*)$")),
        (Statement::VarGroup, compile(r"^var\s*\(")),
        (Statement::Var, compile(r"^var\s+(\S.*)$")),
    ]
});

static IMPORT_SPEC: Lazy<Regex> =
    Lazy::new(|| compile(r#"^(?:([A-Za-z_]\w*|\.|_)\s+)?"([^"]+)""#));

static VALUE_SPEC: Lazy<Regex> = Lazy::new(|| {
    compile(r"^([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s*([^=]*?)\s*(?:=\s*(.*))?$")
});

static FIELD: Lazy<Regex> =
    Lazy::new(|| compile(r"^([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s+(\S.*)$"));

static TAG: Lazy<Regex> = Lazy::new(|| compile(r"`([^`]*)`"));

/// Which kind of value group a spec line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Const,
    Var,
}

/// Extracts a [`CodeStructure`] from Go source text
#[derive(Debug, Clone)]
pub struct StructureExtractor {
    snippet_max_lines: usize,
}

impl Default for StructureExtractor {
    fn default() -> Self {
        Self {
            snippet_max_lines: DEFAULT_SNIPPET_MAX_LINES,
        }
    }
}

/// Per-file extraction state
struct Pass<'a> {
    lines: Vec<&'a str>,
    out: CodeStructure,
    snippet_max_lines: usize,
}

impl StructureExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of lines kept in each declaration snippet
    #[must_use]
    pub fn with_snippet_max_lines(mut self, lines: usize) -> Self {
        self.snippet_max_lines = lines.max(1);
        self
    }

    /// Extract all declarations and comments from `content`
    #[must_use]
    pub fn extract(&self, content: &str, file_path: &str) -> CodeStructure {
        let lines: Vec<&str> = content.lines().collect();
        let mut pass = Pass {
            out: CodeStructure::empty(file_path),
            lines,
            snippet_max_lines: self.snippet_max_lines,
        };
        pass.run();
        pass.out.comments = extract_comments(&pass.lines);
        pass.out
    }
}

/// Extract with default settings
#[must_use]
pub fn extract_structure(content: &str, file_path: &str) -> CodeStructure {
    StructureExtractor::default().extract(content, file_path)
}

fn line_no(idx: usize) -> u32 {
    u32::try_from(idx + 1).unwrap_or(u32::MAX)
}

fn strip_comment(line: &str) -> &str {
    match find_line_comment(line) {
        Some(idx) => line[..idx].trim_end(),
        None => line,
    }
}

impl<'a> Pass<'a> {
    fn run(&mut self) {
        let mut i = 0;
        let mut in_type_group = false;

        while i < self.lines.len() {
            let line: &'a str = self.lines[i];
            let trimmed = strip_comment(line.trim());
            if trimmed.is_empty() {
                i += 1;
                continue;
            }

            if in_type_group {
                if trimmed.starts_with(')') {
                    in_type_group = false;
                    i += 1;
                    continue;
                }
                let as_decl = format!("type {trimmed}");
                i = self.statement(&as_decl, i) + 1;
                continue;
            }

            if STATEMENTS
                .iter()
                .any(|(kind, re)| *kind == Statement::TypeGroup && re.is_match(trimmed))
            {
                in_type_group = true;
                i += 1;
                continue;
            }

            i = self.statement(trimmed, i) + 1;
        }
    }

    /// Dispatch one statement start; returns the index of its last line
    fn statement(&mut self, trimmed: &str, i: usize) -> usize {
        let Some((kind, caps)) = STATEMENTS
            .iter()
            .find_map(|(kind, re)| re.captures(trimmed).map(|c| (*kind, c)))
        else {
            if is_func_header(trimmed) {
                return self.function(i);
            }
            return i;
        };

        match kind {
            Statement::Package => {
                if self.out.package.is_empty() {
                    self.out.package = caps[1].to_string();
                }
                i
            }
            Statement::ImportGroup => self.import_group(i),
            Statement::Import => {
                self.out.imports.push(Import {
                    path: caps[2].to_string(),
                    alias: caps.get(1).map(|m| m.as_str().to_string()),
                    line: line_no(i),
                });
                i
            }
            Statement::Struct => {
                let name = caps[1].to_string();
                let type_params = caps.get(2).map(|m| m.as_str().to_string());
                self.struct_decl(i, name, type_params)
            }
            Statement::Interface => {
                let name = caps[1].to_string();
                let type_params = caps.get(2).map(|m| m.as_str().to_string());
                self.interface_decl(i, name, type_params)
            }
            Statement::TypeAlias => {
                let block = extract_block(&self.lines, i, Delimiter::Brace);
                let decl = TypeDecl {
                    name: caps[1].to_string(),
                    type_params: caps.get(2).map(|m| m.as_str().to_string()),
                    underlying: caps[4].trim().to_string(),
                    alias: caps.get(3).is_some(),
                    line: line_no(i),
                    snippet: self.snippet(&block),
                    doc: self.doc(i),
                };
                self.out.types.push(decl);
                block.end
            }
            Statement::ConstGroup => self.value_group(i, ValueKind::Const),
            Statement::VarGroup => self.value_group(i, ValueKind::Var),
            Statement::Const => self.single_value(i, &caps[1], ValueKind::Const),
            Statement::Var => self.single_value(i, &caps[1], ValueKind::Var),
            Statement::TypeGroup => i,
        }
    }

    fn snippet(&self, block: &Block) -> String {
        join_snippet(&self.lines, block.start, block.end, self.snippet_max_lines)
    }

    fn doc(&self, i: usize) -> DocComment {
        doc_comment(leading_comments(&self.lines, i))
    }

    fn import_group(&mut self, i: usize) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Paren);
        for (offset, raw) in block.inner(&self.lines).iter().enumerate() {
            let spec = strip_comment(raw.trim());
            if let Some(caps) = IMPORT_SPEC.captures(spec) {
                self.out.imports.push(Import {
                    path: caps[2].to_string(),
                    alias: caps.get(1).map(|m| m.as_str().to_string()),
                    line: line_no(block.start + 1 + offset),
                });
            }
        }
        block.end
    }

    fn function(&mut self, i: usize) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Brace);
        let text = block.text(&self.lines);
        if let Some(sig) = parse_signature(&text) {
            let decl = FunctionDecl {
                name: sig.name,
                receiver: sig.receiver,
                type_params: sig.type_params,
                parameters: sig.parameters,
                return_types: sig.return_types,
                line: line_no(i),
                end_line: line_no(block.end),
                snippet: self.snippet(&block),
                doc: self.doc(i),
            };
            self.out.functions.push(decl);
        }
        block.end
    }

    fn struct_decl(&mut self, i: usize, name: String, type_params: Option<String>) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Brace);
        let fields = if block.start == block.end {
            inline_body(self.lines[i])
                .map(|body| {
                    body.split(';')
                        .filter_map(|spec| parse_fields(spec, None))
                        .flatten()
                        .collect()
                })
                .unwrap_or_default()
        } else {
            self.block_fields(&block)
        };

        let decl = StructDecl {
            name,
            type_params,
            fields,
            line: line_no(i),
            snippet: self.snippet(&block),
            doc: self.doc(i),
        };
        self.out.structs.push(decl);
        block.end
    }

    fn block_fields(&self, block: &Block) -> Vec<StructField> {
        let mut fields = Vec::new();
        let mut j = block.start + 1;
        while j < block.end {
            let raw = self.lines[j].trim();
            let comment = find_line_comment(raw).map(|idx| raw[idx + 2..].trim().to_string());
            let spec = strip_comment(raw).trim();
            if spec.is_empty() {
                j += 1;
                continue;
            }

            // Nested anonymous struct or interface spanning several lines
            let nested = extract_block(&self.lines, j, Delimiter::Brace);
            if nested.end > j && nested.end < block.end {
                let collapsed = format!("{} }}", spec.trim_end());
                if let Some(parsed) = parse_fields(&collapsed, comment) {
                    fields.extend(parsed);
                }
                j = nested.end + 1;
                continue;
            }

            if let Some(parsed) = parse_fields(spec, comment) {
                fields.extend(parsed);
            }
            j += 1;
        }
        fields
    }

    fn interface_decl(&mut self, i: usize, name: String, type_params: Option<String>) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Brace);
        let mut methods = Vec::new();
        let mut embeds = Vec::new();

        let specs: Vec<(usize, String)> = if block.start == block.end {
            inline_body(self.lines[i])
                .map(|body| {
                    body.split(';')
                        .map(|s| (i, s.trim().to_string()))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            block
                .inner(&self.lines)
                .iter()
                .enumerate()
                .map(|(offset, raw)| (block.start + 1 + offset, strip_comment(raw.trim()).to_string()))
                .collect()
        };

        for (idx, spec) in specs {
            if spec.is_empty() {
                continue;
            }
            if spec.contains('(') {
                if let Some(sig) = parse_signature(&format!("func {spec}")) {
                    methods.push(InterfaceMethod {
                        name: sig.name,
                        parameters: sig.parameters,
                        return_types: sig.return_types,
                        line: line_no(idx),
                    });
                }
            } else {
                embeds.push(spec);
            }
        }

        let decl = InterfaceDecl {
            name,
            type_params,
            methods,
            embeds,
            line: line_no(i),
            snippet: self.snippet(&block),
            doc: self.doc(i),
        };
        self.out.interfaces.push(decl);
        block.end
    }

    fn value_group(&mut self, i: usize, kind: ValueKind) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Paren);
        let mut j = block.start + 1;
        while j < block.end {
            let spec = strip_comment(self.lines[j].trim());
            if spec.is_empty() {
                j += 1;
                continue;
            }
            let value_block = extract_block(&self.lines, j, Delimiter::Brace);
            let end = value_block.end.min(block.end.saturating_sub(1)).max(j);
            let snippet = join_snippet(&self.lines, j, end, self.snippet_max_lines);
            let doc = self.doc(j);
            self.push_values(spec, j, &snippet, &doc, kind);
            j = end + 1;
        }
        block.end
    }

    fn single_value(&mut self, i: usize, spec: &str, kind: ValueKind) -> usize {
        let block = extract_block(&self.lines, i, Delimiter::Brace);
        let snippet = self.snippet(&block);
        let doc = self.doc(i);
        self.push_values(spec, i, &snippet, &doc, kind);
        block.end
    }

    fn push_values(
        &mut self,
        spec: &str,
        idx: usize,
        snippet: &str,
        doc: &DocComment,
        kind: ValueKind,
    ) {
        for decl in parse_value_spec(spec, line_no(idx), snippet, doc) {
            match kind {
                ValueKind::Const => self.out.constants.push(decl),
                ValueKind::Var => self.out.variables.push(decl),
            }
        }
    }
}

/// Text between the first `{` and the last `}` of a one-line declaration
fn inline_body(line: &str) -> Option<&str> {
    let open = line.find('{')?;
    let close = line.rfind('}')?;
    (close > open).then(|| &line[open + 1..close])
}

/// Parse one field spec into one or more fields
fn parse_fields(spec: &str, comment: Option<String>) -> Option<Vec<StructField>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    let tag = TAG.captures(spec).map(|c| c[1].to_string());
    let without_tag = TAG.replace(spec, "");
    let body = without_tag.trim();

    if let Some(caps) = FIELD.captures(body) {
        let type_name = caps[2].trim().to_string();
        let fields = caps[1]
            .split(',')
            .map(|name| StructField {
                name: name.trim().to_string(),
                type_name: type_name.clone(),
                tag: tag.clone(),
                comment: comment.clone(),
                embedded: false,
            })
            .collect();
        return Some(fields);
    }

    // Embedded field: `Base`, `*Base`, `pkg.Base`
    let type_name = body.to_string();
    let base = body.trim_start_matches('*');
    let name = base.rsplit('.').next().unwrap_or(base).to_string();
    if name.is_empty() {
        return None;
    }
    Some(vec![StructField {
        name,
        type_name,
        tag,
        comment,
        embedded: true,
    }])
}

/// Parse `a, b Type = 1, 2` into one declaration per name
fn parse_value_spec(
    spec: &str,
    line: u32,
    snippet: &str,
    doc: &DocComment,
) -> Vec<ValueDecl> {
    let Some(caps) = VALUE_SPEC.captures(spec.trim()) else {
        return Vec::new();
    };
    let names: Vec<&str> = caps[1].split(',').map(str::trim).collect();
    let type_name = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let raw_value = caps.get(3).map(|m| m.as_str().trim().to_string());
    let values: Vec<String> = raw_value
        .as_deref()
        .map(|v| split_top_level(v, ','))
        .unwrap_or_default();

    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let value = if values.len() == names.len() {
                values.get(idx).cloned()
            } else {
                raw_value.clone()
            };
            ValueDecl {
                name: (*name).to_string(),
                type_name: type_name.clone(),
                value,
                line,
                snippet: snippet.to_string(),
                doc: doc.clone(),
            }
        })
        .collect()
}
