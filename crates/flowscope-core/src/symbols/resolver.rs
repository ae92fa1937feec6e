//! Definition lookup and usage search over a project tree

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::model::{SymbolInfo, SymbolKind, SymbolUsage};
use super::rules::{CompiledRules, RuleMatch, RuleScope};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::pattern::compile;
use crate::scanner::{extract_block, join_snippet, Delimiter, Scanner};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| compile(r"\b[A-Za-z_][A-Za-z0-9_]*\b"));

/// Resolves symbol names to their declarations
#[derive(Debug, Clone)]
pub struct SymbolResolver {
    config: AnalyzerConfig,
}

impl SymbolResolver {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    fn scanner(&self, root: &Path) -> Scanner {
        Scanner::new(root).with_filter(self.config.walk.clone())
    }

    /// Resolve the identifier under a 1-based (line, column) cursor.
    ///
    /// The project root is the nearest ancestor holding the module marker,
    /// or the file's own directory when there is none.
    ///
    /// # Errors
    /// Returns an error if `file` cannot be read.
    pub fn find_definition(&self, file: &Path, line: u32, column: u32) -> Result<Option<SymbolInfo>> {
        let content = std::fs::read_to_string(file).map_err(|e| AnalysisError::io(file, e))?;
        let Some(text) = (line as usize).checked_sub(1).and_then(|idx| content.lines().nth(idx))
        else {
            return Ok(None);
        };
        let Some(name) = identifier_at(text, column) else {
            return Ok(None);
        };

        let root = project_root_for(file, &self.config.module_marker);
        debug!("Definition of {} from {}", name, root.display());
        Ok(self.find_symbol_in_project(&root, name))
    }

    /// First declaration of `name` under `root`.
    ///
    /// Files are searched in walk order; within a file the rule table is
    /// tried in priority order. The earliest hit wins even when the name is
    /// declared in several places.
    #[must_use]
    pub fn find_symbol_in_project(&self, root: &Path, name: &str) -> Option<SymbolInfo> {
        let rules = CompiledRules::for_name(name);

        for file in self.scanner(root).scan() {
            let content = match file.read() {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping {}: {}", file.rel_path, e);
                    continue;
                }
            };
            let lines: Vec<&str> = content.lines().collect();
            if let Some(hit) = rules.find(&lines) {
                return Some(SymbolInfo {
                    name: name.to_string(),
                    kind: hit.kind,
                    file_path: file.rel_path.clone(),
                    absolute_path: file.path.display().to_string(),
                    line: u32::try_from(hit.line + 1).unwrap_or(u32::MAX),
                    snippet: self.snippet(&lines, hit),
                });
            }
        }
        None
    }

    /// Every line under `root` containing `name` as plain text
    #[must_use]
    pub fn find_symbol_usage(&self, root: &Path, name: &str) -> Vec<SymbolUsage> {
        let mut usages = Vec::new();
        if name.is_empty() {
            return usages;
        }

        for file in self.scanner(root).scan() {
            let content = match file.read() {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping {}: {}", file.rel_path, e);
                    continue;
                }
            };
            for (idx, line) in content.lines().enumerate() {
                let Some(byte_col) = line.find(name) else {
                    continue;
                };
                usages.push(SymbolUsage {
                    file_path: file.rel_path.clone(),
                    line: u32::try_from(idx + 1).unwrap_or(u32::MAX),
                    column: u32::try_from(line[..byte_col].chars().count() + 1).unwrap_or(u32::MAX),
                    text: line.trim().to_string(),
                });
            }
        }
        usages
    }

    fn snippet(&self, lines: &[&str], hit: RuleMatch) -> String {
        let max = self.config.snippet_max_lines;
        match (hit.kind, hit.scope) {
            (SymbolKind::ShortVar, _) | (_, RuleScope::Group(_)) => {
                join_snippet(lines, hit.line, hit.line, max)
            }
            _ => {
                let block = extract_block(lines, hit.line, Delimiter::Brace);
                join_snippet(lines, block.start, block.end, max)
            }
        }
    }
}

/// The identifier covering a 1-based character column, or ending just
/// before it
#[must_use]
pub fn identifier_at(line: &str, column: u32) -> Option<&str> {
    let col = (column as usize).checked_sub(1)?;
    let offset = line
        .char_indices()
        .nth(col)
        .map_or(line.len(), |(byte, _)| byte);

    IDENTIFIER
        .find_iter(line)
        .find(|m| m.start() <= offset && offset < m.end())
        .or_else(|| IDENTIFIER.find_iter(line).find(|m| m.end() == offset))
        .map(|m| m.as_str())
}

/// Nearest ancestor directory of `file` containing `marker`, falling back to
/// the file's own directory
#[must_use]
pub fn project_root_for(file: &Path, marker: &str) -> PathBuf {
    let start = file.parent().unwrap_or(file);
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
