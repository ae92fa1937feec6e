//! Analyzer configuration

use crate::scanner::WalkFilter;

/// Default file that marks the root of a Go module
pub const DEFAULT_MODULE_MARKER: &str = "go.mod";

/// Default recursion bound for the data-flow tracer
pub const DEFAULT_MAX_TRACE_DEPTH: usize = 32;

/// Default cap on the number of lines kept in a verbatim snippet
pub const DEFAULT_SNIPPET_MAX_LINES: usize = 40;

/// Configuration shared by every analysis operation
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Which files and directories a project scan visits
    pub walk: WalkFilter,
    /// File whose presence marks a project root
    pub module_marker: String,
    /// Maximum call depth followed by the data-flow tracer
    pub max_trace_depth: usize,
    /// Maximum number of lines stored in a snippet
    pub snippet_max_lines: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            walk: WalkFilter::default(),
            module_marker: DEFAULT_MODULE_MARKER.to_string(),
            max_trace_depth: DEFAULT_MAX_TRACE_DEPTH,
            snippet_max_lines: DEFAULT_SNIPPET_MAX_LINES,
        }
    }
}

impl AnalyzerConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the traversal filter
    #[must_use]
    pub fn with_walk_filter(mut self, walk: WalkFilter) -> Self {
        self.walk = walk;
        self
    }

    /// Set the project root marker file
    #[must_use]
    pub fn with_module_marker(mut self, marker: impl Into<String>) -> Self {
        self.module_marker = marker.into();
        self
    }

    /// Set the tracer recursion bound
    #[must_use]
    pub fn with_max_trace_depth(mut self, depth: usize) -> Self {
        self.max_trace_depth = depth;
        self
    }

    /// Set the snippet line cap
    #[must_use]
    pub fn with_snippet_max_lines(mut self, lines: usize) -> Self {
        self.snippet_max_lines = lines.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.module_marker, "go.mod");
        assert_eq!(config.max_trace_depth, DEFAULT_MAX_TRACE_DEPTH);
        assert_eq!(config.snippet_max_lines, DEFAULT_SNIPPET_MAX_LINES);
        assert!(config.walk.skip_dirs.contains(&"vendor".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::new()
            .with_module_marker("go.work")
            .with_max_trace_depth(4)
            .with_snippet_max_lines(0);

        assert_eq!(config.module_marker, "go.work");
        assert_eq!(config.max_trace_depth, 4);
        assert_eq!(config.snippet_max_lines, 1);
    }
}
