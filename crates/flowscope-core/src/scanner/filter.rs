//! Traversal predicate: which directories to enter and which files to keep

/// Source file suffix scanned by default
pub const DEFAULT_SOURCE_SUFFIX: &str = ".go";

/// Suffix of test files excluded by default
pub const DEFAULT_TEST_SUFFIX: &str = "_test.go";

/// Directory names never descended into by default
pub const DEFAULT_SKIP_DIRS: &[&str] = &["vendor", "node_modules"];

/// Filter applied while walking a project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkFilter {
    /// Suffix a file name must end with to be collected
    pub source_suffix: String,
    /// Suffix marking test files
    pub test_suffix: String,
    /// Directory names to skip
    pub skip_dirs: Vec<String>,
    /// Skip directories whose name starts with a dot
    pub skip_hidden_dirs: bool,
    /// Collect test files as well
    pub include_tests: bool,
    /// Honour .gitignore files found in the tree
    pub respect_gitignore: bool,
}

impl Default for WalkFilter {
    fn default() -> Self {
        Self {
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            test_suffix: DEFAULT_TEST_SUFFIX.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| (*d).to_string()).collect(),
            skip_hidden_dirs: true,
            include_tests: false,
            respect_gitignore: false,
        }
    }
}

impl WalkFilter {
    /// Add a directory name to the skip list
    #[must_use]
    pub fn with_skip_dir(mut self, dir: impl Into<String>) -> Self {
        let dir = dir.into();
        if !self.skip_dirs.contains(&dir) {
            self.skip_dirs.push(dir);
        }
        self
    }

    /// Change the collected source suffix
    #[must_use]
    pub fn with_source_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.source_suffix = suffix.into();
        self
    }

    /// Collect test files too
    #[must_use]
    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Honour .gitignore rules
    #[must_use]
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Whether the walker should descend into a directory with this name
    #[must_use]
    pub fn should_descend(&self, dir_name: &str) -> bool {
        if self.skip_hidden_dirs && dir_name.starts_with('.') && dir_name.len() > 1 {
            return false;
        }
        !self.skip_dirs.iter().any(|d| d == dir_name)
    }

    /// Whether a file with this name is collected
    #[must_use]
    pub fn accepts_file(&self, file_name: &str) -> bool {
        if !file_name.ends_with(&self.source_suffix) {
            return false;
        }
        self.include_tests || !file_name.ends_with(&self.test_suffix)
    }
}
