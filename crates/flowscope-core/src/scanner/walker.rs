//! File walker: Discovers source files in a directory tree

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::text::relative_path;
use super::WalkFilter;
use crate::error::{AnalysisError, Result};

/// A file discovered during scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as produced by the walk (rooted at the scan root)
    pub path: PathBuf,
    /// Path relative to the scan root, with forward slashes
    pub rel_path: String,
}

impl DiscoveredFile {
    /// Build a discovered file from a path below `root`
    #[must_use]
    pub fn new(root: &Path, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rel_path = relative_path(root, &path);
        Self { path, rel_path }
    }

    /// Read the file content fresh from disk
    ///
    /// # Errors
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| AnalysisError::io(&self.path, e))
    }
}

/// Scanner for discovering source files in a directory
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    filter: WalkFilter,
}

impl Scanner {
    /// Create a new scanner for the given root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: WalkFilter::default(),
        }
    }

    /// Replace the traversal filter
    #[must_use]
    pub fn with_filter(mut self, filter: WalkFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Scan the directory and return discovered files in sorted walk order.
    ///
    /// Unreadable directories and entries are logged and skipped.
    pub fn scan(&self) -> impl Iterator<Item = DiscoveredFile> + '_ {
        let dir_filter = self.filter.clone();
        let respect = self.filter.respect_gitignore;

        WalkBuilder::new(&self.root)
            .hidden(false)
            .ignore(respect)
            .parents(respect)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| dir_filter.should_descend(name))
            })
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.filter.accepts_file(name))
            })
            .map(|entry| DiscoveredFile::new(&self.root, entry.into_path()))
    }

    /// Get the root directory being scanned
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the active traversal filter
    #[must_use]
    pub fn filter(&self) -> &WalkFilter {
        &self.filter
    }
}
