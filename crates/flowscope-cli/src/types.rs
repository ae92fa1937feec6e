//! Command types shared between main and library

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use flowscope_core::config::DEFAULT_MAX_TRACE_DEPTH;
use flowscope_core::{AnalyzerConfig, WalkFilter};

#[derive(Parser, Debug)]
#[command(name = "flowscope")]
#[command(author, version, about = "Heuristic structural analysis of Go projects", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned tables
    #[default]
    Text,
    /// The serialized result
    Json,
}

/// Traversal and tracing options shared by every command
#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    /// Additional directory name to skip (repeatable)
    #[arg(long = "skip-dir", global = true, value_name = "NAME")]
    pub skip_dirs: Vec<String>,

    /// Include `_test.go` files
    #[arg(long, global = true)]
    pub include_tests: bool,

    /// Honour .gitignore files
    #[arg(long, global = true)]
    pub gitignore: bool,

    /// Maximum call depth followed when tracing a route
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TRACE_DEPTH)]
    pub max_depth: usize,
}

impl WalkArgs {
    /// Analyzer configuration for these options
    #[must_use]
    pub fn config(&self) -> AnalyzerConfig {
        let filter = self
            .skip_dirs
            .iter()
            .fold(WalkFilter::default(), |f, dir| f.with_skip_dir(dir.as_str()))
            .with_tests(self.include_tests)
            .with_gitignore(self.gitignore);
        AnalyzerConfig::new()
            .with_walk_filter(filter)
            .with_max_trace_depth(self.max_depth)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the declarations of one Go file
    File {
        /// Path to the file
        path: PathBuf,
    },
    /// Extract the declarations of every file in a project
    Project {
        /// Project root directory
        root: PathBuf,
    },
    /// List declarations that share a kind and name
    Duplicates {
        /// Project root directory
        root: PathBuf,
    },
    /// Find the definition of the identifier at a position
    Definition {
        /// File containing the identifier
        file: PathBuf,
        /// 1-based line
        line: u32,
        /// 1-based column
        column: u32,
    },
    /// Look up where a symbol is declared
    Symbol {
        /// Project root directory
        root: PathBuf,
        /// Symbol name
        name: String,
    },
    /// List every line mentioning a symbol
    Usages {
        /// Project root directory
        root: PathBuf,
        /// Symbol name
        name: String,
    },
    /// Build the function call graph
    Calls {
        /// Project root directory
        root: PathBuf,
    },
    /// List HTTP route registrations
    Routes {
        /// Project root directory
        root: PathBuf,
    },
    /// Trace the data flow of one route
    Trace {
        /// Project root directory
        root: PathBuf,
        /// Route ID as printed by `routes`
        route_id: String,
    },
    /// Resolve a path against a project root
    Resolve {
        /// Project root directory
        root: PathBuf,
        /// Absolute, relative or partial path
        path: String,
    },
    /// Answer JSON-lines requests on stdin until end of input
    Serve,
}
