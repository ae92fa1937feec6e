//! Analyzer: One entry point per analysis request
//!
//! Every call builds its own scanner and reads sources fresh from disk, so
//! an `Analyzer` holds nothing but configuration.

use std::path::Path;

use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::flow::{DataFlowGraph, FlowTracer, ProjectIndex};
use crate::graph::{build_call_graph, CallGraph};
use crate::routes::{discover_project_routes, ApiRoute};
use crate::scanner::{relative_path, Scanner};
use crate::structure::{CodeStructure, ProjectStructure, StructureCounts, StructureExtractor};
use crate::symbols::{
    find_duplicates, project_root_for, project_symbols, resolve_path, DuplicateGroup, SymbolInfo,
    SymbolResolver, SymbolUsage,
};

/// Runs analysis requests against Go source trees
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn extractor(&self) -> StructureExtractor {
        StructureExtractor::new().with_snippet_max_lines(self.config.snippet_max_lines)
    }

    fn resolver(&self) -> SymbolResolver {
        SymbolResolver::new(self.config.clone())
    }

    /// Scanner for a project-scoped request
    fn scanner(&self, root: &Path) -> Result<Scanner> {
        if !root.is_dir() {
            return Err(AnalysisError::NotADirectory(root.to_path_buf()));
        }
        Ok(Scanner::new(root).with_filter(self.config.walk.clone()))
    }

    /// Declarations of every readable project file, in scan order
    fn structures(&self, scanner: &Scanner) -> Vec<CodeStructure> {
        let extractor = self.extractor();
        scanner
            .scan()
            .filter_map(|file| match file.read() {
                Ok(content) => Some(extractor.extract(&content, &file.rel_path)),
                Err(e) => {
                    warn!("Skipping {}: {}", file.rel_path, e);
                    None
                }
            })
            .collect()
    }

    /// Extract the declarations of a single file.
    ///
    /// `file_path` is relative to the enclosing module root, as in a project
    /// scan. An unreadable file yields an empty structure.
    #[must_use]
    pub fn analyze_file(&self, path: &Path) -> CodeStructure {
        let root = project_root_for(path, &self.config.module_marker);
        let file_path = relative_path(&root, path);
        match std::fs::read_to_string(path) {
            Ok(content) => self.extractor().extract(&content, &file_path),
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                CodeStructure::empty(file_path)
            }
        }
    }

    /// Extract every project file and total the declaration counts
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn analyze_project(&self, root: &Path) -> Result<ProjectStructure> {
        let files = self.structures(&self.scanner(root)?);
        let mut counts = StructureCounts::default();
        for structure in &files {
            counts.add(structure);
        }
        info!(
            "Analyzed {}: {} files, {} functions, {} structs",
            root.display(),
            counts.files,
            counts.functions,
            counts.structs
        );
        Ok(ProjectStructure { files, counts })
    }

    /// Declarations sharing a (kind, name) across the project
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn find_duplicate_symbols(&self, root: &Path) -> Result<Vec<DuplicateGroup>> {
        let structures = self.structures(&self.scanner(root)?);
        let groups = find_duplicates(structures.iter().flat_map(project_symbols));
        info!("Found {} duplicate groups in {}", groups.len(), root.display());
        Ok(groups)
    }

    /// Definition of the identifier at a 1-based (line, column) in `file`
    ///
    /// # Errors
    /// Returns an error if `file` cannot be read.
    pub fn get_definition(&self, file: &Path, line: u32, column: u32) -> Result<Option<SymbolInfo>> {
        self.resolver().find_definition(file, line, column)
    }

    /// First declaration of `name` under `root`
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn get_symbol_info(&self, root: &Path, name: &str) -> Result<Option<SymbolInfo>> {
        self.scanner(root)?;
        Ok(self.resolver().find_symbol_in_project(root, name))
    }

    /// Every project line mentioning `name`
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn find_symbol_usages(&self, root: &Path, name: &str) -> Result<Vec<SymbolUsage>> {
        self.scanner(root)?;
        let usages = self.resolver().find_symbol_usage(root, name);
        info!("Found {} usages of {}", usages.len(), name);
        Ok(usages)
    }

    /// Call graph of the project with call targets resolved where possible
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn analyze_call_graph(&self, root: &Path) -> Result<CallGraph> {
        let graph = build_call_graph(&self.scanner(root)?);
        let stats = graph.stats();
        info!(
            "Call graph for {}: {} functions, {} calls ({} resolved)",
            root.display(),
            stats.functions,
            stats.calls,
            stats.resolved
        );
        Ok(graph)
    }

    /// Routes registered anywhere in the project, one per (method, path)
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn discover_routes(&self, root: &Path) -> Result<Vec<ApiRoute>> {
        let routes = discover_project_routes(&self.scanner(root)?);
        info!("Discovered {} routes in {}", routes.len(), root.display());
        Ok(routes)
    }

    /// Data-flow graph of the route with ID `route_id`
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory or no discovered route
    /// has that ID.
    pub fn trace_api_flow(&self, root: &Path, route_id: &str) -> Result<DataFlowGraph> {
        let scanner = self.scanner(root)?;
        let route = discover_project_routes(&scanner)
            .into_iter()
            .find(|r| r.id == route_id)
            .ok_or_else(|| AnalysisError::RouteNotFound(route_id.to_string()))?;

        let index = ProjectIndex::build(&scanner, &self.extractor());
        let graph = FlowTracer::new(&index, self.config.max_trace_depth).trace(&route);
        info!(
            "Traced {} {}: {} nodes, {} edges",
            route.method,
            route.path,
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    /// Resolve a user-supplied path against the project root
    #[must_use]
    pub fn resolve_path(&self, root: &Path, input: &str) -> String {
        resolve_path(root, input, &self.config.walk)
    }
}
