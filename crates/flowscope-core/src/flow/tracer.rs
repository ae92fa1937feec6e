//! Recursive request data-flow tracing from a route

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::classify::{classify_call, extract_sql, extract_table, infer_data_type, infer_transformation};
use super::index::{FunctionRef, ProjectIndex};
use super::model::{
    DataFlowEdge, DataFlowGraph, DataFlowNode, FlowNodeKind, NodeDetails, EXTERNAL_FILE,
    UNKNOWN_FILE,
};
use crate::graph::{scan_calls, CallSite};
use crate::routes::{path_params, ApiRoute};

/// Mutable state of one trace.
///
/// Nodes are deduplicated by (name, kind), edges by (source, target), and a
/// function body is expanded at most once per (file, function).
#[derive(Debug, Default)]
pub struct TraceContext {
    graph: DataFlowGraph,
    node_index: HashMap<(String, FlowNodeKind), String>,
    edge_index: HashSet<(String, String)>,
    processed: HashSet<(String, String)>,
}

impl TraceContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing node for (name, kind)
    #[must_use]
    pub fn node_id(&self, name: &str, kind: FlowNodeKind) -> Option<&str> {
        self.node_index
            .get(&(name.to_string(), kind))
            .map(String::as_str)
    }

    /// Insert a node unless one with the same (name, kind) exists; returns
    /// the ID of the node in the graph and whether it was newly added
    pub fn add_node(&mut self, node: DataFlowNode) -> (String, bool) {
        let key = (node.name.clone(), node.kind());
        if let Some(id) = self.node_index.get(&key) {
            return (id.clone(), false);
        }
        let id = node.id.clone();
        self.node_index.insert(key, id.clone());
        self.graph.nodes.push(node);
        (id, true)
    }

    /// Add an edge unless the (source, target) pair is already connected
    pub fn add_edge(&mut self, edge: DataFlowEdge) -> bool {
        if !self
            .edge_index
            .insert((edge.source.clone(), edge.target.clone()))
        {
            return false;
        }
        self.graph.edges.push(edge);
        true
    }

    /// Record a function as expanded; false if it already was
    pub fn mark_processed(&mut self, file: &str, function: &str) -> bool {
        self.processed
            .insert((file.to_string(), function.to_string()))
    }

    #[must_use]
    pub fn into_graph(self) -> DataFlowGraph {
        self.graph
    }
}

/// Traces routes through the functions of one project index
#[derive(Debug)]
pub struct FlowTracer<'a> {
    index: &'a ProjectIndex,
    max_depth: usize,
}

impl<'a> FlowTracer<'a> {
    #[must_use]
    pub fn new(index: &'a ProjectIndex, max_depth: usize) -> Self {
        Self { index, max_depth }
    }

    /// Build the data-flow graph of one route
    #[must_use]
    pub fn trace(&self, route: &ApiRoute) -> DataFlowGraph {
        let mut ctx = TraceContext::new();

        let mut route_node = DataFlowNode::new(
            format!("{} {}", route.method, route.path),
            route.file_path.clone(),
            NodeDetails::Route {
                method: route.method.clone(),
                path: route.path.clone(),
                path_params: path_params(&route.path),
            },
        )
        .with_line(route.line);
        route_node.excerpt = route.snippet.clone();
        let (route_id, _) = ctx.add_node(route_node);

        match self.find_handler(route) {
            Some(handler) => {
                let node = DataFlowNode::new(
                    handler.decl.name.clone(),
                    handler.file.rel_path.clone(),
                    NodeDetails::Handler {
                        parameters: handler.decl.parameters.clone(),
                        return_types: handler.decl.return_types.clone(),
                    },
                )
                .with_line(handler.decl.line)
                .with_excerpt(handler.decl.snippet.clone());
                let (handler_id, _) = ctx.add_node(node);
                let body = handler.body_text();
                ctx.add_edge(DataFlowEdge {
                    source: route_id,
                    target: handler_id.clone(),
                    data_type: Some(infer_data_type(&body)),
                    transformation: infer_transformation(&body),
                });
                ctx.mark_processed(&handler.file.rel_path, &handler.decl.name);
                self.walk(&mut ctx, handler, &handler_id, 1);
            }
            None => {
                debug!("Handler {} not found, using stub", route.handler);
                let mut node = DataFlowNode::new(
                    route.handler_name(),
                    UNKNOWN_FILE,
                    NodeDetails::Handler {
                        parameters: Vec::new(),
                        return_types: Vec::new(),
                    },
                );
                node.excerpt = route.snippet.clone();
                let (handler_id, _) = ctx.add_node(node);
                ctx.add_edge(DataFlowEdge {
                    source: route_id,
                    target: handler_id,
                    data_type: None,
                    transformation: None,
                });
            }
        }

        ctx.into_graph()
    }

    /// Handler declaration for a route. A handler type resolves to its
    /// `ServeHTTP` method.
    fn find_handler(&self, route: &ApiRoute) -> Option<FunctionRef<'a>> {
        let name = route.handler_name();
        let qualifier = route
            .handler
            .rsplit_once('.')
            .map(|(q, _)| q.rsplit('.').next().unwrap_or(q));
        self.index
            .find_handler(name, qualifier, &route.file_path)
            .or_else(|| self.index.serve_http_of(name))
    }

    /// Follow every retained call in `function`'s body
    fn walk(&self, ctx: &mut TraceContext, function: FunctionRef<'a>, node_id: &str, depth: usize) {
        if depth > self.max_depth {
            debug!("Depth limit reached in {}", function.decl.name);
            return;
        }

        for (_, line) in function.body_lines() {
            for site in scan_calls(line) {
                let callee = self
                    .index
                    .find_callee(&site.name, site.qualifier.as_deref(), function);
                let kind = classify_call(&site.name, line);
                let node = self.callee_node(&site, kind, callee, line);
                let (target_id, _) = ctx.add_node(node);

                ctx.add_edge(DataFlowEdge {
                    source: node_id.to_string(),
                    target: target_id.clone(),
                    data_type: Some(infer_data_type(line)),
                    transformation: infer_transformation(line),
                });

                if let Some(callee) = callee {
                    if ctx.mark_processed(&callee.file.rel_path, &callee.decl.name) {
                        self.walk(ctx, callee, &target_id, depth + 1);
                    }
                }
            }
        }
    }

    fn callee_node(
        &self,
        site: &CallSite,
        kind: FlowNodeKind,
        callee: Option<FunctionRef<'a>>,
        call_site: &str,
    ) -> DataFlowNode {
        let details = match kind {
            FlowNodeKind::Dto => NodeDetails::Dto {
                fields: self.dto_fields(&site.name, callee),
            },
            FlowNodeKind::Database => {
                let query = extract_sql(call_site)
                    .or_else(|| callee.and_then(|f| extract_sql(&f.body_text())));
                let table = query.as_deref().and_then(extract_table);
                NodeDetails::Database { query, table }
            }
            FlowNodeKind::External => NodeDetails::External {
                target: Some(match &site.qualifier {
                    Some(q) => format!("{q}.{}", site.name),
                    None => site.name.clone(),
                }),
            },
            FlowNodeKind::Repository => NodeDetails::Repository {
                parameters: callee.map(|f| f.decl.parameters.clone()).unwrap_or_default(),
                return_types: callee.map(|f| f.decl.return_types.clone()).unwrap_or_default(),
            },
            FlowNodeKind::Route | FlowNodeKind::Handler | FlowNodeKind::Service => {
                NodeDetails::Service {
                    parameters: callee.map(|f| f.decl.parameters.clone()).unwrap_or_default(),
                    return_types: callee.map(|f| f.decl.return_types.clone()).unwrap_or_default(),
                }
            }
        };

        match callee {
            Some(f) => DataFlowNode::new(site.name.clone(), f.file.rel_path.clone(), details)
                .with_line(f.decl.line)
                .with_excerpt(f.decl.snippet.clone()),
            None => {
                let file = match &site.qualifier {
                    Some(q) if !self.index.has_package(q) => EXTERNAL_FILE,
                    _ => UNKNOWN_FILE,
                };
                DataFlowNode::new(site.name.clone(), file, details).with_excerpt(call_site.trim())
            }
        }
    }

    /// Field names of the struct a DTO call produces: the callee's first
    /// struct-typed result, else a struct named like the callee
    fn dto_fields(&self, name: &str, callee: Option<FunctionRef<'a>>) -> Vec<String> {
        let from_returns = callee.and_then(|f| {
            f.decl
                .return_types
                .iter()
                .find_map(|t| self.index.struct_named(base_type(t)))
        });
        from_returns
            .or_else(|| self.index.struct_named(name))
            .map(|s| s.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// `*[]pkg.User` -> `User`
fn base_type(type_name: &str) -> &str {
    let trimmed = type_name.trim_start_matches(['*', '[', ']']);
    trimmed.rsplit('.').next().unwrap_or(trimmed)
}
