//! Data-flow graph model types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::structure::Parameter;

/// File recorded for a callee outside the project
pub const EXTERNAL_FILE: &str = "external";

/// File recorded for a callee that could not be located
pub const UNKNOWN_FILE: &str = "unknown";

/// Semantic role of a node in a request's data path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowNodeKind {
    Route,
    Handler,
    Service,
    Dto,
    Repository,
    Database,
    External,
}

impl std::fmt::Display for FlowNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Route => "route",
            Self::Handler => "handler",
            Self::Service => "service",
            Self::Dto => "dto",
            Self::Repository => "repository",
            Self::Database => "database",
            Self::External => "external",
        };
        write!(f, "{s}")
    }
}

/// Kind-specific node metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDetails {
    Route {
        method: String,
        path: String,
        path_params: Vec<String>,
    },
    Handler {
        parameters: Vec<Parameter>,
        return_types: Vec<String>,
    },
    Service {
        parameters: Vec<Parameter>,
        return_types: Vec<String>,
    },
    Dto {
        fields: Vec<String>,
    },
    Repository {
        parameters: Vec<Parameter>,
        return_types: Vec<String>,
    },
    Database {
        query: Option<String>,
        table: Option<String>,
    },
    External {
        target: Option<String>,
    },
}

impl NodeDetails {
    #[must_use]
    pub fn kind(&self) -> FlowNodeKind {
        match self {
            Self::Route { .. } => FlowNodeKind::Route,
            Self::Handler { .. } => FlowNodeKind::Handler,
            Self::Service { .. } => FlowNodeKind::Service,
            Self::Dto { .. } => FlowNodeKind::Dto,
            Self::Repository { .. } => FlowNodeKind::Repository,
            Self::Database { .. } => FlowNodeKind::Database,
            Self::External { .. } => FlowNodeKind::External,
        }
    }
}

/// A node of the data-flow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowNode {
    /// Identifier, unique within one trace
    pub id: String,
    pub name: String,
    /// Declaring file, or [`EXTERNAL_FILE`] / [`UNKNOWN_FILE`]
    pub file_path: String,
    pub line: Option<u32>,
    pub excerpt: Option<String>,
    #[serde(flatten)]
    pub details: NodeDetails,
}

impl DataFlowNode {
    /// Create a node with a fresh identifier
    #[must_use]
    pub fn new(name: impl Into<String>, file_path: impl Into<String>, details: NodeDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            file_path: file_path.into(),
            line: None,
            excerpt: None,
            details,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> FlowNodeKind {
        self.details.kind()
    }

    /// Whether the node points into project source
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.file_path != EXTERNAL_FILE && self.file_path != UNKNOWN_FILE
    }
}

/// Data type label on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
    String,
    Number,
    Boolean,
    Array,
    Data,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Data => "Data",
        };
        write!(f, "{s}")
    }
}

/// Conversion performed at a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transformation {
    #[serde(rename = "JSON Conversion")]
    JsonConversion,
    #[serde(rename = "Type Conversion")]
    TypeConversion,
    #[serde(rename = "String Processing")]
    StringProcessing,
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::JsonConversion => "JSON Conversion",
            Self::TypeConversion => "Type Conversion",
            Self::StringProcessing => "String Processing",
        };
        write!(f, "{s}")
    }
}

/// A directed edge between two node IDs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowEdge {
    pub source: String,
    pub target: String,
    pub data_type: Option<DataType>,
    pub transformation: Option<Transformation>,
}

/// Result of tracing one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowGraph {
    pub nodes: Vec<DataFlowNode>,
    pub edges: Vec<DataFlowEdge>,
}

impl DataFlowGraph {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DataFlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node with this name
    #[must_use]
    pub fn node_named(&self, name: &str) -> Option<&DataFlowNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    #[must_use]
    pub fn nodes_of_kind(&self, kind: FlowNodeKind) -> Vec<&DataFlowNode> {
        self.nodes.iter().filter(|n| n.kind() == kind).collect()
    }

    /// Whether an edge runs from the node named `from` to the node named `to`
    #[must_use]
    pub fn has_edge_between(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| {
            self.node(&e.source).is_some_and(|n| n.name == from)
                && self.node(&e.target).is_some_and(|n| n.name == to)
        })
    }
}
