//! Flow module: Request data-flow tracing
//!
//! Starts at a route, walks the handler body and follows project calls,
//! classifying each callee into a semantic role.

pub mod classify;
mod index;
pub mod model;
mod tracer;

pub use classify::{
    classify_call, extract_sql, extract_table, infer_data_type, infer_transformation,
    ClassificationRule, CLASSIFICATION_RULES,
};
pub use index::{FunctionRef, IndexedFile, ProjectIndex};
pub use model::{
    DataFlowEdge, DataFlowGraph, DataFlowNode, DataType, FlowNodeKind, NodeDetails,
    Transformation, EXTERNAL_FILE, UNKNOWN_FILE,
};
pub use tracer::{FlowTracer, TraceContext};

#[cfg(test)]
mod tests;
