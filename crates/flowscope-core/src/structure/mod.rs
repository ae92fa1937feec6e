//! Structure module: per-file declaration extraction
//!
//! Recovers the package clause, imports, type declarations, constants,
//! variables, functions and comments of a single Go file.

mod comments;
mod extract;
pub mod model;
pub mod signature;

pub use comments::{doc_comment, extract_comments};
pub use extract::{extract_structure, StructureExtractor};
pub use model::{
    CodeStructure, FunctionDecl, Parameter, ProjectStructure, Receiver, StructDecl, StructField,
    StructureCounts, UNKNOWN_TYPE,
};
