//! CLI commands

pub mod analyze;
pub mod flow;
pub mod graph;
pub mod output;
pub mod routes;
pub mod serve;
pub mod symbols;
