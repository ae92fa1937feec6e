//! IPC surface: JSON requests dispatched to [`Analyzer`] operations
//!
//! One request per line: `{"id": .., "method": "..", "params": {..}}`.
//! Every request gets exactly one response line, `{"id", "result"}` or
//! `{"id", "error": {"message"}}`; a malformed line never stops the loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analyzer::Analyzer;
use crate::error::{AnalysisError, Result};

/// Operation names accepted by [`handle_method`]
pub const METHODS: &[&str] = &[
    "analyze_file",
    "analyze_project",
    "find_duplicate_symbols",
    "get_definition",
    "get_symbol_info",
    "find_symbol_usages",
    "analyze_call_graph",
    "discover_routes",
    "trace_api_flow",
    "resolve_path",
];

#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub message: String,
}

impl RpcResponse {
    fn error(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(RpcError {
                message: message.into(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct FileParams {
    #[serde(alias = "file", alias = "file_path")]
    path: PathBuf,
}

#[derive(Deserialize)]
struct ProjectParams {
    #[serde(alias = "project", alias = "project_path")]
    root: PathBuf,
}

#[derive(Deserialize)]
struct DefinitionParams {
    #[serde(alias = "path", alias = "file_path")]
    file: PathBuf,
    line: u32,
    column: u32,
}

#[derive(Deserialize)]
struct SymbolParams {
    #[serde(alias = "project", alias = "project_path")]
    root: PathBuf,
    #[serde(alias = "symbol")]
    name: String,
}

#[derive(Deserialize)]
struct TraceParams {
    #[serde(alias = "project", alias = "project_path")]
    root: PathBuf,
    #[serde(alias = "id")]
    route_id: String,
}

#[derive(Deserialize)]
struct ResolvePathParams {
    #[serde(alias = "project", alias = "project_path")]
    root: PathBuf,
    #[serde(alias = "input")]
    path: String,
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| AnalysisError::InvalidRequest(format!("{method}: {e}")))
}

/// Run one named operation
///
/// # Errors
/// Returns an error for an unknown method, params that do not fit the
/// method, or a failure of the operation itself.
pub fn handle_method(analyzer: &Analyzer, method: &str, params: Value) -> Result<Value> {
    debug!("IPC request: {}", method);
    let value = match method {
        "analyze_file" => {
            let p: FileParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.analyze_file(&p.path))?
        }
        "analyze_project" => {
            let p: ProjectParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.analyze_project(&p.root)?)?
        }
        "find_duplicate_symbols" => {
            let p: ProjectParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.find_duplicate_symbols(&p.root)?)?
        }
        "get_definition" => {
            let p: DefinitionParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.get_definition(&p.file, p.line, p.column)?)?
        }
        "get_symbol_info" => {
            let p: SymbolParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.get_symbol_info(&p.root, &p.name)?)?
        }
        "find_symbol_usages" => {
            let p: SymbolParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.find_symbol_usages(&p.root, &p.name)?)?
        }
        "analyze_call_graph" => {
            let p: ProjectParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.analyze_call_graph(&p.root)?)?
        }
        "discover_routes" => {
            let p: ProjectParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.discover_routes(&p.root)?)?
        }
        "trace_api_flow" => {
            let p: TraceParams = parse_params(method, params)?;
            serde_json::to_value(analyzer.trace_api_flow(&p.root, &p.route_id)?)?
        }
        "resolve_path" => {
            let p: ResolvePathParams = parse_params(method, params)?;
            Value::String(analyzer.resolve_path(&p.root, &p.path))
        }
        other => return Err(AnalysisError::UnknownMethod(other.to_string())),
    };
    Ok(value)
}

/// Answer one decoded request
#[must_use]
pub fn handle_request(analyzer: &Analyzer, request: RpcRequest) -> RpcResponse {
    let id = request.id.clone();
    match handle_method(analyzer, &request.method, request.params) {
        Ok(value) => RpcResponse {
            id,
            result: Some(value),
            error: None,
        },
        Err(e) => {
            warn!("{} failed: {}", request.method, e);
            RpcResponse::error(id, e.to_string())
        }
    }
}

/// Answer one raw request line
#[must_use]
pub fn handle_line(analyzer: &Analyzer, line: &str) -> RpcResponse {
    match serde_json::from_str::<RpcRequest>(line) {
        Ok(request) => handle_request(analyzer, request),
        Err(e) => RpcResponse::error(
            Value::Null,
            AnalysisError::InvalidRequest(e.to_string()).to_string(),
        ),
    }
}

/// Serve requests from `reader` until end of input, one response line each
///
/// # Errors
/// Returns an error if reading a line or writing a response fails.
pub fn serve<R: BufRead, W: Write>(analyzer: &Analyzer, reader: R, mut writer: W) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(analyzer, &line);
        serde_json::to_writer(&mut writer, &response)?;
        writeln!(writer)?;
        writer.flush()?;
    }
    Ok(())
}
