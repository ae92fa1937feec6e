//! Serve command: JSON-lines requests over stdin/stdout

use anyhow::Result;
use flowscope_core::{ipc, Analyzer};
use tracing::info;

/// Answer requests from stdin until it closes
///
/// # Errors
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub fn run(analyzer: &Analyzer) -> Result<()> {
    info!("Serving requests on stdin ({} methods)", ipc::METHODS.len());
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ipc::serve(analyzer, stdin.lock(), stdout.lock())?;
    info!("Input closed, shutting down");
    Ok(())
}
