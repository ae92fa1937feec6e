//! Result printing: raw JSON or aligned text tables

use anyhow::Result;
use serde::Serialize;

use crate::types::OutputFormat;

/// Render `value` as pretty JSON or with the given text renderer
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Text => text(value),
    })
}

/// Render and print to stdout
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    println!("{}", render(format, value, text)?);
    Ok(())
}

/// Table header followed by a rule of the given width
#[must_use]
pub fn header(columns: &str, width: usize) -> String {
    format!("\n{columns}\n{}\n", "-".repeat(width))
}

#[must_use]
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Keep the end of a path, which is the more useful part
#[must_use]
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let kept: String = path.chars().skip(count + 3 - max_len).collect();
    format!("...{kept}")
}
