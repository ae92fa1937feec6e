//! flowscope-cli library
//!
//! This module exposes the internal functionality of flowscope-cli for testing purposes.

use tracing_subscriber::EnvFilter;

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;

pub mod types;
pub use types::{Cli, Commands, OutputFormat, WalkArgs};

/// Log filter for the requested verbosity
#[must_use]
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

#[cfg(test)]
mod tests {
    mod tests_setup_logging;
}
