//! flowscope: CLI for heuristic Go source analysis

use clap::Parser;
use flowscope_cli::{commands, log_filter, Cli, Commands};
use flowscope_core::Analyzer;
use tracing_subscriber::{fmt, prelude::*};

fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let analyzer = Analyzer::new(cli.walk.config());
    let format = cli.format;

    match cli.command {
        Commands::File { path } => commands::analyze::run_file(&analyzer, &path, format)?,
        Commands::Project { root } => commands::analyze::run_project(&analyzer, &root, format)?,
        Commands::Duplicates { root } => {
            commands::symbols::run_duplicates(&analyzer, &root, format)?;
        }
        Commands::Definition { file, line, column } => {
            commands::symbols::run_definition(&analyzer, &file, line, column, format)?;
        }
        Commands::Symbol { root, name } => {
            commands::symbols::run_symbol(&analyzer, &root, &name, format)?;
        }
        Commands::Usages { root, name } => {
            commands::symbols::run_usages(&analyzer, &root, &name, format)?;
        }
        Commands::Calls { root } => commands::graph::run(&analyzer, &root, format)?,
        Commands::Routes { root } => commands::routes::run(&analyzer, &root, format)?,
        Commands::Trace { root, route_id } => {
            commands::flow::run(&analyzer, &root, &route_id, format)?;
        }
        Commands::Resolve { root, path } => {
            commands::symbols::run_resolve(&analyzer, &root, &path, format)?;
        }
        Commands::Serve => commands::serve::run(&analyzer)?,
    }

    Ok(())
}
