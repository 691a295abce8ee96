//! Protodoc CLI
//!
//! Loads a daemon's proto descriptor into the schema registry and prints the
//! views the documentation renderer consumes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use protodoc_cli::{closure_report, load_config, load_daemon, summarize, CliError};
use serde::Serialize;

/// Command-line interface configuration for protodoc.
#[derive(Parser, Debug)]
#[command(name = "protodoc", about = "Inspect the schema registry of an RPC daemon", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level, overriding the configuration
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Descriptor JSON file, overriding the configuration
    #[arg(long, global = true)]
    descriptor: Option<PathBuf>,
    /// Daemon name, overriding the configuration
    #[arg(long, global = true)]
    daemon: Option<String>,
}

/// Available protodoc commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print packages, experimental services, REST endpoints and source links
    Summary,
    /// Print the messages and enums reachable from a message
    Closure {
        /// Full type of the root message (e.g. lnrpc.Invoice)
        full_type: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("protodoc failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let level = cli.log_level.unwrap_or(config.logging.level);
    logging::init(&level, config.logging.file.as_deref())?;

    let name = cli.daemon.unwrap_or(config.daemon.name);
    let descriptor_path = cli.descriptor.unwrap_or(config.daemon.descriptor_path);
    let daemon = load_daemon(&name, &descriptor_path, config.registry.max_closure_depth)?;

    match cli.cmd {
        Commands::Summary => print_json(&summarize(&daemon)),
        Commands::Closure { full_type } => print_json(&closure_report(&daemon, &full_type)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
