//! stubsmith CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stubsmith_cli_lib::{load_settings, ConfigCommand, ModelCommand, PreviewCommand, ResolveCommand};

#[derive(Parser)]
#[command(name = "stubsmith")]
#[command(version)]
#[command(about = "Scaffold table-bound model classes", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and stamp a model class for a table
    Model {
        /// Table name (e.g. `users`, `order_items`)
        table: String,
        /// Database connection the model should use
        #[arg(long)]
        connection: Option<String>,
        /// Class suffix, overriding configuration (use "" to force a table binding)
        #[arg(long)]
        suffix: Option<String>,
        /// Render the built-in stub instead of running the generator command
        #[arg(long)]
        template: bool,
    },
    /// Show the class a table resolves to, without generating anything
    Resolve {
        /// Table name
        table: String,
    },
    /// Show the stamped stub for a table as a diff, without writing anything
    Preview {
        /// Table name
        table: String,
    },
    /// Show the effective configuration
    Config {
        /// Print the user configuration path instead
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    stubsmith::observability::init(cli.verbose)?;
    let settings = load_settings(cli.config.as_deref())?;
    tracing::debug!(?settings, "Configuration loaded");

    match cli.command {
        Commands::Model {
            table,
            connection,
            suffix,
            template,
        } => {
            let cmd = ModelCommand::new(table, connection, suffix, template);
            cmd.execute(settings)?;
        }
        Commands::Resolve { table } => {
            ResolveCommand::new(table).execute(&settings)?;
        }
        Commands::Preview { table } => {
            PreviewCommand::new(table).execute(&settings)?;
        }
        Commands::Config { path } => {
            ConfigCommand::new(path).execute(&settings)?;
        }
    }

    Ok(())
}
