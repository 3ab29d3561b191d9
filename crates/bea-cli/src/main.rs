// CLI for smoke tests and operator tooling

use bea_core::{Category, CalculatorConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "bea")]
#[command(about = "BEA - Emotional State Calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Calibration file (TOML); BEA_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two states with an operator
    Combine {
        /// Operator name, synonym or glyph (combust, ⊕, fuse, ...)
        operator: String,

        /// First state name
        state_a: String,

        /// Second state name
        state_b: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the state catalog
    States {
        /// Only show one tier (foundation, active, emergence, ascension)
        #[arg(long)]
        category: Option<Category>,
    },

    /// List operators and their synonyms
    Operators,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Combine {
            operator,
            state_a,
            state_b,
            json,
        } => {
            commands::combine::run(config, &operator, &state_a, &state_b, json)?;
        }
        Commands::States { category } => {
            commands::catalog::list_states(category)?;
        }
        Commands::Operators => {
            commands::catalog::list_operators();
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<CalculatorConfig> {
    let mut config = match path {
        Some(path) => CalculatorConfig::load_from_file(path)?,
        None => CalculatorConfig::default(),
    };
    config.merge_with_env()?;
    tracing::debug!(?config, "calculator configuration");
    Ok(config)
}
