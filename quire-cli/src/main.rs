//! Quire CLI - Command-line interface for building EPUB packages

mod commands;
mod recipe;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an EPUB from a JSON recipe
    Build {
        /// Recipe file path
        recipe: String,

        /// Output file path
        #[arg(short, long)]
        output: String,
    },

    /// Inspect the entries of an EPUB archive
    Inspect {
        /// Input file path
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Tracing directives for the chosen verbosity. Library warnings always
/// reach the terminal.
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "quire_cli=debug,quire_core=debug"
    } else {
        "quire_cli=info,quire_core=warn"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter(cli.verbose)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build { recipe, output } => commands::build(&recipe, &output),
        Commands::Inspect { input, json } => commands::inspect(&input, json),
    }
}
