//! Jarstream CLI - descriptor inspection and dry-run resolution.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jarstream", version, about = "On-demand part loading diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the scopes and parts of a descriptor file.
    Inspect {
        /// Path to a JSON application descriptor.
        descriptor: String,
    },
    /// Dry-run the loader against a descriptor: construct it (running the
    /// eager pre-pass), resolve the given classes, report download states.
    Simulate {
        /// Path to a JSON application descriptor.
        descriptor: String,
        /// Class names to resolve, in order.
        classes: Vec<String>,
        /// Parts to download explicitly before resolving, by name
        /// (main scope).
        #[arg(long = "download", value_name = "PART")]
        downloads: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = jarstream::VERSION, "jarstream cli starting");

    let result = match cli.command {
        Command::Inspect { descriptor } => commands::inspect::run(&descriptor),
        Command::Simulate {
            descriptor,
            classes,
            downloads,
        } => commands::simulate::run(&descriptor, &classes, &downloads),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
