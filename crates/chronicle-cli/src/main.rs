//! Chronicle CLI
//!
//! Command-line interface for reconciling and diffing story summaries

use chronicle_core::config::ChronicleConfig;
use chronicle_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "chronicle")]
#[command(about = "Chronicle - reconcile and diff extracted story summaries", long_about = None)]
struct Cli {
    /// TOML configuration file (thresholds, chunk limit)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format on stderr
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fold update summaries into a base summary
    Merge(commands::merge::MergeArgs),
    /// Show what changed between two summaries
    Diff(commands::diff::DiffArgs),
    /// Split story text into extraction-sized chunks
    Chunk(commands::chunk::ChunkArgs),
    /// Parse raw model outputs and accumulate them into one summary
    Ingest(commands::ingest::IngestArgs),
    /// Detect recurring names in story text and build a name roster
    Names(commands::names::NamesArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let config = match &cli.config {
        Some(path) => match ChronicleConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        None => ChronicleConfig::default(),
    };

    let result = match cli.command {
        Commands::Merge(args) => commands::merge::execute(args, &config),
        Commands::Diff(args) => commands::diff::execute(args, &config),
        Commands::Chunk(args) => commands::chunk::execute(args, &config),
        Commands::Ingest(args) => commands::ingest::execute(args, &config),
        Commands::Names(args) => commands::names::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
