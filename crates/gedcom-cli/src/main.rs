//! GEDCOM CLI
//!
//! Command-line interface for normalizing, inspecting and exporting GEDCOM
//! files

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gedcom_core::logging_facility::{init, Profile};
use gedcom_store::CodecConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gedcom")]
#[command(about = "GEDCOM - Read, normalize and export genealogy files", long_about = None)]
struct Cli {
    /// Codec configuration file (TOML); defaults apply when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite a file with canonical line splitting
    Normalize(commands::normalize::NormalizeArgs),
    /// Export a file as a JSON tree
    Tree(commands::tree::TreeArgs),
    /// Report malformed lines and unresolved references
    Check(commands::check::CheckArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<CodecConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CodecConfig::load(path)?),
        None => Ok(CodecConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Human => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Normalize(args) => commands::normalize::execute(args, &config),
        Commands::Tree(args) => commands::tree::execute(args, &config),
        Commands::Check(args) => commands::check::execute(args, &config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
