//! Tree export command
//!
//! Usage: gedcom tree <INPUT> [--output <FILE>]

use std::path::PathBuf;

use clap::Args;
use gedcom_store::atomic::atomic_write;
use gedcom_store::{read_document, CodecConfig};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// GEDCOM file to read
    pub input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute tree command
pub fn execute(args: TreeArgs, config: &CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = read_document(&args.input, config)?;
    let json = serde_json::to_string_pretty(&document.to_tree())?;

    if let Some(output_path) = args.output {
        atomic_write(&output_path, json.as_bytes())?;
        println!(
            "✓ Exported {} records to {}",
            document.len(),
            output_path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}
