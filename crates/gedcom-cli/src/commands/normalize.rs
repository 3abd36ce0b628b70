//! Normalize command
//!
//! Usage: gedcom normalize <INPUT> [--output <FILE>]

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gedcom_store::{read_document, write_document, CodecConfig};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// GEDCOM file to read
    pub input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute normalize command
pub fn execute(
    args: NormalizeArgs,
    config: &CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut document, report) = read_document(&args.input, config)?;
    for problem in &report.malformed {
        eprintln!("warning: skipped {}", problem);
    }
    config.apply_source(&mut document);

    if let Some(output_path) = args.output {
        let lines = write_document(&output_path, &document, config)?;
        println!("✓ Wrote {} lines to {}", lines, output_path.display());
    } else {
        let stdout = std::io::stdout();
        let mut sink = stdout.lock();
        document.write_to(&mut sink, config.writer_config())?;
        sink.flush()?;
    }

    Ok(())
}
