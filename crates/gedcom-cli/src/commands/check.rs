//! Check command
//!
//! Usage: gedcom check <INPUT>
//!
//! Always reads leniently so that every problem is listed, then fails if
//! any were found.

use std::path::PathBuf;

use clap::Args;
use gedcom_core::{ParseMode, ReferencePolicy};
use gedcom_store::{read_document, CodecConfig};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// GEDCOM file to check
    pub input: PathBuf,
}

/// Execute check command
pub fn execute(args: CheckArgs, config: &CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let lenient = CodecConfig {
        parse_mode: ParseMode::Lenient,
        reference_policy: ReferencePolicy::Lenient,
        ..config.clone()
    };
    let (document, report) = read_document(&args.input, &lenient)?;

    for problem in &report.malformed {
        println!("{}", problem);
    }
    for reference in &report.dangling {
        println!("{}", reference.to_error());
    }

    let problems = report.malformed.len() + report.dangling.len();
    println!(
        "{}: {} records, {} malformed, {} unresolved",
        args.input.display(),
        document.len(),
        report.malformed.len(),
        report.dangling.len()
    );

    if problems > 0 {
        return Err(format!("{} problem(s) found", problems).into());
    }
    println!("✓ No problems found");
    Ok(())
}
