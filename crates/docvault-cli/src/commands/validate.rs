//! Validate command
//!
//! Usage: docvault validate <FILE>

use super::read_input;
use anyhow::bail;
use clap::Args;
use docvault_core::validate;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// File to check (`-` for stdin)
    pub file: PathBuf,
}

/// Exits non-zero when the content does not parse
pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let content = read_input(&args.file)?;
    let report = validate(&content);
    match report.error {
        None => {
            println!("valid");
            Ok(())
        }
        Some(error) => bail!("YAML syntax error: {}", error),
    }
}
