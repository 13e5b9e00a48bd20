//! Save command
//!
//! Usage: docvault save <FILE>

use super::{read_input, StoreArgs};
use anyhow::bail;
use clap::Args;
use docvault_store::SaveOutcome;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// File whose content replaces the document (`-` for stdin)
    pub file: PathBuf,
}

pub fn execute(store_args: &StoreArgs, args: SaveArgs) -> anyhow::Result<()> {
    let content = read_input(&args.file)?;
    let store = store_args.open();

    let outcome = store.save(&content)?;
    if let SaveOutcome::Rejected { .. } = outcome {
        bail!("{}", outcome.message());
    }
    println!("{}", outcome.message());
    Ok(())
}
