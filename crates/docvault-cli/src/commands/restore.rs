//! Restore command
//!
//! Usage: docvault restore <SNAPSHOT>

use super::StoreArgs;
use clap::Args;

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Snapshot filename as printed by `docvault backups`
    pub filename: String,
}

pub fn execute(store_args: &StoreArgs, args: RestoreArgs) -> anyhow::Result<()> {
    let store = store_args.open();
    let restored = store.restore(&args.filename)?;
    println!("{}", restored.message());
    Ok(())
}
