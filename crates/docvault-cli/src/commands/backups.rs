//! Backups command
//!
//! Usage: docvault backups

use super::StoreArgs;

pub fn execute(store_args: &StoreArgs) -> anyhow::Result<()> {
    let store = store_args.open();
    let snapshots = store.list_backups()?;

    if snapshots.is_empty() {
        println!("No backups in {}", store.backups().dir().display());
        return Ok(());
    }

    for snapshot in snapshots {
        println!(
            "{}\t{}\t{}",
            snapshot.filename,
            snapshot.size_bytes,
            snapshot.modified_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
