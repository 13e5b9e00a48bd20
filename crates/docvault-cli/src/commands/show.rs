//! Show command
//!
//! Usage: docvault show

use super::StoreArgs;

pub fn execute(store_args: &StoreArgs) -> anyhow::Result<()> {
    let store = store_args.open();
    print!("{}", store.load());
    Ok(())
}
