pub mod backups;
pub mod restore;
pub mod save;
pub mod show;
pub mod validate;

use anyhow::Context;
use clap::Args;
use docvault_store::{DocumentStore, StoreConfig};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Store location, shared by every subcommand
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Canonical document path
    #[arg(
        long = "document",
        env = "YAML_FILE_PATH",
        default_value = "/data/services.yaml",
        global = true
    )]
    pub document_path: PathBuf,

    /// Directory holding timestamped snapshots
    #[arg(
        long,
        env = "BACKUP_DIR",
        default_value = "/data/backups",
        global = true
    )]
    pub backup_dir: PathBuf,
}

impl StoreArgs {
    pub fn open(&self) -> DocumentStore {
        DocumentStore::new(StoreConfig::new(
            self.document_path.clone(),
            self.backup_dir.clone(),
        ))
    }
}

/// Read a candidate file, `-` meaning stdin
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
