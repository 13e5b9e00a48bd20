//! Server configuration
//!
//! Flags fall back to environment variables, then to container defaults.
//! `main` loads a `.env` file before parsing.

use clap::Parser;
use docvault_core::logging_facility::Profile;
use docvault_store::StoreConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "docvault-server")]
#[command(about = "Serve a single YAML document with timestamped backups", long_about = None)]
pub struct ServerConfig {
    /// Canonical document path
    #[arg(long = "document", env = "YAML_FILE_PATH", default_value = "/data/services.yaml")]
    pub document_path: PathBuf,

    /// Directory holding timestamped snapshots
    #[arg(long, env = "BACKUP_DIR", default_value = "/data/backups")]
    pub backup_dir: PathBuf,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// `pretty` or `json`
    #[arg(long, env = "DOCVAULT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: Profile,
}

impl ServerConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.document_path.clone(), self.backup_dir.clone())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
