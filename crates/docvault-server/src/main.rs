//! docvault server binary

use anyhow::Context;
use clap::Parser;
use docvault_core::logging_facility;
use docvault_server::{HttpServer, ServerConfig};
use docvault_store::DocumentStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let config = ServerConfig::parse();
    logging_facility::init(config.log_format);

    let store = Arc::new(DocumentStore::new(config.store_config()));
    if let Err(err) = store.ensure_layout() {
        tracing::error!(error = %err, "could not create store directories");
    }

    tracing::info!(
        document_path = %config.document_path.display(),
        backup_dir = %config.backup_dir.display(),
        "starting docvault server"
    );

    HttpServer::new(&config, store)
        .start()
        .await
        .with_context(|| format!("server on {} failed", config.socket_addr()))
}
