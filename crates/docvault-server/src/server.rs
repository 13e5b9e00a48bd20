//! HTTP server lifecycle

use crate::config::ServerConfig;
use crate::routes::{router, AppState};
use axum::Router;
use tokio::net::TcpListener;

pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, store: AppState) -> Self {
        Self {
            addr: config.socket_addr(),
            router: router(store),
        }
    }

    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Consume the server and hand back its router without binding
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        tracing::info!(addr = %self.addr, "docvault server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
