//! docvault Server - HTTP boundary for the document store
//!
//! Exposes load, validate, save, backup listing and restore as JSON
//! endpoints. Store calls are synchronous file I/O and run on the blocking
//! thread pool.

pub mod config;
pub mod error;
pub mod request_id;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use server::HttpServer;
