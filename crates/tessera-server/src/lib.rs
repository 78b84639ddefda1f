//! HTTP server for the Tessera site builder.
//!
//! Serves three surfaces from one router:
//! - the internal `/_render` endpoint tenant subdomains are rewritten to
//! - the operator surface (`/preview`, the builder JSON API under `/api`)
//! - nothing else: main-domain paths outside those routes fall through
//!
//! Every inbound request passes the tenant middleware first, which
//! classifies the hostname against the configured base domain and, for
//! tenant subdomains, verifies the auth token and rewrites the URI to
//! `/_render` with the resolved subdomain attached.
//!
//! # Quick Start
//!
//! ```ignore
//! use tessera_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7700,
//!         base_domain: "example.com".to_string(),
//!         scheme: "https".to_string(),
//!         auth_secret: std::env::var("TESSERA_SECRET").unwrap(),
//!         enforce_auth: true,
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod auth;
mod error;
mod handlers;
mod hostname;
mod middleware;
mod state;
mod tenant;
#[cfg(test)]
mod test_util;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tessera_config::StorageBackend;
use tessera_kv::{FileStore, KvStore, MemoryStore};
use tessera_storage::{SiteRegistry, TenantResolver};

pub use auth::{AuthError, Claims, TokenSigner};
pub use hostname::{HostClass, classify, main_path_allowed};

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Public base domain tenant subdomains hang off.
    pub base_domain: String,
    /// Public URL scheme, `http` or `https`.
    pub scheme: String,
    /// Shared secret for token signing and verification.
    pub auth_secret: String,
    /// Require a valid token on tenant subdomains.
    pub enforce_auth: bool,
    /// Storage backend to open.
    pub storage_backend: StorageBackend,
    /// Store file path (file backend only).
    pub storage_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7700,
            base_domain: "localhost".to_string(),
            scheme: "http".to_string(),
            auth_secret: String::new(),
            enforce_auth: true,
            storage_backend: StorageBackend::Memory,
            storage_path: PathBuf::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the server fails to
/// start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let kv: Arc<dyn KvStore> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.storage_path)?),
    };

    let state = Arc::new(AppState {
        registry: SiteRegistry::new(Arc::clone(&kv)),
        resolver: TenantResolver::new(Arc::clone(&kv)),
        signer: TokenSigner::new(config.auth_secret.clone()),
        kv,
        base_domain: config.base_domain.clone(),
        scheme: config.scheme.clone(),
        enforce_auth: config.enforce_auth,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, base_domain = %config.base_domain, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a Tessera config.
#[must_use]
pub fn server_config_from_config(config: &tessera_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        base_domain: config.domain.base.clone(),
        scheme: config.domain.scheme.clone(),
        auth_secret: config.auth.secret.clone(),
        enforce_auth: config.auth.enforce,
        storage_backend: config.storage.backend,
        storage_path: config.storage.resolved_path(),
    }
}
