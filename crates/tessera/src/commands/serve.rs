//! `tessera serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use tessera_config::{CliSettings, Config, StorageBackend};
use tessera_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover tessera.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Public base domain tenant subdomains hang off (overrides config).
    #[arg(long)]
    base_domain: Option<String>,

    /// Store file path (overrides config).
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// Disable auth enforcement on tenant subdomains.
    #[arg(long)]
    no_auth: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            base_domain: self.base_domain,
            data_path: self.data_path,
            enforce_auth: if self.no_auth { Some(false) } else { None },
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Public domain: {}://*.{}",
            config.domain.scheme, config.domain.base
        ));
        match config.storage.backend {
            StorageBackend::File => {
                output.info(&format!(
                    "Store: {}",
                    config.storage.resolved_path().display()
                ));
            }
            StorageBackend::Memory => output.info("Store: in-memory (data lost on exit)"),
        }
        if !config.auth.enforce {
            output.info("Auth enforcement: OFF - tenant subdomains are open");
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
