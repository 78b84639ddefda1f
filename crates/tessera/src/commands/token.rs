//! `tessera token` command implementation.

use std::path::PathBuf;

use clap::Args;
use tessera_config::Config;
use tessera_server::TokenSigner;

use crate::error::CliError;
use crate::output::Output;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Arguments for the token command.
#[derive(Args)]
pub(crate) struct TokenArgs {
    /// Path to configuration file (default: auto-discover tessera.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subject the token is issued to (e.g. an operator email).
    #[arg(short, long)]
    subject: String,

    /// Token lifetime in days.
    #[arg(long, default_value_t = 7)]
    ttl_days: i64,
}

impl TokenArgs {
    /// Execute the token command.
    ///
    /// # Errors
    ///
    /// Returns an error when no auth secret is configured.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        if config.auth.secret.is_empty() {
            return Err(CliError::Validation(
                "auth.secret is not configured; set it in tessera.toml".to_owned(),
            ));
        }
        if self.ttl_days <= 0 {
            return Err(CliError::Validation("--ttl-days must be positive".to_owned()));
        }

        let signer = TokenSigner::new(config.auth.secret);
        let token = signer.issue(&self.subject, self.ttl_days * SECS_PER_DAY);

        output.info(&token);
        output.success(&format!(
            "Issued token for {} (valid {} days)",
            self.subject, self.ttl_days
        ));
        Ok(())
    }
}
