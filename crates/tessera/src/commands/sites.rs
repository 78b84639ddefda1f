//! `tessera sites` command implementation.
//!
//! Operates directly on the configured store, without a running server.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use tessera_storage::SiteRegistry;

use crate::commands::open_store;
use crate::error::CliError;
use crate::output::Output;

/// Common arguments for sites subcommands.
#[derive(Args)]
pub(crate) struct SitesArgs {
    /// Path to configuration file (default: auto-discover tessera.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Site registry commands.
#[derive(Subcommand)]
pub(crate) enum SitesCommand {
    /// List registered sites.
    List(SitesArgs),
    /// Create a site.
    Create {
        #[command(flatten)]
        args: SitesArgs,
        /// Display name of the site.
        name: String,
    },
    /// Delete a site and all its stored records.
    Delete {
        #[command(flatten)]
        args: SitesArgs,
        /// Site id.
        id: String,
    },
}

impl SitesCommand {
    /// Execute the sites command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        match self {
            Self::List(args) => {
                let registry = registry(&args)?;
                let sites = registry.list_sites()?;
                if sites.is_empty() {
                    output.info("No sites registered.");
                }
                for site in sites {
                    output.info(&format!(
                        "{}  {}  (created {})",
                        site.id,
                        site.name,
                        site.created_at.format("%Y-%m-%d")
                    ));
                }
            }
            Self::Create { args, name } => {
                let name = name.trim().to_owned();
                if name.is_empty() {
                    return Err(CliError::Validation("site name cannot be empty".to_owned()));
                }
                let registry = registry(&args)?;
                let site = registry.create_site(&name)?;
                output.success(&format!("Created site {} ({})", site.name, site.id));
            }
            Self::Delete { args, id } => {
                let registry = registry(&args)?;
                if registry.get_site(&id)?.is_none() {
                    return Err(CliError::Validation(format!("no site with id `{id}`")));
                }
                registry.delete_site(&id)?;
                output.success(&format!("Deleted site {id}"));
            }
        }

        Ok(())
    }
}

fn registry(args: &SitesArgs) -> Result<SiteRegistry, CliError> {
    let config = tessera_config::Config::load(args.config.as_deref(), None)?;
    Ok(SiteRegistry::new(open_store(&config)?))
}
