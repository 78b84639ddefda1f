//! CLI command implementations.

pub(crate) mod serve;
pub(crate) mod sites;
pub(crate) mod token;

use std::sync::Arc;

use tessera_config::{Config, StorageBackend};
use tessera_kv::{FileStore, KvStore};

use crate::error::CliError;

pub(crate) use serve::ServeArgs;
pub(crate) use sites::SitesCommand;
pub(crate) use token::TokenArgs;

/// Open the configured store for direct CLI access.
pub(crate) fn open_store(config: &Config) -> Result<Arc<dyn KvStore>, CliError> {
    match config.storage.backend {
        StorageBackend::Memory => Err(CliError::Validation(
            "the memory backend holds no data outside a running server; \
             configure storage.backend = \"file\""
                .to_owned(),
        )),
        StorageBackend::File => Ok(Arc::new(FileStore::open(config.storage.resolved_path())?)),
    }
}
