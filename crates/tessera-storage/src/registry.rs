//! The site registry: one record per tenant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tessera_kv::KvStore;
use tessera_site::HOME_PAGE;

use crate::keys;
use crate::store::{SiteMetadata, SiteStore, StorageError};

/// One tenant's registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Registry over all sites in the store.
#[derive(Clone)]
pub struct SiteRegistry {
    kv: Arc<dyn KvStore>,
}

impl SiteRegistry {
    /// Create a registry backed by `kv`.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Create a site, seeding its metadata record so the tenant resolver can
    /// find it before the first document save.
    pub fn create_site(&self, name: &str) -> Result<Site, StorageError> {
        let site = Site {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_owned(),
            created_at: Utc::now(),
        };

        let key = keys::registry_key(&site.id);
        self.kv.set(&key, &serde_json::to_string(&site)?)?;

        let store = SiteStore::new(Arc::clone(&self.kv), &site.id);
        store.save_site_metadata(&SiteMetadata {
            pages: vec![HOME_PAGE.to_owned()],
            title: Some(site.name.clone()),
        })?;

        tracing::info!(site_id = %site.id, name = %site.name, "created site");
        Ok(site)
    }

    /// Look up one site, `None` when missing or unreadable.
    pub fn get_site(&self, site_id: &str) -> Result<Option<Site>, StorageError> {
        let Some(raw) = self.kv.get(&keys::registry_key(site_id))? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(site) => Ok(Some(site)),
            Err(err) => {
                tracing::warn!(site_id, %err, "dropping unreadable site record");
                Ok(None)
            }
        }
    }

    /// All registered sites, unreadable records skipped.
    pub fn list_sites(&self) -> Result<Vec<Site>, StorageError> {
        let mut sites = Vec::new();
        for key in self.kv.scan_prefix(keys::REGISTRY_PREFIX)? {
            let Some(raw) = self.kv.get(&key)? else {
                continue;
            };
            match serde_json::from_str(&raw) {
                Ok(site) => sites.push(site),
                Err(err) => {
                    tracing::warn!(key = %key, %err, "skipping unreadable site record");
                }
            }
        }
        Ok(sites)
    }

    /// Delete a site and cascade to every derived record (pages, components,
    /// theme, metadata, products).
    pub fn delete_site(&self, site_id: &str) -> Result<(), StorageError> {
        self.kv.remove(&keys::registry_key(site_id))?;
        SiteStore::new(Arc::clone(&self.kv), site_id).clear_site_data()?;
        tracing::info!(site_id, "deleted site");
        Ok(())
    }
}
