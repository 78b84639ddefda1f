//! Tenant resolution: public subdomain slug to internal site id.

use std::sync::Arc;

use serde::Deserialize;
use tessera_kv::KvStore;
use tessera_site::slug::slugify;

use crate::keys;
use crate::store::SiteMetadata;

/// The fields we need from a legacy whole-document record. Everything else
/// in the blob is ignored.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    name: Option<String>,
}

/// Maps a public subdomain string to an internal site identifier.
///
/// Resolution never fails loudly: store errors and unreadable records are
/// logged and treated as non-matches, and a `None` result means the caller
/// renders a "site not found" state.
#[derive(Clone)]
pub struct TenantResolver {
    kv: Arc<dyn KvStore>,
}

impl TenantResolver {
    /// Create a resolver backed by `kv`.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Resolve `subdomain` to a site id.
    ///
    /// Primary pass: every site-metadata record, matching the slugified
    /// display title. Fallback pass (sites created before the metadata
    /// scheme): legacy whole-document records, matching the slugified `name`
    /// field.
    #[must_use]
    pub fn resolve(&self, subdomain: &str) -> Option<String> {
        if subdomain.is_empty() {
            return None;
        }

        self.resolve_from_metadata(subdomain)
            .or_else(|| self.resolve_from_legacy(subdomain))
    }

    fn resolve_from_metadata(&self, subdomain: &str) -> Option<String> {
        let metadata_keys = self.scan_logged("site:");
        for key in metadata_keys {
            let Some(site_id) = keys::site_id_from_metadata_key(&key) else {
                continue;
            };
            let Some(raw) = self.get_logged(&key) else {
                continue;
            };
            let Ok(metadata) = serde_json::from_str::<SiteMetadata>(&raw) else {
                tracing::warn!(key = %key, "skipping unreadable metadata record during resolution");
                continue;
            };
            if let Some(title) = &metadata.title
                && slugify(title) == subdomain
            {
                return Some(site_id.to_owned());
            }
        }
        None
    }

    fn resolve_from_legacy(&self, subdomain: &str) -> Option<String> {
        for key in self.scan_logged(keys::LEGACY_PREFIX) {
            let Some(site_id) = key.strip_prefix(keys::LEGACY_PREFIX) else {
                continue;
            };
            let Some(raw) = self.get_logged(&key) else {
                continue;
            };
            let Ok(record) = serde_json::from_str::<LegacyRecord>(&raw) else {
                tracing::warn!(key = %key, "skipping unreadable legacy record during resolution");
                continue;
            };
            if let Some(name) = &record.name
                && slugify(name) == subdomain
            {
                return Some(site_id.to_owned());
            }
        }
        None
    }

    fn scan_logged(&self, prefix: &str) -> Vec<String> {
        match self.kv.scan_prefix(prefix) {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(prefix, %err, "store scan failed during tenant resolution");
                Vec::new()
            }
        }
    }

    fn get_logged(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "store read failed during tenant resolution");
                None
            }
        }
    }
}
