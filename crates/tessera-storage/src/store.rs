//! The storage manager: decomposes a [`SiteDocument`] into per-component,
//! per-page, and per-site records and reconstitutes it on load.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_kv::{KvError, KvStore};
use tessera_site::{Component, Page, PageMap, Product, SiteDocument, ThemeSettings};

use crate::keys;

/// Error returned by storage manager operations.
///
/// Per the error design, deserialization failures of individual records are
/// NOT errors - they are treated as absence and logged. This type covers the
/// failures that genuinely stop an operation: the backing store refusing a
/// read/write, or a record failing to serialize on the way in.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] KvError),
    /// A record could not be serialized for writing.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Stored structure of one page: the ordered component-id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub component_ids: Vec<String>,
    /// Unix millis of the last structural write.
    pub last_modified: i64,
}

/// Stored site-level metadata: page order and display title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub pages: Vec<String>,
    pub title: Option<String>,
}

/// Storage manager for one site.
///
/// A plain value struct: construct it with the store handle and site id it
/// should operate on. Multiple sites (and tests) coexist in one process with
/// no shared state beyond the store itself.
#[derive(Clone)]
pub struct SiteStore {
    kv: Arc<dyn KvStore>,
    site_id: String,
}

impl SiteStore {
    /// Create a manager for `site_id` backed by `kv`.
    pub fn new(kv: Arc<dyn KvStore>, site_id: impl Into<String>) -> Self {
        Self {
            kv,
            site_id: site_id.into(),
        }
    }

    /// The site id this manager operates on.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Upsert one component record by id. No cross-reference validation.
    pub fn save_component(&self, component: &Component) -> Result<(), StorageError> {
        let key = keys::component_key(&self.site_id, &component.id);
        self.kv.set(&key, &serde_json::to_string(component)?)?;
        Ok(())
    }

    /// Load one component record.
    ///
    /// Returns `None` on a missing key or on a record that fails to parse:
    /// corrupt or foreign data is absence, not a fatal error.
    pub fn load_component(&self, component_id: &str) -> Result<Option<Component>, StorageError> {
        let key = keys::component_key(&self.site_id, component_id);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(component) => Ok(Some(component)),
            Err(err) => {
                tracing::warn!(site_id = %self.site_id, component_id, %err, "dropping unreadable component record");
                Ok(None)
            }
        }
    }

    /// Overwrite a page's ordered component-id list, stamping the
    /// modification time.
    pub fn save_page_structure(
        &self,
        page: &str,
        component_ids: Vec<String>,
    ) -> Result<(), StorageError> {
        let record = PageRecord {
            component_ids,
            last_modified: chrono::Utc::now().timestamp_millis(),
        };
        let key = keys::page_key(&self.site_id, page);
        self.kv.set(&key, &serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// Load a page's stored structure, or `None` if missing/unreadable.
    pub fn load_page_structure(&self, page: &str) -> Result<Option<PageRecord>, StorageError> {
        let key = keys::page_key(&self.site_id, page);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(site_id = %self.site_id, page, %err, "dropping unreadable page record");
                Ok(None)
            }
        }
    }

    /// Load a page's components in stored order.
    ///
    /// Ids that fail to resolve are silently skipped: with a non-transactional
    /// store a dangling reference is an expected degradation, and it renders
    /// as the slot simply being absent. The surviving components keep their
    /// relative order.
    pub fn load_page_components(&self, page: &str) -> Result<Vec<Component>, StorageError> {
        let Some(record) = self.load_page_structure(page)? else {
            return Ok(Vec::new());
        };

        let mut components = Vec::with_capacity(record.component_ids.len());
        for id in &record.component_ids {
            match self.load_component(id)? {
                Some(component) => components.push(component),
                None => {
                    tracing::warn!(site_id = %self.site_id, page, component_id = %id, "skipping dangling component reference");
                }
            }
        }
        Ok(components)
    }

    /// Upsert the site metadata record.
    pub fn save_site_metadata(&self, metadata: &SiteMetadata) -> Result<(), StorageError> {
        let key = keys::metadata_key(&self.site_id);
        self.kv.set(&key, &serde_json::to_string(metadata)?)?;
        Ok(())
    }

    /// Load the site metadata record, defaulting when missing/unreadable.
    pub fn load_site_metadata(&self) -> Result<SiteMetadata, StorageError> {
        let key = keys::metadata_key(&self.site_id);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(SiteMetadata::default());
        };

        match serde_json::from_str(&raw) {
            Ok(metadata) => Ok(metadata),
            Err(err) => {
                tracing::warn!(site_id = %self.site_id, %err, "dropping unreadable metadata record");
                Ok(SiteMetadata::default())
            }
        }
    }

    /// Upsert the theme record.
    pub fn save_theme(&self, theme: &ThemeSettings) -> Result<(), StorageError> {
        let key = keys::theme_key(&self.site_id);
        self.kv.set(&key, &serde_json::to_string(theme)?)?;
        Ok(())
    }

    /// Load the stored theme, or `None` when missing/unreadable.
    pub fn load_theme(&self) -> Result<Option<ThemeSettings>, StorageError> {
        let key = keys::theme_key(&self.site_id);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(theme) => Ok(Some(theme)),
            Err(err) => {
                tracing::warn!(site_id = %self.site_id, %err, "dropping unreadable theme record");
                Ok(None)
            }
        }
    }

    /// Upsert the product catalog record.
    pub fn save_products(&self, products: &[Product]) -> Result<(), StorageError> {
        let key = keys::products_key(&self.site_id);
        self.kv.set(&key, &serde_json::to_string(products)?)?;
        Ok(())
    }

    /// Load the product catalog, empty when missing/unreadable.
    pub fn load_products(&self) -> Result<Vec<Product>, StorageError> {
        let key = keys::products_key(&self.site_id);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(products) => Ok(products),
            Err(err) => {
                tracing::warn!(site_id = %self.site_id, %err, "dropping unreadable products record");
                Ok(Vec::new())
            }
        }
    }

    /// Delete every stored record for this site. The only bulk operation,
    /// used on site deletion.
    pub fn clear_site_data(&self) -> Result<(), StorageError> {
        let prefix = keys::site_prefix(&self.site_id);
        for key in self.kv.scan_prefix(&prefix)? {
            self.kv.remove(&key)?;
        }
        Ok(())
    }

    /// Persist a full document.
    ///
    /// Write order is the consistency story: every component record first,
    /// then each page's id list, then metadata and the site-level records.
    /// Component records that no page references anymore are removed last.
    /// A reader interleaved with this sequence can observe unreferenced
    /// component records (invisible) but never a page list naming a component
    /// that was never written.
    ///
    /// Concurrent saves from two editors are last-write-wins by design.
    pub fn save_document(&self, doc: &SiteDocument) -> Result<(), StorageError> {
        for (_, page) in doc.pages.iter() {
            for component in &page.components {
                self.save_component(component)?;
            }
        }

        for (name, page) in doc.pages.iter() {
            let ids = page.components.iter().map(|c| c.id.clone()).collect();
            self.save_page_structure(name, ids)?;
        }

        // Preserve the display title the registry stamped at creation.
        let title = self.load_site_metadata()?.title;
        self.save_site_metadata(&SiteMetadata {
            pages: doc.pages.names(),
            title,
        })?;

        if let Some(theme) = &doc.theme {
            self.save_theme(theme)?;
        }
        self.save_products(&doc.products)?;

        self.remove_orphaned_pages(doc)?;
        self.remove_orphaned_components(doc)?;

        Ok(())
    }

    /// Reconstitute the document from stored records.
    ///
    /// An empty store yields the default single-page document; a page listed
    /// in metadata but missing its record degrades to an empty page.
    pub fn load_document(&self) -> Result<SiteDocument, StorageError> {
        let page_names = self.stored_page_names()?;
        if page_names.is_empty() {
            return Ok(SiteDocument::new());
        }

        let mut pages = PageMap::new();
        for name in page_names {
            let components = self.load_page_components(&name)?;
            pages.insert(name, Page { components });
        }

        Ok(SiteDocument {
            pages,
            theme: self.load_theme()?,
            products: self.load_products()?,
        })
    }

    /// Page names in document order: the metadata list when present, else a
    /// scan of stored page keys (sorted, as the scan returns them).
    fn stored_page_names(&self) -> Result<Vec<String>, StorageError> {
        let metadata = self.load_site_metadata()?;
        if !metadata.pages.is_empty() {
            return Ok(metadata.pages);
        }

        let prefix = keys::page_prefix(&self.site_id);
        Ok(self
            .kv
            .scan_prefix(&prefix)?
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix))
            .map(str::to_owned)
            .collect())
    }

    /// Delete page records for pages the document no longer contains.
    fn remove_orphaned_pages(&self, doc: &SiteDocument) -> Result<(), StorageError> {
        let prefix = keys::page_prefix(&self.site_id);
        for key in self.kv.scan_prefix(&prefix)? {
            let Some(name) = key.strip_prefix(&prefix) else {
                continue;
            };
            if !doc.pages.contains(name) {
                self.kv.remove(&key)?;
            }
        }
        Ok(())
    }

    /// Delete component records no page references. Runs after the page lists
    /// are written, so nothing observed the removal window as dangling.
    fn remove_orphaned_components(&self, doc: &SiteDocument) -> Result<(), StorageError> {
        let prefix = keys::component_prefix(&self.site_id);
        for key in self.kv.scan_prefix(&prefix)? {
            let Some(id) = key.strip_prefix(&prefix) else {
                continue;
            };
            if doc.find_component(id).is_none() {
                self.kv.remove(&key)?;
            }
        }
        Ok(())
    }
}
