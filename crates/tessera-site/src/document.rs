//! The in-memory site document: ordered pages, theme, products.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::theme::ThemeSettings;

/// Name of the page served at the root path when present.
pub const HOME_PAGE: &str = "home";

/// One page: an ordered list of components. Order is render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub components: Vec<Component>,
}

impl Page {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// One sellable item in the site's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: u32,
    #[serde(default)]
    pub image_url: String,
}

/// Insertion-ordered map of page name to [`Page`].
///
/// Page keys are lowercase URL slugs. Insertion order is not semantically
/// significant except for default-page selection ("home" if present, else
/// the first key), but it is preserved so the builder's page list is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMap {
    entries: Vec<(String, Page)>,
}

impl PageMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a page with this exact key exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Look up a page by exact key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Page> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Mutable lookup by exact key.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Page> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Insert or replace a page, preserving the position of an existing key.
    pub fn insert(&mut self, name: impl Into<String>, page: Page) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = page,
            None => self.entries.push((name, page)),
        }
    }

    /// Remove a page by key, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Page> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Page names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// First page key in insertion order.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, page)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Page)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }
}

impl FromIterator<(String, Page)> for PageMap {
    fn from_iter<I: IntoIterator<Item = (String, Page)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, page) in iter {
            map.insert(name, page);
        }
        map
    }
}

/// The in-memory representation of a site.
///
/// Constructed empty (a single empty "home" page) on first access for a new
/// site id; mutated through [`crate::mutate`]; persisted and reconstituted by
/// the storage manager.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDocument {
    pub pages: PageMap,
    pub theme: Option<ThemeSettings>,
    pub products: Vec<Product>,
}

impl SiteDocument {
    /// The default document for a fresh site: one empty "home" page.
    #[must_use]
    pub fn new() -> Self {
        let mut pages = PageMap::new();
        pages.insert(HOME_PAGE, Page::new());
        Self {
            pages,
            theme: None,
            products: Vec::new(),
        }
    }

    /// The page served when no page is named: "home" if present, else the
    /// first page in insertion order.
    #[must_use]
    pub fn default_page_name(&self) -> Option<&str> {
        if self.pages.contains(HOME_PAGE) {
            Some(HOME_PAGE)
        } else {
            self.pages.first_name()
        }
    }

    /// Look up a component by id anywhere in the document.
    #[must_use]
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.pages
            .iter()
            .flat_map(|(_, page)| page.components.iter())
            .find(|c| c.id == id)
    }
}

impl Default for SiteDocument {
    fn default() -> Self {
        Self::new()
    }
}
