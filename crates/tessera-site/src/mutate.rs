//! Pure mutation API over [`SiteDocument`].
//!
//! Every operation consumes the document and returns a new one, or a typed
//! [`MutationError`] with the document untouched. The caller persists the
//! result through the storage manager; nothing here performs I/O.
//!
//! Failure semantics follow the editing model:
//! - structural errors the operator must see (unknown page, duplicate page,
//!   last page, mismatched patch) are returned as errors;
//! - acting on a component id that is already gone is a silent no-op, since
//!   the other editor surface may simply be stale.

use crate::component::{
    AboutUsData, Component, ComponentType, FooterData, HeroData, NavbarData, ProductsData,
};
use crate::document::{Page, SiteDocument};
use crate::slug::slugify;
use crate::theme::ThemeSettings;

/// Error returned when a document mutation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// The named page does not exist.
    #[error("page `{0}` does not exist")]
    UnknownPage(String),
    /// A page with the same normalized name already exists.
    #[error("page `{0}` already exists")]
    DuplicatePage(String),
    /// The page name has no representable slug characters.
    #[error("`{0}` is not a usable page name")]
    InvalidPageName(String),
    /// Deleting this page would leave the document empty.
    #[error("cannot delete the last page")]
    LastPage,
    /// The patch payload does not match the component's declared type.
    #[error("patch does not match component type `{kind}`")]
    TypeMismatch {
        /// The component's declared type.
        kind: ComponentType,
    },
}

/// A typed update to one component.
///
/// Data patches replace the payload matching the component's declared type
/// wholesale; all other component fields are preserved. A data patch whose
/// variant does not match the component's type is rejected with
/// [`MutationError::TypeMismatch`] instead of being merged blindly.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentPatch {
    /// Change the visual variant within the component's type.
    Style(String),
    /// Replace the generic fallback payload.
    Content(String),
    Navbar(NavbarData),
    Hero(HeroData),
    Footer(FooterData),
    Products(ProductsData),
    AboutUs(AboutUsData),
}

impl ComponentPatch {
    /// The component type this patch applies to, or `None` for patches valid
    /// on any type (style, content).
    #[must_use]
    fn target_kind(&self) -> Option<ComponentType> {
        match self {
            Self::Style(_) | Self::Content(_) => None,
            Self::Navbar(_) => Some(ComponentType::Navbar),
            Self::Hero(_) => Some(ComponentType::Hero),
            Self::Footer(_) => Some(ComponentType::Footer),
            Self::Products(_) => Some(ComponentType::Products),
            Self::AboutUs(_) => Some(ComponentType::AboutUs),
        }
    }
}

/// Allocate a component id unique within the document.
///
/// Ids are millisecond-epoch derived; on collision (two components created
/// inside the same millisecond) the candidate is bumped until free.
#[must_use]
pub fn new_component_id(doc: &SiteDocument) -> String {
    let mut millis = chrono::Utc::now().timestamp_millis();
    loop {
        let candidate = format!("c{millis}");
        if doc.find_component(&candidate).is_none() {
            return candidate;
        }
        millis += 1;
    }
}

/// Append a new component of `kind` with its default payload to `page`.
pub fn add_component(
    mut doc: SiteDocument,
    page: &str,
    kind: ComponentType,
    style: Option<String>,
) -> Result<SiteDocument, MutationError> {
    let id = new_component_id(&doc);
    let Some(target) = doc.pages.get_mut(page) else {
        return Err(MutationError::UnknownPage(page.to_owned()));
    };

    target
        .components
        .push(Component::with_defaults(id, kind, style));
    Ok(doc)
}

/// Remove a component from `page` by id. Idempotent: a missing id is Ok.
pub fn remove_component(
    mut doc: SiteDocument,
    page: &str,
    component_id: &str,
) -> Result<SiteDocument, MutationError> {
    let Some(target) = doc.pages.get_mut(page) else {
        return Err(MutationError::UnknownPage(page.to_owned()));
    };

    target.components.retain(|c| c.id != component_id);
    Ok(doc)
}

/// Apply a typed patch to a component on `page`.
///
/// Unknown component ids are a silent no-op; a data patch whose variant does
/// not match the component's declared type is rejected.
pub fn update_component(
    mut doc: SiteDocument,
    page: &str,
    component_id: &str,
    patch: ComponentPatch,
) -> Result<SiteDocument, MutationError> {
    let Some(target) = doc.pages.get_mut(page) else {
        return Err(MutationError::UnknownPage(page.to_owned()));
    };

    let Some(component) = target.components.iter_mut().find(|c| c.id == component_id) else {
        return Ok(doc);
    };

    if let Some(required) = patch.target_kind()
        && component.kind != required
    {
        return Err(MutationError::TypeMismatch {
            kind: component.kind.clone(),
        });
    }

    match patch {
        ComponentPatch::Style(style) => component.style = Some(style),
        ComponentPatch::Content(content) => component.content = content,
        ComponentPatch::Navbar(data) => component.navbar_data = Some(data),
        ComponentPatch::Hero(data) => component.hero_data = Some(data),
        ComponentPatch::Footer(data) => component.footer_data = Some(data),
        ComponentPatch::Products(data) => component.products_data = Some(data),
        ComponentPatch::AboutUs(data) => component.about_us_data = Some(data),
    }

    Ok(doc)
}

/// Move the component at `from` to `to`, shifting the elements between them.
///
/// Out-of-bounds or equal indices are a no-op.
pub fn reorder_components(
    mut doc: SiteDocument,
    page: &str,
    from: usize,
    to: usize,
) -> Result<SiteDocument, MutationError> {
    let Some(target) = doc.pages.get_mut(page) else {
        return Err(MutationError::UnknownPage(page.to_owned()));
    };

    let len = target.components.len();
    if from >= len || to >= len || from == to {
        return Ok(doc);
    }

    let component = target.components.remove(from);
    target.components.insert(to, component);
    Ok(doc)
}

/// Add an empty page. The name is trimmed and slugified before insertion, so
/// "Home" and "home" collide.
pub fn add_page(mut doc: SiteDocument, name: &str) -> Result<SiteDocument, MutationError> {
    let key = slugify(name.trim());
    if key.is_empty() {
        return Err(MutationError::InvalidPageName(name.to_owned()));
    }
    if doc.pages.contains(&key) {
        return Err(MutationError::DuplicatePage(key));
    }

    doc.pages.insert(key, Page::new());
    Ok(doc)
}

/// Delete a page and (via the storage save path) all its components.
pub fn delete_page(mut doc: SiteDocument, name: &str) -> Result<SiteDocument, MutationError> {
    if !doc.pages.contains(name) {
        return Err(MutationError::UnknownPage(name.to_owned()));
    }
    if doc.pages.len() == 1 {
        return Err(MutationError::LastPage);
    }

    doc.pages.remove(name);
    Ok(doc)
}

/// Replace the site theme.
#[must_use]
pub fn set_theme(mut doc: SiteDocument, theme: ThemeSettings) -> SiteDocument {
    doc.theme = Some(theme);
    doc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::HOME_PAGE;

    fn doc_with_components(ids: &[&str]) -> SiteDocument {
        let mut doc = SiteDocument::new();
        let page = doc.pages.get_mut(HOME_PAGE).unwrap();
        for id in ids {
            page.components
                .push(Component::with_defaults(*id, ComponentType::Text, None));
        }
        doc
    }

    fn component_ids(doc: &SiteDocument, page: &str) -> Vec<String> {
        doc.pages
            .get(page)
            .unwrap()
            .components
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn test_add_component_applies_default_payload() {
        let doc = SiteDocument::new();

        let doc = add_component(doc, HOME_PAGE, ComponentType::Hero, None).unwrap();

        let page = doc.pages.get(HOME_PAGE).unwrap();
        assert_eq!(page.components.len(), 1);
        let component = &page.components[0];
        assert_eq!(component.kind, ComponentType::Hero);
        assert_eq!(component.hero_data, Some(HeroData::default()));
    }

    #[test]
    fn test_add_component_unknown_page() {
        let doc = SiteDocument::new();

        let err = add_component(doc, "missing", ComponentType::Text, None).unwrap_err();

        assert_eq!(err, MutationError::UnknownPage("missing".to_owned()));
    }

    #[test]
    fn test_add_component_ids_unique() {
        let doc = SiteDocument::new();
        let doc = add_component(doc, HOME_PAGE, ComponentType::Text, None).unwrap();
        let doc = add_component(doc, HOME_PAGE, ComponentType::Text, None).unwrap();

        let ids = component_ids(&doc, HOME_PAGE);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_remove_component() {
        let doc = doc_with_components(&["a", "b"]);

        let doc = remove_component(doc, HOME_PAGE, "a").unwrap();

        assert_eq!(component_ids(&doc, HOME_PAGE), vec!["b".to_owned()]);
    }

    #[test]
    fn test_remove_component_missing_id_is_noop() {
        let doc = doc_with_components(&["a"]);

        let doc = remove_component(doc, HOME_PAGE, "zzz").unwrap();

        assert_eq!(component_ids(&doc, HOME_PAGE), vec!["a".to_owned()]);
    }

    #[test]
    fn test_update_component_style() {
        let doc = doc_with_components(&["a"]);

        let doc = update_component(
            doc,
            HOME_PAGE,
            "a",
            ComponentPatch::Style("centered".to_owned()),
        )
        .unwrap();

        let component = doc.find_component("a").unwrap();
        assert_eq!(component.style.as_deref(), Some("centered"));
        // Type never changes through a patch.
        assert_eq!(component.kind, ComponentType::Text);
    }

    #[test]
    fn test_update_component_unknown_id_is_silent_noop() {
        let doc = doc_with_components(&["a"]);
        let before = doc.clone();

        let doc = update_component(
            doc,
            HOME_PAGE,
            "zzz",
            ComponentPatch::Content("x".to_owned()),
        )
        .unwrap();

        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_component_rejects_mismatched_patch() {
        let mut doc = SiteDocument::new();
        doc.pages
            .get_mut(HOME_PAGE)
            .unwrap()
            .components
            .push(Component::with_defaults("n1", ComponentType::Navbar, None));

        let err = update_component(
            doc,
            HOME_PAGE,
            "n1",
            ComponentPatch::Hero(HeroData::default()),
        )
        .unwrap_err();

        assert_eq!(
            err,
            MutationError::TypeMismatch {
                kind: ComponentType::Navbar
            }
        );
    }

    #[test]
    fn test_update_component_matching_data_patch() {
        let mut doc = SiteDocument::new();
        doc.pages
            .get_mut(HOME_PAGE)
            .unwrap()
            .components
            .push(Component::with_defaults("n1", ComponentType::Navbar, None));

        let patch = NavbarData {
            logo_text: "Acme".to_owned(),
            ..NavbarData::default()
        };
        let doc = update_component(doc, HOME_PAGE, "n1", ComponentPatch::Navbar(patch)).unwrap();

        let component = doc.find_component("n1").unwrap();
        assert_eq!(component.navbar_data.as_ref().unwrap().logo_text, "Acme");
    }

    #[test]
    fn test_reorder_components() {
        let doc = doc_with_components(&["A", "B", "C", "D"]);

        let doc = reorder_components(doc, HOME_PAGE, 0, 2).unwrap();

        assert_eq!(
            component_ids(&doc, HOME_PAGE),
            vec!["B".to_owned(), "C".to_owned(), "A".to_owned(), "D".to_owned()]
        );
    }

    #[test]
    fn test_reorder_out_of_bounds_is_noop() {
        let doc = doc_with_components(&["A", "B"]);

        let doc = reorder_components(doc, HOME_PAGE, 0, 5).unwrap();

        assert_eq!(
            component_ids(&doc, HOME_PAGE),
            vec!["A".to_owned(), "B".to_owned()]
        );
    }

    #[test]
    fn test_reorder_equal_indices_is_noop() {
        let doc = doc_with_components(&["A", "B"]);

        let doc = reorder_components(doc, HOME_PAGE, 1, 1).unwrap();

        assert_eq!(
            component_ids(&doc, HOME_PAGE),
            vec!["A".to_owned(), "B".to_owned()]
        );
    }

    #[test]
    fn test_add_page_slugifies() {
        let doc = SiteDocument::new();

        let doc = add_page(doc, "  About Us ").unwrap();

        assert!(doc.pages.contains("about-us"));
    }

    #[test]
    fn test_add_page_duplicate_case_insensitive() {
        let doc = SiteDocument::new();

        let err = add_page(doc, "Home").unwrap_err();

        assert_eq!(err, MutationError::DuplicatePage("home".to_owned()));
    }

    #[test]
    fn test_add_page_invalid_name() {
        let doc = SiteDocument::new();

        let err = add_page(doc, "!!!").unwrap_err();

        assert_eq!(err, MutationError::InvalidPageName("!!!".to_owned()));
    }

    #[test]
    fn test_delete_last_page_rejected() {
        let doc = SiteDocument::new();
        let before = doc.clone();

        let err = delete_page(doc.clone(), HOME_PAGE).unwrap_err();

        assert_eq!(err, MutationError::LastPage);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_page() {
        let doc = add_page(SiteDocument::new(), "about").unwrap();

        let doc = delete_page(doc, "about").unwrap();

        assert_eq!(doc.pages.names(), vec![HOME_PAGE.to_owned()]);
    }

    #[test]
    fn test_delete_unknown_page() {
        let doc = SiteDocument::new();

        let err = delete_page(doc, "ghost").unwrap_err();

        assert_eq!(err, MutationError::UnknownPage("ghost".to_owned()));
    }

    #[test]
    fn test_set_theme() {
        let doc = SiteDocument::new();

        let doc = set_theme(doc, ThemeSettings::default());

        assert_eq!(doc.theme, Some(ThemeSettings::default()));
    }
}
