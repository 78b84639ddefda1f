//! HTTP request handlers.

pub(crate) mod components;
pub(crate) mod pages;
pub(crate) mod preview;
pub(crate) mod products;
pub(crate) mod render;
pub(crate) mod sites;
pub(crate) mod theme;

use tessera_site::SiteDocument;
use tessera_storage::SiteStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Load a registered site's document, 404ing on unknown ids so mutations
/// never create ghost data for sites that were deleted.
pub(crate) fn load_site_document(
    state: &AppState,
    site_id: &str,
) -> Result<(SiteStore, SiteDocument), ServerError> {
    if state.registry.get_site(site_id)?.is_none() {
        return Err(ServerError::SiteNotFound(site_id.to_owned()));
    }
    let store = state.site_store(site_id);
    let doc = store.load_document()?;
    Ok((store, doc))
}
