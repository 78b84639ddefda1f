//! Theme endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tessera_site::{ThemeSettings, mutate};

use crate::error::ServerError;
use crate::handlers::load_site_document;
use crate::state::AppState;

/// Handle GET /api/sites/{id}/theme. Missing themes read as the default.
pub(crate) async fn get_theme(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> Result<Json<ThemeSettings>, ServerError> {
    if state.registry.get_site(&site_id)?.is_none() {
        return Err(ServerError::SiteNotFound(site_id));
    }
    let theme = state.site_store(&site_id).load_theme()?.unwrap_or_default();
    Ok(Json(theme))
}

/// Handle PUT /api/sites/{id}/theme.
pub(crate) async fn set_theme(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
    Json(theme): Json<ThemeSettings>,
) -> Result<StatusCode, ServerError> {
    let (store, doc) = load_site_document(&state, &site_id)?;
    let doc = mutate::set_theme(doc, theme);
    store.save_document(&doc)?;
    Ok(StatusCode::NO_CONTENT)
}
