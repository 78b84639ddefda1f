//! Page management endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tessera_site::mutate;

use crate::error::ServerError;
use crate::handlers::load_site_document;
use crate::state::AppState;

/// Body for POST /api/sites/{id}/pages.
#[derive(Debug, Deserialize)]
pub(crate) struct AddPage {
    pub name: String,
}

/// Page list after a mutation.
#[derive(Serialize)]
pub(crate) struct PagesResponse {
    pages: Vec<String>,
}

/// Handle POST /api/sites/{id}/pages.
pub(crate) async fn add(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
    Json(body): Json<AddPage>,
) -> Result<impl IntoResponse, ServerError> {
    let (store, doc) = load_site_document(&state, &site_id)?;

    let doc = mutate::add_page(doc, &body.name)?;
    store.save_document(&doc)?;

    Ok((
        StatusCode::CREATED,
        Json(PagesResponse {
            pages: doc.pages.names(),
        }),
    ))
}

/// Handle DELETE /api/sites/{id}/pages/{page}.
pub(crate) async fn remove(
    State(state): State<Arc<AppState>>,
    Path((site_id, page)): Path<(String, String)>,
) -> Result<Json<PagesResponse>, ServerError> {
    let (store, doc) = load_site_document(&state, &site_id)?;

    let doc = mutate::delete_page(doc, &page)?;
    store.save_document(&doc)?;

    Ok(Json(PagesResponse {
        pages: doc.pages.names(),
    }))
}
