//! Component management endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tessera_site::{
    AboutUsData, Component, ComponentPatch, ComponentType, FooterData, HeroData, NavbarData,
    ProductsData, mutate,
};

use crate::error::ServerError;
use crate::handlers::load_site_document;
use crate::state::AppState;

/// Body for POST .../components.
#[derive(Debug, Deserialize)]
pub(crate) struct AddComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub style: Option<String>,
}

/// Body for PATCH .../components/{componentId}.
///
/// Exactly one field must be present. Data fields are checked against the
/// component's declared type before being applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub(crate) struct PatchBody {
    style: Option<String>,
    content: Option<String>,
    navbar_data: Option<NavbarData>,
    hero_data: Option<HeroData>,
    footer_data: Option<FooterData>,
    products_data: Option<ProductsData>,
    about_us_data: Option<AboutUsData>,
}

impl PatchBody {
    fn into_patch(self) -> Result<ComponentPatch, ServerError> {
        let mut patches = Vec::new();
        if let Some(style) = self.style {
            patches.push(ComponentPatch::Style(style));
        }
        if let Some(content) = self.content {
            patches.push(ComponentPatch::Content(content));
        }
        if let Some(data) = self.navbar_data {
            patches.push(ComponentPatch::Navbar(data));
        }
        if let Some(data) = self.hero_data {
            patches.push(ComponentPatch::Hero(data));
        }
        if let Some(data) = self.footer_data {
            patches.push(ComponentPatch::Footer(data));
        }
        if let Some(data) = self.products_data {
            patches.push(ComponentPatch::Products(data));
        }
        if let Some(data) = self.about_us_data {
            patches.push(ComponentPatch::AboutUs(data));
        }

        if patches.len() != 1 {
            return Err(ServerError::BadRequest(
                "patch must set exactly one field".to_owned(),
            ));
        }
        Ok(patches.remove(0))
    }
}

/// Body for POST .../reorder.
#[derive(Debug, Deserialize)]
pub(crate) struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Handle POST /api/sites/{id}/pages/{page}/components.
pub(crate) async fn add(
    State(state): State<Arc<AppState>>,
    Path((site_id, page)): Path<(String, String)>,
    Json(body): Json<AddComponent>,
) -> Result<impl IntoResponse, ServerError> {
    let kind = ComponentType::parse(&body.kind);
    if matches!(kind, ComponentType::Unknown(_)) {
        return Err(ServerError::BadRequest(format!(
            "unknown component type `{}`",
            body.kind
        )));
    }

    let (store, doc) = load_site_document(&state, &site_id)?;
    let doc = mutate::add_component(doc, &page, kind, body.style)?;
    store.save_document(&doc)?;

    // add_component appends, so the created record is the page's last.
    let created: Option<Component> = doc
        .pages
        .get(&page)
        .and_then(|p| p.components.last())
        .cloned();
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handle PATCH /api/sites/{id}/pages/{page}/components/{componentId}.
pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    Path((site_id, page, component_id)): Path<(String, String, String)>,
    Json(body): Json<PatchBody>,
) -> Result<StatusCode, ServerError> {
    let patch = body.into_patch()?;

    let (store, doc) = load_site_document(&state, &site_id)?;
    let doc = mutate::update_component(doc, &page, &component_id, patch)?;
    store.save_document(&doc)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle DELETE /api/sites/{id}/pages/{page}/components/{componentId}.
pub(crate) async fn remove(
    State(state): State<Arc<AppState>>,
    Path((site_id, page, component_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ServerError> {
    let (store, doc) = load_site_document(&state, &site_id)?;
    let doc = mutate::remove_component(doc, &page, &component_id)?;
    store.save_document(&doc)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle POST /api/sites/{id}/pages/{page}/reorder.
pub(crate) async fn reorder(
    State(state): State<Arc<AppState>>,
    Path((site_id, page)): Path<(String, String)>,
    Json(body): Json<Reorder>,
) -> Result<Json<Vec<String>>, ServerError> {
    let (store, doc) = load_site_document(&state, &site_id)?;
    let doc = mutate::reorder_components(doc, &page, body.from, body.to)?;
    store.save_document(&doc)?;

    let ids = doc
        .pages
        .get(&page)
        .map(|p| p.components.iter().map(|c| c.id.clone()).collect())
        .unwrap_or_default();
    Ok(Json(ids))
}
