//! Site registry endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tessera_site::{Component, Product, ThemeSettings};
use tessera_storage::Site;

use crate::error::ServerError;
use crate::handlers::load_site_document;
use crate::state::AppState;

/// Body for POST /api/sites.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateSite {
    pub name: String,
}

/// Response for GET /api/sites/{id}/document.
#[derive(Serialize)]
pub(crate) struct DocumentResponse {
    pages: Vec<PageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeSettings>,
    products: Vec<Product>,
}

#[derive(Serialize)]
struct PageView {
    name: String,
    components: Vec<Component>,
}

/// Handle GET /api/sites.
pub(crate) async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Site>>, ServerError> {
    Ok(Json(state.registry.list_sites()?))
}

/// Handle POST /api/sites.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSite>,
) -> Result<impl IntoResponse, ServerError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("site name cannot be empty".to_owned()));
    }
    let site = state.registry.create_site(name)?;
    Ok((StatusCode::CREATED, Json(site)))
}

/// Handle GET /api/sites/{id}.
pub(crate) async fn get_site(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> Result<Json<Site>, ServerError> {
    state
        .registry
        .get_site(&site_id)?
        .map(Json)
        .ok_or(ServerError::SiteNotFound(site_id))
}

/// Handle DELETE /api/sites/{id}.
pub(crate) async fn delete_site(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.registry.get_site(&site_id)?.is_none() {
        return Err(ServerError::SiteNotFound(site_id));
    }
    state.registry.delete_site(&site_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /api/sites/{id}/document.
pub(crate) async fn document(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> Result<Json<DocumentResponse>, ServerError> {
    let (_, doc) = load_site_document(&state, &site_id)?;

    let pages = doc
        .pages
        .iter()
        .map(|(name, page)| PageView {
            name: name.to_owned(),
            components: page.components.clone(),
        })
        .collect();

    Ok(Json(DocumentResponse {
        pages,
        theme: doc.theme,
        products: doc.products,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use pretty_assertions::assert_eq;
    use tessera_kv::KvStore;
    use tower::ServiceExt;

    use crate::app::create_router;
    use crate::test_util::{request_json, seed_site, test_state};

    use super::*;

    #[tokio::test]
    async fn test_create_list_get_delete() {
        let state = test_state(true);
        let app = create_router(state);

        // Create
        let (status, created) =
            request_json(app.clone(), "POST", "/api/sites", Some(r#"{"name":"Acme"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_owned();
        assert_eq!(created["name"], "Acme");

        // List
        let (status, listed) = request_json(app.clone(), "GET", "/api/sites", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        // Get
        let (status, fetched) =
            request_json(app.clone(), "GET", &format!("/api/sites/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], id.as_str());

        // Delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/sites/{id}"))
                    .header(header::HOST, "www.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (status, _) = request_json(app, "GET", &format!("/api/sites/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let state = test_state(true);
        let app = create_router(state);

        let (status, _) =
            request_json(app, "POST", "/api/sites", Some(r#"{"name":"  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_document_shape() {
        let state = test_state(true);
        let site_id = seed_site(&state, "Acme");
        let app = create_router(state);

        let (status, doc) =
            request_json(app, "GET", &format!("/api/sites/{site_id}/document"), None).await;

        assert_eq!(status, StatusCode::OK);
        let pages = doc["pages"].as_array().unwrap();
        assert_eq!(pages[0]["name"], "home");
        assert!(pages[0]["components"][0]["type"].is_string());
    }

    #[tokio::test]
    async fn test_document_unknown_site() {
        let state = test_state(true);
        let app = create_router(state);

        let (status, body) = request_json(app, "GET", "/api/sites/zz/document", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("site not found"));
    }

    #[tokio::test]
    async fn test_delete_cascades_document() {
        let state = test_state(true);
        let site_id = seed_site(&state, "Acme");
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/sites/{site_id}"))
                    .header(header::HOST, "www.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        assert!(
            state
                .kv
                .scan_prefix(&format!("site:{site_id}:"))
                .unwrap()
                .is_empty()
        );
    }
}
