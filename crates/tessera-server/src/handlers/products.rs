//! Product catalog endpoints.
//!
//! Products are stored as one site-level record, separate from the page
//! structure, and surfaced on pages through `products` components.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tessera_site::Product;

use crate::error::ServerError;
use crate::state::AppState;

/// Body for PUT /api/sites/{id}/products.
#[derive(Debug, Deserialize)]
pub(crate) struct SetProducts {
    pub products: Vec<Product>,
}

/// Handle GET /api/sites/{id}/products.
pub(crate) async fn list(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> Result<Json<Vec<Product>>, ServerError> {
    if state.registry.get_site(&site_id)?.is_none() {
        return Err(ServerError::SiteNotFound(site_id));
    }
    Ok(Json(state.site_store(&site_id).load_products()?))
}

/// Handle PUT /api/sites/{id}/products.
pub(crate) async fn set(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
    Json(body): Json<SetProducts>,
) -> Result<StatusCode, ServerError> {
    if state.registry.get_site(&site_id)?.is_none() {
        return Err(ServerError::SiteNotFound(site_id));
    }

    let mut seen = std::collections::HashSet::new();
    for product in &body.products {
        if product.id.is_empty() {
            return Err(ServerError::BadRequest("product id cannot be empty".to_owned()));
        }
        if !seen.insert(product.id.as_str()) {
            return Err(ServerError::BadRequest(format!(
                "duplicate product id `{}`",
                product.id
            )));
        }
    }

    state.site_store(&site_id).save_products(&body.products)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::app::create_router;
    use crate::test_util::{request_json, seed_site, test_state};

    #[tokio::test]
    async fn test_products_round_trip() {
        let state = test_state(true);
        let site_id = seed_site(&state, "Acme");
        let app = create_router(state);

        let body = r#"{"products":[{"id":"p1","name":"Mug","priceCents":999}]}"#;
        let (status, _) = request_json(
            app.clone(),
            "PUT",
            &format!("/api/sites/{site_id}/products"),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, listed) =
            request_json(app, "GET", &format!("/api/sites/{site_id}/products"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["name"], "Mug");
        assert_eq!(listed[0]["priceCents"], 999);
    }

    #[tokio::test]
    async fn test_duplicate_product_ids_rejected() {
        let state = test_state(true);
        let site_id = seed_site(&state, "Acme");
        let app = create_router(state);

        let body = r#"{"products":[
            {"id":"p1","name":"A","priceCents":1},
            {"id":"p1","name":"B","priceCents":2}
        ]}"#;
        let (status, error) = request_json(
            app,
            "PUT",
            &format!("/api/sites/{site_id}/products"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().contains("duplicate"));
    }
}
