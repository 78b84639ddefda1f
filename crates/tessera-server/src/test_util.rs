//! Shared test fixtures.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tessera_kv::{KvStore, MemoryStore};
use tessera_site::{ComponentType, HOME_PAGE, SiteDocument, mutate};
use tessera_storage::{SiteRegistry, TenantResolver};
use tower::ServiceExt;

use crate::auth::TokenSigner;
use crate::state::AppState;

/// App state over a fresh in-memory store.
pub(crate) fn test_state(enforce_auth: bool) -> Arc<AppState> {
    let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    Arc::new(AppState {
        registry: SiteRegistry::new(Arc::clone(&kv)),
        resolver: TenantResolver::new(Arc::clone(&kv)),
        signer: TokenSigner::new("0123456789abcdef0123456789abcdef"),
        kv,
        base_domain: "example.com".to_owned(),
        scheme: "https".to_owned(),
        enforce_auth,
    })
}

/// Create a site with a navbar on "home" and a hero on an "about" page.
///
/// The default navbar links ("Home", "About") both match pages, which the
/// link-enhancement tests rely on.
pub(crate) fn seed_site(state: &Arc<AppState>, name: &str) -> String {
    let site = state.registry.create_site(name).unwrap();
    let doc = SiteDocument::new();
    let doc = mutate::add_component(doc, HOME_PAGE, ComponentType::Navbar, None).unwrap();
    let doc = mutate::add_page(doc, "about").unwrap();
    let doc = mutate::add_component(doc, "about", ComponentType::Hero, None).unwrap();
    state.site_store(&site.id).save_document(&doc).unwrap();
    site.id
}

/// Fire one request at the router and parse the JSON response body.
///
/// Bodyless responses (204 etc.) come back as `Value::Null`.
pub(crate) async fn request_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "www.example.com");
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}
