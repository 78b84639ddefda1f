//! Router construction.
//!
//! Builds the axum router with all routes and middleware. The tenant
//! rewrite middleware wraps the whole router so route matching happens
//! against the rewritten URI.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{components, pages, preview, products, render, sites, theme};
use crate::middleware::security;
use crate::state::AppState;
use crate::tenant;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/sites", get(sites::list).post(sites::create))
        .route(
            "/api/sites/{site_id}",
            get(sites::get_site).delete(sites::delete_site),
        )
        .route("/api/sites/{site_id}/document", get(sites::document))
        .route("/api/sites/{site_id}/pages", post(pages::add))
        .route("/api/sites/{site_id}/pages/{page}", delete(pages::remove))
        .route(
            "/api/sites/{site_id}/pages/{page}/components",
            post(components::add),
        )
        .route(
            "/api/sites/{site_id}/pages/{page}/components/{component_id}",
            patch(components::update).delete(components::remove),
        )
        .route(
            "/api/sites/{site_id}/pages/{page}/reorder",
            post(components::reorder),
        )
        .route(
            "/api/sites/{site_id}/theme",
            get(theme::get_theme).put(theme::set_theme),
        )
        .route(
            "/api/sites/{site_id}/products",
            get(products::list).put(products::set),
        );

    Router::new()
        .route("/_render", get(render::render_site))
        .route("/preview", get(preview::preview))
        .merge(api_routes)
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            tenant::tenant_rewrite,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
