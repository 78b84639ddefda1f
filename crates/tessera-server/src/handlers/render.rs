//! Public tenant rendering: the internal `/_render` endpoint.
//!
//! The tenant middleware rewrites clean public URLs to this path with
//! `subdomain` and optional `page` query parameters attached.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tessera_render::{RenderContext, RenderMode, render_not_found, render_page, render_site_html};
use tessera_site::ThemeSettings;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters attached by the tenant rewrite.
#[derive(Debug, Deserialize)]
pub(crate) struct RenderParams {
    pub subdomain: String,
    pub page: Option<String>,
}

/// Handle GET `/_render`.
pub(crate) async fn render_site(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RenderParams>,
) -> Response {
    let Some(site_id) = state.resolver.resolve(&params.subdomain) else {
        tracing::info!(subdomain = %params.subdomain, "subdomain matched no site");
        return (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&params.subdomain)),
        )
            .into_response();
    };

    match render_site_page(&state, &site_id, params.page.as_deref(), RenderMode::Public) {
        Ok(html) => Html(html).into_response(),
        Err(err @ ServerError::PageNotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(page_missing_html(&err))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Render one page of a site to a full HTML document.
///
/// Shared between the public tenant view and the operator preview; only the
/// link mode differs.
pub(crate) fn render_site_page(
    state: &AppState,
    site_id: &str,
    page: Option<&str>,
    mode: RenderMode,
) -> Result<String, ServerError> {
    let store = state.site_store(site_id);
    let doc = store.load_document()?;

    let page_name = match page {
        Some(name) => name.to_owned(),
        None => doc
            .default_page_name()
            .unwrap_or(tessera_site::HOME_PAGE)
            .to_owned(),
    };
    let Some(page) = doc.pages.get(&page_name) else {
        return Err(ServerError::PageNotFound(page_name));
    };

    let page_names = doc.pages.names();
    let ctx = RenderContext {
        site_id,
        current_page: &page_name,
        page_names: &page_names,
        products: &doc.products,
    };
    let body = render_page(&page.components, mode, &ctx);

    let theme = doc.theme.unwrap_or_default();
    let title = store
        .load_site_metadata()?
        .title
        .unwrap_or_else(|| page_name.clone());

    Ok(render_site_html(&title, &theme, &body))
}

/// Minimal shell for a resolvable site whose requested page does not exist.
fn page_missing_html(err: &ServerError) -> String {
    let body = format!(
        r#"<main class="page-not-found"><h1>Page not found</h1><p>{}</p></main>"#,
        tessera_render::escape_html(&err.to_string())
    );
    render_site_html("Page not found", &ThemeSettings::default(), &body)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::app::create_router;
    use crate::test_util::{seed_site, test_state};

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::HOST, "www.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_render_default_page() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        let (status, body) = get(app, "/_render?subdomain=my-shop").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("navbar"));
        assert!(body.contains("<title>My Shop</title>"));
    }

    #[tokio::test]
    async fn test_render_named_page() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        let (status, body) = get(app, "/_render?subdomain=my-shop&page=about").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("hero"));
    }

    #[tokio::test]
    async fn test_render_unknown_page_is_404() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        let (status, body) = get(app, "/_render?subdomain=my-shop&page=ghost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_render_unknown_subdomain_is_site_not_found() {
        let state = test_state(false);
        let app = create_router(state);

        let (status, body) = get(app, "/_render?subdomain=nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Site not found"));
    }

    #[tokio::test]
    async fn test_public_mode_navbar_links_are_clean_paths() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        let (_, body) = get(app, "/_render?subdomain=my-shop").await;

        // The seeded navbar "About" link matches the "about" page.
        assert!(body.contains(r#"href="/about""#));
        assert!(!body.contains("/preview?site="));
    }
}
