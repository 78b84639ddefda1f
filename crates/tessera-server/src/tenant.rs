//! Tenant request middleware.
//!
//! Runs once per inbound request, stateless between requests. Classifies the
//! hostname, and for tenant subdomains: resolves and verifies the auth
//! token, redirects to login on failure (when enforcement is on), rewrites
//! the URI to the internal render path with credential params stripped, and
//! propagates the token into the cross-subdomain cookie.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::{self, ResolvedToken, resolve_token};
use crate::hostname::{self, HostClass};
use crate::state::AppState;

pub(crate) async fn tenant_rewrite(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let host = hostname::strip_port(host).to_owned();

    let subdomain = match hostname::classify(&host, &state.base_domain) {
        HostClass::Tenant(subdomain) => subdomain,
        // Main-domain, reserved, and unrelated hosts pass through untouched.
        HostClass::Main | HostClass::Reserved(_) | HostClass::Unrelated => {
            return next.run(request).await;
        }
    };

    let cookie_header = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);

    let resolved = resolve_token(cookie_header.as_deref(), query.as_deref());

    let propagate: Option<ResolvedToken> = if state.enforce_auth {
        let Some(resolved) = resolved else {
            return login_redirect(&state, &host, &path, query.as_deref());
        };
        if let Err(err) = state.signer.verify(&resolved.token) {
            tracing::warn!(%err, subdomain = %subdomain, "rejecting tenant request token");
            return login_redirect(&state, &host, &path, query.as_deref());
        }
        Some(resolved)
    } else {
        resolved
    };

    if let Some(rewritten) = hostname::rewrite_tenant_path(&subdomain, &path, query.as_deref()) {
        match rewritten.parse::<Uri>() {
            Ok(uri) => *request.uri_mut() = uri,
            Err(err) => {
                tracing::warn!(%err, %rewritten, "tenant rewrite produced an unparseable URI");
            }
        }
    }

    let mut response = next.run(request).await;

    if let Some(token) = propagate
        && !token.had_auth_cookie
        && let Ok(value) = HeaderValue::from_str(&auth::auth_cookie(
            &token.token,
            &state.base_domain,
            state.secure_cookies(),
        ))
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

fn login_redirect(state: &AppState, host: &str, path: &str, query: Option<&str>) -> Response {
    let original = match query {
        Some(q) => format!("{}://{host}{path}?{q}", state.scheme),
        None => format!("{}://{host}{path}", state.scheme),
    };
    Redirect::temporary(&state.login_redirect_url(&original)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::app::create_router;
    use crate::test_util::{seed_site, test_state};

    fn request(uri: &str, host: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_tenant_without_token_redirects_to_login() {
        let state = test_state(true);
        let app = create_router(state);

        let response = app
            .oneshot(request("/about", "shop.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("https://www.example.com/login?redirect="));
        assert!(location.contains("shop.example.com"));
    }

    #[tokio::test]
    async fn test_tenant_with_invalid_token_redirects() {
        let state = test_state(true);
        let app = create_router(state);

        let response = app
            .oneshot(request("/?token=garbage", "shop.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_tenant_with_valid_token_renders_and_sets_cookie() {
        let state = test_state(true);
        seed_site(&state, "My Shop");
        let token = state.signer.issue("op", 3600);
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(request(&format!("/?token={token}"), "my-shop.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
        assert!(cookie.starts_with("authToken="));
        assert!(cookie.contains("Domain=.example.com"));

        let body = body_string(response).await;
        assert!(body.contains("<!doctype html>"));
        // The credential must never leak into the rendered page.
        assert!(!body.contains(&token));
    }

    #[tokio::test]
    async fn test_tenant_with_existing_cookie_does_not_reset_it() {
        let state = test_state(true);
        seed_site(&state, "My Shop");
        let token = state.signer.issue("op", 3600);
        let app = create_router(Arc::clone(&state));

        let mut req = request("/", "my-shop.example.com");
        req.headers_mut().insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("authToken={token}")).unwrap(),
        );
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_handoff_params_are_stripped_and_page_honored() {
        let state = test_state(true);
        seed_site(&state, "My Shop");
        let token = state.signer.issue("op", 3600);
        let app = create_router(Arc::clone(&state));

        let uri = format!("/?preserve_auth=true&auth_token={token}&page=about");
        let response = app.oneshot(request(&uri, "my-shop.example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        // The seeded site has an "about" page with a hero on it.
        assert!(body.contains("hero"));
        assert!(!body.contains(&token));
    }

    #[tokio::test]
    async fn test_enforcement_off_renders_without_token() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        let response = app.oneshot(request("/", "my-shop.example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_subdomain_renders_site_not_found() {
        let state = test_state(false);
        let app = create_router(state);

        let response = app.oneshot(request("/", "ghost.example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Site not found"));
    }

    #[tokio::test]
    async fn test_reserved_subdomain_passes_through() {
        let state = test_state(true);
        let app = create_router(state);

        // No token, but api.* is never a tenant: no redirect, plain 404
        // from the router.
        let response = app.oneshot(request("/health", "api.example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_main_domain_passes_through() {
        let state = test_state(true);
        let app = create_router(state);

        let response = app
            .oneshot(request("/api/sites", "www.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tenant_asset_path_not_rewritten() {
        let state = test_state(false);
        seed_site(&state, "My Shop");
        let app = create_router(state);

        // Asset paths skip the rewrite and fall through to the router.
        let response = app
            .oneshot(request("/assets/app.css", "my-shop.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
