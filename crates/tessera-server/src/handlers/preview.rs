//! Operator preview: renders a site by id on any domain.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tessera_render::{RenderMode, escape_html, render_site_html};

use crate::error::ServerError;
use crate::handlers::render::render_site_page;
use crate::state::AppState;

/// Query parameters for GET `/preview`.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewParams {
    pub site: String,
    pub page: Option<String>,
    pub product: Option<String>,
}

/// Handle GET `/preview?site={siteId}&page={pageSlug}&product={productId}`.
pub(crate) async fn preview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> Response {
    let site = match state.registry.get_site(&params.site) {
        Ok(Some(site)) => site,
        Ok(None) => return ServerError::SiteNotFound(params.site).into_response(),
        Err(err) => return ServerError::from(err).into_response(),
    };

    if let Some(product_id) = &params.product {
        return product_preview(&state, &site.id, &site.name, product_id);
    }

    match render_site_page(&state, &site.id, params.page.as_deref(), RenderMode::Preview) {
        Ok(html) => Html(html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Detail view for a single product.
fn product_preview(state: &AppState, site_id: &str, site_name: &str, product_id: &str) -> Response {
    let store = state.site_store(site_id);
    let products = match store.load_products() {
        Ok(products) => products,
        Err(err) => return ServerError::from(err).into_response(),
    };
    let theme = match store.load_theme() {
        Ok(theme) => theme.unwrap_or_default(),
        Err(err) => return ServerError::from(err).into_response(),
    };

    let Some(product) = products.iter().find(|p| p.id == *product_id) else {
        return ServerError::BadRequest(format!("no product with id `{product_id}`"))
            .into_response();
    };

    let mut body = String::from(r#"<main class="product-detail"><article class="product-card">"#);
    if !product.image_url.is_empty() {
        body.push_str(&format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(&product.image_url),
            escape_html(&product.name)
        ));
    }
    body.push_str(&format!("<h1>{}</h1>", escape_html(&product.name)));
    if !product.description.is_empty() {
        body.push_str(&format!("<p>{}</p>", escape_html(&product.description)));
    }
    body.push_str(&format!(
        r#"<span class="product-price">${}.{:02}</span>"#,
        product.price_cents / 100,
        product.price_cents % 100
    ));
    body.push_str("</article></main>");

    Html(render_site_html(site_name, &theme, &body)).into_response()
}
