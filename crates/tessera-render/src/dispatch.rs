//! Render dispatch: `(type, style)` to a concrete presentation.

use tessera_site::slug::slug_eq;
use tessera_site::{Component, ComponentType, HOME_PAGE, NavbarData, Product};

use crate::escape::escape_html;
use crate::{about, footer, hero, navbar, products, text};

/// Rendering surface a component is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Operator preview: links use the internal query-param form.
    Preview,
    /// Public tenant view: links use the clean path form.
    Public,
}

/// Cross-component context supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub site_id: &'a str,
    pub current_page: &'a str,
    /// Every page name of the site, in document order.
    pub page_names: &'a [String],
    /// The site's product catalog, rendered by `products` components.
    pub products: &'a [Product],
}

/// The navigable URL for `page` in the given mode.
#[must_use]
pub fn page_url(mode: RenderMode, site_id: &str, page: &str) -> String {
    match mode {
        RenderMode::Preview => format!("/preview?site={site_id}&page={page}"),
        RenderMode::Public => {
            if page == HOME_PAGE {
                "/".to_owned()
            } else {
                format!("/{page}")
            }
        }
    }
}

/// Render one component to HTML.
///
/// Missing typed payloads are upgraded from the type's default; unknown
/// styles fall back to the type's default variant; unknown types render an
/// inert placeholder showing the escaped `content`.
#[must_use]
pub fn render_component(component: &Component, mode: RenderMode, ctx: &RenderContext<'_>) -> String {
    let style = component.style.as_deref();
    let mut out = String::new();

    match &component.kind {
        ComponentType::Navbar => {
            let data = component.navbar_data.clone().unwrap_or_default();
            let data = enhance_navbar_links(data, mode, ctx);
            navbar::render(&data, style, &mut out);
        }
        ComponentType::Hero => {
            let data = component.hero_data.clone().unwrap_or_default();
            hero::render(&data, style, &mut out);
        }
        ComponentType::Footer => {
            let data = component.footer_data.clone().unwrap_or_default();
            footer::render(&data, style, &mut out);
        }
        ComponentType::Products => {
            let data = component.products_data.clone().unwrap_or_default();
            products::render(&data, ctx.products, style, &mut out);
        }
        ComponentType::AboutUs => {
            let data = component.about_us_data.clone().unwrap_or_default();
            about::render(&data, style, &mut out);
        }
        ComponentType::Text => {
            text::render(&component.content, style, &mut out);
        }
        ComponentType::Unknown(tag) => {
            out.push_str(&format!(
                r#"<div class="component-unknown" data-type="{}">{}</div>"#,
                escape_html(tag),
                escape_html(&component.content)
            ));
        }
    }

    out
}

/// Rewrite navbar links that point at sibling pages.
///
/// A link whose text matches an existing page name (case-insensitively, or
/// via slug equality) gets its target replaced with that page's navigable
/// URL in the current mode. Links with no matching page are left as
/// authored.
fn enhance_navbar_links(
    mut data: NavbarData,
    mode: RenderMode,
    ctx: &RenderContext<'_>,
) -> NavbarData {
    for link in &mut data.links {
        let matched = ctx
            .page_names
            .iter()
            .find(|page| page.eq_ignore_ascii_case(&link.text) || slug_eq(&link.text, page));
        if let Some(page) = matched {
            link.href = page_url(mode, ctx.site_id, page);
        }
    }
    data
}

/// Pick a known style variant, falling back to the first (default) entry.
pub(crate) fn resolve_style<'a>(styles: &'a [&'a str], requested: Option<&str>) -> &'a str {
    requested
        .and_then(|r| styles.iter().find(|s| **s == r).copied())
        .unwrap_or(styles[0])
}
