//! Whole-page assembly: component concatenation and the document shell.

use std::fmt::Write;

use tessera_site::{Component, ThemeSettings};

use crate::dispatch::{RenderContext, RenderMode, render_component};
use crate::escape::escape_html;
use crate::theme::write_theme_css;

/// Render a page's components in order.
#[must_use]
pub fn render_page(
    components: &[Component],
    mode: RenderMode,
    ctx: &RenderContext<'_>,
) -> String {
    let mut out = String::new();
    for component in components {
        out.push_str(&render_component(component, mode, ctx));
    }
    out
}

/// Wrap rendered body content in a full HTML document with the theme
/// applied.
#[must_use]
pub fn render_site_html(title: &str, theme: &ThemeSettings, body: &str) -> String {
    let mut css = String::new();
    write_theme_css(theme, &mut css);

    let mut out = String::with_capacity(body.len() + css.len() + 256);
    out.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    write!(out, "<title>{}</title>", escape_html(title)).unwrap();
    write!(out, "<style>{css}</style>").unwrap();
    out.push_str("</head><body>");
    out.push_str(body);
    out.push_str("</body></html>");
    out
}

/// The terminal "site not found" state for an unresolvable subdomain.
#[must_use]
pub fn render_not_found(subdomain: &str) -> String {
    let mut body = String::new();
    body.push_str(r#"<main class="site-not-found">"#);
    body.push_str("<h1>Site not found</h1>");
    write!(
        body,
        "<p>There is no site published at <strong>{}</strong>.</p>",
        escape_html(subdomain)
    )
    .unwrap();
    body.push_str("</main>");

    render_site_html("Site not found", &ThemeSettings::default(), &body)
}
