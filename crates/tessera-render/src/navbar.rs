//! Navbar rendering.

use std::fmt::Write;

use tessera_site::NavbarData;

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["default", "centered", "minimal"];

pub(crate) fn render(data: &NavbarData, style: Option<&str>, out: &mut String) {
    let style = resolve_style(STYLES, style);

    write!(out, r#"<nav class="navbar navbar-{style}">"#).unwrap();
    write!(
        out,
        r#"<span class="navbar-logo">{}</span>"#,
        escape_html(&data.logo_text)
    )
    .unwrap();

    if style != "minimal" {
        out.push_str(r#"<ul class="navbar-links">"#);
        for link in &data.links {
            write!(
                out,
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&link.href),
                escape_html(&link.text)
            )
            .unwrap();
        }
        out.push_str("</ul>");
    }

    if !data.buttons.is_empty() {
        out.push_str(r#"<div class="navbar-actions">"#);
        for button in &data.buttons {
            write!(
                out,
                r#"<a class="button" href="{}">{}</a>"#,
                escape_html(&button.href),
                escape_html(&button.text)
            )
            .unwrap();
        }
        out.push_str("</div>");
    }

    out.push_str("</nav>");
}
