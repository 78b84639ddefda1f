//! Footer rendering.

use std::fmt::Write;

use tessera_site::FooterData;

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["default", "simple"];

pub(crate) fn render(data: &FooterData, style: Option<&str>, out: &mut String) {
    let style = resolve_style(STYLES, style);

    write!(out, r#"<footer class="footer footer-{style}">"#).unwrap();
    if !data.tagline.is_empty() {
        write!(
            out,
            r#"<p class="footer-tagline">{}</p>"#,
            escape_html(&data.tagline)
        )
        .unwrap();
    }

    if style == "default" {
        for section in &data.sections {
            out.push_str(r#"<div class="footer-section">"#);
            write!(out, "<h4>{}</h4><ul>", escape_html(&section.title)).unwrap();
            for link in &section.links {
                write!(
                    out,
                    r#"<li><a href="{}">{}</a></li>"#,
                    escape_html(&link.href),
                    escape_html(&link.text)
                )
                .unwrap();
            }
            out.push_str("</ul></div>");
        }
    }

    if !data.copyright.is_empty() {
        write!(
            out,
            r#"<p class="footer-copyright">{}</p>"#,
            escape_html(&data.copyright)
        )
        .unwrap();
    }
    out.push_str("</footer>");
}
