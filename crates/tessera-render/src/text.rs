//! Plain text block rendering.

use std::fmt::Write;

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["default", "lead"];

pub(crate) fn render(content: &str, style: Option<&str>, out: &mut String) {
    let style = resolve_style(STYLES, style);

    write!(out, r#"<div class="text text-{style}">"#).unwrap();
    // Blank lines separate paragraphs; no markup is interpreted.
    for paragraph in content.split("\n\n").filter(|p| !p.trim().is_empty()) {
        write!(out, "<p>{}</p>", escape_html(paragraph.trim())).unwrap();
    }
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_split() {
        let mut out = String::new();
        render("First.\n\nSecond.", None, &mut out);

        assert!(out.contains("<p>First.</p>"));
        assert!(out.contains("<p>Second.</p>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut out = String::new();
        render("<em>hi</em>", None, &mut out);

        assert!(!out.contains("<em>"));
    }

    #[test]
    fn test_lead_style_class() {
        let mut out = String::new();
        render("x", Some("lead"), &mut out);

        assert!(out.contains("text-lead"));
    }
}
