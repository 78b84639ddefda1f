//! Hero rendering.

use std::fmt::Write;

use tessera_site::HeroData;

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["default", "split", "slider"];

pub(crate) fn render(data: &HeroData, style: Option<&str>, out: &mut String) {
    let style = resolve_style(STYLES, style);

    write!(out, r#"<section class="hero hero-{style}">"#).unwrap();
    out.push_str(r#"<div class="hero-copy">"#);
    write!(out, "<h1>{}</h1>", escape_html(&data.heading)).unwrap();
    if !data.subheading.is_empty() {
        write!(out, "<p>{}</p>", escape_html(&data.subheading)).unwrap();
    }
    if !data.buttons.is_empty() {
        out.push_str(r#"<div class="hero-actions">"#);
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
    out.push_str("</div>");

    match style {
        // Split shows the first image beside the copy.
        "split" => {
            if let Some(slide) = data.slides.first() {
                write!(
                    out,
                    r#"<img class="hero-image" src="{}" alt="{}">"#,
                    escape_html(&slide.image_url),
                    escape_html(&slide.alt)
                )
                .unwrap();
            }
        }
        "slider" => {
            if !data.slides.is_empty() {
                out.push_str(r#"<div class="hero-slides">"#);
                for slide in &data.slides {
                    write!(
                        out,
                        r#"<img src="{}" alt="{}">"#,
                        escape_html(&slide.image_url),
                        escape_html(&slide.alt)
                    )
                    .unwrap();
                }
                out.push_str("</div>");
            }
        }
        _ => {}
    }

    out.push_str("</section>");
}
