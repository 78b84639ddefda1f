//! Products grid rendering.
//!
//! The component carries presentation settings; the product records come
//! from the site document's catalog via the render context.

use std::fmt::Write;

use tessera_site::{Product, ProductsData};

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["grid", "list"];

/// Format a price in cents as a dollar amount.
fn format_price(price_cents: u32) -> String {
    format!("${}.{:02}", price_cents / 100, price_cents % 100)
}

pub(crate) fn render(
    data: &ProductsData,
    products: &[Product],
    style: Option<&str>,
    out: &mut String,
) {
    let style = resolve_style(STYLES, style);
    let columns = data.columns.clamp(1, 6);

    write!(
        out,
        r#"<section class="products products-{style}" data-columns="{columns}">"#
    )
    .unwrap();
    write!(out, "<h2>{}</h2>", escape_html(&data.heading)).unwrap();
    if !data.subheading.is_empty() {
        write!(out, "<p>{}</p>", escape_html(&data.subheading)).unwrap();
    }

    if products.is_empty() {
        out.push_str(r#"<p class="products-empty">No products yet.</p>"#);
    } else {
        out.push_str(r#"<div class="products-items">"#);
        for product in products {
            out.push_str(r#"<article class="product-card">"#);
            if !product.image_url.is_empty() {
                write!(
                    out,
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(&product.image_url),
                    escape_html(&product.name)
                )
                .unwrap();
            }
            write!(out, "<h3>{}</h3>", escape_html(&product.name)).unwrap();
            if !product.description.is_empty() {
                write!(out, "<p>{}</p>", escape_html(&product.description)).unwrap();
            }
            write!(
                out,
                r#"<span class="product-price">{}</span>"#,
                format_price(product.price_cents)
            )
            .unwrap();
            out.push_str("</article>");
        }
        out.push_str("</div>");
    }

    out.push_str("</section>");
}
