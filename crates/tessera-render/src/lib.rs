//! Component-to-HTML rendering for the Tessera site builder.
//!
//! Maps a component's `(type, style)` pair to one of a fixed set of
//! presentation variants and produces semantic HTML5. Unknown styles fall
//! back to the type's default variant; entirely unknown types render an
//! inert placeholder showing the component's generic `content`. Records
//! missing their typed payload are upgraded from the type's default payload
//! at render time, never rejected.
//!
//! Theme application is an explicit function over a style sink
//! ([`write_theme_css`]); nothing here mutates global state.

mod about;
mod dispatch;
mod escape;
mod footer;
mod hero;
mod navbar;
mod page;
mod products;
mod text;
mod theme;

pub use dispatch::{RenderContext, RenderMode, page_url, render_component};
pub use escape::escape_html;
pub use page::{render_not_found, render_page, render_site_html};
pub use theme::{theme_css, write_theme_css};
