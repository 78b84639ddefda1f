//! Site document model for the Tessera site builder.
//!
//! A site is a tree of typed, independently editable components: ordered
//! pages, each holding an ordered list of [`Component`] records, plus a
//! site-wide [`ThemeSettings`] and an optional product catalog.
//!
//! The model is deliberately storage-agnostic. Mutations are pure functions
//! in [`mutate`] that consume a document and return a new one (or a typed
//! [`MutationError`]); persistence is the storage manager's concern.
//!
//! # Invariants
//!
//! - A document holds at least one page at all times; [`mutate::delete_page`]
//!   rejects deleting the last one.
//! - Component order within a page is render order and is preserved exactly
//!   across storage round-trips.
//! - A component's type is immutable after creation; changing type means
//!   delete + recreate. Its style may change freely.

mod component;
mod document;
pub mod mutate;
pub mod slug;
mod theme;

pub use component::{
    AboutUsData, Component, ComponentType, FooterData, FooterLink, FooterSection, HeroButton,
    HeroData, NavButton, NavLink, NavbarData, ProductsData, Slide, Stat, TeamMember,
};
pub use document::{HOME_PAGE, Page, PageMap, Product, SiteDocument};
pub use mutate::{ComponentPatch, MutationError};
pub use theme::{FontFamily, ThemeSettings};
