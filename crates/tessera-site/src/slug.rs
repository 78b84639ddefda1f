//! Slug derivation for page names and tenant subdomains.
//!
//! A slug is the lowercase, hyphenated, alphanumeric-only derivation of a
//! human-readable name. Page keys, tenant subdomains, and navbar link
//! matching all go through the same function so "My Shop", "my shop" and
//! "my-shop" agree everywhere.

/// Derive a slug from human-readable text.
///
/// Returns an empty string when the input has no representable characters;
/// callers decide whether that is an error (page names) or a non-match
/// (link enhancement).
#[must_use]
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

/// Whether two names slugify to the same non-empty slug.
#[must_use]
pub fn slug_eq(a: &str, b: &str) -> bool {
    let sa = slugify(a);
    !sa.is_empty() && sa == slugify(b)
}
