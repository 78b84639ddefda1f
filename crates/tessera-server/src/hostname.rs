//! Hostname classification and tenant path rewriting.
//!
//! Pure functions over a single request's hostname, path, and query; the
//! middleware in [`crate::tenant`] applies the decisions. Keeping this free
//! of axum types is what makes the routing edge cases directly testable.

/// Subdomain labels reserved for system use, never treated as tenants.
const RESERVED_SUBDOMAINS: &[&str] = &["api", "admin", "www", "mail", "ftp", "cdn", "static"];

/// Main-domain path prefixes that are part of the operator surface.
///
/// Everything else on the main domain also passes through untouched; the
/// list documents the known surface rather than gating it.
const MAIN_ALLOW_PREFIXES: &[&str] = &[
    "/account/", "/login", "/signup", "/register", "/auth/", "/preview", "/builder", "/assets",
    "/api", "/favicon",
];

/// Namespaces that must never be rewritten on a tenant host, to avoid
/// double-rewriting: the internal render path itself plus asset/API routes.
const NO_REWRITE_PREFIXES: &[&str] = &["/_render", "/assets", "/api", "/favicon"];

/// Query parameters that carry credentials during cross-domain handoff and
/// must never leak into the rendered page's query string.
const STRIPPED_PARAMS: &[&str] = &["preserve_auth", "auth_token", "token"];

/// Internal render path tenant requests are rewritten to.
pub(crate) const RENDER_PATH: &str = "/_render";

/// Classification of an inbound hostname against the configured base domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClass {
    /// The base domain itself (or its `www.` alias).
    Main,
    /// A system subdomain such as `api.` or `cdn.`; passed through untouched.
    Reserved(String),
    /// A tenant subdomain; the payload is the leftmost label.
    Tenant(String),
    /// A hostname unrelated to the base domain; passed through untouched.
    Unrelated,
}

/// Classify `hostname` against `base_domain`.
///
/// Comparison is case-insensitive; any port suffix must already be stripped
/// (see [`strip_port`]).
#[must_use]
pub fn classify(hostname: &str, base_domain: &str) -> HostClass {
    let hostname = hostname.to_ascii_lowercase();
    let base = base_domain.to_ascii_lowercase();

    if hostname == base || hostname == format!("www.{base}") {
        return HostClass::Main;
    }

    let Some(labels) = hostname.strip_suffix(&format!(".{base}")) else {
        return HostClass::Unrelated;
    };
    if labels.is_empty() {
        return HostClass::Unrelated;
    }

    let leftmost = labels.split('.').next().unwrap_or(labels);
    if !hostname.starts_with("www.") && RESERVED_SUBDOMAINS.contains(&leftmost) {
        return HostClass::Reserved(leftmost.to_owned());
    }

    HostClass::Tenant(leftmost.to_owned())
}

/// Drop a `:port` suffix from a Host header value.
#[must_use]
pub fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

/// Whether a main-domain path is on the documented operator surface.
#[must_use]
pub fn main_path_allowed(path: &str) -> bool {
    path == "/" || MAIN_ALLOW_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Compute the internal path-and-query a tenant request is rewritten to.
///
/// Returns `None` for paths already under the internal render or asset/API
/// namespaces (left unrewritten). Otherwise produces
/// `/_render?subdomain={sub}` with `page={path}` appended for non-root
/// paths, carrying over all original query parameters except the stripped
/// credential params. A `page` query parameter from the original URL is
/// dropped when the path itself names a page.
#[must_use]
pub fn rewrite_tenant_path(subdomain: &str, path: &str, query: Option<&str>) -> Option<String> {
    if NO_REWRITE_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return None;
    }

    let page_from_path = path.strip_prefix('/').filter(|p| !p.is_empty());

    let mut rewritten = format!("{RENDER_PATH}?subdomain={subdomain}");
    if let Some(page) = page_from_path {
        rewritten.push_str("&page=");
        rewritten.push_str(page);
    }

    for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
        let name = pair.split('=').next().unwrap_or(pair);
        if STRIPPED_PARAMS.contains(&name) {
            continue;
        }
        if name == "page" && page_from_path.is_some() {
            continue;
        }
        rewritten.push('&');
        rewritten.push_str(pair);
    }

    Some(rewritten)
}
