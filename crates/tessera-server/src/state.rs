//! Application state.
//!
//! Shared state for all request handlers. Everything is an explicit value
//! constructed at startup; per-site storage managers are created on demand
//! from the shared store handle.

use std::sync::Arc;

use tessera_kv::KvStore;
use tessera_storage::{SiteRegistry, SiteStore, TenantResolver};

use crate::auth::TokenSigner;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Shared key-value store handle.
    pub(crate) kv: Arc<dyn KvStore>,
    /// Site registry over the store.
    pub(crate) registry: SiteRegistry,
    /// Subdomain to site-id resolution.
    pub(crate) resolver: TenantResolver,
    /// Token issue/verify.
    pub(crate) signer: TokenSigner,
    /// Public base domain tenant subdomains hang off.
    pub(crate) base_domain: String,
    /// Public URL scheme, `http` or `https`.
    pub(crate) scheme: String,
    /// Require a valid token on tenant subdomains.
    pub(crate) enforce_auth: bool,
}

impl AppState {
    /// Storage manager for one site.
    pub(crate) fn site_store(&self, site_id: &str) -> SiteStore {
        SiteStore::new(Arc::clone(&self.kv), site_id)
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub(crate) fn secure_cookies(&self) -> bool {
        self.scheme == "https"
    }

    /// The login URL on the main domain, with a post-login return target.
    pub(crate) fn login_redirect_url(&self, original_url: &str) -> String {
        let encoded = percent_encoding::utf8_percent_encode(
            original_url,
            percent_encoding::NON_ALPHANUMERIC,
        );
        format!(
            "{}://www.{}/login?redirect={encoded}",
            self.scheme, self.base_domain
        )
    }
}
