//! Site document persistence for the Tessera site builder.
//!
//! This crate owns the translation between the in-memory
//! [`tessera_site::SiteDocument`] and discrete key-value records: it is the
//! only code that knows the key scheme. It also provides the site registry
//! (one [`Site`] record per tenant) and the [`TenantResolver`] that maps a
//! public subdomain back to a site id.
//!
//! The backing store offers no transactions. Writes are sequenced so a torn
//! save degrades instead of corrupting: component records land before the
//! page list that references them, and component records are deleted only
//! once no page list references them. Readers tolerate the leftovers -
//! dangling ids in a page list are skipped, unreferenced component records
//! are invisible.

mod keys;
mod registry;
mod resolver;
mod store;

pub use registry::{Site, SiteRegistry};
pub use resolver::TenantResolver;
pub use store::{PageRecord, SiteMetadata, SiteStore, StorageError};
