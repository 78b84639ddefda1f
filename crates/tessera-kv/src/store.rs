//! Storage trait and error types.
//!
//! Provides the core [`KvStore`] trait for abstracting record persistence,
//! along with [`KvError`] for unified error handling across backends.
//!
//! # Key Convention
//!
//! Keys are opaque colon-separated strings owned by the caller
//! (e.g. `site:{id}:component:{cid}`). Backends must not interpret them
//! beyond exact and prefix matching.

/// Semantic error categories for store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum KvErrorKind {
    /// Backing medium could not be read or written.
    Io,
    /// Stored data could not be parsed by the backend itself.
    Corrupt,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct KvError {
    kind: KvErrorKind,
    /// Key context (if applicable).
    key: Option<String>,
    /// Backend identifier (e.g. "Memory", "File").
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl KvError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: KvErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> KvErrorKind {
        self.kind
    }

    /// Key context, if attached.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Backend identifier, if attached.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::new(KvErrorKind::Io).with_source(err)
    }
}

impl std::fmt::Display for KvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            KvErrorKind::Io => "I/O error",
            KvErrorKind::Corrupt => "Corrupt store",
            KvErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for KvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Persistent string-keyed store.
///
/// The contract is deliberately small: get/set/remove plus a prefix scan.
/// Values are serialized text; the store never inspects them. Implementations
/// provide no cross-key atomicity - callers sequence their writes so that a
/// torn sequence degrades rather than corrupts (components are written before
/// the page list that references them).
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove the value stored under `key`. Removing a missing key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), KvError>;

    /// Return all keys beginning with `prefix`, sorted lexicographically.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, KvError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_kv_error_is_send_sync() {
        assert_send_sync::<KvError>();
    }

    #[test]
    fn test_kv_error_display_simple() {
        let err = KvError::new(KvErrorKind::Io);

        assert_eq!(err.to_string(), "I/O error");
    }

    #[test]
    fn test_kv_error_display_with_backend() {
        let err = KvError::new(KvErrorKind::Corrupt).with_backend("File");

        assert_eq!(err.to_string(), "[File] Corrupt store");
    }

    #[test]
    fn test_kv_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = KvError::new(KvErrorKind::Io)
            .with_backend("File")
            .with_key("site:1:theme")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[File] I/O error: no such file (key: site:1:theme)"
        );
    }

    #[test]
    fn test_kv_error_accessors() {
        let err = KvError::new(KvErrorKind::Other).with_key("k").with_backend("Memory");

        assert_eq!(err.kind(), KvErrorKind::Other);
        assert_eq!(err.key(), Some("k"));
        assert_eq!(err.backend(), Some("Memory"));
    }

    #[test]
    fn test_kv_error_io_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = KvError::io(io_err);

        assert_eq!(err.kind(), KvErrorKind::Io);
    }
}
