//! File-backed store implementation.
//!
//! Provides [`FileStore`], which persists the whole key-value map as a single
//! JSON object on disk. The map is loaded once at open and rewritten on every
//! mutation via a temp-file + rename, so a crash mid-write leaves either the
//! old or the new file, never a truncated one.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::store::{KvError, KvErrorKind, KvStore};

const BACKEND: &str = "File";

/// File-backed key-value store.
///
/// Suitable for the single-operator editing model: one process owns the file.
/// Two processes sharing a path race on the whole-file rewrite, the same
/// last-write-wins acceptance as concurrent editor tabs.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KvError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| KvError::io(e).with_backend(BACKEND))?;
        }

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                KvError::new(KvErrorKind::Corrupt)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(KvError::io(e).with_backend(BACKEND)),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the current map and atomically replace the backing file.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), KvError> {
        let content = serde_json::to_string(entries).map_err(|e| {
            KvError::new(KvErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let tmp = self.path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&tmp).map_err(|e| KvError::io(e).with_backend(BACKEND))?;
        file.write_all(content.as_bytes())
            .map_err(|e| KvError::io(e).with_backend(BACKEND))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| KvError::io(e).with_backend(BACKEND))?;

        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, KvError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .range(prefix.to_owned()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
