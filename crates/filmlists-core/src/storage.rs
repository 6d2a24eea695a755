//! Document storage.
//!
//! The service only needs three primitives from object storage: fetch a JSON
//! document, overwrite a JSON document, and list the immediate children of a
//! prefix. [`DocumentStore`] captures those; two local backends implement it.
//!
//! Documents are always written as pretty-printed UTF-8 JSON. Writes are
//! unconditional: the last writer wins.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

/// Errors raised by a [`DocumentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document exists at the key.
    #[error("document not found: {key}")]
    NotFound {
        /// The missing key.
        key: String,
    },
    /// The backend failed to read or write.
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The document could not be serialized.
    #[error("failed to encode document '{key}': {source}")]
    Encode {
        /// The key being written.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The stored bytes are not valid JSON.
    #[error("failed to decode document '{key}': {source}")]
    Decode {
        /// The key being read.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether this is the distinguishable "not found" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Key-value JSON document storage.
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Fetch and decode the document at `key`.
    fn fetch(&self, key: &str) -> Result<Value, StoreError>;

    /// Encode and overwrite the document at `key`.
    fn store(&self, key: &str, document: &Value) -> Result<(), StoreError>;

    /// Names of the immediate children of `prefix`, sorted and de-duplicated.
    ///
    /// `prefix` is treated as a directory whether or not it ends in `/`.
    fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

fn encode(key: &str, document: &Value) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(document).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })
}

fn decode(key: &str, bytes: &[u8]) -> Result<Value, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
        key: key.to_owned(),
        source,
    })
}

fn directory_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

// ---------------------------------------------------------------------------
// InMemoryDocumentStore
// ---------------------------------------------------------------------------

/// Ordered in-memory store holding serialized documents.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    objects: RwLock<BTreeMap<String, Bytes>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes stored at `key`.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<Bytes> {
        self.objects.read().get(key).cloned()
    }

    /// Store raw bytes at `key` without encoding, e.g. to seed invalid JSON.
    pub fn put_raw(&self, key: impl Into<String>, bytes: impl Into<Bytes>) {
        self.objects.write().insert(key.into(), bytes.into());
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn fetch(&self, key: &str) -> Result<Value, StoreError> {
        let bytes = self
            .get_raw(key)
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_owned(),
            })?;
        debug!(key, size = bytes.len(), "fetched document from memory");
        decode(key, &bytes)
    }

    fn store(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let bytes = encode(key, document)?;
        debug!(key, size = bytes.len(), "stored document in memory");
        self.objects.write().insert(key.to_owned(), Bytes::from(bytes));
        Ok(())
    }

    fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let prefix = directory_prefix(prefix);
        let objects = self.objects.read();
        let children: BTreeSet<String> = objects
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&prefix))
            .filter_map(|key| {
                let rest = &key[prefix.len()..];
                rest.split_once('/').map(|(child, _)| child.to_owned())
            })
            .filter(|child| !child.is_empty())
            .collect();
        Ok(children.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// FsDocumentStore
// ---------------------------------------------------------------------------

/// Store mapping each key to a file under a root directory.
///
/// Writes go to a uniquely named temporary file in the target directory and
/// are renamed into place, so a reader never observes a half-written document
/// and concurrent writers never share a temporary file.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

fn io_error(key: &str, source: io::Error) -> StoreError {
    if source.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound {
            key: key.to_owned(),
        }
    } else {
        StoreError::Io {
            key: key.to_owned(),
            source,
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn fetch(&self, key: &str) -> Result<Value, StoreError> {
        let path = self.path_for(key);
        let bytes = std::fs::read(&path).map_err(|e| io_error(key, e))?;
        debug!(key, path = %path.display(), size = bytes.len(), "fetched document from disk");
        decode(key, &bytes)
    }

    fn store(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let bytes = encode(key, document)?;
        let path = self.path_for(key);
        let wrap = |source: io::Error| StoreError::Io {
            key: key.to_owned(),
            source,
        };

        let dir = path.parent().unwrap_or(self.root.as_path());
        std::fs::create_dir_all(dir).map_err(wrap)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
        tmp.write_all(&bytes).map_err(wrap)?;
        tmp.persist(&path).map_err(|e| wrap(e.error))?;
        debug!(key, path = %path.display(), size = bytes.len(), "stored document on disk");
        Ok(())
    }

    fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.path_for(prefix.trim_end_matches('/'));
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    key: prefix.to_owned(),
                    source,
                });
            }
        };

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                key: prefix.to_owned(),
                source,
            })?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                if let Some(name) = entry.file_name().to_str() {
                    children.push(name.to_owned());
                }
            }
        }
        children.sort();
        Ok(children)
    }
}
