//! In-memory storage adapter

use crate::adapter::{
    Adapter, ChecksumCalculator, Metadata, MetadataSupporter, MimeTypeProvider, SizeCalculator,
};
use crate::error::{StorageError, StorageResult};
use crate::utils;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
struct Entry {
    content: Bytes,
    mtime: DateTime<Utc>,
    metadata: Metadata,
}

/// In-memory storage adapter
///
/// Keys are listed in lexicographic order. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryAdapter {
    data: Arc<RwLock<BTreeMap<String, Entry>>>,
}

impl Default for InMemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdapter {
    /// Create a new memory adapter
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a memory adapter pre-populated with `files`
    pub fn with_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Bytes>,
    {
        let now = Utc::now();
        let data = files
            .into_iter()
            .map(|(key, content)| {
                let entry = Entry {
                    content: content.into(),
                    mtime: now,
                    metadata: Metadata::new(),
                };
                (key.into(), entry)
            })
            .collect();

        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    fn read_guard(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, Entry>>> {
        self.data.read().map_err(|_| poisoned())
    }

    fn write_guard(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, Entry>>> {
        self.data.write().map_err(|_| poisoned())
    }

    fn with_entry<T>(&self, key: &str, f: impl FnOnce(&Entry) -> T) -> StorageResult<T> {
        let storage = self.read_guard()?;
        storage.get(key).map(f).ok_or_else(|| not_found(key))
    }
}

fn poisoned() -> StorageError {
    StorageError::OperationFailed {
        operation: "lock".to_string(),
        reason: "in-memory storage lock poisoned".to_string(),
    }
}

fn not_found(key: &str) -> StorageError {
    StorageError::ResourceNotFound {
        resource: key.to_string(),
    }
}

impl Adapter for InMemoryAdapter {
    fn exists(&self, key: &str) -> StorageResult<bool> {
        let storage = self.read_guard()?;
        Ok(storage.contains_key(key))
    }

    fn read(&self, key: &str) -> StorageResult<Bytes> {
        self.with_entry(key, |entry| entry.content.clone())
    }

    fn write(&self, key: &str, content: &[u8]) -> StorageResult<()> {
        let mut storage = self.write_guard()?;
        let metadata = storage
            .remove(key)
            .map(|previous| previous.metadata)
            .unwrap_or_default();
        storage.insert(
            key.to_string(),
            Entry {
                content: Bytes::copy_from_slice(content),
                mtime: Utc::now(),
                metadata,
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut storage = self.write_guard()?;
        storage.remove(key).map(|_| ()).ok_or_else(|| not_found(key))
    }

    fn rename(&self, source: &str, target: &str) -> StorageResult<()> {
        let mut storage = self.write_guard()?;
        let entry = storage.remove(source).ok_or_else(|| not_found(source))?;
        storage.insert(target.to_string(), entry);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let storage = self.read_guard()?;
        Ok(storage.keys().cloned().collect())
    }

    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> {
        self.with_entry(key, |entry| entry.mtime)
    }

    fn is_directory(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn as_checksum_calculator(&self) -> Option<&dyn ChecksumCalculator> {
        Some(self)
    }

    fn as_metadata_supporter(&self) -> Option<&dyn MetadataSupporter> {
        Some(self)
    }

    fn as_mime_type_provider(&self) -> Option<&dyn MimeTypeProvider> {
        Some(self)
    }

    fn as_size_calculator(&self) -> Option<&dyn SizeCalculator> {
        Some(self)
    }
}

impl ChecksumCalculator for InMemoryAdapter {
    fn checksum(&self, key: &str) -> StorageResult<String> {
        self.with_entry(key, |entry| utils::md5_hex(&entry.content))
    }
}

impl MetadataSupporter for InMemoryAdapter {
    fn set_metadata(&self, key: &str, metadata: &Metadata) -> StorageResult<()> {
        let mut storage = self.write_guard()?;
        let entry = storage.get_mut(key).ok_or_else(|| not_found(key))?;
        entry.metadata = metadata.clone();
        Ok(())
    }

    fn get_metadata(&self, key: &str) -> StorageResult<Metadata> {
        self.with_entry(key, |entry| entry.metadata.clone())
    }
}

impl MimeTypeProvider for InMemoryAdapter {
    fn mime_type(&self, key: &str) -> StorageResult<String> {
        self.with_entry(key, |_| {
            utils::mime_type_from_key(key)
                .unwrap_or(crate::constants::DEFAULT_MIME_TYPE)
                .to_string()
        })
    }
}

impl SizeCalculator for InMemoryAdapter {
    fn size(&self, key: &str) -> StorageResult<u64> {
        self.with_entry(key, |entry| utils::content_size(&entry.content))
    }
}
