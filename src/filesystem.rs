//! The filesystem facade
//!
//! [`Filesystem`] is the single entry point callers use. It checks every
//! precondition itself before touching the adapter, so the same call behaves
//! the same way on backends that silently overwrite and on backends that
//! refuse to. Adapter failures are wrapped in [`StorageFailure`] with the
//! operation name and arguments; the original error stays reachable through
//! [`std::error::Error::source`].
//!
//! # Concurrency
//!
//! The facade holds no state besides the adapter handle and takes no locks.
//! Guarded operations are a check followed by an action, e.g. `write` with
//! `overwrite = false` is `exists` then `write`. Another writer can create
//! the key between the two calls and the facade will not notice. Callers
//! that need stronger guarantees must get them from the backend.

use crate::adapter::{Adapter, ContentStream};
use crate::error::{Error, Result, StorageError, StorageFailure};
use crate::file::File;
use crate::listing::{self, ListedKeys};
use crate::utils;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, warn};

/// Uniform file operations over a pluggable [`Adapter`]
///
/// ```rust
/// use gaufrette_rs::{adapter::InMemoryAdapter, Error, Filesystem};
///
/// # fn main() -> Result<(), Error> {
/// let fs = Filesystem::from_adapter(InMemoryAdapter::new());
///
/// fs.write("reports/q1.txt", "revenue up", false)?;
/// assert!(fs.has("reports/q1.txt")?);
/// assert_eq!(fs.read("reports/q1.txt")?, "revenue up");
///
/// let err = fs.write("reports/q1.txt", "again", false).unwrap_err();
/// assert!(matches!(err, Error::FileAlreadyExists { .. }));
///
/// let listed = fs.list_keys("reports/")?;
/// assert_eq!(listed.keys, vec!["reports/q1.txt"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Filesystem {
    adapter: Arc<dyn Adapter>,
}

impl Filesystem {
    /// Create a facade over a shared adapter
    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        Self { adapter }
    }

    /// Create a facade that takes the adapter by value
    pub fn from_adapter<A: Adapter + 'static>(adapter: A) -> Self {
        Self::new(Arc::new(adapter))
    }

    /// The adapter this facade delegates to
    pub fn adapter(&self) -> &Arc<dyn Adapter> {
        &self.adapter
    }

    /// Whether key exists
    pub fn has(&self, key: &str) -> Result<bool> {
        self.adapter
            .exists(key)
            .map_err(failure("exists", &[key]))
    }

    /// Move `source_key` to `target_key`.
    ///
    /// Fails with [`Error::FileNotFound`] when the source is missing and with
    /// [`Error::UnexpectedFile`] when the target is taken.
    pub fn rename(&self, source_key: &str, target_key: &str) -> Result<()> {
        self.assert_has(source_key)?;
        if self.has(target_key)? {
            return Err(Error::unexpected_file(target_key));
        }

        debug!(source = source_key, target = target_key, "renaming key");
        self.adapter
            .rename(source_key, target_key)
            .map_err(failure("rename", &[source_key, target_key]))
    }

    /// The file object for key.
    ///
    /// Unless `create` is set the key must exist. Construction goes through
    /// the adapter's file factory when it has one. No content is read.
    pub fn get(&self, key: &str, create: bool) -> Result<File<'_>> {
        if !create {
            self.assert_has(key)?;
        }

        Ok(self.create_file(key))
    }

    /// Store `content` under key.
    ///
    /// Without `overwrite` an existing key fails with
    /// [`Error::FileAlreadyExists`] and the adapter is not written to.
    pub fn write(&self, key: &str, content: impl AsRef<[u8]>, overwrite: bool) -> Result<()> {
        if !overwrite && self.has(key)? {
            return Err(Error::file_already_exists(key));
        }

        let content = content.as_ref();
        debug!(key, bytes = content.len(), overwrite, "writing key");
        self.adapter
            .write(key, content)
            .map_err(failure("write", &[key]))
    }

    /// Full content of key
    pub fn read(&self, key: &str) -> Result<Bytes> {
        self.assert_has(key)?;

        debug!(key, "reading key");
        self.adapter.read(key).map_err(failure("read", &[key]))
    }

    /// Delete key
    pub fn delete(&self, key: &str) -> Result<()> {
        self.assert_has(key)?;

        debug!(key, "deleting key");
        self.adapter.delete(key).map_err(failure("delete", &[key]))
    }

    /// Every key of the adapter, unfiltered and in adapter order
    pub fn keys(&self) -> Result<Vec<String>> {
        self.adapter.keys().map_err(failure("keys", &[]))
    }

    /// Keys starting with `prefix`, split into files and directories.
    ///
    /// Matching is case-sensitive; an empty prefix lists everything. Order
    /// within each group follows [`keys`](Self::keys).
    pub fn list_keys(&self, prefix: &str) -> Result<ListedKeys> {
        let keys = self.keys()?;
        let listed = listing::partition_keys(keys, prefix, |key| {
            self.adapter
                .is_directory(key)
                .map_err(failure("is_directory", &[key]))
        })?;

        debug!(prefix, keys = listed.keys.len(), dirs = listed.dirs.len(), "listed keys");
        Ok(listed)
    }

    /// Last modification time of key
    pub fn mtime(&self, key: &str) -> Result<DateTime<Utc>> {
        self.assert_has(key)?;

        self.adapter.mtime(key).map_err(failure("mtime", &[key]))
    }

    /// Checksum of key.
    ///
    /// Delegated to the adapter's checksum capability when present, which
    /// never reads the content. Otherwise the hex MD5 of the content.
    pub fn checksum(&self, key: &str) -> Result<String> {
        self.assert_has(key)?;

        if let Some(calculator) = self.adapter.as_checksum_calculator() {
            return calculator
                .checksum(key)
                .map_err(failure("checksum", &[key]));
        }

        debug!(key, "computing checksum from content");
        let content = self.adapter.read(key).map_err(failure("read", &[key]))?;
        Ok(utils::md5_hex(&content))
    }

    /// Size of key in bytes, from the adapter's size capability or the
    /// length of its content
    pub fn size(&self, key: &str) -> Result<u64> {
        self.assert_has(key)?;

        if let Some(calculator) = self.adapter.as_size_calculator() {
            return calculator.size(key).map_err(failure("size", &[key]));
        }

        let content = self.adapter.read(key).map_err(failure("read", &[key]))?;
        Ok(utils::content_size(&content))
    }

    /// MIME type of key.
    ///
    /// There is no generic fallback: an adapter without the MIME capability
    /// yields [`Error::UnsupportedCapability`].
    pub fn mime_type(&self, key: &str) -> Result<String> {
        self.assert_has(key)?;

        match self.adapter.as_mime_type_provider() {
            Some(provider) => provider
                .mime_type(key)
                .map_err(failure("mime_type", &[key])),
            None => Err(self.unsupported("MIME type")),
        }
    }

    /// Whether key is a directory
    pub fn is_directory(&self, key: &str) -> Result<bool> {
        self.adapter
            .is_directory(key)
            .map_err(failure("is_directory", &[key]))
    }

    /// A reader over the content of key.
    ///
    /// Delegated to the adapter's stream capability when present; otherwise
    /// the key must exist and its content is served from memory.
    pub fn create_stream(&self, key: &str) -> Result<ContentStream> {
        if let Some(factory) = self.adapter.as_stream_factory() {
            return factory
                .create_stream(key)
                .map_err(failure("create_stream", &[key]));
        }

        let content = self.read(key)?;
        Ok(Box::new(Cursor::new(content)))
    }

    /// The file object for key, whether or not it exists yet
    pub fn create_file(&self, key: &str) -> File<'_> {
        match self.adapter.as_file_factory() {
            Some(factory) => factory.create_file(key, self),
            None => File::new(key, self),
        }
    }

    fn assert_has(&self, key: &str) -> Result<()> {
        if self.has(key)? {
            Ok(())
        } else {
            Err(Error::file_not_found(key))
        }
    }

    fn unsupported(&self, capability: &'static str) -> Error {
        Error::UnsupportedCapability {
            adapter: self.adapter.name().to_string(),
            capability,
        }
    }
}

impl fmt::Debug for Filesystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filesystem")
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Wrap an adapter error raised by `operation` into a [`StorageFailure`]
pub(crate) fn failure<'a>(
    operation: &'static str,
    context: &'a [&'a str],
) -> impl FnOnce(StorageError) -> Error + 'a {
    move |source| {
        warn!(operation, error = %source, "adapter operation failed");
        StorageFailure::unexpected_failure(operation, context, source).into()
    }
}
