//! Storage adapter contract and optional capabilities
//!
//! An [`Adapter`] is the only thing that touches a storage medium. The
//! required methods cover existence, content, renames, listing and
//! modification times. Everything else is an optional capability: a narrow
//! trait the adapter implements and then exposes through the matching
//! `as_*` accessor.
//!
//! The [`Filesystem`](crate::Filesystem) asks for capabilities on every call,
//! so a proxy adapter can forward them from the adapter it wraps:
//!
//! ```rust
//! use gaufrette_rs::adapter::{Adapter, ChecksumCalculator, InMemoryAdapter};
//! use gaufrette_rs::StorageResult;
//! use bytes::Bytes;
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Debug, Default)]
//! struct Logging(InMemoryAdapter);
//!
//! impl Adapter for Logging {
//!     fn exists(&self, key: &str) -> StorageResult<bool> { self.0.exists(key) }
//!     fn read(&self, key: &str) -> StorageResult<Bytes> { self.0.read(key) }
//!     fn write(&self, key: &str, content: &[u8]) -> StorageResult<()> {
//!         self.0.write(key, content)
//!     }
//!     fn delete(&self, key: &str) -> StorageResult<()> { self.0.delete(key) }
//!     fn rename(&self, source: &str, target: &str) -> StorageResult<()> {
//!         self.0.rename(source, target)
//!     }
//!     fn keys(&self) -> StorageResult<Vec<String>> { self.0.keys() }
//!     fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> { self.0.mtime(key) }
//!     fn is_directory(&self, key: &str) -> StorageResult<bool> { self.0.is_directory(key) }
//!
//!     fn as_checksum_calculator(&self) -> Option<&dyn ChecksumCalculator> {
//!         self.0.as_checksum_calculator()
//!     }
//! }
//! ```

pub mod memory;

pub use memory::InMemoryAdapter;

use crate::error::StorageResult;
use crate::file::File;
use crate::filesystem::Filesystem;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Read;

/// Key/value metadata attached to a stored object
pub type Metadata = BTreeMap<String, String>;

/// A readable stream over a stored object's content
pub type ContentStream = Box<dyn Read + Send>;

/// Minimal contract every storage backend implements
pub trait Adapter: Send + Sync {
    /// Check if key exists
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read the full content stored under key
    fn read(&self, key: &str) -> StorageResult<Bytes>;

    /// Store content under key, replacing whatever was there
    fn write(&self, key: &str, content: &[u8]) -> StorageResult<()>;

    /// Delete data by key
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Move content from `source` to `target`
    fn rename(&self, source: &str, target: &str) -> StorageResult<()>;

    /// Every key the backend knows about, in backend order
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Last modification time of key
    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>>;

    /// Whether key names a directory rather than a file
    fn is_directory(&self, key: &str) -> StorageResult<bool>;

    /// Human-readable adapter name used in error messages
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// File-factory capability
    fn as_file_factory(&self) -> Option<&dyn FileFactory> {
        None
    }

    /// Stream-factory capability
    fn as_stream_factory(&self) -> Option<&dyn StreamFactory> {
        None
    }

    /// Checksum-calculator capability
    fn as_checksum_calculator(&self) -> Option<&dyn ChecksumCalculator> {
        None
    }

    /// Metadata-supporter capability
    fn as_metadata_supporter(&self) -> Option<&dyn MetadataSupporter> {
        None
    }

    /// MIME-type-provider capability
    fn as_mime_type_provider(&self) -> Option<&dyn MimeTypeProvider> {
        None
    }

    /// Size-calculator capability
    fn as_size_calculator(&self) -> Option<&dyn SizeCalculator> {
        None
    }
}

/// Builds [`File`] values for the adapter's keys
pub trait FileFactory {
    /// Create the file object for key, owned by `filesystem`
    fn create_file<'fs>(&self, key: &str, filesystem: &'fs Filesystem) -> File<'fs>;
}

/// Opens streams over stored content
pub trait StreamFactory {
    /// Open a reader over the content stored under key
    fn create_stream(&self, key: &str) -> StorageResult<ContentStream>;
}

/// Computes checksums without a full content read
pub trait ChecksumCalculator {
    /// Checksum of the content stored under key
    fn checksum(&self, key: &str) -> StorageResult<String>;
}

/// Stores metadata next to content
pub trait MetadataSupporter {
    /// Replace the metadata of key
    fn set_metadata(&self, key: &str, metadata: &Metadata) -> StorageResult<()>;

    /// Metadata of key; empty if none was set
    fn get_metadata(&self, key: &str) -> StorageResult<Metadata>;
}

/// Resolves MIME types
pub trait MimeTypeProvider {
    /// MIME type of the content stored under key
    fn mime_type(&self, key: &str) -> StorageResult<String>;
}

/// Computes content sizes without a full content read
pub trait SizeCalculator {
    /// Size in bytes of the content stored under key
    fn size(&self, key: &str) -> StorageResult<u64>;
}
