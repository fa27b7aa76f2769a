//! # Gaufrette
//!
//! A filesystem abstraction layer: one [`Filesystem`] facade in front of any
//! storage backend that implements the [`Adapter`](adapter::Adapter) contract.
//!
//! ## Features
//!
//! - **Facade**: existence, read, write, delete, rename, listing, mtime,
//!   checksum, size and MIME type, with backend-independent preconditions
//! - **Capabilities**: adapters opt into file/stream factories, checksum,
//!   metadata, MIME type and size support through narrow traits
//! - **Errors**: a small, stable taxonomy; every backend failure arrives as a
//!   [`StorageFailure`] carrying the original cause
//!
//! ## Optional Features
//!
//! - `serde_support`: Serde derives for [`ListedKeys`]
//!
//! ## Example
//!
//! ```rust
//! use gaufrette_rs::prelude::*;
//! use gaufrette_rs::adapter::InMemoryAdapter;
//!
//! let fs = Filesystem::from_adapter(InMemoryAdapter::new());
//! fs.write("hello.txt", "Hello, World!", false)?;
//!
//! let mut file = fs.get("hello.txt", false)?;
//! assert_eq!(file.content()?, "Hello, World!");
//! assert_eq!(fs.checksum("hello.txt")?, "65a8e27d8879283831b664bd8b7f0ad4");
//! # Ok::<(), gaufrette_rs::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result, StorageError, StorageFailure, StorageResult};

pub mod adapter;
pub mod error;
pub mod file;
pub mod filesystem;
pub mod listing;
pub mod utils;

pub use file::File;
pub use filesystem::Filesystem;
pub use listing::ListedKeys;

/// Crate-wide constants
pub mod constants {
    //! Constants used throughout the crate

    /// Digest used when the facade computes checksums itself
    pub const CHECKSUM_ALGORITHM: &str = "md5";

    /// MIME type reported by the in-memory adapter for unknown extensions
    pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
}

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::adapter::{
        Adapter, ChecksumCalculator, FileFactory, Metadata, MetadataSupporter, MimeTypeProvider,
        SizeCalculator, StreamFactory,
    };
    pub use crate::error::{Error, Result, StorageError, StorageFailure, StorageResult};
    pub use crate::file::File;
    pub use crate::filesystem::Filesystem;
    pub use crate::listing::ListedKeys;
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
