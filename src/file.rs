//! File value object

use crate::adapter::{ContentStream, Metadata};
use crate::error::Result;
use crate::filesystem::{failure, Filesystem};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;

/// A view of one key of a [`Filesystem`].
///
/// Nothing is read from the adapter when the value is built. Content is
/// fetched on first access and cached for the lifetime of the value.
#[derive(Clone)]
pub struct File<'fs> {
    key: String,
    name: String,
    filesystem: &'fs Filesystem,
    content: Option<Bytes>,
    metadata: Option<Metadata>,
    size: Option<u64>,
    mtime: Option<DateTime<Utc>>,
}

impl<'fs> File<'fs> {
    /// Bind `key` to `filesystem`
    pub fn new(key: impl Into<String>, filesystem: &'fs Filesystem) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            filesystem,
            content: None,
            metadata: None,
            size: None,
            mtime: None,
        }
    }

    /// Key this file is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name; defaults to the key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the display name without touching storage
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The filesystem this file belongs to
    pub fn filesystem(&self) -> &'fs Filesystem {
        self.filesystem
    }

    /// Content of the file, read once and cached
    pub fn content(&mut self) -> Result<Bytes> {
        if let Some(content) = &self.content {
            return Ok(content.clone());
        }

        let content = self.filesystem.read(&self.key)?;
        self.content = Some(content.clone());
        Ok(content)
    }

    /// Replace the stored content, creating the key if needed.
    ///
    /// When `metadata` is given it is stored through the adapter's metadata
    /// capability after the content is written.
    pub fn set_content(
        &mut self,
        content: impl Into<Bytes>,
        metadata: Option<Metadata>,
    ) -> Result<()> {
        let content = content.into();
        self.filesystem.write(&self.key, &content, true)?;

        // storage now holds the new content even if the metadata step fails
        self.size = Some(content.len() as u64);
        self.mtime = None;
        self.content = Some(content);

        if let Some(metadata) = metadata {
            self.set_metadata(metadata)?;
        }
        Ok(())
    }

    /// Size in bytes
    pub fn size(&mut self) -> Result<u64> {
        if let Some(size) = self.size {
            return Ok(size);
        }

        let size = match &self.content {
            Some(content) => content.len() as u64,
            None => self.filesystem.size(&self.key)?,
        };
        self.size = Some(size);
        Ok(size)
    }

    /// Last modification time
    pub fn mtime(&mut self) -> Result<DateTime<Utc>> {
        if let Some(mtime) = self.mtime {
            return Ok(mtime);
        }

        let mtime = self.filesystem.mtime(&self.key)?;
        self.mtime = Some(mtime);
        Ok(mtime)
    }

    /// Whether the key currently exists
    pub fn exists(&self) -> Result<bool> {
        self.filesystem.has(&self.key)
    }

    /// Delete the file from storage
    pub fn delete(&mut self) -> Result<()> {
        self.filesystem.delete(&self.key)?;
        self.content = None;
        self.size = None;
        self.mtime = None;
        Ok(())
    }

    /// Move the file to `new_key`; the value follows the new key
    pub fn rename(&mut self, new_key: impl Into<String>) -> Result<()> {
        let new_key = new_key.into();
        self.filesystem.rename(&self.key, &new_key)?;
        if self.name == self.key {
            self.name = new_key.clone();
        }
        self.key = new_key;
        Ok(())
    }

    /// Open a reader over the content
    pub fn create_stream(&self) -> Result<ContentStream> {
        self.filesystem.create_stream(&self.key)
    }

    /// Store metadata through the adapter.
    ///
    /// Returns `false` when the adapter has no metadata capability; the
    /// metadata is then only kept on this value.
    pub fn set_metadata(&mut self, metadata: Metadata) -> Result<bool> {
        let filesystem = self.filesystem;
        let stored = match filesystem.adapter().as_metadata_supporter() {
            Some(supporter) => {
                supporter
                    .set_metadata(&self.key, &metadata)
                    .map_err(failure("set_metadata", &[self.key.as_str()]))?;
                true
            }
            None => false,
        };

        self.metadata = Some(metadata);
        Ok(stored)
    }

    /// Metadata from the adapter, or the locally kept value if the adapter
    /// cannot store any
    pub fn metadata(&self) -> Result<Option<Metadata>> {
        match self.filesystem.adapter().as_metadata_supporter() {
            Some(supporter) => supporter
                .get_metadata(&self.key)
                .map(Some)
                .map_err(failure("get_metadata", &[self.key.as_str()])),
            None => Ok(self.metadata.clone()),
        }
    }
}

impl fmt::Debug for File<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("loaded", &self.content.is_some())
            .finish()
    }
}
