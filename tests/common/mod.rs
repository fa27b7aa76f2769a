//! Shared fixtures for the integration tests

#![allow(dead_code)]

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use gaufrette_rs::adapter::{
    Adapter, ChecksumCalculator, ContentStream, FileFactory, MimeTypeProvider, StreamFactory,
};
use gaufrette_rs::{File, Filesystem, StorageError, StorageResult};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Mutex, Once};

static TRACING: Once = Once::new();

/// Install a test subscriber; `RUST_LOG=debug` shows facade events
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The six keys used by the listing scenarios
pub const LISTING_KEYS: [&str; 6] = [
    "filename",
    "filename1",
    "filename2",
    "testKey",
    "KeyTest",
    "testkey",
];

pub fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

/// Scripted adapter that records every call it receives as `"op:args"`
#[derive(Default)]
pub struct RecordingAdapter {
    existing: HashSet<String>,
    keys: Vec<String>,
    directories: HashSet<String>,
    contents: HashMap<String, Bytes>,
    mtimes: HashMap<String, DateTime<Utc>>,
    failing: HashSet<&'static str>,
    checksum: Option<String>,
    mime_type: Option<String>,
    file_factory: bool,
    stream_factory: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(mut self, keys: &[&str]) -> Self {
        self.existing.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn with_keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_directories(mut self, keys: &[&str]) -> Self {
        self.directories.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn with_content(mut self, key: &str, content: &'static str) -> Self {
        self.existing.insert(key.to_string());
        self.contents.insert(key.to_string(), Bytes::from(content));
        self
    }

    pub fn with_mtime(mut self, key: &str, mtime: DateTime<Utc>) -> Self {
        self.mtimes.insert(key.to_string(), mtime);
        self
    }

    /// Make `operation` fail with a backend error
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn with_checksum_calculator(mut self, checksum: &str) -> Self {
        self.checksum = Some(checksum.to_string());
        self
    }

    pub fn with_mime_type_provider(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn with_file_factory(mut self) -> Self {
        self.file_factory = true;
        self
    }

    pub fn with_stream_factory(mut self) -> Self {
        self.stream_factory = true;
        self
    }

    /// Wrap into a facade, keeping a handle for call inspection
    pub fn into_filesystem(self) -> (Filesystem, Arc<RecordingAdapter>) {
        init_tracing();
        let adapter = Arc::new(self);
        (Filesystem::new(adapter.clone()), adapter)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }

    pub fn called(&self, operation: &str) -> bool {
        let prefix = format!("{operation}:");
        self.calls().iter().any(|call| call.starts_with(&prefix))
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> StorageResult<()> {
        self.calls
            .lock()
            .expect("call log")
            .push(format!("{}:{}", operation, args.join(",")));

        if self.failing.contains(operation) {
            return Err(StorageError::ConnectionError {
                reason: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }
}

impl Adapter for RecordingAdapter {
    fn exists(&self, key: &str) -> StorageResult<bool> {
        self.record("exists", &[key])?;
        Ok(self.existing.contains(key))
    }

    fn read(&self, key: &str) -> StorageResult<Bytes> {
        self.record("read", &[key])?;
        Ok(self.contents.get(key).cloned().unwrap_or_default())
    }

    fn write(&self, key: &str, _content: &[u8]) -> StorageResult<()> {
        self.record("write", &[key])
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.record("delete", &[key])
    }

    fn rename(&self, source: &str, target: &str) -> StorageResult<()> {
        self.record("rename", &[source, target])
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        self.record("keys", &[])?;
        Ok(self.keys.clone())
    }

    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> {
        self.record("mtime", &[key])?;
        Ok(self.mtimes.get(key).copied().unwrap_or_else(|| timestamp(0)))
    }

    fn is_directory(&self, key: &str) -> StorageResult<bool> {
        self.record("is_directory", &[key])?;
        Ok(self.directories.contains(key))
    }

    fn name(&self) -> &str {
        "RecordingAdapter"
    }

    fn as_file_factory(&self) -> Option<&dyn FileFactory> {
        if self.file_factory {
            Some(self)
        } else {
            None
        }
    }

    fn as_stream_factory(&self) -> Option<&dyn StreamFactory> {
        if self.stream_factory {
            Some(self)
        } else {
            None
        }
    }

    fn as_checksum_calculator(&self) -> Option<&dyn ChecksumCalculator> {
        self.checksum.as_ref().map(|_| self as &dyn ChecksumCalculator)
    }

    fn as_mime_type_provider(&self) -> Option<&dyn MimeTypeProvider> {
        self.mime_type.as_ref().map(|_| self as &dyn MimeTypeProvider)
    }
}

impl FileFactory for RecordingAdapter {
    fn create_file<'fs>(&self, key: &str, filesystem: &'fs Filesystem) -> File<'fs> {
        let _ = self.record("create_file", &[key]);
        let mut file = File::new(key, filesystem);
        file.set_name(format!("factory:{key}"));
        file
    }
}

impl StreamFactory for RecordingAdapter {
    fn create_stream(&self, key: &str) -> StorageResult<ContentStream> {
        self.record("create_stream", &[key])?;
        let content = self.contents.get(key).cloned().unwrap_or_default();
        Ok(Box::new(Cursor::new(content)))
    }
}

impl ChecksumCalculator for RecordingAdapter {
    fn checksum(&self, key: &str) -> StorageResult<String> {
        self.record("checksum", &[key])?;
        Ok(self.checksum.clone().unwrap_or_default())
    }
}

impl MimeTypeProvider for RecordingAdapter {
    fn mime_type(&self, key: &str) -> StorageResult<String> {
        self.record("mime_type", &[key])?;
        Ok(self.mime_type.clone().unwrap_or_default())
    }
}
