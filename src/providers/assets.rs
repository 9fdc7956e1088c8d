//! Packaged application assets.
//!
//! # Responsibilities
//! - Resolve an effective path beneath the configured asset root
//! - Open the file as a readable stream with a known length
//! - Distinguish "absent" from "failed"
//!
//! # Design Decisions
//! - Paths that would climb out of the root are reported as absent
//! - Directories are absent, not errors
//! - The file is opened once and handed over; nothing is buffered here

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::body::BodyStream;
use crate::providers::{
    logical_key, sanitize_relative, ProviderError, ProviderResult, Resource, ResourceProvider,
};

/// Serves files beneath a root directory.
#[derive(Debug, Clone)]
pub struct FileAssetStore {
    root: PathBuf,
}

impl FileAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Errors meaning the path cannot name a file here, as opposed to a fault
/// reading one that does.
fn is_absent(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidInput
            | ErrorKind::InvalidFilename
    )
}

#[async_trait]
impl ResourceProvider for FileAssetStore {
    async fn open(&self, relative_path: &str) -> ProviderResult<Option<Resource>> {
        let Some(relative) = sanitize_relative(relative_path) else {
            tracing::debug!(path = %relative_path, "Rejected asset path outside the root");
            return Ok(None);
        };
        let path = self.root.join(relative);

        let io_error = |source: std::io::Error| ProviderError {
            path: path.display().to_string(),
            source,
        };

        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if is_absent(&e) => return Ok(None),
            Err(e) => return Err(io_error(e)),
        };
        if !metadata.is_file() {
            return Ok(None);
        }

        let file = match fs::File::open(&path).await {
            Ok(f) => f,
            // Removed between the metadata call and the open
            Err(e) if is_absent(&e) => return Ok(None),
            Err(e) => return Err(io_error(e)),
        };

        Ok(Some(Resource::new(BodyStream::from_file(file, metadata.len()))))
    }
}

/// Serves assets from an in-memory bundle.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    files: HashMap<String, Bytes>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: impl Into<Bytes>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: impl Into<Bytes>) {
        self.files.insert(logical_key(path), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ResourceProvider for MemoryAssetStore {
    async fn open(&self, relative_path: &str) -> ProviderResult<Option<Resource>> {
        Ok(self
            .files
            .get(&logical_key(relative_path))
            .map(|bytes| Resource::new(BodyStream::from_bytes(bytes.clone()))))
    }
}
