//! Static resource providers.
//!
//! # Data Flow
//! ```text
//! effective path ("index.html", "_origin/bridge.js")
//!     → builtin.rs (resources shipped with the runtime)
//!     → assets.rs  (packaged application files under the asset root)
//!     → Ok(Some(Resource)) | Ok(None) | Err(ProviderError)
//! ```
//!
//! # Design Decisions
//! - "Not found" is a normal negative result (`Ok(None)`), never an error
//! - Only genuine I/O faults (permissions, corruption) surface as errors
//! - Separators are normalised before any filesystem lookup

pub mod assets;
pub mod builtin;

pub use assets::{FileAssetStore, MemoryAssetStore};
pub use builtin::{bridge_script, BuiltinResources, BRIDGE_SCRIPT_PATH};

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use thiserror::Error;

use crate::body::BodyStream;

/// A genuine failure opening or reading a resource.
#[derive(Debug, Error)]
#[error("failed to open {path}: {source}")]
pub struct ProviderError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Result type for provider lookups.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A resource located by a provider.
#[derive(Debug)]
pub struct Resource {
    pub body: BodyStream,
    /// Content type the provider insists on, overriding the one inferred from the path.
    pub content_type: Option<String>,
}

impl Resource {
    pub fn new(body: BodyStream) -> Self {
        Self {
            body,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Opens resources by origin-relative path.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Open `relative_path`, or return `Ok(None)` if this provider has no such resource.
    async fn open(&self, relative_path: &str) -> ProviderResult<Option<Resource>>;
}

/// Replace both `\` and `/` with the host's native separator.
pub fn normalize_separators(path: &str) -> String {
    path.replace(['\\', '/'], &MAIN_SEPARATOR.to_string())
}

/// Normalise `relative_path` for a filesystem lookup beneath a root.
///
/// Returns `None` for paths that could escape the root (`..`, absolute paths,
/// drive prefixes) or that name nothing at all.
pub fn sanitize_relative(relative_path: &str) -> Option<PathBuf> {
    // No file name can carry a NUL byte
    if relative_path.contains('\0') {
        return None;
    }
    let normalized = normalize_separators(relative_path);
    let mut clean = PathBuf::new();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Canonical `/`-separated form used as a lookup key by in-memory providers.
pub fn logical_key(relative_path: &str) -> String {
    relative_path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}
