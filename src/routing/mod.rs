//! Path classification subsystem.
//!
//! # Data Flow
//! ```text
//! Relative path ("", "proxy/items", "css/site.css")
//!     → classifier.rs (Default / Proxy / Asset)
//!     → mime.rs (extension → content type)
//!     → Classification { kind, content_type }
//! ```
//!
//! # Design Decisions
//! - Pure functions, no I/O: classification never fails
//! - Fixed extension table; anything unknown is text/plain
//! - The default document is always served as text/html

pub mod classifier;
pub mod mime;

pub use classifier::{Classification, PathClassifier, PathKind, DEFAULT_PROXY_PREFIX};
pub use mime::content_type_for;
