//! Relative path classification.
//!
//! # Responsibilities
//! - Empty path → default document (always `text/html`)
//! - `<prefix>` or `<prefix>/...` → proxy dispatch
//! - Everything else → asset lookup, content type from the extension
//!
//! # Design Decisions
//! - Proxy detection runs before content-type inference
//! - Prefix matching is segment-aware: `proxyfoo` is an asset, not a proxy call
//! - Case-sensitive, like the filesystem paths it fronts

use crate::routing::mime::{content_type_for, TEXT_HTML};

/// Prefix reserved for host-logic dispatch when none is configured.
pub const DEFAULT_PROXY_PREFIX: &str = "proxy";

/// What a relative path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// The origin root; served from the configured default document.
    Default,
    /// Reserved for host-application logic.
    Proxy,
    /// A builtin resource or packaged asset.
    Asset,
}

/// Result of classifying a relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: PathKind,
    /// Inferred content type. Proxy responses may override it.
    pub content_type: &'static str,
}

/// Classifies origin-relative paths.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    proxy_prefix: String,
}

impl PathClassifier {
    /// Create a classifier reserving `proxy_prefix` for host dispatch.
    /// Surrounding separators are ignored.
    pub fn new(proxy_prefix: impl Into<String>) -> Self {
        let prefix: String = proxy_prefix.into();
        Self {
            proxy_prefix: prefix.trim_matches(['/', '\\']).to_string(),
        }
    }

    pub fn proxy_prefix(&self) -> &str {
        &self.proxy_prefix
    }

    /// Classify an origin-relative path. Both `/` and `\` are accepted as separators.
    pub fn classify(&self, relative_path: &str) -> Classification {
        if relative_path.is_empty() {
            return Classification {
                kind: PathKind::Default,
                content_type: TEXT_HTML,
            };
        }

        let kind = if self.is_proxy_path(relative_path) {
            PathKind::Proxy
        } else {
            PathKind::Asset
        };

        Classification {
            kind,
            content_type: content_type_for(relative_path),
        }
    }

    fn is_proxy_path(&self, relative_path: &str) -> bool {
        match relative_path.strip_prefix(self.proxy_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(['/', '\\']),
            None => false,
        }
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::mime::{APPLICATION_JAVASCRIPT, IMAGE_PNG, TEXT_PLAIN};

    #[test]
    fn test_empty_path_is_default_document() {
        let classifier = PathClassifier::default();
        let c = classifier.classify("");
        assert_eq!(c.kind, PathKind::Default);
        assert_eq!(c.content_type, TEXT_HTML);
    }

    #[test]
    fn test_proxy_paths() {
        let classifier = PathClassifier::default();
        for path in ["proxy", "proxy/", "proxy/items", "proxy\\items", "proxy/a/b.png"] {
            assert_eq!(classifier.classify(path).kind, PathKind::Proxy, "path: {path}");
        }
    }

    #[test]
    fn test_prefix_must_be_whole_segment() {
        let classifier = PathClassifier::default();
        assert_eq!(classifier.classify("proxyfoo").kind, PathKind::Asset);
        assert_eq!(classifier.classify("proxy.js").kind, PathKind::Asset);
        assert_eq!(classifier.classify("assets/proxy").kind, PathKind::Asset);
        assert_eq!(classifier.classify("Proxy/items").kind, PathKind::Asset);
    }

    #[test]
    fn test_proxy_keeps_inferred_content_type() {
        let classifier = PathClassifier::default();
        let c = classifier.classify("proxy/chart.png");
        assert_eq!(c.kind, PathKind::Proxy);
        assert_eq!(c.content_type, IMAGE_PNG);
    }

    #[test]
    fn test_asset_content_types() {
        let classifier = PathClassifier::default();
        assert_eq!(classifier.classify("js/APP.JS").content_type, APPLICATION_JAVASCRIPT);
        assert_eq!(classifier.classify("notes").content_type, TEXT_PLAIN);
    }

    #[test]
    fn test_custom_prefix() {
        let classifier = PathClassifier::new("/api/");
        assert_eq!(classifier.proxy_prefix(), "api");
        assert_eq!(classifier.classify("api/users").kind, PathKind::Proxy);
        assert_eq!(classifier.classify("proxy/users").kind, PathKind::Asset);
    }
}
