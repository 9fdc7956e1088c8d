//! Resources shipped with the runtime itself.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use crate::body::BodyStream;
use crate::origin::ReservedOrigin;
use crate::providers::{logical_key, ProviderResult, Resource, ResourceProvider};
use crate::routing::mime::APPLICATION_JAVASCRIPT;

/// Logical path of the bootstrap script.
pub const BRIDGE_SCRIPT_PATH: &str = "_origin/bridge.js";

const BRIDGE_SCRIPT: &str = include_str!("../../assets/bridge.js");

const PROXY_BASE_PLACEHOLDER: &str = "\"__PROXY_BASE__\"";

/// The bootstrap script with its proxy calls rooted at `origin`'s base path
/// followed by `proxy_prefix`.
pub fn bridge_script(origin: &ReservedOrigin, proxy_prefix: &str) -> String {
    let prefix = proxy_prefix.trim_matches(['/', '\\']);
    let base = format!("{}{}", origin.as_url().path(), prefix);
    let literal = serde_json::Value::from(base.trim_end_matches('/')).to_string();
    BRIDGE_SCRIPT.replace(PROXY_BASE_PLACEHOLDER, &literal)
}

#[derive(Debug, Clone)]
struct BuiltinResource {
    bytes: Bytes,
    content_type: Option<String>,
}

/// Lookup table of builtin resources addressed by logical path.
///
/// Keys are `/`-separated; lookups accept either separator.
#[derive(Debug, Clone, Default)]
pub struct BuiltinResources {
    resources: HashMap<String, BuiltinResource>,
}

impl BuiltinResources {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The resources every hosting surface ships: the bootstrap script, set up
    /// for `origin` and `proxy_prefix`.
    pub fn with_defaults(origin: &ReservedOrigin, proxy_prefix: &str) -> Self {
        Self::new().with_resource(
            BRIDGE_SCRIPT_PATH,
            bridge_script(origin, proxy_prefix),
            Some(APPLICATION_JAVASCRIPT),
        )
    }

    /// Register a resource, replacing any previous one at the same path.
    pub fn with_resource(
        mut self,
        path: &str,
        bytes: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Self {
        self.insert(path, bytes, content_type);
        self
    }

    pub fn insert(&mut self, path: &str, bytes: impl Into<Bytes>, content_type: Option<&str>) {
        self.resources.insert(
            logical_key(path),
            BuiltinResource {
                bytes: bytes.into(),
                content_type: content_type.map(str::to_string),
            },
        );
    }

    pub fn contains(&self, path: &str) -> bool {
        self.resources.contains_key(&logical_key(path))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceProvider for BuiltinResources {
    async fn open(&self, relative_path: &str) -> ProviderResult<Option<Resource>> {
        let Some(found) = self.resources.get(&logical_key(relative_path)) else {
            return Ok(None);
        };

        let resource = Resource::new(BodyStream::from_bytes(found.bytes.clone()));
        Ok(Some(match &found.content_type {
            Some(ct) => resource.with_content_type(ct.clone()),
            None => resource,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> BuiltinResources {
        BuiltinResources::with_defaults(&ReservedOrigin::default(), "proxy")
    }

    #[tokio::test]
    async fn test_bridge_script_is_builtin() {
        let builtins = defaults();
        assert!(builtins.contains(BRIDGE_SCRIPT_PATH));

        let resource = builtins.open("_origin\\bridge.js").await.unwrap().unwrap();
        assert_eq!(resource.content_type.as_deref(), Some(APPLICATION_JAVASCRIPT));

        let bytes = resource.body.into_bytes().await.unwrap();
        let script = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(script.contains("OriginBridge"));
        assert!(script.contains(r#"var proxyBase = "/proxy";"#));
    }

    #[test]
    fn test_bridge_script_follows_prefix_and_base_path() {
        let origin = ReservedOrigin::parse("app://localhost/ui/").unwrap();
        assert!(bridge_script(&origin, "/api/").contains(r#"var proxyBase = "/ui/api";"#));
        assert!(bridge_script(&origin, "").contains(r#"var proxyBase = "/ui";"#));

        let root = ReservedOrigin::default();
        assert!(bridge_script(&root, "").contains(r#"var proxyBase = "";"#));
        assert!(bridge_script(&root, r#"a"b"#).contains(r#"var proxyBase = "/a\"b";"#));
        assert!(!bridge_script(&root, "api").contains("__PROXY_BASE__"));
    }

    #[tokio::test]
    async fn test_missing_resource_is_none() {
        let builtins = defaults();
        assert!(builtins.open("index.html").await.unwrap().is_none());
        assert!(BuiltinResources::new().is_empty());
    }

    #[tokio::test]
    async fn test_custom_resource_without_content_type() {
        let builtins = BuiltinResources::new().with_resource("/fonts/ui.txt", "abc", None);
        assert_eq!(builtins.len(), 1);

        let resource = builtins.open("fonts/ui.txt").await.unwrap().unwrap();
        assert!(resource.content_type.is_none());
        assert_eq!(resource.body.len(), Some(3));
    }
}
