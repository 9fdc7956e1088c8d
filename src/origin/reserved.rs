//! The reserved origin and relative-path computation.

use percent_encoding::percent_decode_str;
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::origin::query::strip_query;

/// Origin used when none is configured.
///
/// An IP literal means the rendering surface never waits on DNS; nothing is
/// ever sent to it because every request beneath it is answered locally.
pub const DEFAULT_ORIGIN: &str = "https://0.0.0.0/";

/// Errors building a [`ReservedOrigin`].
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("origin URL cannot be used as a base: {0}")]
    CannotBeABase(String),

    #[error("origin URL has no host: {0}")]
    MissingHost(String),
}

/// The scheme + host (and optional base path) this system answers for.
///
/// Immutable once built; one instance is shared by every request of a hosting
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedOrigin {
    base: Url,
}

impl ReservedOrigin {
    /// Parse and normalise an origin. Query and fragment are dropped and the
    /// path always ends with `/`.
    pub fn parse(input: &str) -> Result<Self, OriginError> {
        let mut base = Url::parse(input)?;

        if base.cannot_be_a_base() {
            return Err(OriginError::CannotBeABase(input.to_string()));
        }
        if base.host_str().map_or(true, str::is_empty) {
            return Err(OriginError::MissingHost(input.to_string()));
        }

        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    /// The normalised base URL.
    pub fn as_url(&self) -> &Url {
        &self.base
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Returns the origin-relative, percent-decoded path of `url`, or `None` if
    /// `url` does not parse or is not beneath this origin.
    ///
    /// Any query string is ignored. The origin itself maps to `""`.
    pub fn relative_path(&self, url: &str) -> Option<String> {
        let url = Url::parse(strip_query(url)).ok()?;

        if url.scheme() != self.base.scheme()
            || url.host_str() != self.base.host_str()
            || url.port_or_known_default() != self.base.port_or_known_default()
        {
            return None;
        }

        let base_path = self.base.path();
        let path = url.path();
        let rest = if path == base_path.trim_end_matches('/') {
            ""
        } else {
            path.strip_prefix(base_path)?
        };

        Some(percent_decode_str(rest).decode_utf8_lossy().into_owned())
    }

    /// True if `url` is this origin or beneath it.
    pub fn is_base_of(&self, url: &str) -> bool {
        self.relative_path(url).is_some()
    }

    /// Resolve a path (with optional query) beneath this origin.
    ///
    /// A leading `/` is treated as relative to the origin's base path, so an
    /// origin of `https://host/app/` maps `/x` to `https://host/app/x`. A first
    /// segment that looks like a scheme (`/a:b`) stays a path.
    pub fn join(&self, path_and_query: &str) -> Result<Url, url::ParseError> {
        let relative = path_and_query.trim_start_matches('/');
        self.base.join(&format!("./{relative}"))
    }
}

impl Default for ReservedOrigin {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
        }
    }
}

impl fmt::Display for ReservedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}

impl std::str::FromStr for ReservedOrigin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
