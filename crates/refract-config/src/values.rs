//! Validated configuration value types.
//!
//! The raw document stores backend targets and rewrite paths as strings;
//! these newtypes parse and normalize at decode time so that a malformed
//! value fails configuration loading instead of request handling.

use serde::{Deserialize, Deserializer};
use std::fmt;
use url::Url;

/// An absolute http(s) URL naming a route's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrl(Url);

impl BackendUrl {
    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for BackendUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for BackendUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let url = Url::parse(&raw).map_err(serde::de::Error::custom)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(serde::de::Error::custom(format!(
                "backend URL must be http or https, got {:?}",
                url.scheme()
            )));
        }
        Ok(Self(url))
    }
}

/// A lexically normalized path that replaces the backend URL's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePath(String);

impl RewritePath {
    /// The normalized path. Always starts with `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RewritePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RewritePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(serde::de::Error::custom("rewrite path must not be empty"));
        }
        Ok(Self(clean_path(&raw)))
    }
}

/// Lexically normalize a path: drop `.` segments, resolve `..`, collapse
/// repeated slashes, force a leading slash. Purely textual; the
/// filesystem is never consulted.
fn clean_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut cleaned = String::from("/");
    cleaned.push_str(&segments.join("/"));
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(raw: &str) -> Result<BackendUrl, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    fn rewrite(raw: &str) -> Result<RewritePath, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    #[test]
    fn test_backend_accepts_absolute_http_url() {
        let url = backend("http://backend.internal:9000/base").unwrap();
        assert_eq!(url.url().scheme(), "http");
        assert_eq!(url.url().path(), "/base");
    }

    #[test]
    fn test_backend_rejects_relative() {
        assert!(backend("/just/a/path").is_err());
    }

    #[test]
    fn test_backend_rejects_other_schemes() {
        assert!(backend("ftp://backend.internal/").is_err());
        assert!(backend("unix:/tmp/sock").is_err());
    }

    #[test]
    fn test_rewrite_normalizes() {
        assert_eq!(rewrite("/a/b/../c").unwrap().as_str(), "/a/c");
        assert_eq!(rewrite("/a//b/./c").unwrap().as_str(), "/a/b/c");
        assert_eq!(rewrite("relative/path").unwrap().as_str(), "/relative/path");
        assert_eq!(rewrite("/..").unwrap().as_str(), "/");
        assert_eq!(rewrite("/").unwrap().as_str(), "/");
    }

    #[test]
    fn test_rewrite_rejects_empty() {
        assert!(rewrite("\"\"").is_err());
    }
}
