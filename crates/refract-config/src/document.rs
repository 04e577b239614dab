//! The top-level configuration document.

use crate::{BackendUrl, ConfigError, RewritePath};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The full configuration document: one entry per inbound route path.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Inbound path → route description. May be empty.
    #[serde(default)]
    pub routes: BTreeMap<String, RouteConfig>,
}

/// One configured route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// jq source text applied to the backend response.
    pub transform: String,
    /// Backend the derived request is sent to.
    pub backend: BackendUrl,
    /// Optional path that replaces the backend URL's own path.
    #[serde(default)]
    pub rewrite: Option<RewritePath>,
}

impl Configuration {
    /// Read and parse the configuration file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse a configuration document from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(ConfigError::Yaml)
    }
}
