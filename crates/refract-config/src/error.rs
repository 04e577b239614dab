//! Configuration loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// A failure while loading or validating the configuration document.
///
/// Always fatal to startup; there is no partial-configuration mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file {path:?}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The document is not valid YAML or one of its values fails
    /// validation.
    #[error("malformed configuration: {0}")]
    Yaml(#[source] serde_yaml::Error),
}
