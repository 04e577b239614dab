//! # Refract route configuration
//!
//! Loads and validates the route table document: a YAML mapping from
//! inbound path to transform query, backend target, and optional rewrite
//! path. The document is read once at process start and frozen; a
//! malformed entry aborts startup rather than surfacing at request time.
//!
//! ```yaml
//! routes:
//!   /foo:
//!     transform: '{ids: $ids, value: .value}'
//!     backend: http://backend.internal:9000/foo
//!     rewrite: /v2/foo
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod values;

pub use document::{Configuration, RouteConfig};
pub use error::ConfigError;
pub use values::{BackendUrl, RewritePath};
