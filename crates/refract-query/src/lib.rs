//! Compiled jq transform programs.
//!
//! A [`QueryProgram`] is the immutable, compiled form of a route's
//! transform expression: built once at startup, evaluated once per request
//! against the backend's JSON response with the caller's [`IdSet`] bound
//! to the `$ids` variable. Evaluation yields at most one JSON value; an
//! empty result is valid and distinct from failure.

#![warn(missing_docs)]

mod error;
mod ids;
mod program;

pub use error::QueryError;
pub use ids::IdSet;
pub use program::{QueryProgram, IDS_VAR};

/// Convenience alias for fallible query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
