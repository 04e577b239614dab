//! # Refract gateway
//!
//! A narrow-purpose API gateway: one JSON-to-JSON transform step wrapped
//! around a one-hop proxy. Each configured route accepts a `POST` carrying
//! a set of entity identifiers, forwards a derived `GET` to its backend,
//! rewrites the backend's JSON response with the route's compiled query
//! program, and returns the result to the caller.

pub mod pipeline;
pub mod server;
pub mod shutdown;
pub mod table;

mod error;

pub use error::{PipelineError, Result};
pub use table::{ProxyRoute, RouteTable, SetupError};
