//! The immutable route table.
//!
//! Built once from configuration before the listener binds. Every
//! transform compiles here; a route that fails to compile keeps the
//! process from starting instead of failing its first request.

use refract_config::Configuration;
use refract_query::{QueryError, QueryProgram};
use thiserror::Error;
use url::Url;

/// A startup-time route problem. Always fatal: a partially-available
/// route table is not a supported state.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The route path does not look like an HTTP path.
    #[error("route {path:?}: path must start with '/'")]
    InvalidPath {
        /// Offending route path.
        path: String,
    },

    /// The route's transform failed to compile.
    #[error("route {path:?}: {source}")]
    BadTransform {
        /// Route the transform belongs to.
        path: String,
        /// Compile failure.
        #[source]
        source: QueryError,
    },
}

/// One route, ready to serve: compiled program plus resolved target.
#[derive(Debug)]
pub struct ProxyRoute {
    program: QueryProgram,
    target: Url,
}

impl ProxyRoute {
    /// The compiled transform program.
    pub fn program(&self) -> &QueryProgram {
        &self.program
    }

    /// Full URL the forwarded request is sent to.
    pub fn target(&self) -> &Url {
        &self.target
    }
}

/// All configured routes, frozen after startup.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<(String, ProxyRoute)>,
}

impl RouteTable {
    /// Compile every configured route. The first failure wins; a partial
    /// table is never returned.
    pub fn from_config(config: Configuration) -> Result<Self, SetupError> {
        let mut routes = Vec::with_capacity(config.routes.len());
        for (path, route) in config.routes {
            if !path.starts_with('/') {
                return Err(SetupError::InvalidPath { path });
            }
            let program = QueryProgram::compile(&route.transform).map_err(|source| {
                SetupError::BadTransform {
                    path: path.clone(),
                    source,
                }
            })?;
            let mut target = route.backend.into_url();
            if let Some(rewrite) = &route.rewrite {
                target.set_path(rewrite.as_str());
            }
            tracing::info!(path = %path, target = %target, "configured route");
            routes.push((path, ProxyRoute { program, target }));
        }
        if routes.is_empty() {
            tracing::warn!("no routes configured");
        }
        Ok(Self { routes })
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over `(path, route)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(String, ProxyRoute)> {
        self.routes.iter()
    }

    pub(crate) fn into_routes(self) -> Vec<(String, ProxyRoute)> {
        self.routes
    }
}
