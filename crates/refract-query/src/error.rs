//! Errors from compiling and evaluating transform programs.

use thiserror::Error;

/// A failure while compiling or running a transform program.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query source failed to parse or compile.
    #[error("invalid query: {0}")]
    Compile(String),

    /// The input document is not valid JSON.
    #[error("invalid JSON input: {0}")]
    Parse(#[source] serde_json::Error),

    /// The query raised a runtime error.
    #[error("query evaluation failed: {0}")]
    Eval(String),

    /// The query emitted a second value. The contract is at most one.
    #[error("the query produced too much data")]
    TooMuchData,
}
