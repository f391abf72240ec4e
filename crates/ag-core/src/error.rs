//! Workspace error type.
//!
//! Sub-crates define their own error enums and wrap `GhostError` where a
//! core failure (configuration, I/O) can surface through them.

use thiserror::Error;

/// The top-level error type for `ag-core`.
#[derive(Debug, Error)]
pub enum GhostError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ag-core`.
pub type GhostResult<T> = Result<T, GhostError>;
