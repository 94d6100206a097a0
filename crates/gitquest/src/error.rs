//! Error types for GitQuest.
//!
//! Learner-facing command failures (bad pathspec, missing remote, an
//! uninitialized repository) are terminal output text and never travel
//! through this enum; it covers the programmatic surfaces only.

use thiserror::Error;

/// Result type alias using GitQuest's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// GitQuest error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Explainer boundary failure (transport or backend).
    #[error("explainer error: {0}")]
    Explainer(String),

    /// I/O error from export or persistence.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Progress store failure.
    #[error("persistence error: {0}")]
    Persist(String),
}
