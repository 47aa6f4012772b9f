//! Error types for context propagation.
//!
//! Backends, the registry, and the selector return these as explicit
//! `Result` values. Suppression happens only at the public API boundary,
//! where cleanup-path failures are logged instead of propagated.

use thiserror::Error;

/// Context propagation errors
#[derive(Debug, Error)]
pub enum ContextError {
    /// Detach was called with a token that does not match the most recent
    /// unmatched attach on the calling execution unit.
    #[error("detach token {token_id} does not match the most recent attach ({top_id:?})")]
    DetachMismatch {
        token_id: u64,
        top_id: Option<u64>,
    },

    #[error("no context backend registered under name: {0}")]
    UnknownBackend(String),

    #[error("context backend construction failed: {0}")]
    BackendConstruction(String),

    #[error("invalid context configuration: {0}")]
    InvalidConfig(String),
}
