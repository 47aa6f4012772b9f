//! Configuration for backend selection.
//!
//! The configuration surface is a single setting: the registry name of the
//! backend implementation, read once at first use from the environment.

use serde::{Deserialize, Serialize};

use crate::backend::ThreadLocalBackend;
use crate::error::ContextError;

/// Environment variable naming the backend implementation.
pub const BACKEND_ENV_VAR: &str = "AMBIENT_CONTEXT_BACKEND";

/// Context propagation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Registry name of the backend implementation
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_backend() -> String {
    ThreadLocalBackend::NAME.to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

impl ContextConfig {
    /// Read the configuration from the environment, falling back to the
    /// platform default when the variable is unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_ENV_VAR) {
            Ok(name) if !name.trim().is_empty() => Self {
                backend: name.trim().to_string(),
            },
            _ => Self::default(),
        }
    }

    /// Reject configurations the selector cannot act on.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.backend.trim().is_empty() {
            return Err(ContextError::InvalidConfig(
                "backend name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
