//! Process-wide backend resolution.
//!
//! The active backend is resolved lazily, exactly once, on first use. The
//! steady-state path is a lock-free read; initialization is serialized so
//! concurrent first callers construct at most one backend. It then lives
//! for the remainder of the process and is never torn down.
//!
//! A resolution failure (unknown name, invalid configuration) is logged and
//! the thread-affine backend is used instead: a process without a
//! current-context capability would turn every later call into an error, so
//! the selector degrades to the safe default rather than staying unresolved.

use std::sync::{Arc, OnceLock};

use tracing::{debug, error};

use crate::backend::{registry, RuntimeContextBackend, ThreadLocalBackend};
use crate::config::ContextConfig;
use crate::error::ContextError;

static ACTIVE_BACKEND: OnceLock<Arc<dyn RuntimeContextBackend>> = OnceLock::new();

/// The process-wide backend, resolving it on first call.
pub fn active_backend() -> &'static Arc<dyn RuntimeContextBackend> {
    ACTIVE_BACKEND.get_or_init(|| {
        let config = ContextConfig::from_env();
        match resolve_backend(&config) {
            Ok(backend) => {
                debug!(backend = backend.name(), "resolved context backend");
                backend
            }
            Err(err) => {
                error!(
                    backend = %config.backend,
                    %err,
                    "failed to resolve context backend, using thread-local default"
                );
                Arc::new(ThreadLocalBackend::new())
            }
        }
    })
}

/// Construct the backend named by `config` without touching process state.
pub fn resolve_backend(
    config: &ContextConfig,
) -> Result<Arc<dyn RuntimeContextBackend>, ContextError> {
    config.validate()?;
    let constructor = registry::lookup(&config.backend)?;
    constructor()
}
