//! Static name-to-constructor registry for backend implementations.
//!
//! Backend selection is configuration-driven, but resolution is explicit
//! and typed: implementations register a constructor under a string name,
//! and the selector looks the configured name up here. The built-in
//! variants are seeded on first access.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use super::{RuntimeContextBackend, TaskLocalBackend, ThreadLocalBackend};
use crate::error::ContextError;

/// Constructor registered under a backend name. External implementations
/// that cannot be built (a missing runtime handle, say) report it as
/// [`ContextError::BackendConstruction`]; the built-ins are infallible.
pub type BackendConstructor = fn() -> Result<Arc<dyn RuntimeContextBackend>, ContextError>;

static REGISTRY: OnceLock<RwLock<HashMap<String, BackendConstructor>>> = OnceLock::new();

fn make_thread_backend() -> Result<Arc<dyn RuntimeContextBackend>, ContextError> {
    Ok(Arc::new(ThreadLocalBackend::new()))
}

fn make_task_backend() -> Result<Arc<dyn RuntimeContextBackend>, ContextError> {
    Ok(Arc::new(TaskLocalBackend::new()))
}

fn registry() -> &'static RwLock<HashMap<String, BackendConstructor>> {
    REGISTRY.get_or_init(|| {
        let mut builtin: HashMap<String, BackendConstructor> = HashMap::new();
        builtin.insert(ThreadLocalBackend::NAME.to_string(), make_thread_backend);
        builtin.insert(TaskLocalBackend::NAME.to_string(), make_task_backend);
        RwLock::new(builtin)
    })
}

/// Register an external backend implementation under `name`.
///
/// Registration after the process backend has already been resolved is
/// accepted but does not change the resolved backend; register before the
/// first context operation.
pub fn register_backend(name: &str, constructor: BackendConstructor) {
    let previous = registry().write().insert(name.to_string(), constructor);
    if previous.is_some() {
        debug!(name = name, "replaced existing context backend registration");
    }
}

/// Look up the constructor registered under `name`.
pub(crate) fn lookup(name: &str) -> Result<BackendConstructor, ContextError> {
    registry()
        .read()
        .get(name)
        .copied()
        .ok_or_else(|| ContextError::UnknownBackend(name.to_string()))
}
