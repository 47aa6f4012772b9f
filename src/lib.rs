//! Ambient: In-Process Context Propagation
//!
//! An immutable key/value carrier that flows implicitly through a program's
//! execution. Instrumentation (tracing, metrics, baggage) uses it to attach
//! and retrieve cross-cutting state without threading parameters through
//! every call.

pub mod api;
pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod selector;

pub use api::{
    attach, create_key, current, detach, get_value, set_value,
    suppress_http_instrumentation_key, suppress_instrumentation_key,
};
pub use backend::{register_backend, FutureExt, RuntimeContextBackend, Token};
pub use context::{Context, Key, Value};
pub use error::ContextError;
