//! Public context propagation API.
//!
//! Free functions orchestrating the context value type and the resolved
//! backend. Every operation resolves the backend first (see
//! [`crate::selector`]), then delegates. Failures on the cleanup path are
//! logged and swallowed so that instrumentation can never crash the host
//! program.

use std::any::Any;
use std::sync::OnceLock;

use tracing::warn;

use crate::backend::Token;
use crate::context::{Context, Key, Value};
use crate::selector::active_backend;

/// Create a collision-resistant key. The label is for debugging only and
/// need not be unique; two calls with the same label yield distinct keys.
pub fn create_key(label: &str) -> Key {
    Key::new(label)
}

/// Value for `key` in `context`, or in the current context when `context`
/// is `None`. An absent key yields `None`, never an error.
pub fn get_value(key: &Key, context: Option<&Context>) -> Option<Value> {
    match context {
        Some(cx) => cx.get(key),
        None => current().get(key),
    }
}

/// New context with `key` set to `value`, based on `context` or on the
/// current context when `None`. The base context is never mutated; the
/// result takes effect only when explicitly attached.
#[must_use = "set_value returns a detached context; attach it to take effect"]
pub fn set_value<T: Any + Send + Sync>(key: Key, value: T, context: Option<&Context>) -> Context {
    match context {
        Some(cx) => cx.with_value(key, value),
        None => current().with_value(key, value),
    }
}

/// Context currently associated with the calling execution unit.
pub fn current() -> Context {
    active_backend().current()
}

/// Make `context` current for the calling execution unit. The returned
/// token restores the previous context when passed to [`detach`].
pub fn attach(context: Context) -> Token {
    active_backend().attach(context)
}

/// Restore the context captured in `token`.
///
/// A stale or mismatched token is logged and ignored: detach runs in
/// cleanup paths that must not fail and mask the original control flow.
pub fn detach(token: Token) {
    if let Err(err) = active_backend().detach(token) {
        warn!(%err, "failed to detach context");
    }
}

static SUPPRESS_INSTRUMENTATION: OnceLock<Key> = OnceLock::new();
static SUPPRESS_HTTP_INSTRUMENTATION: OnceLock<Key> = OnceLock::new();

/// Well-known key marking a context region in which instrumentation should
/// not fire recursively. Enforcement is up to instrumentation consumers;
/// the core only exposes the key.
pub fn suppress_instrumentation_key() -> &'static Key {
    SUPPRESS_INSTRUMENTATION.get_or_init(|| Key::new("suppress_instrumentation"))
}

/// Well-known key suppressing HTTP-level instrumentation specifically, for
/// exporters that would otherwise trace their own requests.
pub fn suppress_http_instrumentation_key() -> &'static Key {
    SUPPRESS_HTTP_INSTRUMENTATION.get_or_init(|| Key::new("suppress_http_instrumentation"))
}
