//! Immutable context values and the key factory.
//!
//! A `Context` is a snapshot of ambient cross-cutting state: an immutable
//! mapping from opaque keys to values. Every update is copy-on-write and
//! returns a new `Context`; an existing snapshot is never mutated, so it can
//! be shared freely across execution units.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Values stored in a context. Opaque to this layer; consumers downcast
/// with [`Context::get_as`].
pub type Value = Arc<dyn Any + Send + Sync>;

/// Opaque handle addressing one slot in a [`Context`].
///
/// The label is a debug aid and need not be unique; uniqueness comes from a
/// random suffix generated at creation, so two keys created from the same
/// label never compare equal. Keys are typically created once per
/// cross-cutting concern and reused.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key {
    id: Arc<str>,
}

impl Key {
    /// Create a collision-resistant key with a human-readable label.
    pub fn new(label: &str) -> Self {
        Self {
            id: Arc::from(format!("{}-{}", label, Uuid::new_v4())),
        }
    }

    /// Full identifier: the label plus the unique suffix.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.id).finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Immutable key/value snapshot of ambient state.
///
/// Cloning is cheap: the entry map sits behind an `Arc` and is only copied
/// when [`Context::with_value`] produces a modified snapshot.
#[derive(Clone, Default)]
pub struct Context {
    entries: Arc<HashMap<Key, Value>>,
}

impl Context {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value associated with `key`, or `None` if absent. A missing key is
    /// not an error.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// Typed accessor for callers that know what they stored under `key`.
    /// Returns `None` when the key is absent or the stored type differs.
    pub fn get_as<T: Any + Send + Sync>(&self, key: &Key) -> Option<Arc<T>> {
        self.get(key).and_then(|value| value.downcast::<T>().ok())
    }

    /// New context identical to `self` except `key` now maps to `value`
    /// (added if absent, replaced if present). `self` is unchanged.
    #[must_use = "with_value returns a new context; the receiver is unchanged"]
    pub fn with_value<T: Any + Send + Sync>(&self, key: Key, value: T) -> Self {
        let mut entries: HashMap<Key, Value> = (*self.entries).clone();
        entries.insert(key, Arc::new(value));
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Number of entries in this snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this snapshot carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
