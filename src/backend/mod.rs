//! Per-execution-unit "current context" storage.
//!
//! A backend tracks, for each execution unit (OS thread or cooperative
//! task), a stack of attached contexts. The variants differ only in where
//! that stack lives; the attach/detach discipline itself is shared through
//! [`ContextStack`]. All operations are O(1) and never block: each unit's
//! stack is private to that unit, so no cross-unit locking exists.

pub mod registry;
pub mod task;
pub mod thread;

pub use registry::{register_backend, BackendConstructor};
pub use task::{FutureExt, ScopedFuture, TaskLocalBackend};
pub use thread::ThreadLocalBackend;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::Context;
use crate::error::ContextError;

/// Capability contract for per-execution-unit current-context storage.
///
/// Implementations are process-wide singletons selected once at first use
/// (see [`crate::selector`]); the choice of variant is a deployment-time
/// configuration, not a runtime decision.
pub trait RuntimeContextBackend: Send + Sync + 'static {
    /// Context currently associated with the calling execution unit.
    /// Returns an empty context if nothing was ever attached on the unit.
    fn current(&self) -> Context;

    /// Make `context` current for the calling execution unit. Nested
    /// attaches push a stack; the returned token captures the previous
    /// current context so it can be restored.
    fn attach(&self, context: Context) -> Token;

    /// Restore the current context to the value captured in `token`.
    ///
    /// A token that does not correspond to the most recent unmatched attach
    /// on the unit is a usage error; the unit's stack is left untouched so
    /// later legitimate detaches still work.
    fn detach(&self, token: Token) -> Result<(), ContextError>;

    /// Registry name of this backend, for diagnostics.
    fn name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn RuntimeContextBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContextBackend")
            .field("name", &self.name())
            .finish()
    }
}

static TOKEN_IDS: AtomicU64 = AtomicU64::new(1);

/// Opaque handle capturing "the context that was current immediately before
/// an attach". Single-use: consumed by [`RuntimeContextBackend::detach`].
#[derive(Debug)]
pub struct Token {
    id: u64,
    prior: Context,
}

impl Token {
    fn next_id() -> u64 {
        TOKEN_IDS.fetch_add(1, Ordering::Relaxed)
    }
}

/// Per-unit attach/detach stack, shared by the built-in variants.
///
/// The stack records only the ids of unmatched attaches; the prior context
/// each attach displaced travels inside its token, so a matched detach is a
/// pop plus a restore and a mismatched one changes nothing.
#[derive(Debug, Default)]
pub struct ContextStack {
    current: Context,
    frames: Vec<u64>,
}

impl ContextStack {
    /// Empty stack whose current context is the empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stack whose current context is `context`. Used to fork an
    /// independent copy of a parent unit's context into a child unit.
    pub fn rooted(context: Context) -> Self {
        Self {
            current: context,
            frames: Vec::new(),
        }
    }

    /// The context currently on top.
    pub fn current(&self) -> Context {
        self.current.clone()
    }

    /// Push `context` as current, returning a token for the displaced one.
    pub fn attach(&mut self, context: Context) -> Token {
        let token = Token {
            id: Token::next_id(),
            prior: std::mem::replace(&mut self.current, context),
        };
        self.frames.push(token.id);
        token
    }

    /// Pop the most recent attach if `token` matches it.
    pub fn detach(&mut self, token: Token) -> Result<(), ContextError> {
        match self.frames.last().copied() {
            Some(top) if top == token.id => {
                self.frames.pop();
                self.current = token.prior;
                Ok(())
            }
            top => Err(ContextError::DetachMismatch {
                token_id: token.id,
                top_id: top,
            }),
        }
    }
}
