//! Cooperative-task-affine backend: the context stack rides the tokio task.
//!
//! The stack lives in a task-local slot, so it travels with the task across
//! suspension and resumption. Spawned children do not inherit it implicitly;
//! the scheduling layer forks a copy of the parent's current context into
//! the child by wrapping the child future with [`FutureExt::with_current_context`]
//! (or [`TaskLocalBackend::scope`] with an explicit context). The copy is
//! independent: attaches inside the child never affect the parent.

use std::cell::RefCell;
use std::future::Future;

use tokio::task::futures::TaskLocalFuture;

use super::{ContextStack, RuntimeContextBackend, ThreadLocalBackend, Token};
use crate::context::Context;
use crate::error::ContextError;

tokio::task_local! {
    static TASK_STACK: RefCell<ContextStack>;
}

/// A future carrying its own context stack.
pub type ScopedFuture<F> = TaskLocalFuture<RefCell<ContextStack>, F>;

/// Backend whose isolation boundary is the cooperative task.
///
/// Outside any task scope (plain threads, code before the runtime starts),
/// calls fall back to the thread-affine stack so a current context always
/// exists for the calling unit.
#[derive(Debug, Default)]
pub struct TaskLocalBackend {
    fallback: ThreadLocalBackend,
}

impl TaskLocalBackend {
    /// Name this backend is registered under.
    pub const NAME: &'static str = "task_local";

    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` with its own context stack rooted at `context`.
    pub fn scope<F: Future>(context: Context, future: F) -> ScopedFuture<F> {
        TASK_STACK.scope(RefCell::new(ContextStack::rooted(context)), future)
    }
}

fn in_task_scope() -> bool {
    TASK_STACK.try_with(|_| ()).is_ok()
}

/// Current context of the calling unit: the task's stack when inside a
/// scope, the thread's stack otherwise.
fn current_on_unit() -> Context {
    TASK_STACK
        .try_with(|stack| stack.borrow().current())
        .unwrap_or_else(|_| ThreadLocalBackend::new().current())
}

impl RuntimeContextBackend for TaskLocalBackend {
    fn current(&self) -> Context {
        current_on_unit()
    }

    fn attach(&self, context: Context) -> Token {
        if in_task_scope() {
            TASK_STACK.with(|stack| stack.borrow_mut().attach(context))
        } else {
            self.fallback.attach(context)
        }
    }

    fn detach(&self, token: Token) -> Result<(), ContextError> {
        if in_task_scope() {
            TASK_STACK.with(|stack| stack.borrow_mut().detach(token))
        } else {
            self.fallback.detach(token)
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Context-carrying combinators for futures.
pub trait FutureExt: Future + Sized {
    /// Attach `context` to this future: while the future runs it has its
    /// own stack rooted at `context`, independent of the caller's.
    fn with_context(self, context: Context) -> ScopedFuture<Self> {
        TaskLocalBackend::scope(context, self)
    }

    /// Attach a copy of the context current at call time. The idiom for
    /// handing ambient state to a spawned task:
    ///
    /// ```ignore
    /// tokio::spawn(handle_request(req).with_current_context());
    /// ```
    fn with_current_context(self) -> ScopedFuture<Self> {
        self.with_context(current_on_unit())
    }
}

impl<F: Future + Sized> FutureExt for F {}
