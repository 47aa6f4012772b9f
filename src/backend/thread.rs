//! Thread-affine backend: one context stack per OS thread.

use std::cell::RefCell;

use super::{ContextStack, RuntimeContextBackend, Token};
use crate::context::Context;
use crate::error::ContextError;

thread_local! {
    static STACK: RefCell<ContextStack> = RefCell::new(ContextStack::new());
}

/// Backend whose isolation boundary is the OS thread.
///
/// Suitable wherever one logical operation stays on one thread for its
/// lifetime. Under cooperative multitasking, where many logical units share
/// a thread, use [`super::TaskLocalBackend`] instead.
#[derive(Debug, Default)]
pub struct ThreadLocalBackend;

impl ThreadLocalBackend {
    /// Name this backend is registered under.
    pub const NAME: &'static str = "thread_local";

    pub fn new() -> Self {
        Self
    }
}

impl RuntimeContextBackend for ThreadLocalBackend {
    fn current(&self) -> Context {
        STACK.with(|stack| stack.borrow().current())
    }

    fn attach(&self, context: Context) -> Token {
        STACK.with(|stack| stack.borrow_mut().attach(context))
    }

    fn detach(&self, token: Token) -> Result<(), ContextError> {
        STACK.with(|stack| stack.borrow_mut().detach(token))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
