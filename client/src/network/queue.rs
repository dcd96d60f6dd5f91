//! Inbox shared between WebSocket callbacks and the frame loop.
//!
//! Callbacks push relay events as they arrive; the frame loop drains them at
//! the start of each tick, so remote state only ever changes between ticks.

use std::cell::RefCell;
use std::collections::VecDeque;

pub struct EventQueue<T> {
    inner: RefCell<VecDeque<T>>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(VecDeque::new()),
        }
    }

    /// Callable through a shared reference from inside a callback.
    pub fn push(&self, event: T) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.inner.borrow_mut().drain(..).collect()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
