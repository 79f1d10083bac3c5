use std::fmt;

use crate::Result;

/// A one-shot disposer handed back by a subscribe-style registration.
///
/// When [`Subscribable::subscribe`](crate::Subscribable::subscribe) returns
/// `Some(canceller)`, that canceller becomes the undo action for the
/// registration and no separate `unsubscribe` lookup happens. Consuming
/// `self` on [`cancel`](Self::cancel) makes a second call impossible.
pub struct Canceller(Box<dyn FnOnce() -> Result>);

impl Canceller {
    /// Wraps a disposer that cannot fail.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self(Box::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wraps a disposer that reports failures through [`Error::Target`](crate::Error::Target).
    pub fn fallible<F>(f: F) -> Self
    where
        F: FnOnce() -> Result + 'static,
    {
        Self(Box::new(f))
    }

    pub fn cancel(self) -> Result {
        (self.0)()
    }
}

impl fmt::Debug for Canceller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canceller").finish_non_exhaustive()
    }
}
