use std::{fmt, rc::Rc};

/// A shared event callback.
///
/// Targets identify listeners by reference, the same way an emitter removes
/// "this exact function": two `Listener`s are equal only when they are
/// clones of one another. Register and deregister with clones of the same
/// value.
///
/// ```rust
/// use clearall::Listener;
///
/// let a = Listener::new(|n: &u32| println!("got {n}"));
/// let b = a.clone();
/// let c = Listener::new(|n: &u32| println!("got {n}"));
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// a.call(&7);
/// ```
pub struct Listener<E>(Rc<dyn Fn(&E)>);

impl<E> Listener<E> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&E) + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invokes the callback with `event`.
    #[inline]
    pub fn call(&self, event: &E) {
        (self.0)(event)
    }

    /// Returns `true` if both listeners are the same callback.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<E> Eq for Listener<E> {}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn call_forwards_the_event() {
        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();
        let listener = Listener::new(move |n: &i32| sink.set(sink.get() + *n));

        listener.call(&2);
        listener.clone().call(&3);

        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn identity_survives_clone() {
        let a: Listener<()> = Listener::new(|_| {});
        let b = Listener::new(|_: &()| {});
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
