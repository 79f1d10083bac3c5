use crate::{Canceller, EventName, Listener, Params, Result};

/// DOM-style registration: `add_event_listener` / `remove_event_listener`.
pub trait EventTarget<E> {
    fn add_event_listener(&self, event: &EventName, listener: &Listener<E>, params: &Params) -> Result;

    fn remove_event_listener(&self, event: &EventName, listener: &Listener<E>) -> Result;
}

/// Node-style registration: `add_listener` / `remove_listener`.
pub trait Emitter<E> {
    fn add_listener(&self, event: &EventName, listener: &Listener<E>, params: &Params) -> Result;

    fn remove_listener(&self, event: &EventName, listener: &Listener<E>) -> Result;
}

/// Shorthand registration: `on` / `off`.
pub trait OnOff<E> {
    fn on(&self, event: &EventName, listener: &Listener<E>, params: &Params) -> Result;

    fn off(&self, event: &EventName, listener: &Listener<E>) -> Result;
}

/// Registration through `subscribe`.
///
/// Returning `Some(canceller)` makes the canceller the undo action for this
/// registration. Returning `None` makes the ledger fall back to the
/// target's [`Unsubscribable`] capability.
pub trait Subscribable<E> {
    fn subscribe(
        &self,
        event: &EventName,
        listener: &Listener<E>,
        params: &Params,
    ) -> Result<Option<Canceller>>;
}

/// Fallback deregistration for [`Subscribable`] targets that do not hand
/// back a canceller.
pub trait Unsubscribable<E> {
    fn unsubscribe(&self, event: &EventName, listener: &Listener<E>) -> Result;
}

/// An object listeners can be attached to.
///
/// Implement this for your event source and override the accessor for each
/// convention it supports, returning `Some(self)`. Detection checks the
/// accessors in [`Convention::PRIORITY`](crate::Convention::PRIORITY) order
/// and uses the first one that answers, so a type may expose several
/// conventions safely.
///
/// `Event` is the payload type every listener of this target receives.
///
/// ```rust
/// use std::cell::RefCell;
/// use clearall::{EventName, Listenable, Listener, OnOff, Params, Result};
///
/// #[derive(Default)]
/// struct Button {
///     clicks: RefCell<Vec<Listener<u32>>>,
/// }
///
/// impl OnOff<u32> for Button {
///     fn on(&self, _event: &EventName, listener: &Listener<u32>, _params: &Params) -> Result {
///         self.clicks.borrow_mut().push(listener.clone());
///         Ok(())
///     }
///
///     fn off(&self, _event: &EventName, listener: &Listener<u32>) -> Result {
///         self.clicks.borrow_mut().retain(|l| l != listener);
///         Ok(())
///     }
/// }
///
/// impl Listenable for Button {
///     type Event = u32;
///
///     fn as_on_off(&self) -> Option<&dyn OnOff<u32>> {
///         Some(self)
///     }
/// }
/// ```
pub trait Listenable: 'static {
    type Event: 'static;

    fn as_event_target(&self) -> Option<&dyn EventTarget<Self::Event>> {
        None
    }

    fn as_emitter(&self) -> Option<&dyn Emitter<Self::Event>> {
        None
    }

    fn as_on_off(&self) -> Option<&dyn OnOff<Self::Event>> {
        None
    }

    fn as_subscribable(&self) -> Option<&dyn Subscribable<Self::Event>> {
        None
    }

    fn as_unsubscribable(&self) -> Option<&dyn Unsubscribable<Self::Event>> {
        None
    }
}
