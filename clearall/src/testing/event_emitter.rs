use std::{cell::RefCell, fmt};

use crate::{Emitter, EventName, Listenable, Listener, OnOff, Params, Result};

/// A minimal in-memory event emitter.
///
/// Exposes both `add_listener`/`remove_listener` and `on`/`off`, like a
/// Node emitter; detection drives it through `add_listener`. Registering the
/// same listener twice delivers the event twice, and each removal drops the
/// most recent matching registration.
pub struct EventEmitter<E> {
    listeners: RefCell<Vec<(EventName, Listener<E>)>>,
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<E> EventEmitter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls every listener registered for `event` and returns how many ran.
    ///
    /// Listeners added or removed while emitting take effect from the next
    /// emit.
    pub fn emit(&self, event: &str, payload: &E) -> usize {
        let snapshot: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in &snapshot {
            listener.call(payload);
        }
        snapshot.len()
    }

    /// Number of registrations for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    fn insert(&self, event: &EventName, listener: &Listener<E>) {
        self.listeners
            .borrow_mut()
            .push((event.clone(), listener.clone()));
    }

    fn remove(&self, event: &EventName, listener: &Listener<E>) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(pos) = listeners
            .iter()
            .rposition(|(name, l)| name == event && l == listener)
        {
            listeners.remove(pos);
        }
    }
}

impl<E> Emitter<E> for EventEmitter<E> {
    fn add_listener(&self, event: &EventName, listener: &Listener<E>, _params: &Params) -> Result {
        self.insert(event, listener);
        Ok(())
    }

    fn remove_listener(&self, event: &EventName, listener: &Listener<E>) -> Result {
        self.remove(event, listener);
        Ok(())
    }
}

impl<E> OnOff<E> for EventEmitter<E> {
    fn on(&self, event: &EventName, listener: &Listener<E>, _params: &Params) -> Result {
        self.insert(event, listener);
        Ok(())
    }

    fn off(&self, event: &EventName, listener: &Listener<E>) -> Result {
        self.remove(event, listener);
        Ok(())
    }
}

impl<E: 'static> Listenable for EventEmitter<E> {
    type Event = E;

    fn as_emitter(&self) -> Option<&dyn Emitter<E>> {
        Some(self)
    }

    fn as_on_off(&self) -> Option<&dyn OnOff<E>> {
        Some(self)
    }
}
