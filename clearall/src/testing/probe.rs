use std::{cell::RefCell, fmt, marker::PhantomData, rc::Rc};

use crate::{
    Canceller, Convention, Emitter, Error, EventName, EventTarget, Listenable, Listener, OnOff,
    Params, Result, Subscribable, Unsubscribable,
};

/// One method invocation recorded by a [`Probe`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Method name, e.g. `"on"` or `"remove_event_listener"`.
    pub method: &'static str,
    pub event: EventName,
    /// Extra arguments; always empty for deregistration methods.
    pub params: Params,
}

/// Error returned by a probe configured with [`Probe::failing_deregistration`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("probe refused {0}")]
pub struct ProbeError(pub &'static str);

/// A target that exposes a chosen set of conventions and records every call.
///
/// Use it to check which methods a registration goes through and what was
/// passed to them.
///
/// ```rust
/// use std::rc::Rc;
/// use clearall::{Convention, Listener, testing::Probe};
///
/// let probe = Rc::new(Probe::new().expose(Convention::OnOff));
/// let listener = Listener::new(|_: &()| {});
///
/// clearall::add_with(&probe, "evt", &listener, [1, 2]).unwrap();
///
/// assert_eq!(probe.count("on"), 1);
/// assert_eq!(probe.calls()[0].params.len(), 2);
/// ```
pub struct Probe<E> {
    conventions: Vec<Convention>,
    unsubscribe: bool,
    canceller: Option<Rc<dyn Fn()>>,
    fail_deregistration: bool,
    calls: RefCell<Vec<Call>>,
    _event: PhantomData<fn(&E)>,
}

impl<E> fmt::Debug for Probe<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("conventions", &self.conventions)
            .field("unsubscribe", &self.unsubscribe)
            .field("calls", &self.calls.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<E> Default for Probe<E> {
    fn default() -> Self {
        Self {
            conventions: Vec::new(),
            unsubscribe: false,
            canceller: None,
            fail_deregistration: false,
            calls: RefCell::new(Vec::new()),
            _event: PhantomData,
        }
    }
}

impl<E> Probe<E> {
    /// A probe exposing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes the methods of `convention`.
    pub fn expose(mut self, convention: Convention) -> Self {
        if !self.conventions.contains(&convention) {
            self.conventions.push(convention);
        }
        self
    }

    /// Exposes `unsubscribe`.
    pub fn with_unsubscribe(mut self) -> Self {
        self.unsubscribe = true;
        self
    }

    /// Makes `subscribe` return a canceller that calls `f`.
    pub fn returning_canceller<F>(mut self, f: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.canceller = Some(Rc::new(f));
        self
    }

    /// Makes every deregistration method fail with [`ProbeError`] after
    /// recording the call.
    pub fn failing_deregistration(mut self) -> Self {
        self.fail_deregistration = true;
        self
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of calls to `method`.
    pub fn count(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn exposes(&self, convention: Convention) -> bool {
        self.conventions.contains(&convention)
    }

    fn registered(&self, method: &'static str, event: &EventName, params: &Params) -> Result {
        self.calls.borrow_mut().push(Call {
            method,
            event: event.clone(),
            params: params.clone(),
        });
        Ok(())
    }

    fn deregistered(&self, method: &'static str, event: &EventName) -> Result {
        self.calls.borrow_mut().push(Call {
            method,
            event: event.clone(),
            params: Params::new(),
        });
        if self.fail_deregistration {
            return Err(Error::target(ProbeError(method)));
        }
        Ok(())
    }
}

impl<E> EventTarget<E> for Probe<E> {
    fn add_event_listener(&self, event: &EventName, _: &Listener<E>, params: &Params) -> Result {
        self.registered("add_event_listener", event, params)
    }

    fn remove_event_listener(&self, event: &EventName, _: &Listener<E>) -> Result {
        self.deregistered("remove_event_listener", event)
    }
}

impl<E> Emitter<E> for Probe<E> {
    fn add_listener(&self, event: &EventName, _: &Listener<E>, params: &Params) -> Result {
        self.registered("add_listener", event, params)
    }

    fn remove_listener(&self, event: &EventName, _: &Listener<E>) -> Result {
        self.deregistered("remove_listener", event)
    }
}

impl<E> OnOff<E> for Probe<E> {
    fn on(&self, event: &EventName, _: &Listener<E>, params: &Params) -> Result {
        self.registered("on", event, params)
    }

    fn off(&self, event: &EventName, _: &Listener<E>) -> Result {
        self.deregistered("off", event)
    }
}

impl<E> Subscribable<E> for Probe<E> {
    fn subscribe(
        &self,
        event: &EventName,
        _: &Listener<E>,
        params: &Params,
    ) -> Result<Option<Canceller>> {
        self.registered("subscribe", event, params)?;
        Ok(self.canceller.clone().map(|f| Canceller::new(move || f())))
    }
}

impl<E> Unsubscribable<E> for Probe<E> {
    fn unsubscribe(&self, event: &EventName, _: &Listener<E>) -> Result {
        self.deregistered("unsubscribe", event)
    }
}

impl<E: 'static> Listenable for Probe<E> {
    type Event = E;

    fn as_event_target(&self) -> Option<&dyn EventTarget<E>> {
        self.exposes(Convention::EventTarget).then_some(self as &dyn EventTarget<E>)
    }

    fn as_emitter(&self) -> Option<&dyn Emitter<E>> {
        self.exposes(Convention::Emitter).then_some(self as &dyn Emitter<E>)
    }

    fn as_on_off(&self) -> Option<&dyn OnOff<E>> {
        self.exposes(Convention::OnOff).then_some(self as &dyn OnOff<E>)
    }

    fn as_subscribable(&self) -> Option<&dyn Subscribable<E>> {
        self.exposes(Convention::Subscribe).then_some(self as &dyn Subscribable<E>)
    }

    fn as_unsubscribable(&self) -> Option<&dyn Unsubscribable<E>> {
        self.unsubscribe.then_some(self as &dyn Unsubscribable<E>)
    }
}
