use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    Config, EventName, Listenable, Listener, Params, Result, SubscriptionId,
    internal::{Binding, Ledger, run_all},
};

struct Inner {
    ledger: RefCell<Ledger>,
    config: Config,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let ledger = self.ledger.get_mut();
        if ledger.is_empty() {
            return;
        }

        if !self.config.clear_on_drop() {
            tracing::trace!(pending = ledger.len(), "handle dropped; listeners stay registered");
            return;
        }

        let pending = ledger.drain();
        tracing::debug!(pending = pending.len(), "clearing subscriptions on drop");
        if let Err(e) = run_all(pending) {
            tracing::warn!(
                error = %e,
                error_kind = e.as_label(),
                "clear on drop did not complete cleanly"
            );
        }
    }
}

/// A bundle of listener registrations that can be cancelled with one call.
///
/// Each [`add`](Self::add) registers a listener on a target right away,
/// whatever convention the target follows, and remembers how to undo it.
/// [`clear`](Self::clear) undoes everything still pending, in registration
/// order, exactly once.
///
/// `ClearAll` is a cheap reference-counted handle: clones share one ledger,
/// and `add` returns the same handle so registrations chain.
///
/// # Example
///
/// ```rust,ignore
/// use std::rc::Rc;
/// use clearall::{Listener, testing::EventEmitter};
///
/// # fn main() -> clearall::Result {
/// let socket = Rc::new(EventEmitter::<String>::new());
/// let window = Rc::new(EventEmitter::<String>::new());
/// let log = Listener::new(|msg: &String| println!("{msg}"));
///
/// let clear_all = clearall::add(&socket, "message", &log)?
///     .add(&socket, "error", &log)?
///     .add(&window, "resize", &log)?;
///
/// assert_eq!(clear_all.len(), 3);
/// clear_all.clear()?;
/// assert_eq!(socket.listener_count("message"), 0);
/// # Ok(())
/// # }
/// ```
///
/// # Reentrancy
///
/// The ledger is emptied before any undo action runs, and no borrow is held
/// while target code executes. A deregistration that ends up calling
/// `clear` again (directly or through an event it raises) finds nothing
/// left to do. Subscriptions added while a clear is running belong to the
/// next clear.
///
/// # Drop
///
/// By default dropping the last handle leaves registered listeners in
/// place. Enable [`Config::with_clear_on_drop`] to clear them instead.
#[derive(Clone)]
pub struct ClearAll {
    inner: Rc<Inner>,
}

impl ClearAll {
    /// Creates an empty handle.
    ///
    /// Useful when the handle has to exist before the first subscription,
    /// e.g. so a listener can cancel its own bundle.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Rc::new(Inner {
                ledger: RefCell::new(Ledger::default()),
                config,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Registers `listener` for `event` on `target` and returns this handle.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedTarget`](crate::Error::UnsupportedTarget) if
    ///   the target exposes no registration method. Nothing is registered.
    /// - Whatever the target's registration method returns.
    pub fn add<T: Listenable>(
        &self,
        target: &Rc<T>,
        event: impl Into<EventName>,
        listener: &Listener<T::Event>,
    ) -> Result<Self> {
        self.add_with(target, event, listener, Params::new())
    }

    /// Like [`add`](Self::add), passing `params` to the registration method
    /// after the event name and listener.
    pub fn add_with<T: Listenable>(
        &self,
        target: &Rc<T>,
        event: impl Into<EventName>,
        listener: &Listener<T::Event>,
        params: impl Into<Params>,
    ) -> Result<Self> {
        self.subscribe(target, event, listener, params)?;
        Ok(self.clone())
    }

    /// Registers `listener` and returns the id of the new ledger entry, for
    /// use with [`cancel`](Self::cancel).
    pub fn subscribe<T: Listenable>(
        &self,
        target: &Rc<T>,
        event: impl Into<EventName>,
        listener: &Listener<T::Event>,
        params: impl Into<Params>,
    ) -> Result<SubscriptionId> {
        let event = event.into();
        let binding = Binding::detect(target)?;
        let convention = binding.convention();

        let action = binding.register(
            event.clone(),
            listener.clone(),
            &params.into(),
            self.inner.config.leak_policy(),
        )?;
        let id = self.inner.ledger.borrow_mut().push(action);

        tracing::trace!(event = %event, convention = %convention, id = %id, "listener registered");
        Ok(id)
    }

    /// Undoes a single subscription.
    ///
    /// Returns `Ok(false)` if `id` is not pending in this handle, either
    /// because it was already cancelled or cleared, or because it belongs to
    /// another handle.
    pub fn cancel(&self, id: SubscriptionId) -> Result<bool> {
        let Some(action) = self.inner.ledger.borrow_mut().take(id) else {
            return Ok(false);
        };

        tracing::debug!(id = %id, event = %action.event(), "cancelling subscription");
        action.run()?;
        Ok(true)
    }

    /// Undoes every pending subscription, in registration order.
    ///
    /// Calling it again, or from inside one of the undo actions, is a no-op.
    ///
    /// # Errors
    ///
    /// Every pending deregistration runs even if some fail. Every failure is
    /// logged at `warn` level and the first one is returned.
    pub fn clear(&self) -> Result {
        let pending = self.inner.ledger.borrow_mut().drain();
        if pending.is_empty() {
            return Ok(());
        }

        tracing::debug!(pending = pending.len(), "clearing subscriptions");
        run_all(pending)
    }

    /// Number of subscriptions still pending.
    pub fn len(&self) -> usize {
        self.inner.ledger.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.ledger.borrow().is_empty()
    }

    /// Returns `true` if both values are the same handle.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Creates a [`WeakClearAll`] that does not keep the subscriptions'
    /// ledger alive.
    pub fn downgrade(&self) -> WeakClearAll {
        WeakClearAll(Rc::downgrade(&self.inner))
    }
}

impl Default for ClearAll {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClearAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearAll")
            .field("pending", &self.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Non-owning reference to a [`ClearAll`] handle.
///
/// Hand this to listeners or cancellers that need to clear their own
/// bundle; holding a full `ClearAll` there would create a reference cycle.
#[derive(Clone)]
pub struct WeakClearAll(Weak<Inner>);

impl WeakClearAll {
    pub fn upgrade(&self) -> Option<ClearAll> {
        self.0.upgrade().map(|inner| ClearAll { inner })
    }

    /// Clears the handle if it is still alive; otherwise does nothing.
    pub fn clear(&self) -> Result {
        self.upgrade().map_or(Ok(()), |handle| handle.clear())
    }
}

impl fmt::Debug for WeakClearAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakClearAll")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

/// Creates a handle holding one subscription.
///
/// Shorthand for `ClearAll::new().add(target, event, listener)`.
pub fn add<T: Listenable>(
    target: &Rc<T>,
    event: impl Into<EventName>,
    listener: &Listener<T::Event>,
) -> Result<ClearAll> {
    ClearAll::new().add(target, event, listener)
}

/// Creates a handle holding one subscription registered with extra `params`.
pub fn add_with<T: Listenable>(
    target: &Rc<T>,
    event: impl Into<EventName>,
    listener: &Listener<T::Event>,
    params: impl Into<Params>,
) -> Result<ClearAll> {
    ClearAll::new().add_with(target, event, listener, params)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use serde_json::json;

    use super::*;
    use crate::{
        Canceller, Convention, Error, LeakPolicy, Subscribable,
        testing::{EventEmitter, Probe},
    };

    fn counter() -> (Rc<Cell<usize>>, Listener<()>) {
        let hits = Rc::new(Cell::new(0));
        let sink = hits.clone();
        (hits, Listener::new(move |_| sink.set(sink.get() + 1)))
    }

    #[test]
    fn clear_stops_delivery() {
        let ee = Rc::new(EventEmitter::new());
        let (hits, f) = counter();
        let clear_all = add(&ee, "a", &f).unwrap();

        ee.emit("a", &());
        assert_eq!(hits.get(), 1);

        clear_all.clear().unwrap();
        ee.emit("a", &());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn chaining_registers_each_time() {
        let ee = Rc::new(EventEmitter::new());
        let (hits, f) = counter();
        let clear_all = add(&ee, "a", &f)
            .and_then(|h| h.add(&ee, "a", &f))
            .and_then(|h| h.add(&ee, "a", &f))
            .unwrap();

        ee.emit("a", &());
        assert_eq!(hits.get(), 3);

        clear_all.clear().unwrap();
        ee.emit("a", &());
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn chaining_preserves_identity() {
        let probe = Rc::new(Probe::new().expose(Convention::OnOff));
        let (_, f) = counter();
        let handle = ClearAll::new();

        let chained = handle
            .add(&probe, "a", &f)
            .and_then(|h| h.add(&probe, "b", &f))
            .and_then(|h| h.add(&probe, "c", &f))
            .unwrap();

        assert!(chained.ptr_eq(&handle));
        assert_eq!(handle.len(), 3);

        chained.clear().unwrap();
        assert_eq!(probe.count("off"), 3);
        assert!(handle.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let probe = Rc::new(Probe::new().expose(Convention::EventTarget));
        let (_, f) = counter();
        let handle = ClearAll::new();
        for name in ["a", "b", "c", "d"] {
            handle.add(&probe, name, &f).unwrap();
        }

        handle.clear().unwrap();
        handle.clear().unwrap();

        assert_eq!(probe.count("remove_event_listener"), 4);
    }

    #[test]
    fn unsupported_target_fails_before_registration() {
        let probe = Rc::new(Probe::new().with_unsubscribe());
        let (_, f) = counter();

        let err = add(&probe, "a", &f).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget(_)));
        assert!(err.to_string().contains("no listener registration method was found"));
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn lazy_add_after_empty_creation() {
        let clear_all = ClearAll::new();
        assert!(clear_all.is_empty());

        let ee = Rc::new(EventEmitter::new());
        let (hits, f) = counter();
        clear_all.add(&ee, "a", &f).unwrap();
        ee.emit("a", &());
        clear_all.clear().unwrap();
        ee.emit("a", &());

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn params_pass_through() {
        let probe = Rc::new(Probe::new().expose(Convention::OnOff));
        let (_, f) = counter();

        add_with(&probe, "t", &f, [1, 2]).unwrap();

        let calls = probe.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "on");
        assert_eq!(calls[0].event, "t");
        assert_eq!(calls[0].params[0], json!(1));
        assert_eq!(calls[0].params[1], json!(2));
    }

    struct SelfClearing {
        on_cancel: Rc<dyn Fn()>,
    }

    impl Subscribable<()> for SelfClearing {
        fn subscribe(
            &self,
            _event: &EventName,
            _listener: &Listener<()>,
            _params: &Params,
        ) -> Result<Option<Canceller>> {
            let on_cancel = self.on_cancel.clone();
            Ok(Some(Canceller::new(move || on_cancel())))
        }
    }

    impl Listenable for SelfClearing {
        type Event = ();

        fn as_subscribable(&self) -> Option<&dyn Subscribable<()>> {
            Some(self)
        }
    }

    #[test]
    fn reentrant_clear_does_not_loop() {
        let handle = ClearAll::new();
        let weak = handle.downgrade();
        let n = Rc::new(Cell::new(0));
        let count = n.clone();
        let target = Rc::new(SelfClearing {
            on_cancel: Rc::new(move || {
                count.set(count.get() + 1);
                if count.get() < 2 {
                    weak.clear().unwrap();
                }
            }),
        });
        let (_, f) = counter();

        handle.add(&target, "a", &f).unwrap();
        handle.clear().unwrap();

        assert_eq!(n.get(), 1);
    }

    #[test]
    fn reentrant_clear_runs_each_deregistration_once() {
        let handle = ClearAll::new();
        let weak = handle.downgrade();
        let n = Rc::new(Cell::new(0));
        let count = n.clone();
        let target = Rc::new(SelfClearing {
            on_cancel: Rc::new(move || {
                count.set(count.get() + 1);
                weak.clear().unwrap();
            }),
        });
        let (_, f) = counter();

        for name in ["a", "b", "c"] {
            handle.add(&target, name, &f).unwrap();
        }
        handle.clear().unwrap();

        assert_eq!(n.get(), 3);
    }

    #[test]
    fn cancel_removes_only_one() {
        let probe = Rc::new(Probe::new().expose(Convention::Emitter));
        let (_, f) = counter();
        let handle = ClearAll::new();

        handle.add(&probe, "a", &f).unwrap();
        let b = handle.subscribe(&probe, "b", &f, Params::new()).unwrap();
        handle.add(&probe, "c", &f).unwrap();

        assert_eq!(handle.cancel(b), Ok(true));
        assert_eq!(handle.cancel(b), Ok(false));
        assert_eq!(handle.len(), 2);

        handle.clear().unwrap();
        let removed: Vec<_> = probe
            .calls()
            .into_iter()
            .filter(|c| c.method == "remove_listener")
            .map(|c| c.event)
            .collect();
        assert_eq!(removed, ["b", "a", "c"]);
    }

    #[test]
    fn cancel_from_another_handle_is_ignored() {
        let probe = Rc::new(Probe::new().expose(Convention::OnOff));
        let (_, f) = counter();
        let first = ClearAll::new();
        let second = ClearAll::new();

        let id = first.subscribe(&probe, "a", &f, Params::new()).unwrap();
        assert_eq!(second.cancel(id), Ok(false));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn deregistration_errors_do_not_stop_the_clear() {
        let probe = Rc::new(Probe::new().expose(Convention::OnOff).failing_deregistration());
        let (_, f) = counter();
        let handle = add(&probe, "a", &f)
            .and_then(|h| h.add(&probe, "b", &f))
            .unwrap();

        let err = handle.clear().unwrap_err();
        assert!(matches!(err, Error::Target(_)));
        assert_eq!(probe.count("off"), 2);
        assert!(handle.is_empty());
        assert_eq!(handle.clear(), Ok(()));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("stream already closed")]
    struct AlreadyClosed;

    struct Stubborn {
        runs: Rc<Cell<usize>>,
    }

    impl Subscribable<()> for Stubborn {
        fn subscribe(
            &self,
            _event: &EventName,
            _listener: &Listener<()>,
            _params: &Params,
        ) -> Result<Option<Canceller>> {
            let runs = self.runs.clone();
            Ok(Some(Canceller::fallible(move || {
                runs.set(runs.get() + 1);
                Err(Error::target(AlreadyClosed))
            })))
        }
    }

    impl Listenable for Stubborn {
        type Event = ();

        fn as_subscribable(&self) -> Option<&dyn Subscribable<()>> {
            Some(self)
        }
    }

    #[test]
    fn failing_canceller_error_comes_out_of_clear_once() {
        let runs = Rc::new(Cell::new(0));
        let target = Rc::new(Stubborn { runs: runs.clone() });
        let (_, f) = counter();
        let handle = add(&target, "a", &f)
            .and_then(|h| h.add(&target, "b", &f))
            .unwrap();

        let err = handle.clear().unwrap_err();
        assert_eq!(err.to_string(), "target error: stream already closed");
        assert_eq!(err.as_label(), "target_error");
        assert_eq!(runs.get(), 2);

        assert_eq!(handle.clear(), Ok(()));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn leak_policy_reject_surfaces_missing_deregistration() {
        let probe = Rc::new(Probe::new().expose(Convention::Subscribe));
        let (_, f) = counter();
        let handle = ClearAll::with_config(Config::default().with_leak_policy(LeakPolicy::Reject));

        let err = handle.add(&probe, "tick", &f).unwrap_err();
        assert_eq!(err, Error::MissingDeregistration("tick".into()));
        assert!(handle.is_empty());

        let lenient = add(&probe, "tick", &f).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient.clear(), Ok(()));
    }

    #[test]
    fn drop_keeps_listeners_by_default() {
        let ee = Rc::new(EventEmitter::<()>::new());
        let (_, f) = counter();
        drop(add(&ee, "a", &f).unwrap());
        assert_eq!(ee.listener_count("a"), 1);
    }

    #[test]
    fn clear_on_drop() {
        let ee = Rc::new(EventEmitter::<()>::new());
        let (_, f) = counter();
        let handle = ClearAll::with_config(Config::default().with_clear_on_drop(true));
        let weak = handle.downgrade();
        let clone = handle.add(&ee, "a", &f).unwrap();

        drop(handle);
        assert_eq!(ee.listener_count("a"), 1);
        assert!(weak.upgrade().is_some());

        drop(clone);
        assert_eq!(ee.listener_count("a"), 0);
        assert!(weak.upgrade().is_none());
        assert_eq!(weak.clear(), Ok(()));
    }

    #[test]
    fn subscribe_during_clear_survives_it() {
        let ee = Rc::new(EventEmitter::<()>::new());
        let (_, f) = counter();
        let handle = ClearAll::new();
        let later: Rc<RefCell<Option<SubscriptionId>>> = Rc::default();

        let target = {
            let weak = handle.downgrade();
            let ee = ee.clone();
            let f = f.clone();
            let later = later.clone();
            Rc::new(SelfClearing {
                on_cancel: Rc::new(move || {
                    if let Some(handle) = weak.upgrade() {
                        let id = handle.subscribe(&ee, "late", &f, Params::new()).unwrap();
                        *later.borrow_mut() = Some(id);
                    }
                }),
            })
        };

        handle.add(&target, "a", &f).unwrap();
        handle.clear().unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(ee.listener_count("late"), 1);
        assert!(later.borrow().is_some());
    }
}
