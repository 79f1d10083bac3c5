use std::rc::Rc;

use super::UndoAction;
use crate::{Convention, Error, EventName, LeakPolicy, Listenable, Listener, Params, Result, detect};

/// A target paired with the convention it was detected to follow.
///
/// Detection happens before anything touches the target, so an unsupported
/// target fails without side effects.
pub(crate) struct Binding<'a, T: Listenable> {
    target: &'a Rc<T>,
    convention: Convention,
}

impl<'a, T: Listenable> Binding<'a, T> {
    pub(crate) fn detect(target: &'a Rc<T>) -> Result<Self> {
        let convention = detect(target.as_ref())?;
        Ok(Self { target, convention })
    }

    pub(crate) fn convention(&self) -> Convention {
        self.convention
    }

    /// Registers `listener` on the target and returns the action undoing it.
    pub(crate) fn register(
        &self,
        event: EventName,
        listener: Listener<T::Event>,
        params: &Params,
        policy: LeakPolicy,
    ) -> Result<UndoAction> {
        let target = self.target.as_ref();

        match self.convention {
            Convention::EventTarget => {
                self.capability(target.as_event_target())?
                    .add_event_listener(&event, &listener, params)?;
                Ok(self.deregistration(event, listener, remove_event_listener::<T>))
            }
            Convention::Emitter => {
                self.capability(target.as_emitter())?
                    .add_listener(&event, &listener, params)?;
                Ok(self.deregistration(event, listener, remove_listener::<T>))
            }
            Convention::OnOff => {
                self.capability(target.as_on_off())?
                    .on(&event, &listener, params)?;
                Ok(self.deregistration(event, listener, off::<T>))
            }
            Convention::Subscribe => {
                let canceller = self
                    .capability(target.as_subscribable())?
                    .subscribe(&event, &listener, params)?;

                if let Some(canceller) = canceller {
                    return Ok(UndoAction::new(self.convention, event, move || {
                        canceller.cancel()
                    }));
                }

                if target.as_unsubscribable().is_some() {
                    return Ok(self.deregistration(event, listener, unsubscribe::<T>));
                }

                match policy {
                    LeakPolicy::Allow => {
                        tracing::warn!(
                            event = %event,
                            target_type = std::any::type_name::<T>(),
                            "no canceller or unsubscribe available; listener stays registered"
                        );
                        Ok(UndoAction::noop(self.convention, event))
                    }
                    LeakPolicy::Reject => Err(Error::MissingDeregistration(event)),
                }
            }
        }
    }

    fn capability<'t, C: ?Sized>(&self, capability: Option<&'t C>) -> Result<&'t C> {
        capability.ok_or_else(|| Error::UnsupportedTarget(std::any::type_name::<T>()))
    }

    /// Builds an undo action that calls `remove` on the target, if the
    /// target is still alive by then.
    fn deregistration(
        &self,
        event: EventName,
        listener: Listener<T::Event>,
        remove: fn(&T, &EventName, &Listener<T::Event>) -> Result,
    ) -> UndoAction {
        let target = Rc::downgrade(self.target);

        UndoAction::new(self.convention, event.clone(), move || {
            match target.upgrade() {
                Some(target) => remove(&target, &event, &listener),
                None => {
                    tracing::trace!(event = %event, "target already dropped; nothing to deregister");
                    Ok(())
                }
            }
        })
    }
}

fn remove_event_listener<T: Listenable>(
    target: &T,
    event: &EventName,
    listener: &Listener<T::Event>,
) -> Result {
    target
        .as_event_target()
        .map_or(Ok(()), |m| m.remove_event_listener(event, listener))
}

fn remove_listener<T: Listenable>(
    target: &T,
    event: &EventName,
    listener: &Listener<T::Event>,
) -> Result {
    target
        .as_emitter()
        .map_or(Ok(()), |m| m.remove_listener(event, listener))
}

fn off<T: Listenable>(target: &T, event: &EventName, listener: &Listener<T::Event>) -> Result {
    target.as_on_off().map_or(Ok(()), |m| m.off(event, listener))
}

fn unsubscribe<T: Listenable>(
    target: &T,
    event: &EventName,
    listener: &Listener<T::Event>,
) -> Result {
    target
        .as_unsubscribable()
        .map_or(Ok(()), |m| m.unsubscribe(event, listener))
}
