use std::fmt;

use crate::{Convention, EventName, Result};

/// Reverses exactly one registration.
///
/// Running consumes the action, so it can never be executed twice.
pub(crate) struct UndoAction {
    convention: Convention,
    event: EventName,
    action: Box<dyn FnOnce() -> Result>,
}

impl UndoAction {
    pub(crate) fn new<F>(convention: Convention, event: EventName, action: F) -> Self
    where
        F: FnOnce() -> Result + 'static,
    {
        Self {
            convention,
            event,
            action: Box::new(action),
        }
    }

    /// Placeholder for a registration that offers no way back.
    pub(crate) fn noop(convention: Convention, event: EventName) -> Self {
        Self::new(convention, event, || Ok(()))
    }

    pub(crate) fn event(&self) -> &EventName {
        &self.event
    }

    pub(crate) fn run(self) -> Result {
        let UndoAction {
            convention,
            event,
            action,
        } = self;

        action().inspect(|_| {
            tracing::trace!(event = %event, convention = %convention, "listener deregistered");
        })
    }
}

impl fmt::Debug for UndoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoAction")
            .field("convention", &self.convention)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Runs every action in order. All of them run even if some fail; every
/// failure is logged and the first one is returned.
pub(crate) fn run_all(actions: Vec<UndoAction>) -> Result {
    let mut first_err = None;

    for action in actions {
        let event = action.event().clone();
        if let Err(e) = action.run() {
            tracing::warn!(
                event = %event,
                error = %e,
                error_kind = e.as_label(),
                "deregistration failed"
            );
            first_err.get_or_insert(e);
        }
    }

    first_err.map_or(Ok(()), Err)
}
