use crate::{Convention, Error, Listenable, Result};

/// Determines which convention `target` will be driven through.
///
/// Capabilities are queried in [`Convention::PRIORITY`] order and the first
/// one present wins. Querying has no side effects on the target.
///
/// # Errors
///
/// [`Error::UnsupportedTarget`] if the target exposes no registration
/// method at all.
///
/// ```rust
/// use clearall::{detect, Error, Listenable};
///
/// struct Inert;
/// impl Listenable for Inert {
///     type Event = ();
/// }
///
/// assert!(matches!(detect(&Inert), Err(Error::UnsupportedTarget(_))));
/// ```
pub fn detect<T: Listenable>(target: &T) -> Result<Convention> {
    Convention::PRIORITY
        .into_iter()
        .find(|convention| exposes(target, *convention))
        .ok_or_else(|| Error::UnsupportedTarget(std::any::type_name::<T>()))
}

fn exposes<T: Listenable>(target: &T, convention: Convention) -> bool {
    match convention {
        Convention::EventTarget => target.as_event_target().is_some(),
        Convention::Emitter => target.as_emitter().is_some(),
        Convention::OnOff => target.as_on_off().is_some(),
        Convention::Subscribe => target.as_subscribable().is_some(),
    }
}
