use std::fmt;

/// Controls what happens when a registration cannot be undone.
///
/// A [`Subscribe`](crate::Convention::Subscribe)-style target may accept a
/// listener without returning a canceller and without exposing
/// `unsubscribe`. The listener is registered at that point either way; the
/// policy decides whether the ledger accepts that silently or reports it.
///
/// | Policy | Outcome | Use case |
/// |--------|---------|----------|
/// | [`Allow`](Self::Allow) | no-op undo action, `warn` log | best-effort cleanup of third-party objects |
/// | [`Reject`](Self::Reject) | [`Error::MissingDeregistration`](crate::Error::MissingDeregistration) | code that must never leak listeners |
///
/// # Example
///
/// ```rust
/// use clearall::{ClearAll, Config, LeakPolicy};
///
/// let strict = ClearAll::with_config(Config::default().with_leak_policy(LeakPolicy::Reject));
/// assert_eq!(strict.config().leak_policy(), LeakPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeakPolicy {
    /// Keep the registration and store an undo action that does nothing.
    #[default]
    Allow,

    /// Fail the `add` call. The registration itself is not rolled back
    /// because there is no way to do so.
    Reject,
}

impl fmt::Display for LeakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeakPolicy::Allow => write!(f, "Allow"),
            LeakPolicy::Reject => write!(f, "Reject"),
        }
    }
}
