use crate::LeakPolicy;

/// Behaviour settings for a [`ClearAll`](crate::ClearAll) handle.
///
/// Use the builder methods to customize, or [`Default`] for the plain
/// behaviour: leaked registrations are allowed and dropping the handle
/// leaves listeners in place.
///
/// # Examples
///
/// ```rust
/// use clearall::{Config, LeakPolicy};
///
/// let config = Config::default()
///     .with_leak_policy(LeakPolicy::Reject)   // fail instead of leaking
///     .with_clear_on_drop(true);              // RAII-style cleanup
///
/// assert!(config.clear_on_drop());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// What to do with a registration that has no way to be undone.
    /// Default: [`LeakPolicy::Allow`]
    leak_policy: LeakPolicy,

    /// Clear pending subscriptions when the last handle is dropped.
    /// Default: false
    clear_on_drop: bool,
}

impl Config {
    /// Set the policy for registrations that cannot be undone.
    pub fn with_leak_policy(mut self, policy: LeakPolicy) -> Self {
        self.leak_policy = policy;
        self
    }

    /// Returns the policy for registrations that cannot be undone.
    pub fn leak_policy(&self) -> LeakPolicy {
        self.leak_policy
    }

    /// Clear every pending subscription when the last clone of the handle
    /// goes out of scope.
    ///
    /// Deregistration failures during drop cannot be returned, so they are
    /// logged at `warn` level.
    pub fn with_clear_on_drop(mut self, enabled: bool) -> Self {
        self.clear_on_drop = enabled;
        self
    }

    /// Returns whether pending subscriptions are cleared on drop.
    pub fn clear_on_drop(&self) -> bool {
        self.clear_on_drop
    }
}
