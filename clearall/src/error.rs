use std::sync::Arc;

use crate::EventName;

/// The single error type for all clearall operations.
///
/// Every fallible API returns `clearall::Result<T>` (alias for
/// `Result<T, clearall::Error>`). Targets report their own failures by
/// returning [`Error::Target`], built with [`Error::target`]; the crate
/// hands those back to the caller exactly as it received them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The target exposes none of `add_event_listener`, `add_listener`,
    /// `on` or `subscribe`.
    #[error("no listener registration method was found on `{0}`")]
    UnsupportedTarget(&'static str),

    /// A subscribe-style registration returned no canceller and the target
    /// has no `unsubscribe`. Only raised under [`LeakPolicy::Reject`](crate::LeakPolicy::Reject);
    /// the listener is already registered on the target at that point.
    #[error("no deregistration method was found for event '{0}'; the listener stays registered")]
    MissingDeregistration(EventName),

    /// Failure reported by the target's own registration or deregistration method.
    #[error("target error: {0}")]
    Target(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn target(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Target(Arc::new(e))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::UnsupportedTarget(_) => "unsupported_target",
            Error::MissingDeregistration(_) => "missing_deregistration",
            Error::Target(_) => "target_error",
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnsupportedTarget(a), Self::UnsupportedTarget(b)) => a == b,
            (Self::MissingDeregistration(a), Self::MissingDeregistration(b)) => a == b,
            (Self::Target(a), Self::Target(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}
