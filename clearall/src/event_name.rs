use std::{borrow::Borrow, hash::Hash, sync::Arc};

/// Name of the event a listener is registered for, e.g. `"click"` or `"message"`.
///
/// `EventName` is cheap to clone: every undo action keeps a copy so it can
/// hand the same name back to the target's deregistration method. Equality
/// compares the string contents, with a fast path when both names share
/// one allocation.
///
/// Most APIs take `impl Into<EventName>`, so plain string literals work:
///
/// ```rust
/// use clearall::EventName;
///
/// let name: EventName = "message".into();
/// assert_eq!(name.as_str(), "message");
/// ```
#[derive(Debug, Clone, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventName(Arc<str>);

impl EventName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the string representation of this event name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EventName {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for EventName {}

impl PartialEq<str> for EventName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for EventName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for EventName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&EventName> for EventName {
    fn from(name: &EventName) -> Self {
        name.clone()
    }
}
