use std::fmt;

/// The listener-registration conventions a target can follow.
///
/// Detection walks the variants in declaration order and picks the first
/// one the target exposes, so an object that looks like both an emitter and
/// an `on`/`off` source is always driven through `add_listener`.
///
/// | Convention | Register | Deregister |
/// |------------|----------|------------|
/// | [`EventTarget`](Self::EventTarget) | `add_event_listener` | `remove_event_listener` |
/// | [`Emitter`](Self::Emitter) | `add_listener` | `remove_listener` |
/// | [`OnOff`](Self::OnOff) | `on` | `off` |
/// | [`Subscribe`](Self::Subscribe) | `subscribe` | returned canceller, else `unsubscribe` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convention {
    /// DOM-style `add_event_listener` / `remove_event_listener`.
    EventTarget,

    /// Node-style `add_listener` / `remove_listener`.
    Emitter,

    /// Shorthand `on` / `off`.
    OnOff,

    /// `subscribe`, which may return its own [`Canceller`](crate::Canceller).
    /// Falls back to `unsubscribe` when it does not.
    Subscribe,
}

impl Convention {
    /// All conventions in detection priority order.
    pub const PRIORITY: [Convention; 4] = [
        Convention::EventTarget,
        Convention::Emitter,
        Convention::OnOff,
        Convention::Subscribe,
    ];

    /// Name of the registration method for this convention.
    pub fn register_method(&self) -> &'static str {
        match self {
            Convention::EventTarget => "add_event_listener",
            Convention::Emitter => "add_listener",
            Convention::OnOff => "on",
            Convention::Subscribe => "subscribe",
        }
    }

    /// Name of the deregistration method for this convention.
    pub fn deregister_method(&self) -> &'static str {
        match self {
            Convention::EventTarget => "remove_event_listener",
            Convention::Emitter => "remove_listener",
            Convention::OnOff => "off",
            Convention::Subscribe => "unsubscribe",
        }
    }

    /// Returns `true` if registrations under this convention may hand back
    /// their own canceller.
    pub fn is_self_cancelling(&self) -> bool {
        matches!(self, Convention::Subscribe)
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::EventTarget => write!(f, "EventTarget"),
            Convention::Emitter => write!(f, "Emitter"),
            Convention::OnOff => write!(f, "OnOff"),
            Convention::Subscribe => write!(f, "Subscribe"),
        }
    }
}
