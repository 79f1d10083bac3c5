use std::fmt;

use uuid::Uuid;

/// Identifies one pending subscription in a [`ClearAll`](crate::ClearAll) ledger.
///
/// Returned by [`ClearAll::subscribe`](crate::ClearAll::subscribe) and
/// accepted by [`ClearAll::cancel`](crate::ClearAll::cancel). Only a ledger
/// mints ids, and they are random, so an id from one handle never matches an
/// entry of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubscriptionId(u128);

impl SubscriptionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().as_u128())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Uuid::from_u128(self.0).hyphenated(), f)
    }
}
