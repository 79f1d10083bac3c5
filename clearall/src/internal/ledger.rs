use super::UndoAction;
use crate::SubscriptionId;

/// Pending undo actions in registration order.
///
/// Every entry stands for exactly one active registration. Entries leave the
/// ledger before they run, so whoever runs them is the only one who can.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    entries: Vec<(SubscriptionId, UndoAction)>,
}

impl Ledger {
    pub(crate) fn push(&mut self, action: UndoAction) -> SubscriptionId {
        let id = SubscriptionId::generate();
        self.entries.push((id, action));
        id
    }

    /// Removes a single entry, keeping the order of the others.
    pub(crate) fn take(&mut self, id: SubscriptionId) -> Option<UndoAction> {
        let pos = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Empties the ledger and hands back everything that was pending.
    pub(crate) fn drain(&mut self) -> Vec<UndoAction> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(_, action)| action)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Convention;

    fn action(event: &str) -> UndoAction {
        UndoAction::noop(Convention::OnOff, event.into())
    }

    #[test]
    fn drain_empties_in_order() {
        let mut ledger = Ledger::default();
        ledger.push(action("a"));
        ledger.push(action("b"));

        let drained: Vec<_> = ledger.drain().iter().map(|a| a.event().clone()).collect();
        assert_eq!(drained, ["a", "b"]);
        assert!(ledger.is_empty());
        assert!(ledger.drain().is_empty());
    }

    #[test]
    fn take_removes_only_that_entry() {
        let mut ledger = Ledger::default();
        ledger.push(action("a"));
        let b = ledger.push(action("b"));
        ledger.push(action("c"));

        assert_eq!(ledger.take(b).map(|a| a.event().clone()), Some("b".into()));
        assert!(ledger.take(b).is_none());
        assert_eq!(ledger.len(), 2);

        let rest: Vec<_> = ledger.drain().iter().map(|a| a.event().clone()).collect();
        assert_eq!(rest, ["a", "c"]);
    }
}
