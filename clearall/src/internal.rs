mod binding;
mod ledger;
mod undo_action;

pub(crate) use binding::Binding;
pub(crate) use ledger::Ledger;
pub(crate) use undo_action::{UndoAction, run_all};
