//! # Selection Controller
//!
//! Tracks the single record open in the detail view.
//!
//! Two states: `Closed` and `Open(id)`. Opening replaces any previous
//! selection in one step; closing returns to the list.

use crate::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Transition of the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionAction {
    Open { id: RecordId },
    Close,
}

/// Which record, if any, is open for detailed viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    open: Option<RecordId>,
}

impl SelectionState {
    /// The initial, closed state.
    #[must_use]
    pub const fn closed() -> Self {
        Self { open: None }
    }

    /// Identifier of the open record.
    #[must_use]
    pub const fn open_id(&self) -> Option<RecordId> {
        self.open
    }

    /// Whether a record is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a record, replacing any previous selection.
    pub fn open(&mut self, id: RecordId) {
        self.open = Some(id);
    }

    /// Close the detail view.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Pure reducer form of [`open`](Self::open) and [`close`](Self::close).
    #[must_use]
    pub fn reduce(self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::Open { id } => Self { open: Some(id) },
            SelectionAction::Close => Self::closed(),
        }
    }

    /// Resolve the open id against a collection.
    ///
    /// An id that is not present yields `None`, never an error.
    #[must_use]
    pub fn current<'a, R: Record>(&self, records: &'a [R]) -> Option<&'a R> {
        let id = self.open?;
        records.iter().find(|r| r.id() == id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Card(u64);

    impl Record for Card {
        fn id(&self) -> RecordId {
            RecordId(self.0)
        }
    }

    fn cards() -> Vec<Card> {
        (1..=5).map(Card).collect()
    }

    #[test]
    fn initial_state_is_closed() {
        let state = SelectionState::default();
        assert!(!state.is_open());
        assert!(state.current(&cards()).is_none());
    }

    #[test]
    fn open_replaces_previous_selection() {
        let records = cards();
        let state = SelectionState::closed()
            .reduce(SelectionAction::Open { id: RecordId(1) })
            .reduce(SelectionAction::Open { id: RecordId(2) });

        assert_eq!(state.open_id(), Some(RecordId(2)));
        assert_eq!(state.current(&records).map(Record::id), Some(RecordId(2)));
    }

    #[test]
    fn close_returns_to_closed() {
        let mut state = SelectionState::closed();
        state.open(RecordId(3));
        state.close();
        assert_eq!(state, SelectionState::closed());
    }

    #[test]
    fn close_when_closed_is_noop() {
        let state = SelectionState::closed().reduce(SelectionAction::Close);
        assert!(!state.is_open());
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let records = cards();
        let state = SelectionState::closed().reduce(SelectionAction::Open { id: RecordId(99) });
        assert!(state.is_open());
        assert!(state.current(&records).is_none());
    }

    #[test]
    fn action_json_shape() {
        let action: SelectionAction =
            serde_json::from_str(r#"{"type":"open","id":4}"#).expect("parse");
        assert_eq!(action, SelectionAction::Open { id: RecordId(4) });
    }
}
