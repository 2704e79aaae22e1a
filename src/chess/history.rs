//! Reversible log of applied moves.

use crate::chess::core::{Piece, Square};

/// Everything needed to take one move back: where the piece came from and
/// went to, the piece as it was before moving (so a promotion is reverted by
/// putting the pawn back) and whatever it captured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// Snapshot of the moving piece before the move.
    pub moved: Piece,
    /// Snapshot of the piece that stood on `to`.
    pub captured: Option<Piece>,
}

/// Stack of [`MoveRecord`]s, most recent on top. Each entry corresponds to
/// exactly one applied move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

impl History {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Removes and returns the most recent record.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    /// The most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from the oldest to the most recent.
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
