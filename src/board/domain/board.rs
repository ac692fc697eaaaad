//! Four-column partition of task records by status.

use super::{BoardStatus, TaskId, TaskRecord, VerticalDirection};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The board: one ordered column per [`BoardStatus`].
///
/// Every record lives in exactly one column, the one matching its status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pending: Vec<TaskRecord>,
    in_progress: Vec<TaskRecord>,
    completed: Vec<TaskRecord>,
    picked_up: Vec<TaskRecord>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a board from the two task sources.
    ///
    /// Server records not approved for the board are skipped. Server records
    /// come first, then manual ones; each column keeps encounter order. A
    /// repeated id is kept only at its first occurrence.
    #[must_use]
    pub fn derive<'a>(
        server_records: impl IntoIterator<Item = &'a TaskRecord>,
        manual_records: impl IntoIterator<Item = &'a TaskRecord>,
    ) -> Self {
        let mut board = Self::new();
        let mut seen = HashSet::new();
        let combined = server_records
            .into_iter()
            .filter(|record| record.is_on_board())
            .chain(manual_records);
        for record in combined {
            if !seen.insert(record.id().clone()) {
                tracing::debug!(task_id = %record.id(), "skipping duplicate task during derivation");
                continue;
            }
            board.column_mut(record.status()).push(record.clone());
        }
        board
    }

    /// Returns the records of one column in display order.
    #[must_use]
    pub fn column(&self, status: BoardStatus) -> &[TaskRecord] {
        match status {
            BoardStatus::Pending => &self.pending,
            BoardStatus::InProgress => &self.in_progress,
            BoardStatus::Completed => &self.completed,
            BoardStatus::PickedUp => &self.picked_up,
        }
    }

    const fn column_mut(&mut self, status: BoardStatus) -> &mut Vec<TaskRecord> {
        match status {
            BoardStatus::Pending => &mut self.pending,
            BoardStatus::InProgress => &mut self.in_progress,
            BoardStatus::Completed => &mut self.completed,
            BoardStatus::PickedUp => &mut self.picked_up,
        }
    }

    /// Iterates over all columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (BoardStatus, &[TaskRecord])> {
        BoardStatus::ORDER
            .into_iter()
            .map(|status| (status, self.column(status)))
    }

    /// Returns the number of records on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns().map(|(_, records)| records.len()).sum()
    }

    /// Returns `true` when no column holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the identifiers of every record, column by column.
    #[must_use]
    pub fn task_ids(&self) -> Vec<&TaskId> {
        self.columns()
            .flat_map(|(_, records)| records.iter().map(TaskRecord::id))
            .collect()
    }

    /// Finds a record anywhere on the board.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.columns()
            .find_map(|(_, records)| records.iter().find(|record| record.id() == id))
    }

    /// Finds a record in one column.
    #[must_use]
    pub fn find_in(&self, status: BoardStatus, id: &TaskId) -> Option<&TaskRecord> {
        self.column(status).iter().find(|record| record.id() == id)
    }

    /// Returns the column holding `id`.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<BoardStatus> {
        self.find(id).map(TaskRecord::status)
    }

    /// Returns `true` when `id` is on the board.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Adds a record to the end of the column matching its status.
    ///
    /// Returns `false`, leaving the board unchanged, when the id is already
    /// present.
    pub fn insert(&mut self, record: TaskRecord) -> bool {
        if self.contains(record.id()) {
            return false;
        }
        self.column_mut(record.status()).push(record);
        true
    }

    /// Removes a record from whichever column holds it.
    pub fn remove(&mut self, id: &TaskId) -> Option<TaskRecord> {
        let status = self.locate(id)?;
        let column = self.column_mut(status);
        let position = column.iter().position(|record| record.id() == id)?;
        Some(column.remove(position))
    }

    /// Replaces the record with the same id.
    ///
    /// A record whose status is unchanged keeps its position; one whose
    /// status changed moves to the end of its new column. Returns `false`
    /// when the id is not on the board.
    pub fn update(&mut self, record: TaskRecord) -> bool {
        let Some(current) = self.locate(record.id()) else {
            return false;
        };
        if current != record.status() {
            self.remove(record.id());
            self.column_mut(record.status()).push(record);
            return true;
        }
        let column = self.column_mut(current);
        if let Some(slot) = column.iter_mut().find(|existing| existing.id() == record.id()) {
            *slot = record;
        }
        true
    }

    /// Moves a record from column `from` to the end of column `to`,
    /// overwriting its status.
    ///
    /// Returns the moved record, or `None` when `from == to` or the record is
    /// not in `from`.
    pub fn transfer(
        &mut self,
        id: &TaskId,
        from: BoardStatus,
        to: BoardStatus,
        at: DateTime<Utc>,
    ) -> Option<&TaskRecord> {
        if from == to {
            return None;
        }
        let source = self.column_mut(from);
        let position = source.iter().position(|record| record.id() == id)?;
        let mut record = source.remove(position);
        record.set_status(to, at);
        let target = self.column_mut(to);
        target.push(record);
        target.last()
    }

    /// Swaps a record with its neighbour in the same column.
    ///
    /// Returns `false` when the record is not in the column or is already at
    /// the edge in `direction`.
    pub fn reorder(&mut self, id: &TaskId, status: BoardStatus, direction: VerticalDirection) -> bool {
        let column = self.column_mut(status);
        let Some(current) = column.iter().position(|record| record.id() == id) else {
            return false;
        };
        let neighbour = match direction {
            VerticalDirection::Up => current.checked_sub(1),
            VerticalDirection::Down => current.checked_add(1).filter(|next| *next < column.len()),
        };
        let Some(neighbour) = neighbour else {
            return false;
        };
        column.swap(current, neighbour);
        true
    }
}
