//! Unit tests for the board module.
//!
//! Tests are organised by layer: pure domain rules, board partitioning and
//! movement, and controller orchestration over in-memory adapters.


use crate::board::domain::Board;
use std::collections::HashSet;

/// Asserts that every record sits in the column of its status and that no
/// id appears twice.
fn assert_partitioned(board: &Board) {
    let mut seen = HashSet::new();
    for (status, records) in board.columns() {
        for record in records {
            assert_eq!(
                record.status(),
                status,
                "{} is in the {status} column",
                record.id()
            );
            assert!(seen.insert(record.id().clone()), "{} appears twice", record.id());
        }
    }
    assert_eq!(seen.len(), board.len());
}
