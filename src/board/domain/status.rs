//! Board status buckets and movement directions.

use super::ParseBoardStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status bucket of a task record.
///
/// The variants form a closed, totally ordered set; [`BoardStatus::ORDER`]
/// is the left-to-right column order on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    /// Case received, work not started.
    Pending,
    /// Recovery work is under way.
    InProgress,
    /// Recovery finished, awaiting customer pickup.
    Completed,
    /// Device returned to the customer.
    PickedUp,
}

impl BoardStatus {
    /// Column order of the board, left to right.
    pub const ORDER: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::PickedUp,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::PickedUp => "picked_up",
        }
    }

    /// Returns the position of the bucket in [`BoardStatus::ORDER`].
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::PickedUp => 3,
        }
    }

    /// Decodes a wire value leniently.
    ///
    /// Missing or unrecognised values fall back to [`BoardStatus::Pending`].
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::try_from(raw).ok())
            .unwrap_or(Self::Pending)
    }

    /// Returns the neighbouring bucket in `direction`, or `None` at the
    /// board edge.
    #[must_use]
    pub fn adjacent(self, direction: HorizontalDirection) -> Option<Self> {
        let target = match direction {
            HorizontalDirection::Left => self.position().checked_sub(1)?,
            HorizontalDirection::Right => self.position().checked_add(1)?,
        };
        Self::ORDER.get(target).copied()
    }
}

impl TryFrom<&str> for BoardStatus {
    type Error = ParseBoardStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "picked_up" => Ok(Self::PickedUp),
            _ => Err(ParseBoardStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a move between neighbouring columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    /// Towards `pending`.
    Left,
    /// Towards `picked_up`.
    Right,
}

/// Direction of a reorder inside one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalDirection {
    /// Towards the top of the column.
    Up,
    /// Towards the bottom of the column.
    Down,
}
