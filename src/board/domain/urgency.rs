//! Case urgency levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency requested for a recovery case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// No deadline pressure.
    Low,
    /// Standard turnaround.
    #[default]
    Medium,
    /// Expedited handling.
    High,
    /// Same-day handling.
    Critical,
}

impl Urgency {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Decodes a wire value, accepting the legacy `normal`, `urgent` and
    /// `emergency` spellings.
    ///
    /// Missing or unrecognised values fall back to [`Urgency::Medium`].
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" | "normal" => Self::Low,
            "high" | "urgent" => Self::High,
            "critical" | "emergency" => Self::Critical,
            _ => Self::Medium,
        }
    }

    /// Numeric severity used for display ordering, `1` (low) to `4`
    /// (critical).
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Turnaround promised to the customer, in days.
    #[must_use]
    pub const fn turnaround_days(self) -> u32 {
        match self {
            Self::Low => 7,
            Self::Medium => 5,
            Self::High => 2,
            Self::Critical => 1,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
