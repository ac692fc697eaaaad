//! Identifier types for board task records.

use super::BoardDomainError;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace prefix for identifiers of manually created tasks.
pub const MANUAL_TASK_ID_PREFIX: &str = "kanban_";

/// Case-reference prefix for manually created tasks.
pub const MANUAL_CASE_PREFIX: &str = "KB";

/// Case-reference prefix issued by the service-request backend.
pub const SERVICE_CASE_PREFIX: &str = "DL";

/// Number of trailing timestamp digits embedded in manual case references.
const MANUAL_CASE_SUFFIX_DIGITS: usize = 4;

/// Opaque identifier of a task record.
///
/// Server-issued identifiers are UUID strings; manual identifiers live in the
/// [`MANUAL_TASK_ID_PREFIX`] namespace so the two sources never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generates a fresh identifier in the manual-task namespace.
    #[must_use]
    pub fn generate_manual() -> Self {
        Self(format!("{MANUAL_TASK_ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup path a case reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseNamespace {
    /// Case created manually on the board and kept in the local store.
    ManualBoard,
    /// Case created through a service-request submission.
    ServiceRequest,
}

/// Human-readable case reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Creates a validated case reference.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCaseId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCaseId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Builds the case reference for a manual task created at `created_at`.
    ///
    /// The format is `KB<year><last four digits of the millisecond timestamp>`.
    #[must_use]
    pub fn for_manual_task(created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis().unsigned_abs().to_string();
        let tail_start = millis.len().saturating_sub(MANUAL_CASE_SUFFIX_DIGITS);
        let tail = millis.get(tail_start..).unwrap_or(&millis);
        Self(format!(
            "{MANUAL_CASE_PREFIX}{}{tail:0>width$}",
            created_at.year(),
            width = MANUAL_CASE_SUFFIX_DIGITS
        ))
    }

    /// Returns this reference with a `-<sequence>` suffix.
    ///
    /// Used when the plain manual reference is already taken.
    #[must_use]
    pub fn with_sequence(&self, sequence: u32) -> Self {
        Self(format!("{}-{sequence}", self.0))
    }

    /// Returns the lookup path implied by the reference prefix.
    #[must_use]
    pub fn namespace(&self) -> CaseNamespace {
        if self.0.starts_with(MANUAL_CASE_PREFIX) {
            CaseNamespace::ManualBoard
        } else {
            CaseNamespace::ServiceRequest
        }
    }

    /// Returns the reference as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CaseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
