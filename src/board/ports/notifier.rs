//! Port for non-blocking operator notifications.

use crate::board::domain::TaskId;
use std::fmt;

/// How loudly a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoticeSeverity {
    /// Informational.
    Info,
    /// The operation was refused or only partly applied.
    Warning,
    /// The operation failed.
    Error,
}

/// Message shown to the operator after a board operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation severity.
    pub severity: NoticeSeverity,
    /// Task the notice refers to, if any.
    pub task_id: Option<TaskId>,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Creates an informational notice.
    #[must_use]
    pub fn info(task_id: Option<TaskId>, message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            task_id,
            message: message.into(),
        }
    }

    /// Creates a warning notice.
    #[must_use]
    pub fn warning(task_id: Option<TaskId>, message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            task_id,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(task_id: Option<TaskId>, message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            task_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.task_id {
            Some(task_id) => write!(f, "[{task_id}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Sink for operator notices.
///
/// Implementations must not block and must not fail; a notice that cannot be
/// delivered is dropped.
pub trait OperatorNotifier: Send + Sync {
    /// Delivers a notice.
    fn notify(&self, notice: Notice);
}
