//! Store port for manually created tasks.

use crate::board::domain::{CaseId, TaskDocument};
use std::sync::Arc;
use thiserror::Error;

/// Result type for manual task store operations.
pub type ManualStoreResult<T> = Result<T, ManualStoreError>;

/// Single-entry key-value store holding every manual task.
///
/// The entry is one JSON array. Every mutation is a plain read-modify-write
/// with no protection against a second writer.
pub trait ManualTaskStore: Send + Sync {
    /// Reads all stored tasks. A missing entry reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ManualStoreError::Corrupt`] when the entry is not a JSON
    /// array of tasks, or [`ManualStoreError::Persistence`] when it cannot be
    /// read.
    fn load(&self) -> ManualStoreResult<Vec<TaskDocument>>;

    /// Overwrites the entry with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ManualStoreError::Persistence`] when the entry cannot be
    /// written.
    fn save(&self, tasks: &[TaskDocument]) -> ManualStoreResult<()>;

    /// Appends a task to the entry.
    ///
    /// # Errors
    ///
    /// Propagates [`ManualTaskStore::load`] and [`ManualTaskStore::save`]
    /// failures.
    fn append(&self, task: &TaskDocument) -> ManualStoreResult<Vec<TaskDocument>> {
        let mut tasks = self.load()?;
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(tasks)
    }

    /// Replaces the stored task with the same id.
    ///
    /// Returns the stored tasks after the write, or `None` (without writing)
    /// when no entry has that id.
    ///
    /// # Errors
    ///
    /// Propagates [`ManualTaskStore::load`] and [`ManualTaskStore::save`]
    /// failures.
    fn replace(&self, task: &TaskDocument) -> ManualStoreResult<Option<Vec<TaskDocument>>> {
        let mut tasks = self.load()?;
        let Some(slot) = tasks.iter_mut().find(|stored| stored.id == task.id) else {
            return Ok(None);
        };
        *slot = task.clone();
        self.save(&tasks)?;
        Ok(Some(tasks))
    }

    /// Finds a stored task by case reference.
    ///
    /// # Errors
    ///
    /// Propagates [`ManualTaskStore::load`] failures.
    fn find_by_case_id(&self, case_id: &CaseId) -> ManualStoreResult<Option<TaskDocument>> {
        let tasks = self.load()?;
        Ok(tasks
            .into_iter()
            .find(|task| task.case_id.as_deref() == Some(case_id.as_str())))
    }
}

/// Errors returned by manual task store implementations.
#[derive(Debug, Clone, Error)]
pub enum ManualStoreError {
    /// The stored entry is not a valid task list.
    #[error("manual task entry '{key}' is corrupt: {source}")]
    Corrupt {
        /// Store key of the entry.
        key: String,
        /// Decoding failure.
        source: Arc<serde_json::Error>,
    },

    /// Storage-layer failure.
    #[error("manual task persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ManualStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a corruption error for `key`.
    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.into(),
            source: Arc::new(source),
        }
    }
}
