//! In-memory manual task store.

use std::sync::{Arc, RwLock};

use crate::board::{
    domain::TaskDocument,
    ports::{ManualStoreError, ManualStoreResult, ManualTaskStore},
};

/// Thread-safe in-memory manual task store.
///
/// Clones share the same entry, so a test can hand one clone to the
/// controller and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManualTaskStore {
    tasks: Arc<RwLock<Vec<TaskDocument>>>,
}

impl InMemoryManualTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<TaskDocument>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }
}

impl ManualTaskStore for InMemoryManualTaskStore {
    fn load(&self) -> ManualStoreResult<Vec<TaskDocument>> {
        let tasks = self.tasks.read().map_err(|err| {
            ManualStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks.clone())
    }

    fn save(&self, tasks: &[TaskDocument]) -> ManualStoreResult<()> {
        let mut stored = self.tasks.write().map_err(|err| {
            ManualStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *stored = tasks.to_vec();
        Ok(())
    }
}
