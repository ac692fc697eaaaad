//! In-memory service-request gateway for tests and local flows.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{CaseId, TaskDocument, TaskId},
    ports::{
        CaseTrackingRecord, GatewayError, GatewayResult, ServiceRequestGateway,
        ServiceRequestPatch,
    },
};

/// Thread-safe in-memory stand-in for the service-request API.
///
/// Updates are applied to the stored documents and recorded so tests can
/// assert on the calls the board made. While offline, every call fails with
/// a transport error.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRequestGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    records: Vec<TaskDocument>,
    updates: Vec<(TaskId, ServiceRequestPatch)>,
    offline: bool,
}

impl InMemoryServiceRequestGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway serving `records`.
    #[must_use]
    pub fn with_records(records: Vec<TaskDocument>) -> Self {
        let gateway = Self::new();
        if let Ok(mut state) = gateway.state.write() {
            state.records = records;
        }
        gateway
    }

    /// Adds a record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn insert(&self, record: TaskDocument) -> GatewayResult<()> {
        let mut state = self.write_state()?;
        state.records.push(record);
        Ok(())
    }

    /// Toggles simulated network failure.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn set_offline(&self, offline: bool) -> GatewayResult<()> {
        let mut state = self.write_state()?;
        state.offline = offline;
        Ok(())
    }

    /// Returns every update call received, in order, including failed ones.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn recorded_updates(&self) -> GatewayResult<Vec<(TaskId, ServiceRequestPatch)>> {
        let state = self.read_state()?;
        Ok(state.updates.clone())
    }

    /// Returns the stored document for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn record(&self, id: &TaskId) -> GatewayResult<Option<TaskDocument>> {
        let state = self.read_state()?;
        Ok(state
            .records
            .iter()
            .find(|record| record.id == id.as_str())
            .cloned())
    }

    fn read_state(&self) -> GatewayResult<std::sync::RwLockReadGuard<'_, InMemoryGatewayState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(
        &self,
    ) -> GatewayResult<std::sync::RwLockWriteGuard<'_, InMemoryGatewayState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

fn ensure_online(state: &InMemoryGatewayState) -> GatewayResult<()> {
    if state.offline {
        return Err(GatewayError::transport(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "service-request API is unreachable",
        )));
    }
    Ok(())
}

fn tracking_view(record: &TaskDocument) -> CaseTrackingRecord {
    let date = |value: Option<chrono::DateTime<chrono::Utc>>| {
        value.map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
    };
    CaseTrackingRecord {
        case_id: record.case_id.clone().unwrap_or_default(),
        device_type: record.device_type.clone(),
        status: record.status.clone(),
        progress: None,
        urgency: record.urgency.clone(),
        created_at: date(record.created_at),
        started_at: date(record.started_at),
        completed_at: date(record.completed_at),
        estimated_completion: date(record.estimated_completion),
        price: record.price,
        is_archived: record.is_archived,
    }
}

#[async_trait]
impl ServiceRequestGateway for InMemoryServiceRequestGateway {
    async fn list(&self) -> GatewayResult<Vec<TaskDocument>> {
        let state = self.read_state()?;
        ensure_online(&state)?;
        Ok(state
            .records
            .iter()
            .filter(|record| !record.is_archived)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &TaskId,
        patch: &ServiceRequestPatch,
    ) -> GatewayResult<Option<TaskDocument>> {
        let mut state = self.write_state()?;
        state.updates.push((id.clone(), patch.clone()));
        ensure_online(&state)?;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == id.as_str())
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        patch.apply_to(record);
        Ok(Some(record.clone()))
    }

    async fn find_by_case_id(&self, case_id: &CaseId) -> GatewayResult<Option<CaseTrackingRecord>> {
        let state = self.read_state()?;
        ensure_online(&state)?;
        Ok(state
            .records
            .iter()
            .find(|record| record.case_id.as_deref() == Some(case_id.as_str()) && !record.is_archived)
            .map(tracking_view))
    }

    async fn list_archived(&self) -> GatewayResult<Vec<TaskDocument>> {
        let state = self.read_state()?;
        ensure_online(&state)?;
        Ok(state
            .records
            .iter()
            .filter(|record| record.is_archived)
            .cloned()
            .collect())
    }
}
