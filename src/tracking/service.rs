//! Case lookup across the manual task store and the service-request API.

use std::sync::Arc;

use super::{CaseReport, CaseStatus};
use crate::board::{
    domain::{CaseId, CaseNamespace},
    ports::{GatewayError, ManualStoreError, ManualTaskStore, ServiceRequestGateway},
};
use thiserror::Error;

/// Errors returned by [`CaseTrackingService::track`].
#[derive(Debug, Clone, Error)]
pub enum TrackingError {
    /// The reference was blank.
    #[error("case reference must not be empty")]
    EmptyCaseId,

    /// No source knows the case.
    #[error("case {case_id} not found")]
    NotFound {
        /// Reference that was looked up.
        case_id: CaseId,
        /// Namespace that was searched.
        namespace: CaseNamespace,
    },

    /// The service-request API failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The manual task store failed.
    #[error(transparent)]
    Store(#[from] ManualStoreError),
}

/// Answers case tracking queries.
pub struct CaseTrackingService<G, S>
where
    G: ServiceRequestGateway,
    S: ManualTaskStore,
{
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G, S> CaseTrackingService<G, S>
where
    G: ServiceRequestGateway,
    S: ManualTaskStore,
{
    /// Creates a tracking service over both case sources.
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self { gateway, store }
    }

    /// Looks up a case by its reference.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::EmptyCaseId`] for a blank reference,
    /// [`TrackingError::NotFound`] when no source knows the case, and
    /// [`TrackingError::Gateway`] or [`TrackingError::Store`] when a source
    /// cannot be read.
    pub async fn track(&self, raw_case_id: &str) -> Result<CaseReport, TrackingError> {
        let case_id = CaseId::new(raw_case_id).map_err(|_| TrackingError::EmptyCaseId)?;
        let report = match case_id.namespace() {
            CaseNamespace::ManualBoard => self.track_manual(case_id)?,
            CaseNamespace::ServiceRequest => self.track_service_request(case_id).await?,
        };
        tracing::info!(
            case_id = %report.case_id,
            status = %report.status,
            "case tracked"
        );
        Ok(report)
    }

    fn track_manual(&self, case_id: CaseId) -> Result<CaseReport, TrackingError> {
        let Some(document) = self.store.find_by_case_id(&case_id)? else {
            return Err(TrackingError::NotFound {
                case_id,
                namespace: CaseNamespace::ManualBoard,
            });
        };
        Ok(CaseReport::from_document(
            case_id,
            CaseNamespace::ManualBoard,
            &document,
        ))
    }

    async fn track_service_request(&self, case_id: CaseId) -> Result<CaseReport, TrackingError> {
        if let Some(record) = self.gateway.find_by_case_id(&case_id).await? {
            return Ok(CaseReport::from_tracking(case_id, &record));
        }
        tracing::debug!(case_id = %case_id, "case not active, searching archive");
        let archived = self.gateway.list_archived().await?;
        let Some(document) = archived
            .iter()
            .find(|document| document.case_id.as_deref() == Some(case_id.as_str()))
        else {
            return Err(TrackingError::NotFound {
                case_id,
                namespace: CaseNamespace::ServiceRequest,
            });
        };
        let mut report =
            CaseReport::from_document(case_id, CaseNamespace::ServiceRequest, document);
        report.status = CaseStatus::Archived;
        report.progress = report.status.progress_percent();
        Ok(report)
    }
}
