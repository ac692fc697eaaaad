//! Gateway port for the remote service-request API.

use crate::board::domain::{BoardStatus, CaseId, TaskDetails, TaskDocument, TaskId, Urgency};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for service-request gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Access to server-owned service requests.
#[async_trait]
pub trait ServiceRequestGateway: Send + Sync {
    /// Lists active (non-archived) service requests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or the response cannot
    /// be decoded.
    async fn list(&self) -> GatewayResult<Vec<TaskDocument>>;

    /// Applies `patch` to the service request `id`.
    ///
    /// Returns the updated record when the server echoes it, or `None` when
    /// it only acknowledges the update.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the request does not exist and
    /// [`GatewayError::Rejected`] when the server refuses the patch.
    async fn update(
        &self,
        id: &TaskId,
        patch: &ServiceRequestPatch,
    ) -> GatewayResult<Option<TaskDocument>>;

    /// Looks up the public tracking view of a case.
    ///
    /// Returns `None` when the server has no such case.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport or decoding failures.
    async fn find_by_case_id(&self, case_id: &CaseId) -> GatewayResult<Option<CaseTrackingRecord>>;

    /// Lists archived service requests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport or decoding failures.
    async fn list_archived(&self) -> GatewayResult<Vec<TaskDocument>>;
}

/// Partial update sent to the service-request API.
///
/// Only fields that are set are serialised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestPatch {
    /// New status bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BoardStatus>,
    /// New board approval flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_for_kanban: Option<bool>,
    /// New customer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New customer email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New customer phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New device category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// New problem description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
    /// New urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    /// New price estimate. `Some(None)` clears the price and is sent as
    /// `null`.
    #[expect(
        clippy::option_option,
        reason = "the patch distinguishes an untouched price from a cleared one"
    )]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_price"
    )]
    pub price: Option<Option<f64>>,
}

impl ServiceRequestPatch {
    /// Patch that only changes the status.
    #[must_use]
    pub fn status(status: BoardStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that approves a request for the board and resets it to
    /// `pending`.
    #[must_use]
    pub fn approval() -> Self {
        Self {
            status: Some(BoardStatus::Pending),
            approved_for_kanban: Some(true),
            ..Self::default()
        }
    }

    /// Patch carrying every content field of `details`.
    #[must_use]
    pub fn content(details: &TaskDetails) -> Self {
        Self {
            name: Some(details.name.clone()),
            email: Some(details.email.clone()),
            phone: Some(details.phone.clone()),
            device_type: Some(details.device_type.clone()),
            problem_description: Some(details.problem_description.clone()),
            urgency: Some(details.urgency),
            price: Some(details.price),
            ..Self::default()
        }
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the set fields to a document, as the server would.
    pub fn apply_to(&self, document: &mut TaskDocument) {
        if let Some(status) = self.status {
            document.status = Some(status.as_str().to_owned());
        }
        if let Some(approved) = self.approved_for_kanban {
            document.approved_for_kanban = approved;
        }
        overwrite(&mut document.name, self.name.as_ref());
        overwrite(&mut document.email, self.email.as_ref());
        overwrite(&mut document.phone, self.phone.as_ref());
        overwrite(&mut document.device_type, self.device_type.as_ref());
        overwrite(
            &mut document.problem_description,
            self.problem_description.as_ref(),
        );
        if let Some(urgency) = self.urgency {
            document.urgency = Some(urgency.as_str().to_owned());
        }
        if let Some(price) = self.price {
            document.price = price;
        }
    }
}

/// Reads a `price` key that is present, so `null` means "clear".
fn present_price<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

fn lenient_progress<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|percent| u8::try_from(percent.min(100)).ok()))
}

fn overwrite(field: &mut Option<String>, value: Option<&String>) {
    if let Some(new_value) = value {
        *field = Some(new_value.clone());
    }
}

/// Public tracking view of a service request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseTrackingRecord {
    /// Case reference.
    pub case_id: String,
    /// Device category.
    #[serde(default)]
    pub device_type: Option<String>,
    /// Raw status value, possibly `archived`.
    #[serde(default)]
    pub status: Option<String>,
    /// Progress reported by the server, capped at 100. Values that are not
    /// whole non-negative numbers read as `None`.
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: Option<u8>,
    /// Raw urgency value.
    #[serde(default)]
    pub urgency: Option<String>,
    /// Creation date.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Date work started.
    #[serde(default)]
    pub started_at: Option<String>,
    /// Date work completed.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Completion estimate.
    #[serde(default)]
    pub estimated_completion: Option<String>,
    /// Price estimate.
    #[serde(default)]
    pub price: Option<f64>,
    /// Whether the case has been archived.
    #[serde(default)]
    pub is_archived: bool,
}

/// Errors returned by service-request gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The service request does not exist.
    #[error("service request not found: {0}")]
    NotFound(TaskId),

    /// The server refused the request.
    #[error("service request API rejected the call with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail.
        message: String,
    },

    /// The request could not be delivered.
    #[error("service request API transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error("service request API returned an undecodable body: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
