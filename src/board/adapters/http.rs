//! HTTP adapter for the service-request API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::board::{
    domain::{CaseId, TaskDocument, TaskId},
    ports::{
        CaseTrackingRecord, GatewayError, GatewayResult, ServiceRequestGateway,
        ServiceRequestPatch,
    },
};

const SERVICE_REQUESTS_PATH: &str = "api/service-requests";

/// Path segments under the service-request collection that name routes
/// rather than records.
const RESERVED_SEGMENTS: [&str; 3] = ["archived", ".", ".."];

#[derive(Debug, Error)]
#[error("service request API root cannot carry a path: {0}")]
struct UnusableApiRoot(String);

/// Service-request gateway backed by the JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpServiceRequestGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServiceRequestGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a gateway using an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        let base_url = api_root.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Returns the API root this gateway talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL of the collection followed by `segment`, escaping
    /// every character that would change the route.
    fn url(&self, segment: &str) -> GatewayResult<Url> {
        let mut url = Url::parse(&format!("{}/{SERVICE_REQUESTS_PATH}", self.base_url))
            .map_err(GatewayError::transport)?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::transport(UnusableApiRoot(self.base_url.clone())))?
            .push(segment);
        Ok(url)
    }

    async fn get(&self, url: Url) -> GatewayResult<Response> {
        tracing::debug!(%url, "GET service requests");
        self.client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(GatewayError::transport)
    }
}

/// Turns a non-success response into [`GatewayError::Rejected`].
async fn reject(response: Response) -> GatewayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value.get("detail").map(detail_text))
        .unwrap_or(body);
    GatewayError::Rejected { status, message }
}

fn detail_text(detail: &Value) -> String {
    detail
        .as_str()
        .map_or_else(|| detail.to_string(), str::to_owned)
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let body = response.bytes().await.map_err(GatewayError::transport)?;
    serde_json::from_slice(&body).map_err(GatewayError::decode)
}

/// Reads an update response.
///
/// The API answers either with the updated record or with a
/// `{success, message}` acknowledgement.
fn update_outcome(body: &[u8]) -> GatewayResult<Option<TaskDocument>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body).map_err(GatewayError::decode)?;
    if value.get("id").is_none() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(GatewayError::decode)
}

#[async_trait]
impl ServiceRequestGateway for HttpServiceRequestGateway {
    async fn list(&self) -> GatewayResult<Vec<TaskDocument>> {
        let response = self.get(self.url("")?).await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode(response).await
    }

    async fn update(
        &self,
        id: &TaskId,
        patch: &ServiceRequestPatch,
    ) -> GatewayResult<Option<TaskDocument>> {
        if RESERVED_SEGMENTS.contains(&id.as_str()) {
            return Err(GatewayError::NotFound(id.clone()));
        }
        let url = self.url(id.as_str())?;
        tracing::debug!(%url, task_id = %id, "PUT service request");
        let response = self
            .client
            .put(url)
            .header("Accept", "application/json")
            .json(patch)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(id.clone())),
            status if status.is_success() => {
                let body = response.bytes().await.map_err(GatewayError::transport)?;
                update_outcome(&body)
            }
            _ => Err(reject(response).await),
        }
    }

    async fn find_by_case_id(&self, case_id: &CaseId) -> GatewayResult<Option<CaseTrackingRecord>> {
        if RESERVED_SEGMENTS.contains(&case_id.as_str()) {
            tracing::debug!(%case_id, "case reference names a route, not a case");
            return Ok(None);
        }
        let response = self.get(self.url(case_id.as_str())?).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => decode(response).await.map(Some),
            _ => Err(reject(response).await),
        }
    }

    async fn list_archived(&self) -> GatewayResult<Vec<TaskDocument>> {
        let response = self.get(self.url("archived")?).await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        decode(response).await
    }
}
