//! Port contracts for the status board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod manual_store;
pub mod notifier;
pub mod service_requests;

pub use manual_store::{ManualStoreError, ManualStoreResult, ManualTaskStore};
pub use notifier::{Notice, NoticeSeverity, OperatorNotifier};
pub use service_requests::{
    CaseTrackingRecord, GatewayError, GatewayResult, ServiceRequestGateway, ServiceRequestPatch,
};
