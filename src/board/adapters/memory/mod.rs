//! In-memory adapters for tests and local deterministic flows.

mod manual_store;
mod notifier;
mod service_requests;

pub use manual_store::InMemoryManualTaskStore;
pub use notifier::RecordingNotifier;
pub use service_requests::InMemoryServiceRequestGateway;
