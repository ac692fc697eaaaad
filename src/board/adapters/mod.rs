//! Adapter implementations of the board ports.

pub mod file_store;
pub mod http;
pub mod memory;
pub mod tracing_notifier;

pub use file_store::FileManualTaskStore;
pub use http::HttpServiceRequestGateway;
pub use tracing_notifier::TracingNotifier;
