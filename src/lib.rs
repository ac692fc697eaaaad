//! Recovery board: status board for data-recovery cases.
//!
//! This crate tracks data-recovery jobs through four status columns. Cases
//! arrive either as service requests approved by the backend or as tasks an
//! operator creates directly on the board; both are shown side by side and
//! each keeps its status in the source that owns it.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: Task records, statuses and board partitioning with no I/O
//! - **Ports**: Traits for the service-request API, the manual task store and
//!   operator notifications
//! - **Adapters**: HTTP, file-backed and in-memory implementations
//!
//! # Modules
//!
//! - [`board`]: Board state, moves, creation and editing
//! - [`tracking`]: Customer-facing case lookup
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
pub mod tracking;
