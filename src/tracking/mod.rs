//! Public case tracking.
//!
//! Customers look up a case by its reference. References in the manual board
//! namespace are answered from the manual task store; every other reference
//! is answered by the service-request API, falling back to its archive.

mod domain;
mod service;

pub use domain::{CaseReport, CaseStatus, estimate_completion};
pub use service::{CaseTrackingService, TrackingError};

#[cfg(test)]
mod tests;
