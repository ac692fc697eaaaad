//! Status board for data-recovery cases.
//!
//! The board shows service requests approved by the backend alongside tasks
//! created by operators directly on the board, grouped into four status
//! columns. Moving a card persists the new status to whichever source owns
//! the record. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
