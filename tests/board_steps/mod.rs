//! Step definitions for board behaviour scenarios.

mod given;
mod then;
mod when;
pub mod world;
