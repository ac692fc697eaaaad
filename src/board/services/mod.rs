//! Application services for board orchestration.

mod controller;

pub use controller::{BoardController, BoardError, BoardResult, MoveOutcome, ServerMovePolicy};
