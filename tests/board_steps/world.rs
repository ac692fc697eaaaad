//! Shared world state for board BDD scenarios.

use std::sync::Arc;

use recovery_board::board::{
    adapters::memory::{InMemoryManualTaskStore, InMemoryServiceRequestGateway, RecordingNotifier},
    domain::{BoardStatus, TaskDocument, TaskRecord},
    services::{BoardController, BoardError, MoveOutcome, ServerMovePolicy},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Controller type used by the BDD world.
pub type TestController =
    BoardController<InMemoryServiceRequestGateway, InMemoryManualTaskStore, DefaultClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub gateway: InMemoryServiceRequestGateway,
    pub store: InMemoryManualTaskStore,
    pub notifier: RecordingNotifier,
    pub server_documents: Vec<TaskDocument>,
    pub move_policy: ServerMovePolicy,
    pub controller: Option<TestController>,
    pub last_move: Option<MoveOutcome>,
    pub last_create_result: Option<Result<TaskRecord, BoardError>>,
}

impl BoardWorld {
    /// Creates a world with no tasks and the default move policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: InMemoryServiceRequestGateway::new(),
            store: InMemoryManualTaskStore::new(),
            notifier: RecordingNotifier::new(),
            server_documents: Vec::new(),
            move_policy: ServerMovePolicy::default(),
            controller: None,
            last_move: None,
            last_create_result: None,
        }
    }

    /// Builds the controller and mounts it on the scenario's documents.
    pub fn mount(&mut self) -> Result<(), eyre::Report> {
        let mut controller = BoardController::new(
            Arc::new(self.gateway.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.notifier.clone()),
            Arc::new(DefaultClock),
        )
        .with_move_policy(self.move_policy);
        controller
            .mount(self.server_documents.clone())
            .map_err(|err| eyre::eyre!("mount failed: {err}"))?;
        self.controller = Some(controller);
        Ok(())
    }

    /// Returns the mounted controller.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been mounted in scenario world"))
    }

    /// Returns the mounted controller for mutation.
    pub fn controller_mut(&mut self) -> Result<&mut TestController, eyre::Report> {
        self.controller
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board has not been mounted in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a status named in a step.
pub fn parse_status(raw: &str) -> Result<BoardStatus, eyre::Report> {
    BoardStatus::try_from(raw).map_err(|err| eyre::eyre!("{err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
