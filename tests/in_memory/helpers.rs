//! Shared fixtures for in-memory board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use recovery_board::board::{
    adapters::memory::{InMemoryManualTaskStore, InMemoryServiceRequestGateway, RecordingNotifier},
    domain::TaskDocument,
    services::BoardController,
};
use rstest::fixture;

/// Controller wired to in-memory adapters.
pub type MemoryController =
    BoardController<InMemoryServiceRequestGateway, InMemoryManualTaskStore, DefaultClock>;

/// Handles kept by a test alongside the controller.
pub struct Backends {
    pub gateway: InMemoryServiceRequestGateway,
    pub store: InMemoryManualTaskStore,
    pub notifier: RecordingNotifier,
}

impl Backends {
    /// Builds a controller sharing these backends.
    #[must_use]
    pub fn controller(&self) -> MemoryController {
        BoardController::new(
            Arc::new(self.gateway.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.notifier.clone()),
            Arc::new(DefaultClock),
        )
    }
}

/// Builds a service request document.
#[must_use]
pub fn service_request(id: &str, status: &str, approved: bool) -> TaskDocument {
    TaskDocument {
        id: id.to_owned(),
        case_id: Some(format!("DL2024{id:0>4}")),
        status: Some(status.to_owned()),
        name: Some("Dana Lee".to_owned()),
        email: Some("dana@example.com".to_owned()),
        device_type: Some("External HDD".to_owned()),
        problem_description: Some("dropped while spinning".to_owned()),
        urgency: Some("urgent".to_owned()),
        approved_for_kanban: approved,
        ..TaskDocument::default()
    }
}

/// Provides backends seeded with two approved requests and one waiting for
/// approval.
#[fixture]
pub fn backends() -> Backends {
    Backends {
        gateway: InMemoryServiceRequestGateway::with_records(vec![
            service_request("1", "pending", true),
            service_request("2", "in_progress", true),
            service_request("3", "pending", false),
        ]),
        store: InMemoryManualTaskStore::new(),
        notifier: RecordingNotifier::new(),
    }
}
