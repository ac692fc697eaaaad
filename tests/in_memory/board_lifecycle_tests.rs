//! End-to-end board flows over in-memory adapters.

use super::helpers::{Backends, backends};
use recovery_board::board::{
    domain::{BoardStatus, HorizontalDirection, TaskForm, TaskId, Urgency},
    ports::ManualTaskStore,
    services::MoveOutcome,
};
use rstest::rstest;

fn task_id(raw: &str) -> TaskId {
    TaskId::new(raw).expect("valid task id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_loads_only_approved_requests(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");

    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");

    assert_eq!(controller.board().len(), 2);
    assert!(!controller.board().contains(&task_id("3")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_walks_every_column_and_persists_each_step(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");
    let id = task_id("1");

    for current in [BoardStatus::Pending, BoardStatus::InProgress, BoardStatus::Completed] {
        let outcome = controller
            .move_adjacent(&id, current, HorizontalDirection::Right)
            .await;
        assert_eq!(outcome, MoveOutcome::Moved);
    }
    let beyond = controller
        .move_adjacent(&id, BoardStatus::PickedUp, HorizontalDirection::Right)
        .await;

    assert_eq!(beyond, MoveOutcome::Unchanged);
    let remote = backends
        .gateway
        .record(&id)
        .expect("gateway readable")
        .expect("record exists");
    assert_eq!(remote.status.as_deref(), Some("picked_up"));
    assert_eq!(
        backends.gateway.recorded_updates().expect("updates readable").len(),
        3
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approving_a_request_adds_it_to_pending(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");

    controller
        .approve_for_board(&task_id("3"))
        .await
        .expect("approval should succeed")
        .expect("request should be known");
    controller
        .load_from_gateway()
        .await
        .expect("gateway reload should succeed");

    let pending = controller.board().find_in(BoardStatus::Pending, &task_id("3"));
    assert!(pending.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_tasks_survive_a_server_refresh(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    let created = controller
        .create_manual_task(
            TaskForm::new("Sam Ortiz", "SD card", "corrupted photos")
                .with_phone("555-0100")
                .with_urgency(Urgency::Low)
                .with_price(80.0),
        )
        .expect("task should be created");
    controller
        .move_task(created.id(), BoardStatus::Pending, BoardStatus::InProgress)
        .await;

    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");

    let record = controller
        .board()
        .find_in(BoardStatus::InProgress, created.id())
        .expect("manual task should stay in progress");
    assert!(record.started_at().is_some());
    let stored = backends.store.load().expect("store readable");
    assert_eq!(stored.len(), 1);
    assert!(backends.gateway.recorded_updates().expect("updates readable").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_server_edit_leaves_record_untouched(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");
    let before = controller
        .board()
        .find(&task_id("2"))
        .cloned()
        .expect("record on board");
    backends.gateway.set_offline(true).expect("toggle offline");

    let result = controller
        .edit_task(
            &task_id("2"),
            TaskForm::new("Dana Lee", "External HDD", "now also wet"),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(controller.board().find(&task_id("2")), Some(&before));
    assert_eq!(backends.notifier.notices().len(), 1);
}
