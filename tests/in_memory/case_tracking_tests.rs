//! Tracking cases end to end over in-memory adapters.

use std::sync::Arc;

use super::helpers::{Backends, backends};
use recovery_board::{
    board::domain::{BoardStatus, TaskForm, Urgency},
    tracking::{CaseStatus, CaseTrackingService},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_task_is_trackable_by_its_case_reference(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    let created = controller
        .create_manual_task(
            TaskForm::new("Alex Kim", "Laptop SSD", "encrypted volume").with_urgency(Urgency::High),
        )
        .expect("task should be created");
    let case_id = created.case_id().expect("manual task has a case id");
    let tracking = CaseTrackingService::new(
        Arc::new(backends.gateway.clone()),
        Arc::new(backends.store.clone()),
    );

    let report = tracking
        .track(case_id.as_str())
        .await
        .expect("case should be tracked");

    assert_eq!(report.status, CaseStatus::Board(BoardStatus::Pending));
    assert_eq!(report.progress, 1);
    let created_on = report.created_on.expect("creation day");
    let estimate = report.estimated_completion.expect("estimate");
    assert_eq!((estimate - created_on).num_days(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn server_case_reflects_board_moves(backends: Backends) {
    let mut controller = backends.controller();
    controller.mount(Vec::new()).expect("mount should succeed");
    controller
        .load_from_gateway()
        .await
        .expect("gateway load should succeed");
    controller
        .move_task(
            &recovery_board::board::domain::TaskId::new("2").expect("valid task id"),
            BoardStatus::InProgress,
            BoardStatus::Completed,
        )
        .await;
    let tracking = CaseTrackingService::new(
        Arc::new(backends.gateway.clone()),
        Arc::new(backends.store.clone()),
    );

    let report = tracking
        .track("DL20240002")
        .await
        .expect("case should be tracked");

    assert_eq!(report.status, CaseStatus::Board(BoardStatus::Completed));
    assert_eq!(report.progress, 100);
}
