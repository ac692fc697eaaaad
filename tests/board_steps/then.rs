//! Then steps for board BDD scenarios.

use super::world::{BoardWorld, parse_status};
use eyre::WrapErr;
use recovery_board::board::{
    domain::{BoardDomainError, BoardStatus, TaskId},
    services::{BoardError, MoveOutcome},
};
use rstest_bdd_macros::then;

fn column_ids(world: &BoardWorld, status: BoardStatus) -> Result<Vec<String>, eyre::Report> {
    Ok(world
        .controller()?
        .column(status)
        .iter()
        .map(|record| record.id().to_string())
        .collect())
}

#[then(r#"column "{status}" holds "{id}""#)]
fn column_holds(world: &BoardWorld, status: String, id: String) -> Result<(), eyre::Report> {
    let ids = column_ids(world, parse_status(&status)?)?;
    if ids != vec![id.clone()] {
        return Err(eyre::eyre!("expected column {status} to hold [{id}], found {ids:?}"));
    }
    Ok(())
}

#[then(r#"column "{status}" is empty"#)]
fn column_empty(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let ids = column_ids(world, parse_status(&status)?)?;
    if !ids.is_empty() {
        return Err(eyre::eyre!("expected column {status} to be empty, found {ids:?}"));
    }
    Ok(())
}

#[then("the board is empty")]
fn board_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let board = world.controller()?.board();
    if !board.is_empty() {
        return Err(eyre::eyre!("expected an empty board, found {} tasks", board.len()));
    }
    Ok(())
}

#[then(r#"the service-request API received {count:u64} update for "{id}""#)]
fn api_received_updates(world: &BoardWorld, count: u64, id: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).map_err(|err| eyre::eyre!("{err}"))?;
    let updates = world
        .gateway
        .recorded_updates()
        .wrap_err("read recorded updates")?;
    let matching = updates
        .iter()
        .filter(|(updated, _)| updated == &task_id)
        .count();
    if u64::try_from(matching).ok() != Some(count) {
        return Err(eyre::eyre!("expected {count} updates for {task_id}, found {matching}"));
    }
    Ok(())
}

#[then(r#"the creation is rejected naming "{field}""#)]
fn creation_rejected(world: &BoardWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    let Err(BoardError::Domain(BoardDomainError::MissingFields(fields))) = result else {
        return Err(eyre::eyre!("expected a missing-field rejection"));
    };
    if !fields.iter().any(|missing| missing.as_str() == field) {
        return Err(eyre::eyre!("expected {field} among missing fields {fields:?}"));
    }
    Ok(())
}

#[then(r#"the move outcome is "{expected}""#)]
fn move_outcome(world: &BoardWorld, expected: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_move
        .ok_or_else(|| eyre::eyre!("missing move outcome in scenario world"))?;
    let wanted = match expected.as_str() {
        "unchanged" => MoveOutcome::Unchanged,
        "moved" => MoveOutcome::Moved,
        "moved_unsynced" => MoveOutcome::MovedUnsynced,
        "rejected" => MoveOutcome::Rejected,
        other => return Err(eyre::eyre!("unknown move outcome {other}")),
    };
    if outcome != wanted {
        return Err(eyre::eyre!("expected {wanted:?}, found {outcome:?}"));
    }
    Ok(())
}

#[then("the operator was notified {count:u64} time")]
fn operator_notified(world: &BoardWorld, count: u64) -> Result<(), eyre::Report> {
    let notices = world.notifier.notices();
    if u64::try_from(notices.len()).ok() != Some(count) {
        return Err(eyre::eyre!("expected {count} notices, found {notices:?}"));
    }
    Ok(())
}
