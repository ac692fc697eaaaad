//! Given steps for board BDD scenarios.

use super::world::{BoardWorld, parse_status};
use eyre::WrapErr;
use recovery_board::board::{
    domain::TaskDocument, ports::ManualTaskStore, services::ServerMovePolicy,
};
use rstest_bdd_macros::given;

fn service_request(world: &mut BoardWorld, id: &str, status: &str, approved: bool) -> Result<(), eyre::Report> {
    let document = TaskDocument {
        id: id.to_owned(),
        case_id: Some(format!("DL2024{id}")),
        status: Some(parse_status(status)?.as_str().to_owned()),
        name: Some("Scenario Customer".to_owned()),
        device_type: Some("HDD".to_owned()),
        problem_description: Some("not spinning".to_owned()),
        approved_for_kanban: approved,
        ..TaskDocument::default()
    };
    world
        .gateway
        .insert(document.clone())
        .wrap_err("seed service request")?;
    world.server_documents.push(document);
    Ok(())
}

#[given(r#"an approved service request "{id}" in "{status}""#)]
fn approved_service_request(
    world: &mut BoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    service_request(world, &id, &status, true)
}

#[given(r#"an unapproved service request "{id}" in "{status}""#)]
fn unapproved_service_request(
    world: &mut BoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    service_request(world, &id, &status, false)
}

#[given(r#"a manual task "{id}" in "{status}""#)]
fn manual_task(world: &mut BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let document = TaskDocument {
        id,
        case_id: Some("KB20240001".to_owned()),
        status: Some(parse_status(&status)?.as_str().to_owned()),
        name: Some("Walk In".to_owned()),
        device_type: Some("SSD".to_owned()),
        problem_description: Some("firmware lock".to_owned()),
        approved_for_kanban: true,
        is_manual: true,
        ..TaskDocument::default()
    };
    world.store.append(&document).wrap_err("seed manual task")?;
    Ok(())
}

#[given("an empty board")]
fn empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.mount()
}

#[given(r#"the board uses the "{policy}" move policy"#)]
fn move_policy(world: &mut BoardWorld, policy: String) -> Result<(), eyre::Report> {
    world.move_policy = ServerMovePolicy::try_from(policy.as_str())
        .map_err(|value| eyre::eyre!("unknown move policy {value}"))?;
    Ok(())
}

#[given("the service-request API is unreachable")]
fn api_unreachable(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.gateway.set_offline(true).wrap_err("take gateway offline")?;
    Ok(())
}
