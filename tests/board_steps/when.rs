//! When steps for board BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use recovery_board::board::domain::{TaskForm, TaskId};
use rstest_bdd_macros::when;

#[when("the board is mounted")]
fn board_mounted(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.mount()
}

#[when(r#"task "{id}" is moved from "{from}" to "{to}""#)]
fn task_moved(
    world: &mut BoardWorld,
    id: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).map_err(|err| eyre::eyre!("{err}"))?;
    let source = parse_status(&from)?;
    let target = parse_status(&to)?;
    let controller = world.controller_mut()?;
    let outcome = run_async(controller.move_task(&task_id, source, target));
    world.last_move = Some(outcome);
    Ok(())
}

#[when("an operator submits a task form without a customer name")]
fn submit_form_without_name(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let form = TaskForm::new("   ", "Laptop", "does not boot");
    let result = world.controller_mut()?.create_manual_task(form);
    world.last_create_result = Some(result);
    Ok(())
}
