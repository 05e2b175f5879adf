//! When steps for sprint lifecycle BDD scenarios.

use super::world::{DEVELOPER, PRODUCT_OWNER, REVIEWER, SprintWorld};
use rstest_bdd_macros::when;
use sprintdesk::dialog::domain::{APPROVE, REJECT};

#[when(r#"a reviewer approves "{title}""#)]
fn reviewer_approves(world: &mut SprintWorld, title: String) -> Result<(), eyre::Report> {
    let label = world.task_titled(&title)?.label();
    world.say(REVIEWER, &["🧐 Review tasks", &label, APPROVE]);
    Ok(())
}

#[when(r#"a reviewer rejects "{title}" because "{reason}""#)]
fn reviewer_rejects(
    world: &mut SprintWorld,
    title: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let label = world.task_titled(&title)?.label();
    world.say(REVIEWER, &["🧐 Review tasks", &label, REJECT, &reason]);
    Ok(())
}

#[when("the product owner finalizes sprints")]
fn product_owner_finalizes(world: &mut SprintWorld) {
    world.say(PRODUCT_OWNER, &["✅ Finalize sprint"]);
}

#[when("the developer finalizes sprints")]
fn developer_finalizes(world: &mut SprintWorld) {
    world.say(DEVELOPER, &["✅ Finalize sprint"]);
}
