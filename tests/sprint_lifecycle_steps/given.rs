//! Given steps for sprint lifecycle BDD scenarios.

use super::world::{DEVELOPER, PRODUCT_OWNER, REVIEWER, SprintWorld, run_async};
use eyre::{Result, WrapErr, eyre};
use rstest_bdd_macros::given;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::DONE;
use sprintdesk::tracker::domain::{ExternalUserId, TaskStatus, User};
use sprintdesk::tracker::ports::{Change, TaskFilter, TrackerStore, UnitOfWork};

fn join(world: &mut SprintWorld, external_id: i64, role: Role) -> Result<User> {
    world.say(external_id, &["/start"]);
    let mut user = run_async(
        world
            .store
            .user_by_external_id(ExternalUserId::new(external_id)),
    )?
    .ok_or_else(|| eyre!("user {external_id} was not registered"))?;
    if user.role != role {
        run_async(world.store.commit(UnitOfWork::single(Change::SetRole {
            user: user.id,
            expected: user.role,
            role,
        })))
        .wrap_err("assign scenario role")?;
        user.role = role;
    }
    Ok(user)
}

#[given(r#"a product owner with project "{project}" holding backlog "{line}""#)]
fn product_owner_with_backlog(
    world: &mut SprintWorld,
    project: String,
    line: String,
) -> Result<(), eyre::Report> {
    join(world, PRODUCT_OWNER, Role::ProductOwner)?;
    world.say(PRODUCT_OWNER, &["➕ Add project", &project]);
    world.say(PRODUCT_OWNER, &["🗂 Add backlog tasks", &project, &line]);
    if !world.last_text().starts_with("✅") {
        return Err(eyre!("backlog import failed: {}", world.last_text()));
    }
    Ok(())
}

#[given("a developer holding {points:u32} points")]
fn developer_with_points(world: &mut SprintWorld, points: u32) -> Result<(), eyre::Report> {
    let developer = join(world, DEVELOPER, Role::Developer)?;
    join(world, REVIEWER, Role::Developer)?;
    run_async(world.store.commit(UnitOfWork::single(Change::AwardPoints {
        user: developer.id,
        points,
    })))
    .wrap_err("seed developer points")?;
    world.developer = Some(developer);
    Ok(())
}

#[given("the developer has planned the whole backlog into a sprint")]
fn developer_planned_backlog(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    let backlog = run_async(
        world
            .store
            .tasks(TaskFilter::new().with_status(TaskStatus::Backlog)),
    )?;
    let project = backlog
        .first()
        .map(|task| task.project_id())
        .ok_or_else(|| eyre!("backlog is empty"))?;
    let project_name = run_async(world.store.project(project))?
        .map(|found| found.name)
        .ok_or_else(|| eyre!("project {project} vanished"))?;
    world.say(DEVELOPER, &["🚀 Plan sprint", &project_name]);
    for task in &backlog {
        let label = format!(
            "{} ({})",
            task.label(),
            task.story_points().unwrap_or_default()
        );
        world.say(DEVELOPER, &[&label]);
    }
    world.say(DEVELOPER, &[DONE]);
    if !world.last_text().starts_with("✅") {
        return Err(eyre!("sprint planning failed: {}", world.last_text()));
    }
    Ok(())
}

#[given(r#"the developer has started and submitted "{title}""#)]
fn developer_submitted(world: &mut SprintWorld, title: String) -> Result<(), eyre::Report> {
    let label = world.task_titled(&title)?.label();
    world.say(DEVELOPER, &["▶️ Start task", &label]);
    world.say(DEVELOPER, &["📤 Submit for review", &label]);
    let task = world.task_titled(&title)?;
    if task.status() != TaskStatus::InReview {
        return Err(eyre!("expected {title} in review, found {}", task.status()));
    }
    Ok(())
}
