//! Then steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use eyre::eyre;
use rstest_bdd_macros::then;
use sprintdesk::tracker::domain::{SprintStatus, TaskStatus};
use sprintdesk::tracker::ports::TrackerStore;

#[then(r#"the task "{title}" is "{status}""#)]
fn task_status_is(world: &SprintWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;
    if task.status() != expected {
        return Err(eyre!("expected {expected}, found {}", task.status()));
    }
    Ok(())
}

#[then(r#"the rejection reason of "{title}" is "{reason}""#)]
fn rejection_reason_is(
    world: &SprintWorld,
    title: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    if task.rejection_reason() != Some(reason.as_str()) {
        return Err(eyre!(
            "expected reason {reason:?}, found {:?}",
            task.rejection_reason()
        ));
    }
    Ok(())
}

#[then("the developer holds {points:u64} points")]
fn developer_holds(world: &SprintWorld, points: u64) -> Result<(), eyre::Report> {
    let developer = world
        .developer
        .as_ref()
        .ok_or_else(|| eyre!("missing developer in scenario world"))?;
    let stored = run_async(world.store.user(developer.id))?
        .ok_or_else(|| eyre!("developer vanished"))?;
    if stored.total_points != points {
        return Err(eyre!(
            "expected {points} points, found {}",
            stored.total_points
        ));
    }
    Ok(())
}

#[then(r#"the last reply reads "{text}""#)]
fn last_reply_reads(world: &SprintWorld, text: String) -> Result<(), eyre::Report> {
    if world.last_text() != text {
        return Err(eyre!("expected {text:?}, found {:?}", world.last_text()));
    }
    Ok(())
}

#[then("no sprint is active")]
fn no_sprint_active(world: &SprintWorld) -> Result<(), eyre::Report> {
    let active = run_async(world.store.sprints_with_status(SprintStatus::Active))?;
    if !active.is_empty() {
        return Err(eyre!("expected no active sprint, found {}", active.len()));
    }
    Ok(())
}

#[then("{count:usize} sprint is active")]
fn sprints_active(world: &SprintWorld, count: usize) -> Result<(), eyre::Report> {
    let active = run_async(world.store.sprints_with_status(SprintStatus::Active))?;
    if active.len() != count {
        return Err(eyre!("expected {count} active sprints, found {}", active.len()));
    }
    Ok(())
}
