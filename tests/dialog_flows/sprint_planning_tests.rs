//! End-to-end tests for sprint creation from the backlog.

use super::helpers::{Chat, chat, last_labels, last_text, planning_label};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::{CHANGE_PROJECT, DONE};
use sprintdesk::tracker::domain::{SprintStatus, TaskStatus};
use sprintdesk::tracker::ports::TrackerStore;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn selected_tasks_join_one_new_sprint(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let dev = chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2\nTask B 3\nTask C 1")
        .await?;
    let [a, b, c] = tasks.as_slice() else {
        eyre::bail!("expected three backlog tasks, got {}", tasks.len());
    };

    let replies = chat.plan(2, "Apollo", &[a.clone(), b.clone()]).await;

    ensure!(last_text(&replies).starts_with("✅ 2 tasks added to sprint"));
    let sprints = chat.store.sprints_with_status(SprintStatus::Active).await?;
    let sprint = sprints.first().ok_or_else(|| eyre!("no active sprint"))?;
    ensure!(sprints.len() == 1);
    ensure!(sprint.created_by == dev.id);
    for id in [a.id(), b.id()] {
        let task = chat.task(id).await?;
        ensure!(task.sprint_id() == Some(sprint.id));
        ensure!(task.status() == TaskStatus::NotStarted);
        ensure!(task.assignee() == Some(dev.id));
    }
    let untouched = chat.task(c.id()).await?;
    ensure!(untouched.status() == TaskStatus::Backlog);
    ensure!(untouched.sprint_id().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_and_unknown_labels_keep_the_selection(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2\nTask B 3")
        .await?;
    let first = tasks.first().ok_or_else(|| eyre!("no task"))?;
    let label = planning_label(first);

    let keyboard = chat.conversation(2, &["🚀 Plan sprint", "Apollo"]).await;
    let added = chat.send(2, &label).await;
    let duplicate = chat.send(2, &label).await;
    let unknown = chat.send(2, "42: Nope (1)").await;
    let done = chat.send(2, DONE).await;

    ensure!(last_labels(&keyboard).contains(&DONE));
    ensure!(last_labels(&keyboard).contains(&CHANGE_PROJECT));
    ensure!(last_text(&added).contains("added; press Done"));
    ensure!(last_text(&duplicate) == "❌ Invalid or duplicate task.");
    ensure!(last_text(&unknown) == "❌ Invalid or duplicate task.");
    ensure!(last_text(&done).starts_with("✅ 1 tasks added to sprint"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_selection_creates_no_sprint(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    chat.project_with_backlog((1, &po), "Apollo", "Task A 2")
        .await?;

    let replies = chat.conversation(2, &["🚀 Plan sprint", "Apollo", "DONE"]).await;

    ensure!(last_text(&replies) == "❌ No tasks selected.");
    ensure!(
        chat.store
            .sprints_with_status(SprintStatus::Active)
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_project_returns_to_project_selection(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let apollo = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2")
        .await?;
    let gemini = chat
        .project_with_backlog((1, &po), "Gemini", "Task G 5")
        .await?;
    let picked = gemini.first().ok_or_else(|| eyre!("no task"))?;
    let dropped = apollo.first().ok_or_else(|| eyre!("no task"))?;

    chat.conversation(2, &["🚀 Plan sprint", "Apollo"]).await;
    chat.send(2, &planning_label(dropped)).await;
    let projects = chat.send(2, CHANGE_PROJECT).await;
    chat.send(2, "Gemini").await;
    chat.send(2, &planning_label(picked)).await;
    chat.send(2, "done").await;

    ensure!(last_labels(&projects).contains(&"Apollo"));
    ensure!(last_labels(&projects).contains(&"Gemini"));
    ensure!(chat.task(picked.id()).await?.status() == TaskStatus::NotStarted);
    ensure!(chat.task(dropped.id()).await?.status() == TaskStatus::Backlog);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_taken_by_someone_else_abort_the_sprint(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    chat.join(3, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2\nTask B 3")
        .await?;
    let [a, b] = tasks.as_slice() else {
        eyre::bail!("expected two backlog tasks, got {}", tasks.len());
    };

    chat.conversation(2, &["🚀 Plan sprint", "Apollo"]).await;
    chat.send(2, &planning_label(a)).await;
    chat.send(2, &planning_label(b)).await;
    chat.plan(3, "Apollo", std::slice::from_ref(a)).await;
    let replies = chat.send(2, "done").await;

    ensure!(last_text(&replies) == "❌ The selected item no longer exists.");
    ensure!(chat.task(b.id()).await?.status() == TaskStatus::Backlog);
    ensure!(
        chat.store
            .sprints_with_status(SprintStatus::Active)
            .await?
            .len()
            == 1
    );
    Ok(())
}
