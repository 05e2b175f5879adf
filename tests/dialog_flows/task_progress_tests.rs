//! End-to-end tests for starting tasks and submitting them for review.

use super::helpers::{Chat, chat, last_labels, last_text};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::CANCEL;
use sprintdesk::tracker::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_tasks_move_through_start_and_submit(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3\nWrite docs 1")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;
    let task = tasks.first().ok_or_else(|| eyre!("no task"))?;

    let offered = chat.send(2, "▶️ Start task").await;
    ensure!(last_labels(&offered).contains(&task.label().as_str()));
    ensure!(last_labels(&offered).last() == Some(&CANCEL));
    let started = chat.send(2, &task.label()).await;
    ensure!(last_text(&started) == "✅ Task 'Fix login bug' started.");
    ensure!(chat.task(task.id()).await?.status() == TaskStatus::InProgress);

    let offered_for_review = chat.send(2, "📤 Submit for review").await;
    ensure!(last_labels(&offered_for_review) == vec![task.label().as_str(), CANCEL]);
    let submitted = chat.send(2, &task.label()).await;
    ensure!(last_text(&submitted) == "✅ Task 'Fix login bug' submitted for review.");
    ensure!(chat.task(task.id()).await?.status() == TaskStatus::InReview);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nothing_to_submit_ends_immediately(chat: Chat) -> Result<()> {
    chat.join(2, Role::Developer).await?;

    let replies = chat.send(2, "📤 Submit for review").await;
    let after = chat.send(2, "1: Anything").await;

    ensure!(last_text(&replies) == "❌ You have no tasks in progress.");
    ensure!(last_text(&after).starts_with("❓ Invalid option"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_own_tasks_are_offered(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    chat.join(3, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;

    let replies = chat.send(3, "▶️ Start task").await;

    ensure!(last_text(&replies) == "❌ You have no tasks to start.");
    Ok(())
}
