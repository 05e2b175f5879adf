//! End-to-end tests for reviewing submitted tasks.

use super::helpers::{Chat, chat, last_labels, last_text};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::{APPROVE, CANCEL, REJECT};
use sprintdesk::tracker::domain::{Task, TaskStatus, User};
use sprintdesk::tracker::ports::{Change, TrackerStore, UnitOfWork};

/// Drives one task of developer 2 into review and returns it with its
/// assignee.
async fn submitted_task(chat: &Chat) -> Result<(User, Task)> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let dev = chat.join(2, Role::Developer).await?;
    chat.join(3, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;
    let task = tasks.first().ok_or_else(|| eyre!("no backlog task"))?;
    let label = task.label();
    chat.conversation(2, &["▶️ Start task", &label]).await;
    chat.conversation(2, &["📤 Submit for review", &label]).await;
    let submitted = chat.task(task.id()).await?;
    ensure!(submitted.status() == TaskStatus::InReview);
    Ok((dev, submitted))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_completes_the_task_and_credits_points(chat: Chat) -> Result<()> {
    let (dev, task) = submitted_task(&chat).await?;
    chat.store
        .commit(UnitOfWork::single(Change::AwardPoints {
            user: dev.id,
            points: 10,
        }))
        .await?;

    let offered = chat.send(3, "🧐 Review tasks").await;
    let card = chat.send(3, &task.label()).await;
    let approved = chat.send(3, APPROVE).await;

    ensure!(last_labels(&offered) == vec![task.label().as_str(), CANCEL]);
    ensure!(last_text(&card).contains("Fix login bug"));
    ensure!(last_labels(&card) == vec![APPROVE, REJECT, CANCEL]);
    ensure!(last_text(&approved) == "✅ Task approved and 3 points added.");
    let reviewed = chat.task(task.id()).await?;
    ensure!(reviewed.status() == TaskStatus::Completed);
    ensure!(reviewed.reviewed());
    ensure!(chat.reload(&dev).await?.total_points == 13);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_returns_the_task_with_a_reason(chat: Chat) -> Result<()> {
    let (dev, task) = submitted_task(&chat).await?;

    chat.conversation(3, &["🧐 Review tasks", &task.label(), REJECT])
        .await;
    let blank = chat.send(3, "   ").await;
    let rejected = chat.send(3, "Missing tests").await;

    ensure!(last_text(&blank) == "❌ A reason is required.");
    ensure!(last_text(&rejected) == "✅ Task rejected and reason recorded.");
    let returned = chat.task(task.id()).await?;
    ensure!(returned.status() == TaskStatus::InProgress);
    ensure!(returned.rejection_reason() == Some("Missing tests"));
    ensure!(!returned.reviewed());
    ensure!(chat.reload(&dev).await?.total_points == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn own_submissions_are_not_offered(chat: Chat) -> Result<()> {
    submitted_task(&chat).await?;

    let replies = chat.send(2, "🧐 Review tasks").await;

    ensure!(last_text(&replies) == "❌ No tasks are awaiting review.");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrecognised_decisions_prompt_again(chat: Chat) -> Result<()> {
    let (_, task) = submitted_task(&chat).await?;

    chat.conversation(3, &["🧐 Review tasks", &task.label()])
        .await;
    let replies = chat.send(3, "maybe").await;
    let approved = chat.send(3, APPROVE).await;

    ensure!(last_text(&replies) == "Please choose Approve or Reject.");
    ensure!(last_labels(&replies) == vec![APPROVE, REJECT, CANCEL]);
    ensure!(last_text(&approved).starts_with("✅ Task approved"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_reviewed_by_someone_else_meanwhile_are_stale(chat: Chat) -> Result<()> {
    let (_, task) = submitted_task(&chat).await?;
    chat.join(4, Role::Developer).await?;

    chat.conversation(3, &["🧐 Review tasks", &task.label()])
        .await;
    chat.conversation(4, &["🧐 Review tasks", &task.label(), APPROVE])
        .await;
    let replies = chat.send(3, REJECT).await;
    let stale = chat.send(3, "Too late").await;

    ensure!(last_text(&replies) == "✍️ Enter the reason for rejection:");
    ensure!(last_text(&stale) == "❌ The selected item no longer exists.");
    ensure!(chat.task(task.id()).await?.status() == TaskStatus::Completed);
    Ok(())
}
