//! End-to-end tests for backlog import.

use super::helpers::{Chat, chat, last_labels, last_text};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::CANCEL;
use sprintdesk::tracker::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_lines_are_skipped_and_counted_out(chat: Chat) -> Result<()> {
    chat.join(1, Role::ProductOwner).await?;
    chat.conversation(1, &["➕ Add project", "Apollo"]).await;

    let replies = chat
        .conversation(1, &["🗂 Add backlog tasks", "Apollo", "Fix login bug 3\nbad line"])
        .await;

    ensure!(last_text(&replies) == "✅ 1 tasks added to the backlog.");
    let tasks = chat.all_tasks().await?;
    let task = tasks.first().ok_or_else(|| eyre!("no task created"))?;
    ensure!(tasks.len() == 1);
    ensure!(task.title() == "Fix login bug");
    ensure!(task.story_points() == Some(3));
    ensure!(task.status() == TaskStatus::Backlog);
    ensure!(task.sprint_id().is_none());
    ensure!(task.assignee().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_own_projects_are_offered(chat: Chat) -> Result<()> {
    chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::ProductOwner).await?;
    chat.conversation(1, &["➕ Add project", "Apollo"]).await;
    chat.conversation(2, &["➕ Add project", "Gemini"]).await;

    let replies = chat.send(1, "🗂 Add backlog tasks").await;
    let foreign = chat.send(1, "Gemini").await;

    ensure!(last_labels(&replies) == vec!["Apollo", CANCEL]);
    ensure!(last_text(&foreign) == "❌ Invalid project.");
    ensure!(chat.all_tasks().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_names_get_distinct_labels(chat: Chat) -> Result<()> {
    chat.join(1, Role::ProductOwner).await?;
    chat.conversation(1, &["➕ Add project", "Apollo"]).await;
    chat.conversation(1, &["➕ Add project", "Apollo"]).await;

    let replies = chat.send(1, "🗂 Add backlog tasks").await;

    let labels = last_labels(&replies);
    ensure!(labels.len() == 3, "{labels:?}");
    ensure!(labels.iter().filter(|label| label.starts_with("Apollo #")).count() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_without_projects_are_told_so(chat: Chat) -> Result<()> {
    chat.join(1, Role::ProductOwner).await?;

    let replies = chat.send(1, "🗂 Add backlog tasks").await;

    ensure!(last_text(&replies) == "❌ You have no projects.");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developers_cannot_import(chat: Chat) -> Result<()> {
    chat.join(2, Role::Developer).await?;

    let replies = chat.send(2, "🗂 Add backlog tasks").await;

    ensure!(last_text(&replies).starts_with("⛔️"));
    Ok(())
}
