//! End-to-end tests for the daily report dialog.

use super::helpers::{Chat, chat, last_text};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::CANCEL;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_is_saved_against_the_active_sprint(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let dev = chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;

    let ask_completed = chat.send(2, "📝 Daily report").await;
    let ask_planned = chat.send(2, "Fixed the build").await;
    let ask_blockers = chat.send(2, "Write tests").await;
    let done = chat.send(2, "none").await;

    ensure!(last_text(&ask_completed).contains("completed today"));
    ensure!(last_text(&ask_planned).contains("today's plan"));
    ensure!(last_text(&ask_blockers).contains("blockers"));
    ensure!(last_text(&done) == "✅ Daily report saved.");
    let reports = chat.tracker().recent_daily_reports(5).await?;
    let report = reports.first().ok_or_else(|| eyre!("no report stored"))?;
    let planned = chat.task(tasks.first().ok_or_else(|| eyre!("no task"))?.id()).await?;
    ensure!(report.user_id == dev.id);
    ensure!(Some(report.sprint_id) == planned.sprint_id());
    ensure!(report.completed == "Fixed the build");
    ensure!(report.planned == "Write tests");
    ensure!(report.blockers == "none");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_in_closed_sprints_do_not_count(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;
    chat.send(1, "✅ Finalize sprint").await;

    let replies = chat
        .conversation(2, &["📝 Daily report", "a", "b", "c"])
        .await;

    ensure!(last_text(&replies) == "❌ No active sprint found.");
    ensure!(chat.tracker().recent_daily_reports(5).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelling_midway_stores_nothing(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Fix login bug 3")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;

    chat.conversation(2, &["📝 Daily report", "Fixed the build", CANCEL])
        .await;
    let after = chat.send(2, "none").await;

    ensure!(last_text(&after).starts_with("❓ Invalid option"));
    ensure!(chat.tracker().recent_daily_reports(5).await?.is_empty());
    Ok(())
}
