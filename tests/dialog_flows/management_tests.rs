//! End-to-end tests for sprint closure, report commands and user management.

use super::helpers::{Chat, button_data, chat, last_text};
use chrono::NaiveDate;
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use sprintdesk::access::Role;
use sprintdesk::dialog::domain::PromotionButton;
use sprintdesk::tracker::domain::{NewSprint, NewSprintReview, SprintStatus};
use sprintdesk::tracker::ports::{Change, TrackerStore, UnitOfWork};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finalizing_closes_every_active_sprint_with_a_retrospective(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    chat.join(3, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2\nTask B 3")
        .await?;
    let (first, second) = tasks.split_at(1);
    chat.plan(2, "Apollo", first).await;
    chat.plan(3, "Apollo", second).await;
    let active = chat.store.sprints_with_status(SprintStatus::Active).await?;

    let replies = chat.send(1, "✅ Finalize sprint").await;

    ensure!(active.len() == 2);
    ensure!(last_text(&replies) == "✅ 2 active sprints closed and retrospectives recorded.");
    ensure!(
        chat.store
            .sprints_with_status(SprintStatus::Active)
            .await?
            .is_empty()
    );
    for sprint in &active {
        let closed = chat
            .store
            .sprint(sprint.id)
            .await?
            .ok_or_else(|| eyre::eyre!("sprint {} vanished", sprint.id))?;
        ensure!(closed.status == SprintStatus::Completed);
        ensure!(closed.end_date.is_some());
        let retrospectives = chat.store.retrospectives(sprint.id).await?;
        ensure!(retrospectives.len() == 1);
        ensure!(retrospectives.iter().all(|retro| retro.held_by == po.id));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finalizing_without_active_sprints_says_so(chat: Chat) -> Result<()> {
    chat.join(1, Role::ProductOwner).await?;

    let replies = chat.send(1, "✅ Finalize sprint").await;

    ensure!(last_text(&replies) == "❌ There is no active sprint.");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_commands_are_gated_by_role(chat: Chat) -> Result<()> {
    chat.join(2, Role::Developer).await?;

    let replies = chat.send(2, "/view_daily_reports").await;

    ensure!(last_text(&replies).starts_with("⛔️"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn product_owners_read_recent_daily_reports(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    chat.join(2, Role::Developer).await?;
    let tasks = chat
        .project_with_backlog((1, &po), "Apollo", "Task A 2")
        .await?;
    chat.plan(2, "Apollo", &tasks).await;
    chat.conversation(2, &["📝 Daily report", "Fixed bug", "Write docs", "none"])
        .await;

    let replies = chat.send(1, "/view_daily_reports").await;
    let reviews = chat.send(1, "/view_sprint_reviews").await;

    ensure!(replies.len() == 2, "{replies:?}");
    let report = replies.first().map_or("", |reply| reply.text.as_str());
    ensure!(report.contains("✅ Completed: Fixed bug"));
    ensure!(report.contains("📌 Planned: Write docs"));
    ensure!(last_text(&replies) == "✅ End of daily reports.");
    ensure!(last_text(&reviews) == "❌ No sprint reviews yet.");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_sprint_reviews_are_listed_newest_first(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let day = |d: u32| NaiveDate::from_ymd_opt(2026, 3, d).ok_or_else(|| eyre!("bad day {d}"));
    let sprint = chat
        .store
        .commit(UnitOfWork::single(Change::PlanSprint {
            sprint: NewSprint::active(po.id, day(1)?),
            tasks: Vec::new(),
        }))
        .await?
        .sprint()
        .ok_or_else(|| eyre!("no sprint opened"))?;
    let mut unit = Vec::new();
    for d in 1..=6 {
        let notes = format!("Review {d}");
        let share = f64::from(d * 10);
        unit.push(Change::InsertSprintReview(NewSprintReview::new(
            sprint,
            po.id,
            day(d)?,
            notes,
            share,
        )?));
    }
    chat.store.commit(unit.into_iter().collect()).await?;

    let replies = chat.send(1, "/view_sprint_reviews").await;

    let texts: Vec<&str> = replies.iter().map(|reply| reply.text.as_str()).collect();
    ensure!(texts.len() == 6, "five reviews and a footer: {texts:?}");
    let newest = texts.first().copied().unwrap_or_default();
    ensure!(newest.contains("🗓️ Date: 2026-03-06"), "{newest}");
    ensure!(newest.contains("📄 Notes: Review 6"));
    ensure!(newest.contains("📊 Completed: 60.0%"));
    ensure!(texts.iter().all(|text| !text.contains("Review 1")));
    ensure!(last_text(&replies) == "✅ End of sprint reviews.");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manage_users_lists_promotable_staff(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let dev = chat.join(2, Role::Developer).await?;
    let ceo = chat.join(9, Role::Ceo).await?;

    let replies = chat.send(9, "👥 Manage users").await;

    let buttons = button_data(&replies);
    ensure!(replies.len() == 2);
    ensure!(buttons.contains(&PromotionButton::Candidate(po.id).data().as_str()));
    ensure!(buttons.contains(&PromotionButton::Candidate(dev.id).data().as_str()));
    ensure!(!buttons.contains(&PromotionButton::Candidate(ceo.id).data().as_str()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developers_are_promoted_immediately(chat: Chat) -> Result<()> {
    let dev = chat.join(2, Role::Developer).await?;
    chat.join(9, Role::Ceo).await?;

    let replies = chat
        .press(9, &PromotionButton::Candidate(dev.id).data())
        .await;

    ensure!(last_text(&replies) == "✅ User 2 promoted to product owner.");
    ensure!(chat.reload(&dev).await?.role == Role::ProductOwner);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_ceo_handover_swaps_roles(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let ceo = chat.join(9, Role::Ceo).await?;

    let asked = chat
        .press(9, &PromotionButton::Candidate(po.id).data())
        .await;
    ensure!(chat.reload(&po).await?.role == Role::ProductOwner);
    let confirmed = chat.press(9, &PromotionButton::Confirm.data()).await;

    ensure!(last_text(&asked) == "❓ Promote User 1 to CEO? This will demote you.");
    ensure!(
        button_data(&asked)
            == vec![
                PromotionButton::Confirm.data().as_str(),
                PromotionButton::Cancel.data().as_str()
            ]
    );
    ensure!(last_text(&confirmed) == "👑 User 1 is the new CEO.");
    ensure!(chat.reload(&po).await?.role == Role::Ceo);
    ensure!(chat.reload(&ceo).await?.role == Role::ProductOwner);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_handover_changes_nothing(chat: Chat) -> Result<()> {
    let po = chat.join(1, Role::ProductOwner).await?;
    let ceo = chat.join(9, Role::Ceo).await?;

    chat.press(9, &PromotionButton::Candidate(po.id).data())
        .await;
    let cancelled = chat.press(9, &PromotionButton::Cancel.data()).await;
    let late = chat.press(9, &PromotionButton::Confirm.data()).await;

    ensure!(last_text(&cancelled) == "❌ Promotion cancelled.");
    ensure!(last_text(&late) == "❌ No promotion is pending.");
    ensure!(chat.reload(&po).await?.role == Role::ProductOwner);
    ensure!(chat.reload(&ceo).await?.role == Role::Ceo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_ceo_may_promote(chat: Chat) -> Result<()> {
    let dev = chat.join(2, Role::Developer).await?;
    chat.join(1, Role::ProductOwner).await?;

    let replies = chat
        .press(1, &PromotionButton::Candidate(dev.id).data())
        .await;

    ensure!(last_text(&replies).starts_with("⛔️"));
    ensure!(chat.reload(&dev).await?.role == Role::Developer);
    Ok(())
}
