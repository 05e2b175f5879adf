//! Button-driven promotion exchange of the CEO.

use crate::access::Role;
use crate::dialog::domain::{Button, DialogPosition, Keyboard, PromotionButton, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::PROMOTION_CANDIDATE,
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{domain::User, ports::TrackerStore, services::Promotion};
use mockable::Clock;
use tracing::debug;

fn confirmation_keyboard() -> Keyboard {
    Keyboard::Inline(vec![vec![
        Button::new("✅ Confirm", PromotionButton::Confirm.data()),
        Button::new("❌ Cancel", PromotionButton::Cancel.data()),
    ]])
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    /// Handles an inline button press.
    pub(crate) async fn press(
        &self,
        user: &User,
        session: &mut SessionData,
        data: &str,
    ) -> DialogResult<Step> {
        let Some(button) = PromotionButton::parse(data) else {
            debug!(user_id = %user.id, data, "unknown button");
            return Ok(Step::finish(home(user.role, texts::INVALID_OPTION)));
        };
        match button {
            PromotionButton::Candidate(target) => {
                session.clear();
                match self.tracker.promote(user, target).await? {
                    Promotion::Promoted(promoted) => Ok(Step::finish(home(
                        user.role,
                        format!("✅ {} promoted to product owner.", promoted.name),
                    ))),
                    Promotion::NeedsConfirmation(candidate) => {
                        session.set(PROMOTION_CANDIDATE, &candidate.id)?;
                        Ok(Step::goto(
                            DialogPosition::PromotionConfirm,
                            Reply::with_keyboard(
                                format!(
                                    "❓ Promote {} to CEO? This will demote you.",
                                    candidate.name
                                ),
                                confirmation_keyboard(),
                            ),
                        ))
                    }
                }
            }
            PromotionButton::Confirm => {
                let Some(candidate) = session.get(PROMOTION_CANDIDATE)? else {
                    return Ok(Step::finish(home(user.role, texts::NO_PENDING_PROMOTION)));
                };
                let new_ceo = self.tracker.confirm_ceo_promotion(user, candidate).await?;
                Ok(Step::finish(home(
                    Role::ProductOwner,
                    format!("👑 {} is the new CEO.", new_ceo.name),
                )))
            }
            PromotionButton::Cancel => {
                session.remove(PROMOTION_CANDIDATE);
                Ok(Step::finish(home(user.role, texts::PROMOTION_CANCELLED)))
            }
        }
    }
}
