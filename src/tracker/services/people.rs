//! User management: listing staff and role promotions.

use super::lifecycle::{LifecycleError, LifecycleResult, TrackerService};
use crate::access::{Action, Role, authorize};
use crate::tracker::{
    domain::{RecordRef, TrackerDomainError, User, UserId},
    ports::{Change, TrackerStore, UnitOfWork},
};
use mockable::Clock;
use tracing::info;

/// Outcome of a promotion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// The developer was promoted to product owner.
    Promoted(User),
    /// The product owner can only become CEO through an explicit handover.
    NeedsConfirmation(User),
}

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    /// Lists developers and product owners, the users a CEO may promote.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn manageable_users(&self) -> LifecycleResult<Vec<User>> {
        Ok(self
            .store
            .users_with_roles(&[Role::Developer, Role::ProductOwner])
            .await?)
    }

    /// Promotes `target` one step.
    ///
    /// Developers become product owners immediately. Product owners are
    /// returned for confirmation of a CEO handover.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] unless `actor` is CEO,
    /// [`LifecycleError::NotFound`] for a stale id,
    /// [`LifecycleError::Domain`] when the target is the actor or already
    /// CEO, or [`LifecycleError::Store`] when the commit fails.
    pub async fn promote(&self, actor: &User, target: UserId) -> LifecycleResult<Promotion> {
        authorize(actor.role, Action::ManageUsers)?;
        let mut user = self.promotable_user(actor, target).await?;
        match user.role {
            Role::Developer => {
                self.store
                    .commit(UnitOfWork::single(Change::SetRole {
                        user: user.id,
                        expected: Role::Developer,
                        role: Role::ProductOwner,
                    }))
                    .await?;
                user.role = Role::ProductOwner;
                info!(user_id = %user.id, by = %actor.id, "promoted developer to product owner");
                Ok(Promotion::Promoted(user))
            }
            Role::ProductOwner => Ok(Promotion::NeedsConfirmation(user)),
            Role::Ceo => Err(TrackerDomainError::InvalidPromotion {
                user_id: user.id,
                role: user.role,
            }
            .into()),
        }
    }

    /// Hands the CEO role to `candidate`, demoting `actor` to product owner
    /// in the same commit.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] unless `actor` is CEO,
    /// [`LifecycleError::NotFound`] for a stale id,
    /// [`LifecycleError::Domain`] unless the candidate is a product owner
    /// other than the actor, or [`LifecycleError::Store`] when either role
    /// changed concurrently.
    pub async fn confirm_ceo_promotion(
        &self,
        actor: &User,
        candidate: UserId,
    ) -> LifecycleResult<User> {
        authorize(actor.role, Action::ApprovePromotion)?;
        let mut user = self.promotable_user(actor, candidate).await?;
        if user.role != Role::ProductOwner {
            return Err(TrackerDomainError::InvalidPromotion {
                user_id: user.id,
                role: user.role,
            }
            .into());
        }
        let unit = UnitOfWork::single(Change::SetRole {
            user: actor.id,
            expected: Role::Ceo,
            role: Role::ProductOwner,
        })
        .with(Change::SetRole {
            user: user.id,
            expected: Role::ProductOwner,
            role: Role::Ceo,
        });
        self.store.commit(unit).await?;
        user.role = Role::Ceo;
        info!(new_ceo = %user.id, previous_ceo = %actor.id, "CEO role handed over");
        Ok(user)
    }

    async fn promotable_user(&self, actor: &User, target: UserId) -> LifecycleResult<User> {
        let user = self
            .store
            .user(target)
            .await?
            .ok_or(LifecycleError::NotFound(RecordRef::User(target)))?;
        if user.id == actor.id {
            return Err(TrackerDomainError::InvalidPromotion {
                user_id: user.id,
                role: user.role,
            }
            .into());
        }
        Ok(user)
    }
}
