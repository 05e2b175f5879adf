//! Registered users.

use super::{ExternalUserId, UserId};
use crate::access::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal identifier.
    pub id: UserId,
    /// Identity on the chat transport; unique.
    pub external_id: ExternalUserId,
    /// Display name captured at registration.
    pub name: String,
    /// Current role.
    pub role: Role,
    /// Registration timestamp.
    pub joined_at: DateTime<Utc>,
    /// Most recent `/start` timestamp.
    pub last_login: DateTime<Utc>,
    /// Story points credited through approved reviews.
    pub total_points: u64,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Identity on the chat transport.
    pub external_id: ExternalUserId,
    /// Display name.
    pub name: String,
    /// Initial role.
    pub role: Role,
    /// Registration timestamp, also used as the first login.
    pub joined_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates a developer registration, the default for new users.
    #[must_use]
    pub fn developer(
        external_id: ExternalUserId,
        name: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id,
            name: name.into(),
            role: Role::Developer,
            joined_at,
        }
    }
}

impl User {
    /// Materialises a freshly inserted user.
    #[must_use]
    pub fn from_new(id: UserId, user: NewUser) -> Self {
        Self {
            id,
            external_id: user.external_id,
            name: user.name,
            role: user.role,
            joined_at: user.joined_at,
            last_login: user.joined_at,
            total_points: 0,
        }
    }
}
