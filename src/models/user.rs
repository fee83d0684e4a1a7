//! User model, authorization-relevant fields only
//!
//! Full user records (names, email, preferences) live with the user
//! service; the decision engine only reads the fields below.

use super::ids::{ProfileId, RoleId, TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Active account
    Active,
    /// Deactivated account
    Inactive,
    /// Suspended by an administrator
    Suspended,
}

/// Authorization view of a user
///
/// `manager_id` links form a forest in a healthy tenant, but nothing on
/// the write path rejects a cycle; the hierarchy traversal carries its
/// own visited-set defense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable business key
    pub user_id: UserId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Assigned role
    pub role_id: Option<RoleId>,
    /// Assigned profile
    pub profile_id: Option<ProfileId>,
    /// Direct manager
    pub manager_id: Option<UserId>,
    /// Account status
    pub status: UserStatus,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(user_id: UserId, tenant_id: TenantId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            tenant_id,
            role_id: None,
            profile_id: None,
            manager_id: None,
            status: UserStatus::Active,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account may be granted anything at all
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active && !self.is_deleted
    }

    /// Bump the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
