//! Decision engine: pure reads composing Role, Profile, ownership, and
//! tenant context into allow/deny answers
//!
//! Every entry point requires a tenant in the context and resolves rows
//! through the directory store. A row whose tenant does not match the
//! context is treated as not found, so no decision path can cross a
//! tenant boundary even when handed a foreign key. Missing or deleted
//! rows deny; they are never an error.

mod field;
mod hierarchy;
mod object;
mod record;
mod system;
mod tests;

use crate::models::{Profile, ProfileId, Role, RoleId, TenantId, User, UserId};
use crate::store::DirectoryStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// Stateless authorization decision engine
///
/// Holds only a handle to the directory store; all methods are
/// side-effect-free reads and safe to call concurrently.
#[derive(Clone)]
pub struct DecisionEngine {
    store: Arc<dyn DirectoryStore>,
}

impl DecisionEngine {
    /// Create a new decision engine over a directory store
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// The underlying directory store
    pub fn store(&self) -> &Arc<dyn DirectoryStore> {
        &self.store
    }

    /// Resolve a user that is active and belongs to the given tenant
    pub(super) async fn resolve_active_user(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<Option<User>> {
        match self.store.find_user_by_id(user_id).await? {
            Some(user) if user.tenant_id == *tenant_id && user.is_active() => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    /// Resolve a usable profile belonging to the given tenant
    pub(super) async fn resolve_profile(
        &self,
        tenant_id: &TenantId,
        profile_id: Option<&ProfileId>,
    ) -> Result<Option<Profile>> {
        let Some(profile_id) = profile_id else {
            return Ok(None);
        };
        match self.store.find_profile_by_profile_id(profile_id).await? {
            Some(profile)
                if profile.tenant_id.as_ref() == Some(tenant_id) && profile.is_usable() =>
            {
                Ok(Some(profile))
            }
            _ => Ok(None),
        }
    }

    /// Resolve an active role belonging to the given tenant
    pub(super) async fn resolve_role(
        &self,
        tenant_id: &TenantId,
        role_id: Option<&RoleId>,
    ) -> Result<Option<Role>> {
        let Some(role_id) = role_id else {
            return Ok(None);
        };
        match self.store.find_role_by_role_id(role_id).await? {
            Some(role) if role.tenant_id.as_ref() == Some(tenant_id) && role.is_active() => {
                Ok(Some(role))
            }
            _ => Ok(None),
        }
    }
}
