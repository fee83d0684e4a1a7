//! User assignment operations
//!
//! Role, profile, and manager assignment for users. These are the
//! mutations the decision cache invalidation hooks hang off of.

use crate::access::cache::DecisionCache;
use crate::access::context::TenantContext;
use crate::models::{ProfileId, RoleId, TenantId, User, UserId};
use crate::store::DirectoryStore;
use crate::utils::error::{AccessError, Result};
use std::sync::Arc;
use tracing::info;

/// User assignment operations
pub struct UserAssignments {
    store: Arc<dyn DirectoryStore>,
    cache: Arc<DecisionCache>,
}

impl UserAssignments {
    /// Create a new user assignment handler
    pub fn new(store: Arc<dyn DirectoryStore>, cache: Arc<DecisionCache>) -> Self {
        Self { store, cache }
    }

    /// Assign a role to a user
    pub async fn assign_role(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<User> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut user = self.require_user(tenant_id, user_id).await?;

        match self.store.find_role_by_role_id(role_id).await? {
            Some(role) if role.tenant_id.as_ref() == Some(tenant_id) && role.is_active() => {}
            _ => {
                return Err(AccessError::validation(format!(
                    "Role not assignable: {}",
                    role_id
                )));
            }
        }

        user.role_id = Some(role_id.clone());
        user.touch();
        self.store.update_user(&user).await?;
        self.cache.invalidate_user(user_id);
        info!(%user_id, %role_id, "role assigned");
        Ok(user)
    }

    /// Assign a profile to a user
    pub async fn assign_profile(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        profile_id: &ProfileId,
    ) -> Result<User> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut user = self.require_user(tenant_id, user_id).await?;

        match self.store.find_profile_by_profile_id(profile_id).await? {
            Some(profile)
                if profile.tenant_id.as_ref() == Some(tenant_id) && profile.is_usable() => {}
            _ => {
                return Err(AccessError::validation(format!(
                    "Profile not assignable: {}",
                    profile_id
                )));
            }
        }

        user.profile_id = Some(profile_id.clone());
        user.touch();
        self.store.update_user(&user).await?;
        self.cache.invalidate_user(user_id);
        info!(%user_id, %profile_id, "profile assigned");
        Ok(user)
    }

    /// Set or clear a user's manager
    ///
    /// The manager must exist in the same tenant, but no cycle check is
    /// performed; the hierarchy traversal's visited set is the only
    /// defense against a cycle introduced here. Invalidation is a full
    /// flush because the affected subordinate closures are not
    /// computable locally.
    pub async fn set_manager(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        manager_id: Option<&UserId>,
    ) -> Result<User> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut user = self.require_user(tenant_id, user_id).await?;

        if let Some(manager_id) = manager_id {
            if manager_id == user_id {
                return Err(AccessError::validation("A user cannot be their own manager"));
            }
            self.require_user(tenant_id, manager_id).await.map_err(|_| {
                AccessError::validation(format!("Manager not found: {}", manager_id))
            })?;
        }

        user.manager_id = manager_id.cloned();
        user.touch();
        self.store.update_user(&user).await?;
        self.cache.invalidate_all();
        info!(%user_id, manager = ?manager_id.map(|m| m.as_str()), "manager updated");
        Ok(user)
    }

    /// Resolve a live user in the current tenant or fail
    async fn require_user(&self, tenant_id: &TenantId, user_id: &UserId) -> Result<User> {
        match self.store.find_user_by_id(user_id).await? {
            Some(user) if user.tenant_id != *tenant_id => Err(AccessError::access_denied(
                format!("User belongs to another tenant: {}", user_id),
            )),
            Some(user) if !user.is_deleted => Ok(user),
            _ => Err(AccessError::not_found(format!("User not found: {}", user_id))),
        }
    }
}
