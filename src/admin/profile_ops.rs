//! Profile management operations

use super::types::{NewProfile, ProfileUpdate};
use crate::access::cache::DecisionCache;
use crate::access::context::TenantContext;
use crate::models::{Profile, ProfileId, TenantId};
use crate::store::DirectoryStore;
use crate::utils::error::{AccessError, Result};
use std::sync::Arc;
use tracing::info;

/// Profile management operations
pub struct ProfileOperations {
    store: Arc<dyn DirectoryStore>,
    cache: Arc<DecisionCache>,
}

impl ProfileOperations {
    /// Create a new profile operations handler
    pub fn new(store: Arc<dyn DirectoryStore>, cache: Arc<DecisionCache>) -> Self {
        Self { store, cache }
    }

    /// Create a profile
    pub async fn create_profile(&self, ctx: &TenantContext, input: NewProfile) -> Result<Profile> {
        let tenant_id = ctx.require_tenant_id()?;

        if input.name.trim().is_empty() {
            return Err(AccessError::validation("Profile name must not be empty"));
        }

        let mut profile = Profile::new(ProfileId::generate(), tenant_id.clone(), input.name);
        profile.description = input.description;
        profile.object_permissions = input.object_permissions;
        profile.field_permissions = input.field_permissions;
        if let Some(system_permissions) = input.system_permissions {
            profile.system_permissions = system_permissions;
        }

        self.store.insert_profile(&profile).await?;
        self.cache.invalidate_all();
        info!(profile_id = %profile.profile_id, %tenant_id, "profile created");
        Ok(profile)
    }

    /// Apply a partial update to a profile
    pub async fn update_profile(
        &self,
        ctx: &TenantContext,
        profile_id: &ProfileId,
        update: ProfileUpdate,
    ) -> Result<Profile> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut profile = self.require_profile(tenant_id, profile_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(AccessError::validation("Profile name must not be empty"));
            }
            profile.name = name;
        }
        if let Some(description) = update.description {
            profile.description = Some(description);
        }
        if let Some(object_permissions) = update.object_permissions {
            profile.object_permissions = object_permissions;
        }
        if let Some(field_permissions) = update.field_permissions {
            profile.field_permissions = field_permissions;
        }
        if let Some(system_permissions) = update.system_permissions {
            profile.system_permissions = system_permissions;
        }
        if let Some(is_active) = update.is_active {
            profile.is_active = is_active;
        }

        profile.touch();
        self.store.update_profile(&profile).await?;
        self.cache.invalidate_all();
        info!(%profile_id, %tenant_id, "profile updated");
        Ok(profile)
    }

    /// Soft-delete a profile; refused for system profiles
    pub async fn delete_profile(&self, ctx: &TenantContext, profile_id: &ProfileId) -> Result<()> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut profile = self.require_profile(tenant_id, profile_id).await?;

        if profile.is_system_profile {
            return Err(AccessError::access_denied(format!(
                "System profile cannot be deleted: {}",
                profile.name
            )));
        }

        profile.mark_deleted();
        self.store.update_profile(&profile).await?;
        self.cache.invalidate_all();
        info!(%profile_id, %tenant_id, "profile soft-deleted");
        Ok(())
    }

    /// Resolve a live profile in the current tenant or fail
    async fn require_profile(
        &self,
        tenant_id: &TenantId,
        profile_id: &ProfileId,
    ) -> Result<Profile> {
        match self.store.find_profile_by_profile_id(profile_id).await? {
            Some(profile) if profile.tenant_id.as_ref() != Some(tenant_id) => {
                Err(AccessError::access_denied(format!(
                    "Profile belongs to another tenant: {}",
                    profile_id
                )))
            }
            Some(profile) if !profile.is_deleted => Ok(profile),
            _ => Err(AccessError::not_found(format!(
                "Profile not found: {}",
                profile_id
            ))),
        }
    }
}
