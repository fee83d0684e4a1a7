//! Administrative operations - main facade
//!
//! Role management, profile management, user assignment, and tenant
//! provisioning. Every mutation that can change a decision invalidates
//! the shared decision cache.

pub mod profile_ops;
pub mod provisioning;
pub mod role_ops;
pub mod types;
pub mod user_ops;

pub use provisioning::{system_profile_templates, system_role_templates, TenantProvisioner};
pub use types::{NewProfile, NewRole, ProfileUpdate, ProvisionReport, RoleUpdate};

use crate::access::cache::DecisionCache;
use crate::access::context::TenantContext;
use crate::models::{Profile, ProfileId, Role, RoleId, TenantId, User, UserId};
use crate::store::DirectoryStore;
use crate::utils::error::Result;
use profile_ops::ProfileOperations;
use role_ops::RoleOperations;
use std::sync::Arc;
use user_ops::UserAssignments;

/// Administrative facade over the authorization directory
pub struct AdminManager {
    role_ops: RoleOperations,
    profile_ops: ProfileOperations,
    user_ops: UserAssignments,
    provisioner: TenantProvisioner,
}

impl AdminManager {
    /// Create a new admin manager sharing the access control's cache
    pub fn new(store: Arc<dyn DirectoryStore>, cache: Arc<DecisionCache>) -> Self {
        Self {
            role_ops: RoleOperations::new(Arc::clone(&store), Arc::clone(&cache)),
            profile_ops: ProfileOperations::new(Arc::clone(&store), Arc::clone(&cache)),
            user_ops: UserAssignments::new(Arc::clone(&store), cache),
            provisioner: TenantProvisioner::new(store),
        }
    }

    // Tenant provisioning

    /// Seed a new tenant from the system templates
    pub async fn provision_tenant(&self, tenant_id: &TenantId) -> Result<ProvisionReport> {
        self.provisioner.provision_tenant(tenant_id).await
    }

    // Role operations

    /// Create a role
    pub async fn create_role(&self, ctx: &TenantContext, input: NewRole) -> Result<Role> {
        self.role_ops.create_role(ctx, input).await
    }

    /// Update a role
    pub async fn update_role(
        &self,
        ctx: &TenantContext,
        role_id: &RoleId,
        update: RoleUpdate,
    ) -> Result<Role> {
        self.role_ops.update_role(ctx, role_id, update).await
    }

    /// Soft-delete a role
    pub async fn delete_role(&self, ctx: &TenantContext, role_id: &RoleId) -> Result<()> {
        self.role_ops.delete_role(ctx, role_id).await
    }

    // Profile operations

    /// Create a profile
    pub async fn create_profile(&self, ctx: &TenantContext, input: NewProfile) -> Result<Profile> {
        self.profile_ops.create_profile(ctx, input).await
    }

    /// Update a profile
    pub async fn update_profile(
        &self,
        ctx: &TenantContext,
        profile_id: &ProfileId,
        update: ProfileUpdate,
    ) -> Result<Profile> {
        self.profile_ops.update_profile(ctx, profile_id, update).await
    }

    /// Soft-delete a profile
    pub async fn delete_profile(&self, ctx: &TenantContext, profile_id: &ProfileId) -> Result<()> {
        self.profile_ops.delete_profile(ctx, profile_id).await
    }

    // User assignment

    /// Assign a role to a user
    pub async fn assign_role(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<User> {
        self.user_ops.assign_role(ctx, user_id, role_id).await
    }

    /// Assign a profile to a user
    pub async fn assign_profile(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        profile_id: &ProfileId,
    ) -> Result<User> {
        self.user_ops.assign_profile(ctx, user_id, profile_id).await
    }

    /// Set or clear a user's manager
    pub async fn set_manager(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        manager_id: Option<&UserId>,
    ) -> Result<User> {
        self.user_ops.set_manager(ctx, user_id, manager_id).await
    }
}
