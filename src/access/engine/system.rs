//! Coarse system permission checks

use super::DecisionEngine;
use crate::access::context::TenantContext;
use crate::models::{SystemPermission, UserId};
use crate::utils::error::Result;
use tracing::debug;

impl DecisionEngine {
    /// Whether a user's role grants a named administrative permission
    ///
    /// Missing user or role denies. Unknown permission names never
    /// reach this point; [`SystemPermission`] is a closed enum resolved
    /// at the DTO boundary.
    pub async fn has_system_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        permission: SystemPermission,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        let user = match self.resolve_active_user(tenant_id, user_id).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        let role = match self.resolve_role(tenant_id, user.role_id.as_ref()).await? {
            Some(role) => role,
            None => {
                debug!(%user_id, ?permission, "system permission denied: role not resolvable");
                return Ok(false);
            }
        };

        let allowed = role.permissions.grants(permission);
        debug!(%user_id, ?permission, allowed, "system permission evaluated");
        Ok(allowed)
    }

    /// Whether a user's role carries a tenant-defined custom permission label
    pub async fn has_custom_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        name: &str,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        let user = match self.resolve_active_user(tenant_id, user_id).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        let role = match self.resolve_role(tenant_id, user.role_id.as_ref()).await? {
            Some(role) => role,
            None => return Ok(false),
        };

        Ok(role.permissions.grants_custom(name))
    }
}
