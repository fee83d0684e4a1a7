//! Object-level permission checks

use super::DecisionEngine;
use crate::access::context::TenantContext;
use crate::models::{Action, ObjectType, UserId};
use crate::utils::error::Result;
use tracing::debug;

impl DecisionEngine {
    /// Whether a user may perform `action` on `object`
    ///
    /// Object permissions are an allow-list: a profile without an entry
    /// for the object denies every action. Missing, inactive, or
    /// deleted user/profile rows deny.
    pub async fn has_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        object: ObjectType,
        action: Action,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        let user = match self.resolve_active_user(tenant_id, user_id).await? {
            Some(user) => user,
            None => {
                debug!(%user_id, %object, %action, "permission denied: user not resolvable");
                return Ok(false);
            }
        };

        let profile = match self.resolve_profile(tenant_id, user.profile_id.as_ref()).await? {
            Some(profile) => profile,
            None => {
                debug!(%user_id, %object, %action, "permission denied: profile not resolvable");
                return Ok(false);
            }
        };

        let allowed = profile
            .object_permission(object)
            .map(|entry| entry.allows(action))
            .unwrap_or(false);

        debug!(%user_id, %object, %action, allowed, "object permission evaluated");
        Ok(allowed)
    }
}
