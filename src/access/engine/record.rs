//! Record-level visibility checks

use super::DecisionEngine;
use crate::access::context::TenantContext;
use crate::models::{DataVisibility, ObjectType, UserId};
use crate::utils::error::Result;
use tracing::debug;

impl DecisionEngine {
    /// Whether a user may view a record owned by `record_owner_id`
    ///
    /// Evaluation order, first match wins:
    /// 1. Self-ownership always allows, independent of any other state.
    /// 2. Profile `can_view_all` for the object allows, short-circuiting
    ///    before any role scope is consulted.
    /// 3. The role's data-visibility scope decides: `All`/`AllUsers`
    ///    allow, `Subordinates` requires the owner to be a transitive
    ///    subordinate, `Own` (including a missing role) denies.
    pub async fn can_view_record(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        record_owner_id: &UserId,
        object: ObjectType,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        if user_id == record_owner_id {
            return Ok(true);
        }

        let user = match self.resolve_active_user(tenant_id, user_id).await? {
            Some(user) => user,
            None => {
                debug!(%user_id, %object, "record visibility denied: user not resolvable");
                return Ok(false);
            }
        };

        if let Some(profile) = self.resolve_profile(tenant_id, user.profile_id.as_ref()).await? {
            if profile
                .object_permission(object)
                .map(|entry| entry.can_view_all)
                .unwrap_or(false)
            {
                debug!(%user_id, %object, "record visible via profile view-all");
                return Ok(true);
            }
        }

        let visibility = self
            .resolve_role(tenant_id, user.role_id.as_ref())
            .await?
            .map(|role| role.permissions.data_visibility)
            .unwrap_or_default();

        let allowed = match visibility {
            DataVisibility::All | DataVisibility::AllUsers => true,
            DataVisibility::Subordinates => {
                self.is_subordinate(ctx, user_id, record_owner_id).await?
            }
            // Self-ownership was already handled above
            DataVisibility::Own => false,
        };

        debug!(%user_id, owner = %record_owner_id, %object, ?visibility, allowed, "record visibility evaluated");
        Ok(allowed)
    }
}
