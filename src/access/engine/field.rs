//! Field-level permission checks

use super::DecisionEngine;
use crate::access::context::TenantContext;
use crate::models::{FieldAction, ObjectType, UserId};
use crate::utils::error::Result;
use tracing::debug;

impl DecisionEngine {
    /// Whether a user may read or edit one field of an object
    ///
    /// Field permissions are a deny-list layered on top of an
    /// already-granted object permission: a field with no entry is
    /// allowed, and `is_hidden` denies both actions regardless of the
    /// entry's own read/edit flags. This asymmetry with the object-level
    /// allow-list is deliberate; do not normalize the two.
    pub async fn has_field_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        object: ObjectType,
        field_name: &str,
        action: FieldAction,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        let user = match self.resolve_active_user(tenant_id, user_id).await? {
            Some(user) => user,
            None => {
                debug!(%user_id, %object, field_name, "field permission denied: user not resolvable");
                return Ok(false);
            }
        };

        let profile = match self.resolve_profile(tenant_id, user.profile_id.as_ref()).await? {
            Some(profile) => profile,
            None => {
                debug!(%user_id, %object, field_name, "field permission denied: profile not resolvable");
                return Ok(false);
            }
        };

        let allowed = profile.allows_field(object, field_name, action);
        debug!(%user_id, %object, field_name, ?action, allowed, "field permission evaluated");
        Ok(allowed)
    }
}
