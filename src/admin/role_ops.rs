//! Role management operations
//!
//! Every mutation here maintains the two hierarchy invariants: a role's
//! `level` is always `parent.level + 1` (0 at the root), and
//! `child_role_ids` is always the exact inverse of the parent links.
//! Every mutation also flushes the decision cache.

use super::types::{NewRole, RoleUpdate};
use crate::access::cache::DecisionCache;
use crate::access::context::TenantContext;
use crate::models::{Role, RoleId, TenantId};
use crate::store::DirectoryStore;
use crate::utils::error::{AccessError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Role management operations
pub struct RoleOperations {
    store: Arc<dyn DirectoryStore>,
    cache: Arc<DecisionCache>,
}

impl RoleOperations {
    /// Create a new role operations handler
    pub fn new(store: Arc<dyn DirectoryStore>, cache: Arc<DecisionCache>) -> Self {
        Self { store, cache }
    }

    /// Create a role, linking it under its parent when one is given
    pub async fn create_role(&self, ctx: &TenantContext, input: NewRole) -> Result<Role> {
        let tenant_id = ctx.require_tenant_id()?;

        if input.name.trim().is_empty() {
            return Err(AccessError::validation("Role name must not be empty"));
        }

        let mut role = Role::new(RoleId::generate(), tenant_id.clone(), input.name);
        role.description = input.description;
        role.permissions = input.permissions;
        if let Some(modules) = input.module_permissions {
            role.module_permissions = modules;
        }

        if let Some(parent_id) = input.parent_role_id {
            let mut parent = self.require_role(tenant_id, &parent_id).await?;
            role.level = parent.level + 1;
            role.parent_role_id = Some(parent.role_id.clone());
            role.parent_role_name = Some(parent.name.clone());

            parent.child_role_ids.push(role.role_id.clone());
            parent.touch();
            self.store.insert_role(&role).await?;
            self.store.update_role(&parent).await?;
        } else {
            self.store.insert_role(&role).await?;
        }

        self.cache.invalidate_all();
        info!(role_id = %role.role_id, %tenant_id, "role created");
        Ok(role)
    }

    /// Apply a partial update, rewiring the hierarchy on reparent
    pub async fn update_role(
        &self,
        ctx: &TenantContext,
        role_id: &RoleId,
        update: RoleUpdate,
    ) -> Result<Role> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut role = self.require_role(tenant_id, role_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(AccessError::validation("Role name must not be empty"));
            }
            role.name = name;
        }
        if let Some(description) = update.description {
            role.description = Some(description);
        }
        if let Some(permissions) = update.permissions {
            role.permissions = permissions;
        }
        if let Some(modules) = update.module_permissions {
            role.module_permissions = modules;
        }

        if let Some(new_parent) = update.parent_role_id {
            self.reparent(tenant_id, &mut role, new_parent).await?;
        }

        role.touch();
        self.store.update_role(&role).await?;
        self.cache.invalidate_all();
        info!(%role_id, %tenant_id, "role updated");
        Ok(role)
    }

    /// Soft-delete a role
    ///
    /// Refused for system roles and for roles that still have children;
    /// delete or reparent the children first.
    pub async fn delete_role(&self, ctx: &TenantContext, role_id: &RoleId) -> Result<()> {
        let tenant_id = ctx.require_tenant_id()?;
        let mut role = self.require_role(tenant_id, role_id).await?;

        if role.is_system_role {
            return Err(AccessError::access_denied(format!(
                "System role cannot be deleted: {}",
                role.name
            )));
        }
        if role.has_children() {
            return Err(AccessError::conflict(format!(
                "Role has {} child role(s); delete or reparent them first",
                role.child_role_ids.len()
            )));
        }

        if let Some(parent_id) = role.parent_role_id.clone() {
            let mut parent = self.require_role(tenant_id, &parent_id).await?;
            parent.child_role_ids.retain(|child| child != role_id);
            parent.touch();
            self.store.update_role(&parent).await?;
        }

        role.mark_deleted();
        self.store.update_role(&role).await?;
        self.cache.invalidate_all();
        info!(%role_id, %tenant_id, "role soft-deleted");
        Ok(())
    }

    /// Move a role under a new parent (or to the root) and recompute
    /// the levels of its whole subtree
    async fn reparent(
        &self,
        tenant_id: &TenantId,
        role: &mut Role,
        new_parent_id: Option<RoleId>,
    ) -> Result<()> {
        if new_parent_id.as_ref() == role.parent_role_id.as_ref() {
            return Ok(());
        }

        // Validate the target before touching any links, so a refused
        // reparent leaves the hierarchy untouched
        let new_parent = match &new_parent_id {
            Some(parent_id) => {
                if *parent_id == role.role_id {
                    return Err(AccessError::validation("A role cannot be its own parent"));
                }
                let parent = self.require_role(tenant_id, parent_id).await?;
                if self.is_descendant(tenant_id, &role.role_id, parent_id).await? {
                    return Err(AccessError::conflict(
                        "Reparenting under a descendant would break the hierarchy",
                    ));
                }
                Some(parent)
            }
            None => None,
        };

        // Detach from the old parent's child list
        if let Some(old_parent_id) = role.parent_role_id.clone() {
            let mut old_parent = self.require_role(tenant_id, &old_parent_id).await?;
            old_parent.child_role_ids.retain(|child| child != &role.role_id);
            old_parent.touch();
            self.store.update_role(&old_parent).await?;
        }

        match new_parent {
            Some(mut parent) => {
                role.level = parent.level + 1;
                role.parent_role_id = Some(parent.role_id.clone());
                role.parent_role_name = Some(parent.name.clone());

                parent.child_role_ids.push(role.role_id.clone());
                parent.touch();
                self.store.update_role(&parent).await?;
            }
            None => {
                role.level = 0;
                role.parent_role_id = None;
                role.parent_role_name = None;
            }
        }

        self.relevel_subtree(tenant_id, role).await
    }

    /// Recompute `level` for every descendant after a reparent
    async fn relevel_subtree(&self, tenant_id: &TenantId, root: &Role) -> Result<()> {
        let mut visited: HashSet<RoleId> = HashSet::new();
        visited.insert(root.role_id.clone());

        let mut worklist: Vec<(RoleId, u32)> = root
            .child_role_ids
            .iter()
            .map(|child| (child.clone(), root.level + 1))
            .collect();

        while let Some((role_id, level)) = worklist.pop() {
            if !visited.insert(role_id.clone()) {
                continue;
            }
            let mut role = self.require_role(tenant_id, &role_id).await?;
            role.level = level;
            role.touch();
            for child in &role.child_role_ids {
                worklist.push((child.clone(), level + 1));
            }
            self.store.update_role(&role).await?;
        }
        Ok(())
    }

    /// Whether `candidate` lies in the subtree rooted at `ancestor`
    async fn is_descendant(
        &self,
        tenant_id: &TenantId,
        ancestor: &RoleId,
        candidate: &RoleId,
    ) -> Result<bool> {
        let root = self.require_role(tenant_id, ancestor).await?;
        let mut visited: HashSet<RoleId> = HashSet::new();
        let mut worklist: Vec<RoleId> = root.child_role_ids.clone();

        while let Some(role_id) = worklist.pop() {
            if role_id == *candidate {
                return Ok(true);
            }
            if !visited.insert(role_id.clone()) {
                continue;
            }
            if let Some(role) = self.store.find_role_by_role_id(&role_id).await? {
                worklist.extend(role.child_role_ids.iter().cloned());
            }
        }
        Ok(false)
    }

    /// Resolve an active role in the current tenant or fail
    async fn require_role(&self, tenant_id: &TenantId, role_id: &RoleId) -> Result<Role> {
        match self.store.find_role_by_role_id(role_id).await? {
            Some(role) if role.tenant_id.as_ref() != Some(tenant_id) => Err(
                AccessError::access_denied(format!("Role belongs to another tenant: {}", role_id)),
            ),
            Some(role) if role.is_active() => Ok(role),
            _ => Err(AccessError::not_found(format!("Role not found: {}", role_id))),
        }
    }
}
