//! In-memory directory store
//!
//! `DashMap`-backed reference implementation of [`DirectoryStore`].
//! Used by the test suite and by embedders that keep the directory
//! resident (it is small: one row per user/role/profile).

use super::DirectoryStore;
use crate::models::{Profile, ProfileId, Role, RoleId, TenantId, User, UserId};
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory implementation of [`DirectoryStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    roles: DashMap<RoleId, Role>,
    profiles: DashMap<ProfileId, Profile>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user rows
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of role rows, system templates included
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Number of profile rows, system templates included
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn find_user_by_id(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.clone()))
    }

    async fn find_role_by_role_id(&self, role_id: &RoleId) -> Result<Option<Role>> {
        Ok(self.roles.get(role_id).map(|r| r.clone()))
    }

    async fn find_profile_by_profile_id(&self, profile_id: &ProfileId) -> Result<Option<Profile>> {
        Ok(self.profiles.get(profile_id).map(|p| p.clone()))
    }

    async fn find_users_by_manager_id(&self, manager_id: &UserId) -> Result<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.manager_id.as_ref() == Some(manager_id))
            .map(|entry| entry.clone())
            .collect())
    }

    async fn find_system_roles(&self) -> Result<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|entry| entry.tenant_id.is_none())
            .map(|entry| entry.clone())
            .collect())
    }

    async fn find_system_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|entry| entry.tenant_id.is_none())
            .map(|entry| entry.clone())
            .collect())
    }

    async fn list_roles_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|entry| entry.tenant_id.as_ref() == Some(tenant_id))
            .map(|entry| entry.clone())
            .collect())
    }

    async fn list_profiles_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Profile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|entry| entry.tenant_id.as_ref() == Some(tenant_id))
            .map(|entry| entry.clone())
            .collect())
    }

    async fn insert_role(&self, role: &Role) -> Result<()> {
        if self.roles.contains_key(&role.role_id) {
            return Err(AccessError::conflict(format!(
                "Role already exists: {}",
                role.role_id
            )));
        }
        self.roles.insert(role.role_id.clone(), role.clone());
        Ok(())
    }

    async fn update_role(&self, role: &Role) -> Result<()> {
        if !self.roles.contains_key(&role.role_id) {
            return Err(AccessError::not_found(format!(
                "Role not found: {}",
                role.role_id
            )));
        }
        self.roles.insert(role.role_id.clone(), role.clone());
        Ok(())
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        if self.profiles.contains_key(&profile.profile_id) {
            return Err(AccessError::conflict(format!(
                "Profile already exists: {}",
                profile.profile_id
            )));
        }
        self.profiles
            .insert(profile.profile_id.clone(), profile.clone());
        Ok(())
    }

    async fn update_profile(&self, profile: &Profile) -> Result<()> {
        if !self.profiles.contains_key(&profile.profile_id) {
            return Err(AccessError::not_found(format!(
                "Profile not found: {}",
                profile.profile_id
            )));
        }
        self.profiles
            .insert(profile.profile_id.clone(), profile.clone());
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        if self.users.contains_key(&user.user_id) {
            return Err(AccessError::conflict(format!(
                "User already exists: {}",
                user.user_id
            )));
        }
        self.users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        if !self.users.contains_key(&user.user_id) {
            return Err(AccessError::not_found(format!(
                "User not found: {}",
                user.user_id
            )));
        }
        self.users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }
}
