//! Storage interface for the access core
//!
//! The engine reads Role/Profile/User state through [`DirectoryStore`],
//! a thin key/secondary-index lookup surface with no joins. Production
//! deployments back it with the document store; tests and embedded
//! callers use [`MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use crate::models::{Profile, ProfileId, Role, RoleId, TenantId, User, UserId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Lookup and mutation surface over the authorization directory
///
/// The decision engine only calls the `find_*` methods; the mutation
/// methods exist for provisioning and the admin operations.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Resolve a user by primary key
    async fn find_user_by_id(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Resolve a role by its business key
    async fn find_role_by_role_id(&self, role_id: &RoleId) -> Result<Option<Role>>;

    /// Resolve a profile by its business key
    async fn find_profile_by_profile_id(&self, profile_id: &ProfileId) -> Result<Option<Profile>>;

    /// All users whose `manager_id` equals the given id, in no particular order
    async fn find_users_by_manager_id(&self, manager_id: &UserId) -> Result<Vec<User>>;

    /// System role templates (`tenant_id = None`)
    async fn find_system_roles(&self) -> Result<Vec<Role>>;

    /// System profile templates (`tenant_id = None`)
    async fn find_system_profiles(&self) -> Result<Vec<Profile>>;

    /// All roles belonging to one tenant, including soft-deleted rows
    async fn list_roles_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Role>>;

    /// All profiles belonging to one tenant, including soft-deleted rows
    async fn list_profiles_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Profile>>;

    /// Insert a new role row
    async fn insert_role(&self, role: &Role) -> Result<()>;

    /// Replace an existing role row
    async fn update_role(&self, role: &Role) -> Result<()>;

    /// Insert a new profile row
    async fn insert_profile(&self, profile: &Profile) -> Result<()>;

    /// Replace an existing profile row
    async fn update_profile(&self, profile: &Profile) -> Result<()>;

    /// Insert a new user row
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Replace an existing user row
    async fn update_user(&self, user: &User) -> Result<()>;
}
