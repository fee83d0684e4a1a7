//! Input and report types for the administrative operations

use crate::models::{
    FieldPermission, ModulePermissions, ObjectPermission, Profile, ProfileSystemPermissions, Role,
    RoleId, RolePermissions,
};

/// Input for creating a role
#[derive(Debug, Clone, Default)]
pub struct NewRole {
    /// Display name, unique within the tenant
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Parent role; `None` creates a root
    pub parent_role_id: Option<RoleId>,
    /// Visibility scope and administrative permissions
    pub permissions: RolePermissions,
    /// Coarse UI-module gates
    pub module_permissions: Option<ModulePermissions>,
}

/// Partial update for a role; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct RoleUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New permissions
    pub permissions: Option<RolePermissions>,
    /// New module gates
    pub module_permissions: Option<ModulePermissions>,
    /// Reparent: `Some(None)` moves the role to the root
    pub parent_role_id: Option<Option<RoleId>>,
}

/// Input for creating a profile
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    /// Display name, unique within the tenant
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Object-level grants
    pub object_permissions: Vec<ObjectPermission>,
    /// Field-level restrictions
    pub field_permissions: Vec<FieldPermission>,
    /// Profile-level system capabilities
    pub system_permissions: Option<ProfileSystemPermissions>,
}

/// Partial update for a profile; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// Replacement object-level grants
    pub object_permissions: Option<Vec<ObjectPermission>>,
    /// Replacement field-level restrictions
    pub field_permissions: Option<Vec<FieldPermission>>,
    /// Replacement system capabilities
    pub system_permissions: Option<ProfileSystemPermissions>,
    /// Activate or deactivate the profile
    pub is_active: Option<bool>,
}

/// Rows created while provisioning a tenant
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// Cloned roles, hierarchy links rewired to the new ids
    pub roles: Vec<Role>,
    /// Cloned profiles
    pub profiles: Vec<Profile>,
}
