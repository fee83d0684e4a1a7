//! Role model: hierarchy node with visibility scope and coarse permissions

use super::ids::{RoleId, TenantId};
use super::object::SystemPermission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record-visibility scope granted by a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataVisibility {
    /// Only records the user owns
    Own,
    /// Own records plus records owned by transitive subordinates
    Subordinates,
    /// Records owned by any user in the tenant
    AllUsers,
    /// Everything in the tenant
    All,
}

impl Default for DataVisibility {
    fn default() -> Self {
        DataVisibility::Own
    }
}

/// Coarse administrative permissions and visibility scope of a role
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePermissions {
    /// Record-visibility scope
    #[serde(default)]
    pub data_visibility: DataVisibility,
    /// Create, update, and deactivate users
    #[serde(default)]
    pub can_manage_users: bool,
    /// Create, update, and delete roles
    #[serde(default)]
    pub can_manage_roles: bool,
    /// Create, update, and delete profiles
    #[serde(default)]
    pub can_manage_profiles: bool,
    /// Access the setup area
    #[serde(default)]
    pub can_view_setup: bool,
    /// Manage sharing rules
    #[serde(default)]
    pub can_manage_sharing: bool,
    /// View records across the whole tenant
    #[serde(default)]
    pub can_view_all_data: bool,
    /// Modify records across the whole tenant
    #[serde(default)]
    pub can_modify_all_data: bool,
    /// Read the audit log
    #[serde(default)]
    pub can_view_audit_log: bool,
    /// Export records
    #[serde(default)]
    pub can_export_data: bool,
    /// Import records
    #[serde(default)]
    pub can_import_data: bool,
    /// Free-form tenant-defined permission labels
    #[serde(default)]
    pub custom_permissions: Vec<String>,
}

impl RolePermissions {
    /// Look up one of the named boolean permissions
    pub fn grants(&self, permission: SystemPermission) -> bool {
        match permission {
            SystemPermission::ManageUsers => self.can_manage_users,
            SystemPermission::ManageRoles => self.can_manage_roles,
            SystemPermission::ManageProfiles => self.can_manage_profiles,
            SystemPermission::ViewSetup => self.can_view_setup,
            SystemPermission::ManageSharing => self.can_manage_sharing,
            SystemPermission::ViewAllData => self.can_view_all_data,
            SystemPermission::ModifyAllData => self.can_modify_all_data,
            SystemPermission::ViewAuditLog => self.can_view_audit_log,
            SystemPermission::ExportData => self.can_export_data,
            SystemPermission::ImportData => self.can_import_data,
        }
    }

    /// Check a tenant-defined custom permission label
    pub fn grants_custom(&self, name: &str) -> bool {
        self.custom_permissions
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
    }
}

/// Coarse UI-module gates
///
/// These control module navigation only; they are not consulted by the
/// decision engine and must never substitute for object permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePermissions {
    /// Leads module
    pub leads: bool,
    /// Contacts module
    pub contacts: bool,
    /// Accounts module
    pub accounts: bool,
    /// Opportunities module
    pub opportunities: bool,
    /// Products module
    pub products: bool,
    /// Activities module
    pub activities: bool,
    /// Reports module
    pub reports: bool,
    /// Setup module
    pub setup: bool,
}

impl Default for ModulePermissions {
    fn default() -> Self {
        Self {
            leads: true,
            contacts: true,
            accounts: true,
            opportunities: true,
            products: true,
            activities: true,
            reports: true,
            setup: false,
        }
    }
}

/// A node in a tenant's role hierarchy
///
/// The four system templates carry `tenant_id = None` and exist only to
/// seed new tenants; every other row is tenant-scoped. `child_role_ids`
/// is the denormalized inverse of the parent links and is maintained by
/// every role mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Stable business key
    pub role_id: RoleId,
    /// Owning tenant; `None` only on system templates
    pub tenant_id: Option<TenantId>,
    /// Display name, unique within the tenant
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Whether this row was seeded from a system template
    pub is_system_role: bool,
    /// Parent role in the hierarchy
    pub parent_role_id: Option<RoleId>,
    /// Denormalized parent name for display
    pub parent_role_name: Option<String>,
    /// Depth in the hierarchy, 0 = root
    pub level: u32,
    /// Denormalized back-links to direct children
    pub child_role_ids: Vec<RoleId>,
    /// Coarse UI-module gates
    pub module_permissions: ModulePermissions,
    /// Visibility scope and administrative permissions
    pub permissions: RolePermissions,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// Soft-delete timestamp
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new tenant-scoped role
    pub fn new<S: Into<String>>(role_id: RoleId, tenant_id: TenantId, name: S) -> Self {
        let now = Utc::now();
        Self {
            role_id,
            tenant_id: Some(tenant_id),
            name: name.into(),
            description: None,
            is_system_role: false,
            parent_role_id: None,
            parent_role_name: None,
            level: 0,
            child_role_ids: vec![],
            module_permissions: ModulePermissions::default(),
            permissions: RolePermissions::default(),
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the role can still be resolved by the engine
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Whether any child role still points at this one
    pub fn has_children(&self) -> bool {
        !self.child_role_ids.is_empty()
    }

    /// Bump the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Soft-delete the role
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
        self.touch();
    }
}
