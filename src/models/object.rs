//! Closed vocabularies for objects, actions, and coarse permissions
//!
//! Free-form strings coming in from DTOs are resolved into these enums
//! once at the boundary. The decision engine only ever sees a small
//! fixed set of variants, so a typo in a request can fail loudly at
//! parse time instead of silently denying.

use serde::{Deserialize, Serialize};

/// CRM entity types subject to object-level permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    /// Sales lead
    Lead,
    /// Contact person
    Contact,
    /// Customer account
    Account,
    /// Sales opportunity
    Opportunity,
    /// Product catalog entry
    Product,
    /// Activity (task, call, meeting)
    Activity,
    /// Sales proposal
    Proposal,
}

impl ObjectType {
    /// All object types, in declaration order
    pub const ALL: [ObjectType; 7] = [
        ObjectType::Lead,
        ObjectType::Contact,
        ObjectType::Account,
        ObjectType::Opportunity,
        ObjectType::Product,
        ObjectType::Activity,
        ObjectType::Proposal,
    ];
}

// A defaulted permission entry grants nothing, so the choice of object
// is inert; Lead is the first variant.
impl Default for ObjectType {
    fn default() -> Self {
        ObjectType::Lead
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Lead => "LEAD",
            ObjectType::Contact => "CONTACT",
            ObjectType::Account => "ACCOUNT",
            ObjectType::Opportunity => "OPPORTUNITY",
            ObjectType::Product => "PRODUCT",
            ObjectType::Activity => "ACTIVITY",
            ObjectType::Proposal => "PROPOSAL",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LEAD" => Ok(ObjectType::Lead),
            "CONTACT" => Ok(ObjectType::Contact),
            "ACCOUNT" => Ok(ObjectType::Account),
            "OPPORTUNITY" => Ok(ObjectType::Opportunity),
            "PRODUCT" => Ok(ObjectType::Product),
            "ACTIVITY" => Ok(ObjectType::Activity),
            "PROPOSAL" => Ok(ObjectType::Proposal),
            _ => Err(format!("Unknown object type: {}", s)),
        }
    }
}

/// Object-level actions a profile can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Create new records
    Create,
    /// Read a single record
    Read,
    /// Edit an existing record
    Edit,
    /// Soft-delete a record
    Delete,
    /// View records owned by anyone, regardless of role scope
    ViewAll,
    /// Modify records owned by anyone
    ModifyAll,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Edit => "EDIT",
            Action::Delete => "DELETE",
            Action::ViewAll => "VIEWALL",
            Action::ModifyAll => "MODIFYALL",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Action::Create),
            "READ" => Ok(Action::Read),
            // The mobile client still sends UPDATE for edits
            "EDIT" | "UPDATE" => Ok(Action::Edit),
            "DELETE" => Ok(Action::Delete),
            "VIEWALL" | "VIEW_ALL" => Ok(Action::ViewAll),
            "MODIFYALL" | "MODIFY_ALL" => Ok(Action::ModifyAll),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// Field-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldAction {
    /// Read the field value
    Read,
    /// Edit the field value
    Edit,
}

impl std::str::FromStr for FieldAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "READ" => Ok(FieldAction::Read),
            "EDIT" | "UPDATE" => Ok(FieldAction::Edit),
            _ => Err(format!("Unknown field action: {}", s)),
        }
    }
}

/// Coarse administrative permissions carried by a role
///
/// One variant per boolean in [`RolePermissions`](super::role::RolePermissions);
/// an unknown permission name fails at parse time, so the engine never
/// evaluates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    /// Create, update, and deactivate users
    ManageUsers,
    /// Create, update, and delete roles
    ManageRoles,
    /// Create, update, and delete profiles
    ManageProfiles,
    /// Access the setup area
    ViewSetup,
    /// Manage sharing rules
    ManageSharing,
    /// View records across the whole tenant
    ViewAllData,
    /// Modify records across the whole tenant
    ModifyAllData,
    /// Read the audit log
    ViewAuditLog,
    /// Export records
    ExportData,
    /// Import records
    ImportData,
}

impl std::str::FromStr for SystemPermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase();
        let name = normalized.strip_prefix("can_").unwrap_or(&normalized);
        match name {
            "manage_users" => Ok(SystemPermission::ManageUsers),
            "manage_roles" => Ok(SystemPermission::ManageRoles),
            "manage_profiles" => Ok(SystemPermission::ManageProfiles),
            "view_setup" => Ok(SystemPermission::ViewSetup),
            "manage_sharing" => Ok(SystemPermission::ManageSharing),
            "view_all_data" => Ok(SystemPermission::ViewAllData),
            "modify_all_data" => Ok(SystemPermission::ModifyAllData),
            "view_audit_log" => Ok(SystemPermission::ViewAuditLog),
            "export_data" => Ok(SystemPermission::ExportData),
            "import_data" => Ok(SystemPermission::ImportData),
            _ => Err(format!("Unknown system permission: {}", s)),
        }
    }
}
