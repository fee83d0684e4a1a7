//! Profile model: object-level and field-level permission bundle

use super::ids::{ProfileId, TenantId};
use super::object::{Action, FieldAction, ObjectType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CRUD-style grants for one object type
///
/// Object permissions are an allow-list: an object with no entry in the
/// profile denies every action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectPermission {
    /// Object type this entry applies to
    pub object: ObjectType,
    /// Create records
    #[serde(default)]
    pub can_create: bool,
    /// Read a single record
    #[serde(default)]
    pub can_read: bool,
    /// Edit records
    #[serde(default)]
    pub can_edit: bool,
    /// Soft-delete records
    #[serde(default)]
    pub can_delete: bool,
    /// View records owned by anyone, bypassing role scope
    #[serde(default)]
    pub can_view_all: bool,
    /// Modify records owned by anyone
    #[serde(default)]
    pub can_modify_all: bool,
}

impl ObjectPermission {
    /// Grant for one action
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.can_create,
            Action::Read => self.can_read,
            Action::Edit => self.can_edit,
            Action::Delete => self.can_delete,
            Action::ViewAll => self.can_view_all,
            Action::ModifyAll => self.can_modify_all,
        }
    }
}

/// Read/edit/hide grant for a single field of an object
///
/// Field permissions are a deny-list layered on top of an
/// already-granted object permission: a field with no entry is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPermission {
    /// Object type the field belongs to
    pub object: ObjectType,
    /// Field name within the object
    pub field_name: String,
    /// Read the field value
    #[serde(default)]
    pub can_read: bool,
    /// Edit the field value
    #[serde(default)]
    pub can_edit: bool,
    /// Hide the field entirely; dominates `can_read`/`can_edit`
    #[serde(default)]
    pub is_hidden: bool,
    /// Stored encrypted at rest
    #[serde(default)]
    pub is_encrypted: bool,
}

/// Profile-level system capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSystemPermissions {
    /// Call the public API
    pub can_access_api: bool,
    /// API requests per minute
    pub api_rate_limit: u32,
    /// Use the mobile app
    pub can_access_mobile_app: bool,
    /// Open reports
    pub can_access_reports: bool,
    /// Open dashboards
    pub can_access_dashboards: bool,
    /// Bulk-update records
    pub can_bulk_update: bool,
    /// Bulk-delete records
    pub can_bulk_delete: bool,
    /// Send mass email
    pub can_mass_email: bool,
    /// Skip validation rules on save
    pub can_bypass_validation: bool,
    /// Run tenant-defined automation
    pub can_run_automation: bool,
}

impl Default for ProfileSystemPermissions {
    fn default() -> Self {
        Self {
            can_access_api: true,
            api_rate_limit: 1000,
            can_access_mobile_app: true,
            can_access_reports: true,
            can_access_dashboards: true,
            can_bulk_update: false,
            can_bulk_delete: false,
            can_mass_email: false,
            can_bypass_validation: false,
            can_run_automation: false,
        }
    }
}

/// Per-user permission bundle, orthogonal to the role hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Stable business key
    pub profile_id: ProfileId,
    /// Owning tenant; `None` only on system templates
    pub tenant_id: Option<TenantId>,
    /// Display name, unique within the tenant
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Whether this row was seeded from a system template
    pub is_system_profile: bool,
    /// Object-level grants (allow-list)
    pub object_permissions: Vec<ObjectPermission>,
    /// Field-level restrictions (deny-list)
    pub field_permissions: Vec<FieldPermission>,
    /// Profile-level system capabilities
    pub system_permissions: ProfileSystemPermissions,
    /// Active flag; inactive profiles deny everything
    pub is_active: bool,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// Soft-delete timestamp
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new tenant-scoped profile with no grants
    pub fn new<S: Into<String>>(profile_id: ProfileId, tenant_id: TenantId, name: S) -> Self {
        let now = Utc::now();
        Self {
            profile_id,
            tenant_id: Some(tenant_id),
            name: name.into(),
            description: None,
            is_system_profile: false,
            object_permissions: vec![],
            field_permissions: vec![],
            system_permissions: ProfileSystemPermissions::default(),
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the profile can still be resolved by the engine
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Object-level entry for one object type
    pub fn object_permission(&self, object: ObjectType) -> Option<&ObjectPermission> {
        self.object_permissions.iter().find(|p| p.object == object)
    }

    /// Field-level entry for one field, matched case-insensitively on name
    pub fn field_permission(&self, object: ObjectType, field_name: &str) -> Option<&FieldPermission> {
        self.field_permissions
            .iter()
            .find(|p| p.object == object && p.field_name.eq_ignore_ascii_case(field_name))
    }

    /// Field grant evaluation: no entry allows, `is_hidden` denies both actions
    pub fn allows_field(&self, object: ObjectType, field_name: &str, action: FieldAction) -> bool {
        match self.field_permission(object, field_name) {
            None => true,
            Some(entry) if entry.is_hidden => false,
            Some(entry) => match action {
                FieldAction::Read => entry.can_read,
                FieldAction::Edit => entry.can_edit,
            },
        }
    }

    /// Bump the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Soft-delete the profile
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_lead_read() -> Profile {
        let mut profile = Profile::new(ProfileId::new("p1"), TenantId::new("t1"), "Standard");
        profile.object_permissions.push(ObjectPermission {
            object: ObjectType::Lead,
            can_read: true,
            ..Default::default()
        });
        profile
    }

    #[test]
    fn test_object_permission_allows_maps_actions() {
        let perm = ObjectPermission {
            object: ObjectType::Lead,
            can_read: true,
            can_edit: true,
            ..Default::default()
        };
        assert!(perm.allows(Action::Read));
        assert!(perm.allows(Action::Edit));
        assert!(!perm.allows(Action::Delete));
        assert!(!perm.allows(Action::ViewAll));
    }

    #[test]
    fn test_object_permission_lookup() {
        let profile = profile_with_lead_read();
        assert!(profile.object_permission(ObjectType::Lead).is_some());
        assert!(profile.object_permission(ObjectType::Account).is_none());
    }

    #[test]
    fn test_missing_field_entry_allows() {
        let profile = profile_with_lead_read();
        assert!(profile.allows_field(ObjectType::Lead, "company", FieldAction::Read));
        assert!(profile.allows_field(ObjectType::Lead, "company", FieldAction::Edit));
    }

    #[test]
    fn test_hidden_field_denies_despite_grants() {
        let mut profile = profile_with_lead_read();
        profile.field_permissions.push(FieldPermission {
            object: ObjectType::Lead,
            field_name: "expected_revenue".to_string(),
            can_read: true,
            can_edit: true,
            is_hidden: true,
            is_encrypted: false,
        });
        assert!(!profile.allows_field(ObjectType::Lead, "expected_revenue", FieldAction::Read));
        assert!(!profile.allows_field(ObjectType::Lead, "EXPECTED_REVENUE", FieldAction::Edit));
    }

    #[test]
    fn test_field_entry_grants_per_action() {
        let mut profile = profile_with_lead_read();
        profile.field_permissions.push(FieldPermission {
            object: ObjectType::Lead,
            field_name: "annual_revenue".to_string(),
            can_read: true,
            can_edit: false,
            is_hidden: false,
            is_encrypted: false,
        });
        assert!(profile.allows_field(ObjectType::Lead, "annual_revenue", FieldAction::Read));
        assert!(!profile.allows_field(ObjectType::Lead, "annual_revenue", FieldAction::Edit));
    }

    #[test]
    fn test_inactive_profile_is_not_usable() {
        let mut profile = profile_with_lead_read();
        assert!(profile.is_usable());
        profile.is_active = false;
        assert!(!profile.is_usable());
    }
}
