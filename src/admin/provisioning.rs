//! Tenant provisioning
//!
//! New tenants are seeded by cloning the four system role templates and
//! four system profile templates (`tenant_id = None`) into tenant-scoped
//! rows, with the hierarchy links rewired to the freshly minted ids.

use super::types::ProvisionReport;
use crate::models::{
    DataVisibility, ObjectPermission, ObjectType, Profile, ProfileId, Role, RoleId, TenantId,
};
use crate::store::DirectoryStore;
use crate::utils::error::{AccessError, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Template ids, stable across installations
const TPL_ROLE_ADMIN: &str = "role_tpl_administrator";
const TPL_ROLE_SALES_MANAGER: &str = "role_tpl_sales_manager";
const TPL_ROLE_SALES_REP: &str = "role_tpl_sales_representative";
const TPL_ROLE_READ_ONLY: &str = "role_tpl_read_only";

const TPL_PROFILE_ADMIN: &str = "profile_tpl_administrator";
const TPL_PROFILE_STANDARD: &str = "profile_tpl_standard";
const TPL_PROFILE_SALES_REP: &str = "profile_tpl_sales_representative";
const TPL_PROFILE_READ_ONLY: &str = "profile_tpl_read_only";

/// Seeds new tenants from the system templates
pub struct TenantProvisioner {
    store: Arc<dyn DirectoryStore>,
}

impl TenantProvisioner {
    /// Create a new provisioner
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Install the system templates if the directory has none yet
    pub async fn ensure_system_templates(&self) -> Result<()> {
        if self.store.find_system_roles().await?.is_empty() {
            info!("Installing system role templates");
            for role in system_role_templates() {
                self.store.insert_role(&role).await?;
            }
        }
        if self.store.find_system_profiles().await?.is_empty() {
            info!("Installing system profile templates");
            for profile in system_profile_templates() {
                self.store.insert_profile(&profile).await?;
            }
        }
        Ok(())
    }

    /// Clone the system templates into tenant-scoped rows
    ///
    /// Refuses to run twice for the same tenant.
    pub async fn provision_tenant(&self, tenant_id: &TenantId) -> Result<ProvisionReport> {
        if !self.store.list_roles_by_tenant(tenant_id).await?.is_empty() {
            return Err(AccessError::conflict(format!(
                "Tenant already provisioned: {}",
                tenant_id
            )));
        }

        self.ensure_system_templates().await?;

        let templates = self.store.find_system_roles().await?;
        let now = Utc::now();

        // First pass mints the new ids so links can be rewired
        let id_map: HashMap<RoleId, RoleId> = templates
            .iter()
            .map(|template| (template.role_id.clone(), RoleId::generate()))
            .collect();

        let mut roles = Vec::with_capacity(templates.len());
        for template in &templates {
            let mut role = template.clone();
            role.role_id = id_map[&template.role_id].clone();
            role.tenant_id = Some(tenant_id.clone());
            role.parent_role_id = template
                .parent_role_id
                .as_ref()
                .map(|parent| id_map[parent].clone());
            role.child_role_ids = template
                .child_role_ids
                .iter()
                .map(|child| id_map[child].clone())
                .collect();
            role.created_at = now;
            role.updated_at = now;
            self.store.insert_role(&role).await?;
            roles.push(role);
        }

        let mut profiles = Vec::new();
        for template in self.store.find_system_profiles().await? {
            let mut profile = template.clone();
            profile.profile_id = ProfileId::generate();
            profile.tenant_id = Some(tenant_id.clone());
            profile.created_at = now;
            profile.updated_at = now;
            self.store.insert_profile(&profile).await?;
            profiles.push(profile);
        }

        info!(
            %tenant_id,
            roles = roles.len(),
            profiles = profiles.len(),
            "tenant provisioned from system templates"
        );
        Ok(ProvisionReport { roles, profiles })
    }
}

/// The four system role templates
///
/// Administrator is the root; Sales Manager reports to it with
/// subordinate visibility; Sales Representative reports to the manager
/// with own-records visibility; Read-Only User reports to the root.
pub fn system_role_templates() -> Vec<Role> {
    let admin_id = RoleId::new(TPL_ROLE_ADMIN);
    let manager_id = RoleId::new(TPL_ROLE_SALES_MANAGER);
    let rep_id = RoleId::new(TPL_ROLE_SALES_REP);
    let read_only_id = RoleId::new(TPL_ROLE_READ_ONLY);

    let mut admin = template_role(admin_id.clone(), "Administrator");
    admin.level = 0;
    admin.child_role_ids = vec![manager_id.clone(), read_only_id.clone()];
    admin.permissions.data_visibility = DataVisibility::All;
    admin.permissions.can_manage_users = true;
    admin.permissions.can_manage_roles = true;
    admin.permissions.can_manage_profiles = true;
    admin.permissions.can_view_setup = true;
    admin.permissions.can_manage_sharing = true;
    admin.permissions.can_view_all_data = true;
    admin.permissions.can_modify_all_data = true;
    admin.permissions.can_view_audit_log = true;
    admin.permissions.can_export_data = true;
    admin.permissions.can_import_data = true;
    admin.module_permissions.setup = true;

    let mut manager = template_role(manager_id.clone(), "Sales Manager");
    manager.level = 1;
    manager.parent_role_id = Some(admin_id.clone());
    manager.parent_role_name = Some("Administrator".to_string());
    manager.child_role_ids = vec![rep_id.clone()];
    manager.permissions.data_visibility = DataVisibility::Subordinates;
    manager.permissions.can_export_data = true;

    let mut rep = template_role(rep_id, "Sales Representative");
    rep.level = 2;
    rep.parent_role_id = Some(manager_id);
    rep.parent_role_name = Some("Sales Manager".to_string());
    rep.permissions.data_visibility = DataVisibility::Own;

    let mut read_only = template_role(read_only_id, "Read-Only User");
    read_only.level = 1;
    read_only.parent_role_id = Some(admin_id);
    read_only.parent_role_name = Some("Administrator".to_string());
    read_only.permissions.data_visibility = DataVisibility::Own;
    read_only.module_permissions.reports = false;

    vec![admin, manager, rep, read_only]
}

fn template_role(role_id: RoleId, name: &str) -> Role {
    let mut role = Role::new(role_id, TenantId::new("unused"), name);
    role.tenant_id = None;
    role.is_system_role = true;
    role
}

/// The four system profile templates
pub fn system_profile_templates() -> Vec<Profile> {
    let mut admin = template_profile(TPL_PROFILE_ADMIN, "Administrator");
    admin.object_permissions = ObjectType::ALL
        .iter()
        .map(|object| ObjectPermission {
            object: *object,
            can_create: true,
            can_read: true,
            can_edit: true,
            can_delete: true,
            can_view_all: true,
            can_modify_all: true,
        })
        .collect();
    admin.system_permissions.can_bulk_update = true;
    admin.system_permissions.can_bulk_delete = true;
    admin.system_permissions.can_mass_email = true;
    admin.system_permissions.can_bypass_validation = true;
    admin.system_permissions.can_run_automation = true;

    let mut standard = template_profile(TPL_PROFILE_STANDARD, "Standard User");
    standard.object_permissions = ObjectType::ALL
        .iter()
        .map(|object| ObjectPermission {
            object: *object,
            can_create: true,
            can_read: true,
            can_edit: true,
            ..Default::default()
        })
        .collect();

    let mut rep = template_profile(TPL_PROFILE_SALES_REP, "Sales Representative");
    rep.object_permissions = ObjectType::ALL
        .iter()
        .map(|object| ObjectPermission {
            object: *object,
            can_create: true,
            can_read: true,
            can_edit: true,
            can_delete: true,
            ..Default::default()
        })
        .collect();

    let mut read_only = template_profile(TPL_PROFILE_READ_ONLY, "Read-Only User");
    read_only.object_permissions = ObjectType::ALL
        .iter()
        .map(|object| ObjectPermission {
            object: *object,
            can_read: true,
            ..Default::default()
        })
        .collect();
    read_only.system_permissions.can_access_api = false;

    vec![admin, standard, rep, read_only]
}

fn template_profile(profile_id: &str, name: &str) -> Profile {
    let mut profile = Profile::new(ProfileId::new(profile_id), TenantId::new("unused"), name);
    profile.tenant_id = None;
    profile.is_system_profile = true;
    profile
}
