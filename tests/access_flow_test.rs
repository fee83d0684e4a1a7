//! End-to-end flow through the public API: provision a tenant, build a
//! small sales team, and exercise every decision surface the way an
//! entity service would.

use crm_access::config::AccessConfig;
use crm_access::models::{
    Action, DataVisibility, FieldAction, ObjectType, SystemPermission, TenantId, User, UserId,
};
use crm_access::store::{DirectoryStore, MemoryStore};
use crm_access::{AccessControl, AdminManager, TenantContext};
use std::sync::Arc;

const TENANT: &str = "tenant_acme";

struct TestEnv {
    store: Arc<MemoryStore>,
    access: AccessControl,
    admin: AdminManager,
    ctx: TenantContext,
}

async fn setup() -> TestEnv {
    let store = Arc::new(MemoryStore::new());
    let access = AccessControl::new(&AccessConfig::default(), store.clone() as Arc<dyn DirectoryStore>)
        .expect("access control");
    let admin = AdminManager::new(store.clone() as Arc<dyn DirectoryStore>, access.cache());
    let ctx = TenantContext::new(TenantId::new(TENANT), UserId::new("provisioner"), "admin");
    TestEnv {
        store,
        access,
        admin,
        ctx,
    }
}

async fn add_user(store: &MemoryStore, id: &str) {
    let user = User::new(UserId::new(id), TenantId::new(TENANT));
    store.insert_user(&user).await.unwrap();
}

#[tokio::test]
async fn test_sales_team_visibility_end_to_end() {
    let env = setup().await;
    let report = env.admin.provision_tenant(&TenantId::new(TENANT)).await.unwrap();

    let manager_role = report
        .roles
        .iter()
        .find(|role| role.name == "Sales Manager")
        .unwrap();
    let rep_role = report
        .roles
        .iter()
        .find(|role| role.name == "Sales Representative")
        .unwrap();
    let rep_profile = report
        .profiles
        .iter()
        .find(|profile| profile.name == "Sales Representative")
        .unwrap();

    assert_eq!(
        manager_role.permissions.data_visibility,
        DataVisibility::Subordinates
    );

    // Build the team: rep reports to manager
    add_user(&env.store, "manager").await;
    add_user(&env.store, "rep").await;
    let manager = UserId::new("manager");
    let rep = UserId::new("rep");

    env.admin
        .assign_role(&env.ctx, &manager, &manager_role.role_id)
        .await
        .unwrap();
    env.admin
        .assign_role(&env.ctx, &rep, &rep_role.role_id)
        .await
        .unwrap();
    env.admin
        .assign_profile(&env.ctx, &rep, &rep_profile.profile_id)
        .await
        .unwrap();
    env.admin
        .set_manager(&env.ctx, &rep, Some(&manager))
        .await
        .unwrap();

    // The rep works their own leads
    assert!(env
        .access
        .has_permission(&env.ctx, &rep, ObjectType::Lead, Action::Delete)
        .await
        .unwrap());
    assert!(!env
        .access
        .has_permission(&env.ctx, &rep, ObjectType::Lead, Action::ViewAll)
        .await
        .unwrap());

    // The manager sees the rep's records, not the other way around
    assert!(env
        .access
        .can_view_record(&env.ctx, &manager, &rep, ObjectType::Lead)
        .await
        .unwrap());
    assert!(!env
        .access
        .can_view_record(&env.ctx, &rep, &manager, ObjectType::Lead)
        .await
        .unwrap());

    // Hierarchy answers feed lead assignment
    assert!(env
        .access
        .is_subordinate(&env.ctx, &manager, &rep)
        .await
        .unwrap());
    assert_eq!(
        env.access.all_subordinates(&env.ctx, &manager).await.unwrap(),
        vec![rep.clone()]
    );

    // Fields are open until a profile restricts them
    assert!(env
        .access
        .has_field_permission(&env.ctx, &rep, ObjectType::Lead, "company", FieldAction::Edit)
        .await
        .unwrap());

    // Neither of them manages users
    assert!(!env
        .access
        .has_system_permission(&env.ctx, &rep, SystemPermission::ManageUsers)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_tenant_isolation_end_to_end() {
    let env = setup().await;
    env.admin.provision_tenant(&TenantId::new(TENANT)).await.unwrap();
    env.admin
        .provision_tenant(&TenantId::new("tenant_rival"))
        .await
        .unwrap();

    // A record fetched by primary key from another tenant is rejected
    // at the choke point before anything is returned.
    assert!(env
        .ctx
        .validate_resource_ownership(Some(&TenantId::new("tenant_rival")))
        .is_err());
    assert!(env
        .ctx
        .validate_resource_ownership(Some(&TenantId::new(TENANT)))
        .is_ok());

    // A user row from the rival tenant resolves to deny, even with a
    // generous profile attached.
    let rival_profiles = env
        .store
        .list_profiles_by_tenant(&TenantId::new("tenant_rival"))
        .await
        .unwrap();
    let rival_admin_profile = rival_profiles
        .iter()
        .find(|profile| profile.name == "Administrator")
        .unwrap();

    let mut outsider = User::new(UserId::new("outsider"), TenantId::new("tenant_rival"));
    outsider.profile_id = Some(rival_admin_profile.profile_id.clone());
    env.store.insert_user(&outsider).await.unwrap();

    assert!(!env
        .access
        .has_permission(
            &env.ctx,
            &UserId::new("outsider"),
            ObjectType::Account,
            Action::Read
        )
        .await
        .unwrap());
}

#[tokio::test]
async fn test_decisions_survive_cache_round_trips() {
    let env = setup().await;
    let report = env.admin.provision_tenant(&TenantId::new(TENANT)).await.unwrap();
    let read_only = report
        .profiles
        .iter()
        .find(|profile| profile.name == "Read-Only User")
        .unwrap();

    add_user(&env.store, "viewer").await;
    let viewer = UserId::new("viewer");
    env.admin
        .assign_profile(&env.ctx, &viewer, &read_only.profile_id)
        .await
        .unwrap();

    // Repeated identical calls hit the cache and agree with the engine
    for _ in 0..3 {
        assert!(env
            .access
            .has_permission(&env.ctx, &viewer, ObjectType::Account, Action::Read)
            .await
            .unwrap());
        assert!(!env
            .access
            .has_permission(&env.ctx, &viewer, ObjectType::Account, Action::Create)
            .await
            .unwrap());
    }
    let stats = env.access.cache().stats();
    assert!(stats.l1_hits + stats.l2_hits >= 4);
}
