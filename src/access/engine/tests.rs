//! Tests for the decision engine

#[cfg(test)]
mod tests {
    use crate::access::context::TenantContext;
    use crate::access::engine::DecisionEngine;
    use crate::models::{
        Action, DataVisibility, FieldAction, FieldPermission, ObjectPermission, ObjectType,
        Profile, ProfileId, Role, RoleId, SystemPermission, TenantId, User, UserId, UserStatus,
    };
    use crate::store::{DirectoryStore, MemoryStore};
    use crate::utils::error::AccessError;
    use std::sync::Arc;

    const TENANT: &str = "tenant_acme";

    /// Fixture: a store, an engine over it, and a context for TENANT
    struct Fixture {
        store: Arc<MemoryStore>,
        engine: DecisionEngine,
        ctx: TenantContext,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let engine = DecisionEngine::new(store.clone() as Arc<dyn DirectoryStore>);
            let ctx = TenantContext::new(
                TenantId::new(TENANT),
                UserId::new("requester"),
                "admin",
            );
            Self { store, engine, ctx }
        }

        async fn add_user(&self, id: &str, manager: Option<&str>) -> User {
            let mut user = User::new(UserId::new(id), TenantId::new(TENANT));
            user.manager_id = manager.map(UserId::new);
            self.store.insert_user(&user).await.unwrap();
            user
        }

        async fn add_user_with(
            &self,
            id: &str,
            role: Option<&str>,
            profile: Option<&str>,
            manager: Option<&str>,
        ) -> User {
            let mut user = User::new(UserId::new(id), TenantId::new(TENANT));
            user.role_id = role.map(RoleId::new);
            user.profile_id = profile.map(ProfileId::new);
            user.manager_id = manager.map(UserId::new);
            self.store.insert_user(&user).await.unwrap();
            user
        }

        async fn add_role(&self, id: &str, visibility: DataVisibility) -> Role {
            let mut role = Role::new(RoleId::new(id), TenantId::new(TENANT), id);
            role.permissions.data_visibility = visibility;
            self.store.insert_role(&role).await.unwrap();
            role
        }

        async fn add_profile(&self, id: &str, object_permissions: Vec<ObjectPermission>) -> Profile {
            let mut profile = Profile::new(ProfileId::new(id), TenantId::new(TENANT), id);
            profile.object_permissions = object_permissions;
            self.store.insert_profile(&profile).await.unwrap();
            profile
        }
    }

    fn lead_crud_no_viewall() -> Vec<ObjectPermission> {
        vec![ObjectPermission {
            object: ObjectType::Lead,
            can_create: true,
            can_read: true,
            can_edit: true,
            can_delete: true,
            can_view_all: false,
            can_modify_all: false,
        }]
    }

    // --- Object-level permissions (allow-list, fail closed) ---

    #[tokio::test]
    async fn test_sales_rep_profile_scenario() {
        let f = Fixture::new();
        f.add_profile("p_rep", lead_crud_no_viewall()).await;
        f.add_user_with("rep", None, Some("p_rep"), None).await;

        let rep = UserId::new("rep");
        assert!(f
            .engine
            .has_permission(&f.ctx, &rep, ObjectType::Lead, Action::Delete)
            .await
            .unwrap());
        assert!(!f
            .engine
            .has_permission(&f.ctx, &rep, ObjectType::Lead, Action::ViewAll)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_read_only_profile_scenario() {
        let f = Fixture::new();
        let read_only: Vec<ObjectPermission> = ObjectType::ALL
            .iter()
            .map(|object| ObjectPermission {
                object: *object,
                can_read: true,
                ..Default::default()
            })
            .collect();
        f.add_profile("p_ro", read_only).await;
        f.add_user_with("viewer", None, Some("p_ro"), None).await;

        let viewer = UserId::new("viewer");
        assert!(!f
            .engine
            .has_permission(&f.ctx, &viewer, ObjectType::Account, Action::Create)
            .await
            .unwrap());
        assert!(f
            .engine
            .has_permission(&f.ctx, &viewer, ObjectType::Account, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_object_without_entry_denies_every_action() {
        let f = Fixture::new();
        f.add_profile("p_rep", lead_crud_no_viewall()).await;
        f.add_user_with("rep", None, Some("p_rep"), None).await;

        let rep = UserId::new("rep");
        for action in [
            Action::Create,
            Action::Read,
            Action::Edit,
            Action::Delete,
            Action::ViewAll,
            Action::ModifyAll,
        ] {
            assert!(
                !f.engine
                    .has_permission(&f.ctx, &rep, ObjectType::Contact, action)
                    .await
                    .unwrap(),
                "CONTACT has no entry, {:?} must deny",
                action
            );
        }
    }

    #[tokio::test]
    async fn test_missing_profile_fails_closed() {
        let f = Fixture::new();
        f.add_user_with("u1", None, Some("p_ghost"), None).await;

        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("u1"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_user_without_profile_fails_closed() {
        let f = Fixture::new();
        f.add_user("u1", None).await;

        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("u1"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_inactive_user_denies() {
        let f = Fixture::new();
        f.add_profile("p_rep", lead_crud_no_viewall()).await;
        let mut user = User::new(UserId::new("u1"), TenantId::new(TENANT));
        user.profile_id = Some(ProfileId::new("p_rep"));
        user.status = UserStatus::Inactive;
        f.store.insert_user(&user).await.unwrap();

        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("u1"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_deleted_profile_denies() {
        let f = Fixture::new();
        let mut profile = f.add_profile("p_rep", lead_crud_no_viewall()).await;
        profile.mark_deleted();
        f.store.update_profile(&profile).await.unwrap();
        f.add_user_with("u1", None, Some("p_rep"), None).await;

        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("u1"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_denies() {
        let f = Fixture::new();
        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("nobody"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_tenant_context_is_hard_failure() {
        let f = Fixture::new();
        let err = f
            .engine
            .has_permission(
                &TenantContext::anonymous(),
                &UserId::new("u1"),
                ObjectType::Lead,
                Action::Read,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::TenantContextMissing));
    }

    #[tokio::test]
    async fn test_cross_tenant_profile_is_not_resolved() {
        let f = Fixture::new();
        // Profile row exists but belongs to another tenant
        let mut profile = Profile::new(
            ProfileId::new("p_foreign"),
            TenantId::new("tenant_other"),
            "Foreign",
        );
        profile.object_permissions = lead_crud_no_viewall();
        f.store.insert_profile(&profile).await.unwrap();
        f.add_user_with("u1", None, Some("p_foreign"), None).await;

        assert!(!f
            .engine
            .has_permission(&f.ctx, &UserId::new("u1"), ObjectType::Lead, Action::Read)
            .await
            .unwrap());
    }

    // --- Record-level visibility ---

    #[tokio::test]
    async fn test_self_ownership_always_wins() {
        let f = Fixture::new();
        // No user row at all: self-ownership still allows
        let u = UserId::new("anyone");
        assert!(f
            .engine
            .can_view_record(&f.ctx, &u, &u, ObjectType::Lead)
            .await
            .unwrap());

        // With a row and the most restrictive configuration it still allows
        f.add_role("r_own", DataVisibility::Own).await;
        f.add_user_with("restricted", Some("r_own"), None, None).await;
        let restricted = UserId::new("restricted");
        assert!(f
            .engine
            .can_view_record(&f.ctx, &restricted, &restricted, ObjectType::Account)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_profile_view_all_short_circuits_role_scope() {
        let f = Fixture::new();
        f.add_role("r_own", DataVisibility::Own).await;
        f.add_profile(
            "p_viewall",
            vec![ObjectPermission {
                object: ObjectType::Lead,
                can_read: true,
                can_view_all: true,
                ..Default::default()
            }],
        )
        .await;
        f.add_user_with("u1", Some("r_own"), Some("p_viewall"), None).await;
        f.add_user("owner", None).await;

        // Own-scope role, but profile view-all wins
        assert!(f
            .engine
            .can_view_record(&f.ctx, &UserId::new("u1"), &UserId::new("owner"), ObjectType::Lead)
            .await
            .unwrap());
        // The grant is per object
        assert!(!f
            .engine
            .can_view_record(
                &f.ctx,
                &UserId::new("u1"),
                &UserId::new("owner"),
                ObjectType::Account
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_all_scope_allows_any_owner() {
        let f = Fixture::new();
        f.add_role("r_all", DataVisibility::All).await;
        f.add_user_with("ceo", Some("r_all"), None, None).await;
        f.add_user("someone", None).await;

        assert!(f
            .engine
            .can_view_record(
                &f.ctx,
                &UserId::new("ceo"),
                &UserId::new("someone"),
                ObjectType::Opportunity
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_own_scope_denies_foreign_records() {
        let f = Fixture::new();
        f.add_role("r_own", DataVisibility::Own).await;
        f.add_user_with("u1", Some("r_own"), None, None).await;
        f.add_user("owner", None).await;

        assert!(!f
            .engine
            .can_view_record(&f.ctx, &UserId::new("u1"), &UserId::new("owner"), ObjectType::Lead)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_role_defaults_to_own_scope() {
        let f = Fixture::new();
        f.add_user("u1", None).await;
        f.add_user("owner", None).await;

        assert!(!f
            .engine
            .can_view_record(&f.ctx, &UserId::new("u1"), &UserId::new("owner"), ObjectType::Lead)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_sales_manager_subordinates_scenario() {
        let f = Fixture::new();
        f.add_role("r_mgr", DataVisibility::Subordinates).await;
        f.add_user_with("manager", Some("r_mgr"), None, None).await;
        f.add_user_with("rep", Some("r_mgr"), None, Some("manager")).await;

        // M manages R: M sees R's lead
        assert!(f
            .engine
            .can_view_record(
                &f.ctx,
                &UserId::new("manager"),
                &UserId::new("rep"),
                ObjectType::Lead
            )
            .await
            .unwrap());
        // R does not manage M
        assert!(!f
            .engine
            .can_view_record(
                &f.ctx,
                &UserId::new("rep"),
                &UserId::new("manager"),
                ObjectType::Lead
            )
            .await
            .unwrap());
    }

    // --- Hierarchy traversal ---

    #[tokio::test]
    async fn test_subordinate_transitivity() {
        let f = Fixture::new();
        // Chain C -> B -> A
        f.add_user("a", None).await;
        f.add_user("b", Some("a")).await;
        f.add_user("c", Some("b")).await;

        let a = UserId::new("a");
        let c = UserId::new("c");
        assert!(f.engine.is_subordinate(&f.ctx, &a, &c).await.unwrap());
        assert!(!f.engine.is_subordinate(&f.ctx, &c, &a).await.unwrap());
        assert!(!f.engine.is_subordinate(&f.ctx, &a, &a).await.unwrap());
    }

    #[tokio::test]
    async fn test_subordinate_chain_to_null_terminates_false() {
        let f = Fixture::new();
        f.add_user("root", None).await;
        f.add_user("child", Some("root")).await;

        assert!(!f
            .engine
            .is_subordinate(&f.ctx, &UserId::new("child"), &UserId::new("root"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_cycle_terminates_in_upward_walk() {
        let f = Fixture::new();
        // Corrupted chain: b -> c -> b
        f.add_user("b", Some("c")).await;
        f.add_user("c", Some("b")).await;

        // b is c's direct manager, found before the cycle closes
        let result = f
            .engine
            .is_subordinate(&f.ctx, &UserId::new("b"), &UserId::new("c"))
            .await
            .unwrap();
        assert!(result);

        // An outsider's chain never reaches x; the cycle must still terminate
        assert!(!f
            .engine
            .is_subordinate(&f.ctx, &UserId::new("x"), &UserId::new("c"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_cycle_terminates_in_downward_walk() {
        let f = Fixture::new();
        f.add_user("b", Some("c")).await;
        f.add_user("c", Some("b")).await;

        let closure = f
            .engine
            .all_subordinates(&f.ctx, &UserId::new("b"))
            .await
            .unwrap();
        // c reports to b; b is skipped because it is the starting node
        assert_eq!(closure, vec![UserId::new("c")]);
    }

    #[tokio::test]
    async fn test_all_subordinates_is_transitive_and_ordered() {
        let f = Fixture::new();
        f.add_user("boss", None).await;
        f.add_user("m2", Some("boss")).await;
        f.add_user("m1", Some("boss")).await;
        f.add_user("r1", Some("m1")).await;
        f.add_user("r2", Some("m2")).await;

        let closure = f
            .engine
            .all_subordinates(&f.ctx, &UserId::new("boss"))
            .await
            .unwrap();
        // Breadth-first, children sorted per level
        assert_eq!(
            closure,
            vec![
                UserId::new("m1"),
                UserId::new("m2"),
                UserId::new("r1"),
                UserId::new("r2"),
            ]
        );

        // Deterministic for a fixed graph
        let again = f
            .engine
            .all_subordinates(&f.ctx, &UserId::new("boss"))
            .await
            .unwrap();
        assert_eq!(closure, again);
    }

    #[tokio::test]
    async fn test_all_subordinates_skips_foreign_tenant_users() {
        let f = Fixture::new();
        f.add_user("boss", None).await;
        f.add_user("rep", Some("boss")).await;

        let mut outsider = User::new(UserId::new("outsider"), TenantId::new("tenant_other"));
        outsider.manager_id = Some(UserId::new("boss"));
        f.store.insert_user(&outsider).await.unwrap();

        let closure = f
            .engine
            .all_subordinates(&f.ctx, &UserId::new("boss"))
            .await
            .unwrap();
        assert_eq!(closure, vec![UserId::new("rep")]);
    }

    // --- Field-level permissions ---

    #[tokio::test]
    async fn test_field_without_entry_allows_both_actions() {
        let f = Fixture::new();
        f.add_profile("p_rep", lead_crud_no_viewall()).await;
        f.add_user_with("rep", None, Some("p_rep"), None).await;

        let rep = UserId::new("rep");
        assert!(f
            .engine
            .has_field_permission(&f.ctx, &rep, ObjectType::Lead, "company", FieldAction::Read)
            .await
            .unwrap());
        assert!(f
            .engine
            .has_field_permission(&f.ctx, &rep, ObjectType::Lead, "company", FieldAction::Edit)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_hidden_field_denies_regardless_of_flags() {
        let f = Fixture::new();
        let mut profile = Profile::new(ProfileId::new("p_rep"), TenantId::new(TENANT), "Rep");
        profile.object_permissions = lead_crud_no_viewall();
        profile.field_permissions.push(FieldPermission {
            object: ObjectType::Lead,
            field_name: "expected_revenue".to_string(),
            can_read: true,
            can_edit: true,
            is_hidden: true,
            is_encrypted: false,
        });
        f.store.insert_profile(&profile).await.unwrap();
        f.add_user_with("rep", None, Some("p_rep"), None).await;

        let rep = UserId::new("rep");
        assert!(!f
            .engine
            .has_field_permission(
                &f.ctx,
                &rep,
                ObjectType::Lead,
                "expected_revenue",
                FieldAction::Read
            )
            .await
            .unwrap());
        assert!(!f
            .engine
            .has_field_permission(
                &f.ctx,
                &rep,
                ObjectType::Lead,
                "expected_revenue",
                FieldAction::Edit
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_field_check_without_profile_fails_closed() {
        let f = Fixture::new();
        f.add_user("u1", None).await;

        assert!(!f
            .engine
            .has_field_permission(
                &f.ctx,
                &UserId::new("u1"),
                ObjectType::Lead,
                "company",
                FieldAction::Read
            )
            .await
            .unwrap());
    }

    // --- System permissions ---

    #[tokio::test]
    async fn test_system_permission_from_role() {
        let f = Fixture::new();
        let mut role = Role::new(RoleId::new("r_admin"), TenantId::new(TENANT), "Admin");
        role.permissions.can_manage_users = true;
        f.store.insert_role(&role).await.unwrap();
        f.add_user_with("admin", Some("r_admin"), None, None).await;

        let admin = UserId::new("admin");
        assert!(f
            .engine
            .has_system_permission(&f.ctx, &admin, SystemPermission::ManageUsers)
            .await
            .unwrap());
        assert!(!f
            .engine
            .has_system_permission(&f.ctx, &admin, SystemPermission::ManageRoles)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_system_permission_without_role_denies() {
        let f = Fixture::new();
        f.add_user("u1", None).await;

        assert!(!f
            .engine
            .has_system_permission(&f.ctx, &UserId::new("u1"), SystemPermission::ManageUsers)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_deleted_role_denies_system_permission() {
        let f = Fixture::new();
        let mut role = Role::new(RoleId::new("r_admin"), TenantId::new(TENANT), "Admin");
        role.permissions.can_manage_users = true;
        role.mark_deleted();
        f.store.insert_role(&role).await.unwrap();
        f.add_user_with("admin", Some("r_admin"), None, None).await;

        assert!(!f
            .engine
            .has_system_permission(&f.ctx, &UserId::new("admin"), SystemPermission::ManageUsers)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_custom_permission_lookup() {
        let f = Fixture::new();
        let mut role = Role::new(RoleId::new("r_custom"), TenantId::new(TENANT), "Custom");
        role.permissions.custom_permissions = vec!["approve_discounts".to_string()];
        f.store.insert_role(&role).await.unwrap();
        f.add_user_with("u1", Some("r_custom"), None, None).await;

        let u1 = UserId::new("u1");
        assert!(f
            .engine
            .has_custom_permission(&f.ctx, &u1, "approve_discounts")
            .await
            .unwrap());
        assert!(!f
            .engine
            .has_custom_permission(&f.ctx, &u1, "approve_refunds")
            .await
            .unwrap());
    }
}
