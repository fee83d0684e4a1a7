//! Authorization and data-visibility decision system
//!
//! This module composes the tenant context guard, the decision engine,
//! and the decision cache into the single surface entity services call.
//! Entity services must never re-implement visibility logic themselves.

pub mod cache;
pub mod context;
pub mod engine;

pub use cache::{DecisionCache, DecisionCacheConfig, DecisionCacheStats};
pub use context::TenantContext;
pub use engine::DecisionEngine;

use crate::config::AccessConfig;
use crate::models::{Action, FieldAction, ObjectType, SystemPermission, UserId};
use crate::store::DirectoryStore;
use crate::utils::error::Result;
use cache::{DecisionKey, DecisionValue};
use std::sync::Arc;
use tracing::info;

/// Cached decision surface exposed to entity services
///
/// Wraps the engine's object, record, hierarchy, and system checks in
/// the decision cache. Field-level checks are cheap profile scans and
/// go straight to the engine. The cache never changes a decision's
/// result, only its latency on repeated identical calls.
#[derive(Clone)]
pub struct AccessControl {
    store: Arc<dyn DirectoryStore>,
    engine: Arc<DecisionEngine>,
    cache: Arc<DecisionCache>,
}

impl AccessControl {
    /// Create a new access control system
    pub fn new(config: &AccessConfig, store: Arc<dyn DirectoryStore>) -> Result<Self> {
        info!("Initializing access control system");

        let engine = Arc::new(DecisionEngine::new(Arc::clone(&store)));
        let cache = Arc::new(DecisionCache::new(config.cache.clone())?);

        Ok(Self {
            store,
            engine,
            cache,
        })
    }

    /// Whether a user may perform `action` on `object`
    pub async fn has_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        object: ObjectType,
        action: Action,
    ) -> Result<bool> {
        let key = DecisionKey::ObjectPermission {
            user: user_id.clone(),
            object,
            action,
        };
        if let Some(allowed) = self.cache.get_allowed(&key) {
            return Ok(allowed);
        }

        let allowed = self.engine.has_permission(ctx, user_id, object, action).await?;
        self.cache.put(key, DecisionValue::Allowed(allowed));
        Ok(allowed)
    }

    /// Whether a user may view a record owned by `record_owner_id`
    pub async fn can_view_record(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        record_owner_id: &UserId,
        object: ObjectType,
    ) -> Result<bool> {
        let key = DecisionKey::RecordVisibility {
            user: user_id.clone(),
            owner: record_owner_id.clone(),
            object,
        };
        if let Some(allowed) = self.cache.get_allowed(&key) {
            return Ok(allowed);
        }

        let allowed = self
            .engine
            .can_view_record(ctx, user_id, record_owner_id, object)
            .await?;
        self.cache.put(key, DecisionValue::Allowed(allowed));
        Ok(allowed)
    }

    /// Whether `target_id` transitively reports to `manager_id`
    pub async fn is_subordinate(
        &self,
        ctx: &TenantContext,
        manager_id: &UserId,
        target_id: &UserId,
    ) -> Result<bool> {
        let key = DecisionKey::Subordinate {
            manager: manager_id.clone(),
            target: target_id.clone(),
        };
        if let Some(allowed) = self.cache.get_allowed(&key) {
            return Ok(allowed);
        }

        let allowed = self.engine.is_subordinate(ctx, manager_id, target_id).await?;
        self.cache.put(key, DecisionValue::Allowed(allowed));
        Ok(allowed)
    }

    /// Transitive closure of direct reports under `manager_id`
    ///
    /// Lead assignment consumes this as its eligibility pool.
    pub async fn all_subordinates(
        &self,
        ctx: &TenantContext,
        manager_id: &UserId,
    ) -> Result<Vec<UserId>> {
        let key = DecisionKey::SubordinateSet {
            manager: manager_id.clone(),
        };
        if let Some(subordinates) = self.cache.get_subordinates(&key) {
            return Ok(subordinates);
        }

        let subordinates = self.engine.all_subordinates(ctx, manager_id).await?;
        self.cache
            .put(key, DecisionValue::Subordinates(subordinates.clone()));
        Ok(subordinates)
    }

    /// Whether a user may read or edit one field of an object
    pub async fn has_field_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        object: ObjectType,
        field_name: &str,
        action: FieldAction,
    ) -> Result<bool> {
        self.engine
            .has_field_permission(ctx, user_id, object, field_name, action)
            .await
    }

    /// Whether a user's role grants a named administrative permission
    pub async fn has_system_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        permission: SystemPermission,
    ) -> Result<bool> {
        let key = DecisionKey::SystemPermission {
            user: user_id.clone(),
            permission,
        };
        if let Some(allowed) = self.cache.get_allowed(&key) {
            return Ok(allowed);
        }

        let allowed = self
            .engine
            .has_system_permission(ctx, user_id, permission)
            .await?;
        self.cache.put(key, DecisionValue::Allowed(allowed));
        Ok(allowed)
    }

    /// Whether a user's role carries a tenant-defined custom permission label
    pub async fn has_custom_permission(
        &self,
        ctx: &TenantContext,
        user_id: &UserId,
        name: &str,
    ) -> Result<bool> {
        self.engine.has_custom_permission(ctx, user_id, name).await
    }

    /// The uncached decision engine
    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// The decision cache, shared with the admin operations for invalidation
    pub fn cache(&self) -> Arc<DecisionCache> {
        Arc::clone(&self.cache)
    }

    /// The underlying directory store
    pub fn store(&self) -> Arc<dyn DirectoryStore> {
        Arc::clone(&self.store)
    }
}
