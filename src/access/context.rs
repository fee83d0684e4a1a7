//! Request-scoped tenant context and the tenant isolation guard
//!
//! The context is created by the authentication middleware at request
//! entry and passed to every decision call. It is authoritative for
//! "who is asking"; a resource's own tenant id only answers "what is
//! being asked about" and must never substitute for it.

use crate::models::{TenantId, UserId};
use crate::utils::error::{AccessError, Result};
use crate::utils::generate_request_id;

/// Per-request holder of the authenticated tenant, user, and coarse role
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// Authenticated tenant
    pub tenant_id: Option<TenantId>,
    /// Authenticated user
    pub user_id: Option<UserId>,
    /// Coarse role label from the auth token, for logging only
    pub user_role: Option<String>,
    /// Request ID for log correlation
    pub request_id: String,
}

impl TenantContext {
    /// Context for an authenticated request
    pub fn new<S: Into<String>>(tenant_id: TenantId, user_id: UserId, user_role: S) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            user_id: Some(user_id),
            user_role: Some(user_role.into()),
            request_id: generate_request_id(),
        }
    }

    /// Context for an unauthenticated request
    ///
    /// Every decision entry point fails on this with
    /// [`AccessError::TenantContextMissing`]; it exists so middleware
    /// has something to install before authentication runs.
    pub fn anonymous() -> Self {
        Self {
            tenant_id: None,
            user_id: None,
            user_role: None,
            request_id: generate_request_id(),
        }
    }

    /// The current tenant id, or a hard failure when absent
    ///
    /// Absence is never a silent default; callers must not proceed.
    pub fn require_tenant_id(&self) -> Result<&TenantId> {
        self.tenant_id
            .as_ref()
            .ok_or(AccessError::TenantContextMissing)
    }

    /// Guard against cross-tenant access to a fetched resource
    ///
    /// This is the single choke point every entity service calls before
    /// returning or mutating a record fetched by primary key. A `None`
    /// resource tenant (system rows) passes.
    pub fn validate_resource_ownership(&self, resource_tenant_id: Option<&TenantId>) -> Result<()> {
        let current = self.require_tenant_id()?;
        match resource_tenant_id {
            Some(resource) if resource != current => Err(AccessError::access_denied(format!(
                "Resource belongs to another tenant (request {})",
                self.request_id
            ))),
            _ => Ok(()),
        }
    }
}
