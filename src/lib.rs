//! # crm-access
//!
//! Authorization and data-visibility decision engine for multi-tenant
//! CRM backends.
//!
//! Entity services (leads, contacts, accounts, opportunities, and the
//! rest) delegate every allow/deny question to this crate instead of
//! re-implementing visibility logic themselves:
//!
//! - **Object permissions** - CRUD-style allow-list grants per entity
//!   type, carried by a user's Profile. No entry means deny.
//! - **Field permissions** - a deny-list layered on top: no entry means
//!   allow, a hidden field denies everything.
//! - **Record visibility** - self-ownership, profile view-all, then the
//!   Role's data-visibility scope (own / subordinates / all users / all).
//! - **Hierarchy traversal** - cycle-safe manager-chain resolution with
//!   explicit worklists, never recursion.
//! - **Tenant isolation** - every decision requires a tenant context,
//!   and rows are never resolved across tenants.
//! - **Decision cache** - memoizes decisions per argument tuple with
//!   TTL expiry and explicit invalidation hooks on every admin mutation.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use crm_access::{AccessControl, AdminManager, TenantContext};
//! use crm_access::config::AccessConfig;
//! use crm_access::models::{Action, ObjectType, TenantId, UserId};
//! use crm_access::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let access = AccessControl::new(&AccessConfig::default(), store.clone())?;
//!     let admin = AdminManager::new(store, access.cache());
//!
//!     let tenant = TenantId::new("tenant_acme");
//!     admin.provision_tenant(&tenant).await?;
//!
//!     let ctx = TenantContext::new(tenant, UserId::new("user_1"), "sales_rep");
//!     let allowed = access
//!         .has_permission(&ctx, &UserId::new("user_1"), ObjectType::Lead, Action::Read)
//!         .await?;
//!     println!("may read leads: {}", allowed);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod access;
pub mod admin;
pub mod config;
pub mod models;
pub mod store;
pub mod utils;

// Re-export main types
pub use access::{AccessControl, DecisionCache, DecisionEngine, TenantContext};
pub use admin::AdminManager;
pub use config::Config;
pub use utils::error::{AccessError, Result};
