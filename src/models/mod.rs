//! Data model for the authorization core
//!
//! Persistent rows (Role, Profile, User) plus the closed vocabularies
//! the decision engine operates on. All rows are partitioned by tenant;
//! the only rows without a tenant are the system templates used to seed
//! new tenants.

pub mod ids;
pub mod object;
pub mod profile;
pub mod role;
pub mod user;

// Re-export commonly used types
pub use ids::{ProfileId, RoleId, TenantId, UserId};
pub use object::{Action, FieldAction, ObjectType, SystemPermission};
pub use profile::{FieldPermission, ObjectPermission, Profile, ProfileSystemPermissions};
pub use role::{DataVisibility, ModulePermissions, Role, RolePermissions};
pub use user::{User, UserStatus};
