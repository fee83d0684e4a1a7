//! Decision cache
//!
//! Memoizes decision engine outputs keyed by the full argument tuple.
//! See [`manager::DecisionCache`] for semantics and the invalidation
//! contract.

mod manager;
mod tests;
pub mod types;

pub use manager::DecisionCache;
pub use types::{DecisionCacheConfig, DecisionCacheStats, DecisionKey, DecisionValue};
