//! Decision cache type definitions

use crate::models::{Action, ObjectType, SystemPermission, UserId};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Decision cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCacheConfig {
    /// Enable the cache; when disabled every call reaches the engine
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of entries in the L2 tier
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Time-to-live for cached decisions
    ///
    /// Bounds staleness when an invalidation hook is missed; explicit
    /// invalidation remains the primary mechanism.
    #[serde(default = "default_ttl")]
    pub ttl: Duration,
}

fn default_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    10_000
}

fn default_ttl() -> Duration {
    Duration::from_secs(300)
}

impl Default for DecisionCacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_entries: default_max_entries(),
            ttl: default_ttl(),
        }
    }
}

impl DecisionCacheConfig {
    /// Merge cache configurations, preferring non-default values from `other`
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.max_entries != default_max_entries() {
            self.max_entries = other.max_entries;
        }
        if other.ttl != default_ttl() {
            self.ttl = other.ttl;
        }
        self
    }

    /// Validate the cache configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("cache max_entries must be greater than 0".to_string());
        }
        if self.ttl.is_zero() {
            return Err("cache ttl must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Memoization key: the full argument tuple of one decision call
///
/// Every variant carries the requesting user's id. User ids are
/// tenant-scoped, so keys can never collide across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecisionKey {
    /// Object-level permission check
    ObjectPermission {
        /// Requesting user
        user: UserId,
        /// Object checked
        object: ObjectType,
        /// Action checked
        action: Action,
    },
    /// Record-level visibility check
    RecordVisibility {
        /// Requesting user
        user: UserId,
        /// Record owner
        owner: UserId,
        /// Object checked
        object: ObjectType,
    },
    /// Upward manager-chain check
    Subordinate {
        /// Manager
        manager: UserId,
        /// Candidate subordinate
        target: UserId,
    },
    /// Downward subordinate closure
    SubordinateSet {
        /// Manager
        manager: UserId,
    },
    /// Coarse role permission check
    SystemPermission {
        /// Requesting user
        user: UserId,
        /// Permission checked
        permission: SystemPermission,
    },
}

impl DecisionKey {
    /// Whether this key's decision depended on the given user
    pub fn touches_user(&self, user_id: &UserId) -> bool {
        match self {
            DecisionKey::ObjectPermission { user, .. } => user == user_id,
            DecisionKey::RecordVisibility { user, owner, .. } => {
                user == user_id || owner == user_id
            }
            DecisionKey::Subordinate { manager, target } => {
                manager == user_id || target == user_id
            }
            DecisionKey::SubordinateSet { manager } => manager == user_id,
            DecisionKey::SystemPermission { user, .. } => user == user_id,
        }
    }
}

/// Memoized output of one decision call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionValue {
    /// Boolean allow/deny
    Allowed(bool),
    /// Subordinate closure
    Subordinates(Vec<UserId>),
}

/// Cache entry with expiry metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The memoized decision
    pub value: DecisionValue,
    /// When the entry was created
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    /// Create a new cache entry
    pub fn new(value: DecisionValue, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicDecisionStats {
    /// L1 cache hits
    pub l1_hits: AtomicU64,
    /// L1 cache misses
    pub l1_misses: AtomicU64,
    /// L2 cache hits
    pub l2_hits: AtomicU64,
    /// L2 cache misses
    pub l2_misses: AtomicU64,
    /// Entries dropped by invalidation or expiry
    pub evictions: AtomicU64,
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Default, Clone)]
pub struct DecisionCacheStats {
    /// L1 cache hits
    pub l1_hits: u64,
    /// L1 cache misses
    pub l1_misses: u64,
    /// L2 cache hits
    pub l2_hits: u64,
    /// L2 cache misses
    pub l2_misses: u64,
    /// Entries dropped by invalidation or expiry
    pub evictions: u64,
}

impl DecisionCacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let hits = self.l1_hits + self.l2_hits;
        let total = hits + self.l2_misses;

        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl AtomicDecisionStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self) -> DecisionCacheStats {
        DecisionCacheStats {
            l1_hits: self.l1_hits.load(Ordering::Relaxed),
            l1_misses: self.l1_misses.load(Ordering::Relaxed),
            l2_hits: self.l2_hits.load(Ordering::Relaxed),
            l2_misses: self.l2_misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Reset all stats to zero
    pub fn reset(&self) {
        self.l1_hits.store(0, Ordering::Relaxed);
        self.l1_misses.store(0, Ordering::Relaxed);
        self.l2_hits.store(0, Ordering::Relaxed);
        self.l2_misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}
