//! Decision cache implementation
//!
//! Two tiers: a small L1 LRU for hot keys and a larger L2 map with TTL.
//! The cache is a pure performance layer over the decision engine; it
//! never changes a decision, only its latency. Concurrent first-time
//! computation of the same key may duplicate work; the last write wins.

use super::types::{
    AtomicDecisionStats, CacheEntry, DecisionCacheConfig, DecisionCacheStats, DecisionKey,
    DecisionValue,
};
use crate::models::UserId;
use crate::utils::error::{AccessError, Result};
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

/// Memoizing cache over decision engine outputs
pub struct DecisionCache {
    /// L1 cache: in-memory LRU for hot keys
    l1_cache: RwLock<LruCache<DecisionKey, CacheEntry>>,
    /// L2 cache: larger capacity with TTL
    l2_cache: DashMap<DecisionKey, CacheEntry>,
    /// Cache configuration
    config: DecisionCacheConfig,
    /// Cache statistics (lock-free atomics for hot path)
    stats: AtomicDecisionStats,
}

impl DecisionCache {
    /// Create a new decision cache
    pub fn new(config: DecisionCacheConfig) -> Result<Self> {
        config.validate().map_err(AccessError::config)?;

        // Keep a reasonable minimum L1 capacity for small configurations
        let l1_capacity = NonZeroUsize::new(config.max_entries / 10)
            .or_else(|| NonZeroUsize::new(100))
            .ok_or_else(|| AccessError::config("cache max_entries must be greater than 0"))?;

        Ok(Self {
            l1_cache: RwLock::new(LruCache::new(l1_capacity)),
            l2_cache: DashMap::new(),
            config,
            stats: AtomicDecisionStats::default(),
        })
    }

    /// Whether the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get a cached decision
    pub fn get(&self, key: &DecisionKey) -> Option<DecisionValue> {
        if !self.config.enabled {
            return None;
        }

        // Try L1 first
        {
            let mut l1 = self.l1_cache.write();
            if let Some(entry) = l1.get(key) {
                if !entry.is_expired() {
                    self.stats.l1_hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                l1.pop(key);
            }
        }

        self.stats.l1_misses.fetch_add(1, Ordering::Relaxed);

        // Try L2 and promote on hit
        if let Some(entry) = self.l2_cache.get(key) {
            if !entry.is_expired() {
                let entry = entry.clone();
                self.l1_cache.write().put(key.clone(), entry.clone());
                self.stats.l2_hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value);
            }
            drop(entry);
            self.l2_cache.remove(key);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }

        self.stats.l2_misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Get a cached boolean decision
    pub fn get_allowed(&self, key: &DecisionKey) -> Option<bool> {
        match self.get(key) {
            Some(DecisionValue::Allowed(allowed)) => Some(allowed),
            _ => None,
        }
    }

    /// Get a cached subordinate closure
    pub fn get_subordinates(&self, key: &DecisionKey) -> Option<Vec<UserId>> {
        match self.get(key) {
            Some(DecisionValue::Subordinates(users)) => Some(users),
            _ => None,
        }
    }

    /// Store a decision
    pub fn put(&self, key: DecisionKey, value: DecisionValue) {
        if !self.config.enabled {
            return;
        }

        let entry = CacheEntry::new(value, self.config.ttl);
        self.l2_cache.insert(key, entry);

        if self.l2_cache.len() > self.config.max_entries {
            self.cleanup_expired();
        }
    }

    /// Drop every entry whose decision depended on the given user
    ///
    /// Called when a user's role, profile, or manager assignment
    /// changes in a way that only affects that user.
    pub fn invalidate_user(&self, user_id: &UserId) {
        let mut removed = 0u64;

        {
            let mut l1 = self.l1_cache.write();
            let stale: Vec<DecisionKey> = l1
                .iter()
                .filter(|(key, _)| key.touches_user(user_id))
                .map(|(key, _)| key.clone())
                .collect();
            for key in stale {
                l1.pop(&key);
            }
        }

        self.l2_cache.retain(|key, _| {
            if key.touches_user(user_id) {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
        debug!(%user_id, removed, "invalidated cached decisions for user");
    }

    /// Drop every entry
    ///
    /// Role, profile, and manager-relationship mutations can change the
    /// outcome for a set of users that is not computable locally, so
    /// those paths flush the whole cache.
    pub fn invalidate_all(&self) {
        let removed = self.l2_cache.len() as u64;
        self.l1_cache.write().clear();
        self.l2_cache.clear();
        self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
        info!(removed, "decision cache flushed");
    }

    /// Drop expired entries from the L2 tier
    fn cleanup_expired(&self) {
        let mut removed = 0u64;
        self.l2_cache.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
            debug!(removed, "cleaned up expired decision cache entries");
        }
    }

    /// Number of live L2 entries
    pub fn len(&self) -> usize {
        self.l2_cache.len()
    }

    /// Whether the L2 tier is empty
    pub fn is_empty(&self) -> bool {
        self.l2_cache.is_empty()
    }

    /// Get cache statistics (lock-free snapshot)
    pub fn stats(&self) -> DecisionCacheStats {
        self.stats.snapshot()
    }
}
