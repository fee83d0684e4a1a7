//! Tests for the decision cache

#[cfg(test)]
mod tests {
    use crate::access::cache::types::{DecisionCacheConfig, DecisionKey, DecisionValue};
    use crate::access::cache::DecisionCache;
    use crate::models::{Action, ObjectType, UserId};
    use std::time::Duration;

    fn cache_with_ttl(ttl: Duration) -> DecisionCache {
        DecisionCache::new(DecisionCacheConfig {
            enabled: true,
            max_entries: 1000,
            ttl,
        })
        .unwrap()
    }

    fn object_key(user: &str) -> DecisionKey {
        DecisionKey::ObjectPermission {
            user: UserId::new(user),
            object: ObjectType::Lead,
            action: Action::Read,
        }
    }

    #[test]
    fn test_put_then_get() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        let key = object_key("u1");

        assert!(cache.get_allowed(&key).is_none());
        cache.put(key.clone(), DecisionValue::Allowed(true));
        assert_eq!(cache.get_allowed(&key), Some(true));
    }

    #[test]
    fn test_distinct_tuples_are_distinct_keys() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        cache.put(object_key("u1"), DecisionValue::Allowed(true));

        let other_action = DecisionKey::ObjectPermission {
            user: UserId::new("u1"),
            object: ObjectType::Lead,
            action: Action::Delete,
        };
        assert!(cache.get_allowed(&other_action).is_none());
        assert!(cache.get_allowed(&object_key("u2")).is_none());
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let cache = cache_with_ttl(Duration::from_millis(5));
        let key = object_key("u1");
        cache.put(key.clone(), DecisionValue::Allowed(true));
        assert_eq!(cache.get_allowed(&key), Some(true));

        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get_allowed(&key).is_none());
    }

    #[test]
    fn test_subordinate_set_roundtrip() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        let key = DecisionKey::SubordinateSet {
            manager: UserId::new("m1"),
        };
        let closure = vec![UserId::new("r1"), UserId::new("r2")];
        cache.put(key.clone(), DecisionValue::Subordinates(closure.clone()));
        assert_eq!(cache.get_subordinates(&key), Some(closure));
        // Wrong accessor for the value shape yields nothing
        assert!(cache.get_allowed(&key).is_none());
    }

    #[test]
    fn test_invalidate_user_drops_only_their_keys() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        cache.put(object_key("u1"), DecisionValue::Allowed(true));
        cache.put(object_key("u2"), DecisionValue::Allowed(false));
        let visibility_key = DecisionKey::RecordVisibility {
            user: UserId::new("u3"),
            owner: UserId::new("u1"),
            object: ObjectType::Account,
        };
        cache.put(visibility_key.clone(), DecisionValue::Allowed(true));

        cache.invalidate_user(&UserId::new("u1"));

        assert!(cache.get_allowed(&object_key("u1")).is_none());
        // u1 was the record owner, so that decision depended on u1 too
        assert!(cache.get_allowed(&visibility_key).is_none());
        assert_eq!(cache.get_allowed(&object_key("u2")), Some(false));
    }

    #[test]
    fn test_invalidate_all_empties_the_cache() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        cache.put(object_key("u1"), DecisionValue::Allowed(true));
        cache.put(object_key("u2"), DecisionValue::Allowed(true));
        assert_eq!(cache.len(), 2);

        cache.invalidate_all();
        assert!(cache.is_empty());
        assert!(cache.get_allowed(&object_key("u1")).is_none());
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let cache = DecisionCache::new(DecisionCacheConfig {
            enabled: false,
            max_entries: 1000,
            ttl: Duration::from_secs(60),
        })
        .unwrap();

        let key = object_key("u1");
        cache.put(key.clone(), DecisionValue::Allowed(true));
        assert!(cache.get_allowed(&key).is_none());
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let cache = cache_with_ttl(Duration::from_secs(60));
        let key = object_key("u1");

        assert!(cache.get_allowed(&key).is_none());
        cache.put(key.clone(), DecisionValue::Allowed(true));
        cache.get_allowed(&key);
        cache.get_allowed(&key);

        let stats = cache.stats();
        assert_eq!(stats.l2_misses, 1);
        assert!(stats.l1_hits + stats.l2_hits >= 2);
        assert!(stats.hit_rate() > 0.0);
    }

    #[test]
    fn test_touches_user_covers_both_sides_of_subordinate_keys() {
        let key = DecisionKey::Subordinate {
            manager: UserId::new("m1"),
            target: UserId::new("r1"),
        };
        assert!(key.touches_user(&UserId::new("m1")));
        assert!(key.touches_user(&UserId::new("r1")));
        assert!(!key.touches_user(&UserId::new("x")));
    }
}
