//! Property-Based Tests for the eviction policies
//!
//! Uses proptest to check every policy against a naive reference model that
//! scans all entries to pick a victim.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::EvictionLog;
use crate::policy::{build_with_listener, CachePolicy, DynCache, PolicyKind};

// == Strategies ==
/// Small key space so puts collide with stored keys and trigger evictions
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..8
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

fn bounded_kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![
        Just(PolicyKind::Fifo),
        Just(PolicyKind::Lru),
        Just(PolicyKind::Lfu),
    ]
}

fn any_kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![Just(PolicyKind::Unlimited), bounded_kind_strategy()]
}

fn new_cache(kind: PolicyKind, capacity: usize) -> (DynCache<u8, u32>, EvictionLog<u8>) {
    let log = EvictionLog::new();
    let cache = build_with_listener(kind, capacity, log.clone()).unwrap();
    (cache, log)
}

// == Reference Model ==
struct Slot {
    key: u8,
    value: u32,
    inserted: u64,
    used: u64,
    frequency: u64,
}

/// Linear-scan rendition of each policy's victim rule.
struct Model {
    kind: PolicyKind,
    capacity: usize,
    slots: Vec<Slot>,
    evicted: Vec<u8>,
    clock: u64,
}

impl Model {
    fn new(kind: PolicyKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            slots: Vec::new(),
            evicted: Vec::new(),
            clock: 0,
        }
    }

    /// Sort key: the smallest rank is evicted first.
    fn rank(&self, slot: &Slot) -> (u64, u64) {
        match self.kind {
            PolicyKind::Unlimited | PolicyKind::Fifo => (0, slot.inserted),
            PolicyKind::Lru => (0, slot.used),
            PolicyKind::Lfu => (slot.frequency, slot.used),
        }
    }

    fn put(&mut self, key: u8, value: u32) {
        self.clock += 1;
        let now = self.clock;
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.key == key) {
            slot.value = value;
            slot.used = now;
            return;
        }
        if self.kind.is_bounded() && self.slots.len() >= self.capacity {
            let victim = (0..self.slots.len())
                .min_by_key(|&i| self.rank(&self.slots[i]))
                .unwrap();
            let slot = self.slots.remove(victim);
            self.evicted.push(slot.key);
        }
        self.slots.push(Slot {
            key,
            value,
            inserted: now,
            used: now,
            frequency: 1,
        });
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        self.clock += 1;
        let now = self.clock;
        let slot = self.slots.iter_mut().find(|slot| slot.key == key)?;
        slot.used = now;
        slot.frequency += 1;
        Some(slot.value)
    }

    /// Keys in eviction order, next victim first.
    fn victim_order(&self) -> Vec<u8> {
        let mut ranked: Vec<_> = self
            .slots
            .iter()
            .map(|slot| (self.rank(slot), slot.key))
            .collect();
        ranked.sort();
        ranked.into_iter().map(|(_, key)| key).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every bounded policy evicts exactly the victim the reference model picks,
    // returns the same lookups, and reports the same eviction order.
    #[test]
    fn prop_policies_match_reference_model(
        kind in bounded_kind_strategy(),
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, log) = new_cache(kind, capacity);
        let mut model = Model::new(kind, capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(key);
                    prop_assert_eq!(cache.get(&key).copied(), expected, "{} get({})", kind, key);
                }
            }
            prop_assert_eq!(log.keys(), model.evicted.clone(), "{} evictions diverged", kind);
            prop_assert_eq!(cache.len(), model.slots.len());
        }

        let order: Vec<u8> = cache.snapshot().into_iter().map(|(key, _)| *key).collect();
        prop_assert_eq!(order, model.victim_order(), "{} snapshot order", kind);
    }

    // Size never exceeds capacity after a put, and each put evicts at most once.
    #[test]
    fn prop_capacity_enforcement(
        kind in bounded_kind_strategy(),
        capacity in 1usize..10,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let (mut cache, log) = new_cache(kind, capacity);

        for op in ops {
            let before = log.len();
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
            }
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds max {}",
                cache.len(),
                capacity
            );
            prop_assert!(log.len() - before <= 1, "More than one eviction per operation");
        }
    }

    // A get right after a put returns the stored value, for every policy.
    #[test]
    fn prop_roundtrip_storage(
        kind in any_kind_strategy(),
        prefill in prop::collection::vec((key_strategy(), value_strategy()), 0..20),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let (mut cache, _log) = new_cache(kind, 4);
        for (k, v) in prefill {
            cache.put(k, v);
        }

        cache.put(key, value);
        prop_assert_eq!(cache.get(&key), Some(&value));
    }

    // Absent keys or values never reach the store.
    #[test]
    fn prop_absent_arguments_are_noops(
        kind in any_kind_strategy(),
        entries in prop::collection::vec((key_strategy(), value_strategy()), 0..10),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let (mut cache, log) = new_cache(kind, 4);
        for (k, v) in entries {
            cache.put(k, v);
        }
        let before: Vec<(u8, u32)> = cache.snapshot().into_iter().map(|(k, v)| (*k, *v)).collect();
        let evictions = log.len();

        cache.put_opt(None, Some(value));
        cache.put_opt(Some(key), None);
        prop_assert_eq!(cache.get_opt(None), None);

        let after: Vec<(u8, u32)> = cache.snapshot().into_iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(log.len(), evictions);
    }

    // Repeated gets return the same value and leave the size alone.
    #[test]
    fn prop_repeated_get_is_stable(
        kind in any_kind_strategy(),
        key in key_strategy(),
        value in value_strategy(),
        repeats in 1usize..20
    ) {
        let (mut cache, _log) = new_cache(kind, 4);
        cache.put(key, value);
        let size = cache.len();

        for _ in 0..repeats {
            prop_assert_eq!(cache.get(&key), Some(&value));
            prop_assert_eq!(cache.len(), size);
        }
    }

    // The unlimited policy behaves like a plain map.
    #[test]
    fn prop_unlimited_matches_hash_map(
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let (mut cache, log) = new_cache(PolicyKind::Unlimited, 1);
        let mut expected: HashMap<u8, u32> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                    expected.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), expected.get(&key));
                }
            }
        }

        prop_assert_eq!(cache.len(), expected.len());
        prop_assert!(log.is_empty());
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_agrees_on_lfu_scenario() {
        let mut model = Model::new(PolicyKind::Lfu, 4);
        for key in 0..4 {
            model.put(key, key as u32);
        }
        model.get(0);
        model.get(0);
        model.put(4, 4);

        assert_eq!(model.evicted, vec![1]);
    }

    #[test]
    fn test_capacity_one_evicts_on_every_new_key() {
        for kind in [PolicyKind::Fifo, PolicyKind::Lru, PolicyKind::Lfu] {
            let (mut cache, log) = new_cache(kind, 1);

            cache.put(1, 10);
            cache.put(2, 20);
            cache.put(2, 21);
            cache.put(3, 30);

            assert_eq!(log.keys(), vec![1, 2], "{}", kind);
            assert_eq!(cache.get(&3), Some(&30));
        }
    }
}
