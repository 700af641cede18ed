//! Property-based tests for the read-through cache
//!
//! Random operation sequences are replayed against a plain map model.

use encore_cache::{CacheConfig, ManualClock, MemoryStore, PersistentStore, ReadThroughCache};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const CATEGORIES: [&str; 4] = ["feed", "feedback", "song", "user"];

#[derive(Debug, Clone)]
enum Op {
    Set(usize, u8, i64),
    Invalidate(usize, u8),
    InvalidateType(usize),
    NewSession,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..CATEGORIES.len(), 0u8..6, any::<i64>()).prop_map(|(c, id, v)| Op::Set(c, id, v)),
        2 => (0..CATEGORIES.len(), 0u8..6).prop_map(|(c, id)| Op::Invalidate(c, id)),
        1 => (0..CATEGORIES.len()).prop_map(Op::InvalidateType),
        1 => Just(Op::NewSession),
    ]
}

fn new_cache(store: &Arc<MemoryStore>, clock: &ManualClock) -> ReadThroughCache {
    ReadThroughCache::with_clock(
        CacheConfig::default(),
        Some(store.clone() as Arc<dyn PersistentStore>),
        Arc::new(clock.clone()),
    )
}

proptest! {
    /// Property: without time passing, the cache behaves like a map across sessions
    #[test]
    fn cache_matches_model(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(0);
        let mut cache = new_cache(&store, &clock);
        let mut model: HashMap<(usize, u8), Value> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(c, id, v) => {
                    cache.set(CATEGORIES[c], &id.to_string(), json!(v), None);
                    model.insert((c, id), json!(v));
                }
                Op::Invalidate(c, id) => {
                    cache.invalidate(CATEGORIES[c], &id.to_string(), None);
                    model.remove(&(c, id));
                }
                Op::InvalidateType(c) => {
                    cache.invalidate_type(CATEGORIES[c]);
                    model.retain(|(cat, _), _| *cat != c);
                }
                Op::NewSession => cache = new_cache(&store, &clock),
            }
        }

        for c in 0..CATEGORIES.len() {
            for id in 0u8..6 {
                prop_assert_eq!(
                    cache.get(CATEGORIES[c], &id.to_string(), None),
                    model.get(&(c, id)).cloned()
                );
            }
        }
        prop_assert_eq!(store.len(), model.len());
    }

    /// Property: clear_all leaves at most the preserved entry behind
    #[test]
    fn clear_all_keeps_only_preserved(
        ids in prop::collection::hash_set(0u8..20, 1..10),
        keep in 0u8..20,
    ) {
        let store = Arc::new(MemoryStore::new());
        let cache = new_cache(&store, &ManualClock::new(0));
        for id in &ids {
            cache.set("user", &id.to_string(), json!(id), None);
        }

        cache.clear_all(Some(&format!("user:{}", keep)));

        for id in 0u8..20 {
            let expected = (id == keep && ids.contains(&id)).then(|| json!(id));
            prop_assert_eq!(cache.get("user", &id.to_string(), None), expected);
        }
        prop_assert_eq!(store.len(), usize::from(ids.contains(&keep)));
    }
}
