//! Property-Based Tests for Store Module
//!
//! Uses proptest to check the memory table against a simple model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::store::{Expiry, MemoryTable};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9+/=]{0,256}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| StoreOp::Get { key }),
        valid_key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Without eviction pressure the table behaves exactly like a HashMap.
    #[test]
    fn prop_matches_hashmap_model(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let mut table = MemoryTable::new(TEST_MAX_ENTRIES);
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    table.set(&key, value.clone(), TEST_TTL).unwrap();
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    let got = table.get(&key);
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                StoreOp::Delete { key } => {
                    prop_assert_eq!(table.delete(&key), model.remove(&key).is_some());
                }
            }
        }

        let stats = table.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(table.len(), model.len());
    }

    // The table never holds more than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        max_entries in 1usize..20,
        keys in prop::collection::vec(valid_key_strategy(), 1..60),
    ) {
        let mut table = MemoryTable::new(max_entries);
        let unique: HashSet<&String> = keys.iter().collect();

        for key in &keys {
            table.set(key, "v".to_string(), TEST_TTL).unwrap();
            prop_assert!(table.len() <= max_entries);
        }

        prop_assert_eq!(table.len(), unique.len().min(max_entries));
    }

    // The most recently written key always survives eviction.
    #[test]
    fn prop_latest_key_survives(
        keys in prop::collection::vec(valid_key_strategy(), 1..40),
    ) {
        let mut table = MemoryTable::new(3);
        for key in &keys {
            table.set(key, key.clone(), TEST_TTL).unwrap();
        }

        let last = keys.last().unwrap();
        prop_assert_eq!(table.get(last), Some(last.clone()));
    }

    // A fresh key reports a remaining TTL no larger than requested.
    #[test]
    fn prop_ttl_bounded(key in valid_key_strategy(), secs in 1u64..86_400) {
        let mut table = MemoryTable::new(TEST_MAX_ENTRIES);
        let ttl = Duration::from_secs(secs);
        table.set(&key, "v".to_string(), ttl).unwrap();

        match table.ttl(&key) {
            Some(Expiry::In(remaining)) => prop_assert!(remaining <= ttl),
            other => prop_assert!(false, "unexpected expiry {:?}", other),
        }
    }
}
