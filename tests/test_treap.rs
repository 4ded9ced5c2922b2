extern crate rand;
extern crate treap_collections;

use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use treap_collections::slot::{Layout, Slot, StorageMode};
use treap_collections::treap::{TreapMap, TreapSet};

#[test]
fn test_random_inserts_match_btreemap() {
    let mut rng = rand::thread_rng();
    let mut map = TreapMap::new();
    let mut model = BTreeMap::new();
    for _ in 0..10_000 {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        map.insert(key, val);
        model.insert(key, val);
    }

    assert_eq!(map.len(), model.len());
    assert_eq!(
        map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
        model.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
    );
}

#[test]
fn test_random_mixed_workload_matches_btreemap() {
    let mut rng = rand::thread_rng();
    let mut map = TreapMap::new();
    let mut model = BTreeMap::new();
    for _ in 0..10_000 {
        let key = rng.gen_range(0u32, 1000);
        if rng.gen::<bool>() {
            let val = rng.gen::<u32>();
            let displaced = map.insert(key, val).map(Slot::into_owned);
            assert_eq!(displaced, model.insert(key, val));
        } else {
            let removed = map
                .remove(&key)
                .map(|(key, value)| (key.into_owned(), value.into_owned()));
            assert_eq!(removed, model.remove_entry(&key));
        }
        assert_eq!(map.len(), model.len());
    }

    for key in 0..1000 {
        assert_eq!(map.get(&key), model.get(&key));
    }
}

#[test]
fn test_random_set_algebra_matches_btreeset() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let a_keys = (0..500).map(|_| rng.gen_range(0u32, 400)).collect::<Vec<_>>();
        let b_keys = (0..500).map(|_| rng.gen_range(0u32, 400)).collect::<Vec<_>>();
        let a_model = a_keys.iter().cloned().collect::<BTreeSet<_>>();
        let b_model = b_keys.iter().cloned().collect::<BTreeSet<_>>();

        let build = |keys: &[u32]| {
            let mut set = TreapSet::new();
            for &key in keys {
                set.insert(key);
            }
            set
        };

        let mut result = build(&a_keys);
        result.union(build(&b_keys));
        assert_eq!(
            result.iter().cloned().collect::<Vec<_>>(),
            a_model.union(&b_model).cloned().collect::<Vec<_>>(),
        );
        assert_eq!(result.len(), a_model.union(&b_model).count());

        let mut result = build(&a_keys);
        result.intersection(build(&b_keys));
        assert_eq!(
            result.iter().cloned().collect::<Vec<_>>(),
            a_model.intersection(&b_model).cloned().collect::<Vec<_>>(),
        );

        let mut result = build(&a_keys);
        result.difference(build(&b_keys));
        assert_eq!(
            result.iter().cloned().collect::<Vec<_>>(),
            a_model.difference(&b_model).cloned().collect::<Vec<_>>(),
        );
    }
}

#[test]
fn test_union_value_policy_prefers_self_on_clones() {
    let mut a = TreapMap::new();
    for key in 0..100u32 {
        a.insert(key, key);
    }

    // a clone shares every priority, so every overlapping pivot resolves by
    // the tie-break toward self
    let mut b = a.clone();
    for key in 0..100u32 {
        b.insert(key, key + 1000);
    }

    a.union(b);
    assert_eq!(a.len(), 100);
    for key in 0..100u32 {
        assert_eq!(a.get(&key), Some(&key));
    }
}

#[test]
fn test_clone_independence() {
    let mut rng = rand::thread_rng();
    let mut map = TreapMap::new();
    for _ in 0..1000 {
        map.insert(rng.gen_range(0u32, 500), rng.gen::<u32>());
    }
    let before = map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>();

    let mut duplicate = map.clone();
    assert_eq!(
        duplicate.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
        before,
    );

    for key in 0..500u32 {
        duplicate.remove(&key);
    }
    assert!(duplicate.is_empty());
    assert_eq!(
        map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
        before,
    );
}

#[test]
fn test_shared_values_alias_between_duplicates() {
    let layout = Layout {
        key: StorageMode::Owned,
        value: StorageMode::Shared,
    };
    let mut map = TreapMap::with_layout(layout);
    for key in 0..10u32 {
        map.insert(key, key.to_string());
    }

    let duplicate = map.clone();
    let original_values = map.into_iter().map(|pair| pair.1).collect::<Vec<_>>();
    let duplicate_values = duplicate.into_iter().map(|pair| pair.1).collect::<Vec<_>>();
    for (original, alias) in original_values.iter().zip(duplicate_values.iter()) {
        match (original, alias) {
            (Slot::Shared(original), Slot::Shared(alias)) => {
                assert!(Rc::ptr_eq(original, alias));
            },
            _ => panic!("expected shared value slots"),
        }
    }
}

#[test]
fn test_map_values_rewrites_shared_values() {
    let layout = Layout {
        key: StorageMode::Owned,
        value: StorageMode::Shared,
    };
    let mut map = TreapMap::with_layout(layout);
    for key in 0..100u32 {
        map.insert(key, key);
    }

    map.map_values(|value| Rc::new(value * 3)).unwrap();
    for key in 0..100u32 {
        assert_eq!(map.get(&key), Some(&(key * 3)));
    }

    let mut inline = TreapMap::new();
    inline.insert(1u32, 1u32);
    assert!(inline.map_values(|value| Rc::new(*value)).is_err());
    assert_eq!(inline.get(&1), Some(&1));
}

#[test]
fn test_keys_export_is_sorted_and_complete() {
    let mut rng = rand::thread_rng();
    let mut map = TreapMap::new();
    let mut model = BTreeSet::new();
    for _ in 0..1000 {
        let key = rng.gen::<u32>();
        map.insert(key, ());
        model.insert(key);
    }

    let exported = map.keys().cloned().collect::<Vec<_>>();
    assert_eq!(exported.len(), map.len());
    assert_eq!(exported, model.iter().cloned().collect::<Vec<_>>());

    assert_eq!(map.keys().take(0).count(), 0);
    assert_eq!(map.keys().take(10).count(), 10);
}
