#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// check bucket placement through crate-visible observers.

use crate::chained_hash_map::{ChainedHashMap, Insertion};
use crate::hash::{byte_sum, byte_sum_plus_one, HashFn};
use crate::resolve::{keep_new, keep_old};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn const_hash(_: &str) -> u64 {
    0
}

fn fnv1a(key: &str) -> u64 {
    key.bytes().fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

const HASHES: [HashFn; 4] = [byte_sum, byte_sum_plus_one, const_hash, fnv1a];

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    KeepOld(usize, i32),
    KeepNew(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Rehash(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::KeepOld(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::KeepNew(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            (0..HASHES.len()).prop_map(OpI::Rehash),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine(
    buckets: usize,
    hash: HashFn,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: ChainedHashMap<i32> = ChainedHashMap::with_hash_function(buckets, hash).unwrap();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::KeepOld(i, v) => {
                let k = &pool[i];
                let r = sut.insert_with_resolver(k, v, keep_old);
                let already = model.contains_key(k);
                prop_assert_eq!(r == Insertion::Resolved, already);
                model.entry(k.clone()).or_insert(v);
            }
            OpI::KeepNew(i, v) => {
                let k = &pool[i];
                let r = sut.insert_with_resolver(k, v, keep_new);
                prop_assert_eq!(r == Insertion::Resolved, model.contains_key(k));
                model.insert(k.clone(), v);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Rehash(h) => {
                sut.set_hash_function(HASHES[h]).unwrap();
                for (k, v) in &model {
                    prop_assert_eq!(sut.get(k), Some(v));
                }
            }
            OpI::Iterate => {
                let mut seen: BTreeMap<String, i32> = BTreeMap::new();
                let mut visits = 0;
                sut.iterate(|k, v| {
                    visits += 1;
                    seen.insert(k.to_string(), *v);
                });
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(visits, model.len());
                prop_assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Every entry sits in the bucket its key hashes to
        let mut placed = 0;
        for idx in 0..sut.num_buckets() {
            for (k, _) in sut.chain(idx) {
                prop_assert_eq!(sut.bucket_index(k), idx);
                placed += 1;
            }
        }
        prop_assert_eq!(placed, model.len());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate inserts never grow `len`; resolvers pick the stored value.
// - `get`/`contains_key` parity with the model, before and after rehash.
// - `remove` hands back the model's value and is a no-op on absent keys.
// - `iterate` visits each live entry exactly once.
// - Each entry lives in `bucket_index(key)` under the active hash.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(buckets in 1usize..16, (pool, ops) in arb_scenario()) {
        run_state_machine(buckets, byte_sum, &pool, ops)?;
    }
}

// Property: Same state-machine invariants as above, starting from a constant
// hash so every key shares one chain until a rehash spreads them.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(buckets in 1usize..16, (pool, ops) in arb_scenario()) {
        run_state_machine(buckets, const_hash, &pool, ops)?;
    }
}

// Property: rehashing any table with any hash keeps `len` and every value.
proptest! {
    #[test]
    fn prop_rehash_preserves_contents(
        buckets in 1usize..64,
        keys in proptest::collection::hash_set("[a-zA-Z0-9]{0,8}", 0..200),
        from in 0..HASHES.len(),
        to in 0..HASHES.len()
    ) {
        let mut m = ChainedHashMap::with_hash_function(buckets, HASHES[from]).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k, i);
        }
        let before: Vec<(String, usize)> = m.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        m.set_hash_function(HASHES[to]).unwrap();
        prop_assert_eq!(m.len(), keys.len());
        for (k, v) in &before {
            prop_assert_eq!(m.get(k), Some(v));
        }
    }
}
