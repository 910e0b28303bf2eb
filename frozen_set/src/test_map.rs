#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    freeze_map, ordinal::fold_char, Comparer, DefaultComparer, FrozenError, FrozenKey,
    FrozenMap, Ordinal, OrdinalIgnoreCase, Strategy,
};
use indexmap::{map::Entry, IndexMap};
use rand::prelude::*;
use std::fmt::Debug;

/// A frozen map checked against an `IndexMap` from the canonical form of each key to the first
/// key with that form and the last value written to it.
struct CheckedMap<K, V, C> {
    dut: FrozenMap<K, V, C>,
    ref_map: IndexMap<K, (K, V)>,
    canonical: fn(&K) -> K,
}

impl<K, V, C> CheckedMap<K, V, C>
where
    K: FrozenKey + Clone + Debug,
    V: Eq + Clone + Debug,
    C: Comparer<K>,
{
    fn new(entries: Vec<(K, V)>, comparer: C, canonical: fn(&K) -> K) -> Self {
        let mut ref_map: IndexMap<K, (K, V)> = IndexMap::new();
        for (key, value) in &entries {
            match ref_map.entry(canonical(key)) {
                Entry::Occupied(mut entry) => entry.get_mut().1 = value.clone(),
                Entry::Vacant(entry) => {
                    entry.insert((key.clone(), value.clone()));
                }
            }
        }
        let checked = CheckedMap {
            dut: FrozenMap::new(entries, comparer),
            ref_map,
            canonical,
        };
        checked.check();
        checked
    }
    fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let ref_result = self
            .ref_map
            .get(&(self.canonical)(key))
            .map(|(key, value)| (key, value));
        let dut_result = self.dut.get_key_value(key);
        assert_eq!(ref_result, dut_result, "lookup of {key:?}");
        assert_eq!(self.dut.get(key), ref_result.map(|(_, value)| value));
        assert_eq!(self.dut.contains_key(key), ref_result.is_some());
        match self.dut.try_index(key) {
            Ok(value) => assert_eq!(Some(value), ref_result.map(|(_, value)| value)),
            Err(err) => {
                assert_eq!(err, FrozenError::KeyNotFound);
                assert!(ref_result.is_none());
            }
        }
        ref_result
    }
    fn check(&self) {
        assert_eq!(self.ref_map.len(), self.dut.len());
        assert_eq!(self.dut.keys().len(), self.dut.values().len());
        for (index, (key, value)) in self.dut.iter().enumerate() {
            let (first_key, last_value) = &self.ref_map[&(self.canonical)(key)];
            assert_eq!(first_key, key);
            assert_eq!(last_value, value);
            assert_eq!(self.dut.get_index_of(key), Some(index));
            assert_eq!(self.dut.get_index(index), Some((key, value)));
            assert_eq!(&self.dut[key], value);
        }
        assert!(self.dut.keys().iter().eq(self.dut.iter().map(|(key, _)| key)));
        assert!(self.dut.values().iter().eq(self.dut.iter().map(|(_, value)| value)));
        assert!(self.dut.get_index(self.dut.len()).is_none());
    }
}

fn same<T: Clone>(value: &T) -> T {
    value.clone()
}

fn folded(value: &String) -> String {
    value.chars().map(fold_char).collect()
}

fn random_word(rng: &mut impl Rng, max_len: usize) -> String {
    const LETTERS: &[u8] = b"abcdeABCDE0123";
    let len = rng.gen_range(1..=max_len);
    (0..len)
        .map(|_| *LETTERS.choose(&mut *rng).unwrap() as char)
        .collect()
}

#[test]
fn test_int_maps() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(21);
    for len in [0, 2, 9, 12, 100, 3000] {
        let entries: Vec<(i32, u16)> = (0..len)
            .map(|_| (rng.gen_range(-2000..2000), rng.gen()))
            .collect();
        let map = CheckedMap::new(entries, DefaultComparer, same);
        for _ in 0..3000 {
            map.get_key_value(&rng.gen_range(-2500..2500));
        }
    }
}

#[test]
fn test_string_maps() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(22);
    for (len, max_len) in [(4, 2), (7, 4), (25, 3), (80, 8), (700, 12)] {
        let entries: Vec<(String, u32)> = (0..len)
            .map(|_| (random_word(&mut rng, max_len), rng.gen()))
            .collect();
        let probes: Vec<String> = (0..1000)
            .map(|_| random_word(&mut rng, max_len + 1))
            .collect();

        let ordinal = CheckedMap::new(entries.clone(), Ordinal, same);
        let ignore_case = CheckedMap::new(entries.clone(), OrdinalIgnoreCase, folded);
        for probe in probes.iter().chain(entries.iter().map(|(key, _)| key)) {
            ordinal.get_key_value(probe);
            ignore_case.get_key_value(probe);
            assert_eq!(
                ordinal.dut.get(probe.as_str()),
                ordinal.get_key_value(probe).map(|(_, value)| value)
            );
        }
    }
}

#[test]
fn test_last_value_wins() {
    let map = freeze_map(
        [("a", 1), ("b", 2), ("A", 3), ("c", 4), ("b", 5)],
        OrdinalIgnoreCase,
    );
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("a"), Some(&3));
    assert_eq!(map.get_key_value("A"), Some((&"a", &3)));
    assert_eq!(map["B"], 5);
    assert_eq!(map.get("d"), None);
    assert_eq!(map.strategy(), Strategy::SmallScan);
}

#[test]
fn test_copy_to() {
    let map: FrozenMap<u8, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    assert_eq!(map.strategy(), Strategy::SmallOrdered);

    let mut short = [(0, ' '); 2];
    assert_eq!(
        map.copy_to(&mut short),
        Err(FrozenError::DestinationTooShort {
            needed: 3,
            available: 2
        })
    );
    let mut dest = [(0, ' '); 4];
    map.copy_to(&mut dest).unwrap();
    assert_eq!(dest, [(1, 'a'), (2, 'b'), (3, 'c'), (0, ' ')]);
    assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b', 3: 'c'}");
}

#[test]
#[should_panic(expected = "key not found in frozen collection")]
fn test_index_missing() {
    let map: FrozenMap<&str, i32> = [("one", 1)].into_iter().collect();
    let _value = map["two"];
}
