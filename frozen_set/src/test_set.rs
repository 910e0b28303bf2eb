#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    ordinal::fold_char, Comparer, DefaultComparer, FrozenKey, FrozenSet, Ordinal,
    OrdinalIgnoreCase, SetAlgebra, Strategy,
};
use indexmap::IndexSet;
use rand::prelude::*;
use std::fmt::Debug;

/// A frozen set checked against an `IndexSet` holding the canonical form of every item.
struct CheckedSet<T, C> {
    dut: FrozenSet<T, C>,
    ref_set: IndexSet<T>,
    canonical: fn(&T) -> T,
}

impl<T: FrozenKey + Clone + Debug, C: Comparer<T>> CheckedSet<T, C> {
    fn new(items: Vec<T>, comparer: C, canonical: fn(&T) -> T) -> Self {
        let ref_set = items.iter().map(canonical).collect();
        let checked = CheckedSet {
            dut: FrozenSet::new(items, comparer),
            ref_set,
            canonical,
        };
        checked.check();
        checked
    }
    fn contains(&self, value: &T) -> bool {
        let ref_result = self.ref_set.contains(&(self.canonical)(value));
        let dut_result = self.dut.contains(value);
        assert_eq!(ref_result, dut_result, "lookup of {value:?} in {:?}", self.dut);
        if let Some(found) = self.dut.get(value) {
            assert!(self.dut.comparer().equals(found, value));
        }
        ref_result
    }
    fn check(&self) {
        assert_eq!(self.ref_set.len(), self.dut.len());
        assert_eq!(self.dut.iter().len(), self.dut.len());
        for (index, item) in self.dut.iter().enumerate() {
            assert!(self.ref_set.contains(&(self.canonical)(item)));
            assert_eq!(self.dut.get_index_of(item), Some(index));
            assert_eq!(self.dut.get_index(index), Some(item));
        }
        assert!(self.dut.iter().eq(self.dut.as_slice()));
        assert!(self.dut.set_equals(self.dut.as_slice()));
    }
}

fn same<T: Clone>(value: &T) -> T {
    value.clone()
}

fn folded(value: &String) -> String {
    value.chars().map(fold_char).collect()
}

/// Treats numbers as equal if they have the same residue modulo 10.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Mod10;

impl Comparer<u32> for Mod10 {
    fn equals(&self, a: &u32, b: &u32) -> bool {
        a % 10 == b % 10
    }
    fn hash(&self, value: &u32) -> i32 {
        (value % 10) as i32
    }
}

fn mod10(value: &u32) -> u32 {
    value % 10
}

fn random_string(rng: &mut impl Rng, alphabet: &[char], max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| *alphabet.choose(&mut *rng).unwrap()).collect()
}

fn random_case(rng: &mut impl Rng, value: &str) -> String {
    value
        .chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                // 'ß' upper cases to "SS", which does not fold back
                (Some(u), None) if fold_char(u) == fold_char(c) && rng.gen_bool(0.5) => u,
                _ => c,
            }
        })
        .collect()
}

const ASCII: &[char] = &['a', 'b', 'c', 'X', 'Y', 'Z', '0', '1', '-', '_'];
const MIXED: &[char] = &['a', 'B', 'ä', 'Ö', 'ß', 'é', 'Σ', 'σ', '1', ' '];

#[test]
fn test_int_sets() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(11);
    for len in [0, 1, 3, 10, 11, 60, 2000] {
        let items: Vec<i32> = (0..len).map(|_| rng.gen_range(-500..500) * 37).collect();
        let set = CheckedSet::new(items, DefaultComparer, same);
        match set.dut.len() {
            0 => assert_eq!(set.dut.strategy(), Strategy::Empty),
            1..=10 => assert_eq!(set.dut.strategy(), Strategy::SmallOrdered),
            _ => assert_eq!(set.dut.strategy(), Strategy::DirectInt),
        }
        for _ in 0..2000 {
            set.contains(&(rng.gen_range(-600..600) * 37));
            set.contains(&rng.gen());
        }
        set.contains(&i32::MIN);
        set.contains(&i32::MAX);
    }
}

#[test]
fn test_wide_int_sets() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(12);
    for len in [4, 10, 11, 300] {
        let items: Vec<u64> = (0..len).map(|_| rng.gen_range(0..1000) << 40).collect();
        let set = CheckedSet::new(items, DefaultComparer, same);
        for _ in 0..1000 {
            set.contains(&(rng.gen_range(0..1100) << 40));
            set.contains(&rng.gen_range(0..1100));
        }
    }
}

#[test]
fn test_ordinal_string_sets() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(13);
    for (len, max_len) in [(3, 4), (8, 3), (30, 6), (200, 12), (1500, 16)] {
        let items: Vec<String> = (0..len)
            .map(|_| random_string(&mut rng, ASCII, max_len))
            .collect();
        let probes: Vec<String> = (0..2000)
            .map(|_| random_string(&mut rng, ASCII, max_len + 2))
            .collect();

        let set = CheckedSet::new(items.clone(), Ordinal, same);
        let default = CheckedSet::new(items.clone(), DefaultComparer, same);
        assert_eq!(set.dut.strategy(), default.dut.strategy());
        for probe in probes.iter().chain(&items) {
            set.contains(probe);
            default.contains(probe);
            assert_eq!(set.dut.contains(probe.as_str()), set.contains(probe));
        }
    }
}

#[test]
fn test_ignore_case_string_sets() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(14);
    for alphabet in [ASCII, MIXED] {
        for (len, max_len) in [(4, 3), (9, 3), (40, 6), (400, 10)] {
            let items: Vec<String> = (0..len)
                .map(|_| random_string(&mut rng, alphabet, max_len))
                .collect();
            let set = CheckedSet::new(items.clone(), OrdinalIgnoreCase, folded);
            for item in &items {
                assert!(set.contains(&random_case(&mut rng, item)));
            }
            for _ in 0..2000 {
                let probe = random_string(&mut rng, MIXED, max_len + 1);
                set.contains(&probe);
                set.contains(&random_case(&mut rng, &probe));
            }
            // U+212A KELVIN SIGN folds to 'k'
            set.contains(&"\u{212A}".to_string());
        }
    }
}

#[test]
fn test_custom_comparer() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(15);
    for len in [3, 8, 40] {
        let items: Vec<u32> = (0..len).map(|_| rng.gen_range(0..1000)).collect();
        let set = CheckedSet::new(items, Mod10, mod10);
        assert!(set.dut.len() <= 10);
        if set.dut.len() > 4 {
            assert_eq!(set.dut.strategy(), Strategy::Hashed);
        }
        for probe in 0..100 {
            set.contains(&probe);
        }
    }
}

#[test]
fn test_composite_keys() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(16);
    for len in [2, 4, 5, 100] {
        let items: Vec<(u8, u8)> = (0..len).map(|_| (rng.gen_range(0..8), rng.gen())).collect();
        let set = CheckedSet::new(items, DefaultComparer, same);
        if set.dut.len() > 4 {
            assert_eq!(set.dut.strategy(), Strategy::Hashed);
        }
        for _ in 0..500 {
            set.contains(&(rng.gen_range(0..10), rng.gen()));
        }
    }
}

#[test]
fn test_set_relations() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(17);
    for _ in 0..200 {
        let universe: Vec<String> = (0..rng.gen_range(0..30)).map(|i| format!("k{i}")).collect();
        let pick = |rng: &mut rand_pcg::Pcg64| -> Vec<String> {
            universe
                .iter()
                .filter(|_| rng.gen_bool(0.5))
                .cloned()
                .collect()
        };
        let a_items = pick(&mut rng);
        let mut b_items = pick(&mut rng);
        if rng.gen_bool(0.2) {
            b_items = a_items.clone();
        }
        let a = FrozenSet::new(a_items.clone(), Ordinal);
        let b = FrozenSet::new(b_items.clone(), Ordinal);
        let ref_a: IndexSet<&String> = a_items.iter().collect();
        let ref_b: IndexSet<&String> = b_items.iter().collect();

        // repeated items in the other collection count once
        let mut b_repeated = b_items.clone();
        b_repeated.extend(b_items.iter().take(3).cloned());

        let subset = ref_a.is_subset(&ref_b);
        let superset = ref_a.is_superset(&ref_b);
        assert_eq!(a.is_subset_of(&b_repeated), subset);
        assert_eq!(a.is_subset_of_set(&b), subset);
        assert_eq!(a.is_superset_of(&b_repeated), superset);
        assert_eq!(a.is_superset_of_set(&b), superset);
        assert_eq!(a.is_proper_subset_of(&b_repeated), subset && ref_a != ref_b);
        assert_eq!(a.is_proper_subset_of_set(&b), subset && ref_a != ref_b);
        assert_eq!(a.is_proper_superset_of(&b_repeated), superset && ref_a != ref_b);
        assert_eq!(a.is_proper_superset_of_set(&b), superset && ref_a != ref_b);
        assert_eq!(a.overlaps(&b_repeated), !ref_a.is_disjoint(&ref_b));
        assert_eq!(a.overlaps_set(&b), !ref_a.is_disjoint(&ref_b));
        assert_eq!(a.set_equals(&b_repeated), ref_a == ref_b);
        assert_eq!(a.set_equals_set(&b), ref_a == ref_b);
        assert_eq!(a == b, ref_a == ref_b);
    }
}
