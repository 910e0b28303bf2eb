#![allow(missing_docs)] // test only
use frozen_set::*;

#[test]
fn small_ordinal_map() {
    let map = freeze_map([("a", 1), ("bb", 2), ("ccc", 3)], Ordinal);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("bb"), Some(&2));
    assert_eq!(map.get("zz"), None);
    assert_eq!(map.strategy(), Strategy::SmallScan);
}

#[test]
fn direct_int_set() {
    let set = freeze_set(1..=11, DefaultComparer);
    assert_eq!(set.strategy(), Strategy::DirectInt);
    assert!(set.contains(&11));
    assert!(set.contains(&1));
    assert!(!set.contains(&12));
    assert!(!set.contains(&0));
    assert!(!set.contains(&-11));
}

#[test]
fn rhyming_words() {
    let words = ["cat", "bat", "hat", "mat", "rat"];

    let ordinal = freeze_set(words, Ordinal);
    assert_eq!(
        ordinal.strategy(),
        Strategy::OrdinalString {
            region: Region::Left { offset: 0, len: 1 },
            hash_mode: HashMode::Ordinal,
            single_unit: true,
            ignore_case: false,
        }
    );
    for word in words {
        assert!(ordinal.contains(word));
    }
    assert!(!ordinal.contains("CAT"));

    let ignore_case = freeze_set(words, OrdinalIgnoreCase);
    for word in words {
        assert!(ignore_case.contains(word));
    }
    assert!(ignore_case.contains("CAT"));
    assert!(ignore_case.contains("bAt"));
    assert_eq!(ignore_case.get("HAT"), Some(&"hat"));
    assert!(!ignore_case.contains("CAR"));
}

#[test]
fn empty_set() {
    let set: FrozenSet<String> = freeze_set([], DefaultComparer);
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
    assert!(!set.contains("anything"));
    assert!(!set.contains(""));
    assert_eq!(set.strategy(), Strategy::Empty);
    assert!(set.is_subset_of(&["x".to_string()]));
    assert!(!set.overlaps(&["x".to_string()]));
    assert!(set.set_equals(std::iter::empty()));
}

#[test]
fn length_buckets() {
    let keys = ["ab", "abc", "de", "abcd", "fg"];
    let set = freeze_set(keys, DefaultComparer);
    assert_eq!(set.strategy(), Strategy::LengthBuckets { ignore_case: false });
    for key in keys {
        assert!(set.contains(key));
    }
    // key order is kept, as length buckets index the keys in place
    assert_eq!(set.as_slice(), keys);
    assert!(!set.contains("a"));
    assert!(!set.contains("abcde"));
    assert!(!set.contains("xy"));
    assert!(!set.contains("xyz"));
}

#[test]
fn no_false_positives_from_substrings() {
    let long = |last: char| format!("ab{}{last}", "x".repeat(17));
    let keys = vec![
        "ab1".to_string(),
        "ab2".to_string(),
        "ab3".to_string(),
        long('4'),
        long('5'),
    ];
    let set = FrozenSet::new(keys.clone(), Ordinal);
    let Strategy::OrdinalString { region, .. } = set.strategy() else {
        panic!("unexpected strategy {}", set.strategy());
    };
    assert_eq!(region, Region::Right { back: 1, len: 1 });

    for key in &keys {
        assert!(set.contains(key.as_str()));
    }
    for probe in ["zz3", "b3", "ab4", "ab11", "3"] {
        assert!(!set.contains(probe), "{probe}");
    }
    assert!(!set.contains(long('1').as_str()));
    assert!(!set.contains(format!("zb{}5", "x".repeat(17)).as_str()));
}

#[test]
fn order_is_stable() {
    let map = freeze_map((0..200).map(|i| (format!("key{i}"), i)), Ordinal);
    let first: Vec<_> = map.iter().collect();
    let second: Vec<_> = map.iter().collect();
    assert_eq!(first, second);
    for (index, (key, value)) in map.iter().enumerate() {
        assert_eq!(&map.keys()[index], key);
        assert_eq!(&map.values()[index], value);
        assert_eq!(map[key.as_str()], *value);
    }
    let cloned = map.clone();
    assert!(cloned.iter().eq(map.iter()));
}

/// Compares numbers by their residue modulo the given divisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Modulo(u32);

impl Comparer<u32> for Modulo {
    fn equals(&self, a: &u32, b: &u32) -> bool {
        a % self.0 == b % self.0
    }
    fn hash(&self, value: &u32) -> i32 {
        (value % self.0) as i32
    }
}

#[test]
fn set_algebra_laws() {
    let a = freeze_set(["a", "b", "c"], Ordinal);
    let b = freeze_set(["c", "b", "a", "d"], Ordinal);
    let c = freeze_set(["x", "y", "z", "w", "v"], Ordinal);

    assert!(a.is_subset_of_set(&b));
    assert!(a.is_proper_subset_of_set(&b));
    assert!(b.is_superset_of_set(&a));
    assert!(b.is_proper_superset_of_set(&a));
    assert!(!a.is_superset_of_set(&b));
    assert!(a.overlaps_set(&b) && b.overlaps_set(&a));
    assert!(!a.overlaps_set(&c) && !c.overlaps_set(&a));
    assert!(a.set_equals_set(&a));
    assert!(!a.is_proper_subset_of_set(&a));

    // repeats in the other collection count once
    assert!(a.set_equals(&["c", "a", "a", "b", "c"]));
    assert!(a.is_proper_subset_of(&["c", "a", "a", "b", "q", "q"]));
    assert!(a.is_proper_superset_of(&["a", "a", "b"]));
    assert!(!a.is_proper_superset_of(&["a", "q"]));

    // the other collection is compared with the receiver's comparer
    let folded = freeze_set(["a", "B"], OrdinalIgnoreCase);
    assert!(folded.set_equals(&["A", "b", "A"]));
    assert!(!freeze_set(["a", "B"], Ordinal).set_equals(&["A", "b"]));
}

#[test]
fn set_algebra_with_different_comparers() {
    let mod10 = freeze_set([1, 2, 13], Modulo(10));
    let mod5 = freeze_set([11, 7, 3, 4], Modulo(5));

    // under mod 10: 11 ~ 1, 7 new, 3 ~ 13, 4 new
    assert!(!mod10.is_proper_subset_of_set(&mod5));
    assert!(mod10.overlaps_set(&mod5));
    assert!(!mod10.is_subset_of_set(&mod5));
    assert!(mod10.is_subset_of(&[11, 12, 3, 0]));
    assert!(mod10.set_equals(&[21, 32, 3]));

    // equal comparers take the direct path
    let other = freeze_set([21, 12], Modulo(10));
    assert!(other.is_proper_subset_of_set(&mod10));
    assert!(mod10.is_proper_superset_of_set(&other));
    assert!(mod10 != other);
    assert!(freeze_set([3, 11, 2], Modulo(10)) == mod10);
}
