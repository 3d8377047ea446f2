//! Assertion functions for aggregated results.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Assert that two ordered maps hold the same entries.
///
/// On mismatch the message names the first missing, extra, or differing key
/// rather than dumping both maps, which gets unreadable for large corpora.
///
/// # Panics
///
/// Panics if the maps differ.
///
/// # Example
///
/// ```
/// use ironfold::testing::assert_counts_equal;
/// use std::collections::BTreeMap;
///
/// let a = BTreeMap::from([("x".to_string(), 1u64)]);
/// assert_counts_equal(&a, &a.clone());
/// ```
pub fn assert_counts_equal<K, V>(actual: &BTreeMap<K, V>, expected: &BTreeMap<K, V>)
where
    K: Debug + Ord,
    V: Debug + PartialEq,
{
    for (k, ev) in expected {
        match actual.get(k) {
            None => panic!("Missing key {k:?} (expected value {ev:?})"),
            Some(av) => assert!(
                av == ev,
                "Value mismatch for key {k:?}:\n  Expected: {ev:?}\n  Actual: {av:?}"
            ),
        }
    }
    if let Some(extra) = actual.keys().find(|k| !expected.contains_key(*k)) {
        panic!(
            "Unexpected key {extra:?}\n  Expected size: {}\n  Actual size: {}",
            expected.len(),
            actual.len()
        );
    }
}

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}
