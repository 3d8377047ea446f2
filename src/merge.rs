//! Merge operators for combining partial results.
//!
//! A [`Merge<T>`] is an associative binary operator with an identity value:
//!
//! - `merge(merge(a, b), c) == merge(a, merge(b, c))`
//! - `merge(empty(), a) == a == merge(a, empty())`
//!
//! The [`aggregate`](crate::aggregate) engine relies on nothing else; it may
//! group merges in any way but never reorders operands, so operators need
//! not be commutative.
//!
//! Built-ins:
//! - [`Sum<T>`] -- numeric addition.
//! - [`SumByKey<K, V>`] -- union of ordered maps, adding values of shared keys.
//! - [`Concat<T>`] -- vector concatenation (associative, not commutative).

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::ops::Add;

/// An associative operator with an identity, shared across worker threads.
pub trait Merge<T>: Send + Sync + 'static {
    /// The identity value.
    fn empty(&self) -> T;

    /// Combine two partial results. `left` comes from earlier inputs than `right`.
    fn merge(&self, left: T, right: T) -> T;

    /// Merge every value in order, starting from [`empty`](Merge::empty).
    fn concat<I>(&self, values: I) -> T
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        values
            .into_iter()
            .fold(self.empty(), |acc, v| self.merge(acc, v))
    }
}

/* ===================== Sum<T> ===================== */

/// Numeric sum. Requires `T: Add<Output = T> + Default`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<T>);
impl<T> Sum<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Merge<T> for Sum<T>
where
    T: Add<Output = T> + Default + Send + Sync + 'static,
{
    fn empty(&self) -> T {
        T::default()
    }

    fn merge(&self, left: T, right: T) -> T {
        left + right
    }
}

/* ===================== SumByKey<K, V> ===================== */

/// Union of two ordered maps. Keys present on one side are kept untouched;
/// shared keys get `left[k] + right[k]`. An empty side is returned as the
/// other side without rebuilding it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumByKey<K, V>(pub PhantomData<(K, V)>);
impl<K, V> SumByKey<K, V> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<K, V> Merge<BTreeMap<K, V>> for SumByKey<K, V>
where
    K: Ord + Send + Sync + 'static,
    V: Add<Output = V> + Send + Sync + 'static,
{
    fn empty(&self) -> BTreeMap<K, V> {
        BTreeMap::new()
    }

    fn merge(&self, mut left: BTreeMap<K, V>, right: BTreeMap<K, V>) -> BTreeMap<K, V> {
        if left.is_empty() {
            return right;
        }
        for (k, v) in right {
            match left.remove(&k) {
                Some(l) => {
                    left.insert(k, l + v);
                }
                None => {
                    left.insert(k, v);
                }
            }
        }
        left
    }
}

/* ===================== Concat<T> ===================== */

/// Vector concatenation, preserving input order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Concat<T>(pub PhantomData<T>);
impl<T> Concat<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Merge<Vec<T>> for Concat<T>
where
    T: Send + Sync + 'static,
{
    fn empty(&self) -> Vec<T> {
        Vec::new()
    }

    fn merge(&self, mut left: Vec<T>, right: Vec<T>) -> Vec<T> {
        if left.is_empty() {
            return right;
        }
        left.extend(right);
        left
    }
}

/// Adapts a closure pair into a [`Merge`].
///
/// ```
/// use ironfold::merge::{Merge, MergeFn};
///
/// let longest = MergeFn::new(String::new, |a: String, b: String| {
///     if b.len() > a.len() { b } else { a }
/// });
/// assert_eq!(longest.concat(["ab", "abc", "x"].map(String::from)), "abc");
/// ```
pub struct MergeFn<E, M> {
    empty: E,
    merge: M,
}

impl<E, M> MergeFn<E, M> {
    /// `empty` builds the identity; `merge` combines two values.
    pub fn new(empty: E, merge: M) -> Self {
        Self { empty, merge }
    }
}

impl<T, E, M> Merge<T> for MergeFn<E, M>
where
    E: Fn() -> T + Send + Sync + 'static,
    M: Fn(T, T) -> T + Send + Sync + 'static,
{
    fn empty(&self) -> T {
        (self.empty)()
    }

    fn merge(&self, left: T, right: T) -> T {
        (self.merge)(left, right)
    }
}
