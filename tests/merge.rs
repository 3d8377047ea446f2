use ironfold::merge::{Concat, Merge, MergeFn, Sum, SumByKey};
use std::collections::BTreeMap;

fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

#[test]
fn disjoint_keys_are_unioned() {
    let m = SumByKey::new();
    let out = m.merge(counts(&[("a", 1), ("b", 2)]), counts(&[("c", 3)]));
    assert_eq!(out, counts(&[("a", 1), ("b", 2), ("c", 3)]));
}

#[test]
fn shared_keys_are_added() {
    let m = SumByKey::new();
    let out = m.merge(counts(&[("a", 1), ("b", 2)]), counts(&[("b", 5), ("c", 1)]));
    assert_eq!(out, counts(&[("a", 1), ("b", 7), ("c", 1)]));
}

#[test]
fn empty_is_an_identity() {
    let m = SumByKey::new();
    let x = counts(&[("x", 4), ("y", 9)]);
    assert_eq!(m.merge(m.empty(), x.clone()), x);
    assert_eq!(m.merge(x.clone(), m.empty()), x);

    let s = Sum::<u64>::new();
    assert_eq!(s.merge(s.empty(), 11), 11);

    let c = Concat::new();
    assert_eq!(c.merge(vec![1, 2], c.empty()), vec![1, 2]);
}

#[test]
fn key_sum_is_associative_and_commutative() {
    let m = SumByKey::new();
    let a = counts(&[("a", 1), ("b", 1)]);
    let b = counts(&[("b", 2), ("c", 2)]);
    let c = counts(&[("a", 3), ("c", 3), ("d", 3)]);

    let left = m.merge(m.merge(a.clone(), b.clone()), c.clone());
    let right = m.merge(a.clone(), m.merge(b.clone(), c.clone()));
    let swapped = m.merge(m.merge(a.clone(), c.clone()), b.clone());
    assert_eq!(left, right);
    assert_eq!(left, swapped);
    assert_eq!(left, counts(&[("a", 4), ("b", 3), ("c", 5), ("d", 3)]));
    assert_eq!(m.merge(a.clone(), b.clone()), m.merge(b, a));
}

#[test]
fn concat_keeps_operand_order() {
    let c = Concat::new();
    let abc = c.concat(vec![vec!['a'], vec!['b', 'c'], vec![], vec!['d']]);
    assert_eq!(abc, vec!['a', 'b', 'c', 'd']);
    let ci = Concat::<i32>::new();
    assert_ne!(
        ci.merge(vec![1], vec![2]),
        ci.merge(vec![2], vec![1]),
        "concatenation is not commutative"
    );
}

#[test]
fn closures_can_act_as_operators() {
    let max = MergeFn::new(|| 0u32, |l: u32, r: u32| l.max(r));
    assert_eq!(max.concat([3u32, 9, 4]), 9);
    assert_eq!(max.concat(Vec::<u32>::new()), 0);
}
