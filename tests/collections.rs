use rand::SeedableRng;
use rand::rngs::StdRng;
use rowcast::testing::assert_same_multiset;
use rowcast::*;
use std::collections::HashMap;

#[test]
fn shuffle_is_a_permutation() {
    let source: Vec<u32> = (0..200).collect();
    let out: Vec<u32> = shuffle(source.clone(), StdRng::seed_from_u64(1)).collect();
    assert_same_multiset(&out, &source);
}

#[test]
fn shuffle_keeps_duplicates() {
    let source = vec!["a", "b", "a", "c", "a"];
    let out: Vec<&str> = shuffle(source.clone(), StdRng::seed_from_u64(9)).collect();
    assert_same_multiset(&out, &source);
}

#[test]
fn same_seed_same_order() {
    let a: Vec<u32> = shuffle(0..50, StdRng::seed_from_u64(42)).collect();
    let b: Vec<u32> = shuffle(0..50, StdRng::seed_from_u64(42)).collect();
    assert_eq!(a, b);
}

#[test]
fn shuffle_of_nothing_is_nothing() {
    let mut it = shuffle(Vec::<u8>::new(), StdRng::seed_from_u64(0));
    assert_eq!(it.len(), 0);
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn shuffle_is_lazy_and_exact_sized() {
    let mut it = shuffle(vec![10, 20, 30], StdRng::seed_from_u64(3));
    assert_eq!(it.len(), 3);
    let first = it.next();
    assert!(matches!(first, Some(10 | 20 | 30)));
    assert_eq!(it.len(), 2);
    let rest: Vec<i32> = it.collect();
    assert_eq!(rest.len(), 2);
    assert!(!rest.contains(&first.unwrap_or_default()));
}

#[test]
fn every_position_is_reachable() {
    // over many seeds, each element should lead at least once
    let mut leaders = HashMap::new();
    for seed in 0..400 {
        let first = shuffle(0..4, StdRng::seed_from_u64(seed)).next();
        *leaders.entry(first).or_insert(0) += 1;
    }
    for x in 0..4 {
        assert!(leaders.get(&Some(x)).copied().unwrap_or(0) > 0, "{x} never came first");
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    name: &'static str,
    children: Vec<Node>,
}

fn leaf(name: &'static str) -> Node {
    Node {
        name,
        children: Vec::new(),
    }
}

fn branch(name: &'static str, children: Vec<Node>) -> Node {
    Node { name, children }
}

#[test]
fn traverse_pops_last_pushed_first() {
    let tree = branch("root", vec![branch("a", vec![leaf("a1"), leaf("a2")]), leaf("b")]);
    let names: Vec<&str> = traverse(vec![tree], |n: &Node| n.children.clone())
        .map(|n| n.name)
        .collect();
    assert_eq!(names, vec!["root", "b", "a", "a2", "a1"]);
}

#[test]
fn traverse_multiple_roots_starts_from_the_last() {
    let names: Vec<&str> = traverse(vec![leaf("x"), leaf("y"), leaf("z")], |n: &Node| {
        n.children.clone()
    })
    .map(|n| n.name)
    .collect();
    assert_eq!(names, vec!["z", "y", "x"]);
}

#[test]
fn traverse_no_roots() {
    let mut it = traverse(Vec::<Node>::new(), |n: &Node| n.children.clone());
    assert_eq!(it.next(), None);
}

#[test]
fn traverse_handles_deep_chains() {
    // a chain this deep would overflow a recursive walk
    let depth = 200_000u32;
    let count = traverse(vec![0u32], |n: &u32| (*n < depth).then_some(n + 1)).count();
    assert_eq!(count as u32, depth + 1);
}

#[test]
fn traverse_can_stop_early() {
    let first: Vec<u64> = traverse(vec![1u64], |n: &u64| vec![n * 2, n * 2 + 1])
        .take(4)
        .collect();
    assert_eq!(first, vec![1, 3, 7, 15]);
}

#[test]
fn split_into_even_chunks() {
    assert_eq!(
        split(vec![1, 2, 3, 4, 5], 2),
        vec![vec![1, 2, 3], vec![4, 5]]
    );
    assert_eq!(
        split((1..=10).collect::<Vec<i32>>(), 4),
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10]]
    );
    assert_eq!(split(vec!['a', 'b', 'c'], 3), vec![vec!['a'], vec!['b'], vec!['c']]);
}

#[test]
fn split_may_return_fewer_chunks() {
    assert_eq!(split(vec![1, 2], 5), vec![vec![1], vec![2]]);
    assert_eq!(
        split((1..=9).collect::<Vec<i32>>(), 4),
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
    );
}

#[test]
fn split_edge_cases() {
    assert!(split(Vec::<i32>::new(), 3).is_empty());
    assert_eq!(split(vec![1, 2, 3], 1), vec![vec![1, 2, 3]]);
    assert_eq!(split(vec![1, 2, 3], 0), vec![vec![1, 2, 3]]);
}
