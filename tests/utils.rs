use rowcast::utils::{NaturalKey, natural_cmp};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[test]
fn digit_runs_compare_by_value() {
    assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
    assert_eq!(natural_cmp("item10", "item2"), Ordering::Greater);
    assert_eq!(natural_cmp("a100b", "a99b"), Ordering::Greater);
}

#[test]
fn leading_zeros_do_not_change_the_value() {
    assert_eq!(natural_cmp("x007", "x7"), Ordering::Equal);
    assert_eq!(natural_cmp("x0010", "x9"), Ordering::Greater);
}

#[test]
fn letters_ignore_case() {
    assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
    assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
}

#[test]
fn prefix_sorts_first() {
    assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
    assert_eq!(natural_cmp("", "a"), Ordering::Less);
    assert_eq!(natural_cmp("", ""), Ordering::Equal);
}

#[test]
fn digits_longer_than_any_integer() {
    let a = "id184467440737095516150";
    let b = "id184467440737095516151";
    assert_eq!(natural_cmp(a, b), Ordering::Less);
}

#[test]
fn sorting_file_names() {
    let mut names = vec![
        "img12.png",
        "img10.png",
        "IMG2.png",
        "img1.png",
        "img2a.png",
    ];
    names.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(
        names,
        vec!["img1.png", "IMG2.png", "img2a.png", "img10.png", "img12.png"]
    );
}

#[test]
fn natural_key_in_ordered_collections() {
    let set: BTreeSet<NaturalKey<'_>> = ["v1.10", "v1.2", "v1.9"]
        .into_iter()
        .map(NaturalKey::from)
        .collect();
    let ordered: Vec<&str> = set.iter().map(|k| k.0).collect();
    assert_eq!(ordered, vec!["v1.2", "v1.9", "v1.10"]);
}
