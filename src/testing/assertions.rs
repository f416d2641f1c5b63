//! Assertion functions for tables, CSV output and shuffled sequences.

use crate::table::{Row, Table};
use crate::value::ScalarType;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that `table` has exactly the given `(name, type)` columns, in order.
///
/// # Panics
///
/// Panics if the column count, a name, or a type differs.
///
/// # Example
///
/// ```
/// use rowcast::testing::*;
/// use rowcast::{ScalarType, to_table};
///
/// let table = to_table(&sample_people()).unwrap();
/// assert_columns(&table, &[("Id", ScalarType::I32), ("Name", ScalarType::Text)]);
/// ```
pub fn assert_columns(table: &Table, expected: &[(&str, ScalarType)]) {
    let actual: Vec<(&str, ScalarType)> = table
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.value_type))
        .collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Column count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Column mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that `table` holds exactly `expected`, row by row.
///
/// # Panics
///
/// Panics on the first differing row, or if the row counts differ.
pub fn assert_rows(table: &Table, expected: &[Row]) {
    let actual = table.rows();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Row count mismatch:\n  Expected: {}\n  Actual: {}\n  Actual rows: {actual:?}",
        expected.len(),
        actual.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a, e, "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}");
    }
}

/// Assert that `csv` consists of `expected` lines, each terminated by `\n`.
///
/// # Panics
///
/// Panics if the text is missing the final terminator or any line differs.
///
/// # Example
///
/// ```
/// use rowcast::testing::assert_csv_lines;
///
/// assert_csv_lines("1,\"A\"\n2,\"\"\n", &["1,\"A\"", "2,\"\""]);
/// ```
pub fn assert_csv_lines(csv: &str, expected: &[&str]) {
    if expected.is_empty() {
        assert!(csv.is_empty(), "Expected no CSV output, got: {csv:?}");
        return;
    }
    assert!(
        csv.ends_with('\n'),
        "CSV output must end with a line terminator: {csv:?}"
    );
    let actual: Vec<&str> = csv.trim_end_matches('\n').split('\n').collect();
    assert_eq!(
        actual, expected,
        "CSV line mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that `actual` is a permutation of `expected` (same multiset).
///
/// # Panics
///
/// Panics if an element is missing, duplicated, or added.
pub fn assert_same_multiset<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    fn counts<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
        let mut out = HashMap::new();
        for item in items {
            *out.entry(item).or_insert(0) += 1;
        }
        out
    }

    assert_eq!(
        actual.len(),
        expected.len(),
        "Length mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    assert_eq!(
        counts(actual),
        counts(expected),
        "Element multiset mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}
