//! Utility types and functions for rowcast.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings the way a person orders file names: runs of digits
/// compare by numeric value, everything else compares case-insensitively.
///
/// ```
/// use rowcast::utils::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
/// assert_eq!(natural_cmp("Item2", "item2"), Ordering::Equal);
///
/// let mut names = vec!["file10.txt", "File2.txt", "file1.txt"];
/// names.sort_by(|a, b| natural_cmp(a, b));
/// assert_eq!(names, vec!["file1.txt", "File2.txt", "file10.txt"]);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        let ord = match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                cmp_numeric(&digit_run(&mut a), &digit_run(&mut b))
            }
            (Some(x), Some(y)) => {
                a.next();
                b.next();
                x.to_lowercase().cmp(y.to_lowercase())
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Compare two ASCII digit runs of any length by value.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// A string ordered by [`natural_cmp`], for `sort_by_key` and ordered
/// collections.
///
/// ```
/// use rowcast::utils::NaturalKey;
///
/// let mut names = vec!["v1.10", "v1.9", "v1.2"];
/// names.sort_by_key(|s| NaturalKey(*s));
/// assert_eq!(names, vec!["v1.2", "v1.9", "v1.10"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NaturalKey<'a>(pub &'a str);

impl PartialEq for NaturalKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NaturalKey<'_> {}

impl PartialOrd for NaturalKey<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalKey<'_> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self.0, other.0)
    }
}

impl<'a> From<&'a str> for NaturalKey<'a> {
    fn from(value: &'a str) -> Self {
        Self(value)
    }
}
