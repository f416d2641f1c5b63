//! Input-preparation helpers: shuffle, tree traversal, and even splitting.

use rand::Rng;
use std::iter::FusedIterator;

/// Iterator returned by [`shuffle`].
///
/// Each call to `next` picks one of the remaining elements uniformly at
/// random, so a full pass is a uniformly random permutation. A partial pass
/// is a prefix of some permutation.
#[derive(Debug, Clone)]
pub struct Shuffle<T, R> {
    remaining: Vec<T>,
    rng: R,
}

impl<T, R: Rng> Iterator for Shuffle<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(pick))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl<T, R: Rng> ExactSizeIterator for Shuffle<T, R> {}

impl<T, R: Rng> FusedIterator for Shuffle<T, R> {}

/// Lazily yield the elements of `source` in random order.
///
/// The source is materialized once; randomness comes from `rng`, so a seeded
/// generator gives a reproducible order.
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rowcast::collections::shuffle;
///
/// let mut out: Vec<i32> = shuffle(1..=5, StdRng::seed_from_u64(7)).collect();
/// out.sort();
/// assert_eq!(out, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<I, R>(source: I, rng: R) -> Shuffle<I::Item, R>
where
    I: IntoIterator,
    R: Rng,
{
    Shuffle {
        remaining: source.into_iter().collect(),
        rng,
    }
}

/// Iterator returned by [`traverse`].
#[derive(Debug, Clone)]
pub struct Traverse<T, F> {
    stack: Vec<T>,
    children: F,
}

impl<T, F, C> Iterator for Traverse<T, F>
where
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let next = self.stack.pop()?;
        self.stack.extend((self.children)(&next));
        Some(next)
    }
}

/// Walk a forest with an explicit stack.
///
/// Roots are pushed in order, so the last root comes out first. After an
/// element is yielded its children are pushed in order, so the last child is
/// expanded next. Depth is bounded by heap, not by the call stack. The walk
/// never ends if `children` describes a cycle.
///
/// ```
/// use rowcast::collections::traverse;
///
/// let order: Vec<u32> = traverse(vec![1], |n: &u32| if *n < 4 { vec![n * 2, n * 2 + 1] } else { vec![] })
///     .collect();
/// assert_eq!(order, vec![1, 3, 7, 6, 2, 5, 4]);
/// ```
pub fn traverse<I, F, C>(roots: I, children: F) -> Traverse<I::Item, F>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> C,
    C: IntoIterator<Item = I::Item>,
{
    Traverse {
        stack: roots.into_iter().collect(),
        children,
    }
}

/// Split `source` into at most `group_by` contiguous chunks of
/// `ceil(len / group_by)` elements; the last chunk may be shorter.
///
/// Fewer than `group_by` chunks come back when `len < group_by` or when the
/// rounding leaves the tail empty. A `group_by` of zero is treated as one.
///
/// ```
/// use rowcast::collections::split;
///
/// assert_eq!(split(vec![1, 2, 3, 4, 5], 2), vec![vec![1, 2, 3], vec![4, 5]]);
/// assert_eq!(split(vec![1, 2], 5), vec![vec![1], vec![2]]);
/// ```
#[must_use]
pub fn split<T>(source: Vec<T>, group_by: usize) -> Vec<Vec<T>> {
    let count = source.len();
    if count == 0 {
        return Vec::new();
    }
    let chunk = count.div_ceil(group_by.max(1));
    let mut out = Vec::with_capacity(count.div_ceil(chunk));
    let mut items = source.into_iter();
    loop {
        let group: Vec<T> = items.by_ref().take(chunk).collect();
        if group.is_empty() {
            break;
        }
        out.push(group);
    }
    out
}
