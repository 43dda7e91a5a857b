//! Flat sorted index sets and lightweight index ranges.
//!
//! [`IndexSet`] is the row type of every incidence relation: a sorted,
//! duplicate-free `Vec<Index>`, so membership is a binary search and subset
//! tests are a single merge walk.
//!
//! [`IndexRange`] describes "which identifiers" without committing to a
//! container: nothing, a contiguous block, or an explicit shared list. All three
//! are walked by the same [`IndexIter`], and the range can be iterated again
//! as often as needed.

use std::ops::Range;
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::topology::Index;

/// Sorted set of entity identifiers without duplicates.
///
/// Deserialization re-sorts and dedups, so the invariant holds for any input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Index>", into = "Vec<Index>")]
pub struct IndexSet(Vec<Index>);

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    /// Build from arbitrary identifiers, sorting and dropping repeats.
    pub fn from_unsorted(indices: &[Index]) -> Self {
        indices.iter().copied().collect()
    }

    /// Insert `i`, returning `true` if it was not already present.
    pub fn insert(&mut self, i: Index) -> bool {
        match self.0.binary_search(&i) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, i);
                true
            }
        }
    }

    #[inline]
    pub fn contains(&self, i: Index) -> bool {
        self.0.binary_search(&i).is_ok()
    }

    /// `true` if every element of `self` is also in `other`.
    pub fn is_subset(&self, other: &IndexSet) -> bool {
        is_sorted_subset(&self.0, &other.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Index>> {
        self.0.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Index] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Index> for IndexSet {
    fn from_iter<I: IntoIterator<Item = Index>>(iter: I) -> Self {
        IndexSet(iter.into_iter().sorted_unstable().dedup().collect())
    }
}

impl From<Vec<Index>> for IndexSet {
    fn from(v: Vec<Index>) -> Self {
        v.into_iter().collect()
    }
}

impl From<IndexSet> for Vec<Index> {
    fn from(s: IndexSet) -> Self {
        s.0
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = Index;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Index>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merge-walk subset test on two sorted slices.
pub(crate) fn is_sorted_subset(small: &[Index], big: &[Index]) -> bool {
    if small.len() > big.len() {
        return false;
    }
    let mut it = big.iter();
    'outer: for &x in small {
        for &y in it.by_ref() {
            if y == x {
                continue 'outer;
            }
            if y > x {
                return false;
            }
        }
        return false;
    }
    true
}

/// A restartable description of a finite sequence of identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexRange {
    #[default]
    Empty,
    /// Every identifier in `start..end`.
    Bounded(Range<Index>),
    /// An explicit list, in the order given.
    List(Arc<[Index]>),
}

impl IndexRange {
    pub fn iter(&self) -> IndexIter<'_> {
        match self {
            IndexRange::Empty => IndexIter::Empty,
            IndexRange::Bounded(r) => IndexIter::Bounded(r.clone()),
            IndexRange::List(l) => IndexIter::List(l.iter()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexRange::Empty => 0,
            IndexRange::Bounded(r) => r.len(),
            IndexRange::List(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, i: Index) -> bool {
        match self {
            IndexRange::Empty => false,
            IndexRange::Bounded(r) => r.contains(&i),
            IndexRange::List(l) => l.contains(&i),
        }
    }
}

impl From<Vec<Index>> for IndexRange {
    fn from(v: Vec<Index>) -> Self {
        if v.is_empty() {
            IndexRange::Empty
        } else {
            IndexRange::List(v.into())
        }
    }
}

impl From<&IndexSet> for IndexRange {
    fn from(s: &IndexSet) -> Self {
        IndexRange::from(s.as_slice().to_vec())
    }
}

impl<'a> IntoIterator for &'a IndexRange {
    type Item = Index;
    type IntoIter = IndexIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`IndexRange`].
#[derive(Clone, Debug)]
pub enum IndexIter<'a> {
    Empty,
    Bounded(Range<Index>),
    List(std::slice::Iter<'a, Index>),
}

impl Iterator for IndexIter<'_> {
    type Item = Index;

    #[inline]
    fn next(&mut self) -> Option<Index> {
        match self {
            IndexIter::Empty => None,
            IndexIter::Bounded(r) => r.next(),
            IndexIter::List(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IndexIter::Empty => (0, Some(0)),
            IndexIter::Bounded(r) => r.size_hint(),
            IndexIter::List(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for IndexIter<'_> {}
