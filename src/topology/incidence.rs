//! Incidence relations and their dirty flags.

use serde::{Deserialize, Serialize};

use crate::topology::Index;
use crate::topology::index_set::IndexSet;

/// Relation `(d, d')`: row `i` lists the dimension-`d'` entities incident to
/// entity `i` of dimension `d`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incidence {
    rows: Vec<IndexSet>,
}

impl Incidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` empty rows.
    pub fn with_rows(n: usize) -> Self {
        Self {
            rows: vec![IndexSet::new(); n],
        }
    }

    pub fn from_rows(rows: Vec<IndexSet>) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn get(&self, i: Index) -> Option<&IndexSet> {
        self.rows.get(i)
    }

    /// Number of rows (entities of the source dimension).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored `(i, j)` pairs.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(IndexSet::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexSet> {
        self.rows.iter()
    }

    pub fn push(&mut self, row: IndexSet) {
        self.rows.push(row);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Invert this relation. `targets` is the number of entities on the far side.
    ///
    /// Entries pointing at or past `targets` are dropped.
    pub fn transposed(&self, targets: usize) -> Incidence {
        let mut degree = vec![0usize; targets];
        for row in &self.rows {
            for j in row {
                if j < targets {
                    degree[j] += 1;
                }
            }
        }
        let mut out: Vec<Vec<Index>> = degree.into_iter().map(Vec::with_capacity).collect();
        // rows are visited in increasing `i`, so every output row comes out sorted
        for (i, row) in self.rows.iter().enumerate() {
            for j in row {
                if j < targets {
                    out[j].push(i);
                }
            }
        }
        Incidence {
            rows: out.into_iter().map(IndexSet::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Incidence {
    type Item = &'a IndexSet;
    type IntoIter = std::slice::Iter<'a, IndexSet>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `(D+1)×(D+1)` staleness flags, one per `(d, d')` relation.
///
/// A set flag means the stored relation (if any) must not be read.
#[derive(Clone, Debug, Default)]
pub struct DirtyMatrix {
    size: usize,
    flags: Vec<bool>,
}

impl DirtyMatrix {
    /// All relations dirty.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            flags: vec![true; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_dirty(&self, d: usize, dp: usize) -> bool {
        self.flags[d * self.size + dp]
    }

    #[inline]
    pub fn set_dirty(&mut self, d: usize, dp: usize) {
        self.flags[d * self.size + dp] = true;
    }

    #[inline]
    pub fn set_clean(&mut self, d: usize, dp: usize) {
        self.flags[d * self.size + dp] = false;
    }

    pub fn set_all_dirty(&mut self) {
        self.flags.fill(true);
    }

    /// Every clean `(d, d')` pair, row-major.
    pub fn clean_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, dirty)| !**dirty)
            .map(move |(k, _)| (k / n, k % n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(rows: &[&[Index]]) -> Incidence {
        Incidence::from_rows(rows.iter().map(|r| IndexSet::from_unsorted(r)).collect())
    }

    #[test]
    fn transpose_inverts_rows() {
        // two triangles on four vertices
        let cells = rel(&[&[0, 1, 2], &[1, 2, 3]]);
        let t = cells.transposed(4);
        assert_eq!(t.len(), 4);
        assert_eq!(t.get(0).unwrap().as_slice(), &[0]);
        assert_eq!(t.get(1).unwrap().as_slice(), &[0, 1]);
        assert_eq!(t.get(2).unwrap().as_slice(), &[0, 1]);
        assert_eq!(t.get(3).unwrap().as_slice(), &[1]);
        assert_eq!(t.nnz(), cells.nnz());
        assert_eq!(t.transposed(2), cells);
    }

    #[test]
    fn transpose_keeps_isolated_targets() {
        let t = rel(&[&[0]]).transposed(3);
        assert_eq!(t.len(), 3);
        assert!(t.get(1).unwrap().is_empty());
        assert!(t.get(2).unwrap().is_empty());
    }

    #[test]
    fn dirty_matrix_flags() {
        let mut m = DirtyMatrix::new(3);
        assert!(m.is_dirty(2, 0));
        m.set_clean(2, 0);
        m.set_clean(1, 1);
        assert!(!m.is_dirty(2, 0));
        assert!(m.is_dirty(0, 2));
        assert_eq!(m.clean_pairs().collect::<Vec<_>>(), vec![(1, 1), (2, 0)]);
        m.set_dirty(2, 0);
        assert!(m.is_dirty(2, 0));
        m.set_all_dirty();
        assert_eq!(m.clean_pairs().count(), 0);
    }

    #[test]
    fn json_roundtrip() {
        let inc = rel(&[&[2, 0], &[], &[1]]);
        let s = serde_json::to_string(&inc).unwrap();
        let back: Incidence = serde_json::from_str(&s).unwrap();
        assert_eq!(back, inc);
    }
}
