//! Per-dimension bidirectional map between canonical vertex keys and dense ids.
//!
//! The arena (`polytopes`) owns each vertex tuple exactly as first inserted and
//! is indexed by identifier. The secondary `lookup` table maps the canonical key
//! back to that identifier. Identifiers are handed out as `0, 1, 2, …` and never
//! reused, so callers may treat them as array indices.

use hashbrown::HashMap;

use crate::debug_invariants::{DebugInvariants, ensure};
use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;

/// How a vertex tuple is turned into a deduplication key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyOrder {
    /// The tuple as given: `(0,1,2)` and `(1,2,0)` are different entities.
    Ordered,
    /// The vertex set: `(2,0)` and `(0,2)` are the same entity.
    #[default]
    Unordered,
}

impl KeyOrder {
    fn canonical(self, vertices: &[Index]) -> Vec<Index> {
        let mut key = vertices.to_vec();
        if self == KeyOrder::Unordered {
            key.sort_unstable();
        }
        key
    }
}

#[derive(Clone, Debug, Default)]
pub struct PolytopeIndex {
    order: KeyOrder,
    polytopes: Vec<Vec<Index>>,
    lookup: HashMap<Vec<Index>, Index>,
}

impl PolytopeIndex {
    pub fn new(order: KeyOrder) -> Self {
        Self {
            order,
            polytopes: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    #[inline]
    pub fn order(&self) -> KeyOrder {
        self.order
    }

    pub fn reserve(&mut self, additional: usize) {
        self.polytopes.reserve(additional);
        self.lookup.reserve(additional);
    }

    /// Insert a vertex tuple, returning its identifier and whether it was new.
    ///
    /// # Errors
    /// [`MeshConnectivityError::EmptyVertexTuple`] if `vertices` is empty.
    pub fn insert(&mut self, vertices: Vec<Index>) -> Result<(Index, bool), MeshConnectivityError> {
        if vertices.is_empty() {
            return Err(MeshConnectivityError::EmptyVertexTuple);
        }
        let key = self.order.canonical(&vertices);
        if let Some(&id) = self.lookup.get(&key) {
            return Ok((id, false));
        }
        let id = self.polytopes.len();
        self.lookup.insert(key, id);
        self.polytopes.push(vertices);
        Ok((id, true))
    }

    /// Identifier of the entity whose key matches `vertices`.
    pub fn lookup(&self, vertices: &[Index]) -> Option<Index> {
        match self.order {
            KeyOrder::Ordered => self.lookup.get(vertices).copied(),
            KeyOrder::Unordered => self.lookup.get(&self.order.canonical(vertices)).copied(),
        }
    }

    /// Vertex tuple of entity `id`, in insertion order.
    #[inline]
    pub fn polytope(&self, id: Index) -> Option<&[Index]> {
        self.polytopes.get(id).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polytopes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polytopes.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Index, &[Index])> + '_ {
        self.polytopes.iter().map(Vec::as_slice).enumerate()
    }
}

impl DebugInvariants for PolytopeIndex {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PolytopeIndex");
    }

    fn validate_invariants(&self) -> Result<(), MeshConnectivityError> {
        ensure(self.lookup.len() == self.polytopes.len(), || {
            format!(
                "lookup has {} keys but arena has {} polytopes",
                self.lookup.len(),
                self.polytopes.len()
            )
        })?;
        for (id, vertices) in self.iter() {
            ensure(!vertices.is_empty(), || format!("polytope {id} is empty"))?;
            let found = self.lookup(vertices);
            ensure(found == Some(id), || {
                format!("polytope {id} {vertices:?} maps back to {found:?}")
            })?;
        }
        Ok(())
    }
}
