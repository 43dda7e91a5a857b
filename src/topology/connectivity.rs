//! Lazy incidence engine over a cell → vertex mesh description.
//!
//! [`Connectivity`] starts from two facts: the number of vertices and the list of
//! top-dimensional cells (each a vertex tuple with a [`PolytopeType`]). Every other
//! relation `(d, d')` is derived on first request and memoized until cleared.
//!
//! # Derivation rules
//! - `(d, 0)` for `d > 0` is ground truth: the vertex set of each entity. For cells it
//!   is recorded on declaration; for `0 < d < D` it is produced by [`build`].
//! - [`build`]`(d)` walks every cell, decomposes it through the shape catalog, dedups
//!   the pieces in the dimension-`d` polytope index and records `(D, d)` in the same
//!   pass.
//! - [`transpose`]`(d, d')` with `d < d'` inverts `(d', d)`.
//! - [`intersection`]`(d, d', p)` with `d ≥ d'` walks `i → k → j` through pivot `p`
//!   and keeps `j` if `i ≠ j` (when `d = d'`) or if the vertex set of `j` is a subset
//!   of that of `i` (when `d > d'`).
//!
//! `(D, D)` is always derived first, through pivot 0: two cells are adjacent when
//! they share a vertex. Any other `(d, d')` with `d ≥ d'` also intersects through
//! pivot 0, so `(d, d)` relates `d`-entities that share a vertex. The one exception
//! is `(0, 0)`, which goes through pivot `D` and relates vertices that share a cell.
//!
//! # Example
//! ```rust
//! # fn try_main() -> Result<(), mesh_connectivity::mesh_error::MeshConnectivityError> {
//! use mesh_connectivity::topology::{Connectivity, PolytopeType};
//!
//! let mut conn = Connectivity::new();
//! conn.initialize(2)?.declare_vertex_count(4)?;
//! conn.declare_cell(PolytopeType::Triangle, &[0, 1, 2])?;
//! conn.declare_cell(PolytopeType::Triangle, &[1, 2, 3])?;
//!
//! assert_eq!(conn.query(1, 0)?.len(), 5);
//! let shared = conn.identifier_of(1, &[2, 1])?.unwrap();
//! assert_eq!(conn.incident_set(1, 2, shared)?.as_slice(), &[0, 1]);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```
//!
//! [`build`]: Connectivity::build
//! [`transpose`]: Connectivity::transpose
//! [`intersection`]: Connectivity::intersection

use hashbrown::HashMap;

use crate::debug_invariants::{DebugInvariants, ensure};
use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;
use crate::topology::cache::InvalidateCache;
use crate::topology::catalog::{self, SubPolytope};
use crate::topology::incidence::{DirtyMatrix, Incidence};
use crate::topology::index_set::{IndexRange, IndexSet, is_sorted_subset};
use crate::topology::options::{ConnectivityOptions, SubEntityPolicy};
use crate::topology::polytope::PolytopeType;
use crate::topology::polytope_index::{KeyOrder, PolytopeIndex};

/// Counters for the derivation primitives, for profiling and cache tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityStats {
    /// Calls to [`Connectivity::build`].
    pub builds: usize,
    /// Calls to [`Connectivity::transpose`].
    pub transposes: usize,
    /// Calls to [`Connectivity::intersection`].
    pub intersections: usize,
    /// Times a `(d, 0)` relation was regenerated from its polytope index.
    pub ground_truth_restores: usize,
}

impl ConnectivityStats {
    /// Sum of all derivation steps.
    pub fn total(&self) -> usize {
        self.builds + self.transposes + self.intersections + self.ground_truth_restores
    }
}

/// Incidence engine: per-dimension entity indices plus every `(d, d')` relation, derived on demand.
#[derive(Clone, Debug, Default)]
pub struct Connectivity {
    options: ConnectivityOptions,
    maximal_dimension: Option<usize>,
    /// One polytope index per dimension; `index[D]` is keyed by ordered tuple.
    index: Vec<PolytopeIndex>,
    /// Per-dimension polytope types; `geometry[0]` stays empty (always `Point`).
    geometry: Vec<Vec<PolytopeType>>,
    type_count: HashMap<PolytopeType, usize>,
    /// `(D+1)²` relations, row-major in `(d, d')`.
    relations: Vec<Incidence>,
    /// `dirty(d, d')` set ⇒ `relations[(d, d')]` must not be read.
    dirty: DirtyMatrix,
    stats: ConnectivityStats,
}

impl Connectivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConnectivityOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[inline]
    pub fn options(&self) -> ConnectivityOptions {
        self.options
    }

    #[inline]
    pub fn stats(&self) -> ConnectivityStats {
        self.stats
    }

    // ---------------------------------------------------------------------
    // population
    // ---------------------------------------------------------------------

    /// Size every per-dimension store for meshes of top dimension `maximal_dimension`.
    ///
    /// # Errors
    /// - [`MeshConnectivityError::AlreadyInitialized`] on a second call.
    /// - [`MeshConnectivityError::DimensionOutOfRange`] unless `1 ≤ maximal_dimension ≤ 3`.
    pub fn initialize(
        &mut self,
        maximal_dimension: usize,
    ) -> Result<&mut Self, MeshConnectivityError> {
        if let Some(existing) = self.maximal_dimension {
            return Err(MeshConnectivityError::AlreadyInitialized {
                maximal_dimension: existing,
            });
        }
        if !(1..=PolytopeType::MAX_DIMENSION).contains(&maximal_dimension) {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: maximal_dimension,
                maximal: PolytopeType::MAX_DIMENSION,
            });
        }
        let n = maximal_dimension + 1;
        self.index = (0..n)
            .map(|d| {
                PolytopeIndex::new(if d == maximal_dimension {
                    KeyOrder::Ordered
                } else {
                    KeyOrder::Unordered
                })
            })
            .collect();
        self.geometry = vec![Vec::new(); n];
        self.relations = vec![Incidence::new(); n * n];
        self.dirty = DirtyMatrix::new(n);
        self.maximal_dimension = Some(maximal_dimension);
        log::debug!("connectivity initialized with maximal dimension {maximal_dimension}");
        Ok(self)
    }

    /// Pre-size the stores of dimension `d` for `count` entities.
    pub fn reserve(&mut self, d: usize, count: usize) -> Result<&mut Self, MeshConnectivityError> {
        self.check_dimension(d)?;
        self.index[d].reserve(count);
        if d > 0 {
            self.geometry[d].reserve(count);
            let slot = self.slot(d, 0);
            self.relations[slot].reserve(count);
        }
        Ok(self)
    }

    /// Register vertices `0..count`.
    ///
    /// # Errors
    /// [`MeshConnectivityError::VerticesAlreadyDeclared`] if any vertex exists.
    pub fn declare_vertex_count(&mut self, count: usize) -> Result<&mut Self, MeshConnectivityError> {
        self.top()?;
        let existing = self.index[0].len();
        if existing > 0 {
            return Err(MeshConnectivityError::VerticesAlreadyDeclared { count: existing });
        }
        self.index[0].reserve(count);
        for v in 0..count {
            self.index[0].insert(vec![v])?;
        }
        *self.type_count.entry(PolytopeType::Point).or_insert(0) += count;
        self.invalidate_derived();
        log::debug!("declared {count} vertices");
        Ok(self)
    }

    /// Declare a top-dimensional cell and return its identifier.
    ///
    /// Declaring the same ordered tuple again returns the existing identifier and
    /// changes nothing.
    ///
    /// # Errors
    /// - [`MeshConnectivityError::GeometryDimensionMismatch`] if `geometry` is not of
    ///   the maximal dimension.
    /// - [`MeshConnectivityError::EmptyVertexTuple`],
    ///   [`MeshConnectivityError::VertexCountMismatch`] or
    ///   [`MeshConnectivityError::UnknownVertex`] for a malformed tuple.
    pub fn declare_cell(
        &mut self,
        geometry: PolytopeType,
        vertices: &[Index],
    ) -> Result<Index, MeshConnectivityError> {
        let top = self.top()?;
        if geometry.dimension() != top {
            return Err(MeshConnectivityError::GeometryDimensionMismatch {
                geometry,
                expected: top,
                found: geometry.dimension(),
            });
        }
        self.check_vertices(geometry, vertices)?;
        let (id, inserted) = self.register(top, geometry, vertices.to_vec())?;
        if !inserted {
            log::warn!("cell {vertices:?} declared twice; keeping identifier {id}");
            return Ok(id);
        }
        let slot = self.slot(top, 0);
        if self.relations[slot].len() == self.index[top].len() {
            self.dirty.set_clean(top, 0);
        }
        if self.options.sub_entity_policy == SubEntityPolicy::Eager {
            for d in 1..top {
                for sub in catalog::sub_polytopes(geometry, vertices, d)? {
                    self.register(d, sub.geometry, sub.vertices)?;
                }
            }
        }
        self.invalidate_derived();
        Ok(id)
    }

    /// Declare an entity of dimension `0 < d ≤ D` explicitly, for example a
    /// boundary face read from a mesh file. Cells are forwarded to
    /// [`declare_cell`](Self::declare_cell).
    pub fn declare_polytope(
        &mut self,
        geometry: PolytopeType,
        vertices: &[Index],
    ) -> Result<Index, MeshConnectivityError> {
        let top = self.top()?;
        let d = geometry.dimension();
        if d == top {
            return self.declare_cell(geometry, vertices);
        }
        if d == 0 {
            return Err(MeshConnectivityError::GeometryDimensionMismatch {
                geometry,
                expected: 1,
                found: 0,
            });
        }
        if d > top {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: d,
                maximal: top,
            });
        }
        self.check_vertices(geometry, vertices)?;
        let (id, inserted) = self.register(d, geometry, vertices.to_vec())?;
        if inserted {
            self.invalidate_derived();
        }
        Ok(id)
    }

    /// Install an externally computed relation and mark it clean.
    ///
    /// # Errors
    /// - [`MeshConnectivityError::GroundTruthRelation`] for `(d, 0)` with `d > 0`.
    /// - [`MeshConnectivityError::IncidenceSizeMismatch`] unless the relation has
    ///   `count(d)` rows.
    pub fn set_incidence(
        &mut self,
        d: usize,
        dp: usize,
        incidence: Incidence,
    ) -> Result<&mut Self, MeshConnectivityError> {
        self.check_pair(d, dp)?;
        if d > 0 && dp == 0 {
            return Err(MeshConnectivityError::GroundTruthRelation { d });
        }
        let expected = self.index[d].len();
        if incidence.len() != expected {
            return Err(MeshConnectivityError::IncidenceSizeMismatch {
                d,
                dp,
                expected,
                found: incidence.len(),
            });
        }
        let slot = self.slot(d, dp);
        self.relations[slot] = incidence;
        self.dirty.set_clean(d, dp);
        Ok(self)
    }

    /// Drop relation `(d, d')` and mark it dirty. Other relations are untouched.
    pub fn clear(&mut self, d: usize, dp: usize) -> Result<&mut Self, MeshConnectivityError> {
        self.check_pair(d, dp)?;
        let slot = self.slot(d, dp);
        self.relations[slot].clear();
        self.dirty.set_dirty(d, dp);
        log::debug!("cleared incidence ({d}, {dp})");
        Ok(self)
    }

    // ---------------------------------------------------------------------
    // derivation
    // ---------------------------------------------------------------------

    /// Make relation `(d, d')` clean, deriving whatever it depends on.
    pub fn compute(&mut self, d: usize, dp: usize) -> Result<(), MeshConnectivityError> {
        let top = self.check_pair(d, dp)?;
        if !self.dirty.is_dirty(d, dp) {
            log::trace!("incidence ({d}, {dp}) already clean");
            return Ok(());
        }
        self.restore_ground_truth(top);
        if d == top && dp == 0 {
            return Ok(());
        }

        if self.dirty.is_dirty(top, top) {
            if self.dirty.is_dirty(0, top) {
                self.transpose(0, top)?;
            }
            self.intersection(top, top, 0)?;
        }

        for e in [d, dp] {
            if e != 0 && e != top && (self.dirty.is_dirty(top, e) || self.dirty.is_dirty(e, 0)) {
                self.build(e)?;
            }
        }

        if self.dirty.is_dirty(d, dp) {
            if d < dp {
                self.compute(dp, d)?;
                self.transpose(d, dp)?;
            } else {
                // vertices relate through the cells; everything else through the vertices
                let pivot = if d == 0 && dp == 0 { top } else { 0 };
                self.compute(d, pivot)?;
                self.compute(pivot, dp)?;
                self.intersection(d, dp, pivot)?;
            }
        }
        Ok(())
    }

    /// Extract every dimension-`d` sub-entity of every cell, producing `(D, d)` and
    /// `(d, 0)` together.
    pub fn build(&mut self, d: usize) -> Result<(), MeshConnectivityError> {
        let top = self.check_dimension(d)?;
        if d == 0 || d >= top {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: d,
                maximal: top.saturating_sub(1),
            });
        }
        self.restore_ground_truth(top);
        self.restore_ground_truth(d);

        let decomposed = self.decompose_cells(d)?;
        let before = self.index[d].len();
        let mut cells = Vec::with_capacity(decomposed.len());
        for subs in decomposed {
            let mut row = Vec::with_capacity(subs.len());
            for sub in subs {
                let (id, _) = self.register(d, sub.geometry, sub.vertices)?;
                row.push(id);
            }
            cells.push(IndexSet::from(row));
        }

        let slot = self.slot(top, d);
        self.relations[slot] = Incidence::from_rows(cells);
        self.dirty.set_clean(top, d);
        self.dirty.set_clean(d, 0);
        self.stats.builds += 1;
        log::debug!(
            "built dimension {d}: {} entities ({} new) from {} cells",
            self.index[d].len(),
            self.index[d].len() - before,
            self.index[top].len()
        );
        Ok(())
    }

    /// Derive `(d, d')` with `d < d'` by inverting `(d', d)`.
    pub fn transpose(&mut self, d: usize, dp: usize) -> Result<(), MeshConnectivityError> {
        self.check_pair(d, dp)?;
        if d >= dp {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: d,
                maximal: dp.saturating_sub(1),
            });
        }
        self.require_clean(dp, d)?;
        let inverted = self.relation(dp, d).transposed(self.index[d].len());
        let slot = self.slot(d, dp);
        self.relations[slot] = inverted;
        self.dirty.set_clean(d, dp);
        self.stats.transposes += 1;
        log::debug!("transposed ({dp}, {d}) into ({d}, {dp})");
        Ok(())
    }

    /// Derive `(d, d')` with `d ≥ d'` from `(d, pivot)` and `(pivot, d')`.
    pub fn intersection(
        &mut self,
        d: usize,
        dp: usize,
        pivot: usize,
    ) -> Result<(), MeshConnectivityError> {
        self.check_pair(d, dp)?;
        self.check_dimension(pivot)?;
        if d < dp {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: dp,
                maximal: d,
            });
        }
        self.require_clean(d, pivot)?;
        self.require_clean(pivot, dp)?;
        if d > dp {
            for e in [d, dp] {
                if e > 0 {
                    self.require_clean(e, 0)?;
                }
            }
        }

        let left = self.relation(d, pivot);
        let right = self.relation(pivot, dp);
        let n = self.index[d].len();
        let mut rows = Vec::with_capacity(n);
        let mut buf = Vec::new();
        for i in 0..n {
            buf.clear();
            let Some(ks) = left.get(i) else {
                rows.push(IndexSet::new());
                continue;
            };
            for k in ks {
                let Some(js) = right.get(k) else { continue };
                for j in js {
                    let keep = if d == dp {
                        i != j
                    } else {
                        is_sorted_subset(self.ground_truth(dp, j), self.ground_truth(d, i))
                    };
                    if keep {
                        buf.push(j);
                    }
                }
            }
            rows.push(buf.iter().copied().collect::<IndexSet>());
        }

        let slot = self.slot(d, dp);
        self.relations[slot] = Incidence::from_rows(rows);
        self.dirty.set_clean(d, dp);
        self.stats.intersections += 1;
        log::debug!("intersected ({d}, {pivot}) and ({pivot}, {dp}) into ({d}, {dp})");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // queries
    // ---------------------------------------------------------------------

    /// Compute `(d, d')` if needed and return it.
    pub fn query(&mut self, d: usize, dp: usize) -> Result<&Incidence, MeshConnectivityError> {
        self.compute(d, dp)?;
        self.debug_assert_invariants();
        Ok(self.relation(d, dp))
    }

    /// Same as [`query`](Self::query).
    pub fn full_relation(
        &mut self,
        d: usize,
        dp: usize,
    ) -> Result<&Incidence, MeshConnectivityError> {
        self.query(d, dp)
    }

    /// Entities of dimension `d'` incident to entity `i` of dimension `d`.
    pub fn incident_set(
        &mut self,
        d: usize,
        dp: usize,
        i: Index,
    ) -> Result<&IndexSet, MeshConnectivityError> {
        self.check_pair(d, dp)?;
        self.check_entity(d, i)?;
        self.query(d, dp)?
            .get(i)
            .ok_or(MeshConnectivityError::IndexOutOfRange {
                dimension: d,
                index: i,
                count: 0,
            })
    }

    /// Read `(d, d')` without computing it.
    ///
    /// # Errors
    /// [`MeshConnectivityError::StaleIncidence`] if the relation is dirty.
    pub fn try_incidence(&self, d: usize, dp: usize) -> Result<&Incidence, MeshConnectivityError> {
        self.check_pair(d, dp)?;
        self.require_clean(d, dp)?;
        Ok(self.relation(d, dp))
    }

    pub fn is_dirty(&self, d: usize, dp: usize) -> Result<bool, MeshConnectivityError> {
        self.check_pair(d, dp)?;
        Ok(self.dirty.is_dirty(d, dp))
    }

    /// The dimension passed to [`initialize`](Self::initialize).
    pub fn maximal_dimension(&self) -> Result<usize, MeshConnectivityError> {
        self.top()
    }

    /// Highest dimension holding at least one entity; 0 for an empty engine.
    pub fn mesh_dimension(&self) -> usize {
        self.index.iter().rposition(|idx| !idx.is_empty()).unwrap_or(0)
    }

    /// Number of known entities of dimension `d`.
    pub fn count(&self, d: usize) -> Result<usize, MeshConnectivityError> {
        self.check_dimension(d)?;
        Ok(self.index[d].len())
    }

    /// Number of known entities of type `geometry`.
    pub fn count_of_type(&self, geometry: PolytopeType) -> usize {
        self.type_count.get(&geometry).copied().unwrap_or(0)
    }

    pub fn geometry(&self, d: usize, i: Index) -> Result<PolytopeType, MeshConnectivityError> {
        self.check_entity(d, i)?;
        if d == 0 {
            return Ok(PolytopeType::Point);
        }
        Ok(self.geometry[d][i])
    }

    /// Vertex tuple of entity `i`, exactly as first inserted.
    pub fn vertex_set_of(&self, d: usize, i: Index) -> Result<&[Index], MeshConnectivityError> {
        self.check_entity(d, i)?;
        self.index[d]
            .polytope(i)
            .ok_or(MeshConnectivityError::IndexOutOfRange {
                dimension: d,
                index: i,
                count: self.index[d].len(),
            })
    }

    /// Identifier of the entity keyed by `vertices`, if known.
    pub fn identifier_of(
        &self,
        d: usize,
        vertices: &[Index],
    ) -> Result<Option<Index>, MeshConnectivityError> {
        self.check_dimension(d)?;
        Ok(self.index[d].lookup(vertices))
    }

    pub fn polytope_index(&self, d: usize) -> Result<&PolytopeIndex, MeshConnectivityError> {
        self.check_dimension(d)?;
        Ok(&self.index[d])
    }

    /// All identifiers of dimension `d`.
    pub fn entities(&self, d: usize) -> Result<IndexRange, MeshConnectivityError> {
        let n = self.count(d)?;
        Ok(if n == 0 {
            IndexRange::Empty
        } else {
            IndexRange::Bounded(0..n)
        })
    }

    /// Identifiers of dimension `d` whose type is `geometry`.
    pub fn entities_of_type(
        &self,
        d: usize,
        geometry: PolytopeType,
    ) -> Result<IndexRange, MeshConnectivityError> {
        self.check_dimension(d)?;
        if d == 0 {
            return if geometry == PolytopeType::Point {
                self.entities(0)
            } else {
                Ok(IndexRange::Empty)
            };
        }
        Ok(IndexRange::from(
            self.geometry[d]
                .iter()
                .enumerate()
                .filter_map(|(i, &g)| (g == geometry).then_some(i))
                .collect::<Vec<_>>(),
        ))
    }

    // ---------------------------------------------------------------------
    // internals
    // ---------------------------------------------------------------------

    #[inline]
    fn top(&self) -> Result<usize, MeshConnectivityError> {
        self.maximal_dimension
            .ok_or(MeshConnectivityError::Uninitialized)
    }

    fn check_dimension(&self, d: usize) -> Result<usize, MeshConnectivityError> {
        let top = self.top()?;
        if d > top {
            return Err(MeshConnectivityError::DimensionOutOfRange {
                dimension: d,
                maximal: top,
            });
        }
        Ok(top)
    }

    fn check_pair(&self, d: usize, dp: usize) -> Result<usize, MeshConnectivityError> {
        self.check_dimension(d)?;
        self.check_dimension(dp)
    }

    fn check_entity(&self, d: usize, i: Index) -> Result<(), MeshConnectivityError> {
        self.check_dimension(d)?;
        let count = self.index[d].len();
        if i >= count {
            return Err(MeshConnectivityError::IndexOutOfRange {
                dimension: d,
                index: i,
                count,
            });
        }
        Ok(())
    }

    fn check_vertices(
        &self,
        geometry: PolytopeType,
        vertices: &[Index],
    ) -> Result<(), MeshConnectivityError> {
        catalog::check_vertex_count(geometry, vertices)?;
        let count = self.index[0].len();
        if let Some(&vertex) = vertices.iter().find(|&&v| v >= count) {
            return Err(MeshConnectivityError::UnknownVertex { vertex, count });
        }
        Ok(())
    }

    fn require_clean(&self, d: usize, dp: usize) -> Result<(), MeshConnectivityError> {
        if self.dirty.is_dirty(d, dp) {
            return Err(MeshConnectivityError::StaleIncidence { d, dp });
        }
        Ok(())
    }

    #[inline]
    fn slot(&self, d: usize, dp: usize) -> usize {
        d * self.dirty.size() + dp
    }

    #[inline]
    fn relation(&self, d: usize, dp: usize) -> &Incidence {
        &self.relations[self.slot(d, dp)]
    }

    /// Sorted vertex set of entity `i`; `(d, 0)` must be clean for `d > 0`.
    fn ground_truth(&self, d: usize, i: Index) -> &[Index] {
        let found = if d == 0 {
            self.index[0].polytope(i)
        } else {
            self.relation(d, 0).get(i).map(IndexSet::as_slice)
        };
        found.unwrap_or(&[])
    }

    /// Insert into index `d` without touching any dirty flag.
    ///
    /// A new entity gets its `(d, 0)` row only while that relation is in step with
    /// the index; otherwise [`restore_ground_truth`](Self::restore_ground_truth)
    /// regenerates it later.
    fn register(
        &mut self,
        d: usize,
        geometry: PolytopeType,
        vertices: Vec<Index>,
    ) -> Result<(Index, bool), MeshConnectivityError> {
        let (id, inserted) = self.index[d].insert(vertices)?;
        if inserted {
            self.geometry[d].push(geometry);
            *self.type_count.entry(geometry).or_insert(0) += 1;
            let slot = self.slot(d, 0);
            if self.relations[slot].len() == id {
                if let Some(vertices) = self.index[d].polytope(id) {
                    self.relations[slot].push(IndexSet::from_unsorted(vertices));
                }
            }
        }
        Ok((id, inserted))
    }

    /// Bring `(d, 0)` back in step with index `d` and mark it clean.
    fn restore_ground_truth(&mut self, d: usize) {
        let slot = self.slot(d, 0);
        if self.relations[slot].len() != self.index[d].len() {
            self.relations[slot] = Incidence::from_rows(
                self.index[d]
                    .iter()
                    .map(|(_, vertices)| IndexSet::from_unsorted(vertices))
                    .collect(),
            );
            self.stats.ground_truth_restores += 1;
            log::debug!("restored ground truth ({d}, 0)");
        }
        self.dirty.set_clean(d, 0);
    }

    fn decompose_cell(&self, cell: Index, d: usize) -> Result<Vec<SubPolytope>, MeshConnectivityError> {
        let top = self.top()?;
        let vertices = self.vertex_set_of(top, cell)?;
        catalog::sub_polytopes(self.geometry[top][cell], vertices, d)
    }

    #[cfg(not(feature = "rayon"))]
    fn decompose_cells(&self, d: usize) -> Result<Vec<Vec<SubPolytope>>, MeshConnectivityError> {
        let top = self.top()?;
        (0..self.index[top].len())
            .map(|cell| self.decompose_cell(cell, d))
            .collect()
    }

    #[cfg(feature = "rayon")]
    fn decompose_cells(&self, d: usize) -> Result<Vec<Vec<SubPolytope>>, MeshConnectivityError> {
        use rayon::prelude::*;
        let top = self.top()?;
        (0..self.index[top].len())
            .into_par_iter()
            .map(|cell| self.decompose_cell(cell, d))
            .collect()
    }

    /// Mark every derived relation stale after the entity set changed.
    ///
    /// Ground-truth rows stay in place since identifiers are stable, but `(d, 0)`
    /// for `0 < d < D` is flagged until the next build finds the new sub-entities.
    fn invalidate_derived(&mut self) {
        let Some(top) = self.maximal_dimension else {
            return;
        };
        let stale: Vec<(usize, usize)> = self
            .dirty
            .clean_pairs()
            .filter(|&(d, dp)| !(d == top && dp == 0))
            .collect();
        for (d, dp) in stale {
            if d == 0 || dp != 0 {
                let slot = self.slot(d, dp);
                self.relations[slot].clear();
            }
            self.dirty.set_dirty(d, dp);
        }
    }
}

impl InvalidateCache for Connectivity {
    fn invalidate(&mut self, d: usize, dp: usize) -> Result<(), MeshConnectivityError> {
        self.clear(d, dp).map(|_| ())
    }

    fn invalidate_cache(&mut self) {
        for rel in &mut self.relations {
            rel.clear();
        }
        self.dirty.set_all_dirty();
        log::debug!("invalidated all incidence relations");
    }
}

impl DebugInvariants for Connectivity {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Connectivity");
    }

    fn validate_invariants(&self) -> Result<(), MeshConnectivityError> {
        let Some(top) = self.maximal_dimension else {
            return Ok(());
        };
        let mut entities = 0;
        for d in 0..=top {
            let idx = &self.index[d];
            idx.validate_invariants()?;
            entities += idx.len();
            if d > 0 {
                ensure(self.geometry[d].len() == idx.len(), || {
                    format!(
                        "dimension {d}: {} types for {} entities",
                        self.geometry[d].len(),
                        idx.len()
                    )
                })?;
                if !self.dirty.is_dirty(d, 0) {
                    for (i, vertices) in idx.iter() {
                        let row = self.relation(d, 0).get(i);
                        ensure(row == Some(&IndexSet::from_unsorted(vertices)), || {
                            format!("({d}, 0) row {i} disagrees with {vertices:?}")
                        })?;
                    }
                }
            }
        }
        let typed: usize = self.type_count.values().sum();
        ensure(typed == entities, || {
            format!("{typed} typed entities but {entities} indexed")
        })?;
        for (d, dp) in self.dirty.clean_pairs() {
            let rel = self.relation(d, dp);
            let rows = self.index[d].len();
            ensure(rel.len() == rows, || {
                format!("({d}, {dp}) has {} rows for {rows} entities", rel.len())
            })?;
            let targets = self.index[dp].len();
            ensure(rel.iter().all(|row| row.iter().all(|j| j < targets)), || {
                format!("({d}, {dp}) references past {targets} entities")
            })?;
        }
        Ok(())
    }
}
