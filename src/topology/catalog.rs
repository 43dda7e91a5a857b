//! Static decomposition tables for every supported polytope type.
//!
//! # Reference vertex orderings
//! Tables index into the parent's vertex tuple, which is assumed to follow:
//!
//! - [`PolytopeType::Segment`]: `(0,1)`
//! - [`PolytopeType::Triangle`]: `(0,1,2)` counter-clockwise
//! - [`PolytopeType::Quadrilateral`]: `(0,1,2,3)` in tensor order, so the
//!   boundary cycle is `0 → 1 → 3 → 2`
//! - [`PolytopeType::Tetrahedron`]: `(0,1,2,3)`
//! - [`PolytopeType::TriangularPrism`]: bottom triangle `(0,1,2)`, top triangle
//!   `(3,4,5)` with `i + 3` above `i`
//!
//! Decomposing into the parent's own dimension returns the parent unchanged.
//! Decomposing into dimension 0 yields one [`PolytopeType::Point`] per vertex.
//! This is the only shape-specific knowledge in the crate; supporting a new cell
//! type means adding its tables here.

use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;
use crate::topology::polytope::PolytopeType;
use crate::topology::polytope::PolytopeType::{
    Point, Quadrilateral, Segment, Tetrahedron, Triangle, TriangularPrism,
};

/// A sub-polytope expressed as positions inside its parent's vertex tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalPolytope {
    pub geometry: PolytopeType,
    pub vertices: &'static [usize],
}

/// A sub-polytope expressed with global vertex identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubPolytope {
    pub geometry: PolytopeType,
    pub vertices: Vec<Index>,
}

const fn local(geometry: PolytopeType, vertices: &'static [usize]) -> LocalPolytope {
    LocalPolytope { geometry, vertices }
}

const POINTS_1: &[LocalPolytope] = &[local(Point, &[0])];
const POINTS_2: &[LocalPolytope] = &[local(Point, &[0]), local(Point, &[1])];
const POINTS_3: &[LocalPolytope] = &[local(Point, &[0]), local(Point, &[1]), local(Point, &[2])];
const POINTS_4: &[LocalPolytope] = &[
    local(Point, &[0]),
    local(Point, &[1]),
    local(Point, &[2]),
    local(Point, &[3]),
];
const POINTS_6: &[LocalPolytope] = &[
    local(Point, &[0]),
    local(Point, &[1]),
    local(Point, &[2]),
    local(Point, &[3]),
    local(Point, &[4]),
    local(Point, &[5]),
];

const SEGMENT_SELF: &[LocalPolytope] = &[local(Segment, &[0, 1])];

const TRIANGLE_EDGES: &[LocalPolytope] = &[
    local(Segment, &[0, 1]),
    local(Segment, &[1, 2]),
    local(Segment, &[2, 0]),
];
const TRIANGLE_SELF: &[LocalPolytope] = &[local(Triangle, &[0, 1, 2])];

const QUADRILATERAL_EDGES: &[LocalPolytope] = &[
    local(Segment, &[0, 1]),
    local(Segment, &[1, 3]),
    local(Segment, &[3, 2]),
    local(Segment, &[2, 0]),
];
const QUADRILATERAL_SELF: &[LocalPolytope] = &[local(Quadrilateral, &[0, 1, 2, 3])];

const TETRAHEDRON_EDGES: &[LocalPolytope] = &[
    local(Segment, &[0, 1]),
    local(Segment, &[0, 2]),
    local(Segment, &[1, 2]),
    local(Segment, &[1, 3]),
    local(Segment, &[2, 3]),
    local(Segment, &[3, 0]),
];
const TETRAHEDRON_FACES: &[LocalPolytope] = &[
    local(Triangle, &[0, 1, 3]),
    local(Triangle, &[0, 1, 2]),
    local(Triangle, &[0, 2, 3]),
    local(Triangle, &[1, 2, 3]),
];
const TETRAHEDRON_SELF: &[LocalPolytope] = &[local(Tetrahedron, &[0, 1, 2, 3])];

const PRISM_EDGES: &[LocalPolytope] = &[
    local(Segment, &[0, 1]),
    local(Segment, &[0, 2]),
    local(Segment, &[0, 3]),
    local(Segment, &[1, 2]),
    local(Segment, &[1, 4]),
    local(Segment, &[2, 5]),
    local(Segment, &[3, 4]),
    local(Segment, &[3, 5]),
    local(Segment, &[4, 5]),
];
const PRISM_FACES: &[LocalPolytope] = &[
    local(Triangle, &[0, 1, 2]),
    local(Quadrilateral, &[0, 1, 3, 4]),
    local(Quadrilateral, &[1, 2, 4, 5]),
    local(Quadrilateral, &[2, 0, 5, 3]),
    local(Triangle, &[3, 4, 5]),
];
const PRISM_SELF: &[LocalPolytope] = &[local(TriangularPrism, &[0, 1, 2, 3, 4, 5])];

/// Canonical decomposition of `geometry` into its sub-polytopes of dimension `dim`.
pub fn decompose(
    geometry: PolytopeType,
    dim: usize,
) -> Result<&'static [LocalPolytope], MeshConnectivityError> {
    let table = match (geometry, dim) {
        (Point, 0) => POINTS_1,
        (Segment, 0) => POINTS_2,
        (Segment, 1) => SEGMENT_SELF,
        (Triangle, 0) => POINTS_3,
        (Triangle, 1) => TRIANGLE_EDGES,
        (Triangle, 2) => TRIANGLE_SELF,
        (Quadrilateral, 0) => POINTS_4,
        (Quadrilateral, 1) => QUADRILATERAL_EDGES,
        (Quadrilateral, 2) => QUADRILATERAL_SELF,
        (Tetrahedron, 0) => POINTS_4,
        (Tetrahedron, 1) => TETRAHEDRON_EDGES,
        (Tetrahedron, 2) => TETRAHEDRON_FACES,
        (Tetrahedron, 3) => TETRAHEDRON_SELF,
        (TriangularPrism, 0) => POINTS_6,
        (TriangularPrism, 1) => PRISM_EDGES,
        (TriangularPrism, 2) => PRISM_FACES,
        (TriangularPrism, 3) => PRISM_SELF,
        _ => {
            return Err(MeshConnectivityError::UnsupportedDecomposition {
                geometry,
                dimension: dim,
            });
        }
    };
    Ok(table)
}

/// Decompose a concrete polytope with global vertex ids into its dimension-`dim` parts.
///
/// # Errors
/// - [`MeshConnectivityError::VertexCountMismatch`] if `vertices` does not have
///   `geometry.vertex_count()` entries.
/// - [`MeshConnectivityError::UnsupportedDecomposition`] if `dim > geometry.dimension()`.
pub fn sub_polytopes(
    geometry: PolytopeType,
    vertices: &[Index],
    dim: usize,
) -> Result<Vec<SubPolytope>, MeshConnectivityError> {
    check_vertex_count(geometry, vertices)?;
    let table = decompose(geometry, dim)?;
    Ok(table
        .iter()
        .map(|sub| SubPolytope {
            geometry: sub.geometry,
            vertices: sub.vertices.iter().map(|&k| vertices[k]).collect(),
        })
        .collect())
}

pub(crate) fn check_vertex_count(
    geometry: PolytopeType,
    vertices: &[Index],
) -> Result<(), MeshConnectivityError> {
    if vertices.is_empty() {
        return Err(MeshConnectivityError::EmptyVertexTuple);
    }
    if vertices.len() != geometry.vertex_count() {
        return Err(MeshConnectivityError::VertexCountMismatch {
            geometry,
            expected: geometry.vertex_count(),
            found: vertices.len(),
        });
    }
    Ok(())
}
