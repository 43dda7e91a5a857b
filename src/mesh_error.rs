//! MeshConnectivityError: unified error type for mesh-connectivity public APIs
//!
//! Every variant describes a precondition the calling mesh layer violated. None of
//! them is transient; retrying the same call yields the same error.

use crate::topology::polytope::PolytopeType;
use thiserror::Error;

/// Unified error type for connectivity operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshConnectivityError {
    /// Any operation issued before [`Connectivity::initialize`](crate::topology::Connectivity::initialize).
    #[error("connectivity used before initialize()")]
    Uninitialized,
    /// `initialize` was called a second time.
    #[error("connectivity already initialized with maximal dimension {maximal_dimension}")]
    AlreadyInitialized { maximal_dimension: usize },
    /// A dimension argument exceeds the maximal dimension (or the catalog's range).
    #[error("dimension {dimension} out of range (maximal dimension {maximal})")]
    DimensionOutOfRange { dimension: usize, maximal: usize },
    /// A polytope was declared with no vertices.
    #[error("polytope declared with an empty vertex tuple")]
    EmptyVertexTuple,
    /// The shape catalog has no table for `geometry` at `dimension`.
    #[error("no decomposition of {geometry:?} into dimension {dimension}")]
    UnsupportedDecomposition {
        geometry: PolytopeType,
        dimension: usize,
    },
    /// Vertex tuple length does not match the polytope type.
    #[error("{geometry:?} expects {expected} vertices, got {found}")]
    VertexCountMismatch {
        geometry: PolytopeType,
        expected: usize,
        found: usize,
    },
    /// The polytope type does not live in the dimension the call requires.
    #[error("{geometry:?} has dimension {found}, expected {expected}")]
    GeometryDimensionMismatch {
        geometry: PolytopeType,
        expected: usize,
        found: usize,
    },
    /// A vertex tuple references a vertex that was never declared.
    #[error("vertex {vertex} not declared (vertex count {count})")]
    UnknownVertex { vertex: usize, count: usize },
    /// `declare_vertex_count` was called after vertices already exist.
    #[error("vertices already declared ({count} present)")]
    VerticesAlreadyDeclared { count: usize },
    /// An entity identifier is past the end of its dimension.
    #[error("index {index} out of range for dimension {dimension} ({count} entities)")]
    IndexOutOfRange {
        dimension: usize,
        index: usize,
        count: usize,
    },
    /// A read-only accessor hit a relation that still has to be computed.
    #[error("incidence ({d}, {dp}) is dirty; compute it first")]
    StaleIncidence { d: usize, dp: usize },
    /// An externally supplied incidence has the wrong number of rows.
    #[error("incidence ({d}, {dp}) must have {expected} rows, got {found}")]
    IncidenceSizeMismatch {
        d: usize,
        dp: usize,
        expected: usize,
        found: usize,
    },
    /// `(d, 0)` for `d > 0` is owned by the polytope index and cannot be replaced.
    #[error("incidence ({d}, 0) is ground truth and cannot be set externally")]
    GroundTruthRelation { d: usize },
    /// Internal bookkeeping disagrees with itself.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
