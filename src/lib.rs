#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-connectivity
//!
//! mesh-connectivity is the topology layer of a finite-element mesh. Given the vertex
//! count and the list of top-dimensional cells, it assigns stable identifiers to every
//! vertex, edge, face and cell, and answers incidence queries `(d, d')` between any two
//! dimensions. Relations are derived lazily and cached until cleared. Sub-entities are
//! discovered lazily too, so `count(d)` for `0 < d < D` fills in on the first query
//! that involves dimension `d`.
//!
//! ## Features
//! - Segments, triangles, quadrilaterals, tetrahedra and triangular prisms, mixed freely
//! - Sub-entity deduplication by vertex set, with identifiers in discovery order
//! - Derivation by decomposition, transpose and intersection through a pivot
//! - Boundary facet classification and a facet dual graph in CSR form
//! - A lock-guarded shared handle for multi-threaded readers
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-connectivity = "0.1"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ```rust
//! use mesh_connectivity::prelude::*;
//!
//! # fn main() -> Result<(), MeshConnectivityError> {
//! let mut conn = Connectivity::new();
//! conn.initialize(3)?.declare_vertex_count(4)?;
//! conn.declare_cell(PolytopeType::Tetrahedron, &[0, 1, 2, 3])?;
//! assert_eq!(conn.query(3, 2)?.nnz(), 4);
//! assert_eq!(conn.count(2)?, 4);
//! // edges appear once a query needs them
//! assert_eq!(conn.count(1)?, 0);
//! conn.compute(1, 0)?;
//! assert_eq!(conn.count(1)?, 6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Invariant checks
//! Debug builds cross-check the engine's bookkeeping after each query. Enable the
//! `check-invariants` or `strict-invariants` feature to keep the checks in release
//! builds.

pub mod algs;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{DualGraph, boundary_facets, classify_facets, facet_dual_graph};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshConnectivityError;
    pub use crate::topology::{
        Connectivity, ConnectivityOptions, ConnectivityStats, Incidence, Index, IndexRange,
        IndexSet, InvalidateCache, PolytopeType, SharedConnectivity, SubEntityPolicy,
    };
}
