//! Algorithms derived from the connectivity engine.

pub mod boundary;
pub mod dual_graph;

pub use boundary::{FacetClassification, boundary_facets, classify_facets};
pub use dual_graph::{DualGraph, facet_dual_graph};
