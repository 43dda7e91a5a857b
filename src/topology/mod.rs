//! Mesh topology: entity identity, incidence relations and the engine that derives them.
//!
//! - [`PolytopeType`] and the [`catalog`] of sub-polytope tables
//! - [`PolytopeIndex`], one per dimension, mapping vertex keys to dense identifiers
//! - [`Incidence`] relations and the [`IndexSet`]/[`IndexRange`] views over them
//! - [`Connectivity`], which owns all of the above and computes relations on demand
//!
//! Most users will build a [`Connectivity`], declare vertices and cells, and query
//! `(d, d')` relations from it.

/// Dense identifier of an entity within its dimension.
pub type Index = usize;

pub mod cache;
pub mod catalog;
pub mod connectivity;
pub mod incidence;
pub mod index_set;
pub mod options;
pub mod polytope;
pub mod polytope_index;
pub mod shared;

pub use cache::InvalidateCache;
pub use connectivity::{Connectivity, ConnectivityStats};
pub use incidence::{DirtyMatrix, Incidence};
pub use index_set::{IndexIter, IndexRange, IndexSet};
pub use options::{ConnectivityOptions, SubEntityPolicy};
pub use polytope::PolytopeType;
pub use polytope_index::{KeyOrder, PolytopeIndex};
pub use shared::SharedConnectivity;
