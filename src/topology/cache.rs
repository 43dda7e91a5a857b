//! Invalidation of memoized incidence relations.

use crate::mesh_error::MeshConnectivityError;

/// Structures that memoize `(d, d')` relations and can be told to forget them.
pub trait InvalidateCache {
    /// Forget relation `(d, d')`; the next query for it recomputes.
    fn invalidate(&mut self, d: usize, dp: usize) -> Result<(), MeshConnectivityError>;

    /// Forget every memoized relation. Entities and their identifiers are kept.
    fn invalidate_cache(&mut self);
}
