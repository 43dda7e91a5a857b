//! Boundary classification of facets.
//!
//! A facet (dimension `D-1`) lying on the boundary of the mesh is incident to exactly
//! one cell; interior facets are shared by two or more. Facets declared explicitly
//! but not touching any cell count as neither and are reported separately.

use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;
use crate::topology::connectivity::Connectivity;
use crate::topology::index_set::IndexRange;

/// Facets split by the number of incident cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetClassification {
    /// Exactly one incident cell.
    pub boundary: Vec<Index>,
    /// Two or more incident cells.
    pub interior: Vec<Index>,
    /// No incident cell.
    pub detached: Vec<Index>,
}

/// Classify every facet by the number of cells it bounds.
///
/// Computes `(D-1, D)` if needed. Lists come out in increasing identifier order.
pub fn classify_facets(
    conn: &mut Connectivity,
) -> Result<FacetClassification, MeshConnectivityError> {
    let top = conn.maximal_dimension()?;
    let facets = conn.query(top - 1, top)?;
    let mut out = FacetClassification::default();
    for (f, cells) in facets.iter().enumerate() {
        match cells.len() {
            0 => out.detached.push(f),
            1 => out.boundary.push(f),
            _ => out.interior.push(f),
        }
    }
    if !out.detached.is_empty() {
        log::warn!("{} facets are not incident to any cell", out.detached.len());
    }
    Ok(out)
}

/// Facets incident to exactly one cell.
pub fn boundary_facets(conn: &mut Connectivity) -> Result<IndexRange, MeshConnectivityError> {
    Ok(IndexRange::from(classify_facets(conn)?.boundary))
}
