//! CSR (compressed-sparse-row) *dual graph* of a mesh.
//
// Each cell is a graph vertex; an undirected edge joins two cells that share a
// facet. Cells that only touch at a vertex or an edge (in 3D) are not adjacent
// here, unlike the `(D, D)` relation of the connectivity engine.
//
// * `xadj[i] .. xadj[i+1]`   = neighbour list of cell *i*
// * `adjncy`                 = concatenated neighbour cells, sorted per cell
// * `vwgt[i]`                = vertex weight, always 1
//
// The graph is symmetric and has no self loops.

use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;
use crate::topology::connectivity::Connectivity;
use crate::topology::index_set::IndexSet;

/// CSR triple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualGraph {
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
    pub vwgt: Vec<i32>, // partitioners expect i32
}

impl DualGraph {
    /// Number of graph vertices (cells).
    pub fn vertex_count(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    /// Neighbours of cell `i`.
    pub fn neighbors(&self, i: Index) -> &[usize] {
        match (self.xadj.get(i), self.xadj.get(i + 1)) {
            (Some(&lo), Some(&hi)) => &self.adjncy[lo..hi],
            _ => &[],
        }
    }
}

/// Build the facet-sharing dual graph from `(D, D-1)` and `(D-1, D)`.
pub fn facet_dual_graph(conn: &mut Connectivity) -> Result<DualGraph, MeshConnectivityError> {
    let top = conn.maximal_dimension()?;
    let facet = top - 1;
    conn.compute(top, facet)?;
    conn.compute(facet, top)?;
    let cell_facets = conn.try_incidence(top, facet)?;
    let facet_cells = conn.try_incidence(facet, top)?;

    let n = cell_facets.len();
    let mut xadj = Vec::with_capacity(n + 1);
    let mut adjncy = Vec::new();
    xadj.push(0);
    let mut buf = Vec::new();
    for (cell, facets) in cell_facets.iter().enumerate() {
        buf.clear();
        for f in facets {
            if let Some(cells) = facet_cells.get(f) {
                buf.extend(cells.iter().filter(|&other| other != cell));
            }
        }
        let nbrs: IndexSet = buf.iter().copied().collect();
        adjncy.extend(nbrs.iter());
        xadj.push(adjncy.len());
    }
    let vwgt = vec![1; n];
    log::debug!("facet dual graph: {n} cells, {} directed edges", adjncy.len());
    Ok(DualGraph { xadj, adjncy, vwgt })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::polytope::PolytopeType;

    #[test]
    fn dual_graph_two_cells() {
        let mut conn = Connectivity::new();
        conn.initialize(2).unwrap().declare_vertex_count(4).unwrap();
        conn.declare_cell(PolytopeType::Triangle, &[0, 1, 2]).unwrap();
        conn.declare_cell(PolytopeType::Triangle, &[1, 2, 3]).unwrap();
        let dg = facet_dual_graph(&mut conn).unwrap();
        assert_eq!(dg.xadj, vec![0, 1, 2]);
        assert_eq!(dg.adjncy, vec![1, 0]);
        assert_eq!(dg.vwgt, vec![1, 1]);
        assert_eq!(dg.vertex_count(), 2);
    }

    #[test]
    fn vertex_contact_is_not_an_edge() {
        // bow tie: two triangles meeting at vertex 2 only
        let mut conn = Connectivity::new();
        conn.initialize(2).unwrap().declare_vertex_count(5).unwrap();
        conn.declare_cell(PolytopeType::Triangle, &[0, 1, 2]).unwrap();
        conn.declare_cell(PolytopeType::Triangle, &[2, 3, 4]).unwrap();
        let dg = facet_dual_graph(&mut conn).unwrap();
        assert!(dg.adjncy.is_empty());
        assert_eq!(conn.query(2, 2).unwrap().get(0).unwrap().as_slice(), &[1]);
        assert!(dg.neighbors(0).is_empty());
        assert!(dg.neighbors(7).is_empty());
    }
}
