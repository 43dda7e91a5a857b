//! Polytope type metadata for mesh entities.

use serde::{Deserialize, Serialize};

/// Geometric shapes the connectivity engine knows how to decompose.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PolytopeType {
    /// 0D vertex.
    #[default]
    Point,
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad), vertices in tensor order.
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D wedge: triangle `(0,1,2)` extruded to `(3,4,5)`.
    TriangularPrism,
}

impl PolytopeType {
    /// Every supported type, in dimension order.
    pub const ALL: [PolytopeType; 6] = [
        PolytopeType::Point,
        PolytopeType::Segment,
        PolytopeType::Triangle,
        PolytopeType::Quadrilateral,
        PolytopeType::Tetrahedron,
        PolytopeType::TriangularPrism,
    ];

    /// Largest dimension of any supported type.
    pub const MAX_DIMENSION: usize = 3;

    /// Topological dimension.
    pub fn dimension(self) -> usize {
        match self {
            PolytopeType::Point => 0,
            PolytopeType::Segment => 1,
            PolytopeType::Triangle | PolytopeType::Quadrilateral => 2,
            PolytopeType::Tetrahedron | PolytopeType::TriangularPrism => 3,
        }
    }

    /// Number of vertices in a polytope of this type.
    pub fn vertex_count(self) -> usize {
        match self {
            PolytopeType::Point => 1,
            PolytopeType::Segment => 2,
            PolytopeType::Triangle => 3,
            PolytopeType::Quadrilateral | PolytopeType::Tetrahedron => 4,
            PolytopeType::TriangularPrism => 6,
        }
    }

    pub fn is_simplex(self) -> bool {
        matches!(
            self,
            PolytopeType::Point
                | PolytopeType::Segment
                | PolytopeType::Triangle
                | PolytopeType::Tetrahedron
        )
    }
}
