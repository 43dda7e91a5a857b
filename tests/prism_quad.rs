use mesh_connectivity::prelude::*;

#[test]
fn single_prism_faces_by_type() {
    let mut conn = Connectivity::new();
    conn.initialize(3).unwrap().declare_vertex_count(6).unwrap();
    conn.declare_cell(PolytopeType::TriangularPrism, &[0, 1, 2, 3, 4, 5])
        .unwrap();
    assert_eq!(conn.query(3, 2).unwrap().nnz(), 5);
    assert_eq!(conn.query(3, 1).unwrap().nnz(), 9);
    assert_eq!(conn.count_of_type(PolytopeType::Triangle), 2);
    assert_eq!(conn.count_of_type(PolytopeType::Quadrilateral), 3);
    let quads: Vec<_> = conn
        .entities_of_type(2, PolytopeType::Quadrilateral)
        .unwrap()
        .iter()
        .collect();
    assert_eq!(quads, vec![1, 2, 3]);
    // quads carry four edges, triangles three
    let face_edges = conn.query(2, 1).unwrap().clone();
    for f in 0..5 {
        let expected = if quads.contains(&f) { 4 } else { 3 };
        assert_eq!(face_edges.get(f).unwrap().len(), expected);
    }
}

#[test]
fn stacked_prisms_share_a_quad() {
    let mut conn = Connectivity::new();
    conn.initialize(3).unwrap().declare_vertex_count(8).unwrap();
    conn.declare_cell(PolytopeType::TriangularPrism, &[0, 1, 2, 3, 4, 5])
        .unwrap();
    conn.declare_cell(PolytopeType::TriangularPrism, &[1, 2, 6, 4, 5, 7])
        .unwrap();
    conn.compute(2, 3).unwrap();
    conn.compute(1, 0).unwrap();
    assert_eq!(conn.count(2).unwrap(), 9);
    assert_eq!(conn.count(1).unwrap(), 14);
    let shared = conn.identifier_of(2, &[1, 2, 4, 5]).unwrap().unwrap();
    assert_eq!(conn.geometry(2, shared).unwrap(), PolytopeType::Quadrilateral);
    assert_eq!(conn.incident_set(2, 3, shared).unwrap().as_slice(), &[0, 1]);
    let dual = facet_dual_graph(&mut conn).unwrap();
    assert_eq!(dual.adjncy, vec![1, 0]);
}

fn quad_strip() -> Connectivity {
    // 3 x 2 vertex grid, v = x + 3y
    let mut conn = Connectivity::new();
    conn.initialize(2).unwrap().declare_vertex_count(6).unwrap();
    conn.declare_cell(PolytopeType::Quadrilateral, &[0, 1, 3, 4]).unwrap();
    conn.declare_cell(PolytopeType::Quadrilateral, &[1, 2, 4, 5]).unwrap();
    conn
}

#[test]
fn quad_edges_follow_the_boundary_cycle() {
    let mut conn = quad_strip();
    conn.compute(1, 0).unwrap();
    assert_eq!(conn.count(1).unwrap(), 7);
    // the diagonals of the tensor ordering are never edges
    assert_eq!(conn.identifier_of(1, &[0, 4]).unwrap(), None);
    assert_eq!(conn.identifier_of(1, &[1, 3]).unwrap(), None);
    assert_eq!(conn.vertex_set_of(1, 1).unwrap(), &[1, 4]);
    assert_eq!(conn.vertex_set_of(1, 2).unwrap(), &[4, 3]);
    let middle = conn.identifier_of(1, &[4, 1]).unwrap().unwrap();
    assert_eq!(conn.incident_set(1, 2, middle).unwrap().as_slice(), &[0, 1]);
}

#[test]
fn quad_strip_boundary() {
    let mut conn = quad_strip();
    let split = classify_facets(&mut conn).unwrap();
    assert_eq!(split.boundary.len(), 6);
    assert_eq!(split.interior.len(), 1);
    assert_eq!(conn.vertex_set_of(1, split.interior[0]).unwrap(), &[1, 4]);
}

#[test]
fn mixed_triangle_and_quad() {
    let mut conn = Connectivity::new();
    conn.initialize(2).unwrap().declare_vertex_count(5).unwrap();
    conn.declare_cell(PolytopeType::Quadrilateral, &[0, 1, 3, 4]).unwrap();
    conn.declare_cell(PolytopeType::Triangle, &[1, 2, 4]).unwrap();
    assert_eq!(conn.query(1, 0).unwrap().len(), 6);
    assert_eq!(conn.count_of_type(PolytopeType::Quadrilateral), 1);
    assert_eq!(conn.count_of_type(PolytopeType::Triangle), 1);
    let triangles: Vec<_> = conn
        .entities_of_type(2, PolytopeType::Triangle)
        .unwrap()
        .iter()
        .collect();
    assert_eq!(triangles, vec![1]);
    assert_eq!(conn.query(2, 1).unwrap().nnz(), 7);
    assert_eq!(conn.incident_set(2, 2, 0).unwrap().as_slice(), &[1]);
}
