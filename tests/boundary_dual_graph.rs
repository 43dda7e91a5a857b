use mesh_connectivity::prelude::*;

fn triangle_grid(n: usize) -> Connectivity {
    let mut conn = Connectivity::new();
    let stride = n + 1;
    conn.initialize(2)
        .unwrap()
        .declare_vertex_count(stride * stride)
        .unwrap();
    for y in 0..n {
        for x in 0..n {
            let v = x + y * stride;
            conn.declare_cell(PolytopeType::Triangle, &[v, v + 1, v + stride + 1])
                .unwrap();
            conn.declare_cell(PolytopeType::Triangle, &[v, v + stride + 1, v + stride])
                .unwrap();
        }
    }
    conn
}

#[test]
fn grid_boundary_runs_around_the_square() {
    let n = 3;
    let mut conn = triangle_grid(n);
    let boundary = boundary_facets(&mut conn).unwrap();
    assert_eq!(boundary.len(), 4 * n);
    assert_eq!(conn.count(1).unwrap(), 3 * n * n + 2 * n);
    for e in &boundary {
        let vs = conn.vertex_set_of(1, e).unwrap();
        let on_edge = |v: usize| {
            let (x, y) = (v % (n + 1), v / (n + 1));
            x == 0 || y == 0 || x == n || y == n
        };
        assert!(vs.iter().all(|&v| on_edge(v)), "{vs:?} is not on the boundary");
    }
}

#[test]
fn grid_dual_graph_is_symmetric() {
    let n = 3;
    let mut conn = triangle_grid(n);
    let dual = facet_dual_graph(&mut conn).unwrap();
    let interior = conn.count(1).unwrap() - 4 * n;
    assert_eq!(dual.vertex_count(), 2 * n * n);
    assert_eq!(dual.adjncy.len(), 2 * interior);
    for i in 0..dual.vertex_count() {
        let nbrs = dual.neighbors(i);
        assert!(!nbrs.is_empty() && nbrs.len() <= 3);
        assert!(!nbrs.contains(&i));
        for &j in nbrs {
            assert!(dual.neighbors(j).contains(&i));
        }
    }
    // vertex sharing reaches further than facet sharing
    assert!(conn.query(2, 2).unwrap().nnz() > dual.adjncy.len());
}

#[test]
fn two_tets_boundary_and_dual() {
    let mut conn = Connectivity::new();
    conn.initialize(3).unwrap().declare_vertex_count(5).unwrap();
    conn.declare_cell(PolytopeType::Tetrahedron, &[0, 1, 2, 3]).unwrap();
    conn.declare_cell(PolytopeType::Tetrahedron, &[1, 2, 3, 4]).unwrap();
    let split = classify_facets(&mut conn).unwrap();
    assert_eq!(split.boundary.len(), 6);
    assert_eq!(split.interior.len(), 1);
    assert_eq!(conn.vertex_set_of(2, split.interior[0]).unwrap(), &[1, 2, 3]);
    let dual = facet_dual_graph(&mut conn).unwrap();
    assert_eq!(dual.xadj, vec![0, 1, 2]);
    assert_eq!(dual.adjncy, vec![1, 0]);
}

#[test]
fn tets_touching_at_an_edge_are_not_dual_neighbours() {
    let mut conn = Connectivity::new();
    conn.initialize(3).unwrap().declare_vertex_count(6).unwrap();
    conn.declare_cell(PolytopeType::Tetrahedron, &[0, 1, 2, 3]).unwrap();
    conn.declare_cell(PolytopeType::Tetrahedron, &[0, 1, 4, 5]).unwrap();
    let dual = facet_dual_graph(&mut conn).unwrap();
    assert!(dual.adjncy.is_empty());
    assert_eq!(boundary_facets(&mut conn).unwrap().len(), 8);
    assert_eq!(conn.incident_set(3, 3, 0).unwrap().as_slice(), &[1]);
}
