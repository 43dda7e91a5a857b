use mesh_connectivity::prelude::*;

fn two_triangles() -> Connectivity {
    let mut conn = Connectivity::new();
    conn.initialize(2).unwrap().declare_vertex_count(4).unwrap();
    conn.declare_cell(PolytopeType::Triangle, &[0, 1, 2]).unwrap();
    conn.declare_cell(PolytopeType::Triangle, &[1, 2, 3]).unwrap();
    conn
}

#[test]
fn counts_per_dimension() {
    let mut conn = two_triangles();
    conn.compute(1, 0).unwrap();
    assert_eq!(conn.count(2).unwrap(), 2);
    assert_eq!(conn.count(1).unwrap(), 5);
    assert_eq!(conn.count(0).unwrap(), 4);
    assert_eq!(conn.mesh_dimension(), 2);
    assert_eq!(conn.count_of_type(PolytopeType::Segment), 5);
    assert_eq!(conn.count_of_type(PolytopeType::Point), 4);
}

#[test]
fn shared_edge_is_seen_from_both_sides() {
    let mut conn = two_triangles();
    let t0_edges = conn.incident_set(2, 1, 0).unwrap().clone();
    assert_eq!(t0_edges.len(), 3);
    let e12 = conn.identifier_of(1, &[1, 2]).unwrap().unwrap();
    assert!(t0_edges.contains(e12));
    assert!(conn.incident_set(2, 1, 1).unwrap().contains(e12));
    assert_eq!(conn.incident_set(1, 2, e12).unwrap().as_slice(), &[0, 1]);
}

#[test]
fn cells_sharing_a_vertex_are_adjacent() {
    let mut conn = two_triangles();
    assert_eq!(conn.incident_set(2, 2, 0).unwrap().as_slice(), &[1]);
    assert_eq!(conn.incident_set(2, 2, 1).unwrap().as_slice(), &[0]);
}

#[test]
fn vertices_know_their_edges() {
    let mut conn = two_triangles();
    let v0 = conn.incident_set(0, 1, 0).unwrap().clone();
    assert_eq!(v0.len(), 2);
    for e in &v0 {
        assert!(conn.vertex_set_of(1, e).unwrap().contains(&0));
    }
    assert_eq!(conn.incident_set(0, 2, 1).unwrap().as_slice(), &[0, 1]);
    assert_eq!(conn.incident_set(0, 2, 3).unwrap().as_slice(), &[1]);
}

#[test]
fn vertex_sets_round_trip() {
    let mut conn = two_triangles();
    conn.compute(1, 0).unwrap();
    for d in 0..=2 {
        for i in &conn.entities(d).unwrap() {
            let key = conn.vertex_set_of(d, i).unwrap().to_vec();
            assert_eq!(conn.identifier_of(d, &key).unwrap(), Some(i));
        }
    }
}

#[test]
fn redeclaring_a_cell_is_a_no_op() {
    let mut conn = two_triangles();
    conn.query(2, 1).unwrap();
    let before = conn.stats();
    assert_eq!(conn.declare_cell(PolytopeType::Triangle, &[1, 2, 3]).unwrap(), 1);
    assert_eq!(conn.count(2).unwrap(), 2);
    assert!(!conn.is_dirty(2, 1).unwrap());
    conn.query(2, 1).unwrap();
    assert_eq!(conn.stats(), before);
}

#[test]
fn cells_are_keyed_by_ordered_tuple() {
    let mut conn = two_triangles();
    let rotated = conn.declare_cell(PolytopeType::Triangle, &[2, 0, 1]).unwrap();
    assert_eq!(rotated, 2);
    assert_eq!(conn.count(2).unwrap(), 3);
    // the rotated copy shares all three edges with cell 0
    assert_eq!(conn.query(1, 0).unwrap().len(), 5);
    let copy = conn.incident_set(2, 1, 2).unwrap().clone();
    let original = conn.incident_set(2, 1, 0).unwrap().clone();
    assert_eq!(copy, original);
}

#[test]
fn cleared_relation_is_recomputed() {
    let mut conn = two_triangles();
    let first = conn.query(1, 1).unwrap().clone();
    let stats = conn.stats();
    conn.clear(1, 1).unwrap();
    assert!(conn.is_dirty(1, 1).unwrap());
    assert!(!conn.is_dirty(2, 1).unwrap());
    assert_eq!(conn.query(1, 1).unwrap(), &first);
    assert_eq!(conn.stats().intersections, stats.intersections + 1);
    assert_eq!(conn.stats().builds, stats.builds);
}
