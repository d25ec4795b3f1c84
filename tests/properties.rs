//! Generative invariant checks: build a small graph by chaining
//! `add_iso_edge`/`add_edge_new_faces` calls, then assert the structural
//! invariants hold after every mutation.

use std::collections::HashSet;
use std::f64::consts::PI;

use geo_topo::{add_edge_new_faces, add_iso_edge, rem_edge_new_face, Coord, HalfEdge, Topology};
use proptest::prelude::*;

fn azimuth(a: Coord, b: Coord) -> f64 {
    let angle = (b.y - a.y).atan2(b.x - a.x);
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

fn normalize_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut a = theta % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    a
}

/// Following `next_left`/`next_left_dir` (or the right-ring equivalent)
/// from any live half-edge returns to it in finitely many steps, and every
/// half-edge visited along the way names the same face as the ring's
/// starting half-edge.
fn assert_rings_close(topo: &Topology) {
    for edge in topo.edges() {
        for dir in [true, false] {
            let start = HalfEdge::new(edge.id, dir);
            let expected_face = if dir { edge.left_face } else { edge.right_face };
            let mut seen = HashSet::new();
            let mut cur = start;
            loop {
                assert!(seen.insert(cur), "ring starting at {start} never closed");
                assert!(seen.len() <= topo.edges().count() * 2 + 1, "ring longer than the whole graph");
                let e = topo.edge(cur.edge);
                let face = if cur.dir { e.left_face } else { e.right_face };
                assert_eq!(face, expected_face, "half-edge {cur} names a different face than its ring start");
                let (next_edge, next_dir) = e.next(cur.dir);
                let next = HalfEdge::new(next_edge.edge, next_dir);
                if next == start {
                    break;
                }
                cur = next;
            }
        }
    }
}

/// At every node, the cyclic azimuthal order of outgoing half-edges agrees
/// with the clockwise/counter-clockwise links each edge's ring pointers
/// actually encode: walking a half-edge's own ring pointer from the node
/// it arrives at must land on the half-edge immediately clockwise of it,
/// by angle, among every other half-edge leaving that node.
fn assert_ring_order_matches_azimuth(topo: &Topology) {
    // Every outgoing half-edge at `node`, paired with the azimuth it
    // leaves at.
    let outgoing_at = |node: geo_topo::NodeId, excluding: geo_topo::EdgeId| {
        let mut out = Vec::new();
        for edge in topo.edges() {
            if edge.id == excluding {
                continue;
            }
            if edge.start == node {
                out.push((azimuth(edge.coords[0], edge.coords[1]), HalfEdge::new(edge.id, true)));
            }
            if edge.end == node {
                let last = edge.coords.len() - 1;
                out.push((azimuth(edge.coords[last], edge.coords[last - 1]), HalfEdge::new(edge.id, false)));
            }
        }
        out
    };

    for edge in topo.edges() {
        for dir in [true, false] {
            let he = HalfEdge::new(edge.id, dir);
            let arrival_node = if dir { edge.end } else { edge.start };
            // The azimuth this half-edge's reversal would leave at --
            // the spoke whose clockwise neighbor the ring pointer names.
            let reversal_az = if dir {
                let last = edge.coords.len() - 1;
                azimuth(edge.coords[last], edge.coords[last - 1])
            } else {
                azimuth(edge.coords[0], edge.coords[1])
            };

            let candidates = outgoing_at(arrival_node, edge.id);
            if candidates.is_empty() {
                continue;
            }
            let expected_cw = candidates
                .iter()
                .min_by(|a, b| {
                    normalize_angle(a.0 - reversal_az)
                        .partial_cmp(&normalize_angle(b.0 - reversal_az))
                        .unwrap()
                })
                .unwrap()
                .1;

            let (next_edge, next_dir) = edge.next(dir);
            let actual_cw = HalfEdge::new(next_edge.edge, next_dir);
            assert_eq!(
                actual_cw, expected_cw,
                "ring pointer at node {arrival_node} for half-edge {he} doesn't match the azimuthally nearest clockwise neighbor"
            );
        }
    }
}

/// A node's `face` is set iff it has zero incident edges.
fn assert_isolation_consistent(topo: &Topology) {
    for node in topo.nodes() {
        let incident = topo.edges().filter(|e| e.start == node.id || e.end == node.id).count();
        assert_eq!(
            node.face.is_some(),
            incident == 0,
            "node {} isolation flag disagrees with incident edge count {incident}",
            node.id
        );
    }
}

/// Every edge's stored bounds match the min/max of its own coordinates.
fn assert_bounds_consistent(topo: &Topology) {
    for edge in topo.edges() {
        let bounds = geo_topo::Bounds::of(&edge.coords);
        assert_eq!(bounds, edge.bounds, "edge {} bounds drifted from its coordinates", edge.id);
    }
}

fn assert_invariants(topo: &Topology) {
    assert_rings_close(topo);
    assert_ring_order_matches_azimuth(topo);
    assert_isolation_consistent(topo);
    assert_bounds_consistent(topo);
}

#[test]
fn invariants_hold_after_building_a_small_mesh() {
    // A 2x2 grid of squares, built edge by edge the way an embedding
    // application would, each square closing a face off the last.
    let mut topo: Topology = Topology::new();
    let universe = topo.universe;
    let mut nodes = Vec::new();
    for y in 0..3 {
        let mut row = Vec::new();
        for x in 0..3 {
            row.push(topo.insert_node(Coord::new(x as f64, y as f64), Some(universe)));
        }
        nodes.push(row);
    }

    let mut connect = |topo: &mut Topology, (x1, y1): (usize, usize), (x2, y2): (usize, usize)| {
        let a = nodes[y1][x1];
        let b = nodes[y2][x2];
        let ca = Coord::new(x1 as f64, y1 as f64);
        let cb = Coord::new(x2 as f64, y2 as f64);
        let start_isolated = topo.node(a).face.is_some();
        let end_isolated = topo.node(b).face.is_some();
        if start_isolated && end_isolated {
            add_iso_edge(topo, a, b, vec![ca, cb]).unwrap();
        } else {
            add_edge_new_faces(topo, a, b, vec![ca, cb]).unwrap();
        }
    };

    for y in 0..3 {
        for x in 0..2 {
            connect(&mut topo, (x, y), (x + 1, y));
            assert_invariants(&topo);
        }
    }
    for x in 0..3 {
        for y in 0..2 {
            connect(&mut topo, (x, y), (x, y + 1));
            assert_invariants(&topo);
        }
    }

    assert!(topo.faces().filter(|f| f.id != universe).count() >= 4, "four grid cells should have split off");
}

#[test]
fn insert_then_remove_round_trips() {
    // add_edge_new_faces followed by rem_edge_new_face should leave the
    // rest of the topology as it was before the insertion (up to new face
    // ids).
    let mut topo: Topology = Topology::new();
    let universe = topo.universe;
    let n1 = topo.insert_node(Coord::new(0.0, 0.0), Some(universe));
    let n2 = topo.insert_node(Coord::new(10.0, 0.0), Some(universe));
    let n3 = topo.insert_node(Coord::new(5.0, 5.0), Some(universe));
    add_iso_edge(&mut topo, n1, n2, vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)]).unwrap();
    add_edge_new_faces(&mut topo, n2, n3, vec![Coord::new(10.0, 0.0), Coord::new(5.0, 5.0)]).unwrap();
    assert_invariants(&topo);

    let edges_before = topo.edges().count();
    let faces_before = topo.faces().count();

    let e = add_edge_new_faces(&mut topo, n3, n1, vec![Coord::new(5.0, 5.0), Coord::new(0.0, 0.0)]).unwrap();
    assert_invariants(&topo);
    rem_edge_new_face(&mut topo, e).unwrap();
    assert_invariants(&topo);

    assert_eq!(topo.edges().count(), edges_before);
    assert_eq!(topo.faces().count(), faces_before);
}

proptest! {
    /// Querying the same point with the same tolerance twice returns the
    /// same edge set, for any point/tolerance pair drawn from a
    /// reasonable range around a fixed two-edge topology.
    #[test]
    fn point_query_is_idempotent(x in -5.0f64..15.0, y in -5.0f64..15.0, tol in 0.0f64..3.0) {
        let mut topo: Topology = Topology::new();
        let universe = topo.universe;
        let n1 = topo.insert_node(Coord::new(0.0, 0.0), Some(universe));
        let n2 = topo.insert_node(Coord::new(10.0, 0.0), Some(universe));
        add_iso_edge(&mut topo, n1, n2, vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)]).unwrap();

        let first = geo_topo::get_edge_by_point(&topo, Coord::new(x, y), tol);
        let second = geo_topo::get_edge_by_point(&topo, Coord::new(x, y), tol);
        prop_assert_eq!(first, second);
    }
}
