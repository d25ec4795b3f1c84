//! Splitting an edge in two at an interior coordinate.
//!
//! Uses the same truncate-and-append pattern as [`super::add`]'s ring
//! splicing, run on a single edge instead of two: the tail half of the
//! original curve becomes a new edge, the head half keeps the original
//! edge's identity, and every ring pointer that used to land on the tail
//! now lands on the new edge instead.

use crate::container::{Edge, Topology};
use crate::error::{Result, TopoError};
use crate::event::{EventSink, TopoEvent};
use crate::geom::{self, Bounds, Coord};
use crate::ids::{EdgeId, HalfEdge, NodeId};

/// Splits `edge_id` at `at` (which must lie on the edge, strictly between
/// its endpoints) and returns the newly created node.
pub fn mod_edge_split<S: EventSink>(topo: &mut Topology<S>, edge_id: EdgeId, at: Coord) -> Result<NodeId> {
    let (_, original_end, left_face, right_face, next_left, next_left_dir) = {
        let edge = topo.edge(edge_id);
        (edge.start, edge.end, edge.left_face, edge.right_face, edge.next_left, edge.next_left_dir)
    };

    let (head, tail) = geom::split(&topo.edge(edge_id).coords, at).ok_or_else(|| TopoError::Corrupted {
        detail: format!("split point does not lie on the interior of edge {edge_id}"),
    })?;

    let node = topo.insert_node(at, None);

    let new_id = topo.alloc_edge_id();

    // Step 5: newedge1 inherits the original left ring unless that ring
    // was a self-loop closing back on the original edge's own reversed
    // half-edge (dir=false) -- in that case the ring now closes on
    // newedge1 itself instead, since newedge1 is what now occupies the
    // tail half of that loop.
    let (new_next_left, new_next_left_dir) = if next_left.edge == edge_id && !next_left_dir {
        (HalfEdge::new(new_id, false), false)
    } else {
        (next_left, next_left_dir)
    };

    topo.insert_edge(Edge {
        id: new_id,
        coords: tail.clone(),
        start: node,
        end: original_end,
        left_face,
        right_face,
        bounds: Bounds::of(&tail),
        next_left: new_next_left,
        next_left_dir: new_next_left_dir,
        // Step 4: the new edge's right ring continues by walking the
        // original (now-truncated) edge backward.
        next_right: HalfEdge::new(edge_id, false),
        next_right_dir: false,
    });

    // Step 7: truncate the original edge down to its head half.
    {
        let original = topo.edge_mut(edge_id);
        original.coords = head.clone();
        original.end = node;
        original.next_left = HalfEdge::new(new_id, true);
        original.next_left_dir = true;
    }
    topo.reindex_edge(edge_id, Bounds::of(&head));

    // Step 8: every other edge whose ring pointer landed on the original
    // edge's tail-ward half-edge now lands on newedge1 instead. An edge's
    // next_right pointed there if it read `(edge_id, dir=false)` *and* its
    // own start is the original end -- i.e. it was arriving at the
    // original edge from the far side, which is now newedge1's territory.
    // The symmetric check covers next_left the same way.
    let candidates = topo.edges_touching_node(original_end);
    for id in candidates {
        if id == edge_id || id == new_id {
            continue;
        }
        let (starts_here, ends_here) = {
            let e = topo.edge(id);
            (e.start == original_end, e.end == original_end)
        };
        if starts_here {
            let points_at_original = topo.edge(id).next_right == HalfEdge::new(edge_id, false);
            if points_at_original {
                topo.edge_mut(id).set_next(false, HalfEdge::new(new_id, false), false);
            }
        }
        if ends_here {
            let points_at_original = topo.edge(id).next_left == HalfEdge::new(edge_id, false);
            if points_at_original {
                topo.edge_mut(id).set_next(true, HalfEdge::new(new_id, false), false);
            }
        }
    }

    topo.trigger(TopoEvent::AddNode(node));
    topo.trigger(TopoEvent::AddEdge(new_id));
    topo.trigger(TopoEvent::ModEdge(edge_id));
    topo.trigger(TopoEvent::SplitEdge { original: edge_id, new: new_id });

    Ok(node)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::LogEventSink;
    use crate::ids::HalfEdge;

    fn iso_edge(topo: &mut Topology<LogEventSink>, start: NodeId, end: NodeId, coords: Vec<Coord>) -> EdgeId {
        crate::edge::add_iso_edge(topo, start, end, coords).unwrap()
    }

    #[test]
    fn splits_the_curve_and_rewires_the_left_ring() {
        let mut topo: Topology<LogEventSink> = Topology::new();
        let universe = topo.universe;
        let n1 = topo.insert_node(Coord::new(0.0, 0.0), Some(universe));
        let n2 = topo.insert_node(Coord::new(10.0, 0.0), Some(universe));
        let e = iso_edge(&mut topo, n1, n2, vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)]);

        let node = mod_edge_split(&mut topo, e, Coord::new(5.0, 0.0)).unwrap();

        assert_eq!(topo.node(node).coord, Coord::new(5.0, 0.0));
        let original = topo.edge(e);
        assert_eq!(original.coords, vec![Coord::new(0.0, 0.0), Coord::new(5.0, 0.0)]);
        assert_eq!(original.end, node);

        let new_id = topo.edges().map(|e| e.id).find(|&id| id != e).unwrap();
        let new_edge = topo.edge(new_id);
        assert_eq!(new_edge.coords, vec![Coord::new(5.0, 0.0), Coord::new(10.0, 0.0)]);
        assert_eq!(new_edge.start, node);
        assert_eq!(new_edge.end, n2);

        // The original edge's left ring now continues onto the new edge.
        assert_eq!(original.next_left, HalfEdge::new(new_id, true));
        assert!(original.next_left_dir);
        assert_eq!(new_edge.next_right, HalfEdge::new(e, false));
        assert!(!new_edge.next_right_dir);
    }

    #[test]
    fn self_looping_left_ring_rewires_onto_the_new_edge_not_back_to_the_original() {
        // An isolated edge self-loops its left ring back onto its own
        // reversed half-edge (dir=false). After the split, that loop must
        // close on newedge1's reversed half-edge instead -- closing back on
        // the original (now-truncated) edge would walk the wrong ring.
        let mut topo: Topology<LogEventSink> = Topology::new();
        let universe = topo.universe;
        let n1 = topo.insert_node(Coord::new(0.0, 0.0), Some(universe));
        let n2 = topo.insert_node(Coord::new(10.0, 0.0), Some(universe));
        let e = iso_edge(&mut topo, n1, n2, vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)]);
        assert_eq!(topo.edge(e).next_left, HalfEdge::new(e, false));

        mod_edge_split(&mut topo, e, Coord::new(5.0, 0.0)).unwrap();
        let new_id = topo.edges().map(|edge| edge.id).find(|&id| id != e).unwrap();

        assert_eq!(topo.edge(new_id).next_left, HalfEdge::new(new_id, false));
        assert!(!topo.edge(new_id).next_left_dir);
    }
}
