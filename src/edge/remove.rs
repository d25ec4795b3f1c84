//! Removing an edge and reconciling the faces it used to separate.
//!
//! Uses the same ring-pointer bookkeeping as [`super::add`], run in
//! reverse: instead of splicing a new edge into two rings, this splices it
//! back out, then either leaves the bounding faces alone (a bridge), floods
//! two faces into the universe, or merges two real faces into one --
//! reusing one of them (`mod_face=true`) or minting a fresh one
//! (`mod_face=false`), mirroring [`crate::face::add_face_split`]'s own
//! `merge_mode` split.

use crate::container::Topology;
use crate::error::Result;
use crate::event::{EventSink, TopoEvent};
use crate::geom::Bounds;
use crate::ids::{EdgeId, FaceId};

/// `remEdgeNewFace`: removes `edge`, minting a fresh face when its removal
/// merges two real faces into one.
pub fn rem_edge_new_face<S: EventSink>(topo: &mut Topology<S>, edge: EdgeId) -> Result<FaceId> {
    rem_edge(topo, edge, false)
}

/// `remEdgeModFace`: removes `edge`, re-using one of the two bounding
/// faces' identity instead of minting a new one when they merge.
pub fn rem_edge_mod_face<S: EventSink>(topo: &mut Topology<S>, edge: EdgeId) -> Result<FaceId> {
    rem_edge(topo, edge, true)
}

fn rem_edge<S: EventSink>(topo: &mut Topology<S>, edge_id: EdgeId, mod_face: bool) -> Result<FaceId> {
    let (start, end, old_left, old_right) = {
        let edge = topo.edge(edge_id);
        (
            edge.start,
            edge.end,
            edge.left_face.expect("a live edge always has a left face"),
            edge.right_face.expect("a live edge always has a right face"),
        )
    };

    // Step 2: any other edge incident to either endpoint whose own
    // next_left/next_right points at one of our half-edges must be
    // re-spliced to skip over us -- its new target is whatever half-edge
    // we ourselves would have continued the ring with.
    let mut touching = topo.edges_touching_node(start);
    for id in topo.edges_touching_node(end) {
        if !touching.contains(&id) {
            touching.push(id);
        }
    }
    for id in touching {
        if id == edge_id {
            continue;
        }
        let next_left = topo.edge(id).next_left;
        if next_left.edge == edge_id {
            let (new_he, new_dir) = topo.edge(edge_id).next(next_left.dir);
            topo.edge_mut(id).set_next(true, new_he, new_dir);
        }
        let next_right = topo.edge(id).next_right;
        if next_right.edge == edge_id {
            let (new_he, new_dir) = topo.edge(edge_id).next(next_right.dir);
            topo.edge_mut(id).set_next(false, new_he, new_dir);
        }
    }

    let fnode_edges = topo.edges_touching_node(start).into_iter().filter(|&id| id != edge_id).count();
    let lnode_edges = topo.edges_touching_node(end).into_iter().filter(|&id| id != edge_id).count();

    let vanishing: Vec<FaceId> =
        if old_left == old_right { vec![old_left] } else { vec![old_left, old_right] };

    // Step 4: floodface.
    let (floodface, new_face_created) = if old_left == old_right {
        // A bridge: both sides already the same face, nothing merges.
        (old_left, false)
    } else if old_left == topo.universe || old_right == topo.universe {
        (topo.universe, false)
    } else if mod_face {
        (old_right, false)
    } else {
        (topo.insert_face(None), true)
    };

    // Step 5: reassign every reference to a vanishing face, edges first.
    let edge_ids: Vec<EdgeId> = topo.edges().map(|e| e.id).collect();
    for id in edge_ids {
        if id == edge_id {
            continue;
        }
        let e = topo.edge_mut(id);
        if e.left_face.is_some_and(|f| vanishing.contains(&f)) {
            e.left_face = Some(floodface);
        }
        if e.right_face.is_some_and(|f| vanishing.contains(&f)) {
            e.right_face = Some(floodface);
        }
    }
    let node_ids: Vec<_> = topo.nodes().map(|n| n.id).collect();
    for id in node_ids {
        let n = topo.node_mut(id);
        if n.face.is_some_and(|f| vanishing.contains(&f)) {
            n.face = Some(floodface);
        }
    }

    // Step 6: gather the flooded face's new bounds before the edge that
    // bounded it is gone, then remove the edge itself.
    let mut flood_bounds: Option<Bounds> = None;
    for e in topo.edges() {
        if e.id != edge_id && (e.left_face == Some(floodface) || e.right_face == Some(floodface)) {
            flood_bounds = Some(match flood_bounds {
                Some(b) => b.union(&e.bounds),
                None => e.bounds,
            });
        }
    }
    topo.delete_edge(edge_id);

    // Step 7: restore isolation on endpoints left with no other edges.
    if fnode_edges == 0 {
        topo.node_mut(start).face = Some(floodface);
    }
    if end != start && lnode_edges == 0 {
        topo.node_mut(end).face = Some(floodface);
    }

    // Step 8: delete the old faces that didn't survive as floodface.
    let mut to_delete: Vec<FaceId> = vanishing.into_iter().filter(|&f| f != floodface).collect();
    to_delete.sort();
    to_delete.dedup();
    for f in to_delete {
        topo.delete_face(f);
        topo.trigger(TopoEvent::RemoveFace(f));
    }

    // Step 9: keep the surviving/new face's R-tree entry current.
    if floodface != topo.universe {
        if let Some(bounds) = flood_bounds {
            topo.update_face_tree(floodface, bounds);
        }
    }

    topo.trigger(TopoEvent::RemoveEdge(edge_id));
    if new_face_created {
        topo.trigger(TopoEvent::AddFace(floodface));
    }

    Ok(floodface)
}
