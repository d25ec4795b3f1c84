//! The face subsystem's ring-walker: deciding whether a newly closed ring
//! of half-edges encloses a real bounded region and, if so, splitting a
//! fresh face off the one it used to belong to.
//!
//! Follows a directed half-edge's "next" pointer to keep its bounding face
//! on the left of travel, and uses a shoelace-sign test on the resulting
//! ring to tell a real face boundary from a degenerate or backwards one.

use std::collections::HashSet;

use crate::container::Topology;
use crate::error::{Result, TopoError};
use crate::event::{EventSink, TopoEvent};
use crate::geom::{Bounds, Coord};
use crate::ids::{FaceId, HalfEdge};

fn shoelace_area2(coords: &[Coord]) -> f64 {
    let mut sum = 0.0;
    for w in coords.windows(2) {
        sum += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    sum
}

/// Walks the ring starting at the directed half-edge `start`, following
/// `next_left`/`next_left_dir` while the current half-edge runs
/// start->end, or `next_right`/`next_right_dir` while it runs end->start
/// -- whichever keeps the bounded face on the left of travel.
///
/// Returns `Ok(None)` if the ring doesn't enclose anything new (it closes
/// but with non-positive signed area, i.e. it bounds the same
/// unbounded/already-counted region it started in -- `addFaceSplit`'s
/// "0" return). Returns `Ok(Some(face))` otherwise: a freshly minted face
/// under `merge_mode = false`, or `old_face` re-used (with updated
/// bounds) under `merge_mode = true`. Returns `Err(TopoError::Corrupted)`
/// if the ring never comes back around to `start`.
pub fn add_face_split<S: EventSink>(
    topo: &mut Topology<S>,
    start: HalfEdge,
    old_face: FaceId,
    merge_mode: bool,
) -> Result<Option<FaceId>> {
    let mut visited = Vec::new();
    let mut seen: HashSet<HalfEdge> = HashSet::new();
    let mut coords = Vec::new();

    let mut cur = start;
    loop {
        if !seen.insert(cur) {
            return Err(TopoError::Corrupted {
                detail: format!("ring starting at half-edge {start} never closed"),
            });
        }
        let edge = topo.edge(cur.edge);
        let from = if cur.dir { edge.start } else { edge.end };
        coords.push(topo.node(from).coord);
        visited.push(cur);

        let (next_edge, next_dir) = edge.next(cur.dir);
        let next_he = HalfEdge::new(next_edge.edge, next_dir);
        if next_he == start {
            break;
        }
        cur = next_he;
    }

    // Close the ring for the area computation.
    coords.push(coords[0]);

    if visited.len() < 2 || shoelace_area2(&coords) <= 0.0 {
        return Ok(None);
    }

    let bounds = Bounds::of(&coords[..coords.len() - 1]);
    let face_id = if merge_mode {
        topo.update_face_tree(old_face, bounds);
        old_face
    } else {
        topo.insert_face(Some(bounds))
    };

    for he in &visited {
        // Walking via `next_left` (he.dir == true) puts `left_face` on
        // the left; walking via `next_right` puts `right_face` there.
        topo.edge_mut(he.edge).set_face(!he.dir, face_id);
    }

    if !merge_mode {
        topo.trigger(TopoEvent::AddFace(face_id));
    }
    Ok(Some(face_id))
}
