//! The adjacent-edge finder: locating a new half-edge's clockwise and
//! counter-clockwise neighbors among the edges already incident on a node.
//!
//! Half-edges around a node are ordered by azimuth, ties broken by
//! orientation. Rather than sort the whole bundle, this does a single
//! sweep tracking the smallest and largest azimuthal gap seen so far --
//! all that's needed to place one new outgoing direction among edges that
//! are already there.

use crate::container::Topology;
use crate::error::{Result, TopoError};
use crate::event::EventSink;
use crate::geom::{azimuth, normalize_angle};
use crate::ids::{EdgeId, FaceId, HalfEdge, NodeId};

/// The edge-end state at the *other* endpoint of a closed (start == end)
/// candidate edge, seeding the sweep at this endpoint. `half_edge` is the
/// new edge's own opposite-direction half-edge -- the one genuinely missing
/// candidate a node scan can't find, since the new edge isn't in the arena
/// yet.
#[derive(Debug, Clone, Copy)]
pub struct OtherEnd {
    pub az: f64,
    pub half_edge: HalfEdge,
    pub cw_face: Option<FaceId>,
    pub ccw_face: Option<FaceId>,
}

/// The clockwise/counter-clockwise neighbors of a new outgoing half-edge at
/// some node, and the two faces they bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent {
    pub next_cw: HalfEdge,
    pub next_cw_dir: bool,
    pub next_ccw: HalfEdge,
    pub next_ccw_dir: bool,
    pub cw_face: Option<FaceId>,
    pub ccw_face: Option<FaceId>,
}

/// Finds the clockwise and counter-clockwise neighbors, by outgoing
/// azimuth, of a new half-edge leaving `node` at azimuth `az`. `excluding`
/// is the candidate edge itself when it already exists in the arena (e.g.
/// when re-deriving adjacency, as opposed to inserting for the first time);
/// pass `None` while the edge is still being constructed. `other` seeds the
/// sweep from the opposite endpoint's already-computed state when the
/// candidate edge is closed.
pub fn find_adjacent<S: EventSink>(
    topo: &Topology<S>,
    node: NodeId,
    az: f64,
    excluding: Option<EdgeId>,
    other: Option<OtherEnd>,
) -> Result<Adjacent> {
    // Ring-wiring (next_cw/next_ccw) and face resolution (cw_face/ccw_face)
    // are tracked separately. `other`'s half-edge is a real candidate for
    // *wiring* -- it may genuinely be the nearest neighbor in either
    // direction -- but it carries no face information of its own (it's the
    // new edge's own other end, not an existing boundary), so letting it
    // win the face slots can leave them `None` even though a real edge
    // further around the node bounds the wedge on that side. `face_minaz`/
    // `face_maxaz` track the nearest *real* edge in each direction
    // independently of the wiring sweep, so cw_face/ccw_face always reflect
    // an actual incident edge when the node has any.
    let mut minaz: Option<f64> = None;
    let mut maxaz: Option<f64> = None;
    let mut next_cw = HalfEdge::none();
    let mut next_cw_dir = false;
    let mut next_ccw = HalfEdge::none();
    let mut next_ccw_dir = false;

    let mut face_minaz: Option<f64> = None;
    let mut face_maxaz: Option<f64> = None;
    let mut cw_face = None;
    let mut ccw_face = None;

    if let Some(other) = other {
        let seed = normalize_angle(other.az - az);
        minaz = Some(seed);
        maxaz = Some(seed);
        next_cw = other.half_edge;
        next_cw_dir = other.half_edge.dir;
        next_ccw = other.half_edge;
        next_ccw_dir = other.half_edge.dir;
        // Left unseeded (`None`), not seeded at the virtual candidate's
        // angle: the virtual half-edge has no face of its own, so it must
        // never out-rank a real edge for face purposes regardless of which
        // one is angularly closer. `other.cw_face`/`ccw_face` still serve as
        // the fallback value when the node has no real incident edges at
        // all.
        cw_face = other.cw_face;
        ccw_face = other.ccw_face;
    }

    for edge_id in topo.edges_touching_node(node) {
        if Some(edge_id) == excluding {
            continue;
        }
        let edge = topo.edge(edge_id);
        let coords = &edge.coords;

        // An edge that is both a start- and end-incidence (closed, or a
        // bridge with both ends on this node) contributes both half-edges.
        //
        // `cand_cw`/`cand_ccw` name the face bordering *this candidate's*
        // spoke on its clockwise/counter-clockwise side -- the side a
        // sweep arriving from that rotational direction will land in. For
        // the forward half-edge (start-incidence, dir=true) that's
        // right_face/left_face: walking start->end, rotating the outgoing
        // ray clockwise a touch moves into the right-of-travel face.
        // Incidence via the far end (dir=false) walks the edge reversed,
        // which swaps which stored field is on which rotational side.
        let mut candidates = Vec::with_capacity(2);
        if edge.start == node {
            let this_az = azimuth(coords[0], coords[1]);
            candidates.push((this_az, true, edge.right_face, edge.left_face));
        }
        if edge.end == node {
            let this_az = azimuth(coords[coords.len() - 1], coords[coords.len() - 2]);
            candidates.push((this_az, false, edge.left_face, edge.right_face));
        }

        for (this_az, dir, cand_cw, cand_ccw) in candidates {
            let d = normalize_angle(this_az - az);
            if minaz.is_none() || d < minaz.unwrap() {
                minaz = Some(d);
                next_cw = HalfEdge::new(edge_id, dir);
                next_cw_dir = dir;
            }
            if maxaz.is_none() || d > maxaz.unwrap() {
                maxaz = Some(d);
                next_ccw = HalfEdge::new(edge_id, dir);
                next_ccw_dir = dir;
            }
            if face_minaz.is_none() || d < face_minaz.unwrap() {
                face_minaz = Some(d);
                cw_face = cand_cw;
            }
            if face_maxaz.is_none() || d > face_maxaz.unwrap() {
                face_maxaz = Some(d);
                ccw_face = cand_ccw;
            }
        }
    }

    if other.is_none() {
        if let (Some(cw), Some(ccw)) = (cw_face, ccw_face) {
            if cw != ccw {
                return Err(TopoError::Corrupted {
                    detail: format!(
                        "adjacent edges at {node} bind different faces ({cw} vs {ccw})"
                    ),
                });
            }
        }
    }

    Ok(Adjacent { next_cw, next_cw_dir, next_ccw, next_ccw_dir, cw_face, ccw_face })
}
