//! Edge spatial queries: finding edges near a point, near a line, or
//! incident on a set of nodes.
//!
//! An R-tree bounding-box lookup narrows the candidate set, then an exact
//! geometric predicate (`distance`/`intersects` from [`crate::geom`])
//! filters it down.

use crate::container::Topology;
use crate::event::EventSink;
use crate::geom::{self, Bounds, Coord};
use crate::ids::{EdgeId, NodeId};

/// Edges within `tol` of `c`, found by an R-tree search of the box
/// `[c.x ± tol, c.y ± tol]` filtered by exact point-to-polyline distance.
pub fn get_edge_by_point<S: EventSink>(topo: &Topology<S>, c: Coord, tol: f64) -> Vec<EdgeId> {
    let search = Bounds { min_x: c.x, min_y: c.y, max_x: c.x, max_y: c.y }.expanded(tol);
    topo.edges_query(search)
        .into_iter()
        .filter(|id| geom::distance_point_to_coords(c, &topo.edge(*id).coords) <= tol)
        .collect()
}

/// Edges whose geometry intersects the polyline `cs`, found by an R-tree
/// search of `cs`'s bounding box filtered by exact polyline intersection.
pub fn get_edges_by_line<S: EventSink>(topo: &Topology<S>, cs: &[Coord]) -> Vec<EdgeId> {
    let search = Bounds::of(cs);
    topo.edges_query(search)
        .into_iter()
        .filter(|id| geom::intersects(cs, &topo.edge(*id).coords))
        .collect()
}

/// Edges whose `start` or `end` matches any node in `nodes`. A linear scan --
/// there is no index keyed by node.
pub fn get_edge_by_node<S: EventSink>(topo: &Topology<S>, nodes: &[NodeId]) -> Vec<EdgeId> {
    topo.edges()
        .filter(|e| nodes.contains(&e.start) || nodes.contains(&e.end))
        .map(|e| e.id)
        .collect()
}
