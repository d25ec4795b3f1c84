//! Edge healing and batch splitting: reserved hooks for merging two edges
//! back into one and splitting an edge at several points in one step.
//!
//! Neither operation's contract is pinned down yet -- "undo a split" and
//! "split along several points at once" each have more than one reasonable
//! shape (what happens to a node left with degree zero? are the split
//! points required to be sorted along the curve?) and baking in a guess
//! would lock in behavior nobody has actually asked for. Rather than leave
//! these unreachable or panicking, they surface the gap explicitly via
//! [`TopoError::NotImplemented`] so an embedding application gets a typed,
//! matchable error instead of a missing symbol.

use crate::container::Topology;
use crate::error::{Result, TopoError};
use crate::event::EventSink;
use crate::geom::Coord;
use crate::ids::{EdgeId, NodeId};

/// `modEdgeHeal`: reserved; not implemented.
pub fn mod_edge_heal<S: EventSink>(_topo: &mut Topology<S>, _edge1: EdgeId, _edge2: EdgeId) -> Result<EdgeId> {
    Err(TopoError::NotImplemented { operation: "modEdgeHeal" })
}

/// `newEdgeHeal`: reserved; not implemented.
pub fn new_edge_heal<S: EventSink>(_topo: &mut Topology<S>, _edge1: EdgeId, _edge2: EdgeId) -> Result<EdgeId> {
    Err(TopoError::NotImplemented { operation: "newEdgeHeal" })
}

/// `newEdgesSplit`: reserved; not implemented.
pub fn new_edges_split<S: EventSink>(
    _topo: &mut Topology<S>,
    _edge: EdgeId,
    _at: &[Coord],
) -> Result<Vec<NodeId>> {
    Err(TopoError::NotImplemented { operation: "newEdgesSplit" })
}
