//! The event surface emitted by mutations.
//!
//! Every structural change a mutation makes -- a node created, an edge
//! added or removed, a face split off or merged away -- is reported
//! through a typed [`TopoEvent`] enum and a pluggable [`EventSink`] trait,
//! with a default sink that routes through `log::debug!` so diagnostic
//! output stays off unless the embedding application installs a logger.

use crate::ids::{EdgeId, FaceId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopoEvent {
    AddNode(NodeId),
    AddEdge(EdgeId),
    ModEdge(EdgeId),
    SplitEdge { original: EdgeId, new: EdgeId },
    RemoveEdge(EdgeId),
    AddFace(FaceId),
    RemoveFace(FaceId),
}

/// Receives events in the order they occurred, before the mutation that
/// produced them returns.
pub trait EventSink {
    fn on_event(&mut self, event: TopoEvent);
}

/// Routes every event through `log::debug!`. Installed by default; since
/// nothing in this crate installs a `log` logger, this is a no-op unless
/// the embedding application does.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn on_event(&mut self, event: TopoEvent) {
        log::debug!("topo event: {event:?}");
    }
}
