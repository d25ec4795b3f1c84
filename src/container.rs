//! The topology container: arena storage for nodes, edges and faces, the
//! two spatial indexes, id sequencing and event dispatch.
//!
//! Nodes live in a plain `Vec`, edges and faces in maps keyed by their
//! arena ids, and an `rstar::RTree` per edges/faces keeps both queryable by
//! bounding box. Unlike a one-shot spatial index built once over a whole
//! geometry, both trees are maintained incrementally, since this structure
//! is mutated one edge at a time as an embedding application builds it up.

use std::collections::HashMap;

use rstar::{RTree, RTreeObject, AABB};

use crate::event::{EventSink, LogEventSink, TopoEvent};
use crate::geom::{Bounds, Coord};
use crate::ids::{EdgeId, FaceId, HalfEdge, NodeId};

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord,
    /// `Some(face)` iff this node has no incident edges.
    pub face: Option<FaceId>,
}

impl Node {
    pub fn is_isolated(&self) -> bool {
        self.face.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub coords: Vec<Coord>,
    pub start: NodeId,
    pub end: NodeId,
    pub left_face: Option<FaceId>,
    pub right_face: Option<FaceId>,
    pub bounds: Bounds,
    pub next_left: HalfEdge,
    pub next_left_dir: bool,
    pub next_right: HalfEdge,
    pub next_right_dir: bool,
}

impl Edge {
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }

    /// The `next*` half-edge and its direction flag for the ring on
    /// `side` of this edge's own forward half-edge.
    pub fn next(&self, left: bool) -> (HalfEdge, bool) {
        if left {
            (self.next_left, self.next_left_dir)
        } else {
            (self.next_right, self.next_right_dir)
        }
    }

    pub fn set_next(&mut self, left: bool, he: HalfEdge, dir: bool) {
        if left {
            self.next_left = he;
            self.next_left_dir = dir;
        } else {
            self.next_right = he;
            self.next_right_dir = dir;
        }
    }

    pub fn face(&self, right_side: bool) -> Option<FaceId> {
        if right_side {
            self.right_face
        } else {
            self.left_face
        }
    }

    pub fn set_face(&mut self, right_side: bool, face: FaceId) {
        if right_side {
            self.right_face = Some(face);
        } else {
            self.left_face = Some(face);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeEnvelope {
    id: EdgeId,
    bounds: Bounds,
}

impl RTreeObject for EdgeEnvelope {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceEnvelope {
    id: FaceId,
    bounds: Bounds,
}

impl RTreeObject for FaceEnvelope {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

/// A snapshot of everything a mutation could touch, taken before that
/// mutation runs so it can be rolled back if a post-validation invariant
/// check fails partway through, leaving the structure recoverable rather
/// than silently corrupted.
#[derive(Clone)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: HashMap<EdgeId, Edge>,
    faces: HashMap<FaceId, Face>,
    edges_tree: RTree<EdgeEnvelope>,
    faces_tree: RTree<FaceEnvelope>,
    edges_seq: u64,
    faces_seq: u64,
}

pub struct Topology<S: EventSink = LogEventSink> {
    nodes: Vec<Node>,
    edges: HashMap<EdgeId, Edge>,
    faces: HashMap<FaceId, Face>,
    edges_tree: RTree<EdgeEnvelope>,
    faces_tree: RTree<FaceEnvelope>,
    edges_seq: u64,
    faces_seq: u64,
    pub universe: FaceId,
    sink: S,
}

impl Topology<LogEventSink> {
    pub fn new() -> Self {
        Topology::with_sink(LogEventSink)
    }
}

impl Default for Topology<LogEventSink> {
    fn default() -> Self {
        Topology::new()
    }
}

impl<S: EventSink> Topology<S> {
    pub fn with_sink(sink: S) -> Self {
        let universe = FaceId(1);
        let mut faces = HashMap::new();
        faces.insert(universe, Face { id: universe, bounds: None });
        Topology {
            nodes: Vec::new(),
            edges: HashMap::new(),
            faces,
            edges_tree: RTree::new(),
            faces_tree: RTree::new(),
            edges_seq: 0,
            faces_seq: 1,
            universe,
            sink,
        }
    }

    pub fn trigger(&mut self, event: TopoEvent) {
        self.sink.on_event(event);
    }

    /// Captures the arena and both R-trees so a failed mutation can be
    /// rolled back. Cheap relative to the cost of leaving the structure
    /// corrupted, not relative to a no-op -- this crate favors recoverable
    /// failure over throughput here.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            faces: self.faces.clone(),
            edges_tree: self.edges_tree.clone(),
            faces_tree: self.faces_tree.clone(),
            edges_seq: self.edges_seq,
            faces_seq: self.faces_seq,
        }
    }

    /// Restores a previously taken [`Snapshot`], discarding every
    /// mutation made since. Does not roll back events already dispatched
    /// to the sink -- handlers observe the attempted mutation's events and
    /// must tolerate a subsequent rollback, since events are only
    /// guaranteed to correspond to a single successful mutation.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.faces = snapshot.faces;
        self.edges_tree = snapshot.edges_tree;
        self.faces_tree = snapshot.faces_tree;
        self.edges_seq = snapshot.edges_seq;
        self.faces_seq = snapshot.faces_seq;
    }

    // --- nodes ---

    pub fn insert_node(&mut self, coord: Coord, face: Option<FaceId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u64 + 1);
        self.nodes.push(Node { id, coord, face });
        self.trigger(TopoEvent::AddNode(id));
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize - 1]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize - 1]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    // --- edges ---

    /// Reserves the id the next edge will be inserted under, so callers
    /// can look up node coordinates (an immutable borrow) before
    /// constructing the `Edge` they then hand to [`Self::insert_edge`].
    pub fn alloc_edge_id(&mut self) -> EdgeId {
        self.edges_seq += 1;
        EdgeId(self.edges_seq)
    }

    pub fn insert_edge(&mut self, edge: Edge) -> EdgeId {
        let id = edge.id;
        let bounds = edge.bounds;
        self.edges.insert(id, edge);
        self.edges_tree.insert(EdgeEnvelope { id, bounds });
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.edges.get(&id).expect("edge id must be live")
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        self.edges.get_mut(&id).expect("edge id must be live")
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edges_touching_node(&self, node: NodeId) -> Vec<EdgeId> {
        self.edges
            .values()
            .filter(|e| e.start == node || e.end == node)
            .map(|e| e.id)
            .collect()
    }

    /// Re-homes `id`'s entry in the edges R-tree after its bounds change.
    pub fn reindex_edge(&mut self, id: EdgeId, new_bounds: Bounds) {
        let old_bounds = self.edges.get(&id).expect("edge id must be live").bounds;
        self.edges_tree.remove(&EdgeEnvelope { id, bounds: old_bounds });
        self.edges.get_mut(&id).unwrap().bounds = new_bounds;
        self.edges_tree.insert(EdgeEnvelope { id, bounds: new_bounds });
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Edge {
        let edge = self.edges.remove(&id).expect("edge id must be live");
        self.edges_tree.remove(&EdgeEnvelope { id, bounds: edge.bounds });
        edge
    }

    pub fn edges_query(&self, bounds: Bounds) -> Vec<EdgeId> {
        self.edges_tree
            .locate_in_envelope_intersecting(&AABB::from_corners(
                [bounds.min_x, bounds.min_y],
                [bounds.max_x, bounds.max_y],
            ))
            .map(|e| e.id)
            .collect()
    }

    // --- faces ---

    pub fn insert_face(&mut self, bounds: Option<Bounds>) -> FaceId {
        self.faces_seq += 1;
        let id = FaceId(self.faces_seq);
        self.faces.insert(id, Face { id, bounds });
        if let Some(bounds) = bounds {
            self.faces_tree.insert(FaceEnvelope { id, bounds });
        }
        id
    }

    pub fn face(&self, id: FaceId) -> &Face {
        self.faces.get(&id).expect("face id must be live")
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.values()
    }

    pub fn update_face_tree(&mut self, id: FaceId, bounds: Bounds) {
        if let Some(old) = self.faces.get(&id).and_then(|f| f.bounds) {
            self.faces_tree.remove(&FaceEnvelope { id, bounds: old });
        }
        self.faces.get_mut(&id).unwrap().bounds = Some(bounds);
        self.faces_tree.insert(FaceEnvelope { id, bounds });
    }

    pub fn delete_face(&mut self, id: FaceId) -> Face {
        debug_assert!(id != self.universe, "the universe face is never deleted");
        let face = self.faces.remove(&id).expect("face id must be live");
        if let Some(bounds) = face.bounds {
            self.faces_tree.remove(&FaceEnvelope { id, bounds });
        }
        face
    }
}
