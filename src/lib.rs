//! An embeddable planar topology engine.
//!
//! A [`Topology`] holds nodes, edges and faces under the ISO/PostGIS "simple
//! features topology" model: every edge is a directed curve between two
//! nodes with a face on its left and its right, every node with no incident
//! edges sits inside exactly one face, and inserting or removing an edge
//! keeps that structure consistent -- splitting a face in two when a new
//! edge closes a ring, merging two faces back into one when the edge that
//! separated them is removed.
//!
//! The crate does not parse or render any particular geometry format; it
//! consumes and returns plain `Vec<`[`geom::Coord`]`>` polylines and leaves
//! parsing formats like WKT or GeoJSON to an embedding application.
//!
//! See `DESIGN.md` in the repository root for the module-by-module design
//! rationale.

mod container;
mod edge;
mod error;
mod event;
mod face;
mod geom;
mod ids;

pub use container::{Edge, Face, Node, Topology};
pub use edge::{
    add_edge_mod_face, add_edge_new_faces, add_iso_edge, get_edge_by_node, get_edge_by_point,
    get_edges_by_line, mod_edge_heal, mod_edge_split, new_edge_heal, new_edges_split,
    rem_edge_mod_face, rem_edge_new_face, validate_crossing,
};
pub use error::{Result, TopoError};
pub use event::{EventSink, LogEventSink, TopoEvent};
pub use geom::{relate::relate, Bounds, Coord, IntersectionMatrix};
pub use ids::{EdgeId, FaceId, HalfEdge, NodeId};
