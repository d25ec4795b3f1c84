//! Domain errors raised by the edge subsystem.
//!
//! Messages are part of the external contract (tests match on them), so
//! `Display` output is exact, not just diagnostic: a plain enum with a
//! hand-written `Display`/`std::error::Error` impl rather than a derive
//! macro, so the wording stays under direct control.

use core::fmt;

use crate::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub enum TopoError {
    SameStartAndEnd { node: NodeId },
    NotIsolatedNode { node: NodeId },
    NodesInDifferentFaces,
    StartNodeMismatch,
    EndNodeMismatch,
    CurveNotSimple,
    CoincidentEdge { edge: EdgeId },
    GeometryIntersectsEdge { edge: EdgeId },
    GeometryCrossesEdge { edge: EdgeId },
    SideLocationConflict { detail: &'static str },
    Corrupted { detail: String },
    FacesMismatch { detail: &'static str },
    CouldNotDeriveFace,
    NotImplemented { operation: &'static str },
}

impl fmt::Display for TopoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopoError::SameStartAndEnd { node } => write!(
                f,
                "start and end node cannot be the same as in edge {node}"
            ),
            TopoError::NotIsolatedNode { node } => write!(f, "not isolated node {node}"),
            TopoError::NodesInDifferentFaces => write!(f, "nodes in different faces"),
            TopoError::StartNodeMismatch => write!(f, "start node not geometry start point"),
            TopoError::EndNodeMismatch => write!(f, "end node not geometry end point"),
            TopoError::CurveNotSimple => write!(f, "curve not simple"),
            TopoError::CoincidentEdge { edge } => write!(f, "coincident edge {edge}"),
            TopoError::GeometryIntersectsEdge { edge } => {
                write!(f, "geometry intersects edge {edge}")
            }
            TopoError::GeometryCrossesEdge { edge } => write!(f, "geometry crosses edge {edge}"),
            TopoError::SideLocationConflict { detail } => {
                write!(f, "Side-location conflict: {detail}")
            }
            TopoError::Corrupted { detail } => write!(f, "Corrupted topo: {detail}"),
            TopoError::FacesMismatch { detail } => write!(f, "Left/right faces mismatch: {detail}"),
            TopoError::CouldNotDeriveFace => write!(f, "Could not derive edge face"),
            TopoError::NotImplemented { operation } => {
                write!(f, "{operation} is not implemented")
            }
        }
    }
}

impl std::error::Error for TopoError {}

pub type Result<T> = std::result::Result<T, TopoError>;
