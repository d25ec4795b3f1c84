//! The crossing validator: rejecting candidate geometry that would overlap
//! existing edges in a way the topology can't represent.
//!
//! Uses the same R-tree bounds narrowing as [`super::query`], followed by a
//! DE-9IM classification against each candidate via [`crate::geom::relate`].

use crate::container::Topology;
use crate::error::{Result, TopoError};
use crate::event::EventSink;
use crate::geom::{relate, Bounds, Coord};

/// Rejects `candidate` if it coincides with, properly intersects, or
/// crosses any existing edge's interior. Touching another edge only at a
/// boundary point (a shared node) is permitted.
pub fn validate_crossing<S: EventSink>(topo: &Topology<S>, candidate: &[Coord]) -> Result<()> {
    let search = Bounds::of(candidate);
    for id in topo.edges_query(search) {
        let im = relate(&topo.edge(id).coords, candidate);
        if im.matches("1FFF*FFF2") {
            return Err(TopoError::CoincidentEdge { edge: id });
        }
        if im.matches("1********") {
            return Err(TopoError::GeometryIntersectsEdge { edge: id });
        }
        if im.matches("T********") {
            return Err(TopoError::GeometryCrossesEdge { edge: id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::LogEventSink;
    use crate::ids::HalfEdge;

    fn topo_with_edge() -> Topology<LogEventSink> {
        let mut topo: Topology<LogEventSink> = Topology::new();
        let n1 = topo.insert_node(Coord::new(0.0, 0.0), Some(topo.universe));
        let n2 = topo.insert_node(Coord::new(10.0, 0.0), Some(topo.universe));
        let coords = vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)];
        let id = topo.alloc_edge_id();
        let bounds = Bounds::of(&coords);
        topo.insert_edge(crate::container::Edge {
            id,
            coords,
            start: n1,
            end: n2,
            left_face: Some(topo.universe),
            right_face: Some(topo.universe),
            bounds,
            next_left: HalfEdge::none(),
            next_left_dir: false,
            next_right: HalfEdge::none(),
            next_right_dir: true,
        });
        topo
    }

    #[test]
    fn disjoint_candidate_passes() {
        let topo = topo_with_edge();
        assert!(validate_crossing(&topo, &[Coord::new(0.0, 5.0), Coord::new(10.0, 5.0)]).is_ok());
    }

    #[test]
    fn crossing_candidate_rejected() {
        let topo = topo_with_edge();
        let err = validate_crossing(&topo, &[Coord::new(5.0, -5.0), Coord::new(5.0, 5.0)])
            .expect_err("must cross");
        assert!(matches!(err, TopoError::GeometryCrossesEdge { .. }));
    }

    #[test]
    fn coincident_candidate_rejected() {
        let topo = topo_with_edge();
        let err = validate_crossing(&topo, &[Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)])
            .expect_err("must coincide");
        assert!(matches!(err, TopoError::CoincidentEdge { .. }));
    }

    #[test]
    fn touching_at_shared_endpoint_passes() {
        let topo = topo_with_edge();
        assert!(
            validate_crossing(&topo, &[Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)]).is_ok()
        );
    }
}
