use crate::error::TopologyError;
use crate::topology::{Edge, EdgeEnd, EdgeIntersection, EdgeRef, GeometryGraph};

/// Splits noded edges into edge ends.
///
/// Every intersection of an edge, including both endpoints, gets an end
/// pointing back along the edge (with the label flipped) and one pointing
/// forward, unless the intersection is the start or end of the edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeEndBuilder;

impl EdgeEndBuilder {
    /// Edge ends of all edges of `graph`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::ZeroLengthEdgeEnd` if two consecutive
    /// intersections of an edge coincide.
    pub fn compute_edge_ends(&self, graph: &GeometryGraph<'_>) -> Result<Vec<EdgeEnd>, TopologyError> {
        let mut ends = Vec::new();
        for (id, edge) in graph.edges() {
            let edge_ref = EdgeRef {
                arg_index: graph.arg_index(),
                edge: id,
            };
            self.compute_edge_ends_for(edge_ref, edge, &mut ends)?;
        }
        Ok(ends)
    }

    fn compute_edge_ends_for(
        &self,
        edge_ref: EdgeRef,
        edge: &Edge,
        out: &mut Vec<EdgeEnd>,
    ) -> Result<(), TopologyError> {
        let mut list = edge.intersections().clone();
        list.add_endpoints(edge.points());
        let items: Vec<&EdgeIntersection> = list.iter().collect();
        for (i, curr) in items.iter().enumerate() {
            let prev = i.checked_sub(1).and_then(|j| items.get(j)).copied();
            let next = items.get(i + 1).copied();
            if let Some(e) = self.edge_end_for_prev(edge_ref, edge, curr, prev)? {
                out.push(e);
            }
            if let Some(e) = self.edge_end_for_next(edge_ref, edge, curr, next)? {
                out.push(e);
            }
        }
        Ok(())
    }

    fn edge_end_for_prev(
        &self,
        edge_ref: EdgeRef,
        edge: &Edge,
        curr: &EdgeIntersection,
        prev: Option<&EdgeIntersection>,
    ) -> Result<Option<EdgeEnd>, TopologyError> {
        let mut index = curr.segment_index;
        #[allow(clippy::float_cmp)]
        if curr.distance == 0.0 {
            // at the start of the edge there is nothing behind
            if index == 0 {
                return Ok(None);
            }
            index -= 1;
        }
        let Some(&vertex) = edge.coordinate(index) else {
            return Ok(None);
        };
        let toward = match prev {
            Some(p) if p.segment_index >= index => p.point,
            _ => vertex,
        };
        EdgeEnd::new(edge_ref, curr.point, toward, edge.label().flipped()).map(Some)
    }

    fn edge_end_for_next(
        &self,
        edge_ref: EdgeRef,
        edge: &Edge,
        curr: &EdgeIntersection,
        next: Option<&EdgeIntersection>,
    ) -> Result<Option<EdgeEnd>, TopologyError> {
        let index = curr.segment_index + 1;
        if index >= edge.num_points() && next.is_none() {
            return Ok(None);
        }
        let toward = match next {
            Some(n) if n.segment_index == curr.segment_index => n.point,
            _ => match edge.coordinate(index) {
                Some(p) => *p,
                None => return Ok(None),
            },
        };
        EdgeEnd::new(edge_ref, curr.point, toward, *edge.label()).map(Some)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, LineString};
    use crate::math::Point2;
    use crate::topology::{Location, Mod2Rule, Position};

    #[test]
    fn open_line_has_one_end_per_endpoint() {
        let g = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        let graph = GeometryGraph::new(0, &g, &Mod2Rule).unwrap();
        let ends = EdgeEndBuilder.compute_edge_ends(&graph).unwrap();
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[0].coordinate(), &Point2::new(0.0, 0.0));
        assert_eq!(ends[0].directed_coordinate(), &Point2::new(1.0, 0.0));
        assert_eq!(ends[1].coordinate(), &Point2::new(2.0, 0.0));
        assert_eq!(ends[1].directed_coordinate(), &Point2::new(1.0, 0.0));
    }

    #[test]
    fn intersection_splits_edge_both_ways() {
        let a = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0)]));
        let b = Geometry::LineString(LineString::from_xy(&[(1.0, 0.0), (1.0, 1.0)]));
        let mut ga = GeometryGraph::new(0, &a, &Mod2Rule).unwrap();
        let mut gb = GeometryGraph::new(1, &b, &Mod2Rule).unwrap();
        ga.compute_edge_intersections(&mut gb);

        let ends = EdgeEndBuilder.compute_edge_ends(&ga).unwrap();
        assert_eq!(ends.len(), 4);
        let mid: Vec<&EdgeEnd> = ends
            .iter()
            .filter(|e| e.coordinate() == &Point2::new(1.0, 0.0))
            .collect();
        assert_eq!(mid.len(), 2);
        assert_eq!(mid[0].directed_coordinate(), &Point2::new(0.0, 0.0));
        assert_eq!(mid[1].directed_coordinate(), &Point2::new(2.0, 0.0));
    }

    #[test]
    fn backward_end_of_ring_has_flipped_sides() {
        let g = Geometry::Polygon(crate::geometry::Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        ));
        let graph = GeometryGraph::new(0, &g, &Mod2Rule).unwrap();
        let ends = EdgeEndBuilder.compute_edge_ends(&graph).unwrap();
        assert_eq!(ends.len(), 2);
        let forward = &ends[0];
        let backward = &ends[1];
        assert_eq!(forward.directed_coordinate(), &Point2::new(1.0, 0.0));
        assert_eq!(backward.directed_coordinate(), &Point2::new(0.0, 1.0));
        assert_eq!(
            forward.label().location_at(0, Position::Left),
            Some(Location::Interior)
        );
        assert_eq!(
            backward.label().location_at(0, Position::Left),
            Some(Location::Exterior)
        );
    }
}
