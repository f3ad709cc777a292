use std::cmp::Ordering;

use crate::error::TopologyError;
use crate::math::orientation::{orientation_index, Quadrant};
use crate::math::Point2;

use super::edge::EdgeId;
use super::label::Label;

/// Identifies an edge of one of the two input graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    pub arg_index: usize,
    pub edge: EdgeId,
}

/// A directed stub of an edge leaving a node.
///
/// The direction runs from the node (`origin`) towards the next point of
/// the edge. Edge ends around a node are ordered by the angle of this
/// direction.
#[derive(Debug, Clone)]
pub struct EdgeEnd {
    edge: EdgeRef,
    label: Label,
    origin: Point2,
    direction: Point2,
    dx: f64,
    dy: f64,
    quadrant: Quadrant,
}

impl EdgeEnd {
    /// Creates an edge end from `origin` towards `direction`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::ZeroLengthEdgeEnd` if the two points coincide.
    pub fn new(
        edge: EdgeRef,
        origin: Point2,
        direction: Point2,
        label: Label,
    ) -> Result<Self, TopologyError> {
        let dx = direction.x - origin.x;
        let dy = direction.y - origin.y;
        let quadrant = Quadrant::of(dx, dy).ok_or(TopologyError::ZeroLengthEdgeEnd {
            x: origin.x,
            y: origin.y,
        })?;
        Ok(Self {
            edge,
            label,
            origin,
            direction,
            dx,
            dy,
            quadrant,
        })
    }

    #[must_use]
    pub fn edge(&self) -> EdgeRef {
        self.edge
    }

    /// The node coordinate this end leaves from.
    #[must_use]
    pub fn coordinate(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn directed_coordinate(&self) -> &Point2 {
        &self.direction
    }

    #[must_use]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Compares directions by angle counter-clockwise from the positive
    /// x-axis. Collinear ends pointing the same way compare equal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn compare_direction(&self, other: &Self) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }
        self.quadrant.cmp(&other.quadrant).then_with(|| {
            orientation_index(&other.origin, &other.direction, &self.direction).as_ordering()
        })
    }
}

/// Shared interface of edge ends and bundles of edge ends.
pub trait DirectedEdgeEnd {
    /// The edge end giving this item its position and direction.
    fn edge_end(&self) -> &EdgeEnd;

    fn label(&self) -> &Label;

    fn label_mut(&mut self) -> &mut Label;

    fn coordinate(&self) -> &Point2 {
        self.edge_end().coordinate()
    }

    fn compare_direction(&self, other: &EdgeEnd) -> Ordering {
        self.edge_end().compare_direction(other)
    }
}

impl DirectedEdgeEnd for EdgeEnd {
    fn edge_end(&self) -> &EdgeEnd {
        self
    }

    fn label(&self) -> &Label {
        &self.label
    }

    fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::Location;

    fn end(dx: f64, dy: f64) -> EdgeEnd {
        let edge = EdgeRef {
            arg_index: 0,
            edge: EdgeId::default(),
        };
        EdgeEnd::new(
            edge,
            Point2::new(0.0, 0.0),
            Point2::new(dx, dy),
            Label::line(0, Location::Interior),
        )
        .unwrap()
    }

    #[test]
    fn zero_length_end_is_rejected() {
        let edge = EdgeRef {
            arg_index: 1,
            edge: EdgeId::default(),
        };
        let p = Point2::new(3.0, 4.0);
        let err = EdgeEnd::new(edge, p, p, Label::line(1, Location::Interior));
        assert!(matches!(err, Err(TopologyError::ZeroLengthEdgeEnd { .. })));
    }

    #[test]
    fn ends_sort_counter_clockwise() {
        let mut ends = vec![end(0.0, -1.0), end(-1.0, 0.0), end(1.0, 1.0), end(1.0, 0.0), end(0.0, 1.0)];
        ends.sort_by(EdgeEnd::compare_direction);
        let dirs: Vec<(f64, f64)> = ends
            .iter()
            .map(|e| (e.directed_coordinate().x, e.directed_coordinate().y))
            .collect();
        assert_eq!(
            dirs,
            vec![(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
        );
    }

    #[test]
    fn collinear_same_direction_is_equal() {
        assert_eq!(end(1.0, 1.0).compare_direction(&end(3.0, 3.0)), Ordering::Equal);
        assert_ne!(end(1.0, 1.0).compare_direction(&end(-1.0, -1.0)), Ordering::Equal);
    }
}
