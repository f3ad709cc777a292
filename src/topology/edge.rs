use std::cmp::Ordering;

use crate::geometry::Dimension;
use crate::math::{coords_equal, Point2};
use crate::operations::relate::IntersectionMatrix;

use super::label::Label;
use super::location::Position;

slotmap::new_key_type! {
    /// Unique identifier for an edge in a geometry graph.
    pub struct EdgeId;
}

/// A point where an edge is intersected, located by segment index and
/// distance along that segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    pub point: Point2,
    pub segment_index: usize,
    pub distance: f64,
}

impl EdgeIntersection {
    #[must_use]
    pub fn new(point: Point2, segment_index: usize, distance: f64) -> Self {
        Self {
            point,
            segment_index,
            distance,
        }
    }

    /// Orders intersections along the edge.
    #[must_use]
    pub fn compare_position(&self, segment_index: usize, distance: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then_with(|| self.distance.total_cmp(&distance))
    }
}

/// The intersections of an edge, kept sorted along the edge with no duplicates.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList {
    items: Vec<EdgeIntersection>,
}

impl EdgeIntersectionList {
    /// Adds an intersection unless one already exists at the same position.
    pub fn add(&mut self, point: Point2, segment_index: usize, distance: f64) {
        let pos = self
            .items
            .binary_search_by(|ei| ei.compare_position(segment_index, distance));
        if let Err(i) = pos {
            self.items
                .insert(i, EdgeIntersection::new(point, segment_index, distance));
        }
    }

    /// Adds the first and last vertex of the edge.
    pub fn add_endpoints(&mut self, points: &[Point2]) {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            self.add(*first, 0, 0.0);
            self.add(*last, points.len() - 1, 0.0);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A noded polyline edge belonging to one input geometry.
#[derive(Debug, Clone)]
pub struct Edge {
    points: Vec<Point2>,
    label: Label,
    intersections: EdgeIntersectionList,
    isolated: bool,
}

impl Edge {
    /// Creates an edge. Edges start isolated until an intersection with the
    /// other geometry is recorded.
    #[must_use]
    pub fn new(points: Vec<Point2>, label: Label) -> Self {
        Self {
            points,
            label,
            intersections: EdgeIntersectionList::default(),
            isolated: true,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn coordinate(&self, i: usize) -> Option<&Point2> {
        self.points.get(i)
    }

    /// A representative coordinate: the first vertex.
    #[must_use]
    pub fn first_coordinate(&self) -> Option<&Point2> {
        self.points.first()
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    #[must_use]
    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => coords_equal(first, last),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    /// Records an intersection found on segment `segment_index`.
    ///
    /// A point equal to the segment's end vertex is normalized to the start
    /// of the next segment so that each location has one representation.
    pub fn add_intersection(&mut self, point: Point2, segment_index: usize, distance: f64) {
        let next = segment_index + 1;
        if next < self.points.len() && coords_equal(&point, &self.points[next]) {
            self.intersections.add(point, next, 0.0);
        } else {
            self.intersections.add(point, segment_index, distance);
        }
    }

    /// Adds both endpoints to the intersection list.
    pub fn add_endpoint_intersections(&mut self) {
        self.intersections.add_endpoints(&self.points);
    }
}

/// Raises the matrix with the contribution of a labelled edge: the on-line
/// locations meet in one dimension, side locations in two.
pub fn update_im(label: &Label, im: &mut IntersectionMatrix) {
    im.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Curve);
    if label.is_area() {
        for pos in [Position::Left, Position::Right] {
            im.set_at_least_if_valid(
                label.location_at(0, pos),
                label.location_at(1, pos),
                Dimension::Surface,
            );
        }
    }
}
