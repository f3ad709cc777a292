use crate::error::TopologyError;
use crate::math::Point2;
use crate::topology::edge::update_im;
use crate::topology::{
    determine_boundary, BoundaryNodeRule, DirectedEdgeEnd, EdgeEnd, EdgeEndStar, Label, Location,
    Position,
};

use super::IntersectionMatrix;

/// Edge ends leaving a node in the same direction, with one combined label.
///
/// Once bundled, the constituent labels are only read. The bundle's own
/// label is what the rest of the computation sees.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle {
    first: EdgeEnd,
    rest: Vec<EdgeEnd>,
    label: Label,
}

impl EdgeEndBundle {
    #[must_use]
    pub fn new(e: EdgeEnd) -> Self {
        let label = *e.label();
        Self {
            first: e,
            rest: Vec::new(),
            label,
        }
    }

    /// Adds an edge end. The caller guarantees it has the same origin and
    /// direction as the bundle.
    pub fn insert(&mut self, e: EdgeEnd) {
        self.rest.push(e);
    }

    /// Constituent edge ends in insertion order.
    pub fn ends(&self) -> impl Iterator<Item = &EdgeEnd> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Recomputes the bundle label from the constituent labels.
    ///
    /// The label is an area label if any constituent is one. Interior
    /// dominates on the line; otherwise the number of Boundary occurrences
    /// goes through `rule`. On the sides Interior dominates Exterior, so two
    /// polygons of a collection meeting along an edge cover both sides.
    pub fn compute_label(&mut self, rule: &dyn BoundaryNodeRule) {
        let is_area = self.ends().any(|e| e.label().is_area());
        self.label = if is_area {
            Label::uniform_area(None, None, None)
        } else {
            Label::uniform_line(None)
        };
        for arg_index in 0..2 {
            self.compute_label_on(arg_index, rule);
            if is_area {
                self.compute_label_side(arg_index, Position::Left);
                self.compute_label_side(arg_index, Position::Right);
            }
        }
    }

    fn compute_label_on(&mut self, arg_index: usize, rule: &dyn BoundaryNodeRule) {
        let mut boundary_count = 0;
        let mut found_interior = false;
        for e in self.ends() {
            match e.label().location(arg_index) {
                Some(Location::Boundary) => boundary_count += 1,
                Some(Location::Interior) => found_interior = true,
                _ => {}
            }
        }
        let loc = if found_interior {
            Some(Location::Interior)
        } else if boundary_count > 0 {
            Some(determine_boundary(rule, boundary_count))
        } else {
            None
        };
        self.label.set_location(arg_index, loc);
    }

    fn compute_label_side(&mut self, arg_index: usize, side: Position) {
        let mut loc = None;
        for e in self.ends() {
            if !e.label().is_area() {
                continue;
            }
            match e.label().location_at(arg_index, side) {
                Some(Location::Interior) => {
                    loc = Some(Location::Interior);
                    break;
                }
                Some(Location::Exterior) => loc = Some(Location::Exterior),
                _ => {}
            }
        }
        self.label.set_location_at(arg_index, side, loc);
    }

    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        update_im(&self.label, im);
    }
}

impl DirectedEdgeEnd for EdgeEndBundle {
    fn edge_end(&self) -> &EdgeEnd {
        &self.first
    }

    fn label(&self) -> &Label {
        &self.label
    }

    fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }
}

/// The bundles leaving one node, in counter-clockwise order.
#[derive(Debug, Clone, Default)]
pub struct EdgeEndBundleStar {
    star: EdgeEndStar<EdgeEndBundle>,
}

impl EdgeEndBundleStar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `e` to the bundle with its direction, creating the bundle if
    /// this is the first end in that direction.
    pub fn insert(&mut self, e: EdgeEnd) {
        match self.star.position(&e) {
            Ok(i) => {
                if let Some(bundle) = self.star.get_mut(i) {
                    bundle.insert(e);
                }
            }
            Err(i) => self.star.insert_at(i, EdgeEndBundle::new(e)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeEndBundle> {
        self.star.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.star.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.star.is_empty()
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<&Point2> {
        self.star.coordinate()
    }

    /// Computes every bundle label, then completes them around the node.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if side locations around the node conflict.
    pub fn compute_labelling(
        &mut self,
        rule: &dyn BoundaryNodeRule,
        locate: &mut dyn FnMut(usize, &Point2) -> Location,
    ) -> Result<(), TopologyError> {
        for bundle in self.star.iter_mut() {
            bundle.compute_label(rule);
        }
        self.star.complete_labels(locate)
    }

    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        for bundle in self.star.iter() {
            bundle.update_im(im);
        }
    }
}
