use crate::error::TopologyError;
use crate::geometry::Dimension;
use crate::math::Point2;
use crate::topology::{GraphNode, Label, Location, NodeFactory};

use super::bundle::EdgeEndBundleStar;
use super::IntersectionMatrix;

/// A node of the merged graph of both geometries.
///
/// The node label records the location of the node coordinate in each
/// geometry. The bundles leaving the node are kept in the star.
#[derive(Debug, Clone)]
pub struct RelateNode {
    coord: Point2,
    label: Label,
    star: EdgeEndBundleStar,
}

impl RelateNode {
    #[must_use]
    pub fn new(coord: Point2) -> Self {
        Self {
            coord,
            label: Label::uniform_line(None),
            star: EdgeEndBundleStar::new(),
        }
    }

    #[must_use]
    pub fn star(&self) -> &EdgeEndBundleStar {
        &self.star
    }

    pub fn star_mut(&mut self) -> &mut EdgeEndBundleStar {
        &mut self.star
    }

    pub fn set_label(&mut self, arg_index: usize, loc: Location) {
        self.label.set_location(arg_index, Some(loc));
    }

    /// Puts the node in the boundary of geometry `arg_index`.
    pub fn set_label_boundary(&mut self, arg_index: usize) {
        self.label.set_location(arg_index, Some(Location::Boundary));
    }

    pub fn set_all_locations(&mut self, arg_index: usize, loc: Location) {
        self.label.set_all_locations(arg_index, Some(loc));
    }

    /// A node is isolated when only one geometry knows about it.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    /// Raises the cell of the node's two locations to point dimension.
    pub fn compute_im(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(self.label.location(0), self.label.location(1), Dimension::Point);
    }

    /// Adds the node's contribution after checking it is labelled for
    /// both geometries.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::PartialLabel` for a node that is unknown to
    /// one of the geometries.
    pub fn update_im(&self, im: &mut IntersectionMatrix) -> Result<(), TopologyError> {
        if self.label.geometry_count() < 2 {
            return Err(TopologyError::PartialLabel {
                x: self.coord.x,
                y: self.coord.y,
            });
        }
        self.compute_im(im);
        Ok(())
    }

    pub fn update_im_from_edges(&self, im: &mut IntersectionMatrix) {
        self.star.update_im(im);
    }
}

impl GraphNode for RelateNode {
    fn coordinate(&self) -> &Point2 {
        &self.coord
    }

    fn label(&self) -> &Label {
        &self.label
    }
}

/// Creates [`RelateNode`]s with an empty bundle star.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelateNodeFactory;

impl NodeFactory for RelateNodeFactory {
    type Node = RelateNode;

    fn create_node(&self, coord: Point2) -> RelateNode {
        RelateNode::new(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_in_both_interiors_is_point_intersection() {
        let mut node = RelateNode::new(Point2::new(1.0, 1.0));
        node.set_label(0, Location::Interior);
        assert!(node.is_isolated());
        node.set_label(1, Location::Interior);
        assert!(!node.is_isolated());

        let mut im = IntersectionMatrix::new();
        assert!(node.update_im(&mut im).is_ok());
        assert_eq!(im.get(Location::Interior, Location::Interior), Dimension::Point);
    }

    #[test]
    fn partial_label_is_an_error() {
        let mut node = RelateNode::new(Point2::new(2.0, 3.0));
        node.set_label_boundary(1);
        let mut im = IntersectionMatrix::new();
        assert!(matches!(
            node.update_im(&mut im),
            Err(TopologyError::PartialLabel { .. })
        ));
    }
}
