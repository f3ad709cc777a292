use tracing::trace;

use crate::error::TopologyError;
use crate::geometry::Geometry;
use crate::operations::query::{locate_in_area, PointLocator};
use crate::topology::{BoundaryNodeRule, EdgeEnd, GeometryGraph, GraphNode, Location, NodeMap};

use super::edge_end_builder::EdgeEndBuilder;
use super::relate_node::RelateNodeFactory;
use super::IntersectionMatrix;

/// The nodes of both geometries merged into one graph, each carrying the
/// bundled edge ends that leave it.
///
/// Only intersections recorded on the edges become nodes. Proper crossings
/// between the two geometries are never materialized here.
#[derive(Debug, Default)]
pub struct RelateNodeGraph {
    nodes: NodeMap<RelateNodeFactory>,
}

impl RelateNodeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeMap<RelateNodeFactory> {
        &self.nodes
    }

    /// Adds the nodes and edge ends of one geometry's graph.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if an edge cannot be split into edge ends.
    pub fn build(&mut self, graph: &GeometryGraph<'_>) -> Result<(), TopologyError> {
        let arg_index = graph.arg_index();
        self.compute_intersection_nodes(graph, arg_index)?;
        self.copy_nodes_and_labels(graph, arg_index)?;
        let ends = EdgeEndBuilder.compute_edge_ends(graph)?;
        trace!(arg_index, ends = ends.len(), "computed edge ends");
        self.insert_edge_ends(ends)?;
        Ok(())
    }

    /// Creates a node at every intersection recorded on the edges of
    /// `graph`. Nodes on a boundary edge are in the boundary; any other new
    /// node is in the interior.
    ///
    /// # Errors
    ///
    /// Returns an error if a created node cannot be found again.
    pub fn compute_intersection_nodes(
        &mut self,
        graph: &GeometryGraph<'_>,
        arg_index: usize,
    ) -> Result<(), TopologyError> {
        for (_, edge) in graph.edges() {
            let edge_loc = edge.label().location(arg_index);
            for ei in edge.intersections().iter() {
                let id = self.nodes.add_node(ei.point);
                let node = self.nodes.get_mut(id)?;
                if edge_loc == Some(Location::Boundary) {
                    node.set_label_boundary(arg_index);
                } else if node.label().is_null(arg_index) {
                    node.set_label(arg_index, Location::Interior);
                }
            }
        }
        Ok(())
    }

    /// Copies the a-priori node labels of `graph`. These override labels
    /// inferred from the intersections.
    ///
    /// # Errors
    ///
    /// Returns an error if a created node cannot be found again.
    pub fn copy_nodes_and_labels(
        &mut self,
        graph: &GeometryGraph<'_>,
        arg_index: usize,
    ) -> Result<(), TopologyError> {
        for graph_node in graph.nodes().iter() {
            let id = self.nodes.add_node(*graph_node.coordinate());
            if let Some(loc) = graph_node.label().location(arg_index) {
                self.nodes.get_mut(id)?.set_label(arg_index, loc);
            }
        }
        Ok(())
    }

    /// Inserts edge ends into the star of the node at their origin.
    ///
    /// # Errors
    ///
    /// Returns an error if a created node cannot be found again.
    pub fn insert_edge_ends(&mut self, ends: Vec<EdgeEnd>) -> Result<(), TopologyError> {
        for e in ends {
            let id = self.nodes.add_node(*e.coordinate());
            self.nodes.get_mut(id)?.star_mut().insert(e);
        }
        Ok(())
    }

    /// Locates every node known to only one geometry in the other one.
    ///
    /// # Errors
    ///
    /// Returns an error if a node id is stale.
    pub fn label_isolated_nodes(
        &mut self,
        locator: &PointLocator<'_>,
        geometries: [&Geometry; 2],
    ) -> Result<(), TopologyError> {
        let ids: Vec<_> = self.nodes.ids().collect();
        for id in ids {
            let node = self.nodes.get_mut(id)?;
            if !node.is_isolated() {
                continue;
            }
            let target = usize::from(!node.label().is_null(0));
            let loc = locator.locate(node.coordinate(), geometries[target]);
            trace!(x = node.coordinate().x, y = node.coordinate().y, target, %loc, "isolated node");
            node.set_all_locations(target, loc);
        }
        Ok(())
    }

    /// Computes the labels of all bundles at all nodes.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if side locations at a node conflict.
    pub fn label_node_edges(
        &mut self,
        rule: &dyn BoundaryNodeRule,
        geometries: [&Geometry; 2],
    ) -> Result<(), TopologyError> {
        let ids: Vec<_> = self.nodes.ids().collect();
        for id in ids {
            let node = self.nodes.get_mut(id)?;
            node.star_mut()
                .compute_labelling(rule, &mut |arg_index, p| locate_in_area(p, geometries[arg_index]))?;
        }
        Ok(())
    }

    /// Adds the contributions of every node and of the bundles around it.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::PartialLabel` if a node is unknown to one of
    /// the geometries.
    pub fn update_im(&self, im: &mut IntersectionMatrix) -> Result<(), TopologyError> {
        for node in self.nodes.iter() {
            node.update_im(im)?;
            node.update_im_from_edges(im);
        }
        Ok(())
    }
}
