use std::cmp::Ordering;
use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::error::TopologyError;
use crate::math::Point2;

use super::label::Label;
use super::location::Location;

slotmap::new_key_type! {
    /// Unique identifier for a node in a node map.
    pub struct NodeId;
}

/// Total order on coordinates (x, then y) for use as a map key.
///
/// Negative zero is normalized so that the order agrees with `==`.
#[derive(Debug, Clone, Copy)]
pub struct CoordKey {
    x: f64,
    y: f64,
}

impl CoordKey {
    #[must_use]
    pub fn new(p: &Point2) -> Self {
        Self {
            x: p.x + 0.0,
            y: p.y + 0.0,
        }
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Common interface of graph nodes stored in a [`NodeMap`].
pub trait GraphNode {
    fn coordinate(&self) -> &Point2;
    fn label(&self) -> &Label;
}

/// Creates node values for coordinates first seen by a [`NodeMap`].
pub trait NodeFactory {
    type Node: GraphNode;

    fn create_node(&self, coord: Point2) -> Self::Node;
}

/// A vertex of a single geometry's graph, carrying the a-priori label of
/// that geometry at the coordinate.
#[derive(Debug, Clone)]
pub struct Node {
    coord: Point2,
    label: Label,
}

impl Node {
    #[must_use]
    pub fn new(coord: Point2) -> Self {
        Self {
            coord,
            label: Label::uniform_line(None),
        }
    }

    pub fn set_location(&mut self, arg_index: usize, loc: Location) {
        self.label.set_location(arg_index, Some(loc));
    }
}

impl GraphNode for Node {
    fn coordinate(&self) -> &Point2 {
        &self.coord
    }

    fn label(&self) -> &Label {
        &self.label
    }
}

/// Factory for plain [`Node`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNodeFactory;

impl NodeFactory for PlainNodeFactory {
    type Node = Node;

    fn create_node(&self, coord: Point2) -> Node {
        Node::new(coord)
    }
}

/// Coordinate-keyed collection of nodes.
///
/// Nodes live in an arena addressed by [`NodeId`]. Iteration follows the
/// coordinate order (x, then y), not insertion order, so every traversal
/// of the graph is deterministic.
#[derive(Debug)]
pub struct NodeMap<F: NodeFactory> {
    factory: F,
    nodes: SlotMap<NodeId, F::Node>,
    index: BTreeMap<CoordKey, NodeId>,
}

impl<F: NodeFactory + Default> Default for NodeMap<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: NodeFactory> NodeMap<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            nodes: SlotMap::with_key(),
            index: BTreeMap::new(),
        }
    }

    /// Returns the node at `coord`, creating it if absent.
    pub fn add_node(&mut self, coord: Point2) -> NodeId {
        let key = CoordKey::new(&coord);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.insert(self.factory.create_node(coord));
        self.index.insert(key, id);
        id
    }

    #[must_use]
    pub fn find(&self, coord: &Point2) -> Option<NodeId> {
        self.index.get(&CoordKey::new(coord)).copied()
    }

    /// Returns the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the map.
    pub fn get(&self, id: NodeId) -> Result<&F::Node, TopologyError> {
        self.nodes
            .get(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Returns the node mutably, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the map.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut F::Node, TopologyError> {
        self.nodes
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Node ids in coordinate order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &F::Node> + '_ {
        self.index.values().filter_map(|id| self.nodes.get(*id))
    }

    /// Coordinates of the nodes whose on-location for `arg_index` is Boundary.
    #[must_use]
    pub fn boundary_coordinates(&self, arg_index: usize) -> Vec<Point2> {
        self.iter()
            .filter(|n| n.label().location(arg_index) == Some(Location::Boundary))
            .map(|n| *n.coordinate())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
