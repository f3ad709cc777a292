pub mod boundary_rule;
pub mod edge;
pub mod edge_end;
pub mod edge_end_star;
pub mod geometry_graph;
pub mod label;
pub mod location;
pub mod node;
pub mod noding;

pub use boundary_rule::{
    determine_boundary, BoundaryNodeRule, EndPointRule, Mod2Rule, MonoValentEndPointRule,
    MultiValentEndPointRule,
};
pub use edge::{Edge, EdgeId, EdgeIntersection, EdgeIntersectionList};
pub use edge_end::{DirectedEdgeEnd, EdgeEnd, EdgeRef};
pub use edge_end_star::EdgeEndStar;
pub use geometry_graph::GeometryGraph;
pub use label::{merge_label, Label, TopologyLocation};
pub use location::{Location, Position};
pub use node::{CoordKey, GraphNode, Node, NodeFactory, NodeId, NodeMap, PlainNodeFactory};
pub use noding::{IntersectionSummary, SegmentIntersector};
