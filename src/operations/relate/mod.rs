mod bundle;
mod computer;
mod edge_end_builder;
mod matrix;
mod node_graph;
mod predicates;
mod relate_node;
mod relate_op;

#[cfg(test)]
mod tests;

pub use bundle::{EdgeEndBundle, EdgeEndBundleStar};
pub use computer::RelateComputer;
pub use edge_end_builder::EdgeEndBuilder;
pub use matrix::{matches_symbol, IntersectionMatrix};
pub use node_graph::RelateNodeGraph;
pub use predicates::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps,
    relate_pattern, touches, within,
};
pub use relate_node::{RelateNode, RelateNodeFactory};
pub use relate_op::{relate, RelateOp};
