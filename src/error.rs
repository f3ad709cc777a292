use thiserror::Error;

/// Top-level error type for the relate engine.
#[derive(Debug, Error)]
pub enum RelateError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to malformed input geometries.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{kind} has too few distinct points near ({x}, {y})")]
    TooFewPoints { kind: &'static str, x: f64, y: f64 },

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Invariant violations inside the topology graph.
///
/// These indicate input that was not properly noded or is otherwise
/// topologically inconsistent. They are never recovered from.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("side location conflict at ({x}, {y})")]
    SideLocationConflict { x: f64, y: f64 },

    #[error("found single null side at ({x}, {y})")]
    SingleNullSide { x: f64, y: f64 },

    #[error("node at ({x}, {y}) is not labelled for both geometries")]
    PartialLabel { x: f64, y: f64 },

    #[error("edge end at ({x}, {y}) has zero length")]
    ZeroLengthEdgeEnd { x: f64, y: f64 },
}

/// Errors related to operation parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid intersection matrix pattern: {0}")]
    InvalidPattern(String),

    #[error("vertex budget exceeded: {actual} vertices, limit {limit}")]
    VertexBudgetExceeded { limit: usize, actual: usize },
}

/// Convenience type alias for results using [`RelateError`].
pub type Result<T> = std::result::Result<T, RelateError>;
