pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{RelateError, Result};
pub use geometry::{Dimension, Geometry, LineString, Polygon};
pub use math::Point2;
pub use operations::relate::{relate, IntersectionMatrix, RelateOp};
pub use topology::{BoundaryNodeRule, Location, Mod2Rule};
