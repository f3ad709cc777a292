pub mod intersect_2d;
pub mod orientation;
pub mod polygon_2d;

/// 2D point type. Used as the coordinate of every vertex and node.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Exact 2D coordinate equality (no tolerance).
///
/// Coordinates reaching the topology graph are already noded, so equality
/// here is meaningful only when exact.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn coords_equal(a: &Point2, b: &Point2) -> bool {
    a.x == b.x && a.y == b.y
}
