//! Named spatial predicates evaluated through the intersection matrix.

use crate::error::Result;
use crate::geometry::Geometry;

use super::relate_op::relate;

/// Tests the intersection matrix of `a` and `b` against a DE-9IM pattern
/// such as `"T*F**F***"`.
///
/// # Errors
///
/// Returns an error if the pattern is malformed or the matrix cannot be
/// computed.
pub fn relate_pattern(a: &Geometry, b: &Geometry, pattern: &str) -> Result<bool> {
    relate(a, b)?.matches(pattern)
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_intersects())
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn disjoint(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_disjoint())
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn touches(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_touches(a.dimension(), b.dimension()))
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn crosses(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_crosses(a.dimension(), b.dimension()))
}

/// `true` if `a` lies in `b` and their interiors meet.
///
/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn within(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_within())
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn contains(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_contains())
}

/// Like [`contains`], but also holds when `b` touches only the boundary of `a`.
///
/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn covers(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_covers())
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn covered_by(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_covered_by())
}

/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn overlaps(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_overlaps(a.dimension(), b.dimension()))
}

/// Topological equality: same point set, regardless of vertices.
///
/// # Errors
///
/// Returns an error if the matrix cannot be computed.
pub fn equals_topo(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(relate(a, b)?.is_equals(a.dimension(), b.dimension()))
}
