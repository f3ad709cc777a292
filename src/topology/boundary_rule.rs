use std::fmt::Debug;

use super::location::Location;

/// Decides whether a point covered by `count` component boundaries (line
/// endpoints or coincident boundary edges) lies in the boundary of the
/// geometry.
pub trait BoundaryNodeRule: Debug {
    /// Returns `true` if a point with the given boundary count is in the boundary.
    fn is_in_boundary(&self, count: usize) -> bool;
}

/// The OGC "mod-2" rule: a point is in the boundary if it is covered an
/// odd number of times.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod2Rule;

impl BoundaryNodeRule for Mod2Rule {
    fn is_in_boundary(&self, count: usize) -> bool {
        count % 2 == 1
    }
}

/// Every endpoint is in the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndPointRule;

impl BoundaryNodeRule for EndPointRule {
    fn is_in_boundary(&self, count: usize) -> bool {
        count > 0
    }
}

/// Only endpoints shared by more than one component are in the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiValentEndPointRule;

impl BoundaryNodeRule for MultiValentEndPointRule {
    fn is_in_boundary(&self, count: usize) -> bool {
        count > 1
    }
}

/// Only endpoints of exactly one component are in the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoValentEndPointRule;

impl BoundaryNodeRule for MonoValentEndPointRule {
    fn is_in_boundary(&self, count: usize) -> bool {
        count == 1
    }
}

/// Maps a boundary count to a location under `rule`.
#[must_use]
pub fn determine_boundary(rule: &dyn BoundaryNodeRule, count: usize) -> Location {
    if rule.is_in_boundary(count) {
        Location::Boundary
    } else {
        Location::Interior
    }
}
