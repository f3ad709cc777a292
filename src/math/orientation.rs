use std::cmp::Ordering;

use super::Point2;

/// Turn direction of a point relative to a directed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// Maps the orientation to an ordering: counter-clockwise is "greater".
    #[must_use]
    pub fn as_ordering(self) -> Ordering {
        match self {
            Self::Clockwise => Ordering::Less,
            Self::Collinear => Ordering::Equal,
            Self::CounterClockwise => Ordering::Greater,
        }
    }
}

/// Returns the orientation of `q` relative to the directed segment `p1 -> p2`.
///
/// Uses Shewchuk's adaptive-precision `orient2d`, so the sign is exact for
/// any finite input.
#[must_use]
pub fn orientation_index(p1: &Point2, p2: &Point2, q: &Point2) -> Orientation {
    let det = robust::orient2d(coord(p1), coord(p2), coord(q));
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

fn coord(p: &Point2) -> robust::Coord<f64> {
    robust::Coord { x: p.x, y: p.y }
}

/// Quadrant of a direction vector, numbered counter-clockwise from the
/// positive x-axis. Directions on an axis belong to the quadrant they open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Returns the quadrant of the direction `(dx, dy)`, or `None` for the
    /// zero vector.
    #[must_use]
    pub fn of(dx: f64, dy: f64) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Self::NorthEast,
            (true, false) => Self::SouthEast,
            (false, true) => Self::NorthWest,
            (false, false) => Self::SouthWest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn left_turn_is_counter_clockwise() {
        let o = orientation_index(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0));
        assert_eq!(o, Orientation::CounterClockwise);
    }

    #[test]
    fn right_turn_is_clockwise() {
        let o = orientation_index(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0));
        assert_eq!(o, Orientation::Clockwise);
    }

    #[test]
    fn collinear_beyond_segment() {
        let o = orientation_index(&p(0.0, 0.0), &p(1.0, 1.0), &p(5.0, 5.0));
        assert_eq!(o, Orientation::Collinear);
    }

    #[test]
    fn near_collinear_sign_is_exact() {
        // Offsets of a few ulps from the diagonal through (0.5, 0.5).
        let ulp = f64::EPSILON / 2.0;
        let a = p(0.5, 0.5);
        let b = p(12.0, 12.0);
        for i in 0..16_i32 {
            for j in 0..16_i32 {
                let q = p(0.5 + f64::from(i) * ulp, 0.5 + f64::from(j) * ulp);
                let expected = match j.cmp(&i) {
                    Ordering::Greater => Orientation::CounterClockwise,
                    Ordering::Less => Orientation::Clockwise,
                    Ordering::Equal => Orientation::Collinear,
                };
                assert_eq!(orientation_index(&a, &b, &q), expected, "i = {i}, j = {j}");
            }
        }
    }

    #[test]
    fn quadrants_follow_axis_convention() {
        assert_eq!(Quadrant::of(1.0, 0.0), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::of(0.0, 1.0), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::of(-1.0, 0.0), Some(Quadrant::NorthWest));
        assert_eq!(Quadrant::of(-1.0, -1.0), Some(Quadrant::SouthWest));
        assert_eq!(Quadrant::of(0.0, -1.0), Some(Quadrant::SouthEast));
        assert_eq!(Quadrant::of(0.0, 0.0), None);
    }

    #[test]
    fn quadrants_are_ordered_counter_clockwise() {
        assert!(Quadrant::NorthEast < Quadrant::NorthWest);
        assert!(Quadrant::NorthWest < Quadrant::SouthWest);
        assert!(Quadrant::SouthWest < Quadrant::SouthEast);
    }
}
