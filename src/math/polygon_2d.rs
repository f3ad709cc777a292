use super::orientation::{orientation_index, Orientation};
use super::{coords_equal, Point2};
use crate::topology::Location;

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A closing
/// duplicate vertex contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring is oriented counter-clockwise.
#[must_use]
pub fn is_ccw(ring: &[Point2]) -> bool {
    signed_area_2d(ring) > 0.0
}

/// Tests whether `p` lies on the closed segment `a -> b`.
#[must_use]
pub fn is_on_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    if orientation_index(a, b, p) != Orientation::Collinear {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Tests whether `p` lies on any segment of the polyline.
#[must_use]
pub fn is_on_line(p: &Point2, points: &[Point2]) -> bool {
    match points {
        [] => false,
        [single] => coords_equal(p, single),
        _ => points.windows(2).any(|w| is_on_segment(p, &w[0], &w[1])),
    }
}

/// Locates `p` relative to a closed ring by counting crossings of a ray
/// towards positive x.
///
/// Points on a ring segment are on the boundary.
#[must_use]
pub fn locate_in_ring(p: &Point2, ring: &[Point2]) -> Location {
    let mut crossings = 0u32;
    for w in ring.windows(2) {
        let (p1, p2) = (&w[0], &w[1]);
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if coords_equal(p, p2) {
            return Location::Boundary;
        }
        #[allow(clippy::float_cmp)]
        if p1.y == p.y && p2.y == p.y {
            if p1.x.min(p2.x) <= p.x && p.x <= p1.x.max(p2.x) {
                return Location::Boundary;
            }
            continue;
        }
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == Orientation::Collinear {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                orient = match orient {
                    Orientation::Clockwise => Orientation::CounterClockwise,
                    _ => Orientation::Clockwise,
                };
            }
            if orient == Orientation::CounterClockwise {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}
