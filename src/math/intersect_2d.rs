use super::orientation::{orientation_index, Orientation};
use super::{coords_equal, Point2};

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point. `proper` is `true` when the
    /// point lies strictly inside both segments.
    Point { point: Point2, proper: bool },
    /// The segments overlap collinearly between two points.
    Collinear { start: Point2, end: Point2 },
}

/// Computes the intersection of two segments and remembers the inputs so
/// that along-segment distances can be derived afterwards.
#[derive(Debug, Clone)]
pub struct LineIntersector {
    input: [[Point2; 2]; 2],
    result: SegmentIntersection,
}

impl LineIntersector {
    /// Intersects segment `p1 -> p2` with segment `q1 -> q2`.
    #[must_use]
    pub fn compute(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> Self {
        let result = segment_intersection(&p1, &p2, &q1, &q2);
        Self {
            input: [[p1, p2], [q1, q2]],
            result,
        }
    }

    /// Returns the classified result.
    #[must_use]
    pub fn result(&self) -> SegmentIntersection {
        self.result
    }

    /// Returns `true` if the segments meet at all.
    #[must_use]
    pub fn has_intersection(&self) -> bool {
        !matches!(self.result, SegmentIntersection::None)
    }

    /// Returns `true` if the single intersection point is interior to both segments.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        matches!(self.result, SegmentIntersection::Point { proper: true, .. })
    }

    /// Returns the intersection points (zero, one or two).
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        match self.result {
            SegmentIntersection::None => Vec::new(),
            SegmentIntersection::Point { point, .. } => vec![point],
            SegmentIntersection::Collinear { start, end } => vec![start, end],
        }
    }

    /// Returns `true` if `p` is one of the intersection points.
    #[must_use]
    pub fn is_intersection(&self, p: &Point2) -> bool {
        self.points().iter().any(|q| coords_equal(p, q))
    }

    /// Distance of `point` along input segment `segment` (0 or 1).
    #[must_use]
    pub fn edge_distance(&self, segment: usize, point: &Point2) -> f64 {
        let [p0, p1] = &self.input[segment];
        edge_distance(point, p0, p1)
    }
}

/// A robust, monotone distance of `p` along the segment `p0 -> p1`.
///
/// Not the Euclidean distance: the larger axis extent is used so that the
/// value is exact for noded points and preserves ordering along the segment.
#[must_use]
pub fn edge_distance(p: &Point2, p0: &Point2, p1: &Point2) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if coords_equal(p, p0) {
        return 0.0;
    }
    if coords_equal(p, p1) {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    if dist == 0.0 {
        pdx.max(pdy)
    } else {
        dist
    }
}

fn envelope_contains(a: &Point2, b: &Point2, q: &Point2) -> bool {
    q.x >= a.x.min(b.x) && q.x <= a.x.max(b.x) && q.y >= a.y.min(b.y) && q.y <= a.y.max(b.y)
}

fn envelopes_intersect(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    p1.x.min(p2.x) <= q1.x.max(q2.x)
        && p1.x.max(p2.x) >= q1.x.min(q2.x)
        && p1.y.min(p2.y) <= q1.y.max(q2.y)
        && p1.y.max(p2.y) >= q1.y.min(q2.y)
}

fn same_side(a: Orientation, b: Orientation) -> bool {
    a == b && a != Orientation::Collinear
}

fn segment_intersection(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> SegmentIntersection {
    if !envelopes_intersect(p1, p2, q1, q2) {
        return SegmentIntersection::None;
    }
    let pq1 = orientation_index(p1, p2, q1);
    let pq2 = orientation_index(p1, p2, q2);
    if same_side(pq1, pq2) {
        return SegmentIntersection::None;
    }
    let qp1 = orientation_index(q1, q2, p1);
    let qp2 = orientation_index(q1, q2, p2);
    if same_side(qp1, qp2) {
        return SegmentIntersection::None;
    }

    let collinear = [pq1, pq2, qp1, qp2]
        .iter()
        .all(|o| *o == Orientation::Collinear);
    if collinear {
        return collinear_intersection(p1, p2, q1, q2);
    }

    let touches = [pq1, pq2, qp1, qp2].contains(&Orientation::Collinear);
    if touches {
        // Prefer an input vertex so that the point is exact.
        let point = if coords_equal(p1, q1) || coords_equal(p1, q2) {
            *p1
        } else if coords_equal(p2, q1) || coords_equal(p2, q2) {
            *p2
        } else if pq1 == Orientation::Collinear {
            *q1
        } else if pq2 == Orientation::Collinear {
            *q2
        } else if qp1 == Orientation::Collinear {
            *p1
        } else {
            *p2
        };
        return SegmentIntersection::Point {
            point,
            proper: false,
        };
    }

    SegmentIntersection::Point {
        point: proper_point(p1, p2, q1, q2),
        proper: true,
    }
}

fn collinear_intersection(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> SegmentIntersection {
    let q1_in_p = envelope_contains(p1, p2, q1);
    let q2_in_p = envelope_contains(p1, p2, q2);
    let p1_in_q = envelope_contains(q1, q2, p1);
    let p2_in_q = envelope_contains(q1, q2, p2);

    let pair = |a: &Point2, b: &Point2, single: bool| {
        if single && coords_equal(a, b) {
            SegmentIntersection::Point {
                point: *a,
                proper: false,
            }
        } else {
            SegmentIntersection::Collinear { start: *a, end: *b }
        }
    };

    if q1_in_p && q2_in_p {
        return SegmentIntersection::Collinear { start: *q1, end: *q2 };
    }
    if p1_in_q && p2_in_q {
        return SegmentIntersection::Collinear { start: *p1, end: *p2 };
    }
    if q1_in_p && p1_in_q {
        return pair(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return pair(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return pair(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return pair(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

/// Intersection point of two properly crossing segments.
///
/// Computed relative to the midpoint of the segments' common envelope to
/// limit loss of precision, then clamped into that envelope. Falls back to
/// the midpoint when the segments are too close to parallel to solve.
fn proper_point(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> Point2 {
    let min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));
    let mid_x = (min_x + max_x) * 0.5;
    let mid_y = (min_y + max_y) * 0.5;

    let (ax, ay) = (p1.x - mid_x, p1.y - mid_y);
    let (bx, by) = (p2.x - mid_x, p2.y - mid_y);
    let (cx, cy) = (q1.x - mid_x, q1.y - mid_y);
    let (dx, dy) = (q2.x - mid_x, q2.y - mid_y);

    let da = (bx - ax, by - ay);
    let db = (dx - cx, dy - cy);
    let cross = da.0 * db.1 - da.1 * db.0;
    let t = ((cx - ax) * db.1 - (cy - ay) * db.0) / cross;
    if !t.is_finite() {
        // Nearly parallel: the crossing lies within the shared envelope.
        return Point2::new(mid_x, mid_y);
    }

    let x = (ax + da.0 * t + mid_x).clamp(min_x, max_x);
    let y = (ay + da.1 * t + mid_y).clamp(min_y, max_y);
    Point2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments_are_proper() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0));
        assert!(li.is_proper());
        let pts = li.points();
        assert_eq!(pts.len(), 1);
        assert_relative_eq!(pts[0].x, 1.0);
        assert_relative_eq!(pts[0].y, 1.0);
    }

    #[test]
    fn nearly_parallel_crossing_stays_finite() {
        // One ulp off the diagonal at each end.
        let u = f64::EPSILON / 2.0;
        let v = f64::EPSILON * 8.0;
        let li = LineIntersector::compute(p(0.0, 0.0), p(12.0, 12.0), p(0.5, 0.5 + u), p(12.0, 12.0 - v));
        assert!(li.is_proper());
        let pts = li.points();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].x.is_finite() && pts[0].y.is_finite());
        assert!((0.5..=12.0).contains(&pts[0].x));
        assert!((0.5..=12.0).contains(&pts[0].y));
    }

    #[test]
    fn disjoint_segments() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0));
        assert!(!li.has_intersection());
    }

    #[test]
    fn shared_endpoint_is_improper() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0));
        assert_eq!(
            li.result(),
            SegmentIntersection::Point {
                point: p(1.0, 0.0),
                proper: false
            }
        );
    }

    #[test]
    fn t_junction_uses_touching_vertex() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(1.0, 1.0));
        assert!(!li.is_proper());
        assert!(li.is_intersection(&p(1.0, 0.0)));
    }

    #[test]
    fn collinear_overlap_returns_both_ends() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(3.0, 0.0));
        assert_eq!(
            li.result(),
            SegmentIntersection::Collinear {
                start: p(1.0, 0.0),
                end: p(2.0, 0.0)
            }
        );
    }

    #[test]
    fn collinear_touch_is_single_point() {
        let li = LineIntersector::compute(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(2.0, 0.0));
        assert_eq!(
            li.result(),
            SegmentIntersection::Point {
                point: p(1.0, 0.0),
                proper: false
            }
        );
    }

    #[test]
    fn edge_distance_orders_points_along_segment() {
        let a = p(0.0, 0.0);
        let b = p(4.0, 1.0);
        assert_relative_eq!(edge_distance(&a, &a, &b), 0.0);
        assert_relative_eq!(edge_distance(&p(2.0, 0.5), &a, &b), 2.0);
        assert_relative_eq!(edge_distance(&b, &a, &b), 4.0);
    }
}
