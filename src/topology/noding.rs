use std::collections::BTreeSet;

use slotmap::SlotMap;

use crate::math::intersect_2d::LineIntersector;
use crate::math::Point2;

use super::edge::{Edge, EdgeId};

/// Aggregate facts about the intersections found by a [`SegmentIntersector`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntersectionSummary {
    /// Any non-trivial intersection was found.
    pub has_intersection: bool,
    /// Some segments cross at a point interior to both.
    pub has_proper: bool,
    /// Some proper crossing is not at a boundary node of either geometry.
    pub has_proper_interior: bool,
    /// One of the proper crossing points, if any.
    pub proper_point: Option<Point2>,
}

/// An intersection to be recorded on edge `edge` of edge set `set`.
#[derive(Debug, Clone, Copy)]
pub struct PendingIntersection {
    pub set: usize,
    pub edge: EdgeId,
    pub point: Point2,
    pub segment_index: usize,
    pub distance: f64,
}

/// One segment of an edge in one of two edge sets.
#[derive(Debug, Clone, Copy)]
pub struct SegmentRef<'e> {
    pub set: usize,
    pub id: EdgeId,
    pub edge: &'e Edge,
    pub index: usize,
}

impl SegmentRef<'_> {
    fn endpoints(&self) -> Option<(Point2, Point2)> {
        let p0 = self.edge.coordinate(self.index)?;
        let p1 = self.edge.coordinate(self.index + 1)?;
        Some((*p0, *p1))
    }
}

/// Tests pairs of segments for intersection and collects the points to be
/// recorded on the edges.
///
/// Intersections are buffered rather than written straight into the edges,
/// so both edge sets can be scanned through shared references.
#[derive(Debug)]
pub struct SegmentIntersector<'a> {
    include_proper: bool,
    record_isolated: bool,
    boundary_nodes: [&'a [Point2]; 2],
    summary: IntersectionSummary,
    pending: Vec<PendingIntersection>,
    touched: BTreeSet<(usize, EdgeId)>,
}

impl<'a> SegmentIntersector<'a> {
    /// `include_proper` records proper crossings on the edges as well;
    /// `record_isolated` marks every edge that meets another as non-isolated.
    #[must_use]
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        Self {
            include_proper,
            record_isolated,
            boundary_nodes: [&[], &[]],
            summary: IntersectionSummary::default(),
            pending: Vec::new(),
            touched: BTreeSet::new(),
        }
    }

    /// Boundary nodes of the two geometries, used to tell proper interior
    /// crossings from crossings at a boundary point.
    #[must_use]
    pub fn with_boundary_nodes(mut self, a: &'a [Point2], b: &'a [Point2]) -> Self {
        self.boundary_nodes = [a, b];
        self
    }

    /// Intersects segment `a` with segment `b`.
    pub fn add_intersections(&mut self, a: SegmentRef<'_>, b: SegmentRef<'_>) {
        let same_edge = a.set == b.set && a.id == b.id;
        if same_edge && a.index == b.index {
            return;
        }
        let (Some((a0, a1)), Some((b0, b1))) = (a.endpoints(), b.endpoints()) else {
            return;
        };
        let li = LineIntersector::compute(a0, a1, b0, b1);
        if !li.has_intersection() {
            return;
        }
        if self.record_isolated {
            self.touched.insert((a.set, a.id));
            self.touched.insert((b.set, b.id));
        }
        if same_edge && is_trivial(&a, &b, &li) {
            return;
        }
        self.summary.has_intersection = true;

        let points = li.points();
        if self.include_proper || !li.is_proper() {
            for point in &points {
                for (input, seg) in [(0, &a), (1, &b)] {
                    self.pending.push(PendingIntersection {
                        set: seg.set,
                        edge: seg.id,
                        point: *point,
                        segment_index: seg.index,
                        distance: li.edge_distance(input, point),
                    });
                }
            }
        }
        if li.is_proper() {
            self.summary.has_proper = true;
            self.summary.proper_point = points.first().copied();
            if !self.is_boundary_point(&li) {
                self.summary.has_proper_interior = true;
            }
        }
    }

    fn is_boundary_point(&self, li: &LineIntersector) -> bool {
        self.boundary_nodes
            .iter()
            .any(|nodes| nodes.iter().any(|p| li.is_intersection(p)))
    }

    #[must_use]
    pub fn summary(&self) -> IntersectionSummary {
        self.summary
    }

    /// Consumes the intersector, returning the buffered intersections, the
    /// edges found to touch another edge, and the summary.
    #[must_use]
    pub fn into_parts(self) -> (Vec<PendingIntersection>, BTreeSet<(usize, EdgeId)>, IntersectionSummary) {
        (self.pending, self.touched, self.summary)
    }
}

/// An intersection between two segments of one edge is trivial when the
/// segments are adjacent, or are the first and last segment of a closed edge.
fn is_trivial(a: &SegmentRef<'_>, b: &SegmentRef<'_>, li: &LineIntersector) -> bool {
    if li.points().len() != 1 {
        return false;
    }
    if a.index.abs_diff(b.index) == 1 {
        return true;
    }
    if a.edge.is_closed() {
        let last = a.edge.num_points().saturating_sub(2);
        if (a.index == 0 && b.index == last) || (b.index == 0 && a.index == last) {
            return true;
        }
    }
    false
}

fn intersect_edges(
    si: &mut SegmentIntersector<'_>,
    (set0, id0, e0): (usize, EdgeId, &Edge),
    (set1, id1, e1): (usize, EdgeId, &Edge),
) {
    for i0 in 0..e0.num_points().saturating_sub(1) {
        for i1 in 0..e1.num_points().saturating_sub(1) {
            si.add_intersections(
                SegmentRef {
                    set: set0,
                    id: id0,
                    edge: e0,
                    index: i0,
                },
                SegmentRef {
                    set: set1,
                    id: id1,
                    edge: e1,
                    index: i1,
                },
            );
        }
    }
}

/// Intersects every edge of a set with every other edge of the same set,
/// and with itself when `test_self` is set. All edges belong to set 0.
pub fn self_intersections(
    edges: &SlotMap<EdgeId, Edge>,
    si: &mut SegmentIntersector<'_>,
    test_self: bool,
) {
    let all: Vec<(EdgeId, &Edge)> = edges.iter().collect();
    for (i, &(id0, e0)) in all.iter().enumerate() {
        for &(id1, e1) in &all[i..] {
            if id0 == id1 && !test_self {
                continue;
            }
            intersect_edges(si, (0, id0, e0), (0, id1, e1));
        }
    }
}

/// Intersects every edge of set 0 with every edge of set 1.
pub fn mutual_intersections(
    edges0: &SlotMap<EdgeId, Edge>,
    edges1: &SlotMap<EdgeId, Edge>,
    si: &mut SegmentIntersector<'_>,
) {
    for (id0, e0) in edges0 {
        for (id1, e1) in edges1 {
            intersect_edges(si, (0, id0, e0), (1, id1, e1));
        }
    }
}
