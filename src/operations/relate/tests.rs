#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use super::{relate, IntersectionMatrix, RelateOp};
use crate::error::{OperationError, RelateError, TopologyError};
use crate::geometry::{Geometry, LineString, Polygon};
use crate::math::Point2;
use crate::topology::{BoundaryNodeRule, EndPointRule, MonoValentEndPointRule, MultiValentEndPointRule};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
    Geometry::Polygon(Polygon::new(
        LineString::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    ))
}

fn line(coords: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(LineString::from_xy(coords))
}

fn point(x: f64, y: f64) -> Geometry {
    Geometry::Point(Point2::new(x, y))
}

fn im(a: &Geometry, b: &Geometry) -> String {
    init_tracing();
    relate(a, b).unwrap().to_string()
}

fn im_with(a: &Geometry, b: &Geometry, rule: &dyn BoundaryNodeRule) -> String {
    init_tracing();
    RelateOp::new(a, b)
        .with_boundary_rule(rule)
        .execute()
        .unwrap()
        .to_string()
}

fn multi_line(lines: &[&[(f64, f64)]]) -> Geometry {
    Geometry::MultiLineString(lines.iter().map(|coords| LineString::from_xy(coords)).collect())
}

#[test]
fn disjoint_squares() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(2.0, 2.0, 3.0, 3.0);
    assert_eq!(im(&a, &b), "FF2FF1212");
    assert!(relate(&a, &b).unwrap().is_disjoint());
}

#[test]
fn point_strictly_inside_polygon() {
    let result = relate(&point(1.0, 1.0), &rect(0.0, 0.0, 4.0, 4.0)).unwrap();
    assert_eq!(result.to_string(), "0FFFFF212");
    assert!(result.is_within());
    assert!(!result.is_disjoint());
}

#[test]
fn point_on_polygon_boundary() {
    assert_eq!(im(&point(0.0, 2.0), &rect(0.0, 0.0, 4.0, 4.0)), "F0FFFF212");
}

#[test]
fn crossing_lines() {
    let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
    let b = line(&[(0.0, 2.0), (2.0, 0.0)]);
    assert_eq!(im(&a, &b), "0F1FF0102");
}

#[test]
fn polygons_sharing_an_edge() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 0.0, 2.0, 1.0);
    let result = relate(&a, &b).unwrap();
    assert_eq!(result.to_string(), "FF2F11212");
    assert!(result.is_touches(a.dimension(), b.dimension()));
}

#[test]
fn polygons_touching_at_a_corner() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 1.0, 2.0, 2.0);
    assert_eq!(im(&a, &b), "FF2F01212");
}

#[test]
fn overlapping_polygons() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(im(&a, &b), "212101212");
}

#[test]
fn line_inside_polygon() {
    let a = line(&[(1.0, 1.0), (2.0, 2.0)]);
    let b = rect(0.0, 0.0, 4.0, 4.0);
    assert_eq!(im(&a, &b), "1FF0FF212");
}

#[test]
fn line_crossing_polygon() {
    let a = line(&[(-1.0, 1.0), (3.0, 1.0)]);
    let b = rect(0.0, 0.0, 2.0, 2.0);
    assert_eq!(im(&a, &b), "101FF0212");
}

#[test]
fn line_touching_polygon_from_outside() {
    let a = line(&[(2.0, 1.0), (3.0, 1.0)]);
    let b = rect(0.0, 0.0, 2.0, 2.0);
    assert_eq!(im(&a, &b), "FF1F00212");
}

#[test]
fn self_relate() {
    let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)]);
    assert_eq!(im(&l, &l), "1FFF0FFF2");
    let sq = rect(0.0, 0.0, 2.0, 2.0);
    assert_eq!(im(&sq, &sq), "2FFF1FFF2");
    let p = point(3.0, 4.0);
    assert_eq!(im(&p, &p), "0FFFFFFF2");
}

#[test]
fn empty_inputs() {
    let empty = Geometry::empty();
    assert_eq!(im(&empty, &empty), "FFFFFFFFF");
    assert_eq!(im(&empty, &rect(0.0, 0.0, 1.0, 1.0)), "FFFFFF212");
    assert_eq!(im(&line(&[(0.0, 0.0), (1.0, 0.0)]), &empty), "FF1FF0FF2");
}

#[test]
fn collection_containing_point() {
    let a = Geometry::Collection(vec![point(5.0, 5.0), rect(0.0, 0.0, 2.0, 2.0)]);
    let b = point(1.0, 1.0);
    let result = relate(&a, &b).unwrap();
    assert_eq!(result.to_string(), "0F2FF1FF2");
    assert!(result.is_contains());
}

#[test]
fn boundary_rule_changes_shared_endpoint() {
    let a = Geometry::MultiLineString(vec![
        LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0)]),
        LineString::from_xy(&[(1.0, 0.0), (2.0, 0.0)]),
    ]);
    let b = point(1.0, 0.0);
    assert_eq!(im(&a, &b), "0F1FF0FF2");
    let with_endpoints = RelateOp::new(&a, &b)
        .with_boundary_rule(&EndPointRule)
        .execute()
        .unwrap();
    assert_eq!(with_endpoints.to_string(), "FF10F0FF2");
}

#[test]
fn multivalent_rule_keeps_only_shared_endpoints() {
    let a = multi_line(&[&[(0.0, 0.0), (1.0, 0.0)], &[(1.0, 0.0), (2.0, 0.0)]]);
    let rule = MultiValentEndPointRule;
    assert_eq!(im_with(&a, &point(1.0, 0.0), &rule), "FF10FFFF2");
    assert_eq!(im_with(&a, &point(1.5, 0.0), &rule), "0F1FF0FF2");
    // The disjoint shortcut sees the same boundary.
    assert_eq!(im_with(&a, &point(5.0, 5.0), &rule), "FF1FF00F2");
}

#[test]
fn monovalent_rule_drops_junction_from_boundary() {
    let a = multi_line(&[
        &[(0.0, 0.0), (1.0, 0.0)],
        &[(1.0, 0.0), (2.0, 0.0)],
        &[(1.0, 0.0), (1.0, 1.0)],
    ]);
    let rule = MonoValentEndPointRule;
    assert_eq!(im_with(&a, &point(1.0, 0.0), &rule), "0F1FF0FF2");
    assert_eq!(im_with(&a, &point(0.0, 0.0), &rule), "FF10F0FF2");
    assert_eq!(im_with(&a, &point(5.0, 5.0), &rule), "FF1FF00F2");
}

#[test]
fn endpoint_rule_makes_closed_line_start_a_boundary() {
    let a = line(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)]);
    let b = point(0.0, 0.0);
    assert_eq!(im(&a, &b), "0F1FFFFF2");
    assert_eq!(im_with(&a, &b, &EndPointRule), "FF10FFFF2");
}

#[test]
fn vertex_limit_is_enforced() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(0.5, 0.5, 2.0, 2.0);
    let err = RelateOp::new(&a, &b).with_vertex_limit(8).execute().unwrap_err();
    assert!(matches!(
        err,
        RelateError::Operation(OperationError::VertexBudgetExceeded { limit: 8, actual: 10 })
    ));
    assert!(RelateOp::new(&a, &b).with_vertex_limit(10).execute().is_ok());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let a = point(f64::NAN, 0.0);
    let b = point(0.0, 0.0);
    assert!(matches!(relate(&a, &b), Err(RelateError::Geometry(_))));
}

#[test]
fn hole_crossing_its_shell_is_a_topology_error() {
    let shell = LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
    let hole = LineString::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]);
    let a = Geometry::Polygon(Polygon::new(shell, vec![hole]));
    let err = relate(&a, &point(0.5, 0.5)).unwrap_err();
    assert!(matches!(
        err,
        RelateError::Topology(TopologyError::SideLocationConflict { .. })
    ));
}

#[test]
fn degenerate_line_is_rejected() {
    let a = line(&[(1.0, 1.0), (1.0, 1.0)]);
    let b = rect(0.0, 0.0, 2.0, 2.0);
    assert!(matches!(relate(&a, &b), Err(RelateError::Geometry(_))));
}

fn rect_strategy() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (0..6i32, 0..6i32, 1..4i32, 1..4i32)
}

fn rect_from((x, y, w, h): (i32, i32, i32, i32)) -> Geometry {
    rect(f64::from(x), f64::from(y), f64::from(x + w), f64::from(y + h))
}

/// The same rectangle with its ring starting at corner `start`, optionally
/// traversed clockwise.
fn rotated_rect_from((x, y, w, h): (i32, i32, i32, i32), start: usize, clockwise: bool) -> Geometry {
    let (x0, y0, x1, y1) = (f64::from(x), f64::from(y), f64::from(x + w), f64::from(y + h));
    let mut corners = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
    if clockwise {
        corners.reverse();
    }
    corners.rotate_left(start);
    corners.push(corners[0]);
    Geometry::Polygon(Polygon::new(LineString::from_xy(&corners), vec![]))
}

/// A rectangle with a hole inset by one unit on every side.
fn holed_rect_strategy() -> impl Strategy<Value = Geometry> {
    (0..5i32, 0..5i32, 3..5i32, 3..5i32).prop_map(|(x, y, w, h)| {
        let (x0, y0, x1, y1) = (f64::from(x), f64::from(y), f64::from(x + w), f64::from(y + h));
        let hole = LineString::from_xy(&[
            (x0 + 1.0, y0 + 1.0),
            (x1 - 1.0, y0 + 1.0),
            (x1 - 1.0, y1 - 1.0),
            (x0 + 1.0, y1 - 1.0),
            (x0 + 1.0, y0 + 1.0),
        ]);
        let shell = LineString::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]);
        Geometry::Polygon(Polygon::new(shell, vec![hole]))
    })
}

/// Vertices of a line whose x coordinate strictly increases, so it never
/// touches itself.
fn monotone_coords_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    (0..4i32, 0..6i32, prop::collection::vec((1..3i32, 0..6i32), 1..4)).prop_map(|(x0, y0, steps)| {
        let mut x = x0;
        let mut coords = vec![(f64::from(x0), f64::from(y0))];
        for (dx, y) in steps {
            x += dx;
            coords.push((f64::from(x), f64::from(y)));
        }
        coords
    })
}

fn monotone_line_strategy() -> impl Strategy<Value = Geometry> {
    monotone_coords_strategy().prop_map(|coords| line(&coords))
}

fn geometry_strategy() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        rect_strategy().prop_map(rect_from),
        holed_rect_strategy(),
        monotone_line_strategy(),
        (0..8i32, 0..8i32).prop_map(|(x, y)| point(f64::from(x), f64::from(y))),
        prop::collection::vec((0..8i32, 0..8i32), 1..4).prop_map(|pts| {
            Geometry::MultiPoint(pts.into_iter().map(|(x, y)| Point2::new(f64::from(x), f64::from(y))).collect())
        }),
    ]
}

fn transposed(m: &IntersectionMatrix) -> String {
    m.transpose().to_string()
}

proptest! {
    #[test]
    fn relate_is_symmetric(a in geometry_strategy(), b in geometry_strategy()) {
        let ab = relate(&a, &b).unwrap();
        let ba = relate(&b, &a).unwrap();
        prop_assert_eq!(ab.to_string(), transposed(&ba));
    }

    #[test]
    fn simple_line_relates_to_itself(l in monotone_line_strategy()) {
        let m = relate(&l, &l).unwrap();
        prop_assert_eq!(m.to_string(), "1FFF0FFF2");
    }

    #[test]
    fn result_ignores_line_direction(coords in monotone_coords_strategy(), other in geometry_strategy()) {
        let mut reversed = coords.clone();
        reversed.reverse();
        let forward = relate(&line(&coords), &other).unwrap();
        let backward = relate(&line(&reversed), &other).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn point_rect_relate_is_symmetric(r in rect_strategy(), px in 0..8i32, py in 0..8i32) {
        let r = rect_from(r);
        let p = point(f64::from(px), f64::from(py));
        let rp = relate(&r, &p).unwrap();
        let pr = relate(&p, &r).unwrap();
        prop_assert_eq!(rp.to_string(), transposed(&pr));
    }

    #[test]
    fn result_ignores_ring_start_and_orientation(
        a in rect_strategy(),
        b in rect_strategy(),
        start in 0..4usize,
        clockwise in any::<bool>(),
    ) {
        let expected = relate(&rect_from(a), &rect_from(b)).unwrap();
        let actual = relate(&rotated_rect_from(a, start, clockwise), &rect_from(b)).unwrap();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn result_ignores_point_order(r in rect_strategy(), pts in prop::collection::vec((0..8i32, 0..8i32), 1..6)) {
        let r = rect_from(r);
        let forward: Vec<Point2> = pts.iter().map(|&(x, y)| Point2::new(f64::from(x), f64::from(y))).collect();
        let mut backward = forward.clone();
        backward.reverse();
        let a = relate(&Geometry::MultiPoint(forward), &r).unwrap();
        let b = relate(&Geometry::MultiPoint(backward), &r).unwrap();
        prop_assert_eq!(a, b);
    }
}
