use std::borrow::Cow;

use crate::geometry::{Envelope, Geometry, LineString, Polygon};
use crate::math::polygon_2d::{is_on_line, locate_in_ring};
use crate::math::{coords_equal, Point2};
use crate::topology::{BoundaryNodeRule, Location, Mod2Rule};

/// Locates points relative to the full point set of a geometry, including
/// its lines and points.
///
/// Line endpoints are counted across components, a closed line counting
/// its endpoint twice, and the boundary rule decides whether the count puts
/// the point in the boundary.
#[derive(Debug, Clone, Copy)]
pub struct PointLocator<'r> {
    rule: &'r dyn BoundaryNodeRule,
}

impl Default for PointLocator<'static> {
    fn default() -> Self {
        Self { rule: &Mod2Rule }
    }
}

#[derive(Default)]
struct LocationTally {
    is_in: bool,
    boundary_count: usize,
}

impl LocationTally {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundary_count += 1,
            Location::Exterior => {}
        }
    }
}

impl<'r> PointLocator<'r> {
    #[must_use]
    pub fn new(rule: &'r dyn BoundaryNodeRule) -> Self {
        Self { rule }
    }

    /// Location of `p` relative to `geom`.
    #[must_use]
    pub fn locate(&self, p: &Point2, geom: &Geometry) -> Location {
        if geom.is_empty() {
            return Location::Exterior;
        }
        match geom {
            Geometry::Point(q) => locate_on_point(p, q),
            Geometry::Polygon(poly) => locate_in_polygon(p, poly),
            _ => {
                let mut tally = LocationTally::default();
                compute_location(p, geom, &mut tally);
                if self.rule.is_in_boundary(tally.boundary_count) {
                    Location::Boundary
                } else if tally.boundary_count > 0 || tally.is_in {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
        }
    }

    /// `true` unless `p` is in the exterior of `geom`.
    #[must_use]
    pub fn intersects(&self, p: &Point2, geom: &Geometry) -> bool {
        self.locate(p, geom) != Location::Exterior
    }
}

fn compute_location(p: &Point2, geom: &Geometry, tally: &mut LocationTally) {
    match geom {
        Geometry::Point(q) => tally.update(locate_on_point(p, q)),
        Geometry::LineString(line) => tally_line(p, line, tally),
        Geometry::Polygon(poly) => tally.update(locate_in_polygon(p, poly)),
        Geometry::MultiPoint(points) => {
            for q in points {
                tally.update(locate_on_point(p, q));
            }
        }
        Geometry::MultiLineString(lines) => {
            for line in lines {
                tally_line(p, line, tally);
            }
        }
        Geometry::MultiPolygon(polys) => {
            for poly in polys {
                tally.update(locate_in_polygon(p, poly));
            }
        }
        Geometry::Collection(geoms) => {
            for g in geoms {
                compute_location(p, g, tally);
            }
        }
    }
}

fn locate_on_point(p: &Point2, q: &Point2) -> Location {
    if coords_equal(p, q) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn tally_line(p: &Point2, line: &LineString, tally: &mut LocationTally) {
    let points = line.points();
    let Some(env) = Envelope::of_points(points) else {
        return;
    };
    if !env.contains_point(p) {
        return;
    }
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let ends = usize::from(coords_equal(p, first)) + usize::from(coords_equal(p, last));
        if ends > 0 {
            tally.boundary_count += ends;
            return;
        }
    }
    if is_on_line(p, points) {
        tally.is_in = true;
    }
}

fn locate_in_ring_closed(p: &Point2, ring: &LineString) -> Location {
    let points = ring.points();
    let Some(env) = Envelope::of_points(points) else {
        return Location::Exterior;
    };
    if !env.contains_point(p) {
        return Location::Exterior;
    }
    let closed: Cow<'_, [Point2]> = match (points.first(), points.last()) {
        (Some(first), Some(last)) if !coords_equal(first, last) => {
            let mut v = points.to_vec();
            v.push(*first);
            Cow::Owned(v)
        }
        _ => Cow::Borrowed(points),
    };
    locate_in_ring(p, &closed)
}

fn locate_in_polygon(p: &Point2, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring_closed(p, poly.exterior()) {
        Location::Interior => {}
        shell => return shell,
    }
    for hole in poly.interiors() {
        match locate_in_ring_closed(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

/// Locates `p` relative to the polygonal components of `geom` only.
///
/// Lines and points count as exterior. For collections the first
/// non-exterior polygon result is returned.
#[must_use]
pub fn locate_in_area(p: &Point2, geom: &Geometry) -> Location {
    match geom {
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .map(|poly| locate_in_polygon(p, poly))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::Collection(geoms) => geoms
            .iter()
            .map(|g| locate_in_area(p, g))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::Point(_)
        | Geometry::LineString(_)
        | Geometry::MultiPoint(_)
        | Geometry::MultiLineString(_) => Location::Exterior,
    }
}
