pub mod dimension;
pub mod envelope;

pub use dimension::Dimension;
pub use envelope::Envelope;

use crate::error::GeometryError;
use crate::math::{coords_equal, Point2};

/// An ordered sequence of vertices forming a polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    points: Vec<Point2>,
}

impl LineString {
    /// Creates a line string from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates a line string from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` if the first and last vertex coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => coords_equal(first, last),
            _ => false,
        }
    }
}

/// A polygon: an exterior ring and zero or more holes.
///
/// Rings are closed line strings. Their orientation is not significant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    exterior: LineString,
    interiors: Vec<LineString>,
}

impl Polygon {
    /// Creates a polygon from its shell and holes.
    #[must_use]
    pub fn new(exterior: LineString, interiors: Vec<LineString>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    #[must_use]
    pub fn exterior(&self) -> &LineString {
        &self.exterior
    }

    #[must_use]
    pub fn interiors(&self) -> &[LineString] {
        &self.interiors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

/// A planar geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point2),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(Vec<Point2>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// The empty geometry.
    #[must_use]
    pub fn empty() -> Self {
        Self::Collection(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::LineString(line) => line.is_empty(),
            Self::Polygon(poly) => poly.is_empty(),
            Self::MultiPoint(points) => points.is_empty(),
            Self::MultiLineString(lines) => lines.iter().all(LineString::is_empty),
            Self::MultiPolygon(polys) => polys.iter().all(Polygon::is_empty),
            Self::Collection(geoms) => geoms.iter().all(Geometry::is_empty),
        }
    }

    /// Dimension of the point set; collections take the largest component.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Dimension::Point,
            Self::LineString(_) | Self::MultiLineString(_) => Dimension::Curve,
            Self::Polygon(_) | Self::MultiPolygon(_) => Dimension::Surface,
            Self::Collection(geoms) => geoms
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or_default(),
        }
    }

    /// Dimension of the boundary.
    ///
    /// Points have no boundary; closed lines have none either.
    #[must_use]
    pub fn boundary_dimension(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Dimension::Empty,
            Self::LineString(line) => line_boundary_dimension(line),
            Self::MultiLineString(lines) => lines
                .iter()
                .filter(|l| !l.is_empty())
                .map(line_boundary_dimension)
                .max()
                .unwrap_or_default(),
            Self::Polygon(_) | Self::MultiPolygon(_) => Dimension::Curve,
            Self::Collection(geoms) => geoms
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or_default(),
        }
    }

    /// Bounding box, or `None` for empty geometries.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        let mut points = Vec::new();
        self.for_each_point(&mut |p| points.push(*p));
        Envelope::of_points(&points)
    }

    /// Total number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        let mut count = 0;
        self.for_each_point(&mut |_| count += 1);
        count
    }

    /// Rejects NaN and infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for the first offending coordinate.
    pub fn check_finite(&self) -> Result<(), GeometryError> {
        let mut bad: Option<Point2> = None;
        self.for_each_point(&mut |p| {
            if bad.is_none() && !(p.x.is_finite() && p.y.is_finite()) {
                bad = Some(*p);
            }
        });
        match bad {
            Some(p) => Err(GeometryError::NonFinite { x: p.x, y: p.y }),
            None => Ok(()),
        }
    }

    fn for_each_point(&self, f: &mut dyn FnMut(&Point2)) {
        match self {
            Self::Point(p) => f(p),
            Self::LineString(line) => line.points().iter().for_each(f),
            Self::Polygon(poly) => polygon_points(poly, f),
            Self::MultiPoint(points) => points.iter().for_each(f),
            Self::MultiLineString(lines) => {
                for line in lines {
                    line.points().iter().for_each(&mut *f);
                }
            }
            Self::MultiPolygon(polys) => {
                for poly in polys {
                    polygon_points(poly, f);
                }
            }
            Self::Collection(geoms) => {
                for g in geoms {
                    g.for_each_point(f);
                }
            }
        }
    }
}

fn line_boundary_dimension(line: &LineString) -> Dimension {
    if line.is_closed() {
        Dimension::Empty
    } else {
        Dimension::Point
    }
}

fn polygon_points(poly: &Polygon, f: &mut dyn FnMut(&Point2)) {
    poly.exterior().points().iter().for_each(&mut *f);
    for hole in poly.interiors() {
        hole.points().iter().for_each(&mut *f);
    }
}

impl From<Point2> for Geometry {
    fn from(p: Point2) -> Self {
        Self::Point(p)
    }
}

impl From<LineString> for Geometry {
    fn from(line: LineString) -> Self {
        Self::LineString(line)
    }
}

impl From<Polygon> for Geometry {
    fn from(poly: Polygon) -> Self {
        Self::Polygon(poly)
    }
}
