use std::collections::BTreeMap;

use slotmap::SlotMap;
use tracing::trace;

use crate::error::{GeometryError, TopologyError};
use crate::geometry::{Geometry, LineString, Polygon};
use crate::math::polygon_2d::is_ccw;
use crate::math::{coords_equal, Point2};

use super::boundary_rule::{determine_boundary, BoundaryNodeRule};
use super::edge::{Edge, EdgeId};
use super::label::Label;
use super::location::Location;
use super::node::{CoordKey, GraphNode, NodeMap, PlainNodeFactory};
use super::noding::{mutual_intersections, self_intersections, IntersectionSummary, SegmentIntersector};

/// The topology graph of one input geometry.
///
/// Holds the geometry's edges (line strings and polygon rings, each with
/// its own label) and the nodes whose location is known a priori: points,
/// line endpoints and ring start points. Self-intersections and the
/// intersections with the other geometry are recorded on the edges by the
/// noding methods.
#[derive(Debug)]
pub struct GeometryGraph<'a> {
    arg_index: usize,
    geometry: &'a Geometry,
    rule: &'a dyn BoundaryNodeRule,
    edges: SlotMap<EdgeId, Edge>,
    nodes: NodeMap<PlainNodeFactory>,
    endpoint_counts: BTreeMap<CoordKey, usize>,
    use_boundary_determination_rule: bool,
}

impl<'a> GeometryGraph<'a> {
    /// Builds the graph of `geometry` as argument `arg_index` (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` for lines with fewer than two
    /// distinct points or rings with fewer than four.
    pub fn new(
        arg_index: usize,
        geometry: &'a Geometry,
        rule: &'a dyn BoundaryNodeRule,
    ) -> Result<Self, GeometryError> {
        let mut graph = Self {
            arg_index,
            geometry,
            rule,
            edges: SlotMap::with_key(),
            nodes: NodeMap::default(),
            endpoint_counts: BTreeMap::new(),
            use_boundary_determination_rule: true,
        };
        graph.add(geometry)?;
        trace!(
            arg_index,
            edges = graph.edges.len(),
            nodes = graph.nodes.len(),
            "built geometry graph"
        );
        Ok(graph)
    }

    #[must_use]
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    #[must_use]
    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    #[must_use]
    pub fn boundary_rule(&self) -> &'a dyn BoundaryNodeRule {
        self.rule
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    /// Returns the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns the edge mutably, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the graph.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeMap<PlainNodeFactory> {
        &self.nodes
    }

    /// Coordinates of the nodes in the boundary of this geometry.
    #[must_use]
    pub fn boundary_nodes(&self) -> Vec<Point2> {
        self.nodes.boundary_coordinates(self.arg_index)
    }

    fn add(&mut self, g: &Geometry) -> Result<(), GeometryError> {
        if g.is_empty() {
            return Ok(());
        }
        match g {
            Geometry::Point(p) => self.insert_point(*p, Location::Interior),
            Geometry::LineString(line) => self.add_line_string(line)?,
            Geometry::Polygon(poly) => self.add_polygon(poly)?,
            Geometry::MultiPoint(points) => {
                for p in points {
                    self.insert_point(*p, Location::Interior);
                }
            }
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.add_line_string(line)?;
                }
            }
            Geometry::MultiPolygon(polys) => {
                // Shells of valid multipolygons only touch at points, so a
                // shared ring vertex is never inside the area.
                self.use_boundary_determination_rule = false;
                for poly in polys {
                    self.add_polygon(poly)?;
                }
            }
            Geometry::Collection(geoms) => {
                for g in geoms {
                    self.add(g)?;
                }
            }
        }
        Ok(())
    }

    fn add_line_string(&mut self, line: &LineString) -> Result<(), GeometryError> {
        if line.is_empty() {
            return Ok(());
        }
        let points = remove_repeated_points(line.points());
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Ok(());
        };
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                kind: "line string",
                x: first.x,
                y: first.y,
            });
        }
        self.edges
            .insert(Edge::new(points, Label::line(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
        Ok(())
    }

    fn add_polygon(&mut self, poly: &Polygon) -> Result<(), GeometryError> {
        self.add_polygon_ring(poly.exterior(), Location::Exterior, Location::Interior)?;
        for hole in poly.interiors() {
            // Holes are oriented opposite to the shell.
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior)?;
        }
        Ok(())
    }

    /// Adds a ring whose left and right locations, for a clockwise ring,
    /// are `cw_left` and `cw_right`.
    fn add_polygon_ring(
        &mut self,
        ring: &LineString,
        cw_left: Location,
        cw_right: Location,
    ) -> Result<(), GeometryError> {
        if ring.is_empty() {
            return Ok(());
        }
        let mut points = remove_repeated_points(ring.points());
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if !coords_equal(&first, &last) {
                points.push(first);
            }
        }
        let Some(&start) = points.first() else {
            return Ok(());
        };
        if points.len() < 4 {
            return Err(GeometryError::TooFewPoints {
                kind: "polygon ring",
                x: start.x,
                y: start.y,
            });
        }
        let (left, right) = if is_ccw(&points) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        self.edges.insert(Edge::new(
            points,
            Label::area(self.arg_index, Location::Boundary, left, right),
        ));
        self.insert_point(start, Location::Boundary);
        Ok(())
    }

    fn insert_point(&mut self, coord: Point2, loc: Location) {
        let arg_index = self.arg_index;
        let id = self.nodes.add_node(coord);
        if let Ok(node) = self.nodes.get_mut(id) {
            node.set_location(arg_index, loc);
        }
    }

    /// Adds an endpoint and applies the boundary rule to the number of
    /// times the point has been an endpoint so far.
    fn insert_boundary_point(&mut self, coord: Point2) {
        let count = self.endpoint_counts.entry(CoordKey::new(&coord)).or_default();
        *count += 1;
        let loc = determine_boundary(self.rule, *count);
        self.insert_point(coord, loc);
    }

    fn is_boundary_node(&self, coord: &Point2) -> bool {
        self.nodes
            .find(coord)
            .and_then(|id| self.nodes.get(id).ok())
            .is_some_and(|n| n.label().location(self.arg_index) == Some(Location::Boundary))
    }

    /// Nodes the geometry's self-intersections.
    ///
    /// Polygonal geometries are assumed valid, so a ring is not tested
    /// against itself. Line work is tested completely.
    pub fn compute_self_nodes(&mut self) {
        let is_rings = matches!(self.geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_));
        let mut si = SegmentIntersector::new(true, false);
        self_intersections(&self.edges, &mut si, !is_rings);
        let (pending, _, _) = si.into_parts();
        for p in pending {
            if let Some(edge) = self.edges.get_mut(p.edge) {
                edge.add_intersection(p.point, p.segment_index, p.distance);
            }
        }

        let found: Vec<(Point2, Option<Location>)> = self
            .edges
            .values()
            .flat_map(|e| {
                let loc = e.label().location(self.arg_index);
                e.intersections().iter().map(move |ei| (ei.point, loc))
            })
            .collect();
        for (coord, loc) in found {
            self.add_self_intersection_node(coord, loc);
        }
    }

    fn add_self_intersection_node(&mut self, coord: Point2, loc: Option<Location>) {
        if self.is_boundary_node(&coord) {
            return;
        }
        match loc {
            Some(Location::Boundary) if self.use_boundary_determination_rule => {
                self.insert_boundary_point(coord);
            }
            Some(loc) => self.insert_point(coord, loc),
            None => {}
        }
    }

    /// Intersects this graph's edges with `other`'s.
    ///
    /// Only improper intersections (at a vertex of either edge) are recorded
    /// on the edges; proper crossings are summarized instead. Every edge
    /// meeting an edge of the other graph stops being isolated.
    pub fn compute_edge_intersections(&mut self, other: &mut GeometryGraph<'_>) -> IntersectionSummary {
        let own_boundary = self.boundary_nodes();
        let other_boundary = other.boundary_nodes();
        let mut si = SegmentIntersector::new(false, true)
            .with_boundary_nodes(&own_boundary, &other_boundary);
        mutual_intersections(&self.edges, &other.edges, &mut si);
        let (pending, touched, summary) = si.into_parts();

        for p in pending {
            let edges = if p.set == 0 {
                &mut self.edges
            } else {
                &mut other.edges
            };
            if let Some(edge) = edges.get_mut(p.edge) {
                edge.add_intersection(p.point, p.segment_index, p.distance);
            }
        }
        for (set, id) in touched {
            let edges = if set == 0 {
                &mut self.edges
            } else {
                &mut other.edges
            };
            if let Some(edge) = edges.get_mut(id) {
                edge.set_isolated(false);
            }
        }
        summary
    }
}

fn remove_repeated_points(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|last| coords_equal(last, p)) {
            continue;
        }
        out.push(*p);
    }
    out
}
