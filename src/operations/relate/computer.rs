use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use crate::error::Result;
use crate::geometry::{Dimension, Geometry, LineString};
use crate::operations::query::PointLocator;
use crate::topology::{
    edge, BoundaryNodeRule, CoordKey, Edge, GeometryGraph, IntersectionSummary, Location,
};

use super::node_graph::RelateNodeGraph;
use super::IntersectionMatrix;

/// Computes the intersection matrix of two geometries.
///
/// The computation runs once: build the graphs, node them against each
/// other, merge them into a [`RelateNodeGraph`], label nodes and edge
/// ends, and accumulate the matrix.
#[derive(Debug)]
pub struct RelateComputer<'a> {
    geometries: [&'a Geometry; 2],
    rule: &'a dyn BoundaryNodeRule,
}

impl<'a> RelateComputer<'a> {
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry, rule: &'a dyn BoundaryNodeRule) -> Self {
        Self {
            geometries: [a, b],
            rule,
        }
    }

    /// Runs the computation.
    ///
    /// # Errors
    ///
    /// Returns a `GeometryError` for malformed input and a `TopologyError`
    /// if the noded graph is inconsistent.
    pub fn compute_im(&self) -> Result<IntersectionMatrix> {
        let span = debug_span!("relate");
        let _enter = span.enter();

        let [a, b] = self.geometries;
        let mut im = IntersectionMatrix::new();
        if !(a.is_empty() && b.is_empty()) {
            im.set(Location::Exterior, Location::Exterior, Dimension::Surface);
        }

        let envelopes_meet = match (a.envelope(), b.envelope()) {
            (Some(ea), Some(eb)) => ea.intersects(&eb),
            _ => false,
        };
        if !envelopes_meet {
            self.compute_disjoint_im(&mut im);
            debug!(%im, "envelopes disjoint");
            return Ok(im);
        }

        let mut graph_a = GeometryGraph::new(0, a, self.rule)?;
        let mut graph_b = GeometryGraph::new(1, b, self.rule)?;
        graph_a.compute_self_nodes();
        graph_b.compute_self_nodes();
        let summary = graph_a.compute_edge_intersections(&mut graph_b);
        debug!(
            has_intersection = summary.has_intersection,
            has_proper = summary.has_proper,
            has_proper_interior = summary.has_proper_interior,
            "noded graphs"
        );

        let mut nodes = RelateNodeGraph::new();
        nodes.build(&graph_a)?;
        nodes.build(&graph_b)?;
        debug!(nodes = nodes.nodes().len(), "merged node graph");

        let locator = PointLocator::new(self.rule);
        nodes.label_isolated_nodes(&locator, self.geometries)?;
        self.compute_proper_intersection_im(&summary, &mut im)?;
        nodes.label_node_edges(self.rule, self.geometries)?;

        let mut isolated = self.label_isolated_edges(&graph_a, b, 1, &locator);
        isolated.extend(self.label_isolated_edges(&graph_b, a, 0, &locator));
        debug!(isolated_edges = isolated.len(), "labelled isolated edges");

        for e in &isolated {
            edge::update_im(e.label(), &mut im);
        }
        nodes.update_im(&mut im)?;
        debug!(%im, "computed intersection matrix");
        Ok(im)
    }

    /// Matrix of two geometries whose envelopes do not meet: each non-empty
    /// geometry lies in the exterior of the other.
    fn compute_disjoint_im(&self, im: &mut IntersectionMatrix) {
        let [a, b] = self.geometries;
        if !a.is_empty() {
            im.set(Location::Interior, Location::Exterior, a.dimension());
            im.set(Location::Boundary, Location::Exterior, boundary_dimension(a, self.rule));
        }
        if !b.is_empty() {
            im.set(Location::Exterior, Location::Interior, b.dimension());
            im.set(Location::Exterior, Location::Boundary, boundary_dimension(b, self.rule));
        }
    }

    /// Proper crossings are not nodes, so their effect is added directly
    /// from the dimensions of the two geometries.
    fn compute_proper_intersection_im(
        &self,
        summary: &IntersectionSummary,
        im: &mut IntersectionMatrix,
    ) -> Result<()> {
        let dim_a = self.geometries[0].dimension();
        let dim_b = self.geometries[1].dimension();
        match (dim_a, dim_b) {
            (Dimension::Surface, Dimension::Surface) => {
                if summary.has_proper {
                    im.set_at_least_pattern("212101212")?;
                }
            }
            (Dimension::Surface, Dimension::Curve) => {
                if summary.has_proper {
                    im.set_at_least_pattern("FFF0FFFF2")?;
                }
                if summary.has_proper_interior {
                    im.set_at_least_pattern("1FFFFF1FF")?;
                }
            }
            (Dimension::Curve, Dimension::Surface) => {
                if summary.has_proper {
                    im.set_at_least_pattern("F0FFFFFF2")?;
                }
                if summary.has_proper_interior {
                    im.set_at_least_pattern("1F1FFFFFF")?;
                }
            }
            (Dimension::Curve, Dimension::Curve) => {
                if summary.has_proper_interior {
                    im.set_at_least_pattern("0FFFFFFFF")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Labels the edges of `graph` that meet no edge of the other geometry
    /// by locating their first point in `target`.
    fn label_isolated_edges(
        &self,
        graph: &GeometryGraph<'_>,
        target: &Geometry,
        target_index: usize,
        locator: &PointLocator<'_>,
    ) -> Vec<Edge> {
        graph
            .edges()
            .filter(|(_, e)| e.is_isolated())
            .map(|(_, e)| {
                let mut e = e.clone();
                let loc = match (target.dimension(), e.first_coordinate()) {
                    (Dimension::Curve | Dimension::Surface, Some(p)) => locator.locate(p, target),
                    _ => Location::Exterior,
                };
                e.label_mut().set_all_locations(target_index, Some(loc));
                e
            })
            .collect()
    }
}

/// Boundary dimension of `geom` under `rule`.
///
/// Line work has a point boundary only if some endpoint is in the
/// boundary by the rule; other geometries use their intrinsic boundary.
fn boundary_dimension(geom: &Geometry, rule: &dyn BoundaryNodeRule) -> Dimension {
    if geom.dimension() != Dimension::Curve {
        return geom.boundary_dimension();
    }
    let mut counts: BTreeMap<CoordKey, usize> = BTreeMap::new();
    for line in line_strings(geom) {
        if let (Some(first), Some(last)) = (line.points().first(), line.points().last()) {
            *counts.entry(CoordKey::new(first)).or_default() += 1;
            *counts.entry(CoordKey::new(last)).or_default() += 1;
        }
    }
    if counts.values().any(|&n| rule.is_in_boundary(n)) {
        Dimension::Point
    } else {
        Dimension::Empty
    }
}

fn line_strings(geom: &Geometry) -> Vec<&LineString> {
    match geom {
        Geometry::LineString(line) => vec![line],
        Geometry::MultiLineString(lines) => lines.iter().collect(),
        Geometry::Collection(geoms) => geoms.iter().flat_map(line_strings).collect(),
        _ => Vec::new(),
    }
}
