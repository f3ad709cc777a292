use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::topology::{BoundaryNodeRule, Mod2Rule};

use super::computer::RelateComputer;
use super::IntersectionMatrix;

/// Computes the DE-9IM intersection matrix of two geometries.
///
/// ```ignore
/// let im = RelateOp::new(&a, &b)
///     .with_boundary_rule(&EndPointRule)
///     .execute()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelateOp<'a> {
    a: &'a Geometry,
    b: &'a Geometry,
    rule: &'a dyn BoundaryNodeRule,
    vertex_limit: Option<usize>,
}

impl<'a> RelateOp<'a> {
    /// Creates a new `RelateOp` using the mod-2 boundary rule.
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry) -> Self {
        Self {
            a,
            b,
            rule: &Mod2Rule,
            vertex_limit: None,
        }
    }

    /// Sets the rule deciding which line endpoints are in the boundary.
    #[must_use]
    pub fn with_boundary_rule(mut self, rule: &'a dyn BoundaryNodeRule) -> Self {
        self.rule = rule;
        self
    }

    /// Rejects inputs whose combined vertex count exceeds `limit`.
    #[must_use]
    pub fn with_vertex_limit(mut self, limit: usize) -> Self {
        self.vertex_limit = Some(limit);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex limit is exceeded, an input has
    /// non-finite coordinates or degenerate components, or the input is
    /// not consistently noded.
    pub fn execute(&self) -> Result<IntersectionMatrix> {
        if let Some(limit) = self.vertex_limit {
            let actual = self.a.num_vertices() + self.b.num_vertices();
            if actual > limit {
                return Err(OperationError::VertexBudgetExceeded { limit, actual }.into());
            }
        }
        self.a.check_finite()?;
        self.b.check_finite()?;
        RelateComputer::new(self.a, self.b, self.rule).compute_im()
    }
}

/// Computes the intersection matrix of `a` and `b` with default settings.
///
/// # Errors
///
/// See [`RelateOp::execute`].
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix> {
    RelateOp::new(a, b).execute()
}
