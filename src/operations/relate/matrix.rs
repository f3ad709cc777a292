use std::fmt;

use crate::error::{OperationError, Result};
use crate::geometry::Dimension;
use crate::topology::Location;

/// Dimensionally Extended 9-Intersection Matrix (DE-9IM).
///
/// Rows are the Interior, Boundary and Exterior of geometry A, columns the
/// same for geometry B. Each cell holds the dimension of the intersection
/// of the two point sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl IntersectionMatrix {
    /// Creates a matrix with every cell empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a matrix from nine dimension symbols (`F`, `0`, `1`, `2`).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidPattern` if the string is not nine
    /// concrete dimension symbols.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let symbols = pattern_symbols(pattern)?;
        let mut im = Self::new();
        for (i, c) in symbols.iter().enumerate() {
            let dim = Dimension::from_symbol(*c)
                .ok_or_else(|| OperationError::InvalidPattern(pattern.to_string()))?;
            im.cells[i / 3][i % 3] = dim;
        }
        Ok(im)
    }

    #[must_use]
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    pub fn set(&mut self, a: Location, b: Location, dim: Dimension) {
        self.cells[a.index()][b.index()] = dim;
    }

    pub fn set_all(&mut self, dim: Dimension) {
        for row in &mut self.cells {
            row.fill(dim);
        }
    }

    /// Raises the cell to `dim` if it is currently lower. Never lowers a cell.
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// As [`set_at_least`](Self::set_at_least), ignoring unknown locations.
    pub fn set_at_least_if_valid(&mut self, a: Option<Location>, b: Option<Location>, dim: Dimension) {
        if let (Some(a), Some(b)) = (a, b) {
            self.set_at_least(a, b, dim);
        }
    }

    /// Raises every cell to at least the dimension given in `pattern`.
    ///
    /// `F`, `T` and `*` leave the cell unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidPattern` for malformed patterns.
    pub fn set_at_least_pattern(&mut self, pattern: &str) -> Result<()> {
        let symbols = pattern_symbols(pattern)?;
        for (i, c) in symbols.iter().enumerate() {
            match *c {
                'T' | 't' | '*' => {}
                c => {
                    let dim = Dimension::from_symbol(c)
                        .ok_or_else(|| OperationError::InvalidPattern(pattern.to_string()))?;
                    let (a, b) = (Location::ALL[i / 3], Location::ALL[i % 3]);
                    self.set_at_least(a, b, dim);
                }
            }
        }
        Ok(())
    }

    /// Returns the matrix with the roles of A and B exchanged.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = *self;
        for i in 0..3 {
            for j in 0..3 {
                out.cells[i][j] = self.cells[j][i];
            }
        }
        out
    }

    /// Tests the matrix against a DE-9IM pattern such as `T*F**F***`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidPattern` for malformed patterns.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let symbols = pattern_symbols(pattern)?;
        for (i, c) in symbols.iter().enumerate() {
            let dim = self.cells[i / 3][i % 3];
            if !matches_symbol(dim, *c).ok_or_else(|| OperationError::InvalidPattern(pattern.to_string()))? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `FF*FF****`
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        use Location::{Boundary, Interior};
        self.get(Interior, Interior) == Dimension::Empty
            && self.get(Interior, Boundary) == Dimension::Empty
            && self.get(Boundary, Interior) == Dimension::Empty
            && self.get(Boundary, Boundary) == Dimension::Empty
    }

    #[must_use]
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// The geometries touch if they meet only at their boundaries.
    /// Not defined for two point sets.
    #[must_use]
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary, Interior};
        if dim_a > dim_b {
            return self.is_touches(dim_b, dim_a);
        }
        let defined = matches!(
            (dim_a, dim_b),
            (Dimension::Surface, Dimension::Surface)
                | (Dimension::Curve, Dimension::Curve | Dimension::Surface)
                | (Dimension::Point, Dimension::Curve | Dimension::Surface)
        );
        defined
            && self.get(Interior, Interior) == Dimension::Empty
            && (self.get(Interior, Boundary).is_non_empty()
                || self.get(Boundary, Interior).is_non_empty()
                || self.get(Boundary, Boundary).is_non_empty())
    }

    #[must_use]
    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Exterior, Interior};
        let ii = self.get(Interior, Interior);
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Curve | Dimension::Surface)
            | (Dimension::Curve, Dimension::Surface) => {
                ii.is_non_empty() && self.get(Interior, Exterior).is_non_empty()
            }
            (Dimension::Curve | Dimension::Surface, Dimension::Point)
            | (Dimension::Surface, Dimension::Curve) => {
                ii.is_non_empty() && self.get(Exterior, Interior).is_non_empty()
            }
            (Dimension::Curve, Dimension::Curve) => ii == Dimension::Point,
            _ => false,
        }
    }

    /// `T*F**F***`
    #[must_use]
    pub fn is_within(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};
        self.get(Interior, Interior).is_non_empty()
            && self.get(Interior, Exterior) == Dimension::Empty
            && self.get(Boundary, Exterior) == Dimension::Empty
    }

    /// `T*****FF*`
    #[must_use]
    pub fn is_contains(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};
        self.get(Interior, Interior).is_non_empty()
            && self.get(Exterior, Interior) == Dimension::Empty
            && self.get(Exterior, Boundary) == Dimension::Empty
    }

    #[must_use]
    pub fn is_covers(&self) -> bool {
        use Location::{Boundary, Exterior};
        self.has_point_in_common()
            && self.get(Exterior, Location::Interior) == Dimension::Empty
            && self.get(Exterior, Boundary) == Dimension::Empty
    }

    #[must_use]
    pub fn is_covered_by(&self) -> bool {
        use Location::{Boundary, Exterior};
        self.has_point_in_common()
            && self.get(Location::Interior, Exterior) == Dimension::Empty
            && self.get(Boundary, Exterior) == Dimension::Empty
    }

    /// Topological equality: `T*F**FFF*` for geometries of equal dimension.
    #[must_use]
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary, Exterior, Interior};
        dim_a == dim_b
            && self.get(Interior, Interior).is_non_empty()
            && self.get(Interior, Exterior) == Dimension::Empty
            && self.get(Boundary, Exterior) == Dimension::Empty
            && self.get(Exterior, Interior) == Dimension::Empty
            && self.get(Exterior, Boundary) == Dimension::Empty
    }

    #[must_use]
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Exterior, Interior};
        let outside_each_other = self.get(Interior, Exterior).is_non_empty()
            && self.get(Exterior, Interior).is_non_empty();
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Surface, Dimension::Surface) => {
                self.get(Interior, Interior).is_non_empty() && outside_each_other
            }
            (Dimension::Curve, Dimension::Curve) => {
                self.get(Interior, Interior) == Dimension::Curve && outside_each_other
            }
            _ => false,
        }
    }

    fn has_point_in_common(&self) -> bool {
        use Location::{Boundary, Interior};
        self.get(Interior, Interior).is_non_empty()
            || self.get(Interior, Boundary).is_non_empty()
            || self.get(Boundary, Interior).is_non_empty()
            || self.get(Boundary, Boundary).is_non_empty()
    }
}

/// Tests one cell value against one pattern symbol.
///
/// Returns `None` if `symbol` is not a pattern symbol.
#[must_use]
pub fn matches_symbol(dim: Dimension, symbol: char) -> Option<bool> {
    match symbol {
        '*' => Some(true),
        'T' | 't' => Some(dim.is_non_empty()),
        c => Dimension::from_symbol(c).map(|d| d == dim),
    }
}

fn pattern_symbols(pattern: &str) -> Result<Vec<char>> {
    let symbols: Vec<char> = pattern.chars().collect();
    if symbols.len() != 9 {
        return Err(OperationError::InvalidPattern(pattern.to_string()).into());
    }
    Ok(symbols)
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
