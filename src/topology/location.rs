use std::fmt;

/// Topological location of a point relative to a geometry.
///
/// The "unknown" location is expressed as `Option<Location>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Row/column index of this location in an intersection matrix.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Interior => 0,
            Self::Boundary => 1,
            Self::Exterior => 2,
        }
    }

    /// Single-character symbol, as used in label debug output.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Interior => 'i',
            Self::Boundary => 'b',
            Self::Exterior => 'e',
        }
    }

    /// All locations in matrix order.
    pub const ALL: [Self; 3] = [Self::Interior, Self::Boundary, Self::Exterior];
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    On,
    Left,
    Right,
}

impl Position {
    /// Returns the position on the other side of the edge.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::On,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::On => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}
