use std::fmt;

/// Topological dimension of a point set, as stored in an intersection matrix.
///
/// Ordered so that a "larger" dimension dominates when raising matrix cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Dimension {
    /// The empty set (`F`, numerically -1).
    #[default]
    Empty,
    /// Zero-dimensional.
    Point,
    /// One-dimensional.
    Curve,
    /// Two-dimensional.
    Surface,
}

impl Dimension {
    /// Numeric value: -1, 0, 1 or 2.
    #[must_use]
    pub fn value(self) -> i8 {
        match self {
            Self::Empty => -1,
            Self::Point => 0,
            Self::Curve => 1,
            Self::Surface => 2,
        }
    }

    /// Matrix symbol: `F`, `0`, `1` or `2`.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => 'F',
            Self::Point => '0',
            Self::Curve => '1',
            Self::Surface => '2',
        }
    }

    /// Parses a concrete dimension symbol. `T` and `*` are not dimensions.
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'F' | 'f' => Some(Self::Empty),
            '0' => Some(Self::Point),
            '1' => Some(Self::Curve),
            '2' => Some(Self::Surface),
            _ => None,
        }
    }

    /// `true` for any non-empty dimension.
    #[must_use]
    pub fn is_non_empty(self) -> bool {
        self != Self::Empty
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_numeric_value() {
        assert!(Dimension::Empty < Dimension::Point);
        assert!(Dimension::Point < Dimension::Curve);
        assert!(Dimension::Curve < Dimension::Surface);
        assert_eq!(Dimension::Empty.value(), -1);
        assert_eq!(Dimension::Surface.value(), 2);
    }

    #[test]
    fn symbols_round_trip() {
        for d in [Dimension::Empty, Dimension::Point, Dimension::Curve, Dimension::Surface] {
            assert_eq!(Dimension::from_symbol(d.symbol()), Some(d));
        }
        assert_eq!(Dimension::from_symbol('T'), None);
    }
}
