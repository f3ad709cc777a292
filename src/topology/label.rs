use std::fmt;

use super::location::{Location, Position};

/// Locations of a graph component relative to one geometry.
///
/// A line location only carries the on-line slot. An area location also
/// carries the locations to the left and right of the directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyLocation {
    locations: [Option<Location>; 3],
    is_area: bool,
}

impl TopologyLocation {
    /// A line location with the given on-line location.
    #[must_use]
    pub fn line(on: Option<Location>) -> Self {
        Self {
            locations: [on, None, None],
            is_area: false,
        }
    }

    /// An area location with on, left and right locations.
    #[must_use]
    pub fn area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            locations: [on, left, right],
            is_area: true,
        }
    }

    #[must_use]
    pub fn is_area(&self) -> bool {
        self.is_area
    }

    #[must_use]
    pub fn is_line(&self) -> bool {
        !self.is_area
    }

    /// Returns the location at `pos`. Sides of a line location are always unknown.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Location> {
        if !self.is_area && pos != Position::On {
            return None;
        }
        self.locations[pos.index()]
    }

    /// Sets the location at `pos`. Setting a side promotes a line location to an area.
    pub fn set(&mut self, pos: Position, loc: Option<Location>) {
        if pos != Position::On {
            self.is_area = true;
        }
        self.locations[pos.index()] = loc;
    }

    /// `true` if every slot is unknown.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.slots().iter().all(Option::is_none)
    }

    /// `true` if any slot is unknown.
    #[must_use]
    pub fn is_any_null(&self) -> bool {
        self.slots().iter().any(Option::is_none)
    }

    pub fn set_all(&mut self, loc: Option<Location>) {
        let n = self.slots().len();
        for slot in &mut self.locations[..n] {
            *slot = loc;
        }
    }

    pub fn set_all_if_null(&mut self, loc: Location) {
        let n = self.slots().len();
        for slot in &mut self.locations[..n] {
            if slot.is_none() {
                *slot = Some(loc);
            }
        }
    }

    /// Returns a copy with left and right exchanged.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut out = *self;
        out.locations.swap(1, 2);
        out
    }

    /// Returns this location with unknown slots filled from `other`.
    ///
    /// If `other` is an area and this is a line, the result is an area.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = *self;
        if other.is_area && !out.is_area {
            out.is_area = true;
            out.locations[1] = None;
            out.locations[2] = None;
        }
        let n = out.slots().len().min(other.slots().len());
        for i in 0..n {
            if out.locations[i].is_none() {
                out.locations[i] = other.locations[i];
            }
        }
        out
    }

    fn slots(&self) -> &[Option<Location>] {
        if self.is_area {
            &self.locations
        } else {
            &self.locations[..1]
        }
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = |l: Option<Location>| l.map_or('-', Location::symbol);
        if self.is_area {
            write!(
                f,
                "{}{}{}",
                sym(self.locations[1]),
                sym(self.locations[0]),
                sym(self.locations[2])
            )
        } else {
            write!(f, "{}", sym(self.locations[0]))
        }
    }
}

/// Topological annotation of a graph component relative to both input
/// geometries (argument index 0 and 1).
///
/// Labels are plain values. Every update either happens on an owned copy
/// or produces a new label, so a label stored on one component is never
/// changed through another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// A line label located `on` for `arg_index` and unknown for the other.
    #[must_use]
    pub fn line(arg_index: usize, on: Location) -> Self {
        let mut elt = [TopologyLocation::line(None); 2];
        elt[arg_index] = TopologyLocation::line(Some(on));
        Self { elt }
    }

    /// An area label for `arg_index` and an unknown area for the other.
    #[must_use]
    pub fn area(arg_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut elt = [TopologyLocation::area(None, None, None); 2];
        elt[arg_index] = TopologyLocation::area(Some(on), Some(left), Some(right));
        Self { elt }
    }

    /// A line label with the same on-location for both geometries.
    #[must_use]
    pub fn uniform_line(on: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::line(on); 2],
        }
    }

    /// An area label with the same locations for both geometries.
    #[must_use]
    pub fn uniform_area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::area(on, left, right); 2],
        }
    }

    /// On-line location for `arg_index`.
    #[must_use]
    pub fn location(&self, arg_index: usize) -> Option<Location> {
        self.elt[arg_index].get(Position::On)
    }

    #[must_use]
    pub fn location_at(&self, arg_index: usize, pos: Position) -> Option<Location> {
        self.elt[arg_index].get(pos)
    }

    #[must_use]
    pub fn topology_location(&self, arg_index: usize) -> &TopologyLocation {
        &self.elt[arg_index]
    }

    pub fn set_location(&mut self, arg_index: usize, loc: Option<Location>) {
        self.elt[arg_index].set(Position::On, loc);
    }

    pub fn set_location_at(&mut self, arg_index: usize, pos: Position, loc: Option<Location>) {
        self.elt[arg_index].set(pos, loc);
    }

    pub fn set_all_locations(&mut self, arg_index: usize, loc: Option<Location>) {
        self.elt[arg_index].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, arg_index: usize, loc: Location) {
        self.elt[arg_index].set_all_if_null(loc);
    }

    #[must_use]
    pub fn is_null(&self, arg_index: usize) -> bool {
        self.elt[arg_index].is_null()
    }

    #[must_use]
    pub fn is_any_null(&self, arg_index: usize) -> bool {
        self.elt[arg_index].is_any_null()
    }

    /// `true` if the label carries side locations for either geometry.
    #[must_use]
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    #[must_use]
    pub fn is_area_for(&self, arg_index: usize) -> bool {
        self.elt[arg_index].is_area()
    }

    #[must_use]
    pub fn is_line(&self, arg_index: usize) -> bool {
        self.elt[arg_index].is_line()
    }

    /// Number of geometries this label has any knowledge of.
    #[must_use]
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|e| !e.is_null()).count()
    }

    /// Returns the label as seen from the opposite direction of the edge.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            elt: [self.elt[0].flipped(), self.elt[1].flipped()],
        }
    }

    /// Returns a label whose unknown slots are filled from `other`.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        merge_label(self, other)
    }
}

/// Merges two labels: known locations of `a` win, unknown ones come from `b`.
#[must_use]
pub fn merge_label(a: &Label, b: &Label) -> Label {
    Label {
        elt: [a.elt[0].merged(&b.elt[0]), a.elt[1].merged(&b.elt[1])],
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}
