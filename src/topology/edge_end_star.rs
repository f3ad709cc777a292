use crate::error::TopologyError;
use crate::math::Point2;

use super::edge_end::{DirectedEdgeEnd, EdgeEnd};
use super::location::{Location, Position};

/// The edge ends leaving one node, kept sorted counter-clockwise by
/// direction. Ends with equal direction occupy a single slot.
#[derive(Debug, Clone)]
pub struct EdgeEndStar<T> {
    ends: Vec<T>,
}

impl<T> Default for EdgeEndStar<T> {
    fn default() -> Self {
        Self { ends: Vec::new() }
    }
}

impl<T: DirectedEdgeEnd> EdgeEndStar<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the slot with the same direction as `e`, or the index where a
    /// new slot for it belongs.
    ///
    /// # Errors
    ///
    /// `Err(index)` gives the insertion point when no slot matches.
    pub fn position(&self, e: &EdgeEnd) -> Result<usize, usize> {
        self.ends.binary_search_by(|item| item.compare_direction(e))
    }

    /// Inserts `item` at an index previously returned by [`position`](Self::position).
    pub fn insert_at(&mut self, index: usize, item: T) {
        self.ends.insert(index, item);
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.ends.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.ends.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.ends.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The node coordinate, if any end is present.
    #[must_use]
    pub fn coordinate(&self) -> Option<&Point2> {
        self.ends.first().map(DirectedEdgeEnd::coordinate)
    }

    /// Completes the labels of all ends once their own labels are known.
    ///
    /// Side locations are propagated around the node for each geometry.
    /// Whatever is still unknown is Exterior if the geometry has a collapsed
    /// line boundary at this node, and otherwise the location of the node
    /// relative to that geometry's area, obtained from `locate`.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if side locations around the node are
    /// inconsistent, which happens when the input was not fully noded.
    pub fn complete_labels(
        &mut self,
        locate: &mut dyn FnMut(usize, &Point2) -> Location,
    ) -> Result<(), TopologyError> {
        self.propagate_side_labels(0)?;
        self.propagate_side_labels(1)?;

        let mut has_collapsed_edge = [false; 2];
        for e in &self.ends {
            for (arg_index, flag) in has_collapsed_edge.iter_mut().enumerate() {
                let label = e.label();
                if label.is_line(arg_index) && label.location(arg_index) == Some(Location::Boundary) {
                    *flag = true;
                }
            }
        }

        let mut area_location: [Option<Location>; 2] = [None; 2];
        for e in &mut self.ends {
            let coord = *e.coordinate();
            for arg_index in 0..2 {
                if !e.label().is_any_null(arg_index) {
                    continue;
                }
                let loc = if has_collapsed_edge[arg_index] {
                    Location::Exterior
                } else {
                    *area_location[arg_index].get_or_insert_with(|| locate(arg_index, &coord))
                };
                e.label_mut().set_all_locations_if_null(arg_index, loc);
            }
        }
        Ok(())
    }

    /// Walks the ends counter-clockwise carrying the current side location
    /// of geometry `arg_index`, filling unknown locations and checking that
    /// every known right side agrees with the location carried in.
    ///
    /// # Errors
    ///
    /// `SideLocationConflict` when a right side disagrees with the carried
    /// location; `SingleNullSide` when only one side of an area end is known.
    pub fn propagate_side_labels(&mut self, arg_index: usize) -> Result<(), TopologyError> {
        let mut start = None;
        for e in &self.ends {
            let label = e.label();
            if label.is_area_for(arg_index) {
                if let Some(left) = label.location_at(arg_index, Position::Left) {
                    start = Some(left);
                }
            }
        }
        let Some(mut current) = start else {
            return Ok(());
        };

        for e in &mut self.ends {
            let coord = *e.coordinate();
            let label = e.label_mut();
            if label.location(arg_index).is_none() {
                label.set_location(arg_index, Some(current));
            }
            if !label.is_area_for(arg_index) {
                continue;
            }
            let left = label.location_at(arg_index, Position::Left);
            let right = label.location_at(arg_index, Position::Right);
            match (left, right) {
                (Some(left), Some(right)) => {
                    if right != current {
                        return Err(TopologyError::SideLocationConflict {
                            x: coord.x,
                            y: coord.y,
                        });
                    }
                    current = left;
                }
                (None, None) => {
                    label.set_location_at(arg_index, Position::Right, Some(current));
                    label.set_location_at(arg_index, Position::Left, Some(current));
                }
                _ => {
                    return Err(TopologyError::SingleNullSide {
                        x: coord.x,
                        y: coord.y,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{EdgeId, EdgeRef, Label};

    fn end(dx: f64, dy: f64, label: Label) -> EdgeEnd {
        let edge = EdgeRef {
            arg_index: 0,
            edge: EdgeId::default(),
        };
        EdgeEnd::new(edge, Point2::new(0.0, 0.0), Point2::new(dx, dy), label).unwrap()
    }

    fn star_of(ends: Vec<EdgeEnd>) -> EdgeEndStar<EdgeEnd> {
        let mut star = EdgeEndStar::new();
        for e in ends {
            if let Err(i) = star.position(&e) {
                star.insert_at(i, e);
            }
        }
        star
    }

    #[test]
    fn ends_are_kept_in_angular_order() {
        let l = Label::line(0, Location::Interior);
        let star = star_of(vec![end(-1.0, 0.0, l), end(1.0, 0.0, l), end(0.0, 1.0, l)]);
        let xs: Vec<f64> = star.iter().map(|e| e.directed_coordinate().x).collect();
        assert_eq!(xs, vec![1.0, 0.0, -1.0]);
        assert_eq!(star.coordinate(), Some(&Point2::new(0.0, 0.0)));
    }

    #[test]
    fn sides_propagate_to_unlabelled_line() {
        // Polygon corner at the origin: boundary runs along +x and +y with
        // the interior in the first quadrant. A line of geometry B leaves
        // into the third quadrant.
        let out_x = Label::area(0, Location::Boundary, Location::Interior, Location::Exterior);
        let out_y = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        let line = Label::line(1, Location::Interior);
        let mut star = star_of(vec![end(1.0, 0.0, out_x), end(0.0, 1.0, out_y), end(-1.0, -1.0, line)]);
        star.propagate_side_labels(0).unwrap();
        let line_end = star.iter().find(|e| e.directed_coordinate().x < 0.0).unwrap();
        assert_eq!(line_end.label().location(0), Some(Location::Exterior));
    }

    #[test]
    fn inconsistent_sides_are_reported() {
        let a = Label::area(0, Location::Boundary, Location::Interior, Location::Exterior);
        let b = Label::area(0, Location::Boundary, Location::Interior, Location::Exterior);
        let mut star = star_of(vec![end(1.0, 0.0, a), end(-1.0, 0.0, b)]);
        let err = star.propagate_side_labels(0);
        assert!(matches!(err, Err(TopologyError::SideLocationConflict { .. })));
    }

    #[test]
    fn unknown_locations_use_locator_once() {
        let line = Label::line(1, Location::Interior);
        let mut star = star_of(vec![end(1.0, 0.0, line), end(-1.0, 0.0, line)]);
        let mut calls = 0;
        star.complete_labels(&mut |arg, _| {
            calls += 1;
            assert_eq!(arg, 0);
            Location::Interior
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert!(star.iter().all(|e| e.label().location(0) == Some(Location::Interior)));
    }
}
