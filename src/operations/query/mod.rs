mod locate;

pub use locate::{locate_in_area, PointLocator};
