//! Coordinates and great-circle distance.

mod coordinate;
mod distance;

pub use coordinate::{Coordinate, CoordinateError};
pub use distance::{EARTH_RADIUS_KM, are_close, distance_km};
