// Geographic primitives.
// Coordinates, one-shot position lookup, and great-circle distance.

pub mod coordinate;
pub mod distance;
pub mod locator;

pub use coordinate::Coordinate;
pub use distance::{WALKING_SPEED_KMH, distance_km, walk_minutes};
pub use locator::{FixedLocator, IpLocator, Locator};
