// Distance estimation.
// Haversine great-circle distance on a spherical Earth and a walking-time estimate.

use super::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed walking speed for walk-time estimates.
pub const WALKING_SPEED_KMH: f64 = 4.0;

/// Great-circle distance between two coordinates, in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Estimated walking time in whole minutes for a distance.
pub fn walk_minutes(distance_km: f64) -> u32 {
    (distance_km * 60.0 / WALKING_SPEED_KMH).round() as u32
}

/// Distance and walking time from an origin to a venue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub distance_km: f64,
    pub walk_minutes: u32,
}

impl Proximity {
    /// Both values, or neither when either endpoint is unknown.
    pub fn between(origin: Option<Coordinate>, target: Option<Coordinate>) -> Option<Self> {
        let (origin, target) = (origin?, target?);
        let distance_km = distance_km(origin, target);
        Some(Self {
            distance_km,
            walk_minutes: walk_minutes(distance_km),
        })
    }
}
