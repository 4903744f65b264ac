// Coordinate value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
///
/// Serializes as `{"latitude": .., "longitude": ..}`, which is also the
/// request body of the location search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the valid lat/lon ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_request_body() {
        let json = serde_json::to_value(Coordinate::new(35.0, 139.0)).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 35.0, "longitude": 139.0}));
    }

    #[test]
    fn test_validity_ranges() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
