// Cache keys.
// Coordinates quantized to four decimal places (~11 m), so nearby readings share an entry.

use std::fmt;

use crate::geo::Coordinate;

const KEY_SCALE: f64 = 10_000.0;

/// Quantized coordinate string, e.g. `"35.0000,139.0000"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self(format!(
            "{:.4},{:.4}",
            quantize(coordinate.latitude),
            quantize(coordinate.longitude)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn quantize(value: f64) -> f64 {
    let rounded = (value * KEY_SCALE).round() / KEY_SCALE;
    // Fold -0.0 into 0.0 so both sides of the equator/meridian share a key.
    if rounded == 0.0 { 0.0 } else { rounded }
}
