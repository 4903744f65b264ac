// Search backend response types.
// Raw venue records exactly as the search service returns them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinate;

/// Field names that may carry the smoking indicator, highest precedence first.
///
/// Older backend revisions spell the field `smoking`; current ones use
/// `smoking_status`.
pub const SMOKING_FIELD_ALIASES: &[&str] = &["smoking_status", "smoking"];

/// A venue record as returned by the search service.
///
/// Fields the crate does not model (including the smoking indicator) are kept
/// in `extra` so a cached copy serializes back to the same record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Share of positive review sentiment, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_score: Option<u32>,
    /// Share of negative review sentiment, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawResult {
    /// Venue position, if the service supplied both components.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lng?))
    }

    /// Raw smoking indicator from the first alias that holds a string.
    pub fn smoking_indicator(&self) -> Option<&str> {
        SMOKING_FIELD_ALIASES
            .iter()
            .find_map(|field| self.extra.get(*field).and_then(Value::as_str))
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, name: &str) -> RawResult {
    RawResult {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{} address", name),
        ..RawResult::default()
    }
}
