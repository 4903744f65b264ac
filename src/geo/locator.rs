// Geo Locator.
// One-shot position readings: IP-based lookup over HTTP, or a fixed manual coordinate.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, header::USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::error::{LocationError, LocationFailure};

use super::Coordinate;

/// Source of a single position reading.
///
/// Every call is a fresh request; implementations neither retry nor cache.
pub trait Locator {
    fn locate(&self) -> impl Future<Output = Result<Coordinate, LocationError>>;
}

/// Locator that always reports the coordinate it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinate: Coordinate,
}

impl FixedLocator {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        if !self.coordinate.is_valid() {
            return Err(LocationError::new(
                LocationFailure::PositionUnavailable,
                format!(
                    "invalid coordinates {}; latitude must be -90..90, longitude -180..180",
                    self.coordinate
                ),
            ));
        }
        Ok(self.coordinate)
    }
}

/// Body returned by the IP geolocation endpoint.
#[derive(Debug, Deserialize)]
struct IpLookup {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Locator backed by an IP geolocation HTTP endpoint.
pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::new(LocationFailure::PositionUnavailable, e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        debug!(url = %self.url, "requesting IP geolocation");

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, "venue-scout")
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::new(failure_for_status(status), format!("HTTP {}", status)));
        }

        let lookup: IpLookup = response.json().await.map_err(transport_failure)?;
        coordinate_from_lookup(lookup)
    }
}

fn transport_failure(err: reqwest::Error) -> LocationError {
    let reason = if err.is_timeout() {
        LocationFailure::Timeout
    } else {
        LocationFailure::PositionUnavailable
    };
    LocationError::new(reason, err.to_string())
}

fn failure_for_status(status: StatusCode) -> LocationFailure {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            LocationFailure::PermissionDenied
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LocationFailure::Timeout,
        _ => LocationFailure::PositionUnavailable,
    }
}

fn coordinate_from_lookup(lookup: IpLookup) -> Result<Coordinate, LocationError> {
    if lookup.error {
        return Err(LocationError::new(
            LocationFailure::PositionUnavailable,
            lookup.reason.unwrap_or_else(|| "lookup rejected".to_string()),
        ));
    }

    match (lookup.latitude, lookup.longitude) {
        (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => Err(LocationError::new(
            LocationFailure::PositionUnavailable,
            "response carried no coordinates",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_locator_returns_coordinate() {
        let locator = FixedLocator::new(Coordinate::new(35.0, 139.0));
        assert_eq!(locator.locate().await.unwrap(), Coordinate::new(35.0, 139.0));
    }

    #[tokio::test]
    async fn test_fixed_locator_rejects_out_of_range() {
        let locator = FixedLocator::new(Coordinate::new(123.0, 0.0));
        let err = locator.locate().await.unwrap_err();
        assert_eq!(err.reason, LocationFailure::PositionUnavailable);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(failure_for_status(StatusCode::FORBIDDEN), LocationFailure::PermissionDenied);
        assert_eq!(
            failure_for_status(StatusCode::TOO_MANY_REQUESTS),
            LocationFailure::PermissionDenied
        );
        assert_eq!(failure_for_status(StatusCode::GATEWAY_TIMEOUT), LocationFailure::Timeout);
        assert_eq!(
            failure_for_status(StatusCode::INTERNAL_SERVER_ERROR),
            LocationFailure::PositionUnavailable
        );
    }

    #[test]
    fn test_lookup_parsing() {
        let lookup: IpLookup =
            serde_json::from_str(r#"{"ip":"1.2.3.4","latitude":35.68,"longitude":139.69}"#).unwrap();
        assert_eq!(coordinate_from_lookup(lookup).unwrap(), Coordinate::new(35.68, 139.69));

        let lookup: IpLookup =
            serde_json::from_str(r#"{"error":true,"reason":"Reserved IP Address"}"#).unwrap();
        let err = coordinate_from_lookup(lookup).unwrap_err();
        assert_eq!(err.message, "Reserved IP Address");

        let lookup: IpLookup = serde_json::from_str(r#"{"city":"Nowhere"}"#).unwrap();
        assert!(coordinate_from_lookup(lookup).is_err());
    }
}
