//! Nominatim search api client.

#[cfg(test)]
#[path = "../../tests/unit/geocoding/nominatim_test.rs"]
mod nominatim_test;

use super::{GeoLocation, GeocodeError, GeocodeProvider, GeocodeResult};
use crate::models::Coordinate;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Nominatim requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "cebu-routing-app";
/// Public instance usage policy allows one request per second.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Enforces minimal interval between consecutive requests.
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self { last_request: Mutex::new(None), min_interval }
    }

    fn wait(&self) {
        let mut last = self.last_request.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(elapsed) = last.map(|last_time| last_time.elapsed()) {
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }

        *last = Some(Instant::now());
    }
}

/// A geocoding provider which uses Nominatim search api.
pub struct NominatimProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl NominatimProvider {
    /// Creates a new instance of `NominatimProvider`.
    pub fn new(base_url: &str, user_agent: &str, min_interval: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|err| GeocodeError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(min_interval),
        })
    }
}

impl GeocodeProvider for NominatimProvider {
    fn geocode(&self, query: &str, timeout: Duration) -> GeocodeResult {
        self.rate_limiter.wait();

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .timeout(timeout)
            .send()
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().map_err(classify_error)?;

        parse_search_response(body.as_str())
    }
}

/// Parses search response body taking the best ranked place.
fn parse_search_response(body: &str) -> GeocodeResult {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|err| GeocodeError::Malformed(err.to_string()))?;

    places.into_iter().next().map(into_location).transpose()
}

fn into_location(place: NominatimPlace) -> Result<GeoLocation, GeocodeError> {
    let parse = |value: &str, name: &str| {
        value.trim().parse::<f64>().map_err(|err| GeocodeError::Malformed(format!("invalid {name} '{value}': {err}")))
    };

    let lat = parse(place.lat.as_str(), "latitude")?;
    let lng = parse(place.lon.as_str(), "longitude")?;

    Ok(GeoLocation::new(Coordinate::new(lat, lng), place.display_name))
}

fn classify_error(err: reqwest::Error) -> GeocodeError {
    if err.is_timeout() { GeocodeError::Timeout } else { GeocodeError::Network(err.to_string()) }
}
