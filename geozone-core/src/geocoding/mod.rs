//! Contains the boundary with external geocoding services and the resolution logic built around it.

mod resolver;
pub use self::resolver::*;
pub(crate) use self::resolver::{apply_failure, apply_location};

#[cfg(feature = "nominatim")]
mod nominatim;
#[cfg(feature = "nominatim")]
pub use self::nominatim::*;

use crate::models::Coordinate;
use std::fmt;
use std::time::Duration;

/// A place found by geocoding provider.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoLocation {
    /// Place coordinate.
    pub coordinate: Coordinate,
    /// Full address of the place as formatted by provider.
    pub formatted_address: String,
}

impl GeoLocation {
    /// Creates a new instance of `GeoLocation`.
    pub fn new(coordinate: Coordinate, formatted_address: impl Into<String>) -> Self {
        Self { coordinate, formatted_address: formatted_address.into() }
    }
}

/// Specifies geocoding provider failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeocodeError {
    /// Request did not complete within timeout.
    Timeout,
    /// Provider cannot be reached.
    Network(String),
    /// Provider responded with non success status.
    Status(u16),
    /// Response cannot be parsed.
    Malformed(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(details) => write!(f, "network error: {details}"),
            Self::Status(code) => write!(f, "provider responded with status {code}"),
            Self::Malformed(details) => write!(f, "malformed response: {details}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// A result of a single geocoding call: `Ok(None)` means provider found nothing.
pub type GeocodeResult = Result<Option<GeoLocation>, GeocodeError>;

/// Converts free form address query into a place.
pub trait GeocodeProvider: Send + Sync {
    /// Geocodes a query within given timeout.
    fn geocode(&self, query: &str, timeout: Duration) -> GeocodeResult;
}
