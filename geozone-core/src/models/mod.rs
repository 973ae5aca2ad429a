//! Contains domain models which flow through the pipeline: delivery records, their resolution state
//! kept by an editing session and the pipeline errors.

mod error;
pub use self::error::PipelineError;

mod session;
pub use self::session::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geocoordinate with latitude and longitude.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new instance of `Coordinate`.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns (lng, lat) pair as used by geojson.
    pub fn to_lng_lat(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "lat={}, lng={}", self.lat, self.lng)
    }
}

/// One row of the uploaded delivery table together with the data derived by the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryRecord {
    /// A client name. Not unique.
    pub client: String,
    /// An address as entered by the user.
    pub raw_address: String,
    /// Time window start, carried through verbatim.
    pub time_window_start: String,
    /// Time window end, carried through verbatim.
    pub time_window_end: String,
    /// Time window type, carried through verbatim.
    pub time_type: String,
    /// Free text with an order description and weight.
    pub order_weight_text: String,
    /// A weight extracted from `order_weight_text`.
    pub weight_kg: f64,
    /// An address used as geocoding query.
    pub normalized_address: String,
    /// Resolved coordinate. Present only when the record is eligible for partitioning.
    pub coordinate: Option<Coordinate>,
    /// A candidate address surfaced when resolution fails.
    pub suggestion: Option<String>,
    /// A truck label, set by partitioning.
    pub assigned_truck: Option<usize>,
    /// A driver name, set together with truck label.
    pub driver: Option<String>,
}

impl DeliveryRecord {
    /// Returns true if the record has coordinate and can be partitioned.
    pub fn is_eligible(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Drops the result of the last partitioning.
    pub fn clear_assignment(&mut self) {
        self.assigned_truck = None;
        self.driver = None;
    }
}
