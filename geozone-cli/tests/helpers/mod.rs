use geozone_core::geocoding::{GeoLocation, GeocodeProvider, GeocodeResult};
use geozone_core::models::Coordinate;
use geozone_core::normalization::AddressNormalizer;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DELIVERIES_PATH: &str = "data/deliveries.csv";
pub const CONFIG_PATH: &str = "data/config.json";

/// A geocoding provider which knows addresses from the sample delivery table.
pub struct StubGeocoder {
    places: HashMap<String, GeoLocation>,
}

impl GeocodeProvider for StubGeocoder {
    fn geocode(&self, query: &str, _: Duration) -> GeocodeResult {
        Ok(self.places.get(query).cloned())
    }
}

pub fn create_stub_provider() -> Arc<StubGeocoder> {
    let normalized = |address: &str| AddressNormalizer::default().normalize(address);
    let places = [
        (normalized("Mango Ave"), 10.3157, 123.8854, "Mango Avenue, Cebu City"),
        (normalized("Jones Ave"), 10.3050, 123.8940, "Osmena Boulevard, Cebu City"),
        (normalized("IT Park"), 10.3300, 123.9050, "Cebu IT Park, Lahug"),
        (normalized("Talisay Plaza"), 10.2450, 123.8490, "Talisay City Plaza"),
        ("Tabunok".to_string(), 10.2600, 123.8380, "Tabunok, Talisay City"),
        (normalized("Tabunok, Talisay City"), 10.2610, 123.8385, "Tabunok, Talisay City"),
        (normalized("North Reclamation Area"), 10.3020, 123.9100, "North Reclamation Area, Cebu City"),
        (normalized("Pier 1"), 10.2930, 123.9050, "Pier 1, Cebu City"),
    ];

    Arc::new(StubGeocoder {
        places: places
            .into_iter()
            .map(|(query, lat, lng, formatted)| (query, GeoLocation::new(Coordinate::new(lat, lng), formatted)))
            .collect(),
    })
}
