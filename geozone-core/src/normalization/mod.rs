//! Deterministic text transforms applied to uploaded rows before geocoding.

#[cfg(test)]
#[path = "../../tests/unit/normalization/normalization_test.rs"]
mod normalization_test;

use regex::Regex;
use std::sync::OnceLock;

/// Matches a number with optional fraction followed by kg unit in lowercased text.
const WEIGHT_PATTERN: &str = r"(\d+(?:\.\d+)?)\s*kg";

/// A locality suffix appended to every address by default.
pub const DEFAULT_REGION_SUFFIX: &str = ", Cebu, Philippines";

/// Turns raw addresses into geocoding queries by appending a fixed locality suffix.
#[derive(Clone, Debug)]
pub struct AddressNormalizer {
    suffix: String,
}

impl AddressNormalizer {
    /// Creates a new instance of `AddressNormalizer` with given suffix.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }

    /// Returns the locality suffix.
    pub fn suffix(&self) -> &str {
        self.suffix.as_str()
    }

    /// Appends locality suffix. Not idempotent: apply once per query.
    pub fn normalize(&self, raw_address: &str) -> String {
        format!("{raw_address}{}", self.suffix)
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_SUFFIX)
    }
}

/// Extracts the first number followed by "kg" unit (any case, optional whitespace in between).
/// Returns zero when there is no such token.
pub fn extract_weight(text: &str) -> f64 {
    weight_regex()
        .captures_iter(text.to_lowercase().as_str())
        .find_map(|captures| captures.get(1).and_then(|amount| amount.as_str().parse().ok()))
        .unwrap_or(0.)
}

fn weight_regex() -> &'static Regex {
    static WEIGHT_REGEX: OnceLock<Regex> = OnceLock::new();
    WEIGHT_REGEX.get_or_init(|| Regex::new(WEIGHT_PATTERN).expect("weight pattern is a valid regex"))
}
