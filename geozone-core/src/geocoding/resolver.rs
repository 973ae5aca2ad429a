#[cfg(test)]
#[path = "../../tests/unit/geocoding/resolver_test.rs"]
mod resolver_test;

use super::{GeoLocation, GeocodeProvider};
use crate::models::{ResolutionOutcome, Session};
use crate::normalization::AddressNormalizer;
use crate::utils::InfoLogger;
use std::sync::Arc;
use std::time::Duration;

/// A default timeout for a single geocoding call.
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// A result of address resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Address was found using normalized query.
    Resolved(GeoLocation),
    /// Address was not found. A suggestion comes from the looser raw query and must be
    /// confirmed by a human before its coordinates are trusted.
    Unresolved {
        /// An address found by the raw query.
        suggestion: Option<String>,
    },
}

/// Summarizes a geocoding pass over session records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Indices of resolved records.
    pub resolved: Vec<usize>,
    /// Indices of failed records.
    pub failed: Vec<usize>,
}

/// Resolves addresses using a geocoding provider with a fallback to a raw query.
pub struct GeocodeResolver {
    provider: Arc<dyn GeocodeProvider>,
    normalizer: AddressNormalizer,
    timeout: Duration,
    logger: InfoLogger,
}

impl GeocodeResolver {
    /// Creates a new instance of `GeocodeResolver`.
    pub fn new(
        provider: Arc<dyn GeocodeProvider>,
        normalizer: AddressNormalizer,
        timeout: Duration,
        logger: InfoLogger,
    ) -> Self {
        Self { provider, normalizer, timeout, logger }
    }

    /// Returns address normalizer used to build queries.
    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// Resolves raw address: tries normalized query first, then the raw one for a suggestion.
    /// Never fails: provider errors are downgraded to unresolved outcome.
    pub fn resolve(&self, raw_address: &str) -> Resolution {
        let query = self.normalizer.normalize(raw_address);

        if let Some(location) = self.lookup(query.as_str()) {
            return Resolution::Resolved(location);
        }

        Resolution::Unresolved { suggestion: self.lookup(raw_address).map(|location| location.formatted_address) }
    }

    /// Resolves every record of the session which has no outcome yet, sequentially in upload order.
    /// Records resolved in previous passes are not queried again.
    pub fn resolve_session(&self, session: &mut Session) -> PassReport {
        session.unresolved_indices().into_iter().fold(PassReport::default(), |mut report, index| {
            let Some(raw_address) = session.record(index).map(|record| record.raw_address.clone()) else {
                return report;
            };

            match self.resolve(raw_address.as_str()) {
                Resolution::Resolved(location) => {
                    apply_location(session, index, location, None);
                    report.resolved.push(index);
                }
                Resolution::Unresolved { suggestion } => {
                    apply_failure(session, index, suggestion);
                    report.failed.push(index);
                }
            }

            report
        })
    }

    fn lookup(&self, query: &str) -> Option<GeoLocation> {
        match self.provider.geocode(query, self.timeout) {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                (self.logger)(format!("no match for '{query}'").as_str());
                None
            }
            Err(err) => {
                (self.logger)(format!("cannot geocode '{query}': {err}").as_str());
                None
            }
        }
    }
}

/// Marks record as resolved. When `query` is set, it replaces normalized address.
pub(crate) fn apply_location(session: &mut Session, index: usize, location: GeoLocation, query: Option<String>) {
    if let Some(record) = session.record_mut(index) {
        record.coordinate = Some(location.coordinate);
        record.suggestion = None;
        if let Some(query) = query {
            record.normalized_address = query;
        }
    }

    session.state_mut().set_outcome(index, ResolutionOutcome::Resolved(location.coordinate));
}

/// Marks record as failed replacing its suggestion.
pub(crate) fn apply_failure(session: &mut Session, index: usize, suggestion: Option<String>) {
    if let Some(record) = session.record_mut(index) {
        record.coordinate = None;
        record.suggestion = suggestion.clone();
    }

    session.state_mut().set_outcome(index, ResolutionOutcome::Failed { suggestion });
}
