//! Manual correction of addresses which cannot be geocoded automatically.

#[cfg(test)]
#[path = "../../tests/unit/correction/ledger_test.rs"]
mod ledger_test;

use crate::geocoding::{GeocodeResolver, Resolution, apply_failure, apply_location};
use crate::models::{PipelineError, ResolutionOutcome, Session};

/// Specifies how a failed record can be corrected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorrectionKind {
    /// A binary choice between original and suggested address.
    Choice {
        /// Original address.
        original: String,
        /// Suggested address.
        suggestion: String,
    },
    /// No suggestion: address has to be entered manually.
    FreeText,
}

/// A correction control for a single failed record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionControl {
    /// Record index.
    pub index: usize,
    /// Client name.
    pub client: String,
    /// Original address.
    pub address: String,
    /// Correction kind.
    pub kind: CorrectionKind,
}

impl CorrectionControl {
    /// Returns options to choose from: original address first. Empty for free text.
    pub fn options(&self) -> Vec<&str> {
        match &self.kind {
            CorrectionKind::Choice { original, suggestion } => vec![original.as_str(), suggestion.as_str()],
            CorrectionKind::FreeText => vec![],
        }
    }
}

/// Summarizes a retry pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetryReport {
    /// Records resolved by this retry.
    pub resolved: Vec<usize>,
    /// Records which failed again.
    pub failed: Vec<usize>,
    /// Records skipped because staged text was blank or they are already resolved.
    pub skipped: Vec<usize>,
    /// Records skipped because attempts limit is reached.
    pub abandoned: Vec<usize>,
}

/// Stages user corrections for failed records and merges them back via re-resolution.
#[derive(Clone, Debug, Default)]
pub struct CorrectionLedger {
    max_attempts: Option<usize>,
}

impl CorrectionLedger {
    /// Creates a new instance of `CorrectionLedger`. `None` means unlimited manual retries.
    pub fn new(max_attempts: Option<usize>) -> Self {
        Self { max_attempts }
    }

    /// Returns correction controls for failed records in index order.
    /// Records which exhausted their attempts are not offered anymore.
    pub fn controls(&self, session: &Session) -> Vec<CorrectionControl> {
        session
            .state()
            .failed()
            .filter(|(index, _)| !self.is_exhausted(session, *index))
            .filter_map(|(index, suggestion)| {
                let record = session.record(index)?;
                let kind = match suggestion.map(str::trim).filter(|suggestion| !suggestion.is_empty()) {
                    Some(suggestion) => CorrectionKind::Choice {
                        original: record.raw_address.clone(),
                        suggestion: suggestion.to_string(),
                    },
                    None => CorrectionKind::FreeText,
                };

                Some(CorrectionControl {
                    index,
                    client: record.client.clone(),
                    address: record.raw_address.clone(),
                    kind,
                })
            })
            .collect()
    }

    /// Stages correction text for a failed record. Replaces previously staged text.
    pub fn apply_choice(&self, session: &mut Session, index: usize, text: &str) -> Result<(), PipelineError> {
        match session.state().outcome(index) {
            Some(ResolutionOutcome::Failed { .. }) => {
                session.state_mut().stage_correction(index, text.to_string());
                Ok(())
            }
            _ => Err(PipelineError::UnknownCorrectionTarget { index }),
        }
    }

    /// Re-resolves every staged correction. Already resolved records are never queried again.
    pub fn retry(&self, session: &mut Session, resolver: &GeocodeResolver) -> RetryReport {
        let corrections = session.state_mut().take_corrections();

        corrections.into_iter().fold(RetryReport::default(), |mut report, (index, text)| {
            let text = text.trim();
            let is_resolved = session.state().outcome(index).is_none_or(ResolutionOutcome::is_resolved);

            if is_resolved || text.is_empty() {
                report.skipped.push(index);
                return report;
            }

            if self.is_exhausted(session, index) {
                report.abandoned.push(index);
                return report;
            }

            session.state_mut().record_attempt(index);

            match resolver.resolve(text) {
                Resolution::Resolved(location) => {
                    let query = resolver.normalizer().normalize(text);
                    apply_location(session, index, location, Some(query));
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

    fn is_exhausted(&self, session: &Session, index: usize) -> bool {
        self.max_attempts.is_some_and(|max_attempts| session.state().attempts(index) >= max_attempts)
    }
}
