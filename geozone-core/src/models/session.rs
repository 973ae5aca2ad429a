#[cfg(test)]
#[path = "../../tests/unit/models/session_test.rs"]
mod session_test;

use super::{Coordinate, DeliveryRecord, PipelineError};
use crate::format::read_delivery_table;
use crate::normalization::AddressNormalizer;
use std::collections::BTreeMap;
use std::io::{BufReader, Read};

/// Specifies the latest outcome of address resolution for a single record.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolutionOutcome {
    /// Address is resolved into coordinate.
    Resolved(Coordinate),
    /// Address is not resolved. A suggestion is present when a looser query found something.
    Failed {
        /// A candidate address.
        suggestion: Option<String>,
    },
}

impl ResolutionOutcome {
    /// Returns true if outcome is resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Keeps resolution outcomes and staged corrections keyed by record index.
/// Ordered maps keep iteration order stable between reruns.
#[derive(Clone, Debug, Default)]
pub struct ResolutionState {
    outcomes: BTreeMap<usize, ResolutionOutcome>,
    corrections: BTreeMap<usize, String>,
    attempts: BTreeMap<usize, usize>,
}

impl ResolutionState {
    /// Returns the latest outcome for the record, if it was resolved at least once.
    pub fn outcome(&self, index: usize) -> Option<&ResolutionOutcome> {
        self.outcomes.get(&index)
    }

    /// Returns failed records with their suggestions in index order.
    pub fn failed(&self) -> impl Iterator<Item = (usize, Option<&str>)> + '_ {
        self.outcomes.iter().filter_map(|(&index, outcome)| match outcome {
            ResolutionOutcome::Failed { suggestion } => Some((index, suggestion.as_deref())),
            ResolutionOutcome::Resolved(_) => None,
        })
    }

    /// Returns corrections staged since the last retry in index order.
    pub fn pending_corrections(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.corrections.iter().map(|(&index, text)| (index, text.as_str()))
    }

    /// Returns amount of manual retries done for the record.
    pub fn attempts(&self, index: usize) -> usize {
        self.attempts.get(&index).copied().unwrap_or(0)
    }

    pub(crate) fn set_outcome(&mut self, index: usize, outcome: ResolutionOutcome) {
        self.outcomes.insert(index, outcome);
    }

    pub(crate) fn stage_correction(&mut self, index: usize, text: String) {
        self.corrections.insert(index, text);
    }

    pub(crate) fn take_corrections(&mut self) -> BTreeMap<usize, String> {
        std::mem::take(&mut self.corrections)
    }

    pub(crate) fn record_attempt(&mut self, index: usize) {
        *self.attempts.entry(index).or_insert(0) += 1;
    }
}

/// An editing session created per uploaded table. Owned by the front end and passed by reference
/// into pipeline functions. Uploading a new table means creating a new session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    records: Vec<DeliveryRecord>,
    state: ResolutionState,
}

impl Session {
    /// Creates a new session from already parsed records.
    pub fn new(records: Vec<DeliveryRecord>) -> Self {
        Self { records, state: ResolutionState::default() }
    }

    /// Creates a new session from uploaded table. Fails if the table does not follow required schema.
    pub fn upload<R: Read>(reader: BufReader<R>, normalizer: &AddressNormalizer) -> Result<Self, PipelineError> {
        read_delivery_table(reader, normalizer).map(Self::new)
    }

    /// Returns all records in upload order.
    pub fn records(&self) -> &[DeliveryRecord] {
        self.records.as_slice()
    }

    /// Returns record by its index.
    pub fn record(&self, index: usize) -> Option<&DeliveryRecord> {
        self.records.get(index)
    }

    /// Returns resolution state.
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Returns records with coordinates, in upload order, together with their indices.
    pub fn eligible(&self) -> impl Iterator<Item = (usize, &DeliveryRecord)> + '_ {
        self.records.iter().enumerate().filter(|(_, record)| record.is_eligible())
    }

    /// Returns amount of records with coordinates.
    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Returns indices of records which were never sent to geocoder.
    pub fn unresolved_indices(&self) -> Vec<usize> {
        (0..self.records.len()).filter(|index| self.state.outcome(*index).is_none()).collect()
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut DeliveryRecord> {
        self.records.get_mut(index)
    }

    pub(crate) fn records_mut(&mut self) -> &mut [DeliveryRecord] {
        self.records.as_mut_slice()
    }

    pub(crate) fn state_mut(&mut self) -> &mut ResolutionState {
        &mut self.state
    }
}
