use crate::utils::GenericError;
use std::fmt;

/// Specifies errors which stop the current pipeline action.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    /// Uploaded table columns do not match required schema. Fatal for the session.
    Schema {
        /// Required column names.
        expected: Vec<String>,
        /// Column names found in the table.
        actual: Vec<String>,
    },

    /// Uploaded table has a valid header, but its content cannot be read.
    InvalidTable(String),

    /// There are fewer resolved records than requested trucks.
    InsufficientEligibleRecords {
        /// Amount of records with coordinates.
        eligible: usize,
        /// Requested amount of trucks.
        trucks: usize,
    },

    /// Dispatch address cannot be geocoded. Fatal for optimization only.
    DispatchPointUnresolved {
        /// The address which failed.
        address: String,
        /// An address found by the looser query, if any.
        suggestion: Option<String>,
    },

    /// Requested amount of trucks is outside of allowed range.
    TruckCountOutOfRange {
        /// Requested amount of trucks.
        trucks: usize,
        /// Max allowed amount.
        max: usize,
    },

    /// Amount of driver names does not match amount of trucks.
    DriverRosterMismatch {
        /// Amount of driver names.
        drivers: usize,
        /// Amount of trucks.
        trucks: usize,
    },

    /// A correction is staged for a record which is not failed.
    UnknownCorrectionTarget {
        /// Record index.
        index: usize,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Schema { expected, actual } => {
                let (expected, actual) = (expected.join(", "), actual.join(", "));
                write!(f, "table must have these exact columns: [{expected}], got: [{actual}]")
            }
            Self::InvalidTable(details) => write!(f, "cannot read delivery table: {details}"),
            Self::InsufficientEligibleRecords { eligible, trucks } => write!(
                f,
                "not enough valid addresses to run optimization: {eligible} resolved, {trucks} trucks requested"
            ),
            Self::DispatchPointUnresolved { address, suggestion: Some(suggestion) } => {
                write!(f, "cannot locate dispatch point '{address}', did you mean '{suggestion}'?")
            }
            Self::DispatchPointUnresolved { address, suggestion: None } => {
                write!(f, "cannot locate dispatch point '{address}'")
            }
            Self::TruckCountOutOfRange { trucks, max } => {
                write!(f, "amount of trucks must be in range [1, {max}], got: {trucks}")
            }
            Self::DriverRosterMismatch { drivers, trucks } => {
                write!(f, "expected one driver name per truck: {drivers} names for {trucks} trucks")
            }
            Self::UnknownCorrectionTarget { index } => write!(f, "record {index} has no failed address to correct"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<PipelineError> for GenericError {
    fn from(value: PipelineError) -> Self {
        GenericError::from(value.to_string())
    }
}
