//! This module reimports commonly used types.

pub use crate::correction::{CorrectionControl, CorrectionKind, CorrectionLedger, RetryReport};
pub use crate::geocoding::{GeoLocation, GeocodeError, GeocodeProvider, GeocodeResolver, GeocodeResult, Resolution};
pub use crate::models::{Coordinate, DeliveryRecord, PipelineError, ResolutionOutcome, Session};
pub use crate::normalization::{AddressNormalizer, extract_weight};
pub use crate::partitioning::{DriverRoster, KMeansPartitioner, Partitioner};
pub use crate::planning::{PlanRequest, PlanSettings, RoutePlan, RoutePlanner, TruckSummary};
pub use crate::utils::{DefaultRandom, Environment, GenericError, GenericResult, InfoLogger, Random};
