//! Pipeline configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

use geozone_core::algorithms::clustering::kmeans::KMeansSettings;
use geozone_core::correction::CorrectionLedger;
use geozone_core::geocoding::*;
use geozone_core::normalization::{AddressNormalizer, DEFAULT_REGION_SUFFIX};
use geozone_core::partitioning::KMeansPartitioner;
use geozone_core::planning::{DEFAULT_MAX_TRUCKS, PlanSettings};
use geozone_core::utils::{DEFAULT_SEED, Environment, GenericError, GenericResult, InfoLogger};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;
use std::time::Duration;

/// A pipeline configuration. Every section is optional: defaults are used for missing values.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Specifies geocoding configuration.
    pub geocoding: Option<GeocodingConfig>,
    /// Specifies partitioning configuration.
    pub partitioning: Option<PartitioningConfig>,
    /// Specifies fleet limits.
    pub fleet: Option<FleetConfig>,
    /// Specifies manual correction configuration.
    pub correction: Option<CorrectionConfig>,
}

/// A geocoding configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodingConfig {
    /// A locality suffix appended to every address. Default is ", Cebu, Philippines".
    pub region_suffix: Option<String>,
    /// A timeout of a single geocoding call in seconds. Default is 10.
    pub timeout_secs: Option<u64>,
    /// Nominatim base url.
    pub base_url: Option<String>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Minimal interval between requests in milliseconds. Default is 1000.
    pub min_interval_ms: Option<u64>,
}

/// A partitioning configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitioningConfig {
    /// A random seed. Default is 42.
    pub seed: Option<u64>,
    /// Max amount of iterations per run. Default is 300.
    pub max_iterations: Option<usize>,
    /// Amount of runs with different seeding. Default is 10.
    pub n_init: Option<usize>,
    /// A relative convergence tolerance. Default is 0.0001.
    pub tolerance: Option<f64>,
}

/// A fleet configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetConfig {
    /// Max amount of trucks. Default is 20.
    pub max_trucks: Option<usize>,
    /// A truck capacity used to warn about overloaded trucks. Not checked by default.
    pub truck_capacity_kg: Option<f64>,
}

/// A manual correction configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionConfig {
    /// Max amount of manual retries per record. Unlimited by default.
    pub max_attempts: Option<usize>,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates an environment with seeded randomization from config.
pub fn create_environment(config: &Config, logger: InfoLogger) -> Environment {
    let seed = config.partitioning.as_ref().and_then(|partitioning| partitioning.seed).unwrap_or(DEFAULT_SEED);

    Environment::new_with_seed(seed, logger)
}

/// Creates an address normalizer from config.
pub fn create_normalizer(config: &Config) -> AddressNormalizer {
    AddressNormalizer::new(
        config
            .geocoding
            .as_ref()
            .and_then(|geocoding| geocoding.region_suffix.clone())
            .unwrap_or_else(|| DEFAULT_REGION_SUFFIX.to_string()),
    )
}

/// Creates a Nominatim geocoding provider from config.
pub fn create_provider(config: &Config) -> GenericResult<Arc<dyn GeocodeProvider>> {
    let geocoding = config.geocoding.clone().unwrap_or_default();
    let min_interval = geocoding.min_interval_ms.map(Duration::from_millis).unwrap_or(DEFAULT_MIN_INTERVAL);

    let provider = NominatimProvider::new(
        geocoding.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        geocoding.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        min_interval,
    )
    .map_err(|err| GenericError::from(err.to_string()).with_context("cannot create geocoding provider"))?;

    Ok(Arc::new(provider))
}

/// Creates a geocode resolver which uses given provider.
pub fn create_resolver(
    config: &Config,
    provider: Arc<dyn GeocodeProvider>,
    environment: &Environment,
) -> GeocodeResolver {
    let timeout = config
        .geocoding
        .as_ref()
        .and_then(|geocoding| geocoding.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_GEOCODE_TIMEOUT);

    GeocodeResolver::new(provider, create_normalizer(config), timeout, environment.logger.clone())
}

/// Creates a k-means partitioner from config.
pub fn create_partitioner(config: &Config, environment: &Environment) -> KMeansPartitioner {
    let defaults = KMeansSettings::default();
    let settings = match config.partitioning.as_ref() {
        Some(partitioning) => KMeansSettings {
            max_iterations: partitioning.max_iterations.unwrap_or(defaults.max_iterations),
            n_init: partitioning.n_init.unwrap_or(defaults.n_init),
            tolerance: partitioning.tolerance.unwrap_or(defaults.tolerance),
        },
        None => defaults,
    };

    KMeansPartitioner::new(environment.random.clone(), settings)
}

/// Creates planning settings from config.
pub fn create_plan_settings(config: &Config) -> PlanSettings {
    let fleet = config.fleet.clone().unwrap_or_default();

    PlanSettings {
        max_trucks: fleet.max_trucks.unwrap_or(DEFAULT_MAX_TRUCKS),
        truck_capacity_kg: fleet.truck_capacity_kg,
    }
}

/// Creates a correction ledger from config.
pub fn create_correction_ledger(config: &Config) -> CorrectionLedger {
    CorrectionLedger::new(config.correction.as_ref().and_then(|correction| correction.max_attempts))
}
