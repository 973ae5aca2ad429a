//! Orchestrates the optimize action: validates the request, resolves dispatch point, partitions
//! eligible records between trucks and labels them with drivers.

#[cfg(test)]
#[path = "../../tests/unit/planning/planner_test.rs"]
mod planner_test;

use crate::geocoding::{GeoLocation, GeocodeResolver, Resolution};
use crate::models::{Coordinate, PipelineError, Session};
use crate::partitioning::{DriverRoster, Partitioner};
use crate::utils::InfoLogger;

/// A default max amount of trucks.
pub const DEFAULT_MAX_TRUCKS: usize = 20;

/// Specifies optimize action input.
#[derive(Clone, Debug)]
pub struct PlanRequest {
    /// Amount of trucks.
    pub trucks: usize,
    /// Driver names, one per truck. When omitted, trucks are named by number.
    pub drivers: Option<Vec<String>>,
    /// Address of the shared starting point.
    pub dispatch_address: String,
}

/// Specifies planning limits.
#[derive(Clone, Debug)]
pub struct PlanSettings {
    /// Max amount of trucks.
    pub max_trucks: usize,
    /// Truck capacity used to report overloaded trucks.
    pub truck_capacity_kg: Option<f64>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self { max_trucks: DEFAULT_MAX_TRUCKS, truck_capacity_kg: None }
    }
}

/// A record assigned to a truck.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedStop {
    /// Record index in the session.
    pub record_index: usize,
    /// Record coordinate.
    pub coordinate: Coordinate,
    /// Truck label.
    pub truck: usize,
    /// Driver name.
    pub driver: String,
}

/// Aggregated load of a single truck.
#[derive(Clone, Debug, PartialEq)]
pub struct TruckSummary {
    /// Truck label.
    pub truck: usize,
    /// Driver name.
    pub driver: String,
    /// Amount of stops.
    pub stops: usize,
    /// Total weight of all orders.
    pub total_weight_kg: f64,
}

/// A result of the optimize action.
#[derive(Clone, Debug)]
pub struct RoutePlan {
    /// Resolved dispatch point.
    pub dispatch: GeoLocation,
    /// Eligible records in clustering order.
    pub stops: Vec<PlannedStop>,
    /// Per truck summaries indexed by truck label.
    pub summaries: Vec<TruckSummary>,
}

/// Runs the optimize action over an editing session.
pub struct RoutePlanner<'a> {
    resolver: &'a GeocodeResolver,
    partitioner: &'a dyn Partitioner,
    settings: PlanSettings,
    logger: InfoLogger,
}

impl<'a> RoutePlanner<'a> {
    /// Creates a new instance of `RoutePlanner`.
    pub fn new(
        resolver: &'a GeocodeResolver,
        partitioner: &'a dyn Partitioner,
        settings: PlanSettings,
        logger: InfoLogger,
    ) -> Self {
        Self { resolver, partitioner, settings, logger }
    }

    /// Partitions eligible records between trucks and labels them. On error, the session is left
    /// untouched and stays usable.
    pub fn plan(&self, session: &mut Session, request: &PlanRequest) -> Result<RoutePlan, PipelineError> {
        let trucks = request.trucks;
        if trucks == 0 || trucks > self.settings.max_trucks {
            return Err(PipelineError::TruckCountOutOfRange { trucks, max: self.settings.max_trucks });
        }

        let eligible = session
            .eligible()
            .filter_map(|(index, record)| record.coordinate.map(|coordinate| (index, coordinate)))
            .collect::<Vec<_>>();

        if eligible.len() < trucks {
            return Err(PipelineError::InsufficientEligibleRecords { eligible: eligible.len(), trucks });
        }

        let roster = match request.drivers.as_deref() {
            Some(names) => DriverRoster::new(names, trucks)?,
            None => DriverRoster::anonymous(trucks),
        };

        let dispatch = self.resolve_dispatch(request.dispatch_address.as_str())?;

        let points = eligible.iter().map(|(_, coordinate)| *coordinate).collect::<Vec<_>>();
        let labels = self.partitioner.partition(points.as_slice(), trucks);

        let stops = eligible
            .into_iter()
            .zip(labels)
            .map(|((record_index, coordinate), truck)| {
                let driver = roster.name(truck).unwrap_or_default().to_string();
                PlannedStop { record_index, coordinate, truck, driver }
            })
            .collect::<Vec<_>>();

        session.records_mut().iter_mut().for_each(|record| record.clear_assignment());
        stops.iter().for_each(|stop| {
            if let Some(record) = session.record_mut(stop.record_index) {
                record.assigned_truck = Some(stop.truck);
                record.driver = Some(stop.driver.clone());
            }
        });

        let summaries = self.summarize(session, stops.as_slice(), &roster);
        (self.logger)(format!("partitioned {} stops between {trucks} trucks", stops.len()).as_str());

        Ok(RoutePlan { dispatch, stops, summaries })
    }

    fn resolve_dispatch(&self, address: &str) -> Result<GeoLocation, PipelineError> {
        match self.resolver.resolve(address) {
            Resolution::Resolved(location) => Ok(location),
            Resolution::Unresolved { suggestion } => {
                Err(PipelineError::DispatchPointUnresolved { address: address.to_string(), suggestion })
            }
        }
    }

    fn summarize(&self, session: &Session, stops: &[PlannedStop], roster: &DriverRoster) -> Vec<TruckSummary> {
        let mut summaries = (0..roster.size())
            .map(|truck| TruckSummary {
                truck,
                driver: roster.name(truck).unwrap_or_default().to_string(),
                stops: 0,
                total_weight_kg: 0.,
            })
            .collect::<Vec<_>>();

        stops.iter().for_each(|stop| {
            if let Some(summary) = summaries.get_mut(stop.truck) {
                summary.stops += 1;
                summary.total_weight_kg += session.record(stop.record_index).map_or(0., |record| record.weight_kg);
            }
        });

        if let Some(capacity) = self.settings.truck_capacity_kg {
            summaries.iter().filter(|summary| summary.total_weight_kg > capacity).for_each(|summary| {
                (self.logger)(
                    format!(
                        "truck {} ({}) is overloaded: {:.1}kg of {capacity:.1}kg",
                        summary.truck + 1,
                        summary.driver,
                        summary.total_weight_kg
                    )
                    .as_str(),
                )
            });
        }

        summaries
    }
}
