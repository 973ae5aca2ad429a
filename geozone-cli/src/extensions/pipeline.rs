//! Runs pipeline actions over an uploaded delivery table.

#[cfg(test)]
#[path = "../../tests/unit/extensions/pipeline_test.rs"]
mod pipeline_test;

use super::config::*;
use super::interactive::{Prompt, ask_dispatch_address, run_correction_rounds};
use geozone_core::geocoding::GeocodeProvider;
use geozone_core::models::{PipelineError, Session};
use geozone_core::planning::{PlanRequest, RoutePlan, RoutePlanner};
use geozone_core::utils::{GenericError, GenericResult, InfoLogger};
use std::io::{BufReader, Read};
use std::sync::Arc;

/// Basic statistics of an uploaded table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSummary {
    /// Amount of rows.
    pub rows: usize,
    /// Total weight of all orders.
    pub total_weight_kg: f64,
}

/// A result of the planning run.
pub struct PlanningResult {
    /// The session with resolved and labeled records.
    pub session: Session,
    /// A route plan.
    pub plan: RoutePlan,
}

/// Validates table schema and summarizes its content without geocoding.
pub fn check_table<R: Read>(table: BufReader<R>, config: &Config) -> GenericResult<TableSummary> {
    let session = upload_session(table, config)?;

    Ok(TableSummary {
        rows: session.records().len(),
        total_weight_kg: session.records().iter().map(|record| record.weight_kg).sum(),
    })
}

/// Uploads table and runs a single geocoding pass.
pub fn run_geocoding<R: Read>(
    table: BufReader<R>,
    config: &Config,
    provider: Arc<dyn GeocodeProvider>,
    logger: InfoLogger,
) -> GenericResult<Session> {
    let mut session = upload_session(table, config)?;
    let environment = create_environment(config, logger);
    let resolver = create_resolver(config, provider, &environment);

    let report = resolver.resolve_session(&mut session);
    (environment.logger)(
        format!("geocoding pass: {} resolved, {} failed", report.resolved.len(), report.failed.len()).as_str(),
    );

    Ok(session)
}

/// Uploads table, geocodes it, optionally asks for corrections and runs the optimize action.
/// With a prompt, an unresolved dispatch point or too few resolved addresses lead back to the
/// prompt on the same session. An empty answer stops the run with the planning error.
pub fn run_planning<R: Read>(
    table: BufReader<R>,
    config: &Config,
    provider: Arc<dyn GeocodeProvider>,
    request: &PlanRequest,
    mut prompt: Option<&mut Prompt>,
    logger: InfoLogger,
) -> GenericResult<PlanningResult> {
    let mut session = upload_session(table, config)?;
    let environment = create_environment(config, logger);
    let resolver = create_resolver(config, provider, &environment);
    let ledger = create_correction_ledger(config);
    let partitioner = create_partitioner(config, &environment);

    let report = resolver.resolve_session(&mut session);
    (environment.logger)(
        format!("geocoding pass: {} resolved, {} failed", report.resolved.len(), report.failed.len()).as_str(),
    );

    if let Some(prompt) = prompt.as_deref_mut() {
        let resolved = run_correction_rounds(&mut session, &ledger, &resolver, prompt)?;
        (environment.logger)(format!("manual corrections resolved {resolved} address(es)").as_str());
    }

    let excluded = session.records().len() - session.eligible_count();
    if excluded > 0 {
        (environment.logger)(format!("{excluded} address(es) are excluded from planning").as_str());
    }

    let planner = RoutePlanner::new(&resolver, &partitioner, create_plan_settings(config), environment.logger.clone());
    let mut request = request.clone();

    loop {
        let err = match planner.plan(&mut session, &request) {
            Ok(plan) => return Ok(PlanningResult { session, plan }),
            Err(err) => err,
        };

        let Some(prompt) = prompt.as_deref_mut() else {
            return Err(err.into());
        };

        match &err {
            PipelineError::DispatchPointUnresolved { address, suggestion } => {
                match ask_dispatch_address(prompt, address, suggestion.as_deref())? {
                    Some(address) => request.dispatch_address = address,
                    None => return Err(err.into()),
                }
            }
            PipelineError::InsufficientEligibleRecords { .. } => {
                (environment.logger)(err.to_string().as_str());
                if run_correction_rounds(&mut session, &ledger, &resolver, prompt)? == 0 {
                    return Err(err.into());
                }
            }
            _ => return Err(err.into()),
        }
    }
}

fn upload_session<R: Read>(table: BufReader<R>, config: &Config) -> GenericResult<Session> {
    Session::upload(table, &create_normalizer(config)).map_err(GenericError::from)
}
