#[cfg(test)]
#[path = "../../tests/unit/format/table_writer_test.rs"]
mod table_writer_test;

use crate::models::{ResolutionOutcome, Session};
use crate::planning::RoutePlan;
use crate::utils::GenericResult;
use serde::Serialize;
use std::io::{BufWriter, Write};

const PLAN_HEADERS: [&str; 8] =
    ["Client", "Address", "Full Address", "Latitude", "Longitude", "Weight (kg)", "Assigned Truck", "Driver"];

const RESOLUTION_HEADERS: [&str; 8] =
    ["Index", "Client", "Address", "Full Address", "Status", "Latitude", "Longitude", "Suggestion"];

#[derive(Serialize)]
struct CsvPlannedStop<'a> {
    #[serde(rename = "Client")]
    client: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Full Address")]
    full_address: &'a str,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Weight (kg)")]
    weight_kg: f64,
    #[serde(rename = "Assigned Truck")]
    assigned_truck: usize,
    #[serde(rename = "Driver")]
    driver: &'a str,
}

#[derive(Serialize)]
struct CsvResolution<'a> {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "Client")]
    client: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Full Address")]
    full_address: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Suggestion")]
    suggestion: Option<&'a str>,
}

/// Writes planned stops as csv table in clustering order.
pub fn write_plan_table<W: Write>(writer: BufWriter<W>, session: &Session, plan: &RoutePlan) -> GenericResult<()> {
    let mut writer = create_csv_writer(writer, &PLAN_HEADERS)?;

    for stop in plan.stops.iter() {
        let record = session
            .record(stop.record_index)
            .ok_or_else(|| format!("cannot find record with index {}", stop.record_index))?;

        writer.serialize(CsvPlannedStop {
            client: record.client.as_str(),
            address: record.raw_address.as_str(),
            full_address: record.normalized_address.as_str(),
            latitude: stop.coordinate.lat,
            longitude: stop.coordinate.lng,
            weight_kg: record.weight_kg,
            assigned_truck: stop.truck,
            driver: stop.driver.as_str(),
        })?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes resolution outcome of every record as csv table in upload order. The header is written
/// even when the session has no records.
pub fn write_resolution_report<W: Write>(writer: BufWriter<W>, session: &Session) -> GenericResult<()> {
    let mut writer = create_csv_writer(writer, &RESOLUTION_HEADERS)?;

    for (index, record) in session.records().iter().enumerate() {
        let status = match session.state().outcome(index) {
            Some(ResolutionOutcome::Resolved(_)) => "resolved",
            Some(ResolutionOutcome::Failed { suggestion: Some(_) }) => "suggested",
            Some(ResolutionOutcome::Failed { suggestion: None }) => "failed",
            None => "pending",
        };

        writer.serialize(CsvResolution {
            index,
            client: record.client.as_str(),
            address: record.raw_address.as_str(),
            full_address: record.normalized_address.as_str(),
            status,
            latitude: record.coordinate.map(|coordinate| coordinate.lat),
            longitude: record.coordinate.map(|coordinate| coordinate.lng),
            suggestion: record.suggestion.as_deref(),
        })?;
    }

    writer.flush()?;

    Ok(())
}

fn create_csv_writer<W: Write>(writer: BufWriter<W>, headers: &[&str]) -> GenericResult<csv::Writer<BufWriter<W>>> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(headers)?;

    Ok(writer)
}
