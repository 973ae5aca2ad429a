#[cfg(test)]
#[path = "../../tests/unit/format/table_reader_test.rs"]
mod table_reader_test;

use crate::models::{DeliveryRecord, PipelineError};
use crate::normalization::{AddressNormalizer, extract_weight};
use serde::Deserialize;
use std::io::{BufReader, Read};

/// Column names the delivery table must have, in this exact order.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["Client", "Address", "Start Time", "End Time", "Time Type", "Order and Weight"];

#[derive(Debug, Deserialize)]
struct CsvDelivery {
    #[serde(rename = "Client")]
    client: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Time Type")]
    time_type: String,
    #[serde(rename = "Order and Weight")]
    order_and_weight: String,
}

/// Reads delivery records from csv table. Any deviation from required columns is a schema error.
pub fn read_delivery_table<R: Read>(
    reader: BufReader<R>,
    normalizer: &AddressNormalizer,
) -> Result<Vec<DeliveryRecord>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::None).from_reader(reader);

    let actual = reader
        .headers()
        .map_err(|err| PipelineError::InvalidTable(err.to_string()))?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    if actual.iter().map(String::as_str).ne(REQUIRED_COLUMNS.iter().copied()) {
        return Err(PipelineError::Schema {
            expected: REQUIRED_COLUMNS.iter().map(|column| column.to_string()).collect(),
            actual,
        });
    }

    reader
        .deserialize::<CsvDelivery>()
        .enumerate()
        .map(|(row, entry)| {
            entry
                .map(|entry| create_record(entry, normalizer))
                .map_err(|err| PipelineError::InvalidTable(format!("row {}: {err}", row + 1)))
        })
        .collect()
}

fn create_record(entry: CsvDelivery, normalizer: &AddressNormalizer) -> DeliveryRecord {
    DeliveryRecord {
        weight_kg: extract_weight(entry.order_and_weight.as_str()),
        normalized_address: normalizer.normalize(entry.address.as_str()),
        client: entry.client,
        raw_address: entry.address,
        time_window_start: entry.start_time,
        time_window_end: entry.end_time,
        time_type: entry.time_type,
        order_weight_text: entry.order_and_weight,
        coordinate: None,
        suggestion: None,
        assigned_truck: None,
        driver: None,
    }
}
