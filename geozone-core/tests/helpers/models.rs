use crate::models::{Coordinate, DeliveryRecord, Session};
use crate::normalization::{AddressNormalizer, extract_weight};
use std::io::BufReader;

pub const DELIVERY_HEADER: &str = "Client,Address,Start Time,End Time,Time Type,Order and Weight";

pub fn create_record(client: &str, address: &str, order: &str) -> DeliveryRecord {
    DeliveryRecord {
        client: client.to_string(),
        raw_address: address.to_string(),
        time_window_start: "08:00".to_string(),
        time_window_end: "12:00".to_string(),
        time_type: "AM".to_string(),
        order_weight_text: order.to_string(),
        weight_kg: extract_weight(order),
        normalized_address: AddressNormalizer::default().normalize(address),
        coordinate: None,
        suggestion: None,
        assigned_truck: None,
        driver: None,
    }
}

pub fn create_resolved_record(client: &str, address: &str, weight_kg: f64, lat: f64, lng: f64) -> DeliveryRecord {
    DeliveryRecord {
        coordinate: Some(Coordinate::new(lat, lng)),
        ..create_record(client, address, format!("box {weight_kg}kg").as_str())
    }
}

/// Creates a session where every record is already resolved into given coordinate.
pub fn create_resolved_session(coordinates: &[(f64, f64)]) -> Session {
    Session::new(
        coordinates
            .iter()
            .enumerate()
            .map(|(idx, &(lat, lng))| {
                create_resolved_record(format!("client{idx}").as_str(), format!("street {idx}").as_str(), 10., lat, lng)
            })
            .collect(),
    )
}

/// Creates csv content with required header and given rows.
pub fn create_table(rows: &[&str]) -> String {
    std::iter::once(DELIVERY_HEADER).chain(rows.iter().copied()).collect::<Vec<_>>().join("\n")
}

pub fn upload_session(content: &str) -> Session {
    Session::upload(BufReader::new(content.as_bytes()), &AddressNormalizer::default()).expect("cannot upload table")
}
