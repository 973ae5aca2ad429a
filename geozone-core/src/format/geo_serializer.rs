#[cfg(test)]
#[path = "../../tests/unit/format/geo_serializer_test.rs"]
mod geo_serializer_test;

use crate::models::{Coordinate, Session};
use crate::planning::RoutePlan;
use crate::utils::GenericResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: (f64, f64) },
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
struct Feature {
    pub properties: BTreeMap<String, String>,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Serializes route plan into geo json format: one marker per stop colored by truck and
/// a warehouse marker for dispatch point.
pub fn serialize_plan_as_geojson<W: Write>(
    writer: BufWriter<W>,
    session: &Session,
    plan: &RoutePlan,
) -> GenericResult<()> {
    let geo_json = create_geojson_plan(session, plan)?;

    serde_json::to_writer_pretty(writer, &geo_json)?;

    Ok(())
}

fn create_geojson_plan(session: &Session, plan: &RoutePlan) -> GenericResult<FeatureCollection> {
    let dispatch = Feature {
        properties: slice_to_map(&[
            ("marker-color", "#000000"),
            ("marker-size", "large"),
            ("marker-symbol", "warehouse"),
            ("name", "Dispatch"),
            ("address", plan.dispatch.formatted_address.as_str()),
        ]),
        geometry: get_point(&plan.dispatch.coordinate),
    };

    let stops = plan
        .stops
        .iter()
        .map(|stop| -> GenericResult<Feature> {
            let record = session
                .record(stop.record_index)
                .ok_or_else(|| format!("cannot find record with index {}", stop.record_index))?;
            let tooltip = format!("{} ({}) - Truck {}", record.client, record.raw_address, stop.truck + 1);

            Ok(Feature {
                properties: slice_to_map(&[
                    ("marker-color", get_color(stop.truck)),
                    ("marker-size", "medium"),
                    ("marker-symbol", "marker"),
                    ("name", tooltip.as_str()),
                    ("client", record.client.as_str()),
                    ("truck", (stop.truck + 1).to_string().as_str()),
                    ("driver", stop.driver.as_str()),
                    ("weight_kg", record.weight_kg.to_string().as_str()),
                ]),
                geometry: get_point(&stop.coordinate),
            })
        })
        .collect::<GenericResult<Vec<_>>>()?;

    Ok(FeatureCollection { features: std::iter::once(dispatch).chain(stops).collect() })
}

fn slice_to_map(vec: &[(&str, &str)]) -> BTreeMap<String, String> {
    vec.iter().map(|&(key, value)| (key.to_string(), value.to_string())).collect()
}

fn get_point(coordinate: &Coordinate) -> Geometry {
    Geometry::Point { coordinates: coordinate.to_lng_lat() }
}

fn get_color(idx: usize) -> &'static str {
    const COLOR_LIST: &[&str; 20] = &[
        "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c", "#008080", "#e6beff",
        "#9a6324", "#800000", "#808000", "#000075", "#808080", "#ffe119", "#fabebe", "#aaffc3", "#ffd8b1", "#fffac8",
    ];

    COLOR_LIST[idx % COLOR_LIST.len()]
}
