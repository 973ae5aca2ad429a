//! This module defines logic to read delivery table and write planning results as csv and geojson.

mod geo_serializer;
pub use self::geo_serializer::serialize_plan_as_geojson;

mod table_reader;
pub use self::table_reader::*;

mod table_writer;
pub use self::table_writer::*;
