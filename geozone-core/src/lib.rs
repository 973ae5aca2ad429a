//! Core crate contains building blocks to turn an uploaded table of delivery stops into truck sized
//! groups: address normalization, geocoding with fallback and manual correction, and K-Means based
//! partitioning.
//!
//! A typical flow:
//! - create a [`Session`](models::Session) from the uploaded table
//! - run initial geocoding pass with [`GeocodeResolver`](geocoding::GeocodeResolver)
//! - stage corrections and retry them with [`CorrectionLedger`](correction::CorrectionLedger)
//! - run [`RoutePlanner`](planning::RoutePlanner) and export the plan using [`format`] functions

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod algorithms;
pub mod correction;
pub mod format;
pub mod geocoding;
pub mod models;
pub mod normalization;
pub mod partitioning;
pub mod planning;
pub mod prelude;
pub mod utils;
