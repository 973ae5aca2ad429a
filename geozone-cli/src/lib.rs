//! A library part of command line interface: configuration, interactive correction loop and
//! pipeline runners used by the commands.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod extensions;

pub use geozone_core;
