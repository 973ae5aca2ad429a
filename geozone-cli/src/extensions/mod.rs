//! Contains command line extensions over the core crate.

pub mod config;
pub mod interactive;
pub mod pipeline;
