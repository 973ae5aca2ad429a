//! Contains generic algorithms which are not tied to delivery domain.

pub mod clustering;
pub mod geometry;
