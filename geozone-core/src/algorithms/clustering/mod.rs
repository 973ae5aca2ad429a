//! Contains clustering algorithms.

pub mod kmeans;
