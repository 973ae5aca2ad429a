//! Splits resolved delivery points between trucks.

#[cfg(test)]
#[path = "../../tests/unit/partitioning/partitioner_test.rs"]
mod partitioner_test;

mod drivers;
pub use self::drivers::DriverRoster;

use crate::algorithms::clustering::kmeans::{KMeansSettings, create_kmeans};
use crate::algorithms::geometry::Point;
use crate::models::Coordinate;
use crate::utils::Random;
use std::sync::Arc;

/// Partitions points into `k` labeled groups.
pub trait Partitioner {
    /// Returns a label in `[0, k)` per point, in input order. Expects `points.len() >= k`:
    /// callers must refuse to partition otherwise.
    fn partition(&self, points: &[Coordinate], k: usize) -> Vec<usize>;
}

/// A partitioner which uses K-Means over latitude/longitude plane treated as Euclidean.
/// Identical input always produces identical labels as the random source is expected to be seeded.
pub struct KMeansPartitioner {
    random: Arc<dyn Random>,
    settings: KMeansSettings,
}

impl KMeansPartitioner {
    /// Creates a new instance of `KMeansPartitioner`.
    pub fn new(random: Arc<dyn Random>, settings: KMeansSettings) -> Self {
        Self { random, settings }
    }
}

impl Partitioner for KMeansPartitioner {
    fn partition(&self, points: &[Coordinate], k: usize) -> Vec<usize> {
        let points = points.iter().map(|coordinate| Point::new(coordinate.lng, coordinate.lat)).collect::<Vec<_>>();
        let mut rng = self.random.get_rng();

        create_kmeans(points.as_slice(), k, &self.settings, &mut rng)
            .map(|clusters| clusters.labels)
            .unwrap_or_else(|| (0..points.len()).map(|idx| idx.min(k.saturating_sub(1))).collect())
    }
}
