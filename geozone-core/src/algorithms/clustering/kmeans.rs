//! This module contains a basic K-Means algorithm implementation with k-means++ seeding.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/clustering/kmeans_test.rs"]
mod kmeans_test;

use crate::algorithms::geometry::Point;
use crate::utils::{Float, parallel_collect, sample_weighted};
use rand::Rng;

/// Specifies K-Means algorithm settings.
#[derive(Clone, Debug)]
pub struct KMeansSettings {
    /// Max amount of relocation iterations per run.
    pub max_iterations: usize,
    /// Amount of runs with different seeding. The run with the lowest inertia wins.
    pub n_init: usize,
    /// Relative tolerance: convergence threshold is this value scaled by mean variance of the data.
    pub tolerance: Float,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self { max_iterations: 300, n_init: 10, tolerance: 1E-4 }
    }
}

/// A result of K-Means clustering.
#[derive(Clone, Debug)]
pub struct Clusters {
    /// A cluster label per input point, in input order.
    pub labels: Vec<usize>,
    /// Cluster centroids indexed by label.
    pub centroids: Vec<Point>,
    /// Sum of squared distances from points to their centroids.
    pub inertia: Float,
}

/// Creates `k` clusters of data points using the K-Means algorithm.
/// Returns `None` when there are fewer points than clusters or `k` is zero.
pub fn create_kmeans<R: Rng>(points: &[Point], k: usize, settings: &KMeansSettings, rng: &mut R) -> Option<Clusters> {
    if k == 0 || points.len() < k {
        return None;
    }

    let tolerance = settings.tolerance * get_mean_variance(points);
    let kmeans = KMeans { k, max_iterations: settings.max_iterations, tolerance };

    (0..settings.n_init.max(1)).map(|_| kmeans.calculate(points, rng)).min_by(|a, b| a.inertia.total_cmp(&b.inertia))
}

struct KMeans {
    k: usize,
    max_iterations: usize,
    tolerance: Float,
}

impl KMeans {
    fn calculate<R: Rng>(&self, points: &[Point], rng: &mut R) -> Clusters {
        let mut centroids = self.initialize_centroids(points, rng);
        let mut assignments = assign_points(points, centroids.as_slice());

        for _ in 0..self.max_iterations {
            let new_centroids = self.update_centroids(points, assignments.as_slice(), centroids.as_slice());
            let shift = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(old, new)| old.squared_distance_to_point(new))
                .sum::<Float>();

            centroids = new_centroids;
            assignments = assign_points(points, centroids.as_slice());

            if shift <= self.tolerance {
                break;
            }
        }

        let inertia = assignments.iter().map(|(_, distance)| *distance).sum();
        let labels = assignments.into_iter().map(|(label, _)| label).collect();

        Clusters { labels, centroids, inertia }
    }

    /// Selects initial centroids using k-means++: every next centroid is sampled with probability
    /// proportional to squared distance to the closest already selected one.
    fn initialize_centroids<R: Rng>(&self, points: &[Point], rng: &mut R) -> Vec<Point> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(points[rng.gen_range(0..points.len())].clone());

        let mut distances =
            points.iter().map(|point| point.squared_distance_to_point(&centroids[0])).collect::<Vec<_>>();

        while centroids.len() < self.k {
            // all points coincide with selected centroids
            let next = sample_weighted(rng, distances.as_slice()).unwrap_or_else(|| rng.gen_range(0..points.len()));
            let centroid = points[next].clone();

            distances.iter_mut().zip(points.iter()).for_each(|(distance, point)| {
                *distance = distance.min(point.squared_distance_to_point(&centroid));
            });

            centroids.push(centroid);
        }

        centroids
    }

    /// Moves centroids to the mean of their points. Empty clusters are re-seeded with the points
    /// farthest from their current centroids.
    fn update_centroids(&self, points: &[Point], assignments: &[(usize, Float)], centroids: &[Point]) -> Vec<Point> {
        let mut new_centroids = (0..self.k)
            .map(|label| {
                Point::centroid(
                    points.iter().zip(assignments.iter()).filter(|(_, (other, _))| *other == label).map(|(p, _)| p),
                )
            })
            .collect::<Vec<_>>();

        if new_centroids.iter().any(Option::is_none) {
            let mut farthest =
                assignments.iter().enumerate().map(|(idx, (_, distance))| (idx, *distance)).collect::<Vec<_>>();
            farthest.sort_by(|(a_idx, a), (b_idx, b)| b.total_cmp(a).then(a_idx.cmp(b_idx)));
            let mut farthest = farthest.into_iter();

            new_centroids.iter_mut().filter(|centroid| centroid.is_none()).for_each(|centroid| {
                *centroid = farthest.next().map(|(idx, _)| points[idx].clone());
            });
        }

        new_centroids
            .into_iter()
            .zip(centroids.iter())
            .map(|(new_centroid, old_centroid)| new_centroid.unwrap_or_else(|| old_centroid.clone()))
            .collect()
    }
}

/// Assigns every point to its nearest centroid. Ties are resolved in favor of the lower label.
fn assign_points(points: &[Point], centroids: &[Point]) -> Vec<(usize, Float)> {
    parallel_collect(points, |point| {
        centroids
            .iter()
            .enumerate()
            .map(|(label, centroid)| (label, point.squared_distance_to_point(centroid)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap_or((0, Float::MAX))
    })
}

fn get_mean_variance(points: &[Point]) -> Float {
    let Some(mean) = Point::centroid(points.iter()) else {
        return 0.;
    };

    let (var_x, var_y) = points.iter().fold((0., 0.), |(var_x, var_y), point| {
        (var_x + (point.x - mean.x).powi(2), var_y + (point.y - mean.y).powi(2))
    });

    (var_x + var_y) / (2. * points.len() as Float)
}
