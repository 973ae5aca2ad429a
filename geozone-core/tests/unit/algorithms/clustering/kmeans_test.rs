use super::*;
use crate::utils::{DefaultRandom, Random};

fn create_two_groups() -> Vec<Point> {
    vec![
        Point::new(0., 0.),
        Point::new(0.1, 0.2),
        Point::new(0.2, 0.1),
        Point::new(10., 10.),
        Point::new(10.1, 9.9),
        Point::new(9.8, 10.2),
    ]
}

#[test]
fn can_separate_distant_groups() {
    let points = create_two_groups();
    let mut rng = DefaultRandom::new_repeatable().get_rng();

    let clusters = create_kmeans(points.as_slice(), 2, &KMeansSettings::default(), &mut rng).unwrap();

    assert_eq!(clusters.labels.len(), 6);
    assert_eq!(clusters.centroids.len(), 2);
    assert!(clusters.labels[..3].iter().all(|&label| label == clusters.labels[0]));
    assert!(clusters.labels[3..].iter().all(|&label| label == clusters.labels[3]));
    assert_ne!(clusters.labels[0], clusters.labels[3]);
    assert!(clusters.inertia < 1.);
}

parameterized_test! {can_refuse_invalid_k, (size, k), {
    can_refuse_invalid_k_impl(size, k);
}}

can_refuse_invalid_k! {
    case01_zero_k: (3, 0),
    case02_more_clusters_than_points: (2, 3),
    case03_empty_points: (0, 1),
}

fn can_refuse_invalid_k_impl(size: usize, k: usize) {
    let points = (0..size).map(|idx| Point::new(idx as Float, 0.)).collect::<Vec<_>>();
    let mut rng = DefaultRandom::new_repeatable().get_rng();

    assert!(create_kmeans(points.as_slice(), k, &KMeansSettings::default(), &mut rng).is_none());
}

#[test]
fn can_assign_each_point_own_cluster_when_k_equals_size() {
    let points = create_two_groups();
    let mut rng = DefaultRandom::new_repeatable().get_rng();

    let clusters = create_kmeans(points.as_slice(), points.len(), &KMeansSettings::default(), &mut rng).unwrap();

    let mut labels = clusters.labels.clone();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), points.len());
    assert_float_eq!(clusters.inertia, 0.);
}

#[test]
fn can_handle_coinciding_points() {
    let points = vec![Point::new(1., 1.); 4];
    let mut rng = DefaultRandom::new_repeatable().get_rng();

    let clusters = create_kmeans(points.as_slice(), 2, &KMeansSettings::default(), &mut rng).unwrap();

    assert!(clusters.labels.iter().all(|&label| label < 2));
    assert_float_eq!(clusters.inertia, 0.);
}

#[test]
fn can_produce_same_labels_with_same_seed() {
    let points = (0..50).map(|idx| Point::new((idx * 7 % 13) as Float, (idx * 11 % 17) as Float)).collect::<Vec<_>>();
    let settings = KMeansSettings::default();

    let run = || {
        let mut rng = DefaultRandom::new_with_seed(3).get_rng();
        create_kmeans(points.as_slice(), 4, &settings, &mut rng).unwrap().labels
    };

    assert_eq!(run(), run());
}

#[test]
fn can_assign_ties_to_lower_label() {
    let centroids = vec![Point::new(-1., 0.), Point::new(1., 0.)];

    let assignments = assign_points(&[Point::new(0., 0.)], centroids.as_slice());

    assert_eq!(assignments, vec![(0, 1.)]);
}

#[test]
fn can_reseed_empty_cluster_with_farthest_point() {
    let kmeans = KMeans { k: 2, max_iterations: 10, tolerance: 0. };
    let points = vec![Point::new(0., 0.), Point::new(1., 0.), Point::new(5., 0.)];
    let centroids = vec![Point::new(0., 0.), Point::new(100., 0.)];
    let assignments = vec![(0, 0.), (0, 1.), (0, 25.)];

    let new_centroids = kmeans.update_centroids(points.as_slice(), assignments.as_slice(), centroids.as_slice());

    assert_eq!(new_centroids, vec![Point::new(2., 0.), Point::new(5., 0.)]);
}
