use super::*;

#[test]
fn can_calculate_distance_between_points() {
    let a = Point::new(0., 0.);
    let b = Point::new(3., 4.);

    assert_float_eq!(a.distance_to_point(&b), 5.);
    assert_float_eq!(a.squared_distance_to_point(&b), 25.);
}

#[test]
fn can_calculate_centroid() {
    let points = [Point::new(0., 0.), Point::new(2., 0.), Point::new(1., 3.)];

    let centroid = Point::centroid(points.iter()).unwrap();

    assert_float_eq!(centroid.x, 1.);
    assert_float_eq!(centroid.y, 1.);
}

#[test]
fn can_return_no_centroid_for_empty_input() {
    assert_eq!(Point::centroid(std::iter::empty()), None);
}
