use plotgeom_rs::core::Point;
use plotgeom_rs::geom::{reduce_indices, PolylineSimplifier};

#[test]
fn reduction_keeps_the_first_point_and_distant_followers() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(0.3, 0.2),
        Point::new(1.5, 0.0),
        Point::new(1.6, 0.9),
        Point::new(4.0, 4.0),
    ];

    let kept = reduce_indices(&points, 1.0);
    assert_eq!(kept, vec![0, 2, 4]);
}

#[test]
fn reduction_measures_from_the_last_kept_point() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(0.6, 0.0),
        Point::new(1.2, 0.0),
        Point::new(1.8, 0.0),
    ];

    let kept = reduce_indices(&points, 1.0);
    assert_eq!(kept, vec![0, 2]);
}

#[test]
fn zero_distance_reduction_keeps_strict_duplicates_out() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
    ];

    let kept = reduce_indices(&points, 0.0);
    assert_eq!(kept, vec![0, 2]);
}

#[test]
fn simplifier_gives_endpoints_infinite_weight() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 3.0),
        Point::new(2.0, 0.0),
    ];

    let simplifier = PolylineSimplifier::douglas_peucker(&points);
    let kept = simplifier.indices_by_weight(1000.0);
    assert_eq!(kept, vec![0, 2]);
}

#[test]
fn collinear_interior_points_carry_no_weight() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
    ];

    let simplifier = PolylineSimplifier::douglas_peucker(&points);
    let kept = simplifier.indices_by_weight(1e-9);
    assert_eq!(kept, vec![0, 3]);
}

#[test]
fn deviating_points_survive_the_weight_cut() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 1.0),
        Point::new(4.0, 0.0),
    ];

    let simplifier = PolylineSimplifier::douglas_peucker(&points);
    let kept = simplifier.points_by_weight(0.5);
    assert_eq!(
        kept,
        vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(4.0, 0.0)]
    );
}

#[test]
fn count_limited_simplification_returns_ordered_indices() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.1),
        Point::new(2.0, 5.0),
        Point::new(3.0, 0.1),
        Point::new(4.0, 0.0),
    ];

    let simplifier = PolylineSimplifier::douglas_peucker(&points);
    assert_eq!(simplifier.indices_by_count(3), vec![0, 2, 4]);
    assert_eq!(simplifier.indices_by_count(100), vec![0, 1, 2, 3, 4]);
}
