use plotgeom_rs::core::{
    Aes, Aesthetics, CartesianCoord, Color, Point, PolarCoord, Rect, Span,
};
use plotgeom_rs::geom::{GeomHelper, PathBuilder, PathFlavor, StepDirection};
use plotgeom_rs::position::IdentityPos;

fn unit_coord() -> CartesianCoord {
    let x = Span::new(0.0, 100.0).expect("valid span");
    let y = Span::new(0.0, 100.0).expect("valid span");
    CartesianCoord::new(x, y, Rect::new(0.0, 0.0, 100.0, 100.0))
}

fn flat_line(xs: Vec<f64>, groups: Vec<i32>) -> Aesthetics {
    let count = xs.len();
    Aesthetics::builder(count)
        .numeric_series(Aes::X, xs)
        .numeric_series(Aes::Y, vec![0.0; count])
        .group_series(groups)
        .build()
        .expect("valid snapshot")
}

#[test]
fn paths_group_by_id_and_sort_along_x() {
    let aesthetics = flat_line(vec![3.0, 1.0, 2.0, 0.0], vec![0, 0, 1, 1]);
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let groups = builder.variadic_paths(&aesthetics, true);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 1);
    assert_eq!(
        groups[0][0].coordinates(),
        vec![Point::new(1.0, 100.0), Point::new(3.0, 100.0)]
    );
    assert_eq!(
        groups[1][0].coordinates(),
        vec![Point::new(0.0, 100.0), Point::new(2.0, 100.0)]
    );
}

#[test]
fn style_changes_split_runs_at_interpolated_joints() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let blue = Color::rgb(0.0, 0.0, 1.0);
    let aesthetics = Aesthetics::builder(4)
        .numeric_series(Aes::X, vec![0.0, 10.0, 20.0, 30.0])
        .numeric_series(Aes::Y, vec![0.0; 4])
        .color_series(Aes::Color, vec![red, red, blue, blue])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let groups = builder.variadic_paths(&aesthetics, false);

    assert_eq!(groups.len(), 1);
    let runs = &groups[0];
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].len(), 3);
    assert_eq!(runs[1].len(), 3);

    let joint = Point::new(15.0, 100.0);
    assert_eq!(runs[0].points()[2].coord, joint);
    assert_eq!(runs[1].points()[0].coord, joint);
    assert_eq!(runs[0].aes().color(), Some(red));
    assert_eq!(runs[1].aes().color(), Some(blue));
}

#[test]
fn sub_pixel_vertices_collapse_into_one() {
    let aesthetics = flat_line(vec![0.0, 0.5, 10.0], vec![0, 0, 0]);
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let groups = builder.variadic_paths(&aesthetics, false);

    assert_eq!(
        groups[0][0].coordinates(),
        vec![Point::new(0.0, 100.0), Point::new(10.0, 100.0)]
    );
}

#[test]
fn undefined_points_drop_out_of_the_polyline() {
    let aesthetics = Aesthetics::builder(3)
        .numeric_series(Aes::X, vec![0.0, 10.0, 20.0])
        .numeric_series(Aes::Y, vec![0.0, f64::NAN, 0.0])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let groups = builder.variadic_paths(&aesthetics, false);

    assert_eq!(
        groups[0][0].coordinates(),
        vec![Point::new(0.0, 100.0), Point::new(20.0, 100.0)]
    );
}

#[test]
fn steps_insert_corners_between_vertices() {
    let aesthetics = Aesthetics::builder(2)
        .numeric_series(Aes::X, vec![0.0, 10.0])
        .numeric_series(Aes::Y, vec![0.0, 5.0])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let after = builder.steps(&aesthetics, StepDirection::HorizontalThenVertical, true);
    assert_eq!(after.len(), 1);
    assert_eq!(
        after[0].coordinates(),
        vec![
            Point::new(0.0, 100.0),
            Point::new(10.0, 100.0),
            Point::new(10.0, 95.0),
        ]
    );

    let before = builder.steps(&aesthetics, StepDirection::VerticalThenHorizontal, true);
    assert_eq!(
        before[0].coordinates(),
        vec![
            Point::new(0.0, 100.0),
            Point::new(0.0, 95.0),
            Point::new(10.0, 95.0),
        ]
    );
}

#[test]
fn polygon_rings_split_on_the_starting_vertex() {
    let aesthetics = Aesthetics::builder(8)
        .numeric_series(
            Aes::X,
            vec![0.0, 10.0, 10.0, 0.0, 0.0, 2.0, 4.0, 4.0],
        )
        .numeric_series(
            Aes::Y,
            vec![0.0, 0.0, 10.0, 10.0, 0.0, 2.0, 2.0, 4.0],
        )
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let polygons = builder.polygons(&aesthetics);

    assert_eq!(polygons.len(), 1);
    let rings = polygons[0].rings();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].len(), 4);
    assert_eq!(rings[0][0], Point::new(0.0, 100.0));
    assert_eq!(
        rings[1],
        vec![
            Point::new(2.0, 98.0),
            Point::new(4.0, 98.0),
            Point::new(4.0, 96.0),
        ]
    );
}

#[test]
fn degenerate_rings_are_dropped() {
    let aesthetics = flat_line(vec![0.0, 10.0], vec![0, 0]);
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    assert!(builder.polygons(&aesthetics).is_empty());
}

#[test]
fn bands_walk_the_upper_border_forward_and_the_lower_back() {
    let aesthetics = Aesthetics::builder(2)
        .numeric_series(Aes::X, vec![0.0, 10.0])
        .numeric_series(Aes::Y, vec![5.0, 8.0])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let bands = builder
        .bands(
            &aesthetics,
            |p| p.finite_location(),
            |p| p.x().map(|x| Point::new(x, 0.0)),
            false,
        )
        .expect("matched borders");

    assert_eq!(bands.len(), 1);
    assert_eq!(
        bands[0].rings()[0],
        vec![
            Point::new(0.0, 95.0),
            Point::new(10.0, 92.0),
            Point::new(10.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    );
}

#[test]
fn bands_reject_mismatched_borders() {
    let aesthetics = Aesthetics::builder(2)
        .numeric_series(Aes::X, vec![0.0, 10.0])
        .numeric_series(Aes::Y, vec![5.0, 8.0])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let builder = PathBuilder::direct(GeomHelper::new(&position, &coord));

    let error = builder
        .bands(
            &aesthetics,
            |p| p.finite_location(),
            |p| p.x().and_then(|x| (x > 5.0).then(|| Point::new(x, 0.0))),
            false,
        )
        .expect_err("mismatched borders");

    assert!(error.to_string().contains("upper"));
}

#[test]
fn path_flavor_follows_coordinate_linearity() {
    let cartesian = unit_coord();
    assert_eq!(PathFlavor::for_coord(&cartesian), PathFlavor::Direct);

    let x = Span::new(0.0, 1.0).expect("valid span");
    let y = Span::new(0.0, 1.0).expect("valid span");
    let polar = PolarCoord::new(x, y, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(matches!(
        PathFlavor::for_coord(&polar),
        PathFlavor::Resampled { .. }
    ));
}
