use plotgeom_rs::core::{Aes, Aesthetics, CartesianCoord, Color, LineType, Point, Rect, Span};
use plotgeom_rs::geom::{
    decorate, modulate_alpha, stroke_width_by_size, stroke_width_by_stroke, DecorationOptions,
    GeomHelper,
};
use plotgeom_rs::position::{IdentityPos, NudgePos};

fn unit_coord() -> CartesianCoord {
    let x = Span::new(0.0, 100.0).expect("valid span");
    let y = Span::new(0.0, 100.0).expect("valid span");
    CartesianCoord::new(x, y, Rect::new(0.0, 0.0, 100.0, 100.0))
}

fn single_point(x: f64, y: f64) -> Aesthetics {
    Aesthetics::builder(1)
        .numeric_series(Aes::X, vec![x])
        .numeric_series(Aes::Y, vec![y])
        .build()
        .expect("valid snapshot")
}

#[test]
fn projection_adjusts_the_position_before_mapping() {
    let aesthetics = single_point(1.0, 1.0);
    let nudge = NudgePos::new(1.0, 2.0);
    let coord = unit_coord();
    let helper = GeomHelper::new(&nudge, &coord);

    let client = helper.to_client_point(&aesthetics.point(0));
    assert_eq!(client, Some(Point::new(2.0, 97.0)));
}

#[test]
fn undefined_locations_do_not_project() {
    let aesthetics = single_point(1.0, 1.0);
    let position = IdentityPos;
    let coord = unit_coord();
    let helper = GeomHelper::new(&position, &coord);

    let p = aesthetics.point(0);
    assert_eq!(helper.to_client(Point::new(f64::NAN, 1.0), &p), None);
}

#[test]
fn degenerate_rects_keep_a_visible_sliver() {
    let aesthetics = single_point(5.0, 5.0);
    let position = IdentityPos;
    let coord = unit_coord();
    let helper = GeomHelper::new(&position, &coord);

    let client = helper
        .to_client_rect(Rect::new(5.0, 5.0, 0.0, 10.0), &aesthetics.point(0))
        .expect("projectable rect");

    assert!((client.width - 0.1).abs() <= 1e-9);
    assert!((client.height - 10.0).abs() <= 1e-9);
}

#[test]
fn index_aligned_projection_keeps_holes() {
    let aesthetics = Aesthetics::builder(3)
        .numeric_series(Aes::X, vec![0.0, 1.0, 2.0])
        .numeric_series(Aes::Y, vec![0.0, f64::NAN, 0.0])
        .build()
        .expect("valid snapshot");
    let position = IdentityPos;
    let coord = unit_coord();
    let helper = GeomHelper::new(&position, &coord);

    let clients = helper.to_client_by_index(&aesthetics);
    assert_eq!(clients.len(), 3);
    assert!(clients[0].is_some());
    assert!(clients[1].is_none());
    assert!(clients[2].is_some());
}

#[test]
fn stroke_widths_double_their_driving_aesthetic() {
    let sized = Aesthetics::builder(1)
        .numeric_series(Aes::X, vec![0.0])
        .numeric_series(Aes::Y, vec![0.0])
        .numeric_constant(Aes::Size, 2.0)
        .numeric_constant(Aes::Stroke, 3.0)
        .build()
        .expect("valid snapshot");
    let p = sized.point(0);
    assert!((stroke_width_by_size(&p) - 4.0).abs() <= 1e-9);
    assert!((stroke_width_by_stroke(&p) - 6.0).abs() <= 1e-9);

    let bare = single_point(0.0, 0.0);
    let q = bare.point(0);
    assert!((stroke_width_by_size(&q) - 1.0).abs() <= 1e-9);
    assert!((stroke_width_by_stroke(&q) - 1.0).abs() <= 1e-9);
}

#[test]
fn default_decoration_strokes_black_over_a_gray_fill() {
    let aesthetics = single_point(0.0, 0.0);
    let decoration = decorate(&aesthetics.point(0), &DecorationOptions::default());

    assert_eq!(decoration.stroke, Some(Color::BLACK));
    assert_eq!(decoration.fill, Some(Color::GRAY));
    assert!((decoration.stroke_width - 1.0).abs() <= 1e-9);
    assert_eq!(decoration.dash, None);
}

#[test]
fn alpha_modulates_the_fill_but_not_the_stroke_by_default() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let green = Color::rgb(0.0, 1.0, 0.0);
    let aesthetics = Aesthetics::builder(1)
        .numeric_series(Aes::X, vec![0.0])
        .numeric_series(Aes::Y, vec![0.0])
        .color_constant(Aes::Color, red)
        .color_constant(Aes::Fill, green)
        .numeric_constant(Aes::Alpha, 0.5)
        .build()
        .expect("valid snapshot");
    let p = aesthetics.point(0);

    let decoration = decorate(&p, &DecorationOptions::default());
    assert_eq!(decoration.stroke, Some(red));
    assert_eq!(decoration.fill, Some(green.with_alpha(0.5)));

    let both = decorate(&p, &DecorationOptions::default().with_alpha_on_stroke());
    assert_eq!(both.stroke, Some(red.with_alpha(0.5)));
}

#[test]
fn translucent_colors_keep_their_own_alpha() {
    let translucent = Color::rgba(0.2, 0.4, 0.6, 0.3);
    assert_eq!(modulate_alpha(translucent, 0.5), translucent);

    let opaque = Color::rgb(0.2, 0.4, 0.6);
    assert_eq!(modulate_alpha(opaque, 0.5), opaque.with_alpha(0.5));
}

#[test]
fn blank_line_type_suppresses_the_stroke() {
    let aesthetics = Aesthetics::builder(1)
        .numeric_series(Aes::X, vec![0.0])
        .numeric_series(Aes::Y, vec![0.0])
        .line_type_constant(LineType::Blank)
        .build()
        .expect("valid snapshot");

    let decoration = decorate(&aesthetics.point(0), &DecorationOptions::default());
    assert_eq!(decoration.stroke, None);
    assert!(decoration.fill.is_some());
}

#[test]
fn line_options_skip_the_fill() {
    let aesthetics = single_point(0.0, 0.0);
    let decoration = decorate(&aesthetics.point(0), &DecorationOptions::line());
    assert_eq!(decoration.fill, None);
    assert!(decoration.stroke.is_some());
}

#[test]
fn dash_patterns_scale_with_the_stroke_width() {
    let aesthetics = Aesthetics::builder(1)
        .numeric_series(Aes::X, vec![0.0])
        .numeric_series(Aes::Y, vec![0.0])
        .line_type_constant(LineType::Dashed)
        .numeric_constant(Aes::Size, 1.0)
        .build()
        .expect("valid snapshot");

    let decoration = decorate(&aesthetics.point(0), &DecorationOptions::line());
    assert!((decoration.stroke_width - 2.0).abs() <= 1e-9);
    assert_eq!(decoration.dash, Some(vec![8.0, 8.0]));
}
