use plotgeom_rs::core::{
    Aes, Color, ContinuousTransform, DataValue, DiscreteTransform, Mapper, Scale, ScaleBreaks,
    Span, Transform,
};
use plotgeom_rs::core::scale::linear_breaks;

#[test]
fn log10_transform_round_trips_positive_values() {
    let transform = ContinuousTransform::log10();

    let transformed = transform.apply(100.0).expect("in domain");
    assert!((transformed - 2.0).abs() <= 1e-12);
    assert!((transform.invert(transformed) - 100.0).abs() <= 1e-9);
}

#[test]
fn log10_transform_drops_non_positive_values() {
    let transform = ContinuousTransform::log10();

    assert_eq!(transform.apply(0.0), None);
    assert_eq!(transform.apply(-5.0), None);
    assert_eq!(transform.apply(f64::NAN), None);
}

#[test]
fn defined_limits_are_carried_into_transformed_space() {
    let transform = ContinuousTransform::log10().with_limits(Some(10.0), Some(1000.0));

    let (lower, upper) = transform.defined_limits();
    assert!((lower.expect("lower limit") - 1.0).abs() <= 1e-12);
    assert!((upper.expect("upper limit") - 3.0).abs() <= 1e-12);
}

#[test]
fn discrete_transform_indexes_levels_in_order() {
    let transform = DiscreteTransform::new(vec![
        "a".to_owned(),
        "b".to_owned(),
        "a".to_owned(),
        "c".to_owned(),
    ]);

    assert_eq!(transform.levels(), ["a", "b", "c"]);
    assert_eq!(transform.apply("b"), Some(1.0));
    assert_eq!(transform.apply("missing"), None);

    let domain = transform.effective_domain().expect("has levels");
    assert_eq!(domain.lower(), 0.0);
    assert_eq!(domain.upper(), 2.0);
}

#[test]
fn empty_discrete_transform_has_no_domain() {
    let transform = DiscreteTransform::new(Vec::new());
    assert_eq!(transform.effective_domain(), None);
}

#[test]
fn linear_breaks_snap_to_a_nice_grid() {
    let span = Span::new(0.0, 10.0).expect("valid span");
    let breaks = linear_breaks(span, 5);

    assert_eq!(breaks.values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(breaks.labels.first().map(String::as_str), Some("0"));
    assert_eq!(breaks.labels.last().map(String::as_str), Some("10"));
}

#[test]
fn linear_breaks_of_degenerate_span_yield_its_center() {
    let span = Span::singleton(4.0).expect("valid span");
    let breaks = linear_breaks(span, 5);

    assert_eq!(breaks.values, vec![4.0]);
}

#[test]
fn continuous_mapper_interpolates_and_clamps() {
    let mapper = Mapper::Continuous {
        domain: Span::new(0.0, 10.0).expect("valid span"),
        range_lower: 0.0,
        range_upper: 100.0,
    };

    assert_eq!(mapper.map_numeric(5.0), Some(50.0));
    assert_eq!(mapper.map_numeric(20.0), Some(100.0));
    assert_eq!(mapper.map_numeric(-1.0), Some(0.0));
    assert_eq!(mapper.map_numeric(f64::NAN), None);
    assert_eq!(mapper.map_color(5.0), None);
}

#[test]
fn color_gradient_interpolates_channels() {
    let mapper = Mapper::ColorGradient {
        domain: Span::new(0.0, 1.0).expect("valid span"),
        low: Color::BLACK,
        high: Color::WHITE,
    };

    let mid = mapper.map_color(0.5).expect("in domain");
    assert!((mid.red - 0.5).abs() <= 1e-12);
    assert!((mid.green - 0.5).abs() <= 1e-12);
    assert!((mid.blue - 0.5).abs() <= 1e-12);
    assert!(mapper.is_continuous_color());
    assert!(!Mapper::IdentityNumeric.is_continuous_color());
}

#[test]
fn discrete_mappers_pick_by_level_index() {
    let numeric = Mapper::DiscreteNumeric {
        values: vec![3.0, 6.0],
    };
    let colors = Mapper::DiscreteColors {
        colors: vec![Color::BLACK, Color::WHITE],
    };

    assert_eq!(numeric.map_numeric(1.0), Some(6.0));
    assert_eq!(numeric.map_numeric(-1.0), None);
    assert_eq!(numeric.map_numeric(2.0), None);
    assert_eq!(colors.map_color(0.0), Some(Color::BLACK));
}

#[test]
fn scale_transform_value_handles_both_transform_families() {
    let continuous = Scale::continuous("x", Aes::X);
    let discrete = Scale::discrete(
        "group",
        Aes::Color,
        vec!["a".to_owned(), "b".to_owned()],
    );

    assert_eq!(
        continuous.transform_value(&DataValue::Number(4.0)),
        Some(4.0)
    );
    assert_eq!(continuous.transform_value(&DataValue::Text("a".to_owned())), None);
    assert_eq!(
        discrete.transform_value(&DataValue::Text("b".to_owned())),
        Some(1.0)
    );
    assert_eq!(discrete.transform_value(&DataValue::Text("z".to_owned())), None);
}

#[test]
fn explicit_breaks_override_guide_breaks() {
    let breaks = ScaleBreaks::new(vec![1.0], vec!["one".to_owned()]).expect("valid breaks");
    let scale = Scale::continuous("x", Aes::X).with_breaks(breaks);

    let guide = scale.guide_breaks(Span::new(0.0, 100.0).expect("valid span"), 5);
    assert_eq!(guide.values, vec![1.0]);
    assert_eq!(guide.labels, vec!["one".to_owned()]);
}

#[test]
fn discrete_guide_breaks_are_the_levels() {
    let scale = Scale::discrete(
        "group",
        Aes::Color,
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
    );

    let guide = scale.guide_breaks(Span::new(0.0, 2.0).expect("valid span"), 5);
    assert_eq!(guide.values, vec![0.0, 1.0, 2.0]);
    assert_eq!(guide.labels, vec!["a", "b", "c"]);
}

#[test]
fn scale_breaks_reject_mismatched_lengths() {
    assert!(ScaleBreaks::new(vec![1.0, 2.0], vec!["one".to_owned()]).is_err());
}

#[test]
fn scale_families_carry_their_expansion_defaults() {
    let continuous = Scale::continuous("x", Aes::X);
    let discrete = Scale::discrete("x", Aes::X, vec!["a".to_owned()]);

    assert_eq!(continuous.multiplicative_expand(), 0.05);
    assert_eq!(continuous.additive_expand(), 0.0);
    assert_eq!(discrete.multiplicative_expand(), 0.0);
    assert_eq!(discrete.additive_expand(), 0.6);
    assert!(continuous.transform().is_continuous());
    assert!(discrete.transform().is_discrete());
}

#[test]
fn identity_transform_passes_values_through() {
    let transform = Transform::Continuous(ContinuousTransform::identity());
    assert!(transform.is_continuous());

    let scale = Scale::continuous("x", Aes::X).with_transform(transform);
    assert_eq!(scale.transform_value(&DataValue::Number(-3.5)), Some(-3.5));
}
