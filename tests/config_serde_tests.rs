use plotgeom_rs::assemble::{GeomKind, GuideSpec, LegendDirection, LegendOptions};
use plotgeom_rs::core::CoordKind;
use plotgeom_rs::geom::StepDirection;
use plotgeom_rs::interaction::{LookupSpace, LookupStrategy, TipKind};
use plotgeom_rs::position::{PositionSpec, StackingMode, DEFAULT_JITTER_SEED};
use plotgeom_rs::theme::Theme;

#[test]
fn geom_kinds_use_snake_case_names() {
    let json = serde_json::to_string(&GeomKind::LiveMap).expect("serialize");
    assert_eq!(json, "\"live_map\"");

    let parsed: GeomKind = serde_json::from_str("\"band\"").expect("deserialize");
    assert_eq!(parsed, GeomKind::Band);
    assert!(serde_json::from_str::<GeomKind>("\"pie\"").is_err());
}

#[test]
fn position_specs_tag_their_kind() {
    let spec: PositionSpec = serde_json::from_str("{\"kind\":\"identity\"}").expect("deserialize");
    assert_eq!(spec, PositionSpec::Identity);

    let spec: PositionSpec =
        serde_json::from_str("{\"kind\":\"nudge\",\"x\":1.5}").expect("deserialize");
    assert_eq!(spec, PositionSpec::Nudge { x: 1.5, y: 0.0 });

    let round_trip = PositionSpec::JitterDodge {
        dodge_width: Some(0.8),
        jitter_width: Some(0.2),
        jitter_height: None,
        seed: 99,
    };
    let json = serde_json::to_string(&round_trip).expect("serialize");
    let parsed: PositionSpec = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, round_trip);
}

#[test]
fn jitter_specs_default_to_the_fixed_seed() {
    let spec: PositionSpec = serde_json::from_str("{\"kind\":\"jitter\"}").expect("deserialize");
    assert_eq!(
        spec,
        PositionSpec::Jitter {
            width: None,
            height: None,
            seed: DEFAULT_JITTER_SEED,
        }
    );
}

#[test]
fn stack_specs_default_to_grouped_mode() {
    let spec: PositionSpec = serde_json::from_str("{\"kind\":\"stack\"}").expect("deserialize");
    assert_eq!(
        spec,
        PositionSpec::Stack {
            mode: StackingMode::Groups,
        }
    );

    let spec: PositionSpec =
        serde_json::from_str("{\"kind\":\"fill\",\"mode\":\"all\"}").expect("deserialize");
    assert_eq!(
        spec,
        PositionSpec::Fill {
            mode: StackingMode::All,
        }
    );
}

#[test]
fn guide_specs_tag_their_kind() {
    let guide: GuideSpec = serde_json::from_str("{\"kind\":\"auto\"}").expect("deserialize");
    assert_eq!(guide, GuideSpec::Auto);

    let guide: GuideSpec = serde_json::from_str("{\"kind\":\"none\"}").expect("deserialize");
    assert_eq!(guide, GuideSpec::None);

    let guide: GuideSpec =
        serde_json::from_str("{\"kind\":\"legend\",\"row_count\":2,\"by_row\":true}")
            .expect("deserialize");
    let GuideSpec::Legend(options) = guide else {
        panic!("expected a legend guide");
    };
    assert_eq!(options.row_count, Some(2));
    assert_eq!(options.col_count, None);
    assert!(options.by_row);

    let guide: GuideSpec =
        serde_json::from_str("{\"kind\":\"color_bar\",\"bin_count\":8}").expect("deserialize");
    let GuideSpec::ColorBar(options) = guide else {
        panic!("expected a color bar guide");
    };
    assert_eq!(options.bin_count, 8);
    assert_eq!(options.width, None);
}

#[test]
fn legend_options_fill_missing_fields() {
    let options: LegendOptions = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(options, LegendOptions::default());
    assert_eq!(options.direction, LegendDirection::Auto);

    let options: LegendOptions =
        serde_json::from_str("{\"direction\":\"horizontal\"}").expect("deserialize");
    assert_eq!(options.direction, LegendDirection::Horizontal);
}

#[test]
fn coordinate_and_step_names_are_snake_case() {
    let json = serde_json::to_string(&CoordKind::Polar).expect("serialize");
    assert_eq!(json, "\"polar\"");
    let parsed: CoordKind = serde_json::from_str("\"flipped\"").expect("deserialize");
    assert_eq!(parsed, CoordKind::Flipped);

    let json = serde_json::to_string(&StepDirection::VerticalThenHorizontal).expect("serialize");
    assert_eq!(json, "\"vertical_then_horizontal\"");
    assert_eq!(StepDirection::default(), StepDirection::HorizontalThenVertical);
}

#[test]
fn lookup_enums_use_snake_case() {
    let json = serde_json::to_string(&LookupSpace::Xy).expect("serialize");
    assert_eq!(json, "\"xy\"");
    let json = serde_json::to_string(&LookupStrategy::Hover).expect("serialize");
    assert_eq!(json, "\"hover\"");
    let json = serde_json::to_string(&TipKind::XAxis).expect("serialize");
    assert_eq!(json, "\"x_axis\"");
    assert_eq!(TipKind::default(), TipKind::Vertical);
}

#[test]
fn themes_round_trip_through_json() {
    let theme = Theme::default();
    let json = serde_json::to_string(&theme).expect("serialize");
    let parsed: Theme = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, theme);
}

#[test]
fn partial_theme_json_keeps_the_other_defaults() {
    let parsed: Theme =
        serde_json::from_str("{\"legend\":{\"key_size\":30.0}}").expect("deserialize");
    assert_eq!(parsed.legend.key_size, 30.0);
    assert_eq!(parsed.legend.label_char_width, 7.0);
    assert_eq!(parsed.text, Theme::default().text);
}
