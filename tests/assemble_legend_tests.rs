use plotgeom_rs::assemble::{
    assemble_color_bar, ColorBarOptions, GeomKind, LegendAssembler, LegendBlock, LegendDirection,
    LegendOptions, MAX_LEGEND_LABELS,
};
use plotgeom_rs::core::{Aes, AesOverrides, Color, Mapper, Scale, ScaleBreaks, Span};
use plotgeom_rs::theme::LegendTheme;

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

fn discrete_color_scale(levels: &[&str], colors: Vec<Color>) -> Scale {
    Scale::discrete(
        "class",
        Aes::Color,
        levels.iter().map(|level| (*level).to_string()).collect(),
    )
    .with_mapper(Mapper::DiscreteColors { colors })
}

fn unit_span() -> Span {
    Span::new(0.0, 1.0).expect("finite endpoints")
}

fn gradient_scale() -> Scale {
    Scale::continuous("v", Aes::Color).with_mapper(Mapper::ColorGradient {
        domain: unit_span(),
        low: Color::BLACK,
        high: Color::WHITE,
    })
}

#[test]
fn single_layer_breaks_build_a_vertical_column() {
    let scale = discrete_color_scale(&["a", "b", "c"], vec![RED, GREEN, BLUE]);
    let mut assembler =
        LegendAssembler::new("class", LegendOptions::default(), LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("three breaks make a legend");
    assert_eq!(info.title(), None);
    assert_eq!(info.size().width, 36.0);
    assert_eq!(info.size().height, 72.0);

    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.cols, 1);
    let labels: Vec<&str> = layout.breaks.iter().map(|brk| brk.label()).collect();
    assert_eq!(labels, ["a", "b", "c"]);

    let key = &layout.breaks[0].keys()[0];
    assert_eq!(key.geom(), GeomKind::Point);
    assert_eq!(
        key.overrides(),
        &AesOverrides::new().with_color(Aes::Color, RED)
    );

    assert_eq!(layout.key_rects[1].x, 0.0);
    assert_eq!(layout.key_rects[1].y, 24.0);
    assert_eq!(layout.key_rects[1].width, 24.0);
    assert_eq!(layout.key_rects[1].height, 24.0);
    assert_eq!(layout.label_positions[2].x, 29.0);
    assert_eq!(layout.label_positions[2].y, 60.0);
    assert!(layout.debug_outlines.is_empty());
}

#[test]
fn repeated_labels_merge_instead_of_duplicating() {
    let scale = discrete_color_scale(&["a", "b"], vec![RED, GREEN]);
    let mut assembler =
        LegendAssembler::new("class", LegendOptions::default(), LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);
    assembler.add_layer(GeomKind::Bar, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("merged breaks still assemble");
    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.breaks.len(), 2);
    assert_eq!(layout.breaks[0].keys().len(), 2);
    assert_eq!(layout.breaks[0].keys()[0].geom(), GeomKind::Point);
    assert_eq!(layout.breaks[0].keys()[1].geom(), GeomKind::Bar);
}

#[test]
fn explicit_row_counts_shape_the_grid() {
    let scale = discrete_color_scale(&["a", "b", "c"], vec![RED, GREEN, BLUE]);
    let options = LegendOptions {
        row_count: Some(2),
        title: Some("class".to_string()),
        ..LegendOptions::default()
    };
    let mut assembler = LegendAssembler::new("class", options, LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("gridded legend assembles");
    assert_eq!(info.title(), Some("class"));
    assert_eq!(info.size().width, 72.0);
    assert_eq!(info.size().height, 63.0);

    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.cols, 2);
    // Column-major fill: the third break starts the second column.
    assert_eq!(layout.key_rects[2].x, 36.0);
    assert_eq!(layout.key_rects[2].y, 0.0);
    assert_eq!(layout.label_positions[2].x, 65.0);
    assert_eq!(layout.label_positions[2].y, 12.0);
}

#[test]
fn horizontal_legends_lay_keys_in_one_row() {
    let scale = discrete_color_scale(&["a", "b", "c"], vec![RED, GREEN, BLUE]);
    let options = LegendOptions {
        direction: LegendDirection::Horizontal,
        ..LegendOptions::default()
    };
    let mut assembler = LegendAssembler::new("class", options, LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("horizontal legend assembles");
    assert_eq!(info.size().width, 108.0);
    assert_eq!(info.size().height, 24.0);

    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.rows, 1);
    assert_eq!(layout.cols, 3);
    assert_eq!(layout.key_rects[2].x, 72.0);
    assert_eq!(layout.key_rects[2].y, 0.0);
}

#[test]
fn size_keys_grow_the_key_cell() {
    let scale = Scale::continuous("size", Aes::Size).with_breaks(
        ScaleBreaks::new(vec![20.0], vec!["20".to_string()]).expect("matching break lengths"),
    );
    let mut assembler =
        LegendAssembler::new("size", LegendOptions::default(), LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Size, &scale, None);

    let info = assembler.assemble().expect("size legend assembles");
    // A mapped size of 20 draws a 44 px marker, so the key side grows to 46.
    assert_eq!(info.size().width, 65.0);
    assert_eq!(info.size().height, 46.0);

    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.key_rects[0].width, 46.0);
    assert_eq!(
        layout.breaks[0].keys()[0].overrides(),
        &AesOverrides::new().with_numeric(Aes::Size, 20.0)
    );
}

#[test]
fn unmappable_breaks_leave_no_legend() {
    let scale = discrete_color_scale(&["a", "b"], Vec::new());
    let mut assembler =
        LegendAssembler::new("class", LegendOptions::default(), LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);
    assert!(assembler.is_empty());
    assert!(assembler.assemble().is_none());
}

#[test]
fn debug_drawing_outlines_every_cell() {
    let scale = discrete_color_scale(&["a", "b", "c"], vec![RED, GREEN, BLUE]);
    let theme = LegendTheme {
        debug_drawing: true,
        ..LegendTheme::default()
    };
    let mut assembler = LegendAssembler::new("class", LegendOptions::default(), theme);
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("debug legend assembles");
    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.debug_outlines.len(), 3);
    assert_eq!(layout.debug_outlines[0].x, 0.0);
    assert_eq!(layout.debug_outlines[0].y, 0.0);
    assert_eq!(layout.debug_outlines[0].width, 36.0);
    assert_eq!(layout.debug_outlines[0].height, 24.0);
}

#[test]
fn break_labels_cap_at_the_hard_limit() {
    let levels: Vec<String> = (0..250).map(|index| format!("v{index}")).collect();
    let level_refs: Vec<&str> = levels.iter().map(String::as_str).collect();
    let scale = discrete_color_scale(&level_refs, vec![Color::BLACK; 250]);
    let mut assembler =
        LegendAssembler::new("class", LegendOptions::default(), LegendTheme::default());
    assembler.add_layer(GeomKind::Point, Aes::Color, &scale, None);

    let info = assembler.assemble().expect("capped legend still assembles");
    let LegendBlock::Legend(layout) = info.block() else {
        panic!("expected a legend block");
    };
    assert_eq!(layout.breaks.len(), MAX_LEGEND_LABELS);
}

#[test]
fn color_bars_cut_the_gradient_into_bins() {
    let options = ColorBarOptions {
        height: Some(100.0),
        bin_count: 4,
        ..ColorBarOptions::default()
    };
    let info = assemble_color_bar(
        &gradient_scale(),
        Some(unit_span()),
        &options,
        &LegendTheme::default(),
    )
    .expect("gradient scale makes a color bar");

    let LegendBlock::ColorBar(layout) = info.block() else {
        panic!("expected a color bar block");
    };
    assert!(!layout.horizontal);
    assert_eq!(layout.bar.width, 23.0);
    assert_eq!(layout.bar.height, 100.0);
    assert_eq!(layout.bins.len(), 4);

    // The lowest domain bin sits at the bottom of a vertical bar.
    let (first_rect, first_color) = &layout.bins[0];
    assert_eq!(first_rect.y, 75.0);
    assert_eq!(first_rect.height, 25.0);
    assert_eq!(first_color.red, 0.125);
    let (last_rect, last_color) = &layout.bins[3];
    assert_eq!(last_rect.y, 0.0);
    assert_eq!(last_color.red, 0.875);
}

#[test]
fn color_bar_ticks_run_top_down_on_vertical_bars() {
    let options = ColorBarOptions {
        height: Some(100.0),
        bin_count: 4,
        ..ColorBarOptions::default()
    };
    let info = assemble_color_bar(
        &gradient_scale(),
        Some(unit_span()),
        &options,
        &LegendTheme::default(),
    )
    .expect("gradient scale makes a color bar");
    assert_eq!(info.size().width, 49.0);
    assert_eq!(info.size().height, 100.0);

    let LegendBlock::ColorBar(layout) = info.block() else {
        panic!("expected a color bar block");
    };
    let labels: Vec<&str> = layout.ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    assert_eq!(layout.ticks[0].offset, 100.0);
    assert!((layout.ticks[1].offset - 80.0).abs() <= 1e-9);
    assert_eq!(layout.ticks[5].offset, 0.0);
}

#[test]
fn horizontal_color_bars_run_left_to_right() {
    let options = ColorBarOptions {
        width: Some(100.0),
        bin_count: 2,
        direction: LegendDirection::Horizontal,
        ..ColorBarOptions::default()
    };
    let info = assemble_color_bar(
        &gradient_scale(),
        Some(unit_span()),
        &options,
        &LegendTheme::default(),
    )
    .expect("horizontal color bar assembles");
    assert_eq!(info.size().width, 100.0);
    assert_eq!(info.size().height, 38.0);

    let LegendBlock::ColorBar(layout) = info.block() else {
        panic!("expected a color bar block");
    };
    assert!(layout.horizontal);
    let (first_rect, first_color) = &layout.bins[0];
    assert_eq!(first_rect.x, 0.0);
    assert_eq!(first_rect.width, 50.0);
    assert_eq!(first_color.red, 0.25);
    assert_eq!(layout.ticks[0].offset, 0.0);
    assert_eq!(layout.ticks[5].offset, 100.0);
}

#[test]
fn color_bars_demand_continuous_color_scales() {
    let discrete = discrete_color_scale(&["a", "b"], vec![RED, GREEN]);
    let err = assemble_color_bar(
        &discrete,
        Some(unit_span()),
        &ColorBarOptions::default(),
        &LegendTheme::default(),
    )
    .err()
    .expect("discrete transforms are rejected");
    assert!(err.to_string().contains("needs a continuous transform"));

    let numeric = Scale::continuous("v", Aes::Color);
    let err = assemble_color_bar(
        &numeric,
        Some(unit_span()),
        &ColorBarOptions::default(),
        &LegendTheme::default(),
    )
    .err()
    .expect("numeric mappers are rejected");
    assert!(err.to_string().contains("needs a continuous color mapper"));
}

#[test]
fn color_bar_titles_reserve_a_label_line() {
    let options = ColorBarOptions {
        title: Some("score".to_string()),
        ..ColorBarOptions::default()
    };
    let info = assemble_color_bar(
        &gradient_scale(),
        Some(unit_span()),
        &options,
        &LegendTheme::default(),
    )
    .expect("titled color bar assembles");
    assert_eq!(info.title(), Some("score"));
    assert_eq!(info.size().width, 49.0);
    assert_eq!(info.size().height, 130.0);
}
