use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::aes::{Aes, AesValue, Color, LineType, PointShape};
use crate::core::aesthetics::{defaults, Aesthetics, DataPointAesthetics};
use crate::core::coord::CoordinateSystem;
use crate::core::data::{DataFrame, DataValue};
use crate::core::scale::Scale;
use crate::core::types::{Point, Rect};
use crate::error::{PlotError, PlotResult};
use crate::geom::{
    decorate, modulate_alpha, stroke_width_by_stroke, DecorationOptions, GeomHelper, PathBuilder,
    PathData, PathFlavor, PolygonData, StepDirection,
};
use crate::interaction::{
    IndexMapper, LookupSpace, LookupStrategy, TargetCollector, TipKind, TooltipParams,
};
use crate::position::PositionSpec;
use crate::render::{
    Decoration, PathPrimitive, PointPrimitive, PolygonPrimitive, Primitive, RectPrimitive,
    SceneGroup, TextHAlign, TextPrimitive,
};
use crate::theme::Theme;

/// Marker diameter per unit of the size aesthetic, in px.
pub(crate) const POINT_DIAMETER_RATIO: f64 = 2.2;
/// Font size per unit of the size aesthetic, in px.
const TEXT_SIZE_RATIO: f64 = 2.0;
/// Size aesthetic assumed for labels that do not map one.
const TEXT_DEFAULT_SIZE: f64 = 7.0;
/// Default bar breadth as a fraction of the x resolution.
const DEFAULT_BAR_BREADTH: f64 = 0.9;

/// Shape cycle for discrete shape scales.
const SHAPE_PALETTE: [PointShape; 10] = [
    PointShape::Circle,
    PointShape::Triangle,
    PointShape::Square,
    PointShape::Plus,
    PointShape::Diamond,
    PointShape::Cross,
    PointShape::CircleOpen,
    PointShape::TriangleOpen,
    PointShape::SquareOpen,
    PointShape::DiamondOpen,
];

/// Line type cycle for discrete line type scales.
const LINE_TYPE_PALETTE: [LineType; 6] = [
    LineType::Solid,
    LineType::Dashed,
    LineType::Dotted,
    LineType::DotDash,
    LineType::LongDash,
    LineType::TwoDash,
];

/// Fill-in for values a color scale cannot map.
const NA_COLOR: Color = Color::GRAY;

/// Closed set of layer geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeomKind {
    Point,
    Path,
    Line,
    Step,
    Polygon,
    Band,
    Bar,
    Text,
    LiveMap,
}

impl GeomKind {
    /// Aesthetics the geometry consumes when drawing.
    #[must_use]
    pub fn renders(self) -> &'static [Aes] {
        match self {
            GeomKind::Point => &[
                Aes::X,
                Aes::Y,
                Aes::Color,
                Aes::Fill,
                Aes::Alpha,
                Aes::Size,
                Aes::Stroke,
                Aes::Shape,
            ],
            GeomKind::Path | GeomKind::Line | GeomKind::Step => {
                &[Aes::X, Aes::Y, Aes::Color, Aes::Alpha, Aes::Size, Aes::LineType]
            }
            GeomKind::Polygon => &[
                Aes::X,
                Aes::Y,
                Aes::Color,
                Aes::Fill,
                Aes::Alpha,
                Aes::Size,
                Aes::LineType,
            ],
            GeomKind::Band => &[Aes::X, Aes::Y, Aes::Height, Aes::Fill, Aes::Alpha],
            GeomKind::Bar => &[
                Aes::X,
                Aes::Y,
                Aes::Width,
                Aes::Color,
                Aes::Fill,
                Aes::Alpha,
                Aes::Size,
            ],
            GeomKind::Text => &[
                Aes::X,
                Aes::Y,
                Aes::Label,
                Aes::Color,
                Aes::Alpha,
                Aes::Size,
                Aes::Family,
                Aes::FontFace,
                Aes::Angle,
            ],
            GeomKind::LiveMap => &[Aes::X, Aes::Y],
        }
    }

    /// Whether the y domain must include zero.
    #[must_use]
    pub fn zero_based(self) -> bool {
        matches!(self, GeomKind::Bar)
    }

    /// Breadth assumed for domain sizing when the width aesthetic is absent.
    #[must_use]
    pub fn default_breadth(self) -> Option<f64> {
        matches!(self, GeomKind::Bar).then_some(DEFAULT_BAR_BREADTH)
    }

    #[must_use]
    pub fn is_live_map(self) -> bool {
        matches!(self, GeomKind::LiveMap)
    }

    /// Tooltip placement for targets of this geometry.
    #[must_use]
    pub fn default_tip_kind(self) -> TipKind {
        match self {
            GeomKind::Point | GeomKind::Bar | GeomKind::Text => TipKind::Vertical,
            GeomKind::Path | GeomKind::Line | GeomKind::Step | GeomKind::Band => {
                TipKind::Horizontal
            }
            GeomKind::Polygon | GeomKind::LiveMap => TipKind::Cursor,
        }
    }

    /// Cursor lookup behavior for targets of this geometry.
    #[must_use]
    pub fn lookup_spec(self) -> (LookupSpace, LookupStrategy) {
        match self {
            GeomKind::Point => (LookupSpace::Xy, LookupStrategy::Nearest),
            GeomKind::Path | GeomKind::Line | GeomKind::Step => {
                (LookupSpace::X, LookupStrategy::Nearest)
            }
            GeomKind::Bar | GeomKind::Band => (LookupSpace::X, LookupStrategy::Hover),
            GeomKind::Polygon => (LookupSpace::Xy, LookupStrategy::Hover),
            GeomKind::Text | GeomKind::LiveMap => (LookupSpace::None, LookupStrategy::None),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GeomKind::Point => "point",
            GeomKind::Path => "path",
            GeomKind::Line => "line",
            GeomKind::Step => "step",
            GeomKind::Polygon => "polygon",
            GeomKind::Band => "band",
            GeomKind::Bar => "bar",
            GeomKind::Text => "text",
            GeomKind::LiveMap => "live_map",
        }
    }
}

impl fmt::Display for GeomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeomKind {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        [
            GeomKind::Point,
            GeomKind::Path,
            GeomKind::Line,
            GeomKind::Step,
            GeomKind::Polygon,
            GeomKind::Band,
            GeomKind::Bar,
            GeomKind::Text,
            GeomKind::LiveMap,
        ]
        .into_iter()
        .find(|kind| kind.name() == value)
        .ok_or_else(|| PlotError::UnknownKind {
            kind: "geometry",
            value: value.to_owned(),
        })
    }
}

/// One data layer: a geometry, its data, and how variables feed aesthetics.
///
/// Immutable once built; a render pass never mutates a layer.
#[derive(Debug, Clone)]
pub struct GeomLayer {
    geom: GeomKind,
    data: DataFrame,
    mappings: IndexMap<Aes, String>,
    constants: IndexMap<Aes, AesValue>,
    position: PositionSpec,
    group_by: Option<String>,
    step_direction: StepDirection,
    show_legend: bool,
}

impl GeomLayer {
    pub fn builder(geom: GeomKind) -> GeomLayerBuilder {
        GeomLayerBuilder::new(geom)
    }

    #[must_use]
    pub fn geom(&self) -> GeomKind {
        self.geom
    }

    #[must_use]
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    #[must_use]
    pub fn mappings(&self) -> &IndexMap<Aes, String> {
        &self.mappings
    }

    #[must_use]
    pub fn constants(&self) -> &IndexMap<Aes, AesValue> {
        &self.constants
    }

    #[must_use]
    pub fn position(&self) -> &PositionSpec {
        &self.position
    }

    #[must_use]
    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    #[must_use]
    pub fn mapped_variable(&self, aes: Aes) -> Option<&str> {
        self.mappings.get(&aes).map(String::as_str)
    }

    /// Snapshot with only positional channels, transformed but not mapped
    /// to a visual range. Domain computation runs on these.
    pub fn dry_run_aesthetics(
        &self,
        data: &DataFrame,
        scales: &IndexMap<Aes, Scale>,
    ) -> PlotResult<Aesthetics> {
        let mut builder = Aesthetics::builder(data.row_count());
        for aes in [Aes::X, Aes::Y, Aes::Width, Aes::Height] {
            if let Some(values) = self.transformed_column(aes, data, scales)? {
                builder = builder.numeric_series(aes, values);
            } else if let Some(AesValue::Number(value)) = self.constants.get(&aes) {
                builder = builder.numeric_constant(aes, *value);
            }
        }
        builder = builder.group_series(self.group_ids(data));
        builder.build()
    }

    /// Full snapshot: every mapped channel transformed and mapped through
    /// its scale, constants layered on top of defaults.
    pub fn build_aesthetics(
        &self,
        data: &DataFrame,
        scales: &IndexMap<Aes, Scale>,
    ) -> PlotResult<Aesthetics> {
        let mut builder = Aesthetics::builder(data.row_count());

        for (&aes, variable) in &self.mappings {
            let column = data.column(variable).ok_or_else(|| {
                PlotError::InvalidConfig(format!(
                    "layer {} maps `{}` to missing variable `{variable}`",
                    self.geom,
                    aes.name()
                ))
            })?;

            match aes {
                Aes::X | Aes::Y | Aes::Width | Aes::Height => {
                    let values = self
                        .transformed_column(aes, data, scales)?
                        .unwrap_or_default();
                    builder = builder.numeric_series(aes, values);
                }
                Aes::Alpha | Aes::Size | Aes::Stroke | Aes::Angle => {
                    let scale = scales.get(&aes);
                    let values = column
                        .iter()
                        .map(|value| match scale {
                            Some(scale) => scale
                                .transform_value(value)
                                .and_then(|v| scale.mapper().map_numeric(v))
                                .unwrap_or(f64::NAN),
                            None => value.as_f64().unwrap_or(f64::NAN),
                        })
                        .collect();
                    builder = builder.numeric_series(aes, values);
                }
                Aes::Color | Aes::Fill => {
                    let scale = scales.get(&aes).ok_or_else(|| {
                        PlotError::InvalidConfig(format!(
                            "no scale defined for mapped aesthetic `{}`",
                            aes.name()
                        ))
                    })?;
                    let values = column
                        .iter()
                        .map(|value| {
                            scale
                                .transform_value(value)
                                .and_then(|v| scale.mapper().map_color(v))
                                .unwrap_or(NA_COLOR)
                        })
                        .collect();
                    builder = builder.color_series(aes, values);
                }
                Aes::Shape => {
                    let scale = scales.get(&aes);
                    let values = column
                        .iter()
                        .map(|value| {
                            palette_pick(&SHAPE_PALETTE, self.level_index(scale, value))
                                .unwrap_or(defaults::SHAPE)
                        })
                        .collect();
                    builder = builder.shape_series(values);
                }
                Aes::LineType => {
                    let scale = scales.get(&aes);
                    let values = column
                        .iter()
                        .map(|value| {
                            palette_pick(&LINE_TYPE_PALETTE, self.level_index(scale, value))
                                .unwrap_or(defaults::LINE_TYPE)
                        })
                        .collect();
                    builder = builder.line_type_series(values);
                }
                Aes::Label | Aes::Family => {
                    let values = column.iter().map(|value| value.label()).collect();
                    builder = builder.text_series(aes, values);
                }
                Aes::FontFace => {
                    return Err(PlotError::InvalidConfig(
                        "font face cannot be mapped from data; set it as a constant".to_owned(),
                    ));
                }
            }
        }

        for (&aes, value) in &self.constants {
            builder = builder.constant(aes, value.clone());
        }
        builder = builder.group_series(self.group_ids(data));
        builder.build()
    }

    /// Builds this layer's scene for one tile and collects its hit targets.
    pub fn build_scene(
        &self,
        aesthetics: &Aesthetics,
        coord: &dyn CoordinateSystem,
        theme: &Theme,
        collector: &mut dyn TargetCollector,
    ) -> PlotResult<SceneGroup> {
        let position = self.position.build(aesthetics);
        let helper = GeomHelper::new(position.as_ref(), coord);
        let flavor = PathFlavor::for_coord(coord);
        let mut group = SceneGroup::new(self.geom.name());

        match self.geom {
            GeomKind::Point => self.emit_points(aesthetics, helper, &mut group, collector),
            GeomKind::Path => {
                let builder = PathBuilder::new(helper, flavor);
                let paths = builder.variadic_paths(aesthetics, false);
                self.emit_paths(&paths, &mut group, collector);
            }
            GeomKind::Line => {
                let builder = PathBuilder::new(helper, flavor);
                let paths = builder.variadic_paths(aesthetics, true);
                self.emit_paths(&paths, &mut group, collector);
            }
            GeomKind::Step => {
                let builder = PathBuilder::new(helper, flavor);
                let steps = builder.steps(aesthetics, self.step_direction, true);
                let grouped: Vec<Vec<PathData<'_>>> =
                    steps.into_iter().map(|path| vec![path]).collect();
                self.emit_paths(&grouped, &mut group, collector);
            }
            GeomKind::Polygon => {
                let builder = PathBuilder::new(helper, flavor);
                for polygon in builder.polygons(aesthetics) {
                    self.emit_polygon(&polygon, false, &mut group, collector);
                }
            }
            GeomKind::Band => {
                let builder = PathBuilder::new(helper, flavor);
                let bands = builder.bands(
                    aesthetics,
                    |p| band_border(p, 0.5),
                    |p| band_border(p, -0.5),
                    true,
                )?;
                for polygon in &bands {
                    self.emit_polygon(polygon, true, &mut group, collector);
                }
            }
            GeomKind::Bar => self.emit_bars(aesthetics, helper, &mut group, collector),
            GeomKind::Text => self.emit_texts(aesthetics, helper, theme, &mut group),
            GeomKind::LiveMap => {}
        }

        Ok(group)
    }

    fn emit_points(
        &self,
        aesthetics: &Aesthetics,
        helper: GeomHelper<'_>,
        group: &mut SceneGroup,
        collector: &mut dyn TargetCollector,
    ) {
        for p in aesthetics.data_points() {
            let Some(center) = helper.to_client_point(&p) else {
                continue;
            };
            let radius = p.size().unwrap_or(defaults::SIZE) * POINT_DIAMETER_RATIO / 2.0;
            if radius <= 0.0 || !radius.is_finite() {
                continue;
            }
            let (shape, style) = point_style(&p);
            collector.add_point(
                p.index(),
                center,
                radius,
                self.tooltip_params()
                    .with_marker_colors(vec![marker_color(&style)]),
            );
            group.push_primitive(Primitive::Point(PointPrimitive {
                center,
                radius,
                shape,
                style,
            }));
        }
    }

    fn emit_paths(
        &self,
        paths: &[Vec<PathData<'_>>],
        group: &mut SceneGroup,
        collector: &mut dyn TargetCollector,
    ) {
        for runs in paths {
            for run in runs {
                if run.len() < 2 {
                    continue;
                }
                let style = decorate(&run.aes(), &DecorationOptions::line());
                let points = run.coordinates();
                let table: Vec<usize> =
                    run.points().iter().map(|point| point.aes.index()).collect();
                collector.add_path(
                    points.clone(),
                    IndexMapper::Table(table),
                    self.tooltip_params()
                        .with_marker_colors(vec![marker_color(&style)]),
                );
                group.push_primitive(Primitive::Path(PathPrimitive { points, style }));
            }
        }
    }

    fn emit_polygon(
        &self,
        polygon: &PolygonData<'_>,
        fill_only: bool,
        group: &mut SceneGroup,
        collector: &mut dyn TargetCollector,
    ) {
        let p = polygon.aes();
        let style = if fill_only {
            band_style(&p)
        } else {
            decorate(&p, &DecorationOptions::default())
        };
        let rings: Vec<Vec<Point>> = polygon.rings().to_vec();
        if rings.iter().all(|ring| ring.len() < 3) {
            return;
        }
        if let Some(outer) = rings.first() {
            let params = self
                .tooltip_params()
                .with_marker_colors(vec![marker_color(&style)]);
            collector.add_polygon(outer.clone(), p.index(), params);
        }
        group.push_primitive(Primitive::Polygon(PolygonPrimitive { rings, style }));
    }

    fn emit_bars(
        &self,
        aesthetics: &Aesthetics,
        helper: GeomHelper<'_>,
        group: &mut SceneGroup,
        collector: &mut dyn TargetCollector,
    ) {
        let resolution = aesthetics.resolution(Aes::X);
        for p in aesthetics.data_points() {
            let Some(location) = p.finite_location() else {
                continue;
            };
            let breadth = p.width().unwrap_or(DEFAULT_BAR_BREADTH) * resolution;
            if breadth <= 0.0 || !breadth.is_finite() {
                continue;
            }
            let span = Rect::from_corners(
                Point::new(location.x - breadth / 2.0, 0.0),
                Point::new(location.x + breadth / 2.0, location.y),
            );
            let Some(rect) = helper.to_client_rect(span, &p) else {
                continue;
            };
            let style = decorate(&p, &DecorationOptions::default());
            collector.add_rectangle(
                p.index(),
                rect,
                self.tooltip_params()
                    .with_marker_colors(vec![marker_color(&style)]),
            );
            group.push_primitive(Primitive::Rect(RectPrimitive { rect, style }));
        }
    }

    fn emit_texts(
        &self,
        aesthetics: &Aesthetics,
        helper: GeomHelper<'_>,
        theme: &Theme,
        group: &mut SceneGroup,
    ) {
        for p in aesthetics.data_points() {
            let Some(position) = helper.to_client_point(&p) else {
                continue;
            };
            let Some(text) = p.label() else {
                continue;
            };
            if text.is_empty() {
                continue;
            }
            let alpha = p.alpha().unwrap_or(defaults::ALPHA);
            let color = modulate_alpha(p.color().unwrap_or(defaults::COLOR), alpha);
            group.push_primitive(Primitive::Text(TextPrimitive {
                text: text.to_owned(),
                position,
                font_size: p.size().unwrap_or(TEXT_DEFAULT_SIZE) * TEXT_SIZE_RATIO,
                family: p
                    .family()
                    .map(str::to_owned)
                    .unwrap_or_else(|| theme.text.family.clone()),
                face: p.font_face().unwrap_or_default(),
                angle: p.angle().unwrap_or(0.0),
                h_align: TextHAlign::Center,
                color,
            }));
        }
    }

    fn tooltip_params(&self) -> TooltipParams {
        TooltipParams::new(self.geom.default_tip_kind())
    }

    fn transformed_column(
        &self,
        aes: Aes,
        data: &DataFrame,
        scales: &IndexMap<Aes, Scale>,
    ) -> PlotResult<Option<Vec<f64>>> {
        let Some(variable) = self.mappings.get(&aes) else {
            return Ok(None);
        };
        let column = data.column(variable).ok_or_else(|| {
            PlotError::InvalidConfig(format!(
                "layer {} maps `{}` to missing variable `{variable}`",
                self.geom,
                aes.name()
            ))
        })?;
        let values = match scales.get(&aes) {
            Some(scale) => column
                .iter()
                .map(|value| scale.transform_value(value).unwrap_or(f64::NAN))
                .collect(),
            None => column
                .iter()
                .map(|value| value.as_f64().unwrap_or(f64::NAN))
                .collect(),
        };
        Ok(Some(values))
    }

    fn level_index(&self, scale: Option<&Scale>, value: &DataValue) -> Option<f64> {
        scale.and_then(|scale| scale.transform_value(value))
    }

    /// Group ids in first-appearance order: the explicit grouping variable
    /// when set, otherwise the combination of discrete mapped variables.
    fn group_ids(&self, data: &DataFrame) -> Vec<i32> {
        let vars: Vec<&str> = match &self.group_by {
            Some(variable) => vec![variable.as_str()],
            None => self
                .mappings
                .iter()
                .filter(|(aes, _)| !matches!(aes, Aes::Label | Aes::Family))
                .map(|(_, variable)| variable.as_str())
                .filter(|variable| data.is_discrete(variable))
                .collect(),
        };
        if vars.is_empty() {
            return vec![0; data.row_count()];
        }

        let mut ids: IndexMap<String, i32> = IndexMap::new();
        (0..data.row_count())
            .map(|row| {
                let key = vars
                    .iter()
                    .map(|variable| {
                        data.column(variable)
                            .and_then(|column| column.get(row))
                            .map(|value| value.label())
                            .unwrap_or_default()
                    })
                    .collect::<Vec<_>>()
                    .join("\u{1f}");
                let next = ids.len() as i32;
                *ids.entry(key).or_insert(next)
            })
            .collect()
    }
}

/// Validating builder for [`GeomLayer`].
#[derive(Debug, Clone)]
pub struct GeomLayerBuilder {
    geom: GeomKind,
    data: DataFrame,
    mappings: IndexMap<Aes, String>,
    constants: IndexMap<Aes, AesValue>,
    position: PositionSpec,
    group_by: Option<String>,
    step_direction: StepDirection,
    show_legend: bool,
}

impl GeomLayerBuilder {
    pub fn new(geom: GeomKind) -> Self {
        Self {
            geom,
            data: DataFrame::new(),
            mappings: IndexMap::new(),
            constants: IndexMap::new(),
            position: PositionSpec::default(),
            group_by: None,
            step_direction: StepDirection::default(),
            show_legend: true,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: DataFrame) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, aes: Aes, variable: impl Into<String>) -> Self {
        self.mappings.insert(aes, variable.into());
        self
    }

    #[must_use]
    pub fn with_constant(mut self, aes: Aes, value: AesValue) -> Self {
        self.constants.insert(aes, value);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: PositionSpec) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_group_by(mut self, variable: impl Into<String>) -> Self {
        self.group_by = Some(variable.into());
        self
    }

    #[must_use]
    pub fn with_step_direction(mut self, direction: StepDirection) -> Self {
        self.step_direction = direction;
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    pub fn build(self) -> PlotResult<GeomLayer> {
        for (aes, variable) in &self.mappings {
            if !self.data.has_variable(variable) {
                return Err(PlotError::InvalidConfig(format!(
                    "layer {} maps `{}` to unknown variable `{variable}`",
                    self.geom,
                    aes.name()
                )));
            }
        }
        if let Some(variable) = &self.group_by {
            if !self.data.has_variable(variable) {
                return Err(PlotError::InvalidConfig(format!(
                    "layer {} groups by unknown variable `{variable}`",
                    self.geom
                )));
            }
        }
        if self.geom == GeomKind::Text
            && !self.mappings.contains_key(&Aes::Label)
            && !self.constants.contains_key(&Aes::Label)
        {
            return Err(PlotError::InvalidConfig(
                "text geometry needs a label mapping or constant".to_owned(),
            ));
        }
        if self.geom == GeomKind::Band
            && !self.mappings.contains_key(&Aes::Height)
            && !self.constants.contains_key(&Aes::Height)
        {
            return Err(PlotError::InvalidConfig(
                "band geometry needs a height mapping or constant".to_owned(),
            ));
        }

        Ok(GeomLayer {
            geom: self.geom,
            data: self.data,
            mappings: self.mappings,
            constants: self.constants,
            position: self.position,
            group_by: self.group_by,
            step_direction: self.step_direction,
            show_legend: self.show_legend,
        })
    }
}

fn band_border(p: &DataPointAesthetics<'_>, direction: f64) -> Option<Point> {
    let x = p.x().filter(|value| value.is_finite())?;
    let y = p.y().filter(|value| value.is_finite())?;
    let height = p.height().filter(|value| value.is_finite())?;
    Some(Point::new(x, y + direction * height))
}

fn point_style(p: &DataPointAesthetics<'_>) -> (PointShape, Decoration) {
    let shape = p.shape().unwrap_or(defaults::SHAPE);
    let alpha = p.alpha().unwrap_or(defaults::ALPHA);
    let color = p.color().unwrap_or(defaults::COLOR);
    let stroke_width = stroke_width_by_stroke(p);

    let style = if shape.is_solid() {
        Decoration {
            stroke: None,
            fill: Some(modulate_alpha(color, alpha)),
            stroke_width,
            dash: None,
        }
    } else if shape.is_filled() {
        Decoration {
            stroke: Some(color),
            fill: Some(modulate_alpha(p.fill().unwrap_or(defaults::FILL), alpha)),
            stroke_width,
            dash: None,
        }
    } else {
        Decoration {
            stroke: Some(modulate_alpha(color, alpha)),
            fill: None,
            stroke_width,
            dash: None,
        }
    };
    (shape, style)
}

fn band_style(p: &DataPointAesthetics<'_>) -> Decoration {
    let alpha = p.alpha().unwrap_or(defaults::ALPHA);
    Decoration {
        stroke: None,
        fill: Some(modulate_alpha(p.fill().unwrap_or(defaults::FILL), alpha)),
        stroke_width: 0.0,
        dash: None,
    }
}

/// Tooltip marker color: the stroke when present, else the fill.
fn marker_color(style: &Decoration) -> Color {
    style
        .stroke
        .or(style.fill)
        .unwrap_or(defaults::COLOR)
}

fn palette_pick<T: Copy>(palette: &[T], index: Option<f64>) -> Option<T> {
    let index = index?;
    if !index.is_finite() || index < 0.0 {
        return None;
    }
    Some(palette[(index.round() as usize) % palette.len()])
}

/// Shape drawn for a discrete level index on the default shape cycle.
pub(crate) fn shape_for_level(index: f64) -> Option<PointShape> {
    palette_pick(&SHAPE_PALETTE, Some(index))
}

/// Line type drawn for a discrete level index on the default cycle.
pub(crate) fn line_type_for_level(index: f64) -> Option<LineType> {
    palette_pick(&LINE_TYPE_PALETTE, Some(index))
}
