use smallvec::SmallVec;

use crate::core::aes::{Aes, AesKind, AesValue, Color, FontFace, LineType, PointShape};
use crate::core::types::{Point, Span};
use crate::error::{PlotError, PlotResult};

/// Fallback values for style aesthetics absent from a snapshot.
pub mod defaults {
    use crate::core::aes::{Color, LineType, PointShape};

    pub const COLOR: Color = Color::BLACK;
    pub const FILL: Color = Color::GRAY;
    pub const ALPHA: f64 = 1.0;
    pub const SIZE: f64 = 0.5;
    pub const STROKE: f64 = 0.5;
    pub const SHAPE: PointShape = PointShape::Circle;
    pub const LINE_TYPE: LineType = LineType::Solid;
}

#[derive(Debug, Clone, PartialEq)]
enum Channel<T> {
    Constant(T),
    Series(Vec<T>),
}

impl<T> Channel<T> {
    fn get(&self, index: usize) -> Option<&T> {
        match self {
            Channel::Constant(value) => Some(value),
            Channel::Series(values) => values.get(index),
        }
    }

    fn series_len(&self) -> Option<usize> {
        match self {
            Channel::Constant(_) => None,
            Channel::Series(values) => Some(values.len()),
        }
    }
}

/// Immutable per-layer snapshot of resolved aesthetic channels.
///
/// Accessors are pure: the same index always yields the same values.
#[derive(Debug, Clone, PartialEq)]
pub struct Aesthetics {
    point_count: usize,
    x: Option<Channel<f64>>,
    y: Option<Channel<f64>>,
    alpha: Option<Channel<f64>>,
    size: Option<Channel<f64>>,
    stroke: Option<Channel<f64>>,
    width: Option<Channel<f64>>,
    height: Option<Channel<f64>>,
    angle: Option<Channel<f64>>,
    color: Option<Channel<Color>>,
    fill: Option<Channel<Color>>,
    shape: Option<Channel<PointShape>>,
    line_type: Option<Channel<LineType>>,
    label: Option<Channel<String>>,
    family: Option<Channel<String>>,
    font_face: Option<Channel<FontFace>>,
    group: Channel<i32>,
}

impl Aesthetics {
    #[must_use]
    pub fn builder(point_count: usize) -> AestheticsBuilder {
        AestheticsBuilder::new(point_count)
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[must_use]
    pub fn point(&self, index: usize) -> DataPointAesthetics<'_> {
        DataPointAesthetics {
            aesthetics: self,
            index,
            overrides: None,
        }
    }

    pub fn data_points(&self) -> impl Iterator<Item = DataPointAesthetics<'_>> {
        (0..self.point_count).map(|index| self.point(index))
    }

    #[must_use]
    pub fn defines(&self, aes: Aes) -> bool {
        match aes.kind() {
            AesKind::Numeric => self.numeric_channel(aes).is_some(),
            AesKind::Color => self.color_channel(aes).is_some(),
            AesKind::Shape => self.shape.is_some(),
            AesKind::LineType => self.line_type.is_some(),
            AesKind::Text => match aes {
                Aes::Label => self.label.is_some(),
                _ => self.family.is_some(),
            },
            AesKind::FontFace => self.font_face.is_some(),
        }
    }

    fn numeric_channel(&self, aes: Aes) -> Option<&Channel<f64>> {
        match aes {
            Aes::X => self.x.as_ref(),
            Aes::Y => self.y.as_ref(),
            Aes::Alpha => self.alpha.as_ref(),
            Aes::Size => self.size.as_ref(),
            Aes::Stroke => self.stroke.as_ref(),
            Aes::Width => self.width.as_ref(),
            Aes::Height => self.height.as_ref(),
            Aes::Angle => self.angle.as_ref(),
            _ => None,
        }
    }

    fn color_channel(&self, aes: Aes) -> Option<&Channel<Color>> {
        match aes {
            Aes::Color => self.color.as_ref(),
            Aes::Fill => self.fill.as_ref(),
            _ => None,
        }
    }

    /// Range over finite values of a numeric channel.
    #[must_use]
    pub fn range(&self, aes: Aes) -> Option<Span> {
        match self.numeric_channel(aes)? {
            Channel::Constant(value) => Span::singleton(*value).ok(),
            Channel::Series(values) => {
                let mut span: Option<Span> = None;
                for value in values.iter().take(self.point_count) {
                    if value.is_finite() {
                        span = Span::union_optional(span, Span::singleton(*value).ok());
                    }
                }
                span
            }
        }
    }

    /// Smallest positive gap between distinct values of a numeric channel,
    /// falling back to 1.0 when fewer than two distinct values exist.
    #[must_use]
    pub fn resolution(&self, aes: Aes) -> f64 {
        let Some(Channel::Series(values)) = self.numeric_channel(aes) else {
            return 1.0;
        };
        let mut sorted: Vec<f64> = values
            .iter()
            .take(self.point_count)
            .copied()
            .filter(|value| value.is_finite())
            .collect();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        let min_gap = sorted
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold(f64::INFINITY, f64::min);
        if min_gap.is_finite() && min_gap > 0.0 {
            min_gap
        } else {
            1.0
        }
    }

    /// Distinct group ids in ascending order.
    #[must_use]
    pub fn distinct_groups(&self) -> Vec<i32> {
        match &self.group {
            Channel::Constant(id) => vec![*id],
            Channel::Series(ids) => {
                let mut distinct: Vec<i32> = ids.iter().take(self.point_count).copied().collect();
                distinct.sort_unstable();
                distinct.dedup();
                distinct
            }
        }
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.distinct_groups().len()
    }
}

/// View of one point's aesthetics, optionally patched by overrides.
#[derive(Debug, Clone, Copy)]
pub struct DataPointAesthetics<'a> {
    aesthetics: &'a Aesthetics,
    index: usize,
    overrides: Option<&'a AesOverrides>,
}

impl<'a> DataPointAesthetics<'a> {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Composes this view with explicit replacement values.
    #[must_use]
    pub fn with_overrides(self, overrides: &'a AesOverrides) -> Self {
        Self {
            overrides: Some(overrides),
            ..self
        }
    }

    #[must_use]
    pub fn numeric(self, aes: Aes) -> Option<f64> {
        if let Some(value) = self.overrides.and_then(|o| o.numeric_value(aes)) {
            return Some(value);
        }
        self.aesthetics
            .numeric_channel(aes)?
            .get(self.index)
            .copied()
    }

    #[must_use]
    pub fn x(self) -> Option<f64> {
        self.numeric(Aes::X)
    }

    #[must_use]
    pub fn y(self) -> Option<f64> {
        self.numeric(Aes::Y)
    }

    #[must_use]
    pub fn alpha(self) -> Option<f64> {
        self.numeric(Aes::Alpha)
    }

    #[must_use]
    pub fn size(self) -> Option<f64> {
        self.numeric(Aes::Size)
    }

    #[must_use]
    pub fn stroke(self) -> Option<f64> {
        self.numeric(Aes::Stroke)
    }

    #[must_use]
    pub fn width(self) -> Option<f64> {
        self.numeric(Aes::Width)
    }

    #[must_use]
    pub fn height(self) -> Option<f64> {
        self.numeric(Aes::Height)
    }

    #[must_use]
    pub fn angle(self) -> Option<f64> {
        self.numeric(Aes::Angle)
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        if let Some(color) = self.overrides.and_then(|o| o.color_value(Aes::Color)) {
            return Some(color);
        }
        self.aesthetics
            .color_channel(Aes::Color)?
            .get(self.index)
            .copied()
    }

    #[must_use]
    pub fn fill(self) -> Option<Color> {
        if let Some(color) = self.overrides.and_then(|o| o.color_value(Aes::Fill)) {
            return Some(color);
        }
        self.aesthetics
            .color_channel(Aes::Fill)?
            .get(self.index)
            .copied()
    }

    #[must_use]
    pub fn shape(self) -> Option<PointShape> {
        if let Some(shape) = self.overrides.and_then(|o| o.shape) {
            return Some(shape);
        }
        self.aesthetics.shape.as_ref()?.get(self.index).copied()
    }

    #[must_use]
    pub fn line_type(self) -> Option<LineType> {
        if let Some(line_type) = self.overrides.and_then(|o| o.line_type) {
            return Some(line_type);
        }
        self.aesthetics.line_type.as_ref()?.get(self.index).copied()
    }

    #[must_use]
    pub fn label(self) -> Option<&'a str> {
        self.aesthetics
            .label
            .as_ref()?
            .get(self.index)
            .map(String::as_str)
    }

    #[must_use]
    pub fn family(self) -> Option<&'a str> {
        self.aesthetics
            .family
            .as_ref()?
            .get(self.index)
            .map(String::as_str)
    }

    #[must_use]
    pub fn font_face(self) -> Option<FontFace> {
        self.aesthetics.font_face.as_ref()?.get(self.index).copied()
    }

    #[must_use]
    pub fn group(self) -> i32 {
        self.aesthetics.group.get(self.index).copied().unwrap_or(0)
    }

    /// Location from X/Y when both are finite.
    #[must_use]
    pub fn finite_location(self) -> Option<Point> {
        let x = self.x().filter(|value| value.is_finite())?;
        let y = self.y().filter(|value| value.is_finite())?;
        Some(Point::new(x, y))
    }
}

/// Replacement values composed over a base point view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AesOverrides {
    numeric: SmallVec<[(Aes, f64); 4]>,
    colors: SmallVec<[(Aes, Color); 2]>,
    shape: Option<PointShape>,
    line_type: Option<LineType>,
}

impl AesOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_numeric(mut self, aes: Aes, value: f64) -> Self {
        if let Some(slot) = self.numeric.iter_mut().find(|(slot_aes, _)| *slot_aes == aes) {
            slot.1 = value;
        } else {
            self.numeric.push((aes, value));
        }
        self
    }

    #[must_use]
    pub fn with_color(mut self, aes: Aes, color: Color) -> Self {
        if let Some(slot) = self.colors.iter_mut().find(|(slot_aes, _)| *slot_aes == aes) {
            slot.1 = color;
        } else {
            self.colors.push((aes, color));
        }
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: PointShape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = Some(line_type);
        self
    }

    fn numeric_value(&self, aes: Aes) -> Option<f64> {
        self.numeric
            .iter()
            .find(|(slot_aes, _)| *slot_aes == aes)
            .map(|(_, value)| *value)
    }

    fn color_value(&self, aes: Aes) -> Option<Color> {
        self.colors
            .iter()
            .find(|(slot_aes, _)| *slot_aes == aes)
            .map(|(_, color)| *color)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PendingChannel {
    Numeric(Channel<f64>),
    Color(Channel<Color>),
    Shape(Channel<PointShape>),
    LineType(Channel<LineType>),
    Text(Channel<String>),
    FontFace(Channel<FontFace>),
}

impl PendingChannel {
    fn series_len(&self) -> Option<usize> {
        match self {
            PendingChannel::Numeric(channel) => channel.series_len(),
            PendingChannel::Color(channel) => channel.series_len(),
            PendingChannel::Shape(channel) => channel.series_len(),
            PendingChannel::LineType(channel) => channel.series_len(),
            PendingChannel::Text(channel) => channel.series_len(),
            PendingChannel::FontFace(channel) => channel.series_len(),
        }
    }
}

/// Collects channels and validates them into an [`Aesthetics`] snapshot.
#[derive(Debug, Clone)]
pub struct AestheticsBuilder {
    point_count: usize,
    entries: Vec<(Aes, PendingChannel)>,
    group: Option<Channel<i32>>,
}

impl AestheticsBuilder {
    #[must_use]
    pub fn new(point_count: usize) -> Self {
        Self {
            point_count,
            entries: Vec::new(),
            group: None,
        }
    }

    #[must_use]
    pub fn numeric_series(mut self, aes: Aes, values: Vec<f64>) -> Self {
        self.entries
            .push((aes, PendingChannel::Numeric(Channel::Series(values))));
        self
    }

    #[must_use]
    pub fn numeric_constant(mut self, aes: Aes, value: f64) -> Self {
        self.entries
            .push((aes, PendingChannel::Numeric(Channel::Constant(value))));
        self
    }

    #[must_use]
    pub fn color_series(mut self, aes: Aes, values: Vec<Color>) -> Self {
        self.entries
            .push((aes, PendingChannel::Color(Channel::Series(values))));
        self
    }

    #[must_use]
    pub fn color_constant(mut self, aes: Aes, color: Color) -> Self {
        self.entries
            .push((aes, PendingChannel::Color(Channel::Constant(color))));
        self
    }

    #[must_use]
    pub fn shape_series(mut self, values: Vec<PointShape>) -> Self {
        self.entries
            .push((Aes::Shape, PendingChannel::Shape(Channel::Series(values))));
        self
    }

    #[must_use]
    pub fn shape_constant(mut self, shape: PointShape) -> Self {
        self.entries
            .push((Aes::Shape, PendingChannel::Shape(Channel::Constant(shape))));
        self
    }

    #[must_use]
    pub fn line_type_series(mut self, values: Vec<LineType>) -> Self {
        self.entries.push((
            Aes::LineType,
            PendingChannel::LineType(Channel::Series(values)),
        ));
        self
    }

    #[must_use]
    pub fn line_type_constant(mut self, line_type: LineType) -> Self {
        self.entries.push((
            Aes::LineType,
            PendingChannel::LineType(Channel::Constant(line_type)),
        ));
        self
    }

    #[must_use]
    pub fn text_series(mut self, aes: Aes, values: Vec<String>) -> Self {
        self.entries
            .push((aes, PendingChannel::Text(Channel::Series(values))));
        self
    }

    #[must_use]
    pub fn text_constant(mut self, aes: Aes, value: impl Into<String>) -> Self {
        self.entries
            .push((aes, PendingChannel::Text(Channel::Constant(value.into()))));
        self
    }

    #[must_use]
    pub fn font_face_constant(mut self, face: FontFace) -> Self {
        self.entries.push((
            Aes::FontFace,
            PendingChannel::FontFace(Channel::Constant(face)),
        ));
        self
    }

    /// Generic constant entry point used for layer constants.
    #[must_use]
    pub fn constant(mut self, aes: Aes, value: AesValue) -> Self {
        let channel = match value {
            AesValue::Number(value) => PendingChannel::Numeric(Channel::Constant(value)),
            AesValue::Color(color) => PendingChannel::Color(Channel::Constant(color)),
            AesValue::Shape(shape) => PendingChannel::Shape(Channel::Constant(shape)),
            AesValue::LineType(line_type) => {
                PendingChannel::LineType(Channel::Constant(line_type))
            }
            AesValue::Text(text) => PendingChannel::Text(Channel::Constant(text)),
            AesValue::FontFace(face) => PendingChannel::FontFace(Channel::Constant(face)),
        };
        self.entries.push((aes, channel));
        self
    }

    #[must_use]
    pub fn group_series(mut self, groups: Vec<i32>) -> Self {
        self.group = Some(Channel::Series(groups));
        self
    }

    #[must_use]
    pub fn group_constant(mut self, group: i32) -> Self {
        self.group = Some(Channel::Constant(group));
        self
    }

    /// Validates channel kinds and series lengths; later entries for the
    /// same aesthetic win.
    pub fn build(self) -> PlotResult<Aesthetics> {
        let mut aesthetics = Aesthetics {
            point_count: self.point_count,
            x: None,
            y: None,
            alpha: None,
            size: None,
            stroke: None,
            width: None,
            height: None,
            angle: None,
            color: None,
            fill: None,
            shape: None,
            line_type: None,
            label: None,
            family: None,
            font_face: None,
            group: self.group.unwrap_or(Channel::Constant(0)),
        };

        if let Some(len) = aesthetics.group.series_len() {
            if len != self.point_count {
                return Err(PlotError::InvalidData(format!(
                    "group channel has {len} values, expected {}",
                    self.point_count
                )));
            }
        }

        for (aes, channel) in self.entries {
            if let Some(len) = channel.series_len() {
                if len != self.point_count {
                    return Err(PlotError::InvalidData(format!(
                        "aesthetic `{aes}` has {len} values, expected {}",
                        self.point_count
                    )));
                }
            }
            let mismatch = |kind: AesKind| {
                PlotError::InvalidConfig(format!("aesthetic `{aes}` cannot hold a {kind:?} value"))
            };
            match channel {
                PendingChannel::Numeric(channel) => match aes {
                    Aes::X => aesthetics.x = Some(channel),
                    Aes::Y => aesthetics.y = Some(channel),
                    Aes::Alpha => aesthetics.alpha = Some(channel),
                    Aes::Size => aesthetics.size = Some(channel),
                    Aes::Stroke => aesthetics.stroke = Some(channel),
                    Aes::Width => aesthetics.width = Some(channel),
                    Aes::Height => aesthetics.height = Some(channel),
                    Aes::Angle => aesthetics.angle = Some(channel),
                    _ => return Err(mismatch(AesKind::Numeric)),
                },
                PendingChannel::Color(channel) => match aes {
                    Aes::Color => aesthetics.color = Some(channel),
                    Aes::Fill => aesthetics.fill = Some(channel),
                    _ => return Err(mismatch(AesKind::Color)),
                },
                PendingChannel::Shape(channel) => match aes {
                    Aes::Shape => aesthetics.shape = Some(channel),
                    _ => return Err(mismatch(AesKind::Shape)),
                },
                PendingChannel::LineType(channel) => match aes {
                    Aes::LineType => aesthetics.line_type = Some(channel),
                    _ => return Err(mismatch(AesKind::LineType)),
                },
                PendingChannel::Text(channel) => match aes {
                    Aes::Label => aesthetics.label = Some(channel),
                    Aes::Family => aesthetics.family = Some(channel),
                    _ => return Err(mismatch(AesKind::Text)),
                },
                PendingChannel::FontFace(channel) => match aes {
                    Aes::FontFace => aesthetics.font_face = Some(channel),
                    _ => return Err(mismatch(AesKind::FontFace)),
                },
            }
        }

        Ok(aesthetics)
    }
}
