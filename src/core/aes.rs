use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Closed set of aesthetic roles a layer can map or fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aes {
    X,
    Y,
    Color,
    Fill,
    Alpha,
    Size,
    Stroke,
    Shape,
    LineType,
    Width,
    Height,
    Label,
    Family,
    FontFace,
    Angle,
}

/// Value class an aesthetic channel stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesKind {
    Numeric,
    Color,
    Shape,
    LineType,
    Text,
    FontFace,
}

impl Aes {
    pub const VALUES: [Aes; 15] = [
        Aes::X,
        Aes::Y,
        Aes::Color,
        Aes::Fill,
        Aes::Alpha,
        Aes::Size,
        Aes::Stroke,
        Aes::Shape,
        Aes::LineType,
        Aes::Width,
        Aes::Height,
        Aes::Label,
        Aes::Family,
        Aes::FontFace,
        Aes::Angle,
    ];

    #[must_use]
    pub fn kind(self) -> AesKind {
        match self {
            Aes::X
            | Aes::Y
            | Aes::Alpha
            | Aes::Size
            | Aes::Stroke
            | Aes::Width
            | Aes::Height
            | Aes::Angle => AesKind::Numeric,
            Aes::Color | Aes::Fill => AesKind::Color,
            Aes::Shape => AesKind::Shape,
            Aes::LineType => AesKind::LineType,
            Aes::Label | Aes::Family => AesKind::Text,
            Aes::FontFace => AesKind::FontFace,
        }
    }

    #[must_use]
    pub fn is_positional(self) -> bool {
        matches!(self, Aes::X | Aes::Y)
    }

    #[must_use]
    pub fn affects_scale_x(self) -> bool {
        matches!(self, Aes::X)
    }

    #[must_use]
    pub fn affects_scale_y(self) -> bool {
        matches!(self, Aes::Y)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Aes::X => "x",
            Aes::Y => "y",
            Aes::Color => "color",
            Aes::Fill => "fill",
            Aes::Alpha => "alpha",
            Aes::Size => "size",
            Aes::Stroke => "stroke",
            Aes::Shape => "shape",
            Aes::LineType => "line_type",
            Aes::Width => "width",
            Aes::Height => "height",
            Aes::Label => "label",
            Aes::Family => "family",
            Aes::FontFace => "font_face",
            Aes::Angle => "angle",
        }
    }
}

impl fmt::Display for Aes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aes {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        Self::VALUES
            .into_iter()
            .find(|aes| aes.name() == value)
            .ok_or_else(|| PlotError::UnknownKind {
                kind: "aesthetic",
                value: value.to_owned(),
            })
    }
}

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Combines the color's own alpha with an aesthetic alpha multiplier.
    #[must_use]
    pub fn multiplied_alpha(self, factor: f64) -> Self {
        Self {
            alpha: self.alpha * factor,
            ..self
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke dash pattern names with their unit dash arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Blank,
    Solid,
    Dashed,
    Dotted,
    DotDash,
    LongDash,
    TwoDash,
}

impl LineType {
    #[must_use]
    pub fn is_blank(self) -> bool {
        self == LineType::Blank
    }

    #[must_use]
    pub fn is_solid(self) -> bool {
        self == LineType::Solid
    }

    /// Dash array in px for the given stroke width; `None` when the stroke
    /// is drawn continuous (or not at all).
    #[must_use]
    pub fn dash_array(self, stroke_width: f64) -> Option<Vec<f64>> {
        let pattern: &[f64] = match self {
            LineType::Blank | LineType::Solid => return None,
            LineType::Dashed => &[4.0, 4.0],
            LineType::Dotted => &[1.0, 3.0],
            LineType::DotDash => &[1.0, 3.0, 4.0, 3.0],
            LineType::LongDash => &[7.0, 3.0],
            LineType::TwoDash => &[2.0, 2.0, 6.0, 2.0],
        };
        Some(pattern.iter().map(|unit| unit * stroke_width).collect())
    }
}

/// Marker shapes for point geometry and legend keys.
///
/// Solid shapes paint with the stroke color, `*Open` shapes stroke only,
/// `*Filled` shapes combine the fill aesthetic with a stroked outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointShape {
    Circle,
    CircleOpen,
    CircleFilled,
    Square,
    SquareOpen,
    SquareFilled,
    Triangle,
    TriangleOpen,
    Diamond,
    DiamondOpen,
    Plus,
    Cross,
}

impl PointShape {
    #[must_use]
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            PointShape::Circle
                | PointShape::Square
                | PointShape::Triangle
                | PointShape::Diamond
                | PointShape::Plus
                | PointShape::Cross
        )
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        matches!(self, PointShape::CircleFilled | PointShape::SquareFilled)
    }
}

/// Font style flags for text geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontFace {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Tagged aesthetic value used for layer constants and overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AesValue {
    Number(f64),
    Color(Color),
    Shape(PointShape),
    LineType(LineType),
    Text(String),
    FontFace(FontFace),
}

impl AesValue {
    #[must_use]
    pub fn kind(&self) -> AesKind {
        match self {
            AesValue::Number(_) => AesKind::Numeric,
            AesValue::Color(_) => AesKind::Color,
            AesValue::Shape(_) => AesKind::Shape,
            AesValue::LineType(_) => AesKind::LineType,
            AesValue::Text(_) => AesKind::Text,
            AesValue::FontFace(_) => AesKind::FontFace,
        }
    }
}
