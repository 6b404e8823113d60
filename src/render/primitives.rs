use crate::core::aes::{Color, FontFace, PointShape};
use crate::core::types::{Point, Rect};
use crate::error::{PlotError, PlotResult};

/// Paint attributes resolved from one data point's aesthetics.
///
/// `None` stroke or fill means the part is not painted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoration {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub stroke_width: f64,
    pub dash: Option<Vec<f64>>,
}

impl Decoration {
    pub fn validate(&self) -> PlotResult<()> {
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(PlotError::InvalidData(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(dash) = &self.dash {
            if dash.iter().any(|step| !step.is_finite() || *step <= 0.0) {
                return Err(PlotError::InvalidData(
                    "dash steps must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Draw command for one marker in client space.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    pub center: Point,
    pub radius: f64,
    pub shape: PointShape,
    pub style: Decoration,
}

impl PointPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if !self.center.is_finite() {
            return Err(PlotError::InvalidData(
                "point center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PlotError::InvalidData(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        self.style.validate()
    }
}

/// Draw command for one stroked polyline in client space.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<Point>,
    pub style: Decoration,
}

impl PathPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if self.points.len() < 2 {
            return Err(PlotError::InvalidData(
                "path must contain at least two points".to_owned(),
            ));
        }
        if self.points.iter().any(|point| !point.is_finite()) {
            return Err(PlotError::InvalidData(
                "path points must be finite".to_owned(),
            ));
        }
        self.style.validate()
    }
}

/// Draw command for a filled shape; every ring closes implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub rings: Vec<Vec<Point>>,
    pub style: Decoration,
}

impl PolygonPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if self.rings.is_empty() {
            return Err(PlotError::InvalidData(
                "polygon must contain at least one ring".to_owned(),
            ));
        }
        for ring in &self.rings {
            if ring.len() < 3 {
                return Err(PlotError::InvalidData(
                    "polygon ring must contain at least three points".to_owned(),
                ));
            }
            if ring.iter().any(|point| !point.is_finite()) {
                return Err(PlotError::InvalidData(
                    "polygon ring points must be finite".to_owned(),
                ));
            }
        }
        self.style.validate()
    }
}

/// Draw command for one axis-aligned rectangle in client space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub style: Decoration,
}

impl RectPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if !self.rect.is_finite() || self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(PlotError::InvalidData(
                "rect must be finite with non-negative size".to_owned(),
            ));
        }
        self.style.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in client space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub family: String,
    pub face: FontFace,
    pub angle: f64,
    pub h_align: TextHAlign,
    pub color: Color,
}

impl TextPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if self.text.is_empty() {
            return Err(PlotError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.position.is_finite() {
            return Err(PlotError::InvalidData(
                "text position must be finite".to_owned(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.angle.is_finite() {
            return Err(PlotError::InvalidData(
                "text angle must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}
