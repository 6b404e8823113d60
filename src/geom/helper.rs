#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::aes::Color;
use crate::core::aesthetics::{defaults, Aesthetics, DataPointAesthetics};
use crate::core::coord::CoordinateSystem;
use crate::core::types::{Point, Rect};
use crate::position::PositionAdjustment;
use crate::render::Decoration;

/// Whether the alpha aesthetic modulates stroke in addition to fill.
pub const ALPHA_CONTROLS_BOTH: bool = false;

/// Client-space sliver given to a rectangle side that collapses to zero, so
/// the shape stays visible.
const THIN_SIDE: f64 = 0.1;

/// Projects data-space locations into client space: position adjustment
/// first, coordinate mapping second.
#[derive(Clone, Copy)]
pub struct GeomHelper<'a> {
    position: &'a dyn PositionAdjustment,
    coord: &'a dyn CoordinateSystem,
}

impl<'a> GeomHelper<'a> {
    pub fn new(position: &'a dyn PositionAdjustment, coord: &'a dyn CoordinateSystem) -> Self {
        Self { position, coord }
    }

    /// `None` when the location is undefined or falls outside the coordinate
    /// system's domain.
    pub fn to_client(&self, location: Point, p: &DataPointAesthetics<'_>) -> Option<Point> {
        if !location.is_finite() {
            return None;
        }
        let adjusted = self.position.translate(location, p);
        if !adjusted.is_finite() {
            return None;
        }
        self.coord.to_client(adjusted)
    }

    /// Projects the point's own x/y aesthetics.
    pub fn to_client_point(&self, p: &DataPointAesthetics<'_>) -> Option<Point> {
        let location = p.finite_location()?;
        self.to_client(location, p)
    }

    /// Projects a data-space rect by adjusting both corners, then spanning.
    /// A zero width or height is widened so the shape stays visible.
    pub fn to_client_rect(&self, rect: Rect, p: &DataPointAesthetics<'_>) -> Option<Rect> {
        let origin = self.to_client(Point::new(rect.x, rect.y), p)?;
        let corner = self.to_client(Point::new(rect.right(), rect.bottom()), p)?;
        let mut client = Rect::from_corners(origin, corner);
        if client.width == 0.0 {
            client.width = THIN_SIDE;
        }
        if client.height == 0.0 {
            client.height = THIN_SIDE;
        }
        Some(client)
    }

    /// Projects every point of the snapshot, keeping index alignment.
    /// Undefined or out-of-domain points come back as `None`.
    pub fn to_client_by_index(&self, aesthetics: &Aesthetics) -> Vec<Option<Point>> {
        #[cfg(feature = "parallel-projection")]
        {
            (0..aesthetics.point_count())
                .into_par_iter()
                .map(|index| self.to_client_point(&aesthetics.point(index)))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            aesthetics
                .data_points()
                .map(|p| self.to_client_point(&p))
                .collect()
        }
    }
}

/// Converts a size aesthetic to a stroke width in pixels.
pub type StrokeScaler = fn(&DataPointAesthetics<'_>) -> f64;

/// Stroke width for line-like geometry, driven by the size aesthetic.
pub fn stroke_width_by_size(p: &DataPointAesthetics<'_>) -> f64 {
    p.size().unwrap_or(defaults::SIZE) * 2.0
}

/// Stroke width for point outlines, driven by the stroke aesthetic.
pub fn stroke_width_by_stroke(p: &DataPointAesthetics<'_>) -> f64 {
    p.stroke().unwrap_or(defaults::STROKE) * 2.0
}

/// How a data point's aesthetics translate into paint attributes.
#[derive(Clone, Copy)]
pub struct DecorationOptions {
    /// Apply the alpha aesthetic to the stroke as well as the fill.
    pub apply_alpha_to_all: bool,
    /// Paint the interior at all. Polylines pass `false`.
    pub filled: bool,
    pub stroke_scaler: StrokeScaler,
}

impl Default for DecorationOptions {
    fn default() -> Self {
        Self {
            apply_alpha_to_all: ALPHA_CONTROLS_BOTH,
            filled: true,
            stroke_scaler: stroke_width_by_size,
        }
    }
}

impl DecorationOptions {
    pub fn line() -> Self {
        Self {
            filled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alpha_on_stroke(mut self) -> Self {
        self.apply_alpha_to_all = true;
        self
    }

    #[must_use]
    pub fn with_stroke_scaler(mut self, scaler: StrokeScaler) -> Self {
        self.stroke_scaler = scaler;
        self
    }
}

/// Resolves one data point's aesthetics to paint attributes.
///
/// The alpha aesthetic only modulates colors that are themselves opaque; a
/// translucent color keeps its own alpha. A blank line type suppresses the
/// stroke entirely.
pub fn decorate(p: &DataPointAesthetics<'_>, options: &DecorationOptions) -> Decoration {
    let line_type = p.line_type().unwrap_or(defaults::LINE_TYPE);
    let alpha = p.alpha().unwrap_or(defaults::ALPHA);
    let stroke_width = (options.stroke_scaler)(p);

    let stroke = if line_type.is_blank() {
        None
    } else {
        let color = p.color().unwrap_or(defaults::COLOR);
        Some(if options.apply_alpha_to_all {
            modulate_alpha(color, alpha)
        } else {
            color
        })
    };

    let fill = if options.filled {
        Some(modulate_alpha(p.fill().unwrap_or(defaults::FILL), alpha))
    } else {
        None
    };

    Decoration {
        stroke,
        fill,
        stroke_width,
        dash: line_type.dash_array(stroke_width),
    }
}

/// Applies an aesthetic alpha to an opaque color; a color that already
/// carries transparency keeps its own alpha.
#[must_use]
pub fn modulate_alpha(color: Color, alpha: f64) -> Color {
    if color.alpha < 1.0 {
        color
    } else {
        color.with_alpha(alpha)
    }
}
