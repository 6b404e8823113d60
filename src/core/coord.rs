use std::f64::consts::TAU;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, Rect, Span};
use crate::error::{PlotError, PlotResult};

/// Projection between position-adjusted data space and client px space.
///
/// Implementations are pure and shared across threads during a render pass.
pub trait CoordinateSystem: Send + Sync {
    /// `None` when the location cannot be projected.
    fn to_client(&self, point: Point) -> Option<Point>;

    fn from_client(&self, point: Point) -> Option<Point>;

    /// Linear systems let straight segments map to straight segments, so
    /// path builders skip resampling.
    fn is_linear(&self) -> bool;

    fn flips_axis(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordKind {
    Cartesian,
    Flipped,
    Polar,
}

impl CoordKind {
    #[must_use]
    pub fn is_linear(self) -> bool {
        !matches!(self, CoordKind::Polar)
    }

    #[must_use]
    pub fn build(
        self,
        x_domain: Span,
        y_domain: Span,
        client: Rect,
    ) -> Box<dyn CoordinateSystem> {
        match self {
            CoordKind::Cartesian => Box::new(CartesianCoord::new(x_domain, y_domain, client)),
            CoordKind::Flipped => Box::new(FlippedCoord::new(x_domain, y_domain, client)),
            CoordKind::Polar => Box::new(PolarCoord::new(x_domain, y_domain, client)),
        }
    }
}

impl FromStr for CoordKind {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        match value {
            "cartesian" => Ok(CoordKind::Cartesian),
            "flipped" => Ok(CoordKind::Flipped),
            "polar" => Ok(CoordKind::Polar),
            _ => Err(PlotError::UnknownKind {
                kind: "coordinate system",
                value: value.to_owned(),
            }),
        }
    }
}

/// Linear mapping with the client y axis growing downward.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianCoord {
    x_domain: Span,
    y_domain: Span,
    client: Rect,
}

impl CartesianCoord {
    #[must_use]
    pub fn new(x_domain: Span, y_domain: Span, client: Rect) -> Self {
        Self {
            x_domain,
            y_domain,
            client,
        }
    }
}

impl CoordinateSystem for CartesianCoord {
    fn to_client(&self, point: Point) -> Option<Point> {
        let ratio_x = (point.x - self.x_domain.lower()) / self.x_domain.length();
        let ratio_y = (point.y - self.y_domain.lower()) / self.y_domain.length();
        let client = Point::new(
            self.client.x + ratio_x * self.client.width,
            self.client.bottom() - ratio_y * self.client.height,
        );
        client.is_finite().then_some(client)
    }

    fn from_client(&self, point: Point) -> Option<Point> {
        let ratio_x = (point.x - self.client.x) / self.client.width;
        let ratio_y = (self.client.bottom() - point.y) / self.client.height;
        let data = Point::new(
            self.x_domain.lower() + ratio_x * self.x_domain.length(),
            self.y_domain.lower() + ratio_y * self.y_domain.length(),
        );
        data.is_finite().then_some(data)
    }

    fn is_linear(&self) -> bool {
        true
    }
}

/// Cartesian system with X drawn vertically and Y horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct FlippedCoord {
    inner: CartesianCoord,
}

impl FlippedCoord {
    #[must_use]
    pub fn new(x_domain: Span, y_domain: Span, client: Rect) -> Self {
        Self {
            inner: CartesianCoord::new(y_domain, x_domain, client),
        }
    }
}

impl CoordinateSystem for FlippedCoord {
    fn to_client(&self, point: Point) -> Option<Point> {
        self.inner.to_client(Point::new(point.y, point.x))
    }

    fn from_client(&self, point: Point) -> Option<Point> {
        let data = self.inner.from_client(point)?;
        Some(Point::new(data.y, data.x))
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn flips_axis(&self) -> bool {
        true
    }
}

/// X mapped to angle (clockwise from twelve o'clock), Y to radius.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarCoord {
    x_domain: Span,
    y_domain: Span,
    center: Point,
    max_radius: f64,
}

impl PolarCoord {
    #[must_use]
    pub fn new(x_domain: Span, y_domain: Span, client: Rect) -> Self {
        Self {
            x_domain,
            y_domain,
            center: client.center(),
            max_radius: client.width.min(client.height) / 2.0,
        }
    }
}

impl CoordinateSystem for PolarCoord {
    fn to_client(&self, point: Point) -> Option<Point> {
        let angle = (point.x - self.x_domain.lower()) / self.x_domain.length() * TAU;
        let radius =
            (point.y - self.y_domain.lower()) / self.y_domain.length() * self.max_radius;
        if !(0.0..=self.max_radius).contains(&radius) {
            return None;
        }
        let client = Point::new(
            self.center.x + radius * angle.sin(),
            self.center.y - radius * angle.cos(),
        );
        client.is_finite().then_some(client)
    }

    fn from_client(&self, point: Point) -> Option<Point> {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let radius = (dx * dx + dy * dy).sqrt();
        let angle = dx.atan2(-dy).rem_euclid(TAU);
        let data = Point::new(
            self.x_domain.lower() + angle / TAU * self.x_domain.length(),
            self.y_domain.lower() + radius / self.max_radius * self.y_domain.length(),
        );
        data.is_finite().then_some(data)
    }

    fn is_linear(&self) -> bool {
        false
    }
}
