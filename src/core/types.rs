use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Continuous width/height pair in client px.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Location in either data or client space; the context decides which.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn lerp(self, other: Self, ratio: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * ratio,
            self.y + (other.y - self.y) * ratio,
        )
    }

    #[must_use]
    pub fn mid(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Chebyshev distance, the metric used when thinning dense polylines.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Spans the rectangle enclosing both corners, in any corner order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Closed interval with finite endpoints.
///
/// "No range yet" is represented as `Option<Span>::None` everywhere in the
/// crate; a `Span` value itself is always applicable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    lower: f64,
    upper: f64,
}

/// Spans shorter than this are widened before they reach a coordinate system.
const TINY_SPAN: f64 = 1e-10;

impl Span {
    /// Endpoint order is normalized; non-finite endpoints are rejected.
    pub fn new(a: f64, b: f64) -> PlotResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "span endpoints must be finite, got [{a}, {b}]"
            )));
        }
        Ok(Self {
            lower: a.min(b),
            upper: a.max(b),
        })
    }

    pub fn singleton(value: f64) -> PlotResult<Self> {
        Self::new(value, value)
    }

    #[must_use]
    pub fn lower(self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Null-safe union: `None` is the identity on either side.
    #[must_use]
    pub fn union_optional(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }

    /// Grows each end by the given amount; a non-finite result keeps the
    /// original endpoint.
    #[must_use]
    pub fn expanded(self, lower_by: f64, upper_by: f64) -> Self {
        let lower = self.lower - lower_by;
        let upper = self.upper + upper_by;
        let lower = if lower.is_finite() { lower } else { self.lower };
        let upper = if upper.is_finite() { upper } else { self.upper };
        Self {
            lower: lower.min(upper),
            upper: lower.max(upper),
        }
    }

    /// Final fallback before a span feeds a coordinate system: `None`
    /// becomes `[-0.5, 0.5]` and degenerate spans are widened around
    /// their center.
    #[must_use]
    pub fn ensure_applicable(span: Option<Self>) -> Self {
        match span {
            None => Self {
                lower: -0.5,
                upper: 0.5,
            },
            Some(span) if span.length() < TINY_SPAN => {
                let center = span.center();
                Self {
                    lower: center - 0.5,
                    upper: center + 0.5,
                }
            }
            Some(span) => span,
        }
    }
}
