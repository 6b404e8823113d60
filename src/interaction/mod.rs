mod collector;
mod locator;

pub use collector::{
    HitShape, IndexMapper, TargetCollector, TargetPrototype, TileTargetCollector,
};
pub use locator::{LookupResult, TargetLocator};

use serde::{Deserialize, Serialize};

use crate::core::aes::Color;
use crate::core::types::Point;

/// Tooltip placement family for a hit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    /// Above the target, stem pointing down.
    #[default]
    Vertical,
    /// Beside the target, stem pointing sideways.
    Horizontal,
    /// Follows the pointer.
    Cursor,
    /// Pinned to the horizontal axis line.
    XAxis,
    /// Pinned to the vertical axis line.
    YAxis,
    /// Rotated to run along the target.
    Rotated,
}

impl TipKind {
    /// Counterpart under a flipped coordinate system.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            TipKind::Vertical => TipKind::Horizontal,
            TipKind::Horizontal => TipKind::Vertical,
            TipKind::XAxis => TipKind::YAxis,
            TipKind::YAxis => TipKind::XAxis,
            TipKind::Cursor => TipKind::Cursor,
            TipKind::Rotated => TipKind::Rotated,
        }
    }
}

/// Tooltip styling attached to a target when it is collected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipParams {
    fill: Option<Color>,
    marker_colors: Vec<Color>,
    tip_kind: TipKind,
}

impl TooltipParams {
    pub fn new(tip_kind: TipKind) -> Self {
        Self {
            tip_kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_marker_colors(mut self, colors: Vec<Color>) -> Self {
        self.marker_colors = colors;
        self
    }

    #[must_use]
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    #[must_use]
    pub fn marker_colors(&self) -> &[Color] {
        &self.marker_colors
    }

    #[must_use]
    pub fn tip_kind(&self) -> TipKind {
        self.tip_kind
    }
}

/// Resolved tooltip anchoring for one located target.
///
/// Rebuilt on every lookup; never cached across render passes.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipHint {
    pub kind: TipKind,
    pub anchor: Option<Point>,
    pub object_radius: f64,
    pub fill: Option<Color>,
    pub marker_colors: Vec<Color>,
}

/// Which cursor distance components participate in a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSpace {
    /// Horizontal distance only.
    X,
    /// Vertical distance only.
    Y,
    /// Euclidean distance.
    Xy,
    /// Lookups always miss.
    None,
}

/// How candidates are picked once distances are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Only targets the cursor is on or inside.
    Hover,
    /// Closest target within a fixed cutoff.
    Nearest,
    /// Lookups always miss.
    None,
}
