mod dodge;
mod jitter;
mod stack;

pub use dodge::DodgePos;
pub use jitter::{JitterDodgePos, JitterPos, NudgePos};
pub use stack::{StackPos, StackingMode};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::aesthetics::{Aesthetics, DataPointAesthetics};
use crate::core::types::Point;
use crate::error::{PlotError, PlotResult};

pub const DEFAULT_JITTER_SEED: u64 = 37;

/// Moves geometry in data space before projection.
///
/// Strategies are built per layer from its aesthetics snapshot, so repeated
/// renders of the same input translate identically.
pub trait PositionAdjustment: Send + Sync {
    /// `true` for strategies whose result depends on the layer's groups.
    fn handles_groups(&self) -> bool;

    fn translate(&self, location: Point, p: &DataPointAesthetics<'_>) -> Point;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosKind {
    Identity,
    Stack,
    Fill,
    Dodge,
    Jitter,
    Nudge,
    JitterDodge,
}

impl FromStr for PosKind {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        match value {
            "identity" => Ok(PosKind::Identity),
            "stack" => Ok(PosKind::Stack),
            "fill" => Ok(PosKind::Fill),
            "dodge" => Ok(PosKind::Dodge),
            "jitter" => Ok(PosKind::Jitter),
            "nudge" => Ok(PosKind::Nudge),
            "jitter_dodge" => Ok(PosKind::JitterDodge),
            _ => Err(PlotError::UnknownKind {
                kind: "position adjustment",
                value: value.to_owned(),
            }),
        }
    }
}

/// Serializable position configuration resolved into a strategy per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionSpec {
    Identity,
    Stack {
        #[serde(default)]
        mode: StackingMode,
    },
    Fill {
        #[serde(default)]
        mode: StackingMode,
    },
    Dodge {
        #[serde(default)]
        width: Option<f64>,
    },
    Jitter {
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    Nudge {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    JitterDodge {
        #[serde(default)]
        dodge_width: Option<f64>,
        #[serde(default)]
        jitter_width: Option<f64>,
        #[serde(default)]
        jitter_height: Option<f64>,
        #[serde(default = "default_seed")]
        seed: u64,
    },
}

fn default_seed() -> u64 {
    DEFAULT_JITTER_SEED
}

impl Default for PositionSpec {
    fn default() -> Self {
        PositionSpec::Identity
    }
}

impl PositionSpec {
    #[must_use]
    pub fn kind(&self) -> PosKind {
        match self {
            PositionSpec::Identity => PosKind::Identity,
            PositionSpec::Stack { .. } => PosKind::Stack,
            PositionSpec::Fill { .. } => PosKind::Fill,
            PositionSpec::Dodge { .. } => PosKind::Dodge,
            PositionSpec::Jitter { .. } => PosKind::Jitter,
            PositionSpec::Nudge { .. } => PosKind::Nudge,
            PositionSpec::JitterDodge { .. } => PosKind::JitterDodge,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, PositionSpec::Identity)
    }

    #[must_use]
    pub fn build(&self, aesthetics: &Aesthetics) -> Box<dyn PositionAdjustment> {
        match self {
            PositionSpec::Identity => Box::new(IdentityPos),
            PositionSpec::Stack { mode } => Box::new(StackPos::stack(aesthetics, *mode)),
            PositionSpec::Fill { mode } => Box::new(StackPos::fill(aesthetics, *mode)),
            PositionSpec::Dodge { width } => Box::new(DodgePos::new(aesthetics, *width)),
            PositionSpec::Jitter {
                width,
                height,
                seed,
            } => Box::new(JitterPos::new(aesthetics, *width, *height, *seed)),
            PositionSpec::Nudge { x, y } => Box::new(NudgePos::new(*x, *y)),
            PositionSpec::JitterDodge {
                dodge_width,
                jitter_width,
                jitter_height,
                seed,
            } => Box::new(JitterDodgePos::new(
                aesthetics,
                *dodge_width,
                *jitter_width,
                *jitter_height,
                *seed,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPos;

impl PositionAdjustment for IdentityPos {
    fn handles_groups(&self) -> bool {
        false
    }

    fn translate(&self, location: Point, _p: &DataPointAesthetics<'_>) -> Point {
        location
    }
}
