use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::aes::Aes;
use crate::core::aesthetics::{Aesthetics, DataPointAesthetics};
use crate::core::types::Point;
use crate::position::{DodgePos, PositionAdjustment};

const DEFAULT_JITTER_RATIO: f64 = 0.4;

/// Seeded uniform noise scaled by the data resolution on each axis.
#[derive(Debug, Clone)]
pub struct JitterPos {
    dx: Vec<f64>,
    dy: Vec<f64>,
}

impl JitterPos {
    #[must_use]
    pub fn new(
        aesthetics: &Aesthetics,
        width: Option<f64>,
        height: Option<f64>,
        seed: u64,
    ) -> Self {
        let span_x = width.unwrap_or(DEFAULT_JITTER_RATIO) * aesthetics.resolution(Aes::X);
        let span_y = height.unwrap_or(DEFAULT_JITTER_RATIO) * aesthetics.resolution(Aes::Y);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut dx = Vec::with_capacity(aesthetics.point_count());
        let mut dy = Vec::with_capacity(aesthetics.point_count());
        for _ in 0..aesthetics.point_count() {
            dx.push(rng.gen_range(-1.0..=1.0) * span_x);
            dy.push(rng.gen_range(-1.0..=1.0) * span_y);
        }
        Self { dx, dy }
    }
}

impl PositionAdjustment for JitterPos {
    fn handles_groups(&self) -> bool {
        false
    }

    fn translate(&self, location: Point, p: &DataPointAesthetics<'_>) -> Point {
        let index = p.index();
        Point::new(
            location.x + self.dx.get(index).copied().unwrap_or(0.0),
            location.y + self.dy.get(index).copied().unwrap_or(0.0),
        )
    }
}

/// Fixed data-space offset.
#[derive(Debug, Clone, Copy)]
pub struct NudgePos {
    dx: f64,
    dy: f64,
}

impl NudgePos {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl PositionAdjustment for NudgePos {
    fn handles_groups(&self) -> bool {
        false
    }

    fn translate(&self, location: Point, _p: &DataPointAesthetics<'_>) -> Point {
        Point::new(location.x + self.dx, location.y + self.dy)
    }
}

/// Dodge between groups, then jitter within the slot.
#[derive(Debug, Clone)]
pub struct JitterDodgePos {
    dodge: DodgePos,
    jitter: JitterPos,
}

impl JitterDodgePos {
    #[must_use]
    pub fn new(
        aesthetics: &Aesthetics,
        dodge_width: Option<f64>,
        jitter_width: Option<f64>,
        jitter_height: Option<f64>,
        seed: u64,
    ) -> Self {
        Self {
            dodge: DodgePos::new(aesthetics, dodge_width),
            jitter: JitterPos::new(
                aesthetics,
                Some(jitter_width.unwrap_or(DEFAULT_JITTER_RATIO)),
                Some(jitter_height.unwrap_or(0.0)),
                seed,
            ),
        }
    }
}

impl PositionAdjustment for JitterDodgePos {
    fn handles_groups(&self) -> bool {
        true
    }

    fn translate(&self, location: Point, p: &DataPointAesthetics<'_>) -> Point {
        let dodged = self.dodge.translate(location, p);
        self.jitter.translate(dodged, p)
    }
}
