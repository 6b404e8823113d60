use std::collections::HashMap;

use crate::core::aes::Aes;
use crate::core::aesthetics::{Aesthetics, DataPointAesthetics};
use crate::core::types::Point;
use crate::position::PositionAdjustment;

/// Places each group in its own horizontal slot around the shared X.
///
/// Geometry shrinks by the group count so dodged bars tile the slot the
/// undodged bar would have covered.
#[derive(Debug, Clone)]
pub struct DodgePos {
    width: Option<f64>,
    resolution: f64,
    group_count: usize,
    group_ranks: HashMap<i32, usize>,
}

impl DodgePos {
    #[must_use]
    pub fn new(aesthetics: &Aesthetics, width: Option<f64>) -> Self {
        let groups = aesthetics.distinct_groups();
        let group_ranks = groups
            .iter()
            .enumerate()
            .map(|(rank, &id)| (id, rank))
            .collect();
        Self {
            width,
            resolution: aesthetics.resolution(Aes::X),
            group_count: groups.len().max(1),
            group_ranks,
        }
    }

    fn slot_width(&self, p: &DataPointAesthetics<'_>) -> f64 {
        self.width
            .or_else(|| p.width().map(|width| width * self.resolution))
            .unwrap_or(self.resolution)
    }
}

impl PositionAdjustment for DodgePos {
    fn handles_groups(&self) -> bool {
        true
    }

    fn translate(&self, location: Point, p: &DataPointAesthetics<'_>) -> Point {
        let Some(x) = p.x().filter(|value| value.is_finite()) else {
            return location;
        };
        let count = self.group_count as f64;
        let rank = self.group_ranks.get(&p.group()).copied().unwrap_or(0) as f64;
        let width = self.slot_width(p);
        let scaled_x = x + (location.x - x) / count;
        let offset = width * ((rank + 0.5) / count - 0.5);
        Point::new(scaled_x + offset, location.y)
    }
}
