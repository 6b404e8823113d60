use std::collections::BTreeMap;
use std::collections::HashMap;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::aesthetics::{Aesthetics, DataPointAesthetics};
use crate::core::types::Point;
use crate::position::PositionAdjustment;

/// How points sharing an X column combine into one stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingMode {
    /// One slot per group: the group's largest-magnitude value represents
    /// it, slots ordered by ascending group id.
    #[default]
    Groups,
    /// Every point stacks on all previous points at the same X, in
    /// encounter order.
    All,
}

/// Cumulative vertical offsets; positive and negative values stack away
/// from zero independently.
#[derive(Debug, Clone)]
pub struct StackPos {
    offsets: Vec<f64>,
    divisors: Vec<f64>,
}

impl StackPos {
    #[must_use]
    pub fn stack(aesthetics: &Aesthetics, mode: StackingMode) -> Self {
        Self::build(aesthetics, mode, false)
    }

    /// Stack, then normalize each X column so stacked totals reach 1.0
    /// (or -1.0 below the axis).
    #[must_use]
    pub fn fill(aesthetics: &Aesthetics, mode: StackingMode) -> Self {
        Self::build(aesthetics, mode, true)
    }

    fn build(aesthetics: &Aesthetics, mode: StackingMode, normalize: bool) -> Self {
        match mode {
            StackingMode::Groups => Self::build_grouped(aesthetics, normalize),
            StackingMode::All => Self::build_flat(aesthetics, normalize),
        }
    }

    fn build_grouped(aesthetics: &Aesthetics, normalize: bool) -> Self {
        let point_count = aesthetics.point_count();
        // Representative value per (x, group), split by sign.
        let mut columns: IndexMap<OrderedFloat<f64>, BTreeMap<i32, (f64, f64)>> = IndexMap::new();
        for p in aesthetics.data_points() {
            let Some((x, y)) = finite_xy(&p) else {
                continue;
            };
            let slot = columns
                .entry(OrderedFloat(x))
                .or_default()
                .entry(p.group())
                .or_insert((0.0, 0.0));
            if y >= 0.0 {
                slot.0 = slot.0.max(y);
            } else {
                slot.1 = slot.1.min(y);
            }
        }

        let mut bases: HashMap<(OrderedFloat<f64>, i32), (f64, f64)> = HashMap::new();
        let mut totals: HashMap<OrderedFloat<f64>, (f64, f64)> = HashMap::new();
        for (x, groups) in &columns {
            let mut positive = 0.0;
            let mut negative = 0.0;
            for (&group, &(pos_repr, neg_repr)) in groups {
                bases.insert((*x, group), (positive, negative));
                positive += pos_repr;
                negative += neg_repr;
            }
            totals.insert(*x, (positive, negative));
        }

        let mut offsets = vec![0.0; point_count];
        let mut divisors = vec![1.0; point_count];
        for p in aesthetics.data_points() {
            let Some((x, y)) = finite_xy(&p) else {
                continue;
            };
            let key = (OrderedFloat(x), p.group());
            if let Some(&(pos_base, neg_base)) = bases.get(&key) {
                offsets[p.index()] = if y >= 0.0 { pos_base } else { neg_base };
            }
            if normalize {
                if let Some(&(pos_total, neg_total)) = totals.get(&OrderedFloat(x)) {
                    divisors[p.index()] = column_divisor(y, pos_total, neg_total);
                }
            }
        }
        Self { offsets, divisors }
    }

    fn build_flat(aesthetics: &Aesthetics, normalize: bool) -> Self {
        let point_count = aesthetics.point_count();
        let mut totals: IndexMap<OrderedFloat<f64>, (f64, f64)> = IndexMap::new();
        for p in aesthetics.data_points() {
            let Some((x, y)) = finite_xy(&p) else {
                continue;
            };
            let total = totals.entry(OrderedFloat(x)).or_insert((0.0, 0.0));
            if y >= 0.0 {
                total.0 += y;
            } else {
                total.1 += y;
            }
        }

        let mut running: IndexMap<OrderedFloat<f64>, (f64, f64)> = IndexMap::new();
        let mut offsets = vec![0.0; point_count];
        let mut divisors = vec![1.0; point_count];
        for p in aesthetics.data_points() {
            let Some((x, y)) = finite_xy(&p) else {
                continue;
            };
            let key = OrderedFloat(x);
            let cursor = running.entry(key).or_insert((0.0, 0.0));
            if y >= 0.0 {
                offsets[p.index()] = cursor.0;
                cursor.0 += y;
            } else {
                offsets[p.index()] = cursor.1;
                cursor.1 += y;
            }
            if normalize {
                if let Some(&(pos_total, neg_total)) = totals.get(&key) {
                    divisors[p.index()] = column_divisor(y, pos_total, neg_total);
                }
            }
        }
        Self { offsets, divisors }
    }
}

fn finite_xy(p: &DataPointAesthetics<'_>) -> Option<(f64, f64)> {
    let x = p.x().filter(|value| value.is_finite())?;
    let y = p.y().filter(|value| value.is_finite())?;
    Some((x, y))
}

fn column_divisor(y: f64, pos_total: f64, neg_total: f64) -> f64 {
    let total = if y >= 0.0 { pos_total } else { neg_total.abs() };
    if total > 0.0 { total } else { 1.0 }
}

impl PositionAdjustment for StackPos {
    fn handles_groups(&self) -> bool {
        true
    }

    fn translate(&self, location: Point, p: &DataPointAesthetics<'_>) -> Point {
        let index = p.index();
        let offset = self.offsets.get(index).copied().unwrap_or(0.0);
        let divisor = self.divisors.get(index).copied().unwrap_or(1.0);
        Point::new(location.x, (location.y + offset) / divisor)
    }
}
