use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::types::{Point, Rect};
use crate::interaction::collector::{HitShape, TargetPrototype};
use crate::interaction::{LookupSpace, LookupStrategy, TooltipHint};

/// Cursor distance beyond which lookups fail, in px. Hovering inside a
/// shape always counts as distance zero.
const LOOKUP_CUTOFF: f64 = 30.0;

/// Successful lookup: the source data row plus tooltip anchoring.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub data_index: usize,
    pub distance: f64,
    pub hint: TooltipHint,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    data_index: usize,
    anchor: Point,
    object_radius: f64,
    hit: bool,
}

/// Resolves cursor positions against the targets collected for one tile.
#[derive(Debug)]
pub struct TargetLocator {
    lookup_space: LookupSpace,
    lookup_strategy: LookupStrategy,
    prototypes: Vec<TargetPrototype>,
}

impl TargetLocator {
    pub fn new(
        lookup_space: LookupSpace,
        lookup_strategy: LookupStrategy,
        prototypes: Vec<TargetPrototype>,
    ) -> Self {
        Self {
            lookup_space,
            lookup_strategy,
            prototypes,
        }
    }

    #[must_use]
    pub fn lookup_space(&self) -> LookupSpace {
        self.lookup_space
    }

    #[must_use]
    pub fn lookup_strategy(&self) -> LookupStrategy {
        self.lookup_strategy
    }

    /// Closest target for the cursor, or `None` when nothing qualifies.
    ///
    /// `Hover` only accepts targets the cursor is on; `Nearest` accepts the
    /// closest target within the cutoff. Ties keep collection order.
    pub fn search(&self, cursor: Point) -> Option<LookupResult> {
        if self.lookup_strategy == LookupStrategy::None || self.lookup_space == LookupSpace::None {
            return None;
        }

        let candidates: SmallVec<[(usize, Candidate); 8]> = self
            .prototypes
            .iter()
            .enumerate()
            .filter_map(|(slot, prototype)| {
                self.candidate_for(prototype, cursor)
                    .map(|candidate| (slot, candidate))
            })
            .filter(|(_, candidate)| match self.lookup_strategy {
                LookupStrategy::Hover => candidate.hit,
                LookupStrategy::Nearest => candidate.distance <= LOOKUP_CUTOFF,
                LookupStrategy::None => false,
            })
            .collect();

        let (slot, best) = candidates
            .into_iter()
            .min_by_key(|(_, candidate)| OrderedFloat(candidate.distance))?;

        let params = self.prototypes[slot].params();
        Some(LookupResult {
            data_index: best.data_index,
            distance: best.distance,
            hint: TooltipHint {
                kind: params.tip_kind(),
                anchor: Some(best.anchor),
                object_radius: best.object_radius,
                fill: params.fill(),
                marker_colors: params.marker_colors().to_vec(),
            },
        })
    }

    fn candidate_for(&self, prototype: &TargetPrototype, cursor: Point) -> Option<Candidate> {
        match prototype.shape() {
            HitShape::Point { center, radius } => {
                let distance = self.space_distance(cursor, *center);
                Some(Candidate {
                    distance,
                    data_index: prototype.index_mapper().map(0),
                    anchor: *center,
                    object_radius: *radius,
                    hit: distance <= *radius,
                })
            }
            HitShape::Rect(rect) => {
                let inside = self.space_contains(*rect, cursor);
                let distance = if inside {
                    0.0
                } else {
                    self.space_distance(cursor, rect.center())
                };
                Some(Candidate {
                    distance,
                    data_index: prototype.index_mapper().map(0),
                    anchor: rect.center(),
                    object_radius: rect.width.min(rect.height) / 2.0,
                    hit: inside,
                })
            }
            HitShape::Path { points } => {
                let (local, anchor, distance) = self.nearest_on_path(points, cursor)?;
                Some(Candidate {
                    distance,
                    data_index: prototype.index_mapper().map(local),
                    anchor,
                    object_radius: 0.0,
                    hit: distance <= LOOKUP_CUTOFF,
                })
            }
            HitShape::Polygon { points } => {
                if contains(points, cursor) {
                    Some(Candidate {
                        distance: 0.0,
                        data_index: prototype.index_mapper().map(0),
                        anchor: cursor,
                        object_radius: 0.0,
                        hit: true,
                    })
                } else {
                    None
                }
            }
        }
    }

    fn space_distance(&self, cursor: Point, target: Point) -> f64 {
        match self.lookup_space {
            LookupSpace::X => (cursor.x - target.x).abs(),
            LookupSpace::Y => (cursor.y - target.y).abs(),
            LookupSpace::Xy => cursor.distance(target),
            LookupSpace::None => f64::INFINITY,
        }
    }

    fn space_contains(&self, rect: Rect, cursor: Point) -> bool {
        match self.lookup_space {
            LookupSpace::X => cursor.x >= rect.x && cursor.x <= rect.right(),
            LookupSpace::Y => cursor.y >= rect.y && cursor.y <= rect.bottom(),
            LookupSpace::Xy => rect.contains(cursor),
            LookupSpace::None => false,
        }
    }

    /// Closest point over all path segments. The reported local index is the
    /// nearer segment endpoint, so the index map stays valid.
    fn nearest_on_path(&self, points: &[Point], cursor: Point) -> Option<(usize, Point, f64)> {
        if points.is_empty() {
            return None;
        }
        if points.len() == 1 {
            return Some((0, points[0], self.space_distance(cursor, points[0])));
        }

        let mut best: Option<(usize, Point, f64)> = None;
        for (start, pair) in points.windows(2).enumerate() {
            let (closest, ratio) = project_on_segment(cursor, pair[0], pair[1]);
            let local = if ratio <= 0.5 { start } else { start + 1 };
            let distance = self.space_distance(cursor, closest);
            let better = match best {
                None => true,
                Some((_, _, current)) => distance < current,
            };
            if better {
                best = Some((local, closest, distance));
            }
        }
        best
    }
}

fn project_on_segment(cursor: Point, a: Point, b: Point) -> (Point, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;
    if length_squared == 0.0 {
        return (a, 0.0);
    }
    let ratio = ((cursor.x - a.x) * dx + (cursor.y - a.y) * dy) / length_squared;
    let ratio = ratio.clamp(0.0, 1.0);
    (a.lerp(b, ratio), ratio)
}

/// Even-odd ray casting.
fn contains(ring: &[Point], cursor: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > cursor.y) != (b.y > cursor.y) {
            let slope_x = (b.x - a.x) * (cursor.y - a.y) / (b.y - a.y) + a.x;
            if cursor.x < slope_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
