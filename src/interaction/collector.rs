use crate::core::types::{Point, Rect};
use crate::geom::reduce_indices;
use crate::interaction::TooltipParams;

/// Client-space tolerance for thinning hit-test paths. Tighter than the
/// render-side dedup so hover accuracy is kept.
const HIT_PATH_DEDUP_DISTANCE: f64 = 0.5;

/// Geometry a cursor can hit, in client space.
#[derive(Debug, Clone, PartialEq)]
pub enum HitShape {
    Point { center: Point, radius: f64 },
    Rect(Rect),
    Path { points: Vec<Point> },
    Polygon { points: Vec<Point> },
}

/// Maps a shape-local vertex index back to the source data index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexMapper {
    /// Local index is the data index.
    Identity,
    /// Whole shape belongs to one data point.
    Constant(usize),
    /// Per-vertex lookup table.
    Table(Vec<usize>),
}

impl IndexMapper {
    /// Out-of-table lookups fall back to the local index.
    #[must_use]
    pub fn map(&self, local: usize) -> usize {
        match self {
            IndexMapper::Identity => local,
            IndexMapper::Constant(index) => *index,
            IndexMapper::Table(table) => table.get(local).copied().unwrap_or(local),
        }
    }
}

/// One collected target: simplified geometry, the way back to the data
/// index, and how its tooltip should look.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPrototype {
    shape: HitShape,
    index_mapper: IndexMapper,
    params: TooltipParams,
}

impl TargetPrototype {
    #[must_use]
    pub fn shape(&self) -> &HitShape {
        &self.shape
    }

    #[must_use]
    pub fn index_mapper(&self) -> &IndexMapper {
        &self.index_mapper
    }

    #[must_use]
    pub fn params(&self) -> &TooltipParams {
        &self.params
    }
}

/// Sink for hit targets produced while building layer geometry.
pub trait TargetCollector {
    fn add_point(&mut self, index: usize, center: Point, radius: f64, params: TooltipParams);
    fn add_rectangle(&mut self, index: usize, rect: Rect, params: TooltipParams);
    fn add_path(&mut self, points: Vec<Point>, index_mapper: IndexMapper, params: TooltipParams);
    fn add_polygon(&mut self, points: Vec<Point>, index: usize, params: TooltipParams);
}

/// Accumulates target prototypes for one plot tile.
///
/// Paths are thinned on the way in; the local-to-data index map is composed
/// through the kept vertices so lookups still land on the original rows and
/// their true marker colors.
#[derive(Debug, Default)]
pub struct TileTargetCollector {
    flipped_axis: bool,
    prototypes: Vec<TargetPrototype>,
}

impl TileTargetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector for a tile whose axes are flipped; tooltip placement kinds
    /// are mirrored as targets come in.
    pub fn flipped() -> Self {
        Self {
            flipped_axis: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn prototypes(&self) -> &[TargetPrototype] {
        &self.prototypes
    }

    #[must_use]
    pub fn into_prototypes(self) -> Vec<TargetPrototype> {
        self.prototypes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    fn adjust(&self, mut params: TooltipParams) -> TooltipParams {
        if self.flipped_axis {
            params.tip_kind = params.tip_kind.flipped();
        }
        params
    }
}

impl TargetCollector for TileTargetCollector {
    fn add_point(&mut self, index: usize, center: Point, radius: f64, params: TooltipParams) {
        self.prototypes.push(TargetPrototype {
            shape: HitShape::Point { center, radius },
            index_mapper: IndexMapper::Constant(index),
            params: self.adjust(params),
        });
    }

    fn add_rectangle(&mut self, index: usize, rect: Rect, params: TooltipParams) {
        self.prototypes.push(TargetPrototype {
            shape: HitShape::Rect(rect),
            index_mapper: IndexMapper::Constant(index),
            params: self.adjust(params),
        });
    }

    fn add_path(&mut self, points: Vec<Point>, index_mapper: IndexMapper, params: TooltipParams) {
        let kept = reduce_indices(&points, HIT_PATH_DEDUP_DISTANCE);
        let table: Vec<usize> = kept.iter().map(|&local| index_mapper.map(local)).collect();
        let points: Vec<Point> = kept.into_iter().map(|local| points[local]).collect();
        self.prototypes.push(TargetPrototype {
            shape: HitShape::Path { points },
            index_mapper: IndexMapper::Table(table),
            params: self.adjust(params),
        });
    }

    fn add_polygon(&mut self, points: Vec<Point>, index: usize, params: TooltipParams) {
        self.prototypes.push(TargetPrototype {
            shape: HitShape::Polygon { points },
            index_mapper: IndexMapper::Constant(index),
            params: self.adjust(params),
        });
    }
}
