use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assemble::colorbar::ColorBarLayout;
use crate::assemble::layer::{line_type_for_level, shape_for_level, GeomKind, POINT_DIAMETER_RATIO};
use crate::core::aes::{Aes, AesKind};
use crate::core::aesthetics::AesOverrides;
use crate::core::scale::Scale;
use crate::core::types::{Point, Rect, Size, Span};
use crate::theme::LegendTheme;

/// Hard cap on break labels per legend; everything past it is dropped.
pub const MAX_LEGEND_LABELS: usize = 200;

/// Breaks requested from a continuous scale when none are set explicitly.
const TARGET_BREAK_COUNT: usize = 5;
/// Margin added around a key side after rounding it to an odd px count.
const KEY_MARGIN: f64 = 1.0;
/// Gap between a key glyph and its label.
const KEY_LABEL_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendDirection {
    /// Resolved to vertical at layout time.
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

/// User-facing legend configuration for one scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub row_count: Option<usize>,
    pub col_count: Option<usize>,
    pub by_row: bool,
    pub title: Option<String>,
    pub direction: LegendDirection,
}

impl LegendOptions {
    fn resolved_direction(&self) -> LegendDirection {
        match self.direction {
            LegendDirection::Auto => LegendDirection::Vertical,
            direction => direction,
        }
    }
}

/// One legend entry: a break label plus the key glyph of every layer that
/// contributes to it.
#[derive(Debug, Clone)]
pub struct LegendBreak {
    label: String,
    keys: Vec<LegendKey>,
}

impl LegendBreak {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn keys(&self) -> &[LegendKey] {
        &self.keys
    }

    fn min_key_side(&self) -> f64 {
        self.keys
            .iter()
            .map(|key| key.min_side)
            .fold(0.0, f64::max)
    }
}

/// Sample glyph drawn inside a legend key rectangle.
#[derive(Debug, Clone)]
pub struct LegendKey {
    geom: GeomKind,
    overrides: AesOverrides,
    min_side: f64,
}

impl LegendKey {
    #[must_use]
    pub fn geom(&self) -> GeomKind {
        self.geom
    }

    #[must_use]
    pub fn overrides(&self) -> &AesOverrides {
        &self.overrides
    }
}

/// Laid-out legend content in box-local px coordinates.
///
/// `breaks`, `key_rects` and `label_positions` run parallel in layout
/// order; labels anchor at their position's left center.
#[derive(Debug, Clone)]
pub struct LegendLayout {
    pub breaks: Vec<LegendBreak>,
    pub key_rects: Vec<Rect>,
    pub label_positions: Vec<Point>,
    pub rows: usize,
    pub cols: usize,
    /// Cell outlines, filled only when the theme asks for drawing debug.
    pub debug_outlines: Vec<Rect>,
}

#[derive(Debug, Clone)]
pub enum LegendBlock {
    Legend(LegendLayout),
    ColorBar(ColorBarLayout),
}

/// Sized guide box handed to the page layout engine.
#[derive(Debug, Clone)]
pub struct LegendBoxInfo {
    title: Option<String>,
    size: Size,
    block: LegendBlock,
}

impl LegendBoxInfo {
    pub(crate) fn new(title: Option<String>, size: Size, block: LegendBlock) -> Self {
        Self { title, size, block }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn block(&self) -> &LegendBlock {
        &self.block
    }
}

/// Collects the breaks of one named scale across layers, then lays the
/// legend out as a key/label grid.
#[derive(Debug, Clone)]
pub struct LegendAssembler {
    scale_name: String,
    options: LegendOptions,
    theme: LegendTheme,
    breaks: IndexMap<String, LegendBreak>,
}

impl LegendAssembler {
    pub fn new(scale_name: impl Into<String>, options: LegendOptions, theme: LegendTheme) -> Self {
        Self {
            scale_name: scale_name.into(),
            options,
            theme,
            breaks: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn scale_name(&self) -> &str {
        &self.scale_name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    /// Adds one layer's key glyphs, one per break of the scale. Breaks the
    /// mapper cannot turn into a visual value contribute nothing; labels
    /// already present merge instead of duplicating.
    pub fn add_layer(&mut self, geom: GeomKind, aes: Aes, scale: &Scale, domain: Option<Span>) {
        let breaks = scale.guide_breaks(Span::ensure_applicable(domain), TARGET_BREAK_COUNT);
        for (value, label) in breaks.values.iter().zip(&breaks.labels) {
            let Some(key) = legend_key(geom, aes, scale, *value) else {
                continue;
            };
            if let Some(existing) = self.breaks.get_mut(label) {
                existing.keys.push(key);
                continue;
            }
            if self.breaks.len() >= MAX_LEGEND_LABELS {
                warn!(
                    scale = %self.scale_name,
                    limit = MAX_LEGEND_LABELS,
                    "legend break limit reached, dropping label"
                );
                continue;
            }
            self.breaks.insert(
                label.clone(),
                LegendBreak {
                    label: label.clone(),
                    keys: vec![key],
                },
            );
        }
    }

    /// `None` when no break gathered any keys.
    #[must_use]
    pub fn assemble(self) -> Option<LegendBoxInfo> {
        let breaks: Vec<LegendBreak> = self
            .breaks
            .into_values()
            .filter(|brk| !brk.keys.is_empty())
            .collect();
        if breaks.is_empty() {
            return None;
        }

        let direction = self.options.resolved_direction();
        let count = breaks.len();
        let (rows, cols) = grid_shape(&self.options, direction, count);

        let mut key_sizes: Vec<Size> = breaks
            .iter()
            .map(|brk| {
                let side = pretty_key_side(self.theme.key_size.max(brk.min_key_side()));
                Size::new(side, side)
            })
            .collect();
        match direction {
            LegendDirection::Horizontal => {
                let max_height = key_sizes.iter().map(|size| size.height).fold(0.0, f64::max);
                for size in &mut key_sizes {
                    size.height = max_height;
                }
            }
            _ => {
                let max_width = key_sizes.iter().map(|size| size.width).fold(0.0, f64::max);
                for size in &mut key_sizes {
                    size.width = max_width;
                }
            }
        }

        let max_key = key_sizes.iter().copied().fold(Size::default(), Size::max);
        let max_label_width = breaks
            .iter()
            .map(|brk| brk.label.chars().count() as f64 * self.theme.label_char_width)
            .fold(0.0, f64::max);
        let cell = Size::new(
            max_key.width + KEY_LABEL_GAP + max_label_width,
            max_key.height.max(self.theme.label_line_height),
        );

        let mut key_rects = Vec::with_capacity(count);
        let mut label_positions = Vec::with_capacity(count);
        let mut debug_outlines = Vec::new();
        for (index, key_size) in key_sizes.iter().enumerate() {
            let (row, col) = if self.options.by_row {
                (index / cols, index % cols)
            } else {
                (index % rows, index / rows)
            };
            let origin_x = col as f64 * cell.width;
            let origin_y = row as f64 * cell.height;
            key_rects.push(Rect::new(
                origin_x,
                origin_y + (cell.height - key_size.height) / 2.0,
                key_size.width,
                key_size.height,
            ));
            label_positions.push(Point::new(
                origin_x + max_key.width + KEY_LABEL_GAP,
                origin_y + cell.height / 2.0,
            ));
            if self.theme.debug_drawing {
                debug_outlines.push(Rect::new(origin_x, origin_y, cell.width, cell.height));
            }
        }

        let content = Size::new(cols as f64 * cell.width, rows as f64 * cell.height);
        let size = if self.options.title.is_some() {
            Size::new(content.width, content.height + self.theme.label_line_height)
        } else {
            content
        };

        Some(LegendBoxInfo::new(
            self.options.title,
            size,
            LegendBlock::Legend(LegendLayout {
                breaks,
                key_rects,
                label_positions,
                rows,
                cols,
                debug_outlines,
            }),
        ))
    }
}

/// Grid dimensions; always satisfies `rows * cols >= count`.
fn grid_shape(
    options: &LegendOptions,
    direction: LegendDirection,
    count: usize,
) -> (usize, usize) {
    match (options.row_count, options.col_count) {
        (Some(rows), Some(cols)) => {
            let rows = rows.clamp(1, count);
            let cols = cols.clamp(1, count).max(count.div_ceil(rows));
            (rows, cols)
        }
        (Some(rows), None) => {
            let rows = rows.clamp(1, count);
            (rows, count.div_ceil(rows))
        }
        (None, Some(cols)) => {
            let cols = cols.clamp(1, count);
            (count.div_ceil(cols), cols)
        }
        (None, None) => match direction {
            LegendDirection::Horizontal => (1, count),
            _ => (count, 1),
        },
    }
}

/// Odd px side plus margin, so key borders land on whole pixels.
fn pretty_key_side(value: f64) -> f64 {
    (value / 2.0).floor() * 2.0 + 1.0 + KEY_MARGIN
}

fn legend_key(geom: GeomKind, aes: Aes, scale: &Scale, value: f64) -> Option<LegendKey> {
    let mut min_side = 0.0;
    let overrides = match aes.kind() {
        AesKind::Color => {
            let color = scale.mapper().map_color(value)?;
            AesOverrides::new().with_color(aes, color)
        }
        AesKind::Numeric => {
            let mapped = scale.mapper().map_numeric(value)?;
            if aes == Aes::Size {
                min_side = mapped * POINT_DIAMETER_RATIO;
            }
            AesOverrides::new().with_numeric(aes, mapped)
        }
        AesKind::Shape => AesOverrides::new().with_shape(shape_for_level(value)?),
        AesKind::LineType => AesOverrides::new().with_line_type(line_type_for_level(value)?),
        AesKind::Text | AesKind::FontFace => return None,
    };
    Some(LegendKey {
        geom,
        overrides,
        min_side,
    })
}
