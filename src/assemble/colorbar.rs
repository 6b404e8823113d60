use serde::{Deserialize, Serialize};

use crate::assemble::legend::{LegendBlock, LegendBoxInfo, LegendDirection};
use crate::core::aes::Color;
use crate::core::scale::Scale;
use crate::core::types::{Rect, Size, Span};
use crate::error::{PlotError, PlotResult};
use crate::theme::LegendTheme;

/// Fill bins cut across the gradient strip when not overridden.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// Bar length in key-size units when no explicit size is given.
const BAR_LENGTH_KEYS: f64 = 5.0;
/// Gap between the strip and its tick labels.
const LABEL_GAP: f64 = 5.0;
/// Tick breaks requested from the scale.
const TICK_COUNT: usize = 5;

/// User-facing color bar configuration for one continuous color scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBarOptions {
    /// Explicit bar width in px; derived from the theme key size otherwise.
    pub width: Option<f64>,
    /// Explicit bar height in px; derived from the theme key size otherwise.
    pub height: Option<f64>,
    pub bin_count: usize,
    pub title: Option<String>,
    pub direction: LegendDirection,
}

impl Default for ColorBarOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            bin_count: DEFAULT_BIN_COUNT,
            title: None,
            direction: LegendDirection::Auto,
        }
    }
}

/// One tick along the bar axis, offset in px from the bar origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBarTick {
    pub offset: f64,
    pub label: String,
}

/// Gradient strip cut into solid fill bins, plus its tick breaks.
///
/// Bin rectangles tile the bar exactly; for a vertical bar the domain
/// grows bottom-up, for a horizontal one left-to-right.
#[derive(Debug, Clone)]
pub struct ColorBarLayout {
    pub bar: Rect,
    pub bins: Vec<(Rect, Color)>,
    pub ticks: Vec<ColorBarTick>,
    pub horizontal: bool,
}

/// Builds the guide box for a continuous color scale.
///
/// Both the transform and the mapper must be continuous color producers;
/// anything else is a configuration error rather than an empty guide.
pub fn assemble_color_bar(
    scale: &Scale,
    domain: Option<Span>,
    options: &ColorBarOptions,
    theme: &LegendTheme,
) -> PlotResult<LegendBoxInfo> {
    if !scale.transform().is_continuous() {
        return Err(PlotError::InvalidConfig(format!(
            "color bar for scale `{}` needs a continuous transform",
            scale.name()
        )));
    }
    if !scale.mapper().is_continuous_color() {
        return Err(PlotError::InvalidConfig(format!(
            "color bar for scale `{}` needs a continuous color mapper",
            scale.name()
        )));
    }

    let domain = Span::ensure_applicable(domain);
    let bin_count = options.bin_count.max(1);
    let horizontal = matches!(options.direction, LegendDirection::Horizontal);

    let thickness = theme.key_size;
    let length = theme.key_size * BAR_LENGTH_KEYS;
    let (bar_width, bar_height) = if horizontal {
        (
            options.width.unwrap_or(length),
            options.height.unwrap_or(thickness),
        )
    } else {
        (
            options.width.unwrap_or(thickness),
            options.height.unwrap_or(length),
        )
    };
    let bar = Rect::new(0.0, 0.0, bar_width, bar_height);
    let axis_length = if horizontal { bar_width } else { bar_height };

    let mut bins = Vec::with_capacity(bin_count);
    for bin in 0..bin_count {
        let from = axis_length * bin as f64 / bin_count as f64;
        let to = axis_length * (bin + 1) as f64 / bin_count as f64;
        let center = domain.lower() + domain.length() * (bin as f64 + 0.5) / bin_count as f64;
        let color = scale
            .mapper()
            .map_color(center)
            .unwrap_or(Color::TRANSPARENT);
        let rect = if horizontal {
            Rect::new(from, 0.0, to - from, bar_height)
        } else {
            Rect::new(0.0, bar_height - to, bar_width, to - from)
        };
        bins.push((rect, color));
    }

    let breaks = scale.guide_breaks(domain, TICK_COUNT);
    let mut ticks = Vec::with_capacity(breaks.len());
    let mut max_label_chars = 0usize;
    for (value, label) in breaks.values.iter().zip(&breaks.labels) {
        if !domain.contains(*value) {
            continue;
        }
        let ratio = if domain.length() > 0.0 {
            (value - domain.lower()) / domain.length()
        } else {
            0.5
        };
        let offset = if horizontal {
            ratio * axis_length
        } else {
            axis_length - ratio * axis_length
        };
        max_label_chars = max_label_chars.max(label.chars().count());
        ticks.push(ColorBarTick {
            offset,
            label: label.clone(),
        });
    }

    let mut size = if horizontal {
        Size::new(bar_width, bar_height + theme.label_line_height)
    } else {
        Size::new(
            bar_width + LABEL_GAP + max_label_chars as f64 * theme.label_char_width,
            bar_height,
        )
    };
    if options.title.is_some() {
        size.height += theme.label_line_height;
    }

    Ok(LegendBoxInfo::new(
        options.title.clone(),
        size,
        LegendBlock::ColorBar(ColorBarLayout {
            bar,
            bins,
            ticks,
            horizontal,
        }),
    ))
}
