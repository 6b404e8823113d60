use serde::{Deserialize, Serialize};

use crate::core::aes::Color;

/// Visual defaults for plot furniture outside the data area.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub legend: LegendTheme,
    pub text: TextTheme,
}

/// Legend key and label sizing.
///
/// The crate has no text shaping; label sizes are estimated from the glyph
/// advance and line height below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendTheme {
    /// Base key tile side, in px.
    pub key_size: f64,
    pub background_fill: Color,
    /// Estimated glyph advance for label measurement, in px.
    pub label_char_width: f64,
    /// Estimated label line height, in px.
    pub label_line_height: f64,
    /// Draw layout outlines around legend parts for visual debugging.
    pub debug_drawing: bool,
}

impl Default for LegendTheme {
    fn default() -> Self {
        Self {
            key_size: 23.0,
            background_fill: Color::WHITE,
            label_char_width: 7.0,
            label_line_height: 15.0,
            debug_drawing: false,
        }
    }
}

/// Default font attributes for labels and titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTheme {
    pub font_size: f64,
    pub family: String,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            family: "sans-serif".to_owned(),
        }
    }
}
