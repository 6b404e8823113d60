use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::aes::{Aes, Color};
use crate::core::data::DataValue;
use crate::core::types::Span;
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Identity,
    Log10,
}

impl FromStr for TransformKind {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        match value {
            "identity" => Ok(TransformKind::Identity),
            "log10" => Ok(TransformKind::Log10),
            _ => Err(PlotError::UnknownKind {
                kind: "transform",
                value: value.to_owned(),
            }),
        }
    }
}

/// Monotone value transform with optional user limits in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousTransform {
    kind: TransformKind,
    lower_limit: Option<f64>,
    upper_limit: Option<f64>,
}

impl ContinuousTransform {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            kind: TransformKind::Identity,
            lower_limit: None,
            upper_limit: None,
        }
    }

    #[must_use]
    pub fn log10() -> Self {
        Self {
            kind: TransformKind::Log10,
            lower_limit: None,
            upper_limit: None,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower_limit = lower;
        self.upper_limit = upper;
        self
    }

    #[must_use]
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// `None` for values outside the transform's domain.
    #[must_use]
    pub fn apply(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self.kind {
            TransformKind::Identity => Some(value),
            TransformKind::Log10 => {
                if value > 0.0 {
                    Some(value.log10())
                } else {
                    None
                }
            }
        }
    }

    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        match self.kind {
            TransformKind::Identity => value,
            TransformKind::Log10 => 10f64.powf(value),
        }
    }

    /// User limits carried into transformed space; non-finite results drop.
    #[must_use]
    pub fn defined_limits(&self) -> (Option<f64>, Option<f64>) {
        let lower = self.lower_limit.and_then(|limit| self.apply(limit));
        let upper = self.upper_limit.and_then(|limit| self.apply(limit));
        (lower, upper)
    }
}

/// Maps discrete labels onto consecutive level indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteTransform {
    levels: Vec<String>,
}

impl DiscreteTransform {
    #[must_use]
    pub fn new(levels: Vec<String>) -> Self {
        let mut seen = Vec::with_capacity(levels.len());
        for level in levels {
            if !seen.contains(&level) {
                seen.push(level);
            }
        }
        Self { levels: seen }
    }

    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    #[must_use]
    pub fn apply(&self, label: &str) -> Option<f64> {
        self.levels
            .iter()
            .position(|level| level == label)
            .map(|index| index as f64)
    }

    /// Index range covered by the levels; `None` when no levels exist.
    #[must_use]
    pub fn effective_domain(&self) -> Option<Span> {
        if self.levels.is_empty() {
            None
        } else {
            Span::new(0.0, (self.levels.len() - 1) as f64).ok()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Continuous(ContinuousTransform),
    Discrete(DiscreteTransform),
}

impl Transform {
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Transform::Continuous(_))
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Transform::Discrete(_))
    }
}

/// Maps transformed domain values to aesthetic values.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapper {
    IdentityNumeric,
    Continuous {
        domain: Span,
        range_lower: f64,
        range_upper: f64,
    },
    ColorGradient {
        domain: Span,
        low: Color,
        high: Color,
    },
    DiscreteNumeric {
        values: Vec<f64>,
    },
    DiscreteColors {
        colors: Vec<Color>,
    },
}

impl Mapper {
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Mapper::IdentityNumeric | Mapper::Continuous { .. } | Mapper::ColorGradient { .. }
        )
    }

    /// `true` only for mappers that yield a color for every domain value.
    #[must_use]
    pub fn is_continuous_color(&self) -> bool {
        matches!(self, Mapper::ColorGradient { .. })
    }

    #[must_use]
    pub fn map_numeric(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Mapper::IdentityNumeric => Some(value),
            Mapper::Continuous {
                domain,
                range_lower,
                range_upper,
            } => {
                let ratio = domain_ratio(*domain, value);
                Some(range_lower + (range_upper - range_lower) * ratio)
            }
            Mapper::DiscreteNumeric { values } => values.get(level_index(value)?).copied(),
            Mapper::ColorGradient { .. } | Mapper::DiscreteColors { .. } => None,
        }
    }

    #[must_use]
    pub fn map_color(&self, value: f64) -> Option<Color> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Mapper::ColorGradient { domain, low, high } => {
                let ratio = domain_ratio(*domain, value);
                Some(Color::rgba(
                    low.red + (high.red - low.red) * ratio,
                    low.green + (high.green - low.green) * ratio,
                    low.blue + (high.blue - low.blue) * ratio,
                    low.alpha + (high.alpha - low.alpha) * ratio,
                ))
            }
            Mapper::DiscreteColors { colors } => colors.get(level_index(value)?).copied(),
            _ => None,
        }
    }
}

fn domain_ratio(domain: Span, value: f64) -> f64 {
    if domain.length() <= 0.0 {
        return 0.5;
    }
    ((value - domain.lower()) / domain.length()).clamp(0.0, 1.0)
}

fn level_index(value: f64) -> Option<usize> {
    let index = value.round();
    if index < 0.0 { None } else { Some(index as usize) }
}

/// Explicit breaks in transformed domain space with display labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBreaks {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

impl ScaleBreaks {
    pub fn new(values: Vec<f64>, labels: Vec<String>) -> PlotResult<Self> {
        if values.len() != labels.len() {
            return Err(PlotError::InvalidConfig(format!(
                "break values and labels differ in length: {} vs {}",
                values.len(),
                labels.len()
            )));
        }
        Ok(Self { values, labels })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evenly stepped breaks on a nice 1/2/5 grid covering the span.
#[must_use]
pub fn linear_breaks(span: Span, target_count: usize) -> ScaleBreaks {
    let target = target_count.max(1) as f64;
    if span.length() <= 0.0 {
        let value = span.center();
        return ScaleBreaks {
            values: vec![value],
            labels: vec![format_break(value, 1.0)],
        };
    }

    let raw_step = span.length() / target;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual > 5.0 {
        10.0 * magnitude
    } else if residual > 2.0 {
        5.0 * magnitude
    } else if residual > 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    };

    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut tick = (span.lower() / step).ceil() * step;
    let limit = span.upper() + step * 1e-6;
    while tick <= limit {
        let snapped = (tick / step).round() * step;
        values.push(snapped);
        labels.push(format_break(snapped, step));
        tick += step;
    }
    ScaleBreaks { values, labels }
}

fn format_break(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else {
        let decimals = (-step.log10()).ceil().max(0.0) as usize;
        format!("{value:.decimals$}")
    }
}

/// One aesthetic's scale: transform, mapper, breaks, and expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    name: String,
    aes: Aes,
    transform: Transform,
    mapper: Mapper,
    breaks: Option<ScaleBreaks>,
    multiplicative_expand: f64,
    additive_expand: f64,
}

impl Scale {
    #[must_use]
    pub fn continuous(name: impl Into<String>, aes: Aes) -> Self {
        Self {
            name: name.into(),
            aes,
            transform: Transform::Continuous(ContinuousTransform::identity()),
            mapper: Mapper::IdentityNumeric,
            breaks: None,
            multiplicative_expand: 0.05,
            additive_expand: 0.0,
        }
    }

    #[must_use]
    pub fn discrete(name: impl Into<String>, aes: Aes, levels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            aes,
            transform: Transform::Discrete(DiscreteTransform::new(levels)),
            mapper: Mapper::IdentityNumeric,
            breaks: None,
            multiplicative_expand: 0.0,
            additive_expand: 0.6,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: Mapper) -> Self {
        self.mapper = mapper;
        self
    }

    #[must_use]
    pub fn with_breaks(mut self, breaks: ScaleBreaks) -> Self {
        self.breaks = Some(breaks);
        self
    }

    #[must_use]
    pub fn with_expand(mut self, multiplicative: f64, additive: f64) -> Self {
        self.multiplicative_expand = multiplicative;
        self.additive_expand = additive;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn aes(&self) -> Aes {
        self.aes
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[must_use]
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    #[must_use]
    pub fn breaks(&self) -> Option<&ScaleBreaks> {
        self.breaks.as_ref()
    }

    #[must_use]
    pub fn multiplicative_expand(&self) -> f64 {
        self.multiplicative_expand
    }

    #[must_use]
    pub fn additive_expand(&self) -> f64 {
        self.additive_expand
    }

    /// Data cell into transformed domain space; `None` skips the cell.
    #[must_use]
    pub fn transform_value(&self, value: &DataValue) -> Option<f64> {
        match &self.transform {
            Transform::Continuous(transform) => transform.apply(value.as_f64()?),
            Transform::Discrete(transform) => transform.apply(&value.label()),
        }
    }

    /// Breaks to present in guides: explicit ones, discrete levels, or a
    /// linear grid over the given domain.
    #[must_use]
    pub fn guide_breaks(&self, domain: Span, target_count: usize) -> ScaleBreaks {
        if let Some(breaks) = &self.breaks {
            return breaks.clone();
        }
        match &self.transform {
            Transform::Discrete(transform) => ScaleBreaks {
                values: (0..transform.levels().len()).map(|i| i as f64).collect(),
                labels: transform.levels().to_vec(),
            },
            Transform::Continuous(_) => linear_breaks(domain, target_count),
        }
    }
}
