use indexmap::IndexMap;
use tracing::debug;

use crate::assemble::facet::PlotFacets;
use crate::assemble::layer::GeomLayer;
use crate::core::aes::Aes;
use crate::core::aesthetics::Aesthetics;
use crate::core::data::DataFrame;
use crate::core::scale::{Scale, Transform};
use crate::core::types::Span;
use crate::error::PlotResult;

/// Final per-tile X and Y domains in transformed space, one pair per tile
/// in row-major tile order.
///
/// `tile_data` pairs up with `layers`: `tile_data[i][tile]` is the data for
/// layer `i` on that tile. Domains cover position-adjusted locations plus
/// the breadth of sized geometry, then defined scale limits, facet
/// free/shared policy, and scale expansion are applied in that order.
pub fn compute_xy_domains(
    layers: &[GeomLayer],
    tile_data: &[Vec<DataFrame>],
    scales: &IndexMap<Aes, Scale>,
    facets: &PlotFacets,
) -> PlotResult<Vec<(Span, Span)>> {
    let tile_count = facets.num_tiles();
    let x_scale = scales.get(&Aes::X);
    let y_scale = scales.get(&Aes::Y);
    let zero_based_y = layers.iter().any(|layer| layer.geom().zero_based());

    let mut x_raw: Vec<Option<Span>> = vec![None; tile_count];
    let mut y_raw: Vec<Option<Span>> = vec![None; tile_count];

    for (layer, per_tile) in layers.iter().zip(tile_data) {
        if layer.geom().is_live_map() {
            continue;
        }
        for (tile, data) in per_tile.iter().enumerate().take(tile_count) {
            let aesthetics = layer.dry_run_aesthetics(data, scales)?;
            let (x, y) = layer_xy_span(layer, &aesthetics);
            x_raw[tile] = Span::union_optional(x_raw[tile], x);
            y_raw[tile] = Span::union_optional(y_raw[tile], y);
        }
    }

    for span in &mut x_raw {
        *span = with_defined_limits(*span, x_scale);
    }
    for span in &mut y_raw {
        *span = with_defined_limits(*span, y_scale);
    }

    if !facets.free_h_scale() {
        let shared = x_raw
            .iter()
            .fold(None, |acc, span| Span::union_optional(acc, *span));
        x_raw.fill(shared);
    }
    if !facets.free_v_scale() {
        let shared = y_raw
            .iter()
            .fold(None, |acc, span| Span::union_optional(acc, *span));
        y_raw.fill(shared);
    }

    let domains: Vec<(Span, Span)> = x_raw
        .into_iter()
        .zip(y_raw)
        .map(|(x, y)| {
            let x = Span::ensure_applicable(x.map(|span| expand_domain(span, x_scale, false)));
            let y =
                Span::ensure_applicable(y.map(|span| expand_domain(span, y_scale, zero_based_y)));
            (x, y)
        })
        .collect();
    debug!(
        tiles = tile_count,
        layers = layers.len(),
        "computed xy domains"
    );
    Ok(domains)
}

/// Raw span of one layer on one tile: position-adjusted locations, unioned
/// with size-expanded locations for sized geometry, plus the zero line for
/// zero-based geometry.
fn layer_xy_span(layer: &GeomLayer, aesthetics: &Aesthetics) -> (Option<Span>, Option<Span>) {
    let (mut x, mut y) = span_after_position(layer, aesthetics);
    let renders = layer.geom().renders();
    if renders.contains(&Aes::Width) {
        x = Span::union_optional(
            x,
            span_after_size_expand(aesthetics, Aes::X, Aes::Width, layer.geom().default_breadth()),
        );
    }
    if renders.contains(&Aes::Height) {
        y = Span::union_optional(
            y,
            span_after_size_expand(aesthetics, Aes::Y, Aes::Height, None),
        );
    }
    if layer.geom().zero_based() {
        y = Span::union_optional(y, Span::singleton(0.0).ok());
    }
    (x, y)
}

fn span_after_position(
    layer: &GeomLayer,
    aesthetics: &Aesthetics,
) -> (Option<Span>, Option<Span>) {
    if layer.position().is_identity() {
        return (aesthetics.range(Aes::X), aesthetics.range(Aes::Y));
    }

    let position = layer.position().build(aesthetics);
    let mut x: Option<Span> = None;
    let mut y: Option<Span> = None;
    for p in aesthetics.data_points() {
        let Some(location) = p.finite_location() else {
            continue;
        };
        let moved = position.translate(location, &p);
        if moved.x.is_finite() {
            x = Span::union_optional(x, Span::singleton(moved.x).ok());
        }
        if moved.y.is_finite() {
            y = Span::union_optional(y, Span::singleton(moved.y).ok());
        }
    }
    (x, y)
}

/// Span enclosing `location ± resolution * size / 2` over every data point.
fn span_after_size_expand(
    aesthetics: &Aesthetics,
    location_aes: Aes,
    size_aes: Aes,
    default_size: Option<f64>,
) -> Option<Span> {
    if !aesthetics.defines(size_aes) && default_size.is_none() {
        return aesthetics.range(location_aes);
    }
    let resolution = aesthetics.resolution(location_aes);
    let mut span: Option<Span> = None;
    for p in aesthetics.data_points() {
        let Some(location) = p.numeric(location_aes).filter(|value| value.is_finite()) else {
            continue;
        };
        let size = p
            .numeric(size_aes)
            .or(default_size)
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        let expand = resolution * size.abs() / 2.0;
        span = Span::union_optional(span, Span::new(location - expand, location + expand).ok());
    }
    span
}

/// Continuous limits override the matching domain end; discrete levels are
/// always part of the domain, present in the tile's data or not.
fn with_defined_limits(span: Option<Span>, scale: Option<&Scale>) -> Option<Span> {
    let Some(scale) = scale else {
        return span;
    };
    match scale.transform() {
        Transform::Continuous(transform) => {
            let (lower, upper) = transform.defined_limits();
            match (lower, upper, span) {
                (None, None, span) => span,
                (Some(lower), Some(upper), _) => Span::new(lower, upper).ok(),
                (Some(lower), None, Some(base)) => Span::new(lower, base.upper().max(lower)).ok(),
                (None, Some(upper), Some(base)) => Span::new(base.lower().min(upper), upper).ok(),
                (Some(lower), None, None) => Span::singleton(lower).ok(),
                (None, Some(upper), None) => Span::singleton(upper).ok(),
            }
        }
        Transform::Discrete(transform) => {
            Span::union_optional(span, transform.effective_domain())
        }
    }
}

/// Multiplicative/additive scale expansion, held back at a zero endpoint
/// when the domain is zero-based.
fn expand_domain(span: Span, scale: Option<&Scale>, zero_based: bool) -> Span {
    let (multiplicative, additive) = match scale {
        Some(scale) => (scale.multiplicative_expand(), scale.additive_expand()),
        None => (0.0, 0.0),
    };
    let amount = span.length() * multiplicative + additive;
    let lower_by = if zero_based && span.lower() == 0.0 {
        0.0
    } else {
        amount
    };
    let upper_by = if zero_based && span.upper() == 0.0 {
        0.0
    } else {
        amount
    };
    span.expanded(lower_by, upper_by)
}
