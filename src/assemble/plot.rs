use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assemble::colorbar::{assemble_color_bar, ColorBarOptions};
use crate::assemble::facet::{FacetTileInfo, PlotFacets};
use crate::assemble::layer::GeomLayer;
use crate::assemble::legend::{LegendAssembler, LegendBoxInfo, LegendOptions};
use crate::assemble::scales::compute_xy_domains;
use crate::core::aes::Aes;
use crate::core::coord::{CoordKind, CoordinateSystem};
use crate::core::data::DataFrame;
use crate::core::scale::Scale;
use crate::core::types::{Point, Rect, Span, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{LookupResult, TargetLocator, TileTargetCollector};
use crate::render::SceneGroup;
use crate::theme::Theme;

/// Outer margin around the tile grid.
const PLOT_MARGIN: f64 = 10.0;
/// Title strip height as a multiple of the theme font size.
const TITLE_HEIGHT_RATIO: f64 = 1.5;

/// Per-aesthetic guide override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuideSpec {
    /// Scale-appropriate guide: color bar for continuous color scales,
    /// legend otherwise.
    #[default]
    Auto,
    /// No guide for this aesthetic.
    None,
    Legend(LegendOptions),
    ColorBar(ColorBarOptions),
}

/// Per-tile frame of reference: how adjusted data space reaches the
/// tile's px bounds.
enum TileFrame {
    /// Live-map tiles project nothing; the map widget owns the space.
    Bogus,
    Square { coord: Box<dyn CoordinateSystem> },
}

impl TileFrame {
    fn square(kind: CoordKind, x_domain: Span, y_domain: Span, bounds: Rect) -> Self {
        TileFrame::Square {
            coord: kind.build(x_domain, y_domain, bounds),
        }
    }

    fn coord(&self) -> Option<&dyn CoordinateSystem> {
        match self {
            TileFrame::Bogus => None,
            TileFrame::Square { coord } => Some(coord.as_ref()),
        }
    }
}

/// One assembled facet tile: its scene tree plus per-layer hit indexes.
#[derive(Debug)]
pub struct PlotTile {
    info: FacetTileInfo,
    bounds: Rect,
    x_domain: Span,
    y_domain: Span,
    scene: SceneGroup,
    locators: Vec<TargetLocator>,
}

impl PlotTile {
    #[must_use]
    pub fn info(&self) -> &FacetTileInfo {
        &self.info
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn x_domain(&self) -> Span {
        self.x_domain
    }

    #[must_use]
    pub fn y_domain(&self) -> Span {
        self.y_domain
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGroup {
        &self.scene
    }

    /// One locator per layer, in layer order.
    #[must_use]
    pub fn locators(&self) -> &[TargetLocator] {
        &self.locators
    }

    /// Best lookup across every layer of the tile.
    #[must_use]
    pub fn locate(&self, cursor: Point) -> Option<LookupResult> {
        self.locators
            .iter()
            .filter_map(|locator| locator.search(cursor))
            .min_by_key(|result| OrderedFloat(result.distance))
    }
}

/// Fully assembled plot: renderable tiles plus guide boxes for the page
/// layout engine. Assembly is deterministic for fixed inputs.
#[derive(Debug)]
pub struct PlotAssembly {
    viewport: Viewport,
    tiles: Vec<PlotTile>,
    legend_boxes: Vec<LegendBoxInfo>,
    title: Option<String>,
}

impl PlotAssembly {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn tiles(&self) -> &[PlotTile] {
        &self.tiles
    }

    #[must_use]
    pub fn legend_boxes(&self) -> &[LegendBoxInfo] {
        &self.legend_boxes
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Scene tree of every tile under one root.
    #[must_use]
    pub fn scene(&self) -> SceneGroup {
        let mut root = SceneGroup::new("plot");
        for tile in &self.tiles {
            root.push_child(tile.scene.clone());
        }
        root
    }
}

/// Turns layers, scales, facets and theme into a [`PlotAssembly`].
///
/// Configuration is validated up front; `assemble` itself is a pure
/// function of the inputs and the viewport.
#[derive(Debug)]
pub struct PlotAssembler {
    layers: Vec<GeomLayer>,
    scales: IndexMap<Aes, Scale>,
    facets: PlotFacets,
    coord_kind: CoordKind,
    theme: Theme,
    guides: IndexMap<Aes, GuideSpec>,
    legends_enabled: bool,
    title: Option<String>,
}

impl PlotAssembler {
    /// Default continuous x/y scales are installed; `with_scale` replaces
    /// them when the plot needs discrete or transformed axes.
    pub fn new(layers: Vec<GeomLayer>) -> PlotResult<Self> {
        if layers.is_empty() {
            return Err(PlotError::InvalidConfig(
                "a plot needs at least one layer".to_owned(),
            ));
        }
        let mut scales = IndexMap::new();
        scales.insert(Aes::X, Scale::continuous("x", Aes::X));
        scales.insert(Aes::Y, Scale::continuous("y", Aes::Y));
        Ok(Self {
            layers,
            scales,
            facets: PlotFacets::undefined(),
            coord_kind: CoordKind::Cartesian,
            theme: Theme::default(),
            guides: IndexMap::new(),
            legends_enabled: true,
            title: None,
        })
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scales.insert(scale.aes(), scale);
        self
    }

    #[must_use]
    pub fn with_facets(mut self, facets: PlotFacets) -> Self {
        self.facets = facets;
        self
    }

    #[must_use]
    pub fn with_coord(mut self, coord_kind: CoordKind) -> Self {
        self.coord_kind = coord_kind;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_guide(mut self, aes: Aes, guide: GuideSpec) -> Self {
        self.guides.insert(aes, guide);
        self
    }

    #[must_use]
    pub fn with_legends_enabled(mut self, enabled: bool) -> Self {
        self.legends_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn assemble(&self, viewport: Viewport) -> PlotResult<PlotAssembly> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let has_content = self
            .layers
            .iter()
            .any(|layer| layer.geom().is_live_map() || !layer.data().is_empty());
        if !has_content {
            return Err(PlotError::InvalidConfig(
                "every layer of the plot is empty".to_owned(),
            ));
        }

        let tile_data: Vec<Vec<DataFrame>> = self
            .layers
            .iter()
            .map(|layer| self.facets.data_by_tile(layer.data()))
            .collect();
        let domains = compute_xy_domains(&self.layers, &tile_data, &self.scales, &self.facets)?;

        let cols = self.facets.col_count();
        let rows = self.facets.row_count();
        let title_height = if self.title.is_some() {
            self.theme.text.font_size * TITLE_HEIGHT_RATIO
        } else {
            0.0
        };
        let content = Rect::new(
            PLOT_MARGIN,
            PLOT_MARGIN + title_height,
            f64::from(viewport.width) - 2.0 * PLOT_MARGIN,
            f64::from(viewport.height) - 2.0 * PLOT_MARGIN - title_height,
        );
        if content.width < 1.0 || content.height < 1.0 {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let tile_width = content.width / cols as f64;
        let tile_height = content.height / rows as f64;

        let live_map = self.layers.iter().any(|layer| layer.geom().is_live_map());

        let mut tiles = Vec::with_capacity(self.facets.num_tiles());
        for (tile_index, info) in self.facets.tile_infos().into_iter().enumerate() {
            let bounds = Rect::new(
                content.x + info.col as f64 * tile_width,
                content.y + info.row as f64 * tile_height,
                tile_width,
                tile_height,
            );
            let (x_domain, y_domain) = domains[tile_index];
            let frame = if live_map {
                TileFrame::Bogus
            } else {
                TileFrame::square(self.coord_kind, x_domain, y_domain, bounds)
            };

            let mut scene = SceneGroup::new(format!("tile-{tile_index}"));
            let mut locators = Vec::new();
            if let Some(coord) = frame.coord() {
                let flipped = coord.flips_axis();
                for (layer, per_tile) in self.layers.iter().zip(&tile_data) {
                    let aesthetics = layer.build_aesthetics(&per_tile[tile_index], &self.scales)?;
                    let mut collector = if flipped {
                        TileTargetCollector::flipped()
                    } else {
                        TileTargetCollector::new()
                    };
                    let group = layer.build_scene(&aesthetics, coord, &self.theme, &mut collector)?;
                    scene.push_child(group);
                    let (space, strategy) = layer.geom().lookup_spec();
                    locators.push(TargetLocator::new(
                        space,
                        strategy,
                        collector.into_prototypes(),
                    ));
                }
            }

            tiles.push(PlotTile {
                info,
                bounds,
                x_domain,
                y_domain,
                scene,
                locators,
            });
        }

        let legend_boxes = if self.legends_enabled {
            self.assemble_guides()?
        } else {
            Vec::new()
        };

        debug!(
            tiles = tiles.len(),
            legend_boxes = legend_boxes.len(),
            "assembled plot"
        );
        Ok(PlotAssembly {
            viewport,
            tiles,
            legend_boxes,
            title: self.title.clone(),
        })
    }

    fn assemble_guides(&self) -> PlotResult<Vec<LegendBoxInfo>> {
        let mut legends: IndexMap<String, LegendAssembler> = IndexMap::new();
        let mut boxes = Vec::new();

        for (&aes, scale) in &self.scales {
            if aes.is_positional() {
                continue;
            }
            let guide = self.guides.get(&aes).cloned().unwrap_or_default();
            if matches!(guide, GuideSpec::None) {
                continue;
            }
            let mapped_layers: Vec<&GeomLayer> = self
                .layers
                .iter()
                .filter(|layer| layer.show_legend() && layer.mapped_variable(aes).is_some())
                .collect();
            if mapped_layers.is_empty() {
                continue;
            }
            let domain = self.guide_domain(aes, scale);

            let use_color_bar = match &guide {
                GuideSpec::ColorBar(_) => true,
                GuideSpec::Auto => {
                    scale.transform().is_continuous() && scale.mapper().is_continuous_color()
                }
                _ => false,
            };
            if use_color_bar {
                let options = match guide {
                    GuideSpec::ColorBar(options) => options,
                    _ => ColorBarOptions::default(),
                };
                boxes.push(assemble_color_bar(
                    scale,
                    domain,
                    &options,
                    &self.theme.legend,
                )?);
                continue;
            }

            let options = match guide {
                GuideSpec::Legend(options) => options,
                _ => LegendOptions::default(),
            };
            let assembler = legends.entry(scale.name().to_owned()).or_insert_with(|| {
                LegendAssembler::new(scale.name(), options, self.theme.legend.clone())
            });
            for layer in mapped_layers {
                assembler.add_layer(layer.geom(), aes, scale, domain);
            }
        }

        for assembler in legends.into_values() {
            if let Some(info) = assembler.assemble() {
                boxes.push(info);
            }
        }
        Ok(boxes)
    }

    /// Transformed span of every value mapped to the aesthetic, across all
    /// layers; feeds guide break computation.
    fn guide_domain(&self, aes: Aes, scale: &Scale) -> Option<Span> {
        let mut span: Option<Span> = None;
        for layer in &self.layers {
            let Some(variable) = layer.mapped_variable(aes) else {
                continue;
            };
            let Some(column) = layer.data().column(variable) else {
                continue;
            };
            for value in column {
                if let Some(value) = scale
                    .transform_value(value)
                    .filter(|value| value.is_finite())
                {
                    span = Span::union_optional(span, Span::singleton(value).ok());
                }
            }
        }
        span
    }
}
