pub mod colorbar;
pub mod facet;
pub mod layer;
pub mod legend;
pub mod plot;
pub mod scales;

pub use colorbar::{
    assemble_color_bar, ColorBarLayout, ColorBarOptions, ColorBarTick, DEFAULT_BIN_COUNT,
};
pub use facet::{FacetTileInfo, PlotFacets};
pub use layer::{GeomKind, GeomLayer, GeomLayerBuilder};
pub use legend::{
    LegendAssembler, LegendBlock, LegendBoxInfo, LegendBreak, LegendDirection, LegendKey,
    LegendLayout, LegendOptions, MAX_LEGEND_LABELS,
};
pub use plot::{GuideSpec, PlotAssembler, PlotAssembly, PlotTile};
pub use scales::compute_xy_domains;
