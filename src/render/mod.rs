mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{
    Decoration, PathPrimitive, PointPrimitive, PolygonPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use scene::{PlotScene, Primitive, SceneGroup};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `PlotScene` so
/// drawing code remains isolated from plot domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &PlotScene) -> PlotResult<()>;
}
