use crate::error::PlotResult;
use crate::render::scene::{PlotScene, Primitive, SceneGroup};
use crate::render::Renderer;

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates scene content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_point_count: usize,
    pub last_path_count: usize,
    pub last_polygon_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
}

impl NullRenderer {
    fn count_group(&mut self, group: &SceneGroup) {
        for primitive in group.primitives() {
            match primitive {
                Primitive::Point(_) => self.last_point_count += 1,
                Primitive::Path(_) => self.last_path_count += 1,
                Primitive::Polygon(_) => self.last_polygon_count += 1,
                Primitive::Rect(_) => self.last_rect_count += 1,
                Primitive::Text(_) => self.last_text_count += 1,
            }
        }
        for child in group.children() {
            self.count_group(child);
        }
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &PlotScene) -> PlotResult<()> {
        scene.validate()?;
        *self = Self::default();
        self.count_group(scene.root());
        Ok(())
    }
}
