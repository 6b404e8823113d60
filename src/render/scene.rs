use crate::core::types::Viewport;
use crate::error::PlotResult;
use crate::render::primitives::{
    PathPrimitive, PointPrimitive, PolygonPrimitive, RectPrimitive, TextPrimitive,
};

/// One renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point(PointPrimitive),
    Path(PathPrimitive),
    Polygon(PolygonPrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Primitive::Point(point) => point.validate(),
            Primitive::Path(path) => path.validate(),
            Primitive::Polygon(polygon) => polygon.validate(),
            Primitive::Rect(rect) => rect.validate(),
            Primitive::Text(text) => text.validate(),
        }
    }
}

/// Named group of primitives; children draw after the group's own primitives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneGroup {
    name: String,
    primitives: Vec<Primitive>,
    children: Vec<SceneGroup>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitives: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SceneGroup) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn push_child(&mut self, child: SceneGroup) {
        self.children.push(child);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[must_use]
    pub fn children(&self) -> &[SceneGroup] {
        &self.children
    }

    /// Total primitive count including all nested groups.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
            + self
                .children
                .iter()
                .map(SceneGroup::primitive_count)
                .sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.children.iter().all(SceneGroup::is_empty)
    }

    pub fn validate(&self) -> PlotResult<()> {
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}

/// Fully assembled plot ready to hand to a [`crate::render::Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    viewport: Viewport,
    root: SceneGroup,
}

impl PlotScene {
    pub fn new(viewport: Viewport, root: SceneGroup) -> Self {
        Self { viewport, root }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn root(&self) -> &SceneGroup {
        &self.root
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(crate::error::PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.root.validate()
    }
}
