pub mod helper;
pub mod path;
pub mod resample;
pub mod simplify;

pub use helper::{
    decorate, modulate_alpha, stroke_width_by_size, stroke_width_by_stroke, DecorationOptions,
    GeomHelper, StrokeScaler, ALPHA_CONTROLS_BOTH,
};
pub use path::{PathBuilder, PathData, PathFlavor, PathPoint, PolygonData, StepDirection};
pub use resample::{resample_path, resample_segment};
pub use simplify::{reduce_indices, PolylineSimplifier};
