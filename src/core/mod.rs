pub mod aes;
pub mod aesthetics;
pub mod coord;
pub mod data;
pub mod primitives;
pub mod scale;
pub mod types;

pub use aes::{Aes, AesKind, AesValue, Color, FontFace, LineType, PointShape};
pub use aesthetics::{AesOverrides, Aesthetics, AestheticsBuilder, DataPointAesthetics};
pub use coord::{CartesianCoord, CoordKind, CoordinateSystem, FlippedCoord, PolarCoord};
pub use data::{DataFrame, DataValue};
pub use scale::{
    ContinuousTransform, DiscreteTransform, Mapper, Scale, ScaleBreaks, Transform, TransformKind,
};
pub use types::{Point, Rect, Size, Span, Viewport};
