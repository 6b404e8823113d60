//! plotgeom-rs: grammar-of-graphics geometry pipeline.
//!
//! This crate turns layered data mappings into renderable scenes: aesthetics
//! resolution, position adjustment, coordinate projection, path/polygon
//! construction, facet partitioning, legend assembly, and hit-target
//! collection for tooltips.

pub mod assemble;
pub mod core;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod position;
pub mod render;
pub mod telemetry;
pub mod theme;

pub use assemble::{PlotAssembler, PlotAssembly};
pub use error::{PlotError, PlotResult};
