/// Polyview Core Library - geometry engine for the polyhedron visualizer
///
/// Shapes are parsed from a small text format, rotated and scaled through
/// polar coordinates, and drawn back to front onto any [`Canvas`].

pub mod builder;
pub mod color;
pub mod depth;
pub mod error;
pub mod face;
pub mod polar;
pub mod projection;
pub mod scene;
pub mod shape;
pub mod transform;
pub mod vertex;

// Re-export commonly used types
pub use builder::{parse_shape, ShapeBuilder};
pub use color::Color;
pub use depth::DepthSorter;
pub use error::ShapeError;
pub use face::{Face, VertexId};
pub use projection::Viewport;
pub use scene::{Canvas, RenderMode, Scene, SceneConfig};
pub use shape::{FaceDef, Shape};
pub use transform::{Command, Transform};
pub use vertex::Vertex;
