/// Viewport dimensions and the orthographic projection onto the screen
use nalgebra::Point3;

use crate::depth::DepthSorter;
use crate::vertex::Vertex;

/// Drawing area size, from which the scene scale is derived.
///
/// Screen U runs along the model's Y axis and screen V along Z. X never
/// reaches the screen; it only matters for depth through the camera, which
/// sits on +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scene depth, the mean of width and height
    pub fn depth(&self) -> f64 {
        (self.width as f64 + self.height as f64) / 2.0
    }

    pub fn width_multiplier(&self) -> f64 {
        0.5 * self.width as f64 / 2.0
    }

    pub fn height_multiplier(&self) -> f64 {
        0.5 * self.height as f64 / 2.0
    }

    /// Largest radius a vertex may be scaled to
    pub fn max_scale(&self) -> f64 {
        0.5 * self.depth() / 2.0
    }

    pub fn camera(&self) -> Point3<f64> {
        Point3::new(self.depth() / 2.0, 0.0, 0.0)
    }

    pub fn depth_sorter(&self) -> DepthSorter {
        DepthSorter::for_depth(self.depth())
    }

    /// Project a vertex to screen space `(u, v)`, origin at the center,
    /// v pointing up
    pub fn project(&self, vertex: &Vertex) -> (f64, f64) {
        (
            vertex.y() * self.width_multiplier(),
            vertex.z() * self.height_multiplier(),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(720, 720)
    }
}
