/// Back-to-front face ordering for the painter's algorithm
use nalgebra::Point3;

use crate::face::Face;

/// Orders faces by the distance of their centers from a fixed camera.
///
/// This is centroid-based, not per-pixel: faces that interpenetrate or
/// differ a lot in size can come out in the wrong order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSorter {
    camera: Point3<f64>,
}

impl DepthSorter {
    pub fn new(camera: Point3<f64>) -> Self {
        Self { camera }
    }

    /// Camera on the +X axis at half the scene depth
    pub fn for_depth(depth: f64) -> Self {
        Self::new(Point3::new(depth / 2.0, 0.0, 0.0))
    }

    pub fn camera(&self) -> Point3<f64> {
        self.camera
    }

    /// Sort key of a face: the negated distance from its center to the
    /// camera, so the farthest face has the smallest key
    pub fn dist_from_cam(&self, face: &Face) -> f64 {
        -nalgebra::distance(&face.center().position, &self.camera)
    }

    /// Faces ordered farthest first, nearest last.
    ///
    /// Expects every face center to be current. Equal keys keep their input
    /// order.
    pub fn sort<'a>(&self, faces: impl IntoIterator<Item = &'a Face>) -> Vec<&'a Face> {
        let mut keyed: Vec<(f64, &Face)> = faces
            .into_iter()
            .map(|face| (self.dist_from_cam(face), face))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, face)| face).collect()
    }
}
