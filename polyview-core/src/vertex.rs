/// Vertices of a shape and their in-place transforms
use nalgebra::{distance, Point3};

use crate::polar::{to_cartesian, to_polar};

/// A 3D point plus the number of nearest vertices it connects to in
/// wireframe mode.
///
/// Equality compares positions only; `edge_count` is not part of identity.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f64>,
    edge_count: usize,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64, edge_count: usize) -> Self {
        Self {
            position: Point3::new(x, y, z),
            edge_count,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Euclidean distance to another vertex
    pub fn calc_dist(&self, other: &Vertex) -> f64 {
        distance(&self.position, &other.position)
    }

    /// The `edge_count` vertices closest to this one.
    ///
    /// `vertices` is expected to contain `self`; the closest entry (distance
    /// zero) is skipped. Equidistant vertices keep their input order.
    pub fn neighbours<'a>(&self, vertices: &'a [Vertex]) -> Vec<&'a Vertex> {
        let mut sorted: Vec<&Vertex> = vertices.iter().collect();
        sorted.sort_by(|a, b| self.calc_dist(a).total_cmp(&self.calc_dist(b)));

        sorted.into_iter().skip(1).take(self.edge_count).collect()
    }

    /// Rotate around the origin by two angles in degrees.
    ///
    /// The horizontal rotation turns around Z. The vertical one remaps the
    /// axes so that the old -Y axis plays the role of Z, turns, and maps
    /// back. Both are applied in that order on every call.
    pub fn rotate(&mut self, h_angle: f64, v_angle: f64) {
        // Horizontal rotation
        let mut polar = to_polar(self.x(), self.y(), self.z());
        polar.longitude += h_angle;
        let (x, y, z) = to_cartesian(polar);

        // Vertical rotation
        let (rm_x, rm_y, rm_z) = (x, z, -y);
        let mut polar = to_polar(rm_x, rm_y, rm_z);
        polar.longitude += v_angle;
        let (rm_x, rm_y, rm_z) = to_cartesian(polar);

        self.position = Point3::new(rm_x, -rm_z, rm_y);
    }

    /// Move the vertex radially by `multiplier` (0.1 = 10% further out).
    ///
    /// Requests that would collapse the radius to zero or below, or push it
    /// past `max_scale`, leave the vertex where it is.
    pub fn scale(&mut self, multiplier: f64, max_scale: f64) {
        let mut polar = to_polar(self.x(), self.y(), self.z());

        let new_r = polar.r * (1.0 + multiplier);
        if new_r > 0.0 && new_r <= max_scale {
            polar.r = new_r;
        }

        let (x, y, z) = to_cartesian(polar);
        self.position = Point3::new(x, y, z);
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
