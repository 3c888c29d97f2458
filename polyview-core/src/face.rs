/// Polygonal faces referencing a shape's shared vertices
use nalgebra::Vector3;

use crate::color::Color;
use crate::vertex::Vertex;

/// Handle to a vertex stored in a [`Shape`](crate::Shape)'s vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Componentwise mean of the given vertices, with an edge count of zero.
///
/// Returns `None` for an empty iterator.
pub fn calc_center<'a>(vertices: impl IntoIterator<Item = &'a Vertex>) -> Option<Vertex> {
    let (sum, count) = vertices
        .into_iter()
        .fold((Vector3::<f64>::zeros(), 0usize), |(sum, count), vertex| {
            (sum + vertex.position.coords, count + 1)
        });

    if count == 0 {
        return None;
    }

    let mean = sum / count as f64;
    Some(Vertex::new(mean.x, mean.y, mean.z, 0))
}

/// An ordered polygon of vertex handles with a fill color.
///
/// `center` is only as fresh as the last [`Face::update_center`] call;
/// moving the vertices does not refresh it.
#[derive(Debug, Clone)]
pub struct Face {
    vertices: Vec<VertexId>,
    color: Color,
    center: Vertex,
}

impl Face {
    /// Build a face over `ids`, resolving them against `pool` to compute the
    /// initial center.
    ///
    /// Panics if an id is out of range for `pool`.
    pub(crate) fn new(ids: Vec<VertexId>, color: Color, pool: &[Vertex]) -> Self {
        let center = calc_center(ids.iter().map(|id| &pool[id.0]))
            .unwrap_or_else(|| Vertex::new(0.0, 0.0, 0.0, 0));
        Self {
            vertices: ids,
            color,
            center,
        }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn center(&self) -> &Vertex {
        &self.center
    }

    /// Recompute the center from the current positions in `pool`
    pub fn update_center(&mut self, pool: &[Vertex]) {
        if let Some(center) = calc_center(self.vertices.iter().map(|id| &pool[id.0])) {
            self.center = center;
        }
    }

    /// Coarse equality: two faces match when their centers coincide, even if
    /// their vertices differ.
    pub fn centroid_equals(&self, other: &Face) -> bool {
        self.center == other.center
    }
}
