/// Shapes: faces plus the deduplicated vertices they share
use crate::color::Color;
use crate::depth::DepthSorter;
use crate::error::{Result, ShapeError};
use crate::face::{Face, VertexId};
use crate::vertex::Vertex;

/// A face as declared before assembly: indices into a table of declared
/// vertices, plus its color.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDef {
    pub vertices: Vec<usize>,
    pub color: Color,
}

impl FaceDef {
    pub fn new(vertices: Vec<usize>, color: Color) -> Self {
        Self { vertices, color }
    }
}

/// A polyhedron: faces in declaration order and the vertices they reference.
///
/// Vertices are stored once and faces hold [`VertexId`] handles into that
/// list, so moving a corner moves it for every face that uses it.
#[derive(Debug, Clone)]
pub struct Shape {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    centers_stale: bool,
}

impl Shape {
    /// Assemble a shape from declared vertices and face definitions.
    ///
    /// Vertices are collected by scanning the faces in order; each distinct
    /// position is kept once, in first-seen order. Declared vertices that no
    /// face uses are dropped.
    pub fn new(declared: &[Vertex], faces: Vec<FaceDef>) -> Result<Self> {
        if faces.is_empty() {
            return Err(ShapeError::NoFaces);
        }

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut remap: Vec<Option<VertexId>> = vec![None; declared.len()];
        let mut resolved = Vec::with_capacity(faces.len());

        for (index, def) in faces.into_iter().enumerate() {
            if def.vertices.len() < 3 {
                return Err(ShapeError::InvalidFace {
                    face: index,
                    message: format!("{} vertices, at least 3 are needed", def.vertices.len()),
                });
            }

            let mut ids = Vec::with_capacity(def.vertices.len());
            for &declared_index in &def.vertices {
                let slot = remap.get_mut(declared_index).ok_or_else(|| ShapeError::InvalidFace {
                    face: index,
                    message: format!("vertex index {declared_index} is out of range"),
                })?;

                let id = match *slot {
                    Some(id) => id,
                    None => {
                        let vertex = declared[declared_index];
                        let id = match vertices.iter().position(|known| *known == vertex) {
                            Some(position) => VertexId(position),
                            None => {
                                vertices.push(vertex);
                                VertexId(vertices.len() - 1)
                            }
                        };
                        *slot = Some(id);
                        id
                    }
                };
                ids.push(id);
            }
            resolved.push((ids, def.color));
        }

        let faces = resolved
            .into_iter()
            .map(|(ids, color)| Face::new(ids, color, &vertices))
            .collect();

        Ok(Self {
            vertices,
            faces,
            centers_stale: false,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// The current positions of a face's vertices, in drawing order
    pub fn face_vertices<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = &'a Vertex> + 'a {
        face.vertices().iter().map(move |&id| self.vertex(id))
    }

    /// Direct access to the vertex positions.
    ///
    /// Face centers are flagged stale; they are refreshed by
    /// [`Shape::update_centers`] or [`Shape::refresh_centers`].
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        self.centers_stale = true;
        &mut self.vertices
    }

    pub fn centers_stale(&self) -> bool {
        self.centers_stale
    }

    /// Recompute every face center from the current vertex positions
    pub fn update_centers(&mut self) {
        for face in &mut self.faces {
            face.update_center(&self.vertices);
        }
        self.centers_stale = false;
    }

    /// Rotate every vertex, then refresh the face centers
    pub fn rotate(&mut self, h_angle: f64, v_angle: f64) {
        for vertex in &mut self.vertices {
            vertex.rotate(h_angle, v_angle);
        }
        self.update_centers();
    }

    /// Scale every vertex (see [`Vertex::scale`]), then refresh the face
    /// centers
    pub fn scale(&mut self, multiplier: f64, max_scale: f64) {
        for vertex in &mut self.vertices {
            vertex.scale(multiplier, max_scale);
        }
        self.update_centers();
    }

    /// Wireframe neighbours of the vertex behind `id`
    pub fn neighbours(&self, id: VertexId) -> Vec<&Vertex> {
        self.vertex(id).neighbours(&self.vertices)
    }

    /// Recompute face centers only if vertices moved since the last refresh
    pub fn refresh_centers(&mut self) {
        if self.centers_stale {
            self.update_centers();
        }
    }

    /// Faces ordered back to front as seen from `sorter`'s camera.
    ///
    /// Uses the cached centers; call [`Shape::refresh_centers`] first after
    /// mutating through [`Shape::vertices_mut`].
    pub fn paint_order(&self, sorter: &DepthSorter) -> Vec<&Face> {
        sorter.sort(&self.faces)
    }
}
