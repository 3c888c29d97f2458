/// Scene state, interaction, and the draw commands sent to a canvas
use rand::Rng;

use crate::color::Color;
use crate::depth::DepthSorter;
use crate::face::{Face, VertexId};
use crate::projection::Viewport;
use crate::shape::Shape;
use crate::transform::Command;

/// Smallest mark drawn on a vertex in wireframe mode
pub const WIREFRAME_DOT_SIZE: u32 = 20;

/// A 2D drawing surface with a pen, in the style of a turtle.
///
/// Coordinates are screen space as produced by [`Viewport::project`]:
/// origin at the center, `v` pointing up.
pub trait Canvas {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Color used by `line_to` and `dot`
    fn set_pen(&mut self, color: Color);

    /// Move the pen without drawing
    fn move_to(&mut self, u: f64, v: f64);

    /// Draw a line from the pen position and move the pen there
    fn line_to(&mut self, u: f64, v: f64);

    /// Mark the pen position with a dot of the given diameter
    fn dot(&mut self, size: u32);

    /// Paint a filled polygon over anything underneath it
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Vertices joined to their nearest neighbours
    Wireframe,
    /// Face outlines, optionally filled back to front
    Faces { fill: bool },
}

/// Typed scene settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub render_mode: RenderMode,
    /// Degrees per rotation command
    pub rotation_step: f64,
    /// Radial fraction per scale command
    pub scale_step: f64,
    pub vertex_size: u32,
    pub draw_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Wireframe,
            rotation_step: 1.0,
            scale_step: 0.1,
            vertex_size: 0,
            draw_color: Color::WHITE,
        }
    }
}

/// A shape on a viewport, driven by [`Command`]s
pub struct Scene {
    shape: Shape,
    viewport: Viewport,
    sorter: DepthSorter,
    config: SceneConfig,
}

impl Scene {
    pub fn new(shape: Shape, viewport: Viewport, config: SceneConfig) -> Self {
        Self {
            shape,
            sorter: viewport.depth_sorter(),
            viewport,
            config,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Move the scene onto a new viewport. Vertices keep their coordinates;
    /// only the projection, camera and scale limit follow the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.sorter = viewport.depth_sorter();
    }

    /// Apply one command to every vertex, refreshing face centers after
    pub fn apply(&mut self, command: Command) {
        let transform = command.transform(self.config.rotation_step, self.config.scale_step);
        transform.apply(&mut self.shape, self.viewport.max_scale());
        log::trace!("applied {command:?}");
    }

    /// Tilt the shape down a random one to three steps before autonomous
    /// spinning starts. Returns the number of steps taken.
    pub fn autonomous_start<R: Rng>(&mut self, rng: &mut R) -> usize {
        let steps = rng.gen_range(1..=3);
        for _ in 0..steps {
            self.apply(Command::RotateDown);
        }
        steps
    }

    /// One frame of autonomous motion
    pub fn autonomous_tick(&mut self) {
        self.apply(Command::RotateRight);
    }

    /// Log the viewport and the starting vertex coordinates
    pub fn describe(&self) {
        log::info!("draw color: {}", self.config.draw_color);
        log::info!(
            "window: width {} height {} depth {}",
            self.viewport.width,
            self.viewport.height,
            self.viewport.depth()
        );
        log::info!(
            "starting vertex coordinates ({} in total):",
            self.shape.vertices().len()
        );
        for vertex in self.shape.vertices() {
            log::info!("X: {}\tY: {}\tZ: {}", vertex.x(), vertex.y(), vertex.z());
        }
    }

    /// Redraw the whole scene onto `canvas`
    pub fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.clear();
        canvas.set_pen(self.config.draw_color);

        match self.config.render_mode {
            RenderMode::Wireframe => self.draw_wireframe(canvas),
            RenderMode::Faces { fill: false } => self.draw_outlines(canvas),
            RenderMode::Faces { fill: true } => self.draw_filled(canvas),
        }
    }

    fn draw_wireframe<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let viewport = self.viewport;
        let size = self.config.vertex_size.max(WIREFRAME_DOT_SIZE);

        for (index, vertex) in self.shape.vertices().iter().enumerate() {
            let (u, v) = viewport.project(vertex);
            canvas.move_to(u, v);
            canvas.dot(size);

            for neighbour in self.shape.neighbours(VertexId(index)) {
                let (nu, nv) = viewport.project(neighbour);
                canvas.line_to(nu, nv);
                canvas.move_to(u, v);
            }
        }
    }

    fn draw_outlines<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let size = self.config.vertex_size;
        for face in self.shape.faces() {
            let points = self.projected(face);
            let Some(&(u0, v0)) = points.first() else {
                continue;
            };

            canvas.move_to(u0, v0);
            canvas.dot(size);
            for &(u, v) in &points[1..] {
                canvas.line_to(u, v);
                canvas.dot(size);
            }
            canvas.line_to(u0, v0);
        }
    }

    fn draw_filled<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        self.shape.refresh_centers();

        let size = self.config.vertex_size;
        for face in self.shape.paint_order(&self.sorter) {
            let points = self.projected(face);
            let Some(&(u0, v0)) = points.first() else {
                continue;
            };

            canvas.fill_polygon(&points, face.color());
            canvas.move_to(u0, v0);
            for &(u, v) in &points[1..] {
                canvas.dot(size);
                canvas.line_to(u, v);
            }
            canvas.dot(size);
            canvas.line_to(u0, v0);
        }
    }

    fn projected(&self, face: &Face) -> Vec<(f64, f64)> {
        self.shape
            .face_vertices(face)
            .map(|vertex| self.viewport.project(vertex))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ShapeBuilder;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Pen(Color),
        Move(f64, f64),
        Line(f64, f64),
        Dot(u32),
        Fill(usize, Color),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn count(&self, matches: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| matches(op)).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn set_pen(&mut self, color: Color) {
            self.ops.push(Op::Pen(color));
        }
        fn move_to(&mut self, u: f64, v: f64) {
            self.ops.push(Op::Move(u, v));
        }
        fn line_to(&mut self, u: f64, v: f64) {
            self.ops.push(Op::Line(u, v));
        }
        fn dot(&mut self, size: u32) {
            self.ops.push(Op::Dot(size));
        }
        fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
            self.ops.push(Op::Fill(points.len(), color));
        }
    }

    const TETRAHEDRON: &str = "\
1/1/1/3 > 1
1/-1/-1/3 > 2
-1/1/-1/3 > 3
-1/-1/1/3 > 4
end-vertices-begin-faces
1/2/3
1/3/4
1/4/2
2/4/3
";

    // Two parallel triangles facing the camera on +X; the near one first.
    const LAYERS: &str = "\
0.5/0/1 > 1
0.5/1/-1 > 2
0.5/-1/-1 > 3
-0.5/0/1 > 4
-0.5/1/-1 > 5
-0.5/-1/-1 > 6
end-vertices-begin-faces
1/2/3 #FF0000
4/5/6 #0000FF
";

    fn scene(input: &str, config: SceneConfig) -> Scene {
        let shape = ShapeBuilder::with_rng(StdRng::seed_from_u64(3))
            .build(input)
            .unwrap();
        Scene::new(shape, Viewport::new(400, 400), config)
    }

    #[test]
    fn test_wireframe_draws_neighbour_edges() {
        let mut scene = scene(TETRAHEDRON, SceneConfig::default());
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);

        assert_eq!(canvas.ops[0], Op::Clear);
        assert_eq!(canvas.ops[1], Op::Pen(Color::WHITE));
        assert_eq!(canvas.count(|op| matches!(op, Op::Dot(20))), 4);
        assert_eq!(canvas.count(|op| matches!(op, Op::Line(..))), 12);
        assert_eq!(canvas.count(|op| matches!(op, Op::Fill(..))), 0);
        // first vertex (1, 1, 1) projects to (100, 100)
        assert_eq!(canvas.ops[2], Op::Move(100.0, 100.0));
    }

    #[test]
    fn test_wireframe_honours_larger_vertex_size() {
        let config = SceneConfig {
            vertex_size: 30,
            ..SceneConfig::default()
        };
        let mut scene = scene(TETRAHEDRON, config);
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);
        assert_eq!(canvas.count(|op| matches!(op, Op::Dot(30))), 4);
    }

    #[test]
    fn test_outlines_close_each_face() {
        let config = SceneConfig {
            render_mode: RenderMode::Faces { fill: false },
            vertex_size: 4,
            ..SceneConfig::default()
        };
        let mut scene = scene(TETRAHEDRON, config);
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);

        assert_eq!(canvas.count(|op| matches!(op, Op::Move(..))), 4);
        assert_eq!(canvas.count(|op| matches!(op, Op::Line(..))), 12);
        assert_eq!(canvas.count(|op| matches!(op, Op::Dot(4))), 12);
        assert_eq!(canvas.count(|op| matches!(op, Op::Fill(..))), 0);
    }

    #[test]
    fn test_filled_faces_painted_back_to_front() {
        let config = SceneConfig {
            render_mode: RenderMode::Faces { fill: true },
            ..SceneConfig::default()
        };
        let mut scene = scene(LAYERS, config);
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);

        let fills: Vec<&Op> = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Fill(..)))
            .collect();
        assert_eq!(
            fills,
            vec![
                &Op::Fill(3, Color::new(0x00, 0x00, 0xFF)),
                &Op::Fill(3, Color::new(0xFF, 0x00, 0x00)),
            ]
        );

        // Turned half way round, the blue layer comes to the front
        for _ in 0..180 {
            scene.apply(Command::RotateRight);
        }
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);
        let first_fill = canvas
            .ops
            .iter()
            .find(|op| matches!(op, Op::Fill(..)))
            .cloned();
        assert_eq!(first_fill, Some(Op::Fill(3, Color::new(0xFF, 0x00, 0x00))));
    }

    #[test]
    fn test_apply_moves_every_vertex_and_refreshes_centers() {
        let mut scene = scene(TETRAHEDRON, SceneConfig::default());
        let before: Vec<_> = scene.shape().vertices().to_vec();

        scene.apply(Command::RotateUp);
        scene.apply(Command::RotateLeft);

        let after = scene.shape().vertices();
        assert!(before.iter().zip(after).all(|(b, a)| b != a));
        assert!(!scene.shape().centers_stale());
    }

    #[test]
    fn test_scale_stops_at_viewport_cap() {
        let mut scene = scene(TETRAHEDRON, SceneConfig::default());
        let max_scale = scene.viewport().max_scale();
        for _ in 0..200 {
            scene.apply(Command::ScaleUp);
        }
        for vertex in scene.shape().vertices() {
            let r = vertex.position.coords.norm();
            assert!(r <= max_scale);
            assert!(r > max_scale / 1.1);
        }

        let r = scene.shape().vertices()[0].position.coords.norm();
        scene.apply(Command::ScaleDown);
        assert_abs_diff_eq!(
            scene.shape().vertices()[0].position.coords.norm(),
            r * 0.9,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_autonomous_start_tilts_one_to_three_steps() {
        for seed in 0..20 {
            let mut scene = scene(TETRAHEDRON, SceneConfig::default());
            let steps = scene.autonomous_start(&mut StdRng::seed_from_u64(seed));
            assert!((1..=3).contains(&steps));
        }
    }

    #[test]
    fn test_autonomous_tick_turns_right() {
        let mut scene = scene(TETRAHEDRON, SceneConfig::default());
        let mut expected = scene.shape().vertices()[0];
        expected.rotate(1.0, 0.0);

        scene.autonomous_tick();
        let vertex = scene.shape().vertices()[0];
        assert_abs_diff_eq!(vertex.x(), expected.x(), epsilon = 1e-12);
        assert_abs_diff_eq!(vertex.y(), expected.y(), epsilon = 1e-12);
        assert_abs_diff_eq!(vertex.z(), expected.z(), epsilon = 1e-12);
    }

    #[test]
    fn test_resize_moves_projection_not_vertices() {
        let mut scene = scene(TETRAHEDRON, SceneConfig::default());
        let before: Vec<_> = scene.shape().vertices().to_vec();

        scene.resize(Viewport::new(200, 200));
        assert_eq!(scene.viewport().max_scale(), 50.0);
        assert_eq!(scene.shape().vertices(), &before[..]);

        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);
        assert_eq!(canvas.ops[2], Op::Move(50.0, 50.0));
    }
}
