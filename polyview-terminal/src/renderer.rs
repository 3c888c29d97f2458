/// ASCII canvas for terminal rendering
use crossterm::{
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use polyview_core::{Canvas, Color};
use std::io::Write;

/// Glyph for filled face interiors
const FILL_CHAR: char = '█';

/// Glyph for vertex marks
const DOT_CHAR: char = 'o';

/// Dot diameter covered by one extra column of radius
const DOT_SCALE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

/// Character grid that implements [`Canvas`].
///
/// Screen space has its origin at the grid center with `v` pointing up.
/// One unit of `u` is one column and two units of `v` make one row, which
/// roughly squares up terminal cells. Later drawing overwrites earlier
/// drawing; there is no depth buffer.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    background: Color,
    pen: Color,
    cursor: (f64, f64),
    cells: Vec<Option<Cell>>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pen: Color::WHITE,
            cursor: (0.0, 0.0),
            cells: vec![None; width * height],
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Screen space to fractional (column, row)
    fn to_grid(&self, u: f64, v: f64) -> (f64, f64) {
        (self.width as f64 / 2.0 + u, self.height as f64 / 2.0 - v / 2.0)
    }

    fn plot(&mut self, col: i64, row: i64, character: char, color: Color) {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        self.cells[idx] = Some(Cell { character, color });
    }

    /// Clip a grid-space segment to the canvas and draw what remains
    fn draw_segment(&mut self, from: (f64, f64), to: (f64, f64)) {
        let bounds = (0.0, self.width as f64, 0.0, self.height as f64);
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };
        let from = self.clamp_cell(cell_of(from));
        let to = self.clamp_cell(cell_of(to));
        self.rasterize_line(from, to);
    }

    /// Points on the far edges floor to one past the last cell
    fn clamp_cell(&self, (col, row): (i64, i64)) -> (i64, i64) {
        (
            col.clamp(0, self.width as i64 - 1),
            row.clamp(0, self.height as i64 - 1),
        )
    }

    /// Bresenham line between two on-grid cells
    fn rasterize_line(&mut self, from: (i64, i64), to: (i64, i64)) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let character = if dy.abs() * 2 <= dx.abs() {
            '-'
        } else if dx.abs() * 2 <= dy.abs() {
            '|'
        } else if (dx > 0) == (dy > 0) {
            '\\'
        } else {
            '/'
        };

        let step_x = dx.signum();
        let step_y = dy.signum();
        let (dx, dy) = (dx.abs(), -dy.abs());
        let mut err = dx + dy;
        let (mut x, mut y) = from;

        loop {
            self.plot(x, y, character, self.pen);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn rasterize_triangle(&mut self, coords: [(f64, f64); 3], color: Color) {
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, FILL_CHAR, color);
                    }
                }
            }
        }
    }

    /// Flush the grid to `writer`
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_terminal(self.background)))?;
        let mut current = None;

        for y in 0..self.height {
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(cell) => {
                        if current != Some(cell.color) {
                            writer.queue(SetForegroundColor(to_terminal(cell.color)))?;
                            current = Some(cell.color);
                        }
                        writer.queue(Print(cell.character))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.cells[row * self.width + col].map(|cell| cell.character)
    }

    #[cfg(test)]
    fn color_at(&self, col: usize, row: usize) -> Option<Color> {
        self.cells[row * self.width + col].map(|cell| cell.color)
    }
}

impl Canvas for AsciiCanvas {
    fn clear(&mut self) {
        self.cells.fill(None);
        self.cursor = (0.0, 0.0);
    }

    fn set_pen(&mut self, color: Color) {
        self.pen = color;
    }

    fn move_to(&mut self, u: f64, v: f64) {
        self.cursor = (u, v);
    }

    fn line_to(&mut self, u: f64, v: f64) {
        let from = self.to_grid(self.cursor.0, self.cursor.1);
        let to = self.to_grid(u, v);
        self.draw_segment(from, to);
        self.cursor = (u, v);
    }

    fn dot(&mut self, size: u32) {
        if size == 0 {
            return;
        }
        let (col, row) = cell_of(self.to_grid(self.cursor.0, self.cursor.1));
        let radius = i64::from(size / DOT_SCALE);

        for dy in -(radius / 2)..=radius / 2 {
            for dx in -radius..=radius {
                self.plot(col.saturating_add(dx), row.saturating_add(dy), DOT_CHAR, self.pen);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        let grid: Vec<(f64, f64)> = points.iter().map(|&(u, v)| self.to_grid(u, v)).collect();
        let Some((&first, rest)) = grid.split_first() else {
            return;
        };

        // Fan triangulation; faces are convex
        for pair in rest.windows(2) {
            self.rasterize_triangle([first, pair[0], pair[1]], color);
        }
    }
}

/// Liang-Barsky clipping of `from`..`to` against `(x_min, x_max, y_min, y_max)`.
///
/// Returns `None` when the segment misses the rectangle or is not finite.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (x_min, x_max, y_min, y_max): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if !(from.0.is_finite() && from.1.is_finite() && dx.is_finite() && dy.is_finite()) {
        return None;
    }

    let edges = [
        (-dx, from.0 - x_min),
        (dx, x_max - from.0),
        (-dy, from.1 - y_min),
        (dy, y_max - from.1),
    ];
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

fn cell_of((col, row): (f64, f64)) -> (i64, i64) {
    (col.floor() as i64, row.floor() as i64)
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_grid_center() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.move_to(0.0, 0.0);
        canvas.dot(1);
        assert_eq!(canvas.char_at(10, 5), Some(DOT_CHAR));
        assert_eq!(canvas.cells.iter().filter(|cell| cell.is_some()).count(), 1);
    }

    #[test]
    fn test_zero_dot_draws_nothing() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.dot(0);
        assert!(canvas.cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_lines_pick_glyph_by_slope() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.set_pen(Color::RED);
        canvas.move_to(-5.0, 0.0);
        canvas.line_to(5.0, 0.0);
        assert_eq!(canvas.char_at(5, 5), Some('-'));
        assert_eq!(canvas.char_at(15, 5), Some('-'));
        assert_eq!(canvas.color_at(10, 5), Some(Color::RED));

        canvas.clear();
        canvas.move_to(0.0, 8.0);
        canvas.line_to(0.0, -8.0);
        assert_eq!(canvas.char_at(10, 1), Some('|'));
        assert_eq!(canvas.char_at(10, 9), Some('|'));
    }

    #[test]
    fn test_lines_are_clipped() {
        let mut canvas = AsciiCanvas::new(10, 4, Color::BLACK);
        canvas.move_to(-100.0, 0.0);
        canvas.line_to(100.0, 0.0);
        assert_eq!(canvas.cells.iter().filter(|cell| cell.is_some()).count(), 10);
    }

    #[test]
    fn test_far_lines_are_clipped_before_rasterizing() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.move_to(0.0, 0.0);
        canvas.line_to(0.0, 1e300);
        assert_eq!(canvas.cells.iter().filter(|cell| cell.is_some()).count(), 6);
        assert!((0..=5).all(|row| canvas.char_at(10, row) == Some('|')));

        canvas.clear();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(1e9, 0.0);
        assert_eq!(canvas.cells.iter().filter(|cell| cell.is_some()).count(), 10);
        assert!((10..20).all(|col| canvas.char_at(col, 5) == Some('-')));

        canvas.clear();
        canvas.move_to(-1e9, 1e9);
        canvas.line_to(1e9, 1e9);
        canvas.line_to(f64::INFINITY, 0.0);
        assert!(canvas.cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_far_dot_is_ignored() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.move_to(1e300, -1e300);
        canvas.dot(100);
        assert!(canvas.cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_huge_shape_draws_in_every_mode() {
        use polyview_core::{parse_shape, RenderMode, Scene, SceneConfig, Viewport};

        let text = "0/1e300/0 > 1\n0/0/1 > 2\n0/0/-1 > 3\nend-vertices-begin-faces\n1/2/3\n";
        let modes = [
            RenderMode::Wireframe,
            RenderMode::Faces { fill: false },
            RenderMode::Faces { fill: true },
        ];
        for render_mode in modes {
            let config = SceneConfig {
                render_mode,
                ..SceneConfig::default()
            };
            let mut scene = Scene::new(parse_shape(text).unwrap(), Viewport::new(20, 20), config);
            let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
            scene.draw(&mut canvas);
            assert!(canvas.cells.iter().any(Option::is_some));
        }
    }

    #[test]
    fn test_later_fill_covers_earlier() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        let square = [(-4.0, -4.0), (4.0, -4.0), (4.0, 4.0), (-4.0, 4.0)];
        canvas.fill_polygon(&square, Color::RED);
        assert_eq!(canvas.char_at(10, 5), Some(FILL_CHAR));
        assert_eq!(canvas.color_at(10, 5), Some(Color::RED));
        assert_eq!(canvas.char_at(0, 0), None);

        canvas.fill_polygon(&square, Color::WHITE);
        assert_eq!(canvas.color_at(10, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_polygon_is_skipped() {
        let mut canvas = AsciiCanvas::new(20, 10, Color::BLACK);
        canvas.fill_polygon(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0)], Color::RED);
        canvas.fill_polygon(&[], Color::RED);
        assert!(canvas.cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_draw_emits_every_cell() {
        let mut canvas = AsciiCanvas::new(4, 2, Color::BLACK);
        canvas.move_to(0.0, 0.0);
        canvas.dot(1);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(DOT_CHAR));
        assert!(text.contains("\r\n"));
    }
}
