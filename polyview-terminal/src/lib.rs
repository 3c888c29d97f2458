/// Terminal front-end for the polyhedron visualizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use polyview_core::{Color, Command, Scene, Viewport};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod error;
pub mod renderer;
pub mod settings;

pub use error::{AppError, SettingsError};
pub use renderer::AsciiCanvas;
pub use settings::Settings;

/// Frame rate of autonomous rotation
const AUTONOMOUS_FPS: u64 = 60;

/// Input polling rate in interactive mode
const INTERACTIVE_FPS: u64 = 30;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Apply(Command),
}

/// Key bindings: arrows rotate, `d`/`a` scale up/down, `q`/Esc quit
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up => Some(Action::Apply(Command::RotateUp)),
        KeyCode::Down => Some(Action::Apply(Command::RotateDown)),
        KeyCode::Right => Some(Action::Apply(Command::RotateRight)),
        KeyCode::Left => Some(Action::Apply(Command::RotateLeft)),
        KeyCode::Char('d') => Some(Action::Apply(Command::ScaleUp)),
        KeyCode::Char('a') => Some(Action::Apply(Command::ScaleDown)),
        _ => None,
    }
}

/// Viewport matching a grid of `columns` x `rows` terminal cells.
///
/// Cells are about twice as tall as wide, so each row counts double.
pub fn viewport_for(columns: u16, rows: u16) -> Viewport {
    Viewport::new(u32::from(columns), u32::from(rows) * 2)
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    canvas: AsciiCanvas,
    interactive: bool,
    fixed_size: bool,
    running: bool,
    dirty: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Set up a canvas matching the scene's viewport
    pub fn new(scene: Scene, background: Color, interactive: bool) -> Self {
        let viewport = scene.viewport();
        let canvas = AsciiCanvas::new(
            viewport.width as usize,
            (viewport.height / 2) as usize,
            background,
        );

        Self {
            scene,
            canvas,
            interactive,
            fixed_size: false,
            running: true,
            dirty: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    /// Keep the current size when the terminal is resized
    pub fn with_fixed_size(mut self, fixed_size: bool) -> Self {
        self.fixed_size = fixed_size;
        self
    }

    /// Follow a terminal resize to `columns` x `rows`, unless the size is fixed
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if self.fixed_size {
            log::debug!("ignoring resize to {columns}x{rows}, size is fixed");
            return;
        }
        self.scene.resize(viewport_for(columns, rows));
        self.canvas = AsciiCanvas::new(
            usize::from(columns),
            usize::from(rows),
            self.canvas.background(),
        );
        self.dirty = true;
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let fps = if self.interactive {
            INTERACTIVE_FPS
        } else {
            let steps = self.scene.autonomous_start(&mut rand::thread_rng());
            log::debug!("tilted {steps} steps before spinning");
            AUTONOMOUS_FPS
        };
        let target_frame_time = Duration::from_millis(1000 / fps);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => match action_for(code) {
                Some(Action::Quit) => self.running = false,
                Some(Action::Apply(command)) if self.interactive => {
                    self.scene.apply(command);
                    self.dirty = true;
                }
                _ => {}
            },
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self) {
        if !self.interactive {
            self.scene.autonomous_tick();
            self.dirty = true;
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.scene.draw(&mut self.canvas);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let status = if self.interactive {
            "Arrows=Rotate D/A=Scale Q=Quit"
        } else {
            "Autonomous Q=Quit"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "Polyview | {} vertices {} faces | FPS: {:.1} | {status}",
                self.scene.shape().vertices().len(),
                self.scene.shape().faces().len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Up), Some(Action::Apply(Command::RotateUp)));
        assert_eq!(action_for(KeyCode::Left), Some(Action::Apply(Command::RotateLeft)));
        assert_eq!(action_for(KeyCode::Char('d')), Some(Action::Apply(Command::ScaleUp)));
        assert_eq!(action_for(KeyCode::Char('a')), Some(Action::Apply(Command::ScaleDown)));
        assert_eq!(action_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_every_command_has_a_key() {
        let keys = [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Char('a'),
            KeyCode::Char('d'),
        ];
        for command in Command::ALL {
            assert!(keys
                .iter()
                .any(|&key| action_for(key) == Some(Action::Apply(command))));
        }
    }

    #[test]
    fn test_viewport_for_doubles_rows() {
        let viewport = viewport_for(80, 24);
        assert_eq!(viewport, Viewport::new(80, 48));
        assert_eq!(viewport.depth(), 64.0);
    }

    #[test]
    fn test_bundled_shapes_parse() {
        let shapes = [
            (include_str!("../../shapes/tetrahedron.txt"), 4, 4, 3),
            (include_str!("../../shapes/cube.txt"), 8, 6, 3),
            (include_str!("../../shapes/octahedron.txt"), 6, 8, 4),
            (include_str!("../../shapes/icosahedron.txt"), 12, 20, 5),
        ];

        for (text, vertices, faces, edges) in shapes {
            let shape = polyview_core::parse_shape(text).unwrap();
            assert_eq!(shape.vertices().len(), vertices);
            assert_eq!(shape.faces().len(), faces);
            assert!(shape.vertices().iter().all(|v| v.edge_count() == edges));
        }
    }

    #[test]
    fn test_bundled_settings_load() {
        let settings = Settings::parse(include_str!("../../settings.txt")).unwrap();
        let path = settings.shape_path().unwrap();
        assert!(path.ends_with("icosahedron.txt"));
        assert!(!settings.interactive);
    }

    #[test]
    fn test_canvas_matches_viewport() {
        let shape = polyview_core::parse_shape(include_str!("../../shapes/cube.txt")).unwrap();
        let scene = Scene::new(shape, viewport_for(80, 24), Default::default());
        let app = TerminalApp::new(scene, Color::BLACK, true);
        assert_eq!(app.canvas.background(), Color::BLACK);
        assert_eq!(app.scene.viewport(), Viewport::new(80, 48));
    }

    #[test]
    fn test_resize_follows_terminal_unless_fixed() {
        let scene = || {
            let shape = polyview_core::parse_shape(include_str!("../../shapes/cube.txt")).unwrap();
            Scene::new(shape, viewport_for(80, 24), Default::default())
        };

        let mut app = TerminalApp::new(scene(), Color::BLACK, true);
        app.resize(100, 30);
        assert_eq!(app.scene.viewport(), Viewport::new(100, 60));
        assert!(app.dirty);

        let mut app = TerminalApp::new(scene(), Color::BLACK, true).with_fixed_size(true);
        app.dirty = false;
        app.resize(100, 30);
        assert_eq!(app.scene.viewport(), Viewport::new(80, 48));
        assert!(!app.dirty);
    }
}
