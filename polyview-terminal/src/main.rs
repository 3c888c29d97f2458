/// Polyview - Terminal polyhedron visualizer
///
/// Usage: polyview [shape-file]
///
/// Settings are read from `settings.txt` in the working directory. A shape
/// file given on the command line replaces the `shape` setting.
/// Controls (interactive mode):
///   - Arrow Keys: Rotate the shape
///   - D/A: Scale up/down
///   - Q/ESC: Quit

use std::env;
use std::fs;
use std::path::PathBuf;

use crossterm::terminal;
use polyview_core::{parse_shape, Scene};
use polyview_terminal::{viewport_for, AppError, Settings, TerminalApp};

const SETTINGS_FILE: &str = "settings.txt";

fn main() -> Result<(), AppError> {
    env_logger::init();

    let settings = Settings::load(SETTINGS_FILE)?;

    let shape_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.shape_path())
        .ok_or(AppError::NoShape)?;

    log::info!("loading shape from {}", shape_path.display());
    let text = fs::read_to_string(&shape_path).map_err(|source| AppError::ShapeFile {
        path: shape_path.clone(),
        source,
    })?;
    let shape = parse_shape(&text)?;

    let (columns, rows) = match settings.size {
        Some(size) => size,
        None => terminal::size()?,
    };
    let scene = Scene::new(shape, viewport_for(columns, rows), settings.scene_config());
    scene.describe();

    let mut app = TerminalApp::new(scene, settings.background, settings.interactive)
        .with_fixed_size(settings.size.is_some());
    app.run()?;

    Ok(())
}
