/// Example: draw a single frame of a shape file to stdout
///
/// Usage: cargo run --example snapshot -- shapes/cube.txt [columns rows]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use polyview_core::{parse_shape, Color, RenderMode, Scene, SceneConfig};
use polyview_terminal::{viewport_for, AppError, AsciiCanvas};

fn main() -> Result<(), AppError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1).map(PathBuf::from) else {
        eprintln!("Usage: {} <shape-file> [columns rows]", args[0]);
        return Err(AppError::NoShape);
    };
    let columns = args.get(2).and_then(|arg| arg.parse().ok()).unwrap_or(60);
    let rows = args.get(3).and_then(|arg| arg.parse().ok()).unwrap_or(30);

    let text = fs::read_to_string(&path).map_err(|source| AppError::ShapeFile {
        path: path.clone(),
        source,
    })?;
    let shape = parse_shape(&text)?;
    println!(
        "{}: {} vertices, {} faces",
        path.display(),
        shape.vertices().len(),
        shape.faces().len()
    );

    let config = SceneConfig {
        render_mode: RenderMode::Faces { fill: true },
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(shape, viewport_for(columns, rows), config);
    let mut canvas = AsciiCanvas::new(usize::from(columns), usize::from(rows), Color::BLACK);
    scene.draw(&mut canvas);

    let mut stdout = io::stdout();
    canvas.draw(&mut stdout)?;
    writeln!(stdout)?;
    Ok(())
}
