/// `settings.txt` loading
///
/// One `key value...` setting per line:
///
/// ```text
/// size 100 40
/// bgcolor #000000
/// drawcolor #FFFFFF
/// fillfaces true
/// usefaces true
/// shape icosahedron
/// rotspeed 2
/// scalespeed 0.1
/// interactive false
/// vertex_highlight 10
/// ```
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use polyview_core::{Color, RenderMode, SceneConfig};

use crate::error::SettingsError;

/// Directory holding `<name>.txt` shape files
pub const SHAPES_DIR: &str = "shapes";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Drawing area in columns and rows; the terminal size when unset
    pub size: Option<(u16, u16)>,
    pub background: Color,
    pub draw_color: Color,
    pub fill_faces: bool,
    pub use_faces: bool,
    /// Shape name, resolved under [`SHAPES_DIR`]
    pub shape: Option<String>,
    /// Degrees per step
    pub rotation_speed: i32,
    pub scale_speed: f64,
    pub interactive: bool,
    pub vertex_highlight: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: None,
            background: Color::BLACK,
            draw_color: Color::WHITE,
            fill_faces: false,
            use_faces: false,
            shape: None,
            rotation_speed: 1,
            scale_speed: 0.1,
            interactive: true,
            vertex_highlight: 0,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let mut tokens = raw.split_whitespace();
            let Some(key) = tokens.next() else {
                continue;
            };
            let mut value = || {
                tokens.next().ok_or_else(|| SettingsError::MissingValue {
                    line,
                    key: key.to_string(),
                })
            };

            match key {
                "size" => {
                    let width = parse_value(key, value()?, line)?;
                    let height = parse_value(key, value()?, line)?;
                    settings.size = Some((width, height));
                }
                "bgcolor" => settings.background = parse_value(key, value()?, line)?,
                "drawcolor" => settings.draw_color = parse_value(key, value()?, line)?,
                "fillfaces" => set_flag(&mut settings.fill_faces, key, value()?),
                "usefaces" => set_flag(&mut settings.use_faces, key, value()?),
                "interactive" => set_flag(&mut settings.interactive, key, value()?),
                "shape" => settings.shape = Some(value()?.to_string()),
                "rotspeed" => settings.rotation_speed = parse_value(key, value()?, line)?,
                "scalespeed" => settings.scale_speed = parse_value(key, value()?, line)?,
                "vertex_highlight" => {
                    settings.vertex_highlight = parse_value(key, value()?, line)?
                }
                other => log::warn!("line {line}: ignoring unknown setting `{other}`"),
            }
        }

        Ok(settings)
    }

    /// Path of the configured shape file, `shapes/<name>.txt`
    pub fn shape_path(&self) -> Option<PathBuf> {
        self.shape
            .as_ref()
            .map(|name| Path::new(SHAPES_DIR).join(format!("{name}.txt")))
    }

    /// The typed configuration handed to the scene
    pub fn scene_config(&self) -> SceneConfig {
        let render_mode = if self.use_faces {
            RenderMode::Faces {
                fill: self.fill_faces,
            }
        } else {
            RenderMode::Wireframe
        };

        SceneConfig {
            render_mode,
            rotation_step: f64::from(self.rotation_speed),
            scale_step: self.scale_speed,
            vertex_size: self.vertex_highlight,
            draw_color: self.draw_color,
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, line: usize) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        line,
        key: key.to_string(),
        value: value.to_string(),
    })
}

// Anything other than true/false leaves the flag alone
fn set_flag(flag: &mut bool, key: &str, value: &str) {
    match value {
        "true" => *flag = true,
        "false" => *flag = false,
        other => log::warn!("ignoring `{key} {other}`, expected true or false"),
    }
}
