use std::io;
use std::path::PathBuf;

use polyview_core::ShapeError;
use thiserror::Error;

/// Errors reading `settings.txt`
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: `{key}` needs a value")]
    MissingValue { line: usize, key: String },

    #[error("line {line}: invalid value {value:?} for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

/// Top-level errors of the terminal viewer
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to read shape file {}: {source}", path.display())]
    ShapeFile { path: PathBuf, source: io::Error },

    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("no shape given, pass a shape file or set `shape` in settings.txt")]
    NoShape,
}
