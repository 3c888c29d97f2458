use thiserror::Error;

/// Errors raised while building a shape from its text description.
///
/// Line numbers are 1-based. Any of these aborts the whole load.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: face references undeclared vertex {id}")]
    UnknownVertex { line: usize, id: u32 },

    #[error("line {line}: vertex {id} is declared twice")]
    DuplicateVertex { line: usize, id: u32 },

    #[error("line {line}: face has {count} vertices, at least 3 are needed")]
    DegenerateFace { line: usize, count: usize },

    #[error("face {face}: {message}")]
    InvalidFace { face: usize, message: String },

    #[error("shape has no faces")]
    NoFaces,
}

pub type Result<T> = std::result::Result<T, ShapeError>;
