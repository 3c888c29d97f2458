/// Parser for the text shape description
///
/// ```text
/// <x>/<y>/<z>[/<edges>] > <id>      vertex section
/// end-vertices-begin-faces
/// <id>/<id>/<id>[/...] [#RRGGBB]    face section
/// ```
///
/// Coordinates may contain `phi`, which stands for the golden ratio.
use std::collections::HashMap;

use nom::{
    bytes::complete::take_till1,
    character::complete::{char, hex_digit1, space0, space1, u32 as vertex_id},
    combinator::{all_consuming, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::error::{Result, ShapeError};
use crate::shape::{FaceDef, Shape};
use crate::vertex::Vertex;

/// Line separating the vertex section from the face section
pub const SECTION_SEPARATOR: &str = "end-vertices-begin-faces";

/// The golden ratio, (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Vertices,
    Faces,
}

/// Builds [`Shape`]s from their text description.
///
/// Faces without an explicit color get a random one from `rng`.
pub struct ShapeBuilder<R = StdRng> {
    rng: R,
}

impl ShapeBuilder<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for ShapeBuilder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ShapeBuilder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Parse a full description. Any malformed line aborts the build.
    pub fn build(&mut self, input: &str) -> Result<Shape> {
        let mut declared: Vec<Vertex> = Vec::new();
        let mut table: HashMap<u32, usize> = HashMap::new();
        let mut faces: Vec<FaceDef> = Vec::new();
        let mut section = Section::Vertices;

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            match section {
                Section::Vertices if text == SECTION_SEPARATOR => section = Section::Faces,
                Section::Vertices => {
                    let (vertex, id) = parse_vertex(text, line)?;
                    if table.contains_key(&id) {
                        return Err(ShapeError::DuplicateVertex { line, id });
                    }
                    table.insert(id, declared.len());
                    declared.push(vertex);
                }
                Section::Faces => {
                    let (ids, color) = parse_face(text, line)?;
                    if ids.len() < 3 {
                        return Err(ShapeError::DegenerateFace {
                            line,
                            count: ids.len(),
                        });
                    }

                    let indices = ids
                        .iter()
                        .map(|&id| {
                            table
                                .get(&id)
                                .copied()
                                .ok_or(ShapeError::UnknownVertex { line, id })
                        })
                        .collect::<Result<Vec<usize>>>()?;

                    let color = color.unwrap_or_else(|| Color::random(&mut self.rng));
                    faces.push(FaceDef::new(indices, color));
                }
            }
        }

        log::debug!(
            "parsed {} declared vertices and {} faces",
            declared.len(),
            faces.len()
        );

        Shape::new(&declared, faces)
    }
}

/// Parse a shape description, coloring unspecified faces randomly
pub fn parse_shape(input: &str) -> Result<Shape> {
    ShapeBuilder::new().build(input)
}

fn parse_vertex(text: &str, line: usize) -> Result<(Vertex, u32)> {
    let (_, (tokens, id)) = vertex_line(text).map_err(|_| ShapeError::Syntax {
        line,
        message: "expected `<x>/<y>/<z>[/<edges>] > <id>`".to_string(),
    })?;

    if !(3..=4).contains(&tokens.len()) {
        return Err(ShapeError::Syntax {
            line,
            message: format!("expected 3 coordinates and an optional edge count, found {} values", tokens.len()),
        });
    }

    let x = parse_coordinate(tokens[0], line)?;
    let y = parse_coordinate(tokens[1], line)?;
    let z = parse_coordinate(tokens[2], line)?;
    let edges = match tokens.get(3) {
        Some(token) => token.parse::<usize>().map_err(|_| ShapeError::InvalidNumber {
            line,
            token: token.to_string(),
        })?,
        None => 0,
    };

    Ok((Vertex::new(x, y, z, edges), id))
}

fn parse_face(text: &str, line: usize) -> Result<(Vec<u32>, Option<Color>)> {
    let (_, (ids, color)) = face_line(text).map_err(|_| ShapeError::Syntax {
        line,
        message: "expected `<id>/<id>/<id>[/...] [#RRGGBB]`".to_string(),
    })?;

    let color = color
        .map(|hex| {
            hex.parse::<Color>().map_err(|e| ShapeError::Syntax {
                line,
                message: e.to_string(),
            })
        })
        .transpose()?;

    Ok((ids, color))
}

fn parse_coordinate(token: &str, line: usize) -> Result<f64> {
    token
        .replace("phi", &PHI.to_string())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ShapeError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

fn value_token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == '/' || c == '>' || c.is_whitespace())(input)
}

fn vertex_line(input: &str) -> IResult<&str, (Vec<&str>, u32)> {
    all_consuming(tuple((
        separated_list1(char('/'), value_token),
        delimited(delimited(space0, char('>'), space0), vertex_id, space0),
    )))(input)
}

fn face_line(input: &str) -> IResult<&str, (Vec<u32>, Option<&str>)> {
    all_consuming(tuple((
        separated_list1(char('/'), vertex_id),
        terminated(
            opt(preceded(space1, recognize(preceded(char('#'), hex_digit1)))),
            space0,
        ),
    )))(input)
}
