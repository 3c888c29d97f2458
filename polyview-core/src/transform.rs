/// Interaction commands and the whole-shape transforms they map to
use crate::shape::Shape;

/// A user-level request: one fixed step of rotation or scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    RotateUp,
    RotateDown,
    RotateLeft,
    RotateRight,
    ScaleUp,
    ScaleDown,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::RotateUp,
        Command::RotateDown,
        Command::RotateLeft,
        Command::RotateRight,
        Command::ScaleUp,
        Command::ScaleDown,
    ];

    /// The transform this command performs with the given step sizes
    pub fn transform(self, rotation_step: f64, scale_step: f64) -> Transform {
        match self {
            Command::RotateUp => Transform::Rotate {
                horizontal: 0.0,
                vertical: rotation_step,
            },
            Command::RotateDown => Transform::Rotate {
                horizontal: 0.0,
                vertical: -rotation_step,
            },
            Command::RotateRight => Transform::Rotate {
                horizontal: rotation_step,
                vertical: 0.0,
            },
            Command::RotateLeft => Transform::Rotate {
                horizontal: -rotation_step,
                vertical: 0.0,
            },
            Command::ScaleUp => Transform::Scale {
                multiplier: scale_step,
            },
            Command::ScaleDown => Transform::Scale {
                multiplier: -scale_step,
            },
        }
    }
}

/// A transform applied to every vertex of a shape at once
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Angles in degrees
    Rotate { horizontal: f64, vertical: f64 },
    /// Radial step, capped at `max_scale` when applied
    Scale { multiplier: f64 },
}

impl Transform {
    pub fn apply(&self, shape: &mut Shape, max_scale: f64) {
        match *self {
            Transform::Rotate {
                horizontal,
                vertical,
            } => shape.rotate(horizontal, vertical),
            Transform::Scale { multiplier } => shape.scale(multiplier, max_scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_directions() {
        assert_eq!(
            Command::RotateUp.transform(2.0, 0.1),
            Transform::Rotate {
                horizontal: 0.0,
                vertical: 2.0
            }
        );
        assert_eq!(
            Command::RotateLeft.transform(2.0, 0.1),
            Transform::Rotate {
                horizontal: -2.0,
                vertical: 0.0
            }
        );
    }

    #[test]
    fn test_opposite_commands_cancel() {
        let pairs = [
            (Command::RotateUp, Command::RotateDown),
            (Command::RotateLeft, Command::RotateRight),
            (Command::ScaleUp, Command::ScaleDown),
        ];
        for (a, b) in pairs {
            match (a.transform(3.0, 0.25), b.transform(3.0, 0.25)) {
                (
                    Transform::Rotate {
                        horizontal: h1,
                        vertical: v1,
                    },
                    Transform::Rotate {
                        horizontal: h2,
                        vertical: v2,
                    },
                ) => {
                    assert_eq!(h1, -h2);
                    assert_eq!(v1, -v2);
                }
                (Transform::Scale { multiplier: m1 }, Transform::Scale { multiplier: m2 }) => {
                    assert_eq!(m1, -m2);
                }
                other => panic!("mismatched pair {other:?}"),
            }
        }
    }
}
