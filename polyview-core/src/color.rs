/// RGB colors for faces and the drawing surface
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A random color bright enough to stand out on a black background.
    ///
    /// Every hex digit is drawn from `4..=F`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut channel = || rng.gen_range(4u8..=15) * 16 + rng.gen_range(4u8..=15);
        let r = channel();
        let g = channel();
        let b = channel();
        Self { r, g, b }
    }

    /// The complementary color (255 minus each channel)
    pub fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(s.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
