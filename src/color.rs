use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// A straight-alpha RGBA color with 8 bits per channel.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable,
    Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|c| c * 17);

        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Parses the body of `rgba(r, g, b, a)` / `rgb(r, g, b)`, alpha in `[0, 1]`.
    fn parse_function(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }

        let r = parts[0].parse().ok()?;
        let g = parts[1].parse().ok()?;
        let b = parts[2].parse().ok()?;
        let a = if with_alpha {
            let alpha: f32 = parts[3].parse().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            (alpha * 255.0).round() as u8
        } else {
            255
        };

        Some(Self::rgba(r, g, b, a))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` with a fractional alpha.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(body) = lower
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_function(body, true)
        } else if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_function(body, false)
        } else {
            None
        };

        parsed.ok_or_else(|| ColorError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Self::from_array(pixel.0)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba(color.to_array())
    }
}

/// The preset swatches offered next to the free color input.
#[rustfmt::skip]
pub const DEFAULT_PALETTE: [Color; 19] = [
    Color::rgb(0xff, 0xcd, 0xd2), Color::rgb(0xf8, 0xbb, 0xd0), Color::rgb(0xe1, 0xbe, 0xe7),
    Color::rgb(0xd1, 0xc4, 0xe9), Color::rgb(0xc5, 0xca, 0xe9), Color::rgb(0xbb, 0xde, 0xfb),
    Color::rgb(0xb3, 0xe5, 0xfc), Color::rgb(0xb2, 0xeb, 0xf2), Color::rgb(0xb2, 0xdf, 0xdb),
    Color::rgb(0xc8, 0xe6, 0xc9), Color::rgb(0xdc, 0xed, 0xc8), Color::rgb(0xf0, 0xf4, 0xc3),
    Color::rgb(0xff, 0xf9, 0xc4), Color::rgb(0xff, 0xec, 0xb3), Color::rgb(0xff, 0xe0, 0xb2),
    Color::rgb(0xff, 0xcc, 0xbc), Color::rgb(0xd7, 0xcc, 0xc8), Color::rgb(0xf5, 0xf5, 0xf5),
    Color::rgb(0xcf, 0xd8, 0xdc),
];
