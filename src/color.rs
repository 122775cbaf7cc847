//! Colors and theme palettes.
//!
//! Colors are stored as straight (non-premultiplied) RGBA with each channel in
//! `0.0..=1.0`. They can be built from constants, packed hex integers, or parsed
//! from the CSS-like strings hosts usually carry around:
//!
//! ```ignore
//! let tomato: Color = "tomato".parse()?;
//! let grey: Color = "#ddd".parse()?;
//! let faded: Color = "rgba(255, 99, 71, 0.5)".parse()?;
//! ```

use std::str::FromStr;

use crate::error::ColorParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Return this color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channels as an `[r, g, b, a]` array, the layout GPU buffers expect.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not fully opaque).
    pub fn to_hex_string(self) -> String {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                to_u8(self.r),
                to_u8(self.g),
                to_u8(self.b),
                to_u8(self.a)
            )
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const TOMATO: Color = Color::rgb8(255, 99, 71);
    pub const LIGHT_GREY: Color = Color::rgb8(0xdd, 0xdd, 0xdd);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::Hex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_functional(&lower)
                .ok_or_else(|| ColorParseError::Functional(s.to_string()));
        }
        named(&lower).ok_or(ColorParseError::UnknownName(lower))
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::rgb8(r, g, b).with_alpha(a as f32 / 255.0))
}

/// Parses `rgb(r, g, b)` and `rgba(r, g, b, a)` with 0-255 channels and a 0-1 alpha.
fn parse_functional(s: &str) -> Option<Color> {
    let (name, rest) = s.split_once('(')?;
    let body = rest.strip_suffix(')')?;
    let parts: Vec<f32> = body
        .split(',')
        .map(|p| p.trim().parse::<f32>().ok())
        .collect::<Option<_>>()?;
    let channel = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    match (name.trim(), parts.as_slice()) {
        ("rgb", [r, g, b]) => Some(Color::rgb(channel(*r), channel(*g), channel(*b))),
        ("rgba", [r, g, b, a]) => Some(Color::rgba(
            channel(*r),
            channel(*g),
            channel(*b),
            a.clamp(0.0, 1.0),
        )),
        _ => None,
    }
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "tomato" => Color::TOMATO,
        "red" => Color::rgb8(255, 0, 0),
        "green" => Color::rgb8(0, 128, 0),
        "lime" => Color::rgb8(0, 255, 0),
        "blue" => Color::rgb8(0, 0, 255),
        "yellow" => Color::rgb8(255, 255, 0),
        "orange" => Color::rgb8(255, 165, 0),
        "gold" => Color::rgb8(255, 215, 0),
        "purple" => Color::rgb8(128, 0, 128),
        "gray" | "grey" => Color::rgb8(128, 128, 128),
        "lightgray" | "lightgrey" => Color::rgb8(211, 211, 211),
        "darkgray" | "darkgrey" => Color::rgb8(169, 169, 169),
        _ => return None,
    };
    Some(color)
}

/// Light or dark appearance, used for colors the config leaves unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Fallback colors for one [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub track: Color,
    pub inactive_track: Color,
    pub background: Color,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                track: Color::TOMATO,
                inactive_track: Color::LIGHT_GREY,
                background: Color::WHITE,
            },
            Theme::Dark => Palette {
                track: Color::TOMATO,
                inactive_track: Color::LIGHT_GREY,
                background: Color::BLACK,
            },
        }
    }
}
