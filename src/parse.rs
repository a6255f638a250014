use crate::error::{SpriteError, SpriteResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(50, 50, 50)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `#RRGGBB` (the `#` is optional).
pub fn parse_color(s: &str) -> SpriteResult<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SpriteError::InvalidColor(s.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| SpriteError::InvalidColor(s.to_string()))
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parses `WxH`, accepting either case of the separator.
pub fn parse_size(s: &str) -> SpriteResult<ScreenSize> {
    let lower = s.to_ascii_lowercase();
    let mut parts = lower.split('x');

    let (w, h) = match (parts.next(), parts.next(), parts.next()) {
        (Some(w), Some(h), None) => (w.trim(), h.trim()),
        _ => return Err(SpriteError::InvalidSize(s.to_string())),
    };

    let dim = |v: &str| match v.parse::<u32>() {
        Ok(n) if n > 0 && v.bytes().all(|b| b.is_ascii_digit()) => Ok(n),
        _ => Err(SpriteError::InvalidSize(s.to_string())),
    };

    Ok(ScreenSize::new(dim(w)?, dim(h)?))
}
