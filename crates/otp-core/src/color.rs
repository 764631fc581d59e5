use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::OtpError;

/// RGBA, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    /// Strict parser for platform-style color strings: `#RRGGBB` or
    /// `#AARRGGBB` (alpha first).
    pub fn parse_argb_hex(hex: &str) -> Result<Self, OtpError> {
        let invalid = || OtpError::InvalidColor(hex.to_string());
        let s = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid());
        match s.len() {
            6 => Ok(Color(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Color(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => Err(invalid()),
        }
    }

    /// Inverse of [`Color::parse_argb_hex`]; opaque colors drop the alpha byte.
    pub fn to_argb_hex(self) -> String {
        if self.3 == 255 {
            format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.3, self.0, self.1, self.2)
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_argb_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_argb_hex(&s).map_err(serde::de::Error::custom)
    }
}
