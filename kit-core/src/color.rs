//! Hex colors as used by the design records (`#0055a4`, `#fff`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque sRGB color. Serializes as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KitColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl KitColor {
    pub const WHITE: KitColor = KitColor::rgb(255, 255, 255);
    pub const BLACK: KitColor = KitColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`. Anything else is rejected, matching what the
    /// record store accepts.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let hex = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash {
                input: input.to_string(),
            })?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigits {
                input: input.to_string(),
            });
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidDigits {
                input: input.to_string(),
            })
        };

        match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            len => Err(ColorError::InvalidLength { len }),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear blend in sRGB space; `t` is clamped to [0, 1].
    pub fn lerp(self, other: KitColor, t: f32) -> KitColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        KitColor::rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl fmt::Display for KitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for KitColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KitColor::parse(s)
    }
}

impl TryFrom<String> for KitColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        KitColor::parse(&value)
    }
}

impl From<KitColor> for String {
    fn from(color: KitColor) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color must start with '#': {input:?}")]
    MissingHash { input: String },

    #[error("color contains non-hex digits: {input:?}")]
    InvalidDigits { input: String },

    #[error("color must have 3 or 6 hex digits, got {len}")]
    InvalidLength { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(KitColor::parse("#0055a4"), Ok(KitColor::rgb(0x00, 0x55, 0xa4)));
        assert_eq!(KitColor::parse("#FFF"), Ok(KitColor::WHITE));
        assert_eq!(KitColor::parse(" #ef4135 ").map(|c| c.to_hex()), Ok("#ef4135".into()));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            KitColor::parse("0055a4"),
            Err(ColorError::MissingHash { .. })
        ));
        assert!(matches!(
            KitColor::parse("#00zz00"),
            Err(ColorError::InvalidDigits { .. })
        ));
        assert_eq!(
            KitColor::parse("#0055"),
            Err(ColorError::InvalidLength { len: 4 })
        );
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&KitColor::rgb(0xef, 0x41, 0x35)).unwrap();
        assert_eq!(json, "\"#ef4135\"");

        let back: KitColor = serde_json::from_str("\"#A50044\"").unwrap();
        assert_eq!(back, KitColor::rgb(0xa5, 0x00, 0x44));

        assert!(serde_json::from_str::<KitColor>("\"red\"").is_err());
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = KitColor::BLACK;
        let b = KitColor::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), KitColor::rgb(128, 128, 128));
        assert_eq!(a.lerp(b, 7.0), b);
    }
}
