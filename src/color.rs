// color.rs
// CSS color values carried by splashes

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// Fill color of a splash. Keeps the canonical `#rrggbb` form around so the
/// surface can be handed a string on every draw without reformatting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SplashColor {
    rgb: Srgb<u8>,
    css: String,
}

impl SplashColor {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let rgb = Srgb::new(red, green, blue);
        Self {
            css: format!("#{:02x}{:02x}{:02x}", red, green, blue),
            rgb,
        }
    }

    pub fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    /// Accepts `#rgb`, `#rrggbb` or a CSS color name.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        let rgb: Option<Srgb<u8>> = if trimmed.starts_with('#') {
            trimmed.parse::<Srgb<u8>>().ok()
        } else {
            palette::named::from_str(&trimmed.to_ascii_lowercase())
        };
        rgb.map(|c| Self::from_rgb(c.red, c.green, c.blue))
            .ok_or_else(|| ColorError::Unrecognized(value.to_string()))
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.rgb
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

impl Default for SplashColor {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for SplashColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SplashColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SplashColor> for String {
    fn from(color: SplashColor) -> Self {
        color.css
    }
}

impl fmt::Display for SplashColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}
