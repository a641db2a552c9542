//! Colour type, hex parsing and colour-space encodings.
//!
//! Every encoding starts from an sRGB hex value; the HSL and OKLCH
//! conversions go through the `palette` crate in `f64`.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, LinSrgb, Oklch, Srgb};

use crate::error::{Result, TokenError};

/// Chroma below this prints as a grey with no meaningful hue.
const ACHROMATIC_CHROMA: f64 = 5e-4;

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue, saturation and lightness in degrees and percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslTriple {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// OKLCH lightness (0-1), chroma and hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklchTriple {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let digits = hex
            .chars()
            .map(parse_hex_digit)
            .collect::<Result<Vec<u8>>>()?;

        match digits[..] {
            [r, g, b] => Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
            [r, g, b, a] => Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::new(
                r1 << 4 | r2,
                g1 << 4 | g2,
                b1 << 4 | b2,
                a1 << 4 | a2,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Comma-joined decimal channels, e.g. `255,0,0`.
    pub fn to_rgb_triple(self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    /// Convert to HSL with hue in degrees and saturation/lightness in percent.
    pub fn to_hsl(self) -> HslTriple {
        let hsl: Hsl<palette::encoding::Srgb, f64> = self.to_srgb().into_color();
        HslTriple {
            hue: hsl.hue.into_positive_degrees(),
            saturation: hsl.saturation * 100.0,
            lightness: hsl.lightness * 100.0,
        }
    }

    /// Convert to OKLCH.
    pub fn to_oklch(self) -> OklchTriple {
        let linear: LinSrgb<f64> = self.to_srgb().into_linear();
        let lch: Oklch<f64> = linear.into_color();

        let chroma = lch.chroma.max(0.0) + 0.0;
        let hue = if chroma < ACHROMATIC_CHROMA {
            0.0
        } else {
            lch.hue.into_positive_degrees()
        };

        OklchTriple {
            lightness: lch.l.max(0.0) + 0.0,
            chroma,
            hue,
        }
    }

    /// CSS-ready value: lowercase `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            self.to_lower_hex()
        } else {
            let alpha = (f64::from(self.a) / 255.0 * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }

    /// Lowercase `#rrggbb`, dropping any alpha channel.
    pub fn to_lower_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn to_srgb(self) -> Srgb<f64> {
        Srgb::new(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl HslTriple {
    /// `H S% L%` with every component rounded to an integer.
    pub fn to_css_components(self) -> String {
        format!(
            "{} {}% {}%",
            self.hue.round(),
            self.saturation.round(),
            self.lightness.round()
        )
    }
}

impl OklchTriple {
    /// `L C H` with lightness and chroma to 3 decimals, hue to 1.
    pub fn to_css_components(self) -> String {
        format!("{:.3} {:.3} {:.1}", self.lightness, self.chroma, self.hue)
    }
}

impl FromStr for Colour {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> TokenError {
    TokenError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| TokenError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}
