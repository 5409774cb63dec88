use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{FxError, FxResult};

/// Straight-alpha color with channels in `[0, 1]`.
///
/// Every constructor clamps, so no widget can hand a compositor an alpha above 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
        }
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            a,
        )
    }

    /// HSL color; `h` in degrees (any value, taken modulo 360), `s` and `l` in `[0, 1]`.
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = if h.is_finite() {
            h.rem_euclid(360.0) / 360.0
        } else {
            0.0
        };
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgba(l, l, l, a);
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Self::rgba(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    pub fn mul_alpha(self, k: f64) -> Self {
        Self::rgba(self.r, self.g, self.b, self.a * k)
    }

    /// Channel-wise interpolation, used for gradient stops.
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let m = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            m(self.r, other.r),
            m(self.g, other.g),
            m(self.b, other.b),
            m(self.a, other.a),
        )
    }

    pub fn to_rgba8_straight(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let [r, g, b, a] = self.to_rgba8_straight();
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    /// Parse a CSS color string: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`,
    /// `hsla()` or the keywords `white`, `black` and `transparent`.
    pub fn parse_css(s: &str) -> FxResult<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::rgba(0.0, 0.0, 0.0, 1.0)),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some((func, args)) = split_function(&lower) {
            let parts: Vec<&str> = args
                .split([',', '/', ' '])
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            return match func {
                "rgb" | "rgba" => parse_rgb_args(&parts),
                "hsl" | "hsla" => parse_hsl_args(&parts),
                _ => Err(FxError::validation(format!(
                    "unsupported color function \"{func}\""
                ))),
            };
        }
        Err(FxError::validation(format!("unrecognized color \"{s}\"")))
    }

    /// Like [`Rgba::parse_css`], falling back to white when the string is not a color.
    pub fn parse_css_or_white(s: &str) -> Self {
        match Self::parse_css(s) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(color = s, %err, "falling back to white");
                Self::WHITE
            }
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => Self::parse_css(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn parse_hex(s: &str) -> FxResult<Rgba> {
    fn nibble(c: u8) -> FxResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| FxError::validation(format!("invalid hex digit '{}'", c as char)))
    }

    let b = s.as_bytes();
    let byte = |i: usize| -> FxResult<u8> { Ok(nibble(b[i])? << 4 | nibble(b[i + 1])?) };
    let short = |i: usize| -> FxResult<u8> {
        let n = nibble(b[i])?;
        Ok(n << 4 | n)
    };

    let (r, g, bl, a) = match b.len() {
        3 => (short(0)?, short(1)?, short(2)?, 255),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => {
            return Err(FxError::validation(
                "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
            ));
        }
    };
    Ok(Rgba::rgba8(r, g, bl, f64::from(a) / 255.0))
}

fn parse_number(s: &str) -> FxResult<f64> {
    s.parse::<f64>()
        .map_err(|_| FxError::validation(format!("invalid color component \"{s}\"")))
}

/// Percentages map to `[0, 1]`; bare numbers are divided by `scale`.
fn parse_component(s: &str, scale: f64) -> FxResult<f64> {
    match s.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0),
        None => Ok(parse_number(s)? / scale),
    }
}

fn parse_alpha(parts: &[&str]) -> FxResult<f64> {
    parts.get(3).map_or(Ok(1.0), |a| parse_component(a, 1.0))
}

fn parse_rgb_args(parts: &[&str]) -> FxResult<Rgba> {
    if parts.len() != 3 && parts.len() != 4 {
        return Err(FxError::validation("rgb() expects 3 or 4 components"));
    }
    Ok(Rgba::rgba(
        parse_component(parts[0], 255.0)?,
        parse_component(parts[1], 255.0)?,
        parse_component(parts[2], 255.0)?,
        parse_alpha(parts)?,
    ))
}

fn parse_hsl_args(parts: &[&str]) -> FxResult<Rgba> {
    if parts.len() != 3 && parts.len() != 4 {
        return Err(FxError::validation("hsl() expects 3 or 4 components"));
    }
    let h = parse_number(parts[0].trim_end_matches("deg"))?;
    Ok(Rgba::hsla(
        h,
        parse_component(parts[1], 100.0)?,
        parse_component(parts[2], 100.0)?,
        parse_alpha(parts)?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
