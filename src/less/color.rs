//! RGB colors with alpha channel.

use super::value::format_number;

/// A color.
///
/// Channels are kept as floating point numbers, so that intermediate results
/// of operations are not rounded. They are clamped when rendered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Color {
    pub(crate) rgb: [f64; 3],
    pub(crate) alpha: f64,
    /// Text of the color as written in the source, if unchanged since.
    pub(crate) original: Option<String>,
}

/// Hue (degrees), saturation and lightness (both in `0..=1`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

const NAMED_COLORS: [(&str, [u8; 3]); 20] = [
    ("aqua", [0, 255, 255]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("lime", [0, 255, 0]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("teal", [0, 128, 128]),
    ("transparent", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

impl Color {
    /// Create an opaque color from RGB channels.
    pub(crate) fn from_rgb(rgb: [f64; 3]) -> Self {
        Self::from_rgba(rgb, 1.0)
    }

    /// Create a color from RGB channels and alpha.
    pub(crate) fn from_rgba(rgb: [f64; 3], alpha: f64) -> Self {
        Self {
            rgb,
            alpha,
            original: None,
        }
    }

    /// Parse a hexadecimal color (without `#`) of 3 or 6 digits.
    pub(crate) fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let digits: Vec<u8> = match hex.len() {
            3 => hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d * 17) as u8)
                .collect(),
            6 => (0..3)
                .filter_map(|i| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok())
                .collect(),
            _ => return None,
        };

        let [r, g, b] = <[u8; 3]>::try_from(digits).ok()?;

        Some(Self {
            rgb: [r.into(), g.into(), b.into()],
            alpha: 1.0,
            original: Some(format!("#{hex}")),
        })
    }

    /// Look up a CSS color keyword.
    pub(crate) fn from_keyword(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(keyword, _)| *keyword == name)
            .map(|(keyword, [r, g, b])| {
                let alpha = if *keyword == "transparent" { 0.0 } else { 1.0 };
                Self::from_rgba([(*r).into(), (*g).into(), (*b).into()], alpha)
            })
    }

    /// Create a color from HSL components and alpha.
    pub(crate) fn from_hsla(hsl: Hsl, alpha: f64) -> Self {
        let h = hsl.h.rem_euclid(360.0) / 360.0;
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);

        let m2 = if l <= 0.5 { l * (s + 1.0) } else { l + s - l * s };
        let m1 = l * 2.0 - m2;

        let hue = |h: f64| {
            let h = if h < 0.0 {
                h + 1.0
            } else if h > 1.0 {
                h - 1.0
            } else {
                h
            };
            if h * 6.0 < 1.0 {
                m1 + (m2 - m1) * h * 6.0
            } else if h * 2.0 < 1.0 {
                m2
            } else if h * 3.0 < 2.0 {
                m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
            } else {
                m1
            }
        };

        Self::from_rgba(
            [
                hue(h + 1.0 / 3.0) * 255.0,
                hue(h) * 255.0,
                hue(h - 1.0 / 3.0) * 255.0,
            ],
            alpha,
        )
    }

    /// Convert to HSL.
    pub(crate) fn to_hsl(&self) -> Hsl {
        let [r, g, b] = self.rgb.map(|c| c.clamp(0.0, 255.0) / 255.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h * 60.0, s, l }
    }

    /// Mix two colors, with `weight` (in `0..=1`) the proportion of `self`.
    pub(crate) fn mix(&self, other: &Self, weight: f64) -> Self {
        let w = weight * 2.0 - 1.0;
        let a = self.alpha - other.alpha;

        let w1 = (if w * a == -1.0 {
            w
        } else {
            (w + a) / (1.0 + w * a)
        } + 1.0)
            / 2.0;
        let w2 = 1.0 - w1;

        let mut rgb = [0.0; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = self.rgb[i] * w1 + other.rgb[i] * w2;
        }

        Self::from_rgba(rgb, self.alpha * weight + other.alpha * (1.0 - weight))
    }

    /// Render the color as CSS.
    ///
    /// Unchanged colors keep their original text unless compressing, in which
    /// case hexadecimal colors are shortened when possible.
    pub(crate) fn to_css(&self, compress: bool) -> String {
        if !compress {
            if let Some(original) = self.original.as_ref() {
                return original.clone();
            }
        }

        let [r, g, b] = self.rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
        let alpha = self.alpha.clamp(0.0, 1.0);

        if alpha < 1.0 {
            let alpha = format_number(alpha);
            return if compress {
                format!("rgba({r},{g},{b},{alpha})")
            } else {
                format!("rgba({r}, {g}, {b}, {alpha})")
            };
        }

        let hex = format!("#{r:02x}{g:02x}{b:02x}");

        if compress {
            let bytes = hex.as_bytes();
            if bytes[1] == bytes[2] && bytes[3] == bytes[4] && bytes[5] == bytes[6] {
                return format!("#{}{}{}", bytes[1] as char, bytes[3] as char, bytes[5] as char);
            }
        }

        hex
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Hsl};

    #[test]
    fn hex() {
        let color = Color::from_hex("f80").unwrap();
        assert_eq!(color.rgb, [255.0, 136.0, 0.0]);
        assert_eq!(color.to_css(false), "#f80");
        assert_eq!(color.to_css(true), "#f80");

        let color = Color::from_hex("FFFFFF").unwrap();
        assert_eq!(color.to_css(false), "#FFFFFF");
        assert_eq!(color.to_css(true), "#fff");

        assert!(Color::from_hex("ffff").is_none());
        assert!(Color::from_hex("ggg").is_none());
    }

    #[test]
    fn hsl_round_trip() {
        let color = Color::from_rgb([51.0, 102.0, 153.0]);
        let Hsl { h, s, l } = color.to_hsl();

        assert!((h - 210.0).abs() < 1e-9);
        assert!((s - 0.5).abs() < 1e-9);
        assert!((l - 0.4).abs() < 1e-9);

        let back = Color::from_hsla(Hsl { h, s, l }, 1.0);
        assert_eq!(back.to_css(false), "#336699");
    }

    #[test]
    fn alpha() {
        let color = Color::from_rgba([0.0, 0.0, 0.0], 0.5);
        assert_eq!(color.to_css(false), "rgba(0, 0, 0, 0.5)");
        assert_eq!(color.to_css(true), "rgba(0,0,0,0.5)");
    }

    #[test]
    fn mix() {
        let black = Color::from_keyword("black").unwrap();
        let white = Color::from_keyword("white").unwrap();
        assert_eq!(black.mix(&white, 0.5).to_css(false), "#808080");
    }
}
