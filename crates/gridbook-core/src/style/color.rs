//! Color representation

use std::fmt;

/// Color used by fonts, fills, borders and conditional formats
///
/// Explicit colors carry their channels; theme and indexed colors are resolved
/// against the default Office theme and the legacy 56-entry palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Color {
    /// Automatic color (the application decides, usually black text)
    #[default]
    Auto,

    /// Opaque RGB color
    Rgb { r: u8, g: u8, b: u8 },

    /// RGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme slot with tint
    ///
    /// Slots: 0 = background 1, 1 = text 1, 2 = background 2, 3 = text 2,
    /// 4-9 = accents 1-6.
    Theme {
        /// Theme slot (0-9)
        index: u8,
        /// Tint in percent, -100 (darkest) to 100 (lightest)
        tint: i8,
    },

    /// Entry of the legacy indexed palette
    Indexed(u8),
}

/// Legacy indexed palette (entries 0-55)
const PALETTE: [(u8, u8, u8); 56] = [
    (0, 0, 0),
    (255, 255, 255),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
    (0, 0, 0),
    (255, 255, 255),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
    (128, 0, 0),
    (0, 128, 0),
    (0, 0, 128),
    (128, 128, 0),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (153, 153, 255),
    (153, 51, 102),
    (255, 255, 204),
    (204, 255, 255),
    (102, 0, 102),
    (255, 128, 128),
    (0, 102, 204),
    (204, 204, 255),
    (0, 0, 128),
    (255, 0, 255),
    (255, 255, 0),
    (0, 255, 255),
    (128, 0, 128),
    (128, 0, 0),
    (0, 128, 128),
    (0, 0, 255),
    (0, 204, 255),
    (204, 255, 255),
    (204, 255, 204),
    (255, 255, 153),
    (153, 204, 255),
    (255, 153, 204),
    (204, 153, 255),
    (255, 204, 153),
    (51, 102, 255),
    (51, 204, 204),
    (153, 204, 0),
    (255, 204, 0),
    (255, 153, 0),
    (255, 102, 0),
    (102, 102, 153),
    (150, 150, 150),
];

/// Default Office theme (slots 0-9)
const THEME: [(u8, u8, u8); 10] = [
    (255, 255, 255),
    (0, 0, 0),
    (238, 236, 225),
    (31, 73, 125),
    (79, 129, 189),
    (192, 80, 77),
    (155, 187, 89),
    (128, 100, 162),
    (75, 172, 198),
    (247, 150, 70),
];

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Create an indexed palette color
    pub const fn indexed(index: u8) -> Self {
        Color::Indexed(index)
    }

    /// Parse a hex string: `RRGGBB` or `AARRGGBB`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::argb(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Build a color from a kind tag and a textual value
    ///
    /// - `"rgb"`: hex text, see [`Color::from_hex`]
    /// - `"theme"`: a slot number (`"4"`) or a color name (`"red"`); unknown names give black
    /// - `"indexed"`: a palette index
    ///
    /// Returns `None` for an unknown kind or an unparsable value.
    pub fn from_kind(kind: &str, value: &str) -> Option<Self> {
        match kind {
            "rgb" => Self::from_hex(value),
            "theme" => match value.parse::<u8>() {
                Ok(index) => Some(Color::theme(index, 0)),
                Err(_) => Some(Self::named(value).unwrap_or(Color::BLACK)),
            },
            "indexed" => value.parse::<u8>().ok().map(Color::Indexed),
            _ => None,
        }
    }

    /// Look up one of the named color constants (case-insensitive)
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_uppercase().as_str() {
            "BLACK" => Color::BLACK,
            "WHITE" => Color::WHITE,
            "RED" => Color::RED,
            "GREEN" => Color::GREEN,
            "BLUE" => Color::BLUE,
            "YELLOW" => Color::YELLOW,
            "CYAN" => Color::CYAN,
            "MAGENTA" => Color::MAGENTA,
            "GRAY" | "GREY" => Color::GRAY,
            "LIGHT_GRAY" => Color::LIGHT_GRAY,
            "DARK_GRAY" => Color::DARK_GRAY,
            _ => return None,
        };
        Some(color)
    }

    /// Resolve to concrete RGB channels
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Auto => (0, 0, 0),
            Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => (r, g, b),
            Color::Theme { index, tint } => {
                let base = THEME.get(index as usize).copied().unwrap_or((0, 0, 0));
                apply_tint(base, tint)
            }
            Color::Indexed(i) => PALETTE.get(i as usize).copied().unwrap_or((0, 0, 0)),
        }
    }

    /// Uppercase `RRGGBB` of the resolved color
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Uppercase `AARRGGBB`; colors without alpha are opaque
    pub fn to_argb_hex(&self) -> String {
        let a = match self {
            Color::Argb { a, .. } => *a,
            _ => 0xFF,
        };
        format!("{:02X}{}", a, self.to_hex())
    }

    /// Linear interpolation between two colors, per RGB channel
    ///
    /// `t` is clamped to `[0, 1]`; the result is always an explicit RGB color.
    pub fn lerp(from: Color, to: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (r1, g1, b1) = from.to_rgb();
        let (r2, g2, b2) = to.to_rgb();
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
    }

    /// Check if color is automatic
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
}

/// Lighten (positive tint) or darken (negative tint) a base color
fn apply_tint(color: (u8, u8, u8), tint: i8) -> (u8, u8, u8) {
    let tint = (tint as f64 / 100.0).clamp(-1.0, 1.0);

    let apply = |c: u8| -> u8 {
        let c = c as f64;
        let result = if tint < 0.0 {
            c * (1.0 + tint)
        } else {
            c + (255.0 - c) * tint
        };
        result.round().clamp(0.0, 255.0) as u8
    };

    (apply(color.0), apply(color.1), apply(color.2))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { .. } => write!(f, "#{}", self.to_hex()),
            Color::Argb { .. } => write!(f, "#{}", self.to_argb_hex()),
            Color::Theme { index, tint } => write!(f, "theme({}, {}%)", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}
