//! Font style types

use super::Color;

/// Font style settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Tahoma")
    pub name: String,
    /// Font size in points
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
    pub size: f64,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline style
    pub underline: Underline,
    /// Strikethrough
    pub strikethrough: bool,
    /// Font color
    pub color: Color,
    /// Superscript/subscript
    pub vertical_align: FontVerticalAlign,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            underline: Underline::None,
            strikethrough: false,
            color: Color::Auto,
            vertical_align: FontVerticalAlign::Baseline,
        }
    }
}

impl FontStyle {
    /// Create a new default font (Calibri 11)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_vertical_align(mut self, align: FontVerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    DoubleAccounting,
}

impl Underline {
    /// Parse the OOXML name (`"single"`, `"doubleAccounting"`, ...)
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "none" => Underline::None,
            "single" => Underline::Single,
            "double" => Underline::Double,
            "singleAccounting" => Underline::SingleAccounting,
            "doubleAccounting" => Underline::DoubleAccounting,
            _ => return None,
        })
    }
}

/// Font vertical alignment (superscript/subscript)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum FontVerticalAlign {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

impl FontVerticalAlign {
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "baseline" => FontVerticalAlign::Baseline,
            "superscript" => FontVerticalAlign::Superscript,
            "subscript" => FontVerticalAlign::Subscript,
            _ => return None,
        })
    }
}
