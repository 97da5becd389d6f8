//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`Style`] - Complete cell style (every axis set)
//! - [`StylePatch`] - Partial style (each axis optional), used by named styles and direct overrides
//! - [`StyleRegistry`] - Workbook-owned table of named styles
//! - [`FontStyle`], [`FillStyle`], [`BorderStyle`], [`Alignment`], [`Protection`], [`NumberFormat`]
//! - [`Color`] - Color representation
//!
//! The effective style of a cell is computed by layering, per axis, the sheet
//! default, then the cell's named style, then the cell's direct overrides.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod registry;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle, DiagonalDirection};
pub use color::Color;
pub use fill::{FillStyle, GradientStop, GradientType, PatternType};
pub use font::{FontStyle, FontVerticalAlign, Underline};
pub use number_format::NumberFormat;
pub use registry::{NamedStyle, RedefinitionMode, StyleId, StyleRegistry};

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Style {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
    pub protection: Protection,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = name.into();
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::Solid { color };
        self
    }

    /// Set number format code
    pub fn number_format<S: AsRef<str>>(mut self, code: S) -> Self {
        self.number_format = NumberFormat::from_code(code);
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Apply every axis that `patch` sets, leaving the others untouched
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(font) = &patch.font {
            self.font = font.clone();
        }
        if let Some(fill) = &patch.fill {
            self.fill = fill.clone();
        }
        if let Some(border) = &patch.border {
            self.border = border.clone();
        }
        if let Some(alignment) = &patch.alignment {
            self.alignment = alignment.clone();
        }
        if let Some(number_format) = &patch.number_format {
            self.number_format = number_format.clone();
        }
        if let Some(protection) = patch.protection {
            self.protection = protection;
        }
    }

    /// Builder form of [`Style::apply`]
    pub fn patched(mut self, patch: &StylePatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Cell protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protection {
    /// Cell is locked (protected when sheet is protected)
    pub locked: bool,
    /// Formula is hidden when sheet is protected
    pub hidden: bool,
}

impl Default for Protection {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Protection {
    pub fn new(locked: bool, hidden: bool) -> Self {
        Self { locked, hidden }
    }

    /// Create unlocked protection
    pub fn unlocked() -> Self {
        Self::new(false, false)
    }
}

/// A partial style: every axis is optional
///
/// Named styles are patches (an absent axis defers to the sheet default), and so
/// are a cell's direct overrides (an absent axis defers to the named style).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StylePatch {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font: Option<FontStyle>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub fill: Option<FillStyle>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border: Option<BorderStyle>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub alignment: Option<Alignment>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub number_format: Option<NumberFormat>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub protection: Option<Protection>,
}

impl StylePatch {
    /// An empty patch (sets nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that sets every axis of `style`
    pub fn from_style(style: &Style) -> Self {
        Self {
            font: Some(style.font.clone()),
            fill: Some(style.fill.clone()),
            border: Some(style.border.clone()),
            alignment: Some(style.alignment.clone()),
            number_format: Some(style.number_format.clone()),
            protection: Some(style.protection),
        }
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = Some(number_format);
        self
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = Some(protection);
        self
    }

    /// Check if no axis is set
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.fill.is_none()
            && self.border.is_none()
            && self.alignment.is_none()
            && self.number_format.is_none()
            && self.protection.is_none()
    }

    /// Overwrite the axes that `other` sets; the rest keep their current value
    pub fn merge(&mut self, other: &StylePatch) {
        if other.font.is_some() {
            self.font = other.font.clone();
        }
        if other.fill.is_some() {
            self.fill = other.fill.clone();
        }
        if other.border.is_some() {
            self.border = other.border.clone();
        }
        if other.alignment.is_some() {
            self.alignment = other.alignment.clone();
        }
        if other.number_format.is_some() {
            self.number_format = other.number_format.clone();
        }
        if other.protection.is_some() {
            self.protection = other.protection;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_set_axes() {
        let base = Style::new().bold(true).fill_color(Color::RED);
        let patch = StylePatch::new().with_fill(FillStyle::solid(Color::BLUE));

        let result = base.clone().patched(&patch);
        assert!(result.font.bold);
        assert_eq!(result.fill, FillStyle::solid(Color::BLUE));
        assert_eq!(result.border, base.border);
    }

    #[test]
    fn test_merge_patches() {
        let mut a = StylePatch::new()
            .with_fill(FillStyle::solid(Color::RED))
            .with_protection(Protection::unlocked());
        let b = StylePatch::new()
            .with_fill(FillStyle::solid(Color::GREEN))
            .with_number_format(NumberFormat::percent());
        a.merge(&b);

        assert_eq!(a.fill, Some(FillStyle::solid(Color::GREEN)));
        assert_eq!(a.protection, Some(Protection::unlocked()));
        assert_eq!(a.number_format, Some(NumberFormat::percent()));
        assert!(a.font.is_none());
    }

    #[test]
    fn test_full_patch_reproduces_style() {
        let style = Style::new()
            .font_name("Tahoma")
            .font_size(12.0)
            .number_format("0.00");
        assert_eq!(Style::new().patched(&StylePatch::from_style(&style)), style);
    }

    #[test]
    fn test_default_protection_is_locked() {
        assert!(Style::default().protection.locked);
        assert!(!Style::default().protection.hidden);
    }
}
