//! Border style types

use super::Color;

/// Border style for a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BorderStyle {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
    pub diagonal: Option<BorderEdge>,
    /// Which diagonals `diagonal` is drawn on
    pub diagonal_direction: DiagonalDirection,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Same line on the four outer edges
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = BorderEdge::new(style, color);
        Self {
            left: Some(edge),
            right: Some(edge),
            top: Some(edge),
            bottom: Some(edge),
            ..Self::default()
        }
    }

    pub fn with_left(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.left = BorderEdge::visible(style, color);
        self
    }

    pub fn with_right(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.right = BorderEdge::visible(style, color);
        self
    }

    pub fn with_top(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.top = BorderEdge::visible(style, color);
        self
    }

    pub fn with_bottom(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.bottom = BorderEdge::visible(style, color);
        self
    }

    /// Draw both diagonals with the given line
    pub fn with_diagonals(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.diagonal = BorderEdge::visible(style, color);
        self.diagonal_direction = if self.diagonal.is_some() {
            DiagonalDirection::Both
        } else {
            DiagonalDirection::None
        };
        self
    }

    /// Check if all borders are empty
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
            && self.diagonal.is_none()
    }
}

/// A single border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    pub style: BorderLineStyle,
    pub color: Color,
}

impl BorderEdge {
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }

    /// An edge, or `None` when the line style draws nothing
    pub fn visible(style: BorderLineStyle, color: Color) -> Option<Self> {
        if style == BorderLineStyle::None {
            None
        } else {
            Some(Self::new(style, color))
        }
    }

    /// Thin black line
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Thin, Color::BLACK)
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum BorderLineStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    /// Parse the OOXML line name (`"thin"`, `"mediumDashed"`, ...)
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "none" => BorderLineStyle::None,
            "thin" => BorderLineStyle::Thin,
            "medium" => BorderLineStyle::Medium,
            "thick" => BorderLineStyle::Thick,
            "dashed" => BorderLineStyle::Dashed,
            "dotted" => BorderLineStyle::Dotted,
            "double" => BorderLineStyle::Double,
            "hair" => BorderLineStyle::Hair,
            "mediumDashed" => BorderLineStyle::MediumDashed,
            "dashDot" => BorderLineStyle::DashDot,
            "mediumDashDot" => BorderLineStyle::MediumDashDot,
            "dashDotDot" => BorderLineStyle::DashDotDot,
            "mediumDashDotDot" => BorderLineStyle::MediumDashDotDot,
            "slantDashDot" => BorderLineStyle::SlantDashDot,
            _ => return None,
        })
    }
}

/// Diagonal border direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum DiagonalDirection {
    #[default]
    None,
    /// Top-left to bottom-right
    Down,
    /// Bottom-left to top-right
    Up,
    Both,
}
