//! Text alignment types

/// Text alignment settings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
    pub wrap_text: bool,
    pub shrink_to_fit: bool,
    /// Indent level (0-250)
    pub indent: u8,
    /// Text rotation in degrees (-90 to 90, or 255 for stacked vertical text)
    pub rotation: i16,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = align;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    pub fn with_shrink_to_fit(mut self, shrink: bool) -> Self {
        self.shrink_to_fit = shrink;
        self
    }

    /// Set indent level, capped at 250
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent.min(250);
        self
    }

    /// Set rotation angle; 255 selects stacked text, anything else is clamped to ±90
    pub fn with_rotation(mut self, degrees: i16) -> Self {
        self.rotation = if degrees == 255 {
            255
        } else {
            degrees.clamp(-90, 90)
        };
        self
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum HorizontalAlignment {
    /// Text left, numbers right
    #[default]
    General,
    Left,
    Center,
    Right,
    /// Repeat content to fill the cell width
    Fill,
    Justify,
    /// Center across selection
    CenterContinuous,
    Distributed,
}

impl HorizontalAlignment {
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "general" => HorizontalAlignment::General,
            "left" => HorizontalAlignment::Left,
            "center" => HorizontalAlignment::Center,
            "right" => HorizontalAlignment::Right,
            "fill" => HorizontalAlignment::Fill,
            "justify" => HorizontalAlignment::Justify,
            "centerContinuous" => HorizontalAlignment::CenterContinuous,
            "distributed" => HorizontalAlignment::Distributed,
            _ => return None,
        })
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum VerticalAlignment {
    Top,
    Center,
    #[default]
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlignment {
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "top" => VerticalAlignment::Top,
            "center" => VerticalAlignment::Center,
            "bottom" => VerticalAlignment::Bottom,
            "justify" => VerticalAlignment::Justify,
            "distributed" => VerticalAlignment::Distributed,
            _ => return None,
        })
    }
}
