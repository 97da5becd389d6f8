//! Fill/background style types

use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum FillStyle {
    /// No fill (transparent)
    #[default]
    None,

    /// Solid color fill
    Solid { color: Color },

    /// Pattern fill
    Pattern {
        pattern: PatternType,
        foreground: Color,
        background: Color,
    },

    /// Gradient fill
    Gradient {
        gradient_type: GradientType,
        /// Angle in degrees, linear gradients only
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
        angle: f64,
        stops: Vec<GradientStop>,
    },
}

impl FillStyle {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        FillStyle::Solid { color }
    }

    /// Create a pattern fill
    ///
    /// A `Solid` pattern collapses to [`FillStyle::Solid`] with the foreground color.
    pub fn pattern(pattern: PatternType, foreground: Color, background: Color) -> Self {
        match pattern {
            PatternType::None => FillStyle::None,
            PatternType::Solid => FillStyle::Solid { color: foreground },
            _ => FillStyle::Pattern {
                pattern,
                foreground,
                background,
            },
        }
    }

    /// Create a linear gradient fill
    pub fn linear_gradient(angle: f64, stops: Vec<GradientStop>) -> Self {
        FillStyle::Gradient {
            gradient_type: GradientType::Linear,
            angle,
            stops,
        }
    }

    /// Create a gradient whose colors are spread evenly from position 0 to 1
    pub fn gradient_from_colors(gradient_type: GradientType, angle: f64, colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, color)| GradientStop::new(i as f64 / last, *color))
            .collect();
        FillStyle::Gradient {
            gradient_type,
            angle,
            stops,
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        matches!(self, FillStyle::None)
    }

    /// The dominant color of the fill, if any
    pub fn primary_color(&self) -> Option<Color> {
        match self {
            FillStyle::None => None,
            FillStyle::Solid { color } => Some(*color),
            FillStyle::Pattern { foreground, .. } => Some(*foreground),
            FillStyle::Gradient { stops, .. } => stops.first().map(|s| s.color),
        }
    }
}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum PatternType {
    #[default]
    None,
    /// 100% foreground
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

impl PatternType {
    /// Parse the OOXML pattern name (`"solid"`, `"darkDown"`, `"lightGrid"`, ...)
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "none" => PatternType::None,
            "solid" => PatternType::Solid,
            "mediumGray" => PatternType::MediumGray,
            "darkGray" => PatternType::DarkGray,
            "lightGray" => PatternType::LightGray,
            "darkHorizontal" => PatternType::DarkHorizontal,
            "darkVertical" => PatternType::DarkVertical,
            "darkDown" => PatternType::DarkDown,
            "darkUp" => PatternType::DarkUp,
            "darkGrid" => PatternType::DarkGrid,
            "darkTrellis" => PatternType::DarkTrellis,
            "lightHorizontal" => PatternType::LightHorizontal,
            "lightVertical" => PatternType::LightVertical,
            "lightDown" => PatternType::LightDown,
            "lightUp" => PatternType::LightUp,
            "lightGrid" => PatternType::LightGrid,
            "lightTrellis" => PatternType::LightTrellis,
            "gray125" => PatternType::Gray125,
            "gray0625" => PatternType::Gray0625,
            _ => return None,
        })
    }
}

/// Gradient types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum GradientType {
    #[default]
    Linear,
    /// Radial/path gradient
    Path,
}

impl GradientType {
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(GradientType::Linear),
            "path" => Some(GradientType::Path),
            _ => None,
        }
    }
}

/// Gradient stop (position and color)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Position (0.0 to 1.0)
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
    pub position: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_constructor_collapses_solid() {
        assert_eq!(
            FillStyle::pattern(PatternType::Solid, Color::YELLOW, Color::WHITE),
            FillStyle::solid(Color::YELLOW)
        );
        assert!(FillStyle::pattern(PatternType::None, Color::RED, Color::RED).is_none());
        assert!(matches!(
            FillStyle::pattern(PatternType::DarkDown, Color::RED, Color::WHITE),
            FillStyle::Pattern { .. }
        ));
    }

    #[test]
    fn test_gradient_from_colors() {
        let fill =
            FillStyle::gradient_from_colors(GradientType::Linear, 45.0, &[Color::WHITE, Color::BLUE]);
        match fill {
            FillStyle::Gradient { angle, stops, .. } => {
                assert_eq!(angle, 45.0);
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[0], GradientStop::new(0.0, Color::WHITE));
                assert_eq!(stops[1], GradientStop::new(1.0, Color::BLUE));
            }
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(PatternType::from_name("darkDown"), Some(PatternType::DarkDown));
        assert_eq!(PatternType::from_name("lightGrid"), Some(PatternType::LightGrid));
        assert_eq!(PatternType::from_name("checkered"), None);
        assert_eq!(GradientType::from_name("path"), Some(GradientType::Path));
    }
}
