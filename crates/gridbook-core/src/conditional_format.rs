//! Conditional formatting
//!
//! Rules are bound to a range and kept in an ordered per-sheet list. They are
//! evaluated when a cell is read and never write anything back into cells.
//!
//! ## Example
//!
//! ```rust
//! use gridbook_core::{CellRange, CfOperator, ConditionalFormatRule, Workbook};
//! use gridbook_core::style::{Color, FillStyle};
//!
//! let mut workbook = Workbook::new();
//! workbook.create_sheet("Report", false).unwrap();
//!
//! let rule = ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
//!     .with_fill(FillStyle::solid(Color::GREEN));
//! workbook.add_conditional_format("Report", "S3:S69", rule).unwrap();
//!
//! workbook.write_cell("Report", "S3", "YES").unwrap();
//! let visual = workbook.evaluate_conditional("Report", "S3").unwrap().unwrap();
//! assert_eq!(visual.fill, Some(FillStyle::solid(Color::GREEN)));
//! ```

use std::cmp::Ordering;

use crate::cell::{CellAddress, CellRange, CellValue, GridStore};
use crate::error::{Error, Result};
use crate::style::{Color, FillStyle, FontStyle, Style};

/// How the winner is picked when several rules match the same cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RulePriority {
    /// The earliest-added matching rule wins
    #[default]
    FirstAdded,
    /// The most recently added matching rule wins
    LastAdded,
    /// Lowest `priority` number wins; ties go to the earlier rule
    Ranked,
}

/// Operators for cell-value rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum CfOperator {
    Between,
    NotBetween,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CfOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CfOperator::Between => "between",
            CfOperator::NotBetween => "notBetween",
            CfOperator::Equal => "equal",
            CfOperator::NotEqual => "notEqual",
            CfOperator::GreaterThan => "greaterThan",
            CfOperator::LessThan => "lessThan",
            CfOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            CfOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "between" => Some(CfOperator::Between),
            "notBetween" => Some(CfOperator::NotBetween),
            "equal" => Some(CfOperator::Equal),
            "notEqual" => Some(CfOperator::NotEqual),
            "greaterThan" => Some(CfOperator::GreaterThan),
            "lessThan" => Some(CfOperator::LessThan),
            "greaterThanOrEqual" => Some(CfOperator::GreaterThanOrEqual),
            "lessThanOrEqual" => Some(CfOperator::LessThanOrEqual),
            _ => None,
        }
    }

    /// Whether the operator takes a second operand
    pub fn is_range(&self) -> bool {
        matches!(self, CfOperator::Between | CfOperator::NotBetween)
    }
}

/// Literal comparison value of a cell-value rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum CfOperand {
    Number(
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
        f64,
    ),
    Text(String),
    Boolean(bool),
}

impl CfOperand {
    /// Parse a literal as written in a rule
    ///
    /// `"YES"` (double-quoted, `""` for an embedded quote) is the text `YES`,
    /// compared verbatim. Otherwise the literal is a number if it parses as one,
    /// `TRUE`/`FALSE` is a boolean, and anything else is text.
    pub fn parse(literal: &str) -> Self {
        let trimmed = literal.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            let inner = &trimmed[1..trimmed.len() - 1];
            return CfOperand::Text(inner.replace("\"\"", "\""));
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CfOperand::Number(n);
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return CfOperand::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CfOperand::Boolean(false);
        }
        CfOperand::Text(trimmed.to_string())
    }

    /// Order a cell value against this operand; `None` when the types differ
    fn compare(&self, value: &CellValue) -> Option<Ordering> {
        match (value, self) {
            (CellValue::Number(v), CfOperand::Number(o)) => v.partial_cmp(o),
            (CellValue::String(v), CfOperand::Text(o)) => Some(v.as_str().cmp(o.as_str())),
            (CellValue::Boolean(v), CfOperand::Boolean(o)) => Some(v.cmp(o)),
            _ => None,
        }
    }

    fn compare_operand(&self, other: &CfOperand) -> Option<Ordering> {
        match (self, other) {
            (CfOperand::Number(a), CfOperand::Number(b)) => a.partial_cmp(b),
            (CfOperand::Text(a), CfOperand::Text(b)) => Some(a.cmp(b)),
            (CfOperand::Boolean(a), CfOperand::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<f64> for CfOperand {
    fn from(n: f64) -> Self {
        CfOperand::Number(n)
    }
}

impl From<&str> for CfOperand {
    fn from(s: &str) -> Self {
        CfOperand::parse(s)
    }
}

/// How a threshold of a color scale is located in the range's values
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum CfValue {
    /// Smallest value in the range
    Min,
    /// Largest value in the range
    Max,
    /// A fixed number
    Num(
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
        f64,
    ),
    /// Percent of the min..max span (0-100)
    Percent(
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
        f64,
    ),
    /// Percentile of the values (0-100), linear interpolation between ranks
    Percentile(
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float"))]
        f64,
    ),
}

impl CfValue {
    fn resolve(&self, sorted: &[f64]) -> Option<f64> {
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        Some(match *self {
            CfValue::Min => min,
            CfValue::Max => max,
            CfValue::Num(n) => n,
            CfValue::Percent(p) => min + (max - min) * (p / 100.0),
            CfValue::Percentile(p) => percentile(sorted, p),
        })
    }
}

/// One anchor of a color scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    pub threshold: CfValue,
    pub color: Color,
}

impl ColorStop {
    pub fn new(threshold: CfValue, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Icon set styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum IconSetStyle {
    #[default]
    Arrows3,
    Arrows3Gray,
    Flags3,
    TrafficLights3,
    TrafficLights3Black,
    Signs3,
    Symbols3,
    Symbols3Circled,
    Stars3,
    Triangles3,
    Arrows4,
    Arrows4Gray,
    RedToBlack4,
    Rating4,
    TrafficLights4,
    Arrows5,
    Arrows5Gray,
    Rating5,
    Quarters5,
    Boxes5,
}

impl IconSetStyle {
    /// Spreadsheet name of the set (`"3Arrows"`, `"4Rating"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            IconSetStyle::Arrows3 => "3Arrows",
            IconSetStyle::Arrows3Gray => "3ArrowsGray",
            IconSetStyle::Flags3 => "3Flags",
            IconSetStyle::TrafficLights3 => "3TrafficLights1",
            IconSetStyle::TrafficLights3Black => "3TrafficLights2",
            IconSetStyle::Signs3 => "3Signs",
            IconSetStyle::Symbols3 => "3Symbols",
            IconSetStyle::Symbols3Circled => "3Symbols2",
            IconSetStyle::Stars3 => "3Stars",
            IconSetStyle::Triangles3 => "3Triangles",
            IconSetStyle::Arrows4 => "4Arrows",
            IconSetStyle::Arrows4Gray => "4ArrowsGray",
            IconSetStyle::RedToBlack4 => "4RedToBlack",
            IconSetStyle::Rating4 => "4Rating",
            IconSetStyle::TrafficLights4 => "4TrafficLights",
            IconSetStyle::Arrows5 => "5Arrows",
            IconSetStyle::Arrows5Gray => "5ArrowsGray",
            IconSetStyle::Rating5 => "5Rating",
            IconSetStyle::Quarters5 => "5Quarters",
            IconSetStyle::Boxes5 => "5Boxes",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "3Arrows" => IconSetStyle::Arrows3,
            "3ArrowsGray" => IconSetStyle::Arrows3Gray,
            "3Flags" => IconSetStyle::Flags3,
            "3TrafficLights1" => IconSetStyle::TrafficLights3,
            "3TrafficLights2" => IconSetStyle::TrafficLights3Black,
            "3Signs" => IconSetStyle::Signs3,
            "3Symbols" => IconSetStyle::Symbols3,
            "3Symbols2" => IconSetStyle::Symbols3Circled,
            "3Stars" => IconSetStyle::Stars3,
            "3Triangles" => IconSetStyle::Triangles3,
            "4Arrows" => IconSetStyle::Arrows4,
            "4ArrowsGray" => IconSetStyle::Arrows4Gray,
            "4RedToBlack" => IconSetStyle::RedToBlack4,
            "4Rating" => IconSetStyle::Rating4,
            "4TrafficLights" => IconSetStyle::TrafficLights4,
            "5Arrows" => IconSetStyle::Arrows5,
            "5ArrowsGray" => IconSetStyle::Arrows5Gray,
            "5Rating" => IconSetStyle::Rating5,
            "5Quarters" => IconSetStyle::Quarters5,
            "5Boxes" => IconSetStyle::Boxes5,
            _ => return None,
        })
    }

    /// Number of icons in this set
    pub fn icon_count(&self) -> usize {
        match self {
            IconSetStyle::Arrows4
            | IconSetStyle::Arrows4Gray
            | IconSetStyle::RedToBlack4
            | IconSetStyle::Rating4
            | IconSetStyle::TrafficLights4 => 4,

            IconSetStyle::Arrows5
            | IconSetStyle::Arrows5Gray
            | IconSetStyle::Rating5
            | IconSetStyle::Quarters5
            | IconSetStyle::Boxes5 => 5,

            _ => 3,
        }
    }

    /// Default lower bounds of each bucket, in percent of the range span
    pub fn default_thresholds(&self) -> Vec<f64> {
        match self.icon_count() {
            4 => vec![0.0, 25.0, 50.0, 75.0],
            5 => vec![0.0, 20.0, 40.0, 60.0, 80.0],
            _ => vec![0.0, 33.0, 67.0],
        }
    }
}

/// Kind-specific parameters of a rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "camelCase")
)]
pub enum CfRuleKind {
    /// Compare the cell value against one or two literals
    CellIs {
        operator: CfOperator,
        operand1: CfOperand,
        operand2: Option<CfOperand>,
    },
    /// Interpolate a fill color between two or three anchors
    ColorScale { stops: Vec<ColorStop> },
    /// Bucket the value into one of the set's icons
    IconSet {
        style: IconSetStyle,
        /// Lower bound of each bucket, percent of the range span
        #[cfg_attr(feature = "serde", serde(with = "crate::serde_float::seq"))]
        thresholds: Vec<f64>,
        reverse: bool,
    },
    /// Scale a bar between the range's min and max
    DataBar { color: Color },
}

impl CfRuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            CfRuleKind::CellIs { .. } => "cellIs",
            CfRuleKind::ColorScale { .. } => "colorScale",
            CfRuleKind::IconSet { .. } => "iconSet",
            CfRuleKind::DataBar { .. } => "dataBar",
        }
    }
}

/// Font/fill a matching cell-value rule lays over the cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CfFormat {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
}

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalFormatRule {
    pub kind: CfRuleKind,
    /// Rank used by [`RulePriority::Ranked`] (lower wins); 0 means "assign on insert"
    pub priority: u32,
    /// Format applied by cell-value rules
    pub format: CfFormat,
}

/// Options for building a rule from a kind name
///
/// Mirrors the loose keyword arguments a scripting front end passes around;
/// [`ConditionalFormatRule::from_options`] picks what the kind needs.
#[derive(Debug, Clone, Default)]
pub struct CfOptions {
    pub operator: Option<String>,
    pub values: Vec<String>,
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
    pub color_scale_colors: Vec<Color>,
    pub icon_set: Option<String>,
    pub data_bar_color: Option<Color>,
}

impl ConditionalFormatRule {
    pub fn new(kind: CfRuleKind) -> Self {
        Self {
            kind,
            priority: 0,
            format: CfFormat::default(),
        }
    }

    /// Compare cell values against a literal, e.g. `cell_is(GreaterThan, "100")`
    /// or `cell_is(Equal, "\"YES\"")`
    pub fn cell_is(operator: CfOperator, operand: impl Into<CfOperand>) -> Self {
        Self::new(CfRuleKind::CellIs {
            operator,
            operand1: operand.into(),
            operand2: None,
        })
    }

    /// Match values inside `[low, high]` (bounds in either order)
    pub fn cell_is_between(low: impl Into<CfOperand>, high: impl Into<CfOperand>) -> Self {
        Self::new(CfRuleKind::CellIs {
            operator: CfOperator::Between,
            operand1: low.into(),
            operand2: Some(high.into()),
        })
    }

    /// Match values outside `[low, high]`
    pub fn cell_is_not_between(low: impl Into<CfOperand>, high: impl Into<CfOperand>) -> Self {
        Self::new(CfRuleKind::CellIs {
            operator: CfOperator::NotBetween,
            operand1: low.into(),
            operand2: Some(high.into()),
        })
    }

    /// Two-color scale (min to max)
    pub fn color_scale_2(min_color: Color, max_color: Color) -> Self {
        Self::new(CfRuleKind::ColorScale {
            stops: vec![
                ColorStop::new(CfValue::Min, min_color),
                ColorStop::new(CfValue::Max, max_color),
            ],
        })
    }

    /// Three-color scale (min, 50th percentile, max)
    pub fn color_scale_3(min_color: Color, mid_color: Color, max_color: Color) -> Self {
        Self::new(CfRuleKind::ColorScale {
            stops: vec![
                ColorStop::new(CfValue::Min, min_color),
                ColorStop::new(CfValue::Percentile(50.0), mid_color),
                ColorStop::new(CfValue::Max, max_color),
            ],
        })
    }

    /// Icon set with the style's default thresholds
    pub fn icon_set(style: IconSetStyle) -> Self {
        Self::new(CfRuleKind::IconSet {
            style,
            thresholds: style.default_thresholds(),
            reverse: false,
        })
    }

    /// Data bar scaled between the range's min and max
    pub fn data_bar(color: Color) -> Self {
        Self::new(CfRuleKind::DataBar { color })
    }

    /// Build a rule from a kind name (`cellIs`, `colorScale`, `iconSet`, `dataBar`)
    ///
    /// Unknown kinds fail with [`Error::UnsupportedRuleKind`]; a kind whose
    /// required option is missing or malformed fails with
    /// [`Error::InvalidRuleParameters`].
    pub fn from_options(kind: &str, options: CfOptions) -> Result<Self> {
        let invalid = |msg: &str| Error::InvalidRuleParameters(format!("{}: {}", kind, msg));

        let rule = match kind {
            "cellIs" => {
                let op_name = options
                    .operator
                    .as_deref()
                    .ok_or_else(|| invalid("operator is required"))?;
                let operator = CfOperator::from_name(op_name)
                    .ok_or_else(|| invalid(&format!("unknown operator '{}'", op_name)))?;
                let operand1 = options
                    .values
                    .first()
                    .map(|v| CfOperand::parse(v))
                    .ok_or_else(|| invalid("a comparison value is required"))?;
                let operand2 = if operator.is_range() {
                    Some(
                        options
                            .values
                            .get(1)
                            .map(|v| CfOperand::parse(v))
                            .ok_or_else(|| invalid("a second comparison value is required"))?,
                    )
                } else {
                    None
                };
                let mut rule = Self::new(CfRuleKind::CellIs {
                    operator,
                    operand1,
                    operand2,
                });
                rule.format = CfFormat {
                    font: options.font,
                    fill: options.fill,
                };
                rule
            }
            "colorScale" => match options.color_scale_colors.as_slice() {
                [min, max] => Self::color_scale_2(*min, *max),
                [min, mid, max] => Self::color_scale_3(*min, *mid, *max),
                _ => return Err(invalid("two or three colors are required")),
            },
            "iconSet" => {
                let style = match options.icon_set.as_deref() {
                    None => IconSetStyle::default(),
                    Some(name) => IconSetStyle::from_name(name)
                        .ok_or_else(|| invalid(&format!("unknown icon set '{}'", name)))?,
                };
                Self::icon_set(style)
            }
            "dataBar" => {
                let color = options
                    .data_bar_color
                    .ok_or_else(|| invalid("a bar color is required"))?;
                Self::data_bar(color)
            }
            other => return Err(Error::UnsupportedRuleKind(other.to_string())),
        };
        Ok(rule)
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.format.font = Some(font);
        self
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.format.fill = Some(fill);
        self
    }

    /// Evaluate this rule for one cell of `range`
    ///
    /// Returns `None` when the rule does not match. Empty cells never match.
    pub fn evaluate<S: CellValueSource + ?Sized>(
        &self,
        range: &CellRange,
        value: &CellValue,
        source: &S,
    ) -> Option<VisualOverride> {
        if value.is_empty() {
            return None;
        }

        match &self.kind {
            CfRuleKind::CellIs {
                operator,
                operand1,
                operand2,
            } => {
                if cell_is_matches(*operator, value, operand1, operand2.as_ref()) {
                    Some(VisualOverride {
                        font: self.format.font.clone(),
                        fill: self.format.fill.clone(),
                        ..VisualOverride::default()
                    })
                } else {
                    None
                }
            }
            CfRuleKind::ColorScale { stops } => {
                let v = value.as_number()?;
                let sorted = source.sorted_numbers_in(range);
                let color = color_scale_color(stops, &sorted, v)?;
                Some(VisualOverride {
                    fill: Some(FillStyle::solid(color)),
                    ..VisualOverride::default()
                })
            }
            CfRuleKind::IconSet {
                style,
                thresholds,
                reverse,
            } => {
                let v = value.as_number()?;
                let sorted = source.sorted_numbers_in(range);
                let (min, max) = (*sorted.first()?, *sorted.last()?);
                let span = max - min;
                let mut index = thresholds
                    .iter()
                    .rposition(|pct| v >= min + span * (pct / 100.0))
                    .unwrap_or(0);
                if *reverse {
                    index = thresholds.len().saturating_sub(1) - index;
                }
                Some(VisualOverride {
                    icon: Some(IconClass {
                        style: *style,
                        index,
                    }),
                    ..VisualOverride::default()
                })
            }
            CfRuleKind::DataBar { color } => {
                let v = value.as_number()?;
                let sorted = source.sorted_numbers_in(range);
                let (min, max) = (*sorted.first()?, *sorted.last()?);
                let ratio = if max - min == 0.0 {
                    0.0
                } else {
                    ((v - min) / (max - min)).clamp(0.0, 1.0)
                };
                Some(VisualOverride {
                    data_bar: Some(DataBarFill {
                        color: *color,
                        ratio,
                    }),
                    ..VisualOverride::default()
                })
            }
        }
    }
}

fn cell_is_matches(
    operator: CfOperator,
    value: &CellValue,
    operand1: &CfOperand,
    operand2: Option<&CfOperand>,
) -> bool {
    let first = operand1.compare(value);
    match operator {
        CfOperator::Equal => first == Some(Ordering::Equal),
        CfOperator::NotEqual => first != Some(Ordering::Equal),
        CfOperator::GreaterThan => first == Some(Ordering::Greater),
        CfOperator::LessThan => first == Some(Ordering::Less),
        CfOperator::GreaterThanOrEqual => {
            matches!(first, Some(Ordering::Greater | Ordering::Equal))
        }
        CfOperator::LessThanOrEqual => matches!(first, Some(Ordering::Less | Ordering::Equal)),
        CfOperator::Between | CfOperator::NotBetween => {
            let Some(operand2) = operand2 else {
                return false;
            };
            let (low, high) = match operand1.compare_operand(operand2) {
                Some(Ordering::Greater) => (operand2, operand1),
                Some(_) => (operand1, operand2),
                None => return false,
            };
            match (low.compare(value), high.compare(value)) {
                (Some(lo), Some(hi)) => {
                    let inside = lo != Ordering::Less && hi != Ordering::Greater;
                    inside == (operator == CfOperator::Between)
                }
                _ => false,
            }
        }
    }
}

fn color_scale_color(stops: &[ColorStop], sorted: &[f64], v: f64) -> Option<Color> {
    let anchors: Vec<(f64, Color)> = stops
        .iter()
        .map(|s| s.threshold.resolve(sorted).map(|t| (t, s.color)))
        .collect::<Option<_>>()?;
    let (first, last) = (anchors.first()?, anchors.last()?);

    if v <= first.0 {
        return Some(first.1);
    }
    if v >= last.0 {
        return Some(last.1);
    }
    for pair in anchors.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if v >= lo.0 && v <= hi.0 {
            let span = hi.0 - lo.0;
            let t = if span == 0.0 { 0.0 } else { (v - lo.0) / span };
            return Some(Color::lerp(lo.1, hi.1, t));
        }
    }
    Some(last.1)
}

/// Inclusive percentile with linear interpolation between closest ranks
fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

/// Which icon of a set a cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconClass {
    pub style: IconSetStyle,
    /// Bucket index, 0 = lowest values
    pub index: usize,
}

/// How far a data bar extends in a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBarFill {
    pub color: Color,
    /// 0.0 at the range minimum, 1.0 at the maximum
    pub ratio: f64,
}

/// Visual result of the winning conditional rule for one cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualOverride {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
    pub icon: Option<IconClass>,
    pub data_bar: Option<DataBarFill>,
}

impl VisualOverride {
    /// Lay the font/fill part over a resolved style
    pub fn apply_to(&self, style: &mut Style) {
        if let Some(font) = &self.font {
            style.font = font.clone();
        }
        if let Some(fill) = &self.fill {
            style.fill = fill.clone();
        }
    }
}

/// Read access to the values rules look at
pub trait CellValueSource {
    fn value_at(&self, addr: CellAddress) -> Option<&CellValue>;

    /// Numeric values inside `range`, ascending
    fn sorted_numbers_in(&self, range: &CellRange) -> Vec<f64> {
        let mut values: Vec<f64> = range
            .cells()
            .filter_map(|addr| self.value_at(addr).and_then(CellValue::as_number))
            .collect();
        values.sort_by(f64::total_cmp);
        values
    }
}

impl CellValueSource for GridStore {
    fn value_at(&self, addr: CellAddress) -> Option<&CellValue> {
        self.get(addr).map(|c| &c.value)
    }

    fn sorted_numbers_in(&self, range: &CellRange) -> Vec<f64> {
        // Walk whichever is smaller: the stored cells or the range
        let mut values: Vec<f64> = if (self.cell_count() as u64) < range.cell_count() {
            self.iter()
                .filter(|(addr, _)| range.contains(addr))
                .filter_map(|(_, cell)| cell.value.as_number())
                .collect()
        } else {
            range
                .cells()
                .filter_map(|addr| self.value_at(addr).and_then(CellValue::as_number))
                .collect()
        };
        values.sort_by(f64::total_cmp);
        values
    }
}

/// A rule bound to the range it covers
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormat {
    pub range: CellRange,
    pub rule: ConditionalFormatRule,
}

/// A matching rule, with its position in the sheet's list
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub index: usize,
    pub priority: u32,
    pub visual: VisualOverride,
}

/// Ordered list of conditional formats for one sheet
#[derive(Debug, Clone, Default)]
pub struct ConditionalFormats {
    entries: Vec<ConditionalFormat>,
}

impl ConditionalFormats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; ranges may overlap earlier rules
    ///
    /// A rule with priority 0 gets the next rank in insertion order. Fails with
    /// `InvalidRuleParameters` when no rank is left above the highest one.
    pub fn add_rule(&mut self, range: CellRange, mut rule: ConditionalFormatRule) -> Result<()> {
        if rule.priority == 0 {
            let highest = self.entries.iter().map(|e| e.rule.priority).max().unwrap_or(0);
            rule.priority = highest.checked_add(1).ok_or_else(|| {
                Error::InvalidRuleParameters(format!(
                    "no priority left after {} for rule on {}",
                    highest, range
                ))
            })?;
        }
        self.entries.push(ConditionalFormat { range, rule });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionalFormat> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every rule covering `addr` that matches, ordered winner first
    pub fn matches<S: CellValueSource + ?Sized>(
        &self,
        addr: CellAddress,
        source: &S,
        policy: RulePriority,
    ) -> Vec<RuleMatch> {
        let value = source.value_at(addr).cloned().unwrap_or_default();
        let mut matches: Vec<RuleMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.range.contains(&addr))
            .filter_map(|(index, entry)| {
                entry
                    .rule
                    .evaluate(&entry.range, &value, source)
                    .map(|visual| RuleMatch {
                        index,
                        priority: entry.rule.priority,
                        visual,
                    })
            })
            .collect();

        match policy {
            RulePriority::FirstAdded => {}
            RulePriority::LastAdded => matches.reverse(),
            RulePriority::Ranked => matches.sort_by_key(|m| (m.priority, m.index)),
        }
        matches
    }

    /// The visual override of the winning rule, if any rule matches
    pub fn evaluate<S: CellValueSource + ?Sized>(
        &self,
        addr: CellAddress,
        source: &S,
        policy: RulePriority,
    ) -> Option<VisualOverride> {
        self.matches(addr, source, policy)
            .into_iter()
            .next()
            .map(|m| m.visual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    fn column(values: &[f64]) -> GridStore {
        let mut store = GridStore::new();
        for (i, v) in values.iter().enumerate() {
            let a = CellAddress::new(i as u32 + 1, 1).unwrap();
            store.set_value(a, CellValue::Number(*v));
        }
        store
    }

    #[test]
    fn test_operand_parsing() {
        assert_eq!(CfOperand::parse("\"YES\""), CfOperand::Text("YES".into()));
        assert_eq!(CfOperand::parse("\"say \"\"hi\"\"\""), CfOperand::Text("say \"hi\"".into()));
        assert_eq!(CfOperand::parse("100"), CfOperand::Number(100.0));
        assert_eq!(CfOperand::parse("\"100\""), CfOperand::Text("100".into()));
        assert_eq!(CfOperand::parse("TRUE"), CfOperand::Boolean(true));
        assert_eq!(CfOperand::parse("NO"), CfOperand::Text("NO".into()));
    }

    #[test]
    fn test_cell_is_text_is_case_sensitive() {
        let yes = CfOperand::parse("\"YES\"");
        assert!(cell_is_matches(CfOperator::Equal, &"YES".into(), &yes, None));
        assert!(!cell_is_matches(CfOperator::Equal, &"yes".into(), &yes, None));
        assert!(!cell_is_matches(CfOperator::Equal, &"YES ".into(), &yes, None));
    }

    #[test]
    fn test_cell_is_type_mismatch() {
        let hundred = CfOperand::Number(100.0);
        let text: CellValue = "500".into();
        assert!(!cell_is_matches(CfOperator::GreaterThan, &text, &hundred, None));
        assert!(!cell_is_matches(CfOperator::Equal, &text, &hundred, None));
        assert!(cell_is_matches(CfOperator::NotEqual, &text, &hundred, None));
    }

    #[test]
    fn test_cell_is_numeric_operators() {
        let v = CellValue::Number(10.0);
        let ten = CfOperand::Number(10.0);
        assert!(cell_is_matches(CfOperator::GreaterThanOrEqual, &v, &ten, None));
        assert!(cell_is_matches(CfOperator::LessThanOrEqual, &v, &ten, None));
        assert!(!cell_is_matches(CfOperator::GreaterThan, &v, &ten, None));
        assert!(cell_is_matches(
            CfOperator::LessThan,
            &v,
            &CfOperand::Number(10.5),
            None
        ));
    }

    #[test]
    fn test_between_accepts_bounds_in_any_order() {
        let (lo, hi) = (CfOperand::Number(1.0), CfOperand::Number(5.0));
        let three = CellValue::Number(3.0);
        let nine = CellValue::Number(9.0);

        assert!(cell_is_matches(CfOperator::Between, &three, &lo, Some(&hi)));
        assert!(cell_is_matches(CfOperator::Between, &three, &hi, Some(&lo)));
        assert!(cell_is_matches(CfOperator::Between, &CellValue::Number(5.0), &lo, Some(&hi)));
        assert!(!cell_is_matches(CfOperator::Between, &nine, &lo, Some(&hi)));
        assert!(cell_is_matches(CfOperator::NotBetween, &nine, &lo, Some(&hi)));
        assert!(!cell_is_matches(CfOperator::NotBetween, &three, &lo, Some(&hi)));
        assert!(!cell_is_matches(CfOperator::Between, &three, &lo, None));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let rule = ConditionalFormatRule::cell_is(CfOperator::NotEqual, "\"YES\"")
            .with_fill(FillStyle::solid(Color::RED));
        let store = GridStore::new();
        assert_eq!(rule.evaluate(&range("A1:A3"), &CellValue::Empty, &store), None);
    }

    #[test]
    fn test_first_added_match_wins() {
        let mut store = GridStore::new();
        store.set_value(addr("S3"), "YES".into());

        let mut formats = ConditionalFormats::new();
        formats.add_rule(
            range("S3:S69"),
            ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
                .with_fill(FillStyle::solid(Color::GREEN)),
        ).unwrap();
        formats.add_rule(
            range("S3:S69"),
            ConditionalFormatRule::cell_is(CfOperator::Equal, "\"NO\"")
                .with_fill(FillStyle::solid(Color::RED)),
        ).unwrap();
        // Structurally matches "YES" too; added last
        formats.add_rule(
            range("S3:S69"),
            ConditionalFormatRule::cell_is(CfOperator::NotEqual, "\"NO\"")
                .with_fill(FillStyle::solid(Color::BLUE)),
        ).unwrap();

        let visual = formats
            .evaluate(addr("S3"), &store, RulePriority::FirstAdded)
            .unwrap();
        assert_eq!(visual.fill, Some(FillStyle::solid(Color::GREEN)));

        let all = formats.matches(addr("S3"), &store, RulePriority::FirstAdded);
        assert_eq!(all.iter().map(|m| m.index).collect::<Vec<_>>(), vec![0, 2]);

        let visual = formats
            .evaluate(addr("S3"), &store, RulePriority::LastAdded)
            .unwrap();
        assert_eq!(visual.fill, Some(FillStyle::solid(Color::BLUE)));
    }

    #[test]
    fn test_ranked_priority() {
        let mut store = GridStore::new();
        store.set_value(addr("A1"), CellValue::Number(50.0));

        let mut formats = ConditionalFormats::new();
        formats.add_rule(
            range("A1:A10"),
            ConditionalFormatRule::cell_is(CfOperator::GreaterThan, "10")
                .with_fill(FillStyle::solid(Color::RED))
                .with_priority(5),
        ).unwrap();
        formats.add_rule(
            range("A1:A10"),
            ConditionalFormatRule::cell_is(CfOperator::GreaterThan, "20")
                .with_fill(FillStyle::solid(Color::BLUE))
                .with_priority(2),
        ).unwrap();

        let visual = formats.evaluate(addr("A1"), &store, RulePriority::Ranked).unwrap();
        assert_eq!(visual.fill, Some(FillStyle::solid(Color::BLUE)));
        let visual = formats
            .evaluate(addr("A1"), &store, RulePriority::FirstAdded)
            .unwrap();
        assert_eq!(visual.fill, Some(FillStyle::solid(Color::RED)));
    }

    #[test]
    fn test_auto_priority_follows_insertion() {
        let mut formats = ConditionalFormats::new();
        formats
            .add_rule(range("A1"), ConditionalFormatRule::data_bar(Color::BLUE))
            .unwrap();
        formats.add_rule(
            range("A1"),
            ConditionalFormatRule::data_bar(Color::RED).with_priority(9),
        ).unwrap();
        formats
            .add_rule(range("A1"), ConditionalFormatRule::data_bar(Color::GREEN))
            .unwrap();

        let ranks: Vec<u32> = formats.iter().map(|e| e.rule.priority).collect();
        assert_eq!(ranks, vec![1, 9, 10]);
    }

    #[test]
    fn test_auto_priority_after_highest_rank_fails() {
        let mut formats = ConditionalFormats::new();
        formats
            .add_rule(
                range("A1"),
                ConditionalFormatRule::data_bar(Color::RED).with_priority(u32::MAX),
            )
            .unwrap();

        let err = formats
            .add_rule(range("A1"), ConditionalFormatRule::data_bar(Color::BLUE))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRuleParameters(_)));
        assert_eq!(formats.len(), 1);

        // An explicit rank still fits
        formats
            .add_rule(
                range("A1"),
                ConditionalFormatRule::data_bar(Color::GREEN).with_priority(3),
            )
            .unwrap();
        assert_eq!(formats.len(), 2);
    }

    #[test]
    fn test_rules_outside_range_are_ignored() {
        let mut store = GridStore::new();
        store.set_value(addr("B1"), CellValue::Number(1.0));

        let mut formats = ConditionalFormats::new();
        formats.add_rule(
            range("A1:A10"),
            ConditionalFormatRule::cell_is(CfOperator::Equal, "1")
                .with_fill(FillStyle::solid(Color::RED)),
        ).unwrap();
        assert_eq!(formats.evaluate(addr("B1"), &store, RulePriority::FirstAdded), None);
    }

    #[test]
    fn test_percentile() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
        assert_eq!(percentile(&[1.0, 2.0, 3.0], 50.0), 2.0);
        assert_eq!(percentile(&[7.0], 50.0), 7.0);
        assert_eq!(percentile(&[0.0, 10.0], 25.0), 2.5);
    }

    #[test]
    fn test_three_color_scale() {
        let store = column(&[0.0, 10.0, 20.0, 30.0, 100.0]);
        let rule = ConditionalFormatRule::color_scale_3(Color::RED, Color::YELLOW, Color::GREEN);
        let r = range("A1:A5");

        let fill_of = |v: f64| {
            rule.evaluate(&r, &CellValue::Number(v), &store)
                .and_then(|o| o.fill)
                .and_then(|f| f.primary_color())
        };

        // anchors: min 0, median 20, max 100
        assert_eq!(fill_of(0.0), Some(Color::RED));
        assert_eq!(fill_of(20.0), Some(Color::YELLOW));
        assert_eq!(fill_of(100.0), Some(Color::GREEN));
        assert_eq!(fill_of(10.0), Some(Color::lerp(Color::RED, Color::YELLOW, 0.5)));
        assert_eq!(fill_of(60.0), Some(Color::lerp(Color::YELLOW, Color::GREEN, 0.5)));
    }

    #[test]
    fn test_two_color_scale_constant_range() {
        let store = column(&[4.0, 4.0]);
        let rule = ConditionalFormatRule::color_scale_2(Color::WHITE, Color::BLUE);
        let visual = rule
            .evaluate(&range("A1:A2"), &CellValue::Number(4.0), &store)
            .unwrap();
        assert_eq!(visual.fill, Some(FillStyle::solid(Color::WHITE)));
    }

    #[test]
    fn test_color_scale_ignores_text() {
        let store = column(&[1.0, 2.0]);
        let rule = ConditionalFormatRule::color_scale_2(Color::WHITE, Color::BLUE);
        assert_eq!(rule.evaluate(&range("A1:A2"), &"x".into(), &store), None);
    }

    #[test]
    fn test_icon_set_buckets() {
        let store = column(&[0.0, 50.0, 100.0]);
        let rule = ConditionalFormatRule::icon_set(IconSetStyle::Arrows3);
        let r = range("A1:A3");

        let icon = |v: f64| rule.evaluate(&r, &CellValue::Number(v), &store).unwrap().icon.unwrap().index;
        assert_eq!(icon(0.0), 0);
        assert_eq!(icon(32.0), 0);
        assert_eq!(icon(33.0), 1);
        assert_eq!(icon(67.0), 2);
        assert_eq!(icon(100.0), 2);

        let reversed = ConditionalFormatRule::new(CfRuleKind::IconSet {
            style: IconSetStyle::Arrows3,
            thresholds: vec![0.0, 33.0, 67.0],
            reverse: true,
        });
        let icon = reversed
            .evaluate(&r, &CellValue::Number(100.0), &store)
            .unwrap()
            .icon
            .unwrap();
        assert_eq!(icon.index, 0);
    }

    #[test]
    fn test_data_bar_ratio() {
        let store = column(&[10.0, 20.0, 30.0]);
        let rule = ConditionalFormatRule::data_bar(Color::BLUE);
        let bar = rule
            .evaluate(&range("A1:A3"), &CellValue::Number(20.0), &store)
            .unwrap()
            .data_bar
            .unwrap();
        assert_eq!(bar.color, Color::BLUE);
        assert!((bar.ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sparse_numbers_on_huge_range() {
        let mut store = GridStore::new();
        store.set_value(addr("C7"), CellValue::Number(3.0));
        store.set_value(addr("Z900"), CellValue::Number(1.0));
        store.set_value(addr("B2"), "text".into());

        let whole = CellRange::from_indices(1, 1, crate::MAX_ROWS, crate::MAX_COLS).unwrap();
        assert_eq!(store.sorted_numbers_in(&whole), vec![1.0, 3.0]);
    }

    #[test]
    fn test_from_options() {
        let rule = ConditionalFormatRule::from_options(
            "cellIs",
            CfOptions {
                operator: Some("equal".into()),
                values: vec!["\"YES\"".into()],
                fill: Some(FillStyle::solid(Color::GREEN)),
                ..CfOptions::default()
            },
        )
        .unwrap();
        assert_eq!(rule.kind.name(), "cellIs");
        assert_eq!(rule.format.fill, Some(FillStyle::solid(Color::GREEN)));

        let scale = ConditionalFormatRule::from_options(
            "colorScale",
            CfOptions {
                color_scale_colors: vec![Color::RED, Color::YELLOW, Color::GREEN],
                ..CfOptions::default()
            },
        )
        .unwrap();
        assert_eq!(
            scale,
            ConditionalFormatRule::color_scale_3(Color::RED, Color::YELLOW, Color::GREEN)
        );

        let icons = ConditionalFormatRule::from_options("iconSet", CfOptions::default()).unwrap();
        assert_eq!(icons, ConditionalFormatRule::icon_set(IconSetStyle::Arrows3));
    }

    #[test]
    fn test_from_options_errors() {
        assert!(matches!(
            ConditionalFormatRule::from_options("top10", CfOptions::default()),
            Err(Error::UnsupportedRuleKind(kind)) if kind == "top10"
        ));
        assert!(matches!(
            ConditionalFormatRule::from_options("cellIs", CfOptions::default()),
            Err(Error::InvalidRuleParameters(_))
        ));
        assert!(matches!(
            ConditionalFormatRule::from_options(
                "cellIs",
                CfOptions {
                    operator: Some("between".into()),
                    values: vec!["1".into()],
                    ..CfOptions::default()
                }
            ),
            Err(Error::InvalidRuleParameters(_))
        ));
        assert!(matches!(
            ConditionalFormatRule::from_options("dataBar", CfOptions::default()),
            Err(Error::InvalidRuleParameters(_))
        ));
        assert!(matches!(
            ConditionalFormatRule::from_options(
                "colorScale",
                CfOptions {
                    color_scale_colors: vec![Color::RED],
                    ..CfOptions::default()
                }
            ),
            Err(Error::InvalidRuleParameters(_))
        ));
    }
}
