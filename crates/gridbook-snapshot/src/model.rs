//! Serialized document layout
//!
//! Addresses and ranges are stored as A1 text and named styles by name, so a
//! snapshot stays readable and independent of in-memory ids.

use serde::{Deserialize, Serialize};

use gridbook_core::{CellValue, ConditionalFormatRule, Style, StylePatch, WorkbookSettings};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DocumentModel {
    pub format: String,
    pub version: u32,
    #[serde(default)]
    pub settings: WorkbookSettings,
    #[serde(default)]
    pub styles: Vec<NamedStyleModel>,
    #[serde(default)]
    pub sheets: Vec<SheetModel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NamedStyleModel {
    pub name: String,
    #[serde(default)]
    pub patch: StylePatch,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SheetModel {
    pub name: String,
    #[serde(default)]
    pub default_style: Style,
    /// Largest row and column ever written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<WatermarkModel>,
    #[serde(default)]
    pub cells: Vec<CellModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<ColumnWidthModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_heights: Vec<RowHeightModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze_panes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_formats: Vec<ConditionalFormatModel>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct WatermarkModel {
    pub row: u32,
    pub col: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CellModel {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "StylePatch::is_empty")]
    pub overrides: StylePatch,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ColumnWidthModel {
    pub column: String,
    pub width: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RowHeightModel {
    pub row: u32,
    pub height: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ConditionalFormatModel {
    pub range: String,
    pub rule: ConditionalFormatRule,
}
