//! # gridbook-core
//!
//! Core document model for the gridbook spreadsheet library.
//!
//! This crate provides the fundamental types used throughout gridbook:
//! - [`CellAddress`] and [`CellRange`] - 1-based cell addressing and ranges
//! - [`CellValue`] and [`GridStore`] - Cell values and the sparse per-sheet grid
//! - [`Style`], [`StylePatch`] and [`StyleRegistry`] - Layered cell formatting with named styles
//! - [`ConditionalFormatRule`] - Read-time conditional formatting
//! - [`ExtentScanner`] - True data boundary detection
//! - [`Workbook`], [`Worksheet`] - The main document structures
//!
//! ## Example
//!
//! ```rust
//! use gridbook_core::{CellValue, StylePatch, Workbook};
//! use gridbook_core::style::FontStyle;
//!
//! let mut workbook = Workbook::new();
//! workbook.create_sheet("Sales", false).unwrap();
//!
//! // Using A1 references
//! workbook.write_cell("Sales", "A1", "Region").unwrap();
//! workbook.write_cell("Sales", "B1", 42.0).unwrap();
//!
//! // Or using 1-based row/column indices
//! workbook.write_cell_at("Sales", 2, 1, CellValue::string("North")).unwrap();
//!
//! workbook
//!     .define_style("header", StylePatch::new().with_font(FontStyle::new().with_bold(true)))
//!     .unwrap();
//! workbook.apply_named_style("Sales", "A1", "header").unwrap();
//! assert!(workbook.effective_style("Sales", "A1").unwrap().font.bold);
//!
//! let extent = workbook.scan_extent("Sales").unwrap();
//! assert_eq!((extent.last_row, extent.last_col), (2, 1));
//! ```

pub mod cell;
pub mod conditional_format;
pub mod error;
pub mod extent;
#[cfg(feature = "serde")]
mod serde_float;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    column_letter_to_index, index_to_column_letter, Cell, CellAddress, CellRange, CellValue,
    GridStore,
};
pub use conditional_format::{
    CellValueSource, CfOperand, CfOperator, CfOptions, CfRuleKind, CfValue, ColorStop,
    ConditionalFormatRule, ConditionalFormats, IconSetStyle, RulePriority, VisualOverride,
};
pub use error::{Error, Result};
pub use extent::{ExtentReport, ExtentScanner, DEFAULT_EXTENT_WINDOW};
pub use workbook::{validate_sheet_name, Workbook, WorkbookSettings};
pub use worksheet::{FreezePanes, Worksheet};

// Re-export the common style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NamedStyle, NumberFormat, Protection, RedefinitionMode, Style, StyleId,
    StylePatch, StyleRegistry, VerticalAlignment,
};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
