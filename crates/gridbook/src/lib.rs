//! # gridbook
//!
//! A spreadsheet document model: cell addressing, layered styles with shared
//! named styles, read-time conditional formatting and true data extent
//! detection, with a JSON snapshot boundary for loading and saving.
//!
//! ## Features
//!
//! - A1 references and 1-based `(row, column)` coordinates, converted both ways
//! - Sparse cell storage per sheet
//! - Named styles shared by reference, layered under per-cell overrides
//! - `cellIs`, color scale, icon set and data bar rules evaluated on read
//! - Bounded scan for the last populated cell and stray data past it
//!
//! ## Example
//!
//! ```rust
//! use gridbook::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! workbook.create_sheet("Report", false).unwrap();
//!
//! workbook.write_row("Report", 1, ["Task", "Done"]).unwrap();
//! workbook.write_cell("Report", "B2", "YES").unwrap();
//!
//! let rule = ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
//!     .with_fill(FillStyle::solid(Color::GREEN));
//! workbook.add_conditional_format("Report", "B2:B50", rule).unwrap();
//!
//! let style = workbook.display_style("Report", "B2").unwrap();
//! assert_eq!(style.fill, FillStyle::solid(Color::GREEN));
//!
//! // Save to file
//! // workbook.save("report.json").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use gridbook_core::{
    // Addressing
    column_letter_to_index,
    index_to_column_letter,
    Alignment,
    BorderEdge,
    BorderLineStyle,
    BorderStyle,
    Cell,
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    CellValueSource,
    CfOperand,
    // Conditional formatting types
    CfOperator,
    CfOptions,
    CfRuleKind,
    CfValue,
    Color,
    ColorStop,
    ConditionalFormatRule,
    ConditionalFormats,
    // Error types
    Error,
    // Extent
    ExtentReport,
    ExtentScanner,
    FillStyle,
    FontStyle,
    FreezePanes,
    GridStore,
    HorizontalAlignment,
    IconSetStyle,
    NamedStyle,
    NumberFormat,
    Protection,
    RedefinitionMode,
    Result,
    RulePriority,
    // Style types
    Style,
    StyleId,
    StylePatch,
    StyleRegistry,
    VerticalAlignment,
    VisualOverride,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,

    DEFAULT_EXTENT_WINDOW,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

pub use gridbook_core::{conditional_format, style};

// Re-export I/O types
pub use gridbook_snapshot::{SnapshotReader, SnapshotWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a snapshot file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a snapshot file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        SnapshotReader::read_file(path)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        SnapshotWriter::write_file(self, path)
    }
}

/// Load a workbook from snapshot bytes
pub fn load(bytes: &[u8]) -> Result<Workbook> {
    gridbook_snapshot::load(bytes)
}

/// Serialize a workbook to snapshot bytes
pub fn save(workbook: &Workbook) -> Result<Vec<u8>> {
    gridbook_snapshot::save(workbook)
}
