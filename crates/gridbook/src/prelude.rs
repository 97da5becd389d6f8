//! Prelude module - common imports for gridbook users
//!
//! ```rust
//! use gridbook::prelude::*;
//! ```

pub use crate::{
    // Style types
    Alignment,
    BorderLineStyle,
    BorderStyle,
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    // Conditional formatting types
    CfOperator,
    Color,
    ConditionalFormatRule,
    // Error types
    Error,
    ExtentReport,
    FillStyle,
    FontStyle,
    HorizontalAlignment,
    IconSetStyle,
    NumberFormat,
    Result,
    RulePriority,

    Style,
    StylePatch,
    VerticalAlignment,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookSettings,
    Worksheet,
};
