//! # gridbook-snapshot
//!
//! Load/save boundary for gridbook workbooks.
//!
//! A snapshot is a JSON document of the logical model: sheets in order, cells
//! with their values, named style references and direct overrides, the named
//! style table, conditional rules, layout (merges, freeze panes, auto-filter,
//! column widths, row heights) and workbook settings. It is not a spreadsheet
//! file format.
//!
//! ```rust
//! use gridbook_core::Workbook;
//!
//! let mut workbook = Workbook::new();
//! workbook.create_sheet("Data", false).unwrap();
//! workbook.write_cell("Data", "B2", 7.5).unwrap();
//!
//! let bytes = gridbook_snapshot::save(&workbook).unwrap();
//! let loaded = gridbook_snapshot::load(&bytes).unwrap();
//! assert_eq!(loaded.read_cell("Data", "B2").unwrap().as_number(), Some(7.5));
//! ```

mod model;
pub mod reader;
pub mod writer;

use gridbook_core::{Result, Workbook};

pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;

/// Value of the `format` tag in every snapshot
pub const FORMAT_TAG: &str = "gridbook";

/// Snapshot version written by this crate and the only one it reads
pub const FORMAT_VERSION: u32 = 1;

/// Load a workbook from snapshot bytes
///
/// Any structural problem fails with `Error::DocumentCorrupt`; no partially
/// loaded workbook is ever returned.
pub fn load(bytes: &[u8]) -> Result<Workbook> {
    SnapshotReader::read(bytes)
}

/// Serialize a workbook to snapshot bytes
pub fn save(workbook: &Workbook) -> Result<Vec<u8>> {
    SnapshotWriter::write(workbook)
}
