//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1") and the column letter codec
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`Cell`] and [`GridStore`] - Cell records and their sparse per-sheet storage

mod address;
mod storage;
mod value;

pub use address::{
    column_letter_to_index, index_to_column_letter, CellAddress, CellRange, CellRangeIterator,
};
pub use storage::{Cell, GridStore};
pub use value::CellValue;
