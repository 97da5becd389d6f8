//! Cell storage implementation
//!
//! Sparse, hash-mapped storage for the cells of one sheet, plus the "used range"
//! high-water mark that spreadsheet applications keep alongside it.

use ahash::AHashMap;

use super::{CellAddress, CellValue};
use crate::style::{StyleId, StylePatch};

/// Complete data for a single cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// The cell's value
    pub value: CellValue,
    /// Named style applied to the cell (an index into the workbook's style table)
    pub named_style: Option<StyleId>,
    /// Direct per-axis overrides layered over the named style
    pub overrides: StylePatch,
}

impl Cell {
    /// Create a new cell with a value and no styling
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the named style
    pub fn with_named_style(mut self, id: StyleId) -> Self {
        self.named_style = Some(id);
        self
    }

    /// Set the direct overrides
    pub fn with_overrides(mut self, overrides: StylePatch) -> Self {
        self.overrides = overrides;
        self
    }

    /// Check if the cell holds data (a non-empty value)
    ///
    /// Style alone does not make a cell "data" for extent scanning.
    pub fn has_data(&self) -> bool {
        !self.value.is_empty()
    }

    /// Check if the cell carries nothing at all: no value, no named style, no overrides
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.named_style.is_none() && self.overrides.is_empty()
    }
}

/// Sparse storage for the cells of one worksheet
///
/// Design decisions:
/// - `AHashMap` keyed by address: O(1) amortized get/set/remove
/// - A record is only dropped by an explicit [`GridStore::remove`]; writing an empty
///   value keeps direct styling alive
/// - The bounding box is a watermark: raised on every write, never lowered
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    cells: AHashMap<CellAddress, Cell>,
    max_row: u32,
    max_col: u16,
}

impl GridStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, addr: CellAddress) -> Option<&Cell> {
        self.cells.get(&addr)
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, addr: CellAddress) -> Option<&mut Cell> {
        self.cells.get_mut(&addr)
    }

    /// Get a cell, creating an empty record if none exists
    pub fn get_or_create(&mut self, addr: CellAddress) -> &mut Cell {
        self.raise_watermark(addr.row(), addr.col());
        self.cells.entry(addr).or_default()
    }

    /// Get a cell value (Empty when the cell is absent)
    pub fn value(&self, addr: CellAddress) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cells.get(&addr).map(|c| &c.value).unwrap_or(EMPTY)
    }

    /// Store a whole cell record, replacing any existing one
    pub fn set(&mut self, addr: CellAddress, cell: Cell) {
        self.raise_watermark(addr.row(), addr.col());
        self.cells.insert(addr, cell);
    }

    /// Set just the cell value, preserving styling
    ///
    /// An untouched address gets a new record; writing `Empty` over an existing
    /// record keeps the record.
    pub fn set_value(&mut self, addr: CellAddress, value: CellValue) {
        self.get_or_create(addr).value = value;
    }

    /// Remove a cell record; the watermark is left as is
    pub fn remove(&mut self, addr: CellAddress) -> Option<Cell> {
        self.cells.remove(&addr)
    }

    /// Remove all cells. The watermark is left as is.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The largest row and column ever written, or `None` if nothing was ever written
    pub fn bounding_box(&self) -> Option<(u32, u16)> {
        if self.max_row == 0 || self.max_col == 0 {
            None
        } else {
            Some((self.max_row, self.max_col))
        }
    }

    /// Raise the watermark to at least `(row, col)`
    pub fn raise_watermark(&mut self, row: u32, col: u16) {
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    /// Get the number of stored cell records
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if no records are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all stored cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.cells.iter().map(|(addr, cell)| (*addr, cell))
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_sorted(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|(addr, _)| *addr);
        cells.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, FillStyle};

    fn addr(row: u32, col: u16) -> CellAddress {
        CellAddress::new(row, col).unwrap()
    }

    #[test]
    fn test_basic_operations() {
        let mut storage = GridStore::new();

        storage.set(addr(1, 1), Cell::new(42.0));
        let cell = storage.get(addr(1, 1)).unwrap();
        assert_eq!(cell.value.as_number(), Some(42.0));

        assert!(storage.get(addr(2, 2)).is_none());
        assert_eq!(storage.value(addr(2, 2)), &CellValue::Empty);
    }

    #[test]
    fn test_empty_value_keeps_record() {
        let mut storage = GridStore::new();

        let fill = StylePatch {
            fill: Some(FillStyle::solid(Color::YELLOW)),
            ..StylePatch::default()
        };
        storage.set(addr(3, 2), Cell::new("x").with_overrides(fill.clone()));
        storage.set_value(addr(3, 2), CellValue::Empty);

        let cell = storage.get(addr(3, 2)).unwrap();
        assert!(!cell.has_data());
        assert_eq!(cell.overrides, fill);
        assert_eq!(storage.cell_count(), 1);

        storage.remove(addr(3, 2));
        assert!(storage.get(addr(3, 2)).is_none());
    }

    #[test]
    fn test_bounding_box_is_a_watermark() {
        let mut storage = GridStore::new();
        assert_eq!(storage.bounding_box(), None);

        storage.set_value(addr(6, 4), CellValue::Number(1.0));
        storage.set_value(addr(11, 8), CellValue::Number(2.0));
        storage.set_value(addr(3, 2), CellValue::Number(3.0));
        assert_eq!(storage.bounding_box(), Some((11, 8)));

        // Deletions never shrink it
        storage.remove(addr(11, 8));
        assert_eq!(storage.bounding_box(), Some((11, 8)));
        storage.clear();
        assert_eq!(storage.bounding_box(), Some((11, 8)));
    }

    #[test]
    fn test_sorted_iteration() {
        let mut storage = GridStore::new();

        storage.set(addr(2, 1), Cell::new(3.0));
        storage.set(addr(1, 2), Cell::new(2.0));
        storage.set(addr(1, 1), Cell::new(1.0));

        let order: Vec<_> = storage.iter_sorted().map(|(a, _)| a.to_string()).collect();
        assert_eq!(order, vec!["A1", "B1", "A2"]);
    }
}
