//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellRange, CellValue, GridStore};
use crate::conditional_format::{
    ConditionalFormatRule, ConditionalFormats, RulePriority, VisualOverride,
};
use crate::error::{Error, Result};
use crate::extent::{ExtentReport, ExtentScanner};
use crate::style::{Style, StyleId, StylePatch};
use crate::{MAX_COLS, MAX_ROWS};

/// Row height used when a row has no override, in points
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;
/// Column width used when a column has no override, in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: GridStore,
    row_heights: BTreeMap<u32, f64>,
    column_widths: BTreeMap<u16, f64>,
    merged_regions: Vec<CellRange>,
    freeze_panes: Option<FreezePanes>,
    auto_filter: Option<CellRange>,
    default_style: Style,
    conditional_formats: ConditionalFormats,
}

impl Worksheet {
    /// Create a new, empty worksheet
    ///
    /// The name is not validated here; [`crate::Workbook::create_sheet`] does that.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: GridStore::new(),
            row_heights: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merged_regions: Vec::new(),
            freeze_panes: None,
            auto_filter: None,
            default_style: Style::default(),
            conditional_formats: ConditionalFormats::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Underlying cell store
    pub fn cells(&self) -> &GridStore {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut GridStore {
        &mut self.cells
    }

    // === Cell access ===

    /// Get a cell by A1 reference
    pub fn cell(&self, reference: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(reference)?;
        Ok(self.cells.get(addr))
    }

    pub fn cell_at(&self, addr: CellAddress) -> Option<&Cell> {
        self.cells.get(addr)
    }

    /// Get a cell value by A1 reference (Empty when the cell is absent)
    pub fn value(&self, reference: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(reference)?;
        Ok(self.cells.value(addr))
    }

    pub fn value_at(&self, addr: CellAddress) -> &CellValue {
        self.cells.value(addr)
    }

    /// Set a cell value by A1 reference, keeping the cell's styling
    pub fn set_value<V: Into<CellValue>>(&mut self, reference: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        self.set_value_at(addr, value);
        Ok(())
    }

    pub fn set_value_at<V: Into<CellValue>>(&mut self, addr: CellAddress, value: V) {
        self.cells.set_value(addr, value.into());
    }

    /// Store formula text verbatim; it is never evaluated
    pub fn set_formula(&mut self, reference: &str, formula: &str) -> Result<()> {
        self.set_value(reference, CellValue::formula(formula))
    }

    /// Clear the value but keep the record (and its styling)
    pub fn clear_cell(&mut self, reference: &str) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        if let Some(cell) = self.cells.get_mut(addr) {
            cell.value = CellValue::Empty;
        }
        Ok(())
    }

    /// Delete the cell record entirely
    pub fn remove_cell(&mut self, reference: &str) -> Result<Option<Cell>> {
        let addr = CellAddress::parse(reference)?;
        Ok(self.cells.remove(addr))
    }

    /// Write values left to right starting at `(row, start_col)`
    pub fn write_row<I, V>(&mut self, row: u32, start_col: u16, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (i, value) in values.into_iter().enumerate() {
            let col = u16::try_from(i)
                .ok()
                .and_then(|i| start_col.checked_add(i))
                .ok_or_else(|| {
                    Error::InvalidReference(format!("row {} runs past the last column", row))
                })?;
            let addr = CellAddress::new(row, col)?;
            self.set_value_at(addr, value);
        }
        Ok(())
    }

    /// Write values top to bottom starting at `(start_row, col)`
    pub fn write_column<I, V>(&mut self, col: u16, start_row: u32, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (i, value) in values.into_iter().enumerate() {
            let row = u32::try_from(i)
                .ok()
                .and_then(|i| start_row.checked_add(i))
                .ok_or_else(|| {
                    Error::InvalidReference(format!("column {} runs past the last row", col))
                })?;
            let addr = CellAddress::new(row, col)?;
            self.set_value_at(addr, value);
        }
        Ok(())
    }

    /// Read two columns side by side from row 1 until a row where both are empty
    pub fn read_column_pairs(&self, col_a: u16, col_b: u16) -> Result<Vec<(CellValue, CellValue)>> {
        let mut pairs = Vec::new();
        for row in 1..=MAX_ROWS {
            let a = self.cells.value(CellAddress::new(row, col_a)?);
            let b = self.cells.value(CellAddress::new(row, col_b)?);
            if a.is_empty() && b.is_empty() {
                break;
            }
            pairs.push((a.clone(), b.clone()));
        }
        Ok(pairs)
    }

    // === Styling ===

    /// Point a cell at a named style, creating the record if needed
    pub fn set_named_style_at(&mut self, addr: CellAddress, style: Option<StyleId>) {
        self.cells.get_or_create(addr).named_style = style;
    }

    /// Merge direct overrides into one cell
    pub fn format_cell_at(&mut self, addr: CellAddress, patch: &StylePatch) {
        self.cells.get_or_create(addr).overrides.merge(patch);
    }

    /// Merge direct overrides into every cell of a range
    ///
    /// Creates a record for each cell, so keep ranges to the cells that need it.
    pub fn format_range(&mut self, range: &CellRange, patch: &StylePatch) {
        for addr in range.cells() {
            self.format_cell_at(addr, patch);
        }
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    // === Row/Column dimensions ===

    /// Row height in points
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::InvalidReference(format!("row {}", row)));
        }
        check_size("row height", height)?;
        self.row_heights.insert(row, height);
        Ok(())
    }

    /// Column width in characters
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        if col == 0 || col > MAX_COLS {
            return Err(Error::InvalidReference(format!("column {}", col)));
        }
        check_size("column width", width)?;
        self.column_widths.insert(col, width);
        Ok(())
    }

    /// Rows with an explicit height
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Columns with an explicit width
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    // === Merged Cells ===

    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells; fails if any cell already belongs to a merged region
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self.merged_regions.iter().any(|r| r.overlaps(range)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    /// Remove a merged region; returns false if it was not merged
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        match self.merged_regions.iter().position(|r| r == range) {
            Some(i) => {
                self.merged_regions.remove(i);
                true
            }
            None => false,
        }
    }

    // === Freeze Panes ===

    pub fn freeze_panes(&self) -> Option<FreezePanes> {
        self.freeze_panes
    }

    /// Freeze everything above and left of `top_left`
    ///
    /// `A1` freezes nothing and removes any existing freeze.
    pub fn set_freeze_panes(&mut self, top_left: CellAddress) {
        self.freeze_panes = if top_left.row() == 1 && top_left.col() == 1 {
            None
        } else {
            Some(FreezePanes { top_left })
        };
    }

    /// Freeze by reference, e.g. `"G2"` keeps row 1 and columns A-F in view
    pub fn freeze_panes_at(&mut self, reference: &str) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        self.set_freeze_panes(addr);
        Ok(())
    }

    pub fn unfreeze_panes(&mut self) {
        self.freeze_panes = None;
    }

    // === Auto-filter ===

    pub fn auto_filter(&self) -> Option<CellRange> {
        self.auto_filter
    }

    pub fn set_auto_filter(&mut self, range: Option<CellRange>) {
        self.auto_filter = range;
    }

    // === Conditional Formatting ===

    pub fn conditional_formats(&self) -> &ConditionalFormats {
        &self.conditional_formats
    }

    /// Append a conditional format rule for `range`
    pub fn add_conditional_format(
        &mut self,
        range: CellRange,
        rule: ConditionalFormatRule,
    ) -> Result<()> {
        self.conditional_formats.add_rule(range, rule)
    }

    pub fn clear_conditional_formats(&mut self) {
        self.conditional_formats.clear();
    }

    /// Visual override of the winning rule for one cell
    pub fn evaluate_conditional_at(
        &self,
        addr: CellAddress,
        policy: RulePriority,
    ) -> Option<VisualOverride> {
        self.conditional_formats.evaluate(addr, &self.cells, policy)
    }

    // === Extent ===

    /// Find the true data boundary with the given look-ahead window
    pub fn scan_extent(&self, window: u32) -> ExtentReport {
        ExtentScanner::new(window).scan(&self.cells)
    }

    /// Number of stored cell records
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Frozen pane position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePanes {
    /// First cell of the scrollable area
    pub top_left: CellAddress,
}

impl FreezePanes {
    /// Number of frozen rows
    pub fn rows(&self) -> u32 {
        self.top_left.row() - 1
    }

    /// Number of frozen columns
    pub fn cols(&self) -> u16 {
        self.top_left.col() - 1
    }
}

fn check_size(what: &str, size: f64) -> Result<()> {
    if size.is_finite() && size >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidValue(format!("{} {}", what, size)))
    }
}
