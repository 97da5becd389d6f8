//! True data extent of a sheet
//!
//! A [`GridStore`]'s bounding box is a high-water mark: deletions never shrink
//! it, so the last row/column inside it may be empty. The scanner finds the
//! last cell that actually holds a value in reverse row-major order, then checks
//! a bounded window past that boundary for stray data. Both steps visit stored
//! cells only, so the cost follows the cell count, not the watermark area.

use crate::cell::{CellAddress, GridStore};

/// Default look-ahead window, in rows and in columns
pub const DEFAULT_EXTENT_WINDOW: u32 = 1000;

/// Outcome of an extent scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtentReport {
    /// Last row holding data (0 for an empty sheet)
    pub last_row: u32,
    /// Column of the last data cell in `last_row` (0 for an empty sheet)
    pub last_col: u16,
    /// No data was found inside the window past the boundary
    pub clean: bool,
    /// First stray cell found past the boundary
    pub orphan: Option<CellAddress>,
}

impl ExtentReport {
    /// Report for a sheet without data
    pub fn empty() -> Self {
        Self {
            last_row: 0,
            last_col: 0,
            clean: true,
            orphan: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.last_row == 0
    }

    /// The last data cell, if any
    pub fn last_cell(&self) -> Option<CellAddress> {
        CellAddress::new(self.last_row, self.last_col).ok()
    }
}

/// Bounded reverse scanner
///
/// The window trades completeness for bounded work: stray data further than
/// `window` rows below (or columns right of) the boundary is not reported. A
/// window at least as large as the bounding box makes the check exhaustive.
#[derive(Debug, Clone, Copy)]
pub struct ExtentScanner {
    window: u32,
}

impl Default for ExtentScanner {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENT_WINDOW)
    }
}

impl ExtentScanner {
    pub fn new(window: u32) -> Self {
        Self { window }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// Scan a grid
    pub fn scan(&self, grid: &GridStore) -> ExtentReport {
        let Some((max_row, max_col)) = grid.bounding_box() else {
            log::trace!("extent scan: nothing ever written");
            return ExtentReport::empty();
        };

        let Some(last) = find_last_cell(grid) else {
            log::trace!("extent scan: no data inside {}x{}", max_row, max_col);
            return ExtentReport::empty();
        };
        let (last_row, last_col) = (last.row(), last.col());
        log::trace!(
            "extent scan: boundary {} inside {}x{}, window {}",
            last,
            max_row,
            max_col,
            self.window
        );

        let orphan = self.find_orphan(grid, last_row, last_col, max_row, max_col);
        if let Some(orphan) = orphan {
            log::warn!(
                "data at {} lies past the detected boundary {}",
                orphan,
                last
            );
        }

        ExtentReport {
            last_row,
            last_col,
            clean: orphan.is_none(),
            orphan,
        }
    }

    /// Look for data in the rows below the boundary, then in the columns right of it
    ///
    /// The first hit follows the window walk: row by row below the boundary,
    /// then column by column (top to bottom) right of it. Only stored cells are
    /// visited, and nothing lies past the watermark, so the window is clipped to it.
    fn find_orphan(
        &self,
        grid: &GridStore,
        last_row: u32,
        last_col: u16,
        max_row: u32,
        max_col: u16,
    ) -> Option<CellAddress> {
        let row_end = last_row.saturating_add(self.window).min(max_row);
        let below = data_cells(grid)
            .filter(|addr| addr.row() > last_row && addr.row() <= row_end)
            .min_by_key(|addr| (addr.row(), addr.col()));
        if below.is_some() {
            return below;
        }

        let col_end = u32::from(last_col)
            .saturating_add(self.window)
            .min(u32::from(max_col));
        data_cells(grid)
            .filter(|addr| {
                addr.row() <= last_row
                    && addr.col() > last_col
                    && u32::from(addr.col()) <= col_end
            })
            .min_by_key(|addr| (addr.col(), addr.row()))
    }
}

/// Last data cell in reverse row-major order: the bottom row, rightmost column
fn find_last_cell(grid: &GridStore) -> Option<CellAddress> {
    data_cells(grid).max_by_key(|addr| (addr.row(), addr.col()))
}

fn data_cells(grid: &GridStore) -> impl Iterator<Item = CellAddress> + '_ {
    grid.iter()
        .filter(|(_, cell)| cell.has_data())
        .map(|(addr, _)| addr)
}
