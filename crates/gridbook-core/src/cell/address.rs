//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "XFD1048576")
///
/// Both coordinates are 1-based: `A1` is `(row 1, col 1)`. An address can only be
/// built through [`CellAddress::new`] or [`CellAddress::parse`], so every value in
/// circulation satisfies `1 <= row <= MAX_ROWS` and `1 <= col <= MAX_COLS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    row: u32,
    col: u16,
}

impl CellAddress {
    /// Create a cell address from 1-based row and column indices
    ///
    /// # Examples
    /// ```
    /// use gridbook_core::CellAddress;
    ///
    /// let addr = CellAddress::new(5, 3).unwrap();
    /// assert_eq!(addr.to_string(), "C5");
    /// assert!(CellAddress::new(0, 1).is_err());
    /// ```
    pub fn new(row: u32, col: u16) -> Result<Self> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::InvalidReference(format!(
                "row {} outside 1..={}",
                row, MAX_ROWS
            )));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::InvalidReference(format!(
                "column {} outside 1..={}",
                col, MAX_COLS
            )));
        }
        Ok(Self { row, col })
    }

    /// Build an address from coordinates already known to be in bounds.
    pub(crate) const fn from_parts(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// 1-based row index
    pub fn row(&self) -> u32 {
        self.row
    }

    /// 1-based column index
    pub fn col(&self) -> u16 {
        self.col
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Accepts exactly `[A-Za-z]+[1-9][0-9]*`: no whitespace, no `$` markers and no
    /// leading zero in the row part.
    ///
    /// # Examples
    /// ```
    /// use gridbook_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("c5").unwrap();
    /// assert_eq!((addr.row(), addr.col()), (5, 3));
    ///
    /// assert!(CellAddress::parse("C05").is_err());
    /// assert!(CellAddress::parse(" C5").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let letters_end = bytes
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(bytes.len());

        if letters_end == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let digits = &bytes[letters_end..];
        match digits.first() {
            None => {
                return Err(Error::InvalidReference(format!("no row number in '{}'", s)));
            }
            Some(b'0') => {
                return Err(Error::InvalidReference(format!(
                    "row number has a leading zero in '{}'",
                    s
                )));
            }
            Some(_) => {}
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidReference(format!(
                "unexpected character in '{}'",
                s
            )));
        }

        let col = column_letter_to_index(&s[..letters_end])?;
        let row: u32 = s[letters_end..]
            .parse()
            .map_err(|_| Error::InvalidReference(format!("row number too large in '{}'", s)))?;

        Self::new(row, col)
    }

    /// Format as A1-style string (uppercase letters, no leading zeros)
    pub fn to_a1_string(&self) -> String {
        let mut result = index_to_column_letter(self.col);
        result.push_str(&self.row.to_string());
        result
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, ...)
///
/// Letters are case-insensitive. Fails with [`Error::InvalidReference`] for an empty
/// string, a non-letter, or a column past `MAX_COLS`.
pub fn column_letter_to_index(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidReference("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > MAX_COLS as u32 {
            return Err(Error::InvalidReference(format!(
                "column '{}' past the last column",
                letters
            )));
        }
    }

    Ok(col as u16)
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, ...)
///
/// Bijective base-26 has no zero digit, so each step borrows one before taking the
/// remainder: 26 is "Z", not "A0". Index 0 has no letter form and yields "".
pub fn index_to_column_letter(col: u16) -> String {
    let mut letters = Vec::with_capacity(3);
    let mut n = col as u32;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellAddress::from_parts(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::from_parts(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from 1-based row/column indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Result<Self> {
        Ok(Self::new(
            CellAddress::new(start_row, start_col)?,
            CellAddress::new(end_row, end_col)?,
        ))
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |e: Error| Error::InvalidRange(format!("'{}': {}", s, e));

        if let Some((start, end)) = s.split_once(':') {
            let start = CellAddress::parse(start).map_err(invalid)?;
            let end = CellAddress::parse(end).map_err(invalid)?;
            Ok(Self::new(start, end))
        } else {
            let addr = CellAddress::parse(s).map_err(invalid)?;
            Ok(Self::single(addr))
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Check if this range shares at least one cell with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            remaining: self.cell_count(),
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u16,
    remaining: u64,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let addr = CellAddress::from_parts(self.current_row, self.current_col);
        self.remaining -= 1;

        if self.current_col == self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.current_col += 1;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
