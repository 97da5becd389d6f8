//! Snapshot reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gridbook_core::{
    column_letter_to_index, Cell, CellAddress, CellRange, Error, RedefinitionMode, Result,
    StyleRegistry, Workbook, Worksheet,
};

use crate::model::{DocumentModel, SheetModel};
use crate::{FORMAT_TAG, FORMAT_VERSION};

/// Snapshot reader
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Read a workbook from a reader
    ///
    /// I/O failures surface as `Error::Io`; anything wrong with the content is
    /// `Error::DocumentCorrupt`.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Workbook> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read(&bytes)
    }

    /// Read a workbook from snapshot bytes
    pub fn read(bytes: &[u8]) -> Result<Workbook> {
        let document: DocumentModel = serde_json::from_slice(bytes)
            .map_err(|e| Error::corrupt(format!("malformed snapshot: {}", e)))?;

        if document.format != FORMAT_TAG {
            return Err(Error::corrupt(format!(
                "unexpected format tag '{}'",
                document.format
            )));
        }
        if document.version != FORMAT_VERSION {
            return Err(Error::corrupt(format!(
                "unsupported snapshot version {}",
                document.version
            )));
        }

        let mut workbook = Workbook::with_settings(document.settings);

        // Duplicates in a snapshot are corruption whatever the configured mode
        for style in document.styles {
            workbook
                .styles_mut()
                .define_style(style.name, style.patch, RedefinitionMode::Strict)
                .map_err(|e| Error::corrupt(e.to_string()))?;
        }

        let sheet_count = document.sheets.len();
        for model in document.sheets {
            let sheet = Self::read_sheet(model, workbook.styles())?;
            workbook
                .add_existing_sheet(sheet)
                .map_err(|e| Error::corrupt(e.to_string()))?;
        }

        log::info!(
            "loaded snapshot: {} sheet(s), {} named style(s)",
            sheet_count,
            workbook.styles().len()
        );
        Ok(workbook)
    }

    fn read_sheet(model: SheetModel, styles: &StyleRegistry) -> Result<Worksheet> {
        let name = model.name;
        let in_sheet = |e: Error| Error::corrupt(format!("sheet '{}': {}", name, e));

        let mut sheet = Worksheet::new(name.as_str());
        sheet.set_default_style(model.default_style);

        for cell in model.cells {
            let addr = CellAddress::parse(&cell.reference).map_err(in_sheet)?;
            let named_style = match cell.style {
                Some(style) => Some(styles.require(&style).map_err(in_sheet)?),
                None => None,
            };
            sheet.cells_mut().set(
                addr,
                Cell {
                    value: cell.value,
                    named_style,
                    overrides: cell.overrides,
                },
            );
        }

        if let Some(mark) = model.watermark {
            // Validates the bounds; the watermark itself is never a cell
            CellAddress::new(mark.row, mark.col).map_err(in_sheet)?;
            sheet.cells_mut().raise_watermark(mark.row, mark.col);
        }

        for width in model.column_widths {
            let col = column_letter_to_index(&width.column).map_err(in_sheet)?;
            sheet.set_column_width(col, width.width).map_err(in_sheet)?;
        }
        for height in model.row_heights {
            sheet
                .set_row_height(height.row, height.height)
                .map_err(in_sheet)?;
        }

        for merged in &model.merged {
            let range = CellRange::parse(merged).map_err(in_sheet)?;
            sheet.merge_cells(&range).map_err(in_sheet)?;
        }

        if let Some(anchor) = &model.freeze_panes {
            sheet.freeze_panes_at(anchor).map_err(in_sheet)?;
        }
        if let Some(filter) = &model.auto_filter {
            let range = CellRange::parse(filter).map_err(in_sheet)?;
            sheet.set_auto_filter(Some(range));
        }

        for cf in model.conditional_formats {
            let range = CellRange::parse(&cf.range).map_err(in_sheet)?;
            sheet
                .add_conditional_format(range, cf.rule)
                .map_err(in_sheet)?;
        }

        Ok(sheet)
    }
}
