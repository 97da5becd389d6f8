//! Snapshot writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gridbook_core::{index_to_column_letter, Error, Result, Workbook, Worksheet};

use crate::model::{
    CellModel, ColumnWidthModel, ConditionalFormatModel, DocumentModel, NamedStyleModel,
    RowHeightModel, SheetModel, WatermarkModel,
};
use crate::{FORMAT_TAG, FORMAT_VERSION};

/// Snapshot writer
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(workbook, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize a workbook to bytes
    pub fn write(workbook: &Workbook) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        Self::write_to(workbook, &mut bytes)?;
        Ok(bytes)
    }

    /// Serialize a workbook into a writer
    pub fn write_to<W: Write>(workbook: &Workbook, writer: W) -> Result<()> {
        let document = Self::build_document(workbook)?;
        serde_json::to_writer_pretty(writer, &document).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::corrupt(format!("cannot serialize workbook: {}", e))
            }
        })?;
        log::info!(
            "saved snapshot: {} sheet(s), {} named style(s)",
            document.sheets.len(),
            document.styles.len()
        );
        Ok(())
    }

    fn build_document(workbook: &Workbook) -> Result<DocumentModel> {
        let styles = workbook
            .styles()
            .iter()
            .map(|(_, style)| NamedStyleModel {
                name: style.name.clone(),
                patch: style.patch.clone(),
            })
            .collect();

        let sheets = workbook
            .sheets()
            .map(|sheet| Self::build_sheet(workbook, sheet))
            .collect::<Result<Vec<_>>>()?;

        Ok(DocumentModel {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            settings: *workbook.settings(),
            styles,
            sheets,
        })
    }

    fn build_sheet(workbook: &Workbook, sheet: &Worksheet) -> Result<SheetModel> {
        let mut cells = Vec::with_capacity(sheet.cell_count());
        for (addr, cell) in sheet.cells().iter_sorted() {
            let style = match cell.named_style {
                Some(id) => {
                    let named = workbook
                        .styles()
                        .get(id)
                        .ok_or_else(|| Error::StyleNotFound(format!("id {} at {}", id.index(), addr)))?;
                    Some(named.name.clone())
                }
                None => None,
            };
            cells.push(CellModel {
                reference: addr.to_a1_string(),
                value: cell.value.clone(),
                style,
                overrides: cell.overrides.clone(),
            });
        }

        let watermark = sheet
            .cells()
            .bounding_box()
            .map(|(row, col)| WatermarkModel { row, col });

        let column_widths = sheet
            .custom_column_widths()
            .iter()
            .map(|(&col, &width)| ColumnWidthModel {
                column: index_to_column_letter(col),
                width,
            })
            .collect();

        let row_heights = sheet
            .custom_row_heights()
            .iter()
            .map(|(&row, &height)| RowHeightModel { row, height })
            .collect();

        let conditional_formats = sheet
            .conditional_formats()
            .iter()
            .map(|cf| ConditionalFormatModel {
                range: cf.range.to_a1_string(),
                rule: cf.rule.clone(),
            })
            .collect();

        Ok(SheetModel {
            name: sheet.name().to_string(),
            default_style: sheet.default_style().clone(),
            watermark,
            cells,
            column_widths,
            row_heights,
            merged: sheet
                .merged_regions()
                .iter()
                .map(|r| r.to_a1_string())
                .collect(),
            freeze_panes: sheet.freeze_panes().map(|p| p.top_left.to_a1_string()),
            auto_filter: sheet.auto_filter().map(|r| r.to_a1_string()),
            conditional_formats,
        })
    }
}
