//! End-to-end behavior of a styled report workbook

use gridbook::prelude::*;
use gridbook::{Protection, RedefinitionMode};
use pretty_assertions::assert_eq;

const SHEET: &str = "ASPHALT";

fn report() -> Workbook {
    let mut wb = Workbook::new();
    wb.create_sheet(SHEET, false).unwrap();
    wb.write_row(SHEET, 1, ["DISTRICT", "STREET", "DONE"]).unwrap();
    wb.write_row(SHEET, 3, ["K 14", "ROAD 30", "NO"]).unwrap();
    wb.write_row(SHEET, 4, ["SAFA", "KHALIDA", "YES"]).unwrap();

    wb.define_style(
        "header",
        StylePatch::new()
            .with_font(FontStyle::new().with_bold(true).with_color(Color::WHITE))
            .with_fill(FillStyle::solid(Color::rgb(0x92, 0xD0, 0x50))),
    )
    .unwrap();
    wb.apply_named_style_to_range(SHEET, "A1:C1", "header").unwrap();

    wb.add_conditional_format(
        SHEET,
        "C3:C69",
        ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
            .with_fill(FillStyle::solid(Color::GREEN)),
    )
    .unwrap();
    wb.add_conditional_format(
        SHEET,
        "C3:C69",
        ConditionalFormatRule::cell_is(CfOperator::Equal, "\"NO\"")
            .with_fill(FillStyle::solid(Color::RED)),
    )
    .unwrap();
    wb
}

#[test]
fn test_named_style_and_override_layers() {
    let mut wb = report();
    wb.format_cells(
        SHEET,
        "B1",
        &StylePatch::new().with_protection(Protection::unlocked()),
    )
    .unwrap();

    let b1 = wb.effective_style(SHEET, "B1").unwrap();
    assert!(b1.font.bold);
    assert!(!b1.protection.locked);

    // Changing the override leaves the named style alone
    let a1 = wb.effective_style(SHEET, "A1").unwrap();
    assert!(a1.protection.locked);
    assert_eq!(a1.font, b1.font);
}

#[test]
fn test_conditional_rules_resolve_per_cell() {
    let wb = report();
    let c3 = wb.evaluate_conditional(SHEET, "C3").unwrap().unwrap();
    let c4 = wb.evaluate_conditional(SHEET, "C4").unwrap().unwrap();
    assert_eq!(c3.fill, Some(FillStyle::solid(Color::RED)));
    assert_eq!(c4.fill, Some(FillStyle::solid(Color::GREEN)));

    // Empty cells in the range match nothing
    assert_eq!(wb.evaluate_conditional(SHEET, "C10").unwrap(), None);
}

#[test]
fn test_extent_after_clearing_trailing_rows() {
    let mut wb = report();
    wb.write_row(SHEET, 9, ["stray"]).unwrap();
    wb.require_sheet_mut(SHEET)
        .unwrap()
        .clear_cell("A9")
        .unwrap();

    let extent = wb.scan_extent(SHEET).unwrap();
    assert_eq!((extent.last_row, extent.last_col), (4, 3));
    assert!(extent.clean);
    assert_eq!(
        wb.require_sheet(SHEET).unwrap().cells().bounding_box(),
        Some((9, 3))
    );
}

#[test]
fn test_recreating_sheet_discards_content() {
    let mut wb = report();
    assert!(matches!(
        wb.create_sheet(SHEET, false),
        Err(Error::DuplicateSheetName(_))
    ));

    wb.create_sheet(SHEET, true).unwrap();
    assert_eq!(wb.read_cell(SHEET, "A1").unwrap(), CellValue::Empty);
    assert!(wb
        .require_sheet(SHEET)
        .unwrap()
        .conditional_formats()
        .is_empty());
    assert_eq!(wb.styles().len(), 1);
}

#[test]
fn test_strict_style_mode() {
    let mut wb = Workbook::with_settings(WorkbookSettings {
        style_redefinition: RedefinitionMode::Strict,
        ..WorkbookSettings::default()
    });
    wb.define_style("total", StylePatch::new()).unwrap();
    let err = wb.define_style("total", StylePatch::new()).unwrap_err();
    assert!(matches!(err, Error::DuplicateStyleRedefinition(_)));
}

#[test]
fn test_snapshot_keeps_report_behavior() {
    let wb = report();
    let loaded = gridbook::load(&gridbook::save(&wb).unwrap()).unwrap();

    for reference in ["A1", "C3", "C4", "C5"] {
        assert_eq!(
            loaded.display_style(SHEET, reference).unwrap(),
            wb.display_style(SHEET, reference).unwrap()
        );
    }
}
