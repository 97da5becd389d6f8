//! Example: Build a styled work-order report and save it as a snapshot

use gridbook::prelude::*;

const SHEET: &str = "ASPHALT";

fn main() -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.create_sheet(SHEET, false)?;

    // Headers
    workbook.write_row(
        SHEET,
        1,
        [
            "DISTRICT NAME", "STREET NAME", "BRAVO", "FORMAN", "BACKFILL Forman", "Date",
            "WORK ORDER", "Excavation", "", "", "", "Sand", "", "SUBBASE", "", "Gravel", "",
            "Old Material", "", "", "", "", "",
        ],
    )?;
    workbook.write_row(
        SHEET,
        2,
        [
            "", "", "", "", "", "", "", "L", "W", "D", "m³", "D", "m3", "D", "m3", "D", "m3",
            "D", "m3", "L", "Remarks", "DONE",
        ],
    )?;
    workbook.set_auto_filter(SHEET, "A1:W1")?;

    // Data
    workbook.write_row(SHEET, 3, ["K 14", "FROM ROAD 30", "111", "AHMED JAMAL"])?;
    workbook.write_row(SHEET, 4, ["UMM SALEEM", "AL AZIZIYAH", "111", "AHMED JAMAL"])?;
    workbook.write_cell(SHEET, "I3", 2.0)?;
    workbook.write_cell(SHEET, "I4", 2.5)?;
    workbook.write_cell(SHEET, "S3", "NO")?;
    workbook.write_cell(SHEET, "S4", "YES")?;

    // Totals
    workbook.write_cell(SHEET, "H70", "TOTAL")?;
    workbook.write_cell(SHEET, "I70", CellValue::formula("SUM(I3:I69)"))?;

    // Styles
    let thin_black = BorderStyle::all(BorderLineStyle::Thin, Color::BLACK);
    let centered = Alignment::new()
        .with_horizontal(HorizontalAlignment::Center)
        .with_vertical(VerticalAlignment::Center);
    let green = Color::rgb(0x92, 0xD0, 0x50);
    let red = Color::rgb(0xFF, 0x66, 0x66);

    workbook.define_style(
        "header",
        StylePatch::new()
            .with_font(FontStyle::new().with_bold(true).with_color(Color::WHITE))
            .with_fill(FillStyle::solid(green))
            .with_border(thin_black.clone())
            .with_alignment(centered.clone()),
    )?;
    workbook.apply_named_style_to_range(SHEET, "A1:W2", "header")?;

    workbook.format_cells(
        SHEET,
        "A3:W69",
        &StylePatch::new()
            .with_border(thin_black)
            .with_alignment(centered),
    )?;
    workbook.format_cells(
        SHEET,
        "I3:I70",
        &StylePatch::new().with_number_format(NumberFormat::from_code("0.0")),
    )?;
    workbook.format_cells(
        SHEET,
        "H70",
        &StylePatch::new().with_font(FontStyle::new().with_bold(true).with_color(Color::RED)),
    )?;

    // DONE column
    workbook.add_conditional_format(
        SHEET,
        "S3:S69",
        ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
            .with_fill(FillStyle::solid(green)),
    )?;
    workbook.add_conditional_format(
        SHEET,
        "S3:S69",
        ConditionalFormatRule::cell_is(CfOperator::Equal, "\"NO\"")
            .with_fill(FillStyle::solid(red)),
    )?;

    for col in 1..=23 {
        workbook.set_column_width_at(SHEET, col, 15.0)?;
    }
    workbook.set_freeze_panes(SHEET, "G2")?;

    let extent = workbook.scan_extent(SHEET)?;
    println!(
        "Data ends at row {}, column {} (clean: {})",
        extent.last_row, extent.last_col, extent.clean
    );
    for reference in ["S3", "S4"] {
        let style = workbook.display_style(SHEET, reference)?;
        println!("{}: fill {:?}", reference, style.fill.primary_color());
    }

    let path = std::env::temp_dir().join("asphalt_report.json");
    workbook.save(&path)?;
    println!("Created {}", path.display());

    Ok(())
}
