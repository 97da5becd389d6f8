//! gridbook CLI - snapshot inspection tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridbook::prelude::*;
use gridbook::{ExtentScanner, VisualOverride, DEFAULT_EXTENT_WINDOW};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridbook")]
#[command(author, version, about = "Inspect gridbook workbook snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a workbook
    Info {
        /// Input snapshot file
        input: PathBuf,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input snapshot file
        input: PathBuf,
    },

    /// Report the true data extent of one or all sheets
    Extent {
        /// Input snapshot file
        input: PathBuf,

        /// Only scan this sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Look-ahead window in rows and columns (default: the workbook setting)
        #[arg(short, long)]
        window: Option<u32>,
    },

    /// Show a cell's value, effective style and conditional override
    Cell {
        /// Input snapshot file
        input: PathBuf,

        /// Sheet name
        sheet: String,

        /// Cell reference, e.g. S3
        reference: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => show_info(&input),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Extent {
            input,
            sheet,
            window,
        } => show_extent(&input, sheet.as_deref(), window),
        Commands::Cell {
            input,
            sheet,
            reference,
        } => show_cell(&input, &sheet, &reference),
    }
}

fn open(input: &Path) -> Result<Workbook> {
    Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());
    println!("Named styles: {}", workbook.styles().len());

    for (i, sheet) in workbook.sheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        match sheet.cells().bounding_box() {
            Some((rows, cols)) => println!("    Written area: {} rows x {} columns", rows, cols),
            None => println!("    Written area: empty"),
        }
        println!("    Cells: {}", sheet.cell_count());
        println!("    Merged regions: {}", sheet.merged_regions().len());
        println!("    Conditional rules: {}", sheet.conditional_formats().len());
    }

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    for (i, name) in workbook.sheet_names().into_iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}

fn show_extent(input: &Path, sheet: Option<&str>, window: Option<u32>) -> Result<()> {
    let workbook = open(input)?;
    let window = window.unwrap_or(workbook.settings().extent_window);
    let scanner = ExtentScanner::new(window);

    let sheets: Vec<&Worksheet> = match sheet {
        Some(name) => vec![workbook
            .require_sheet(name)
            .with_context(|| format!("No sheet named '{}'", name))?],
        None => workbook.sheets().collect(),
    };

    for sheet in sheets {
        let report = scanner.scan(sheet.cells());
        let last = report
            .last_cell()
            .map(|addr| addr.to_a1_string())
            .unwrap_or_else(|| "-".to_string());
        print!(
            "{}\tlast row {}\tlast column {}\t{}",
            sheet.name(),
            report.last_row,
            report.last_col,
            last
        );
        match report.orphan {
            Some(orphan) => println!("\tORPHAN at {}", orphan),
            None => println!("\tclean"),
        }
    }

    if window != DEFAULT_EXTENT_WINDOW {
        eprintln!("(window {})", window);
    }
    Ok(())
}

fn show_cell(input: &Path, sheet: &str, reference: &str) -> Result<()> {
    let workbook = open(input)?;
    let value = workbook
        .read_cell(sheet, reference)
        .with_context(|| format!("Cannot read {}!{}", sheet, reference))?;
    let style = workbook.effective_style(sheet, reference)?;
    let visual = workbook.evaluate_conditional(sheet, reference)?;

    println!("Value: {} ({})", value, value.type_name());

    let named = workbook
        .require_sheet(sheet)?
        .cell(reference.trim())?
        .and_then(|cell| cell.named_style)
        .and_then(|id| workbook.styles().get(id))
        .map(|s| s.name.as_str());
    if let Some(name) = named {
        println!("Named style: {}", name);
    }
    print_style(&style);

    match visual {
        Some(visual) => print_visual(&visual),
        None => println!("Conditional: none"),
    }
    Ok(())
}

fn print_style(style: &Style) {
    let font = &style.font;
    println!(
        "Font: {} {}pt{}{} {}",
        font.name,
        font.size,
        if font.bold { " bold" } else { "" },
        if font.italic { " italic" } else { "" },
        font.color
    );
    match style.fill.primary_color() {
        Some(color) => println!("Fill: {}", color),
        None => println!("Fill: none"),
    }
    println!("Number format: {}", style.number_format.code());
    println!(
        "Protection: {}{}",
        if style.protection.locked { "locked" } else { "unlocked" },
        if style.protection.hidden { ", hidden" } else { "" }
    );
}

fn print_visual(visual: &VisualOverride) {
    if let Some(fill) = visual.fill.as_ref().and_then(|f| f.primary_color()) {
        println!("Conditional fill: {}", fill);
    }
    if let Some(font) = &visual.font {
        println!("Conditional font color: {}", font.color);
    }
    if let Some(icon) = &visual.icon {
        println!("Conditional icon: {} #{}", icon.style.as_str(), icon.index);
    }
    if let Some(bar) = &visual.data_bar {
        println!("Conditional data bar: {} at {:.0}%", bar.color, bar.ratio * 100.0);
    }
}
