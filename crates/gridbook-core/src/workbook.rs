//! Workbook type - the main document structure

use crate::cell::{column_letter_to_index, CellAddress, CellRange, CellValue};
use crate::conditional_format::{ConditionalFormatRule, RulePriority, VisualOverride};
use crate::error::{Error, Result};
use crate::extent::{ExtentReport, DEFAULT_EXTENT_WINDOW};
use crate::style::{RedefinitionMode, Style, StyleId, StylePatch, StyleRegistry};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Holds an ordered list of uniquely named worksheets, the named style table
/// shared by all of them, and the workbook settings. A new workbook has no
/// sheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    styles: StyleRegistry,
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create an empty workbook with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workbook with the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            sheets: Vec::new(),
            styles: StyleRegistry::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }

    // ==================== Sheet directory ====================

    /// Create a sheet, or reset an existing one when `overwrite` is set
    ///
    /// Overwriting replaces the sheet in place with an empty one, keeping its
    /// position. Named styles live in the workbook and are not affected.
    pub fn create_sheet(&mut self, name: &str, overwrite: bool) -> Result<&mut Worksheet> {
        validate_sheet_name(name)?;

        let index = match self.sheet_index(name) {
            Some(index) if overwrite => {
                log::debug!("replacing sheet '{}'", name);
                self.sheets[index] = Worksheet::new(name);
                index
            }
            Some(_) => {
                log::warn!("sheet '{}' already exists; not overwriting", name);
                return Err(Error::DuplicateSheetName(name.to_string()));
            }
            None => {
                log::debug!("creating sheet '{}'", name);
                self.sheets.push(Worksheet::new(name));
                self.sheets.len() - 1
            }
        };
        Ok(&mut self.sheets[index])
    }

    /// Append a fully built worksheet
    pub fn add_existing_sheet(&mut self, sheet: Worksheet) -> Result<()> {
        validate_sheet_name(sheet.name())?;
        if self.sheet_index(sheet.name()).is_some() {
            return Err(Error::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|ws| ws.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Get a sheet by name, failing with [`Error::SheetNotFound`]
    pub fn require_sheet(&self, name: &str) -> Result<&Worksheet> {
        self.sheet(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    pub fn require_sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.sheet_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Position of a sheet in the workbook
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|ws| ws.name() == name)
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|ws| ws.name()).collect()
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.sheets.iter()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Remove a sheet and return it
    pub fn remove_sheet(&mut self, name: &str) -> Result<Worksheet> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        Ok(self.sheets.remove(index))
    }

    /// Rename a sheet; nothing changes on failure
    pub fn rename_sheet(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        validate_sheet_name(new_name)?;
        let index = self
            .sheet_index(old_name)
            .ok_or_else(|| Error::SheetNotFound(old_name.to_string()))?;
        if old_name != new_name && self.sheet_index(new_name).is_some() {
            return Err(Error::DuplicateSheetName(new_name.to_string()));
        }
        self.sheets[index].set_name(new_name);
        Ok(())
    }

    // ==================== Named styles ====================

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Define or redefine a named style, honoring the configured redefinition mode
    pub fn define_style(&mut self, name: &str, patch: StylePatch) -> Result<StyleId> {
        self.define_style_with_mode(name, patch, self.settings.style_redefinition)
    }

    /// Define or redefine a named style with a mode chosen for this call
    pub fn define_style_with_mode(
        &mut self,
        name: &str,
        patch: StylePatch,
        mode: RedefinitionMode,
    ) -> Result<StyleId> {
        self.styles.define_style(name, patch, mode)
    }

    // ==================== Cell helpers ====================
    //
    // These address a sheet by name and a cell by A1 text, with the same
    // strict reference syntax as `CellAddress::parse`.

    /// Write a value to a cell
    pub fn write_cell<V: Into<CellValue>>(
        &mut self,
        sheet: &str,
        reference: &str,
        value: V,
    ) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        self.require_sheet_mut(sheet)?.set_value_at(addr, value);
        Ok(())
    }

    /// Write a value by 1-based row and column
    pub fn write_cell_at<V: Into<CellValue>>(
        &mut self,
        sheet: &str,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        let addr = CellAddress::new(row, col)?;
        self.require_sheet_mut(sheet)?.set_value_at(addr, value);
        Ok(())
    }

    /// Read a cell value (Empty when the cell was never written)
    pub fn read_cell(&self, sheet: &str, reference: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(reference)?;
        Ok(self.require_sheet(sheet)?.value_at(addr).clone())
    }

    pub fn read_cell_at(&self, sheet: &str, row: u32, col: u16) -> Result<CellValue> {
        let addr = CellAddress::new(row, col)?;
        Ok(self.require_sheet(sheet)?.value_at(addr).clone())
    }

    /// Write values across a row starting at column A
    pub fn write_row<I, V>(&mut self, sheet: &str, row: u32, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.require_sheet_mut(sheet)?.write_row(row, 1, values)
    }

    /// Write values down a column (given by letters) starting at row 1
    pub fn write_column<I, V>(&mut self, sheet: &str, column: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let col = column_letter_to_index(column)?;
        self.write_column_at(sheet, col, values)
    }

    /// Write values down a column (1-based index) starting at row 1
    pub fn write_column_at<I, V>(&mut self, sheet: &str, col: u16, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.require_sheet_mut(sheet)?.write_column(col, 1, values)
    }

    /// Read two columns side by side from row 1 until both are empty
    pub fn read_column_pairs(
        &self,
        sheet: &str,
        col_a: u16,
        col_b: u16,
    ) -> Result<Vec<(CellValue, CellValue)>> {
        self.require_sheet(sheet)?.read_column_pairs(col_a, col_b)
    }

    // ==================== Styling helpers ====================

    /// Merge direct overrides into every cell of a range, e.g. `"A1:W2"`
    pub fn format_cells(&mut self, sheet: &str, range: &str, patch: &StylePatch) -> Result<()> {
        let range = CellRange::parse(range)?;
        self.require_sheet_mut(sheet)?.format_range(&range, patch);
        Ok(())
    }

    /// Point a cell at a named style
    pub fn apply_named_style(&mut self, sheet: &str, reference: &str, style: &str) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        let id = self.styles.require(style)?;
        self.require_sheet_mut(sheet)?
            .set_named_style_at(addr, Some(id));
        Ok(())
    }

    /// Point every cell of a range at a named style
    pub fn apply_named_style_to_range(
        &mut self,
        sheet: &str,
        range: &str,
        style: &str,
    ) -> Result<()> {
        let range = CellRange::parse(range)?;
        let id = self.styles.require(style)?;
        let ws = self.require_sheet_mut(sheet)?;
        for addr in range.cells() {
            ws.set_named_style_at(addr, Some(id));
        }
        Ok(())
    }

    /// Effective stored style: sheet default, then named style, then overrides
    pub fn effective_style(&self, sheet: &str, reference: &str) -> Result<Style> {
        let addr = CellAddress::parse(reference)?;
        let ws = self.require_sheet(sheet)?;
        Ok(self
            .styles
            .resolve_effective_style(ws.default_style(), ws.cell_at(addr)))
    }

    /// Effective style with the winning conditional override applied on top
    pub fn display_style(&self, sheet: &str, reference: &str) -> Result<Style> {
        let mut style = self.effective_style(sheet, reference)?;
        if let Some(visual) = self.evaluate_conditional(sheet, reference)? {
            visual.apply_to(&mut style);
        }
        Ok(style)
    }

    // ==================== Conditional formats ====================

    /// Bind a rule to a range such as `"S3:S69"`
    pub fn add_conditional_format(
        &mut self,
        sheet: &str,
        range: &str,
        rule: ConditionalFormatRule,
    ) -> Result<()> {
        let range = CellRange::parse(range)?;
        self.require_sheet_mut(sheet)?
            .add_conditional_format(range, rule)
    }

    /// Winning conditional override for a cell under the configured priority policy
    pub fn evaluate_conditional(
        &self,
        sheet: &str,
        reference: &str,
    ) -> Result<Option<VisualOverride>> {
        let addr = CellAddress::parse(reference)?;
        Ok(self
            .require_sheet(sheet)?
            .evaluate_conditional_at(addr, self.settings.rule_priority))
    }

    // ==================== Layout helpers ====================

    /// Scan a sheet's true extent with the configured window
    pub fn scan_extent(&self, sheet: &str) -> Result<ExtentReport> {
        Ok(self
            .require_sheet(sheet)?
            .scan_extent(self.settings.extent_window))
    }

    /// Set a column width, column given by letters
    pub fn set_column_width(&mut self, sheet: &str, column: &str, width: f64) -> Result<()> {
        let col = column_letter_to_index(column)?;
        self.set_column_width_at(sheet, col, width)
    }

    /// Set a column width, column given by 1-based index
    pub fn set_column_width_at(&mut self, sheet: &str, col: u16, width: f64) -> Result<()> {
        self.require_sheet_mut(sheet)?.set_column_width(col, width)
    }

    /// Freeze panes above and left of `reference`, e.g. `"G2"`
    pub fn set_freeze_panes(&mut self, sheet: &str, reference: &str) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        self.require_sheet_mut(sheet)?.set_freeze_panes(addr);
        Ok(())
    }

    /// Set the auto-filter range, e.g. `"A2:W2"`
    pub fn set_auto_filter(&mut self, sheet: &str, range: &str) -> Result<()> {
        let range = CellRange::parse(range)?;
        self.require_sheet_mut(sheet)?.set_auto_filter(Some(range));
        Ok(())
    }

    pub fn merge_cells(&mut self, sheet: &str, range: &str) -> Result<()> {
        let range = CellRange::parse(range)?;
        self.require_sheet_mut(sheet)?.merge_cells(&range)
    }
}

/// Validate a sheet name
///
/// 1 to 31 characters, no leading or trailing whitespace, no control
/// characters, none of `: \ / ? * [ ]`.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        )));
    }
    if name.trim() != name {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name '{}' has leading or trailing whitespace",
            name
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::InvalidSheetName(
            "Sheet name cannot contain control characters".into(),
        ));
    }

    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name cannot contain '{}'",
            c
        )));
    }

    Ok(())
}

/// Workbook-level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WorkbookSettings {
    /// What redefining a named style does
    pub style_redefinition: RedefinitionMode,
    /// Which matching conditional rule wins
    pub rule_priority: RulePriority,
    /// Look-ahead window for extent scans, in rows and columns
    pub extent_window: u32,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            style_redefinition: RedefinitionMode::Replace,
            rule_priority: RulePriority::FirstAdded,
            extent_window: DEFAULT_EXTENT_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional_format::CfOperator;
    use crate::style::{Color, FillStyle, FontStyle};

    fn yes_no_workbook() -> Workbook {
        let mut wb = Workbook::new();
        wb.create_sheet("Report", false).unwrap();
        let green = ConditionalFormatRule::cell_is(CfOperator::Equal, "\"YES\"")
            .with_fill(FillStyle::solid(Color::GREEN));
        let red = ConditionalFormatRule::cell_is(CfOperator::Equal, "\"NO\"")
            .with_fill(FillStyle::solid(Color::RED));
        wb.add_conditional_format("Report", "S3:S69", green).unwrap();
        wb.add_conditional_format("Report", "S3:S69", red).unwrap();
        wb.write_cell("Report", "S3", "YES").unwrap();
        wb.write_cell("Report", "S4", "NO").unwrap();
        wb.write_cell("Report", "S5", "yes").unwrap();
        wb
    }

    #[test]
    fn test_new_workbook_is_empty() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 0);
        assert!(wb.sheet_names().is_empty());
        assert_eq!(wb.settings(), &WorkbookSettings::default());
    }

    #[test]
    fn test_create_sheets_in_order() {
        let mut wb = Workbook::new();
        wb.create_sheet("Sales", false).unwrap();
        wb.create_sheet("Costs", false).unwrap();
        wb.create_sheet("sales", false).unwrap();

        assert_eq!(wb.sheet_names(), vec!["Sales", "Costs", "sales"]);
        assert_eq!(wb.sheet_index("Costs"), Some(1));
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();
        wb.write_cell("Data", "A1", 1).unwrap();

        let err = wb.create_sheet("Data", false).unwrap_err();
        assert!(matches!(err, Error::DuplicateSheetName(name) if name == "Data"));
        // The rejected call leaves the sheet alone
        assert_eq!(wb.read_cell("Data", "A1").unwrap(), CellValue::Number(1.0));
    }

    #[test]
    fn test_overwrite_resets_sheet_but_keeps_styles() {
        let mut wb = Workbook::new();
        wb.create_sheet("First", false).unwrap();
        wb.create_sheet("Data", false).unwrap();
        wb.define_style("header", StylePatch::new().with_font(FontStyle::new().with_bold(true)))
            .unwrap();
        wb.write_cell("Data", "B2", "x").unwrap();
        wb.apply_named_style("Data", "B2", "header").unwrap();
        wb.merge_cells("Data", "A1:B1").unwrap();
        wb.set_freeze_panes("Data", "G2").unwrap();

        let ws = wb.create_sheet("Data", true).unwrap();
        assert!(ws.is_empty());
        assert!(ws.merged_regions().is_empty());
        assert!(ws.freeze_panes().is_none());

        assert_eq!(wb.sheet_index("Data"), Some(1));
        assert!(wb.styles().style_id("header").is_some());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        for name in ["", "Sheet/1", "Sheet:1", "Sheet[1]", "a?b", "a*b", "a\\b", " lead", "trail ", "tab\there"] {
            assert!(
                matches!(wb.create_sheet(name, false), Err(Error::InvalidSheetName(_))),
                "{:?} should be rejected",
                name
            );
        }

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.create_sheet(&long_name, false).is_err());
        let max_name = "A".repeat(MAX_SHEET_NAME_LEN);
        assert!(wb.create_sheet(&max_name, false).is_ok());
        // Length counts characters, not bytes
        assert!(wb.create_sheet(&"é".repeat(MAX_SHEET_NAME_LEN), false).is_ok());
    }

    #[test]
    fn test_rename_and_remove() {
        let mut wb = Workbook::new();
        wb.create_sheet("One", false).unwrap();
        wb.create_sheet("Two", false).unwrap();

        assert!(matches!(wb.rename_sheet("One", "Two"), Err(Error::DuplicateSheetName(_))));
        assert_eq!(wb.sheet_names(), vec!["One", "Two"]);

        wb.rename_sheet("One", "Uno").unwrap();
        wb.rename_sheet("Uno", "Uno").unwrap();
        assert_eq!(wb.sheet_names(), vec!["Uno", "Two"]);
        assert!(matches!(wb.rename_sheet("One", "X"), Err(Error::SheetNotFound(_))));

        let removed = wb.remove_sheet("Uno").unwrap();
        assert_eq!(removed.name(), "Uno");
        assert!(matches!(wb.remove_sheet("Uno"), Err(Error::SheetNotFound(_))));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_helpers_report_errors() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();

        assert!(matches!(wb.write_cell("Nope", "A1", 1), Err(Error::SheetNotFound(_))));
        assert!(matches!(wb.read_cell("Data", "A0"), Err(Error::InvalidReference(_))));
        assert!(matches!(
            wb.apply_named_style("Data", "A1", "missing"),
            Err(Error::StyleNotFound(_))
        ));
        assert!(matches!(wb.format_cells("Data", "A1:", &StylePatch::new()), Err(_)));
    }

    #[test]
    fn test_read_write_helpers() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();

        wb.write_cell("Data", "c5", 12.5).unwrap();
        assert_eq!(wb.read_cell_at("Data", 5, 3).unwrap(), CellValue::Number(12.5));
        assert!(matches!(
            wb.write_cell("Data", " C6 ", 1.0),
            Err(Error::InvalidReference(_))
        ));
        assert!(matches!(
            wb.format_cells("Data", " A1:B2", &StylePatch::new()),
            Err(Error::InvalidRange(_) | Error::InvalidReference(_))
        ));
        assert_eq!(wb.read_cell_at("Data", 6, 3).unwrap(), CellValue::Empty);

        wb.write_row("Data", 1, ["Name", "Qty"]).unwrap();
        wb.write_column("Data", "A", ["Name", "Pen", "Ink"]).unwrap();
        wb.write_column_at("Data", 2, ["Qty", "4"]).unwrap();

        let pairs = wb.read_column_pairs("Data", 1, 2).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1], (CellValue::from("Pen"), CellValue::from("4")));
        assert_eq!(pairs[2].1, CellValue::Empty);
    }

    #[test]
    fn test_style_layering_and_shared_updates() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();
        wb.define_style(
            "bold_red",
            StylePatch::new()
                .with_font(FontStyle::new().with_bold(true))
                .with_fill(FillStyle::solid(Color::RED)),
        )
        .unwrap();

        wb.apply_named_style_to_range("Data", "A1:A2", "bold_red").unwrap();
        wb.format_cells(
            "Data",
            "A1",
            &StylePatch::new().with_fill(FillStyle::solid(Color::YELLOW)),
        )
        .unwrap();

        let a1 = wb.effective_style("Data", "A1").unwrap();
        assert!(a1.font.bold);
        assert_eq!(a1.fill, FillStyle::solid(Color::YELLOW));

        // Redefining the style reaches every referencing cell
        wb.define_style("bold_red", StylePatch::new().with_fill(FillStyle::solid(Color::BLUE)))
            .unwrap();
        let a2 = wb.effective_style("Data", "A2").unwrap();
        assert!(!a2.font.bold);
        assert_eq!(a2.fill, FillStyle::solid(Color::BLUE));
        assert_eq!(
            wb.effective_style("Data", "A1").unwrap().fill,
            FillStyle::solid(Color::YELLOW)
        );
    }

    #[test]
    fn test_strict_redefinition_from_settings() {
        let mut wb = Workbook::with_settings(WorkbookSettings {
            style_redefinition: RedefinitionMode::Strict,
            ..WorkbookSettings::default()
        });
        wb.define_style("title", StylePatch::new()).unwrap();
        assert!(matches!(
            wb.define_style("title", StylePatch::new()),
            Err(Error::DuplicateStyleRedefinition(_))
        ));
        wb.define_style_with_mode("title", StylePatch::new(), RedefinitionMode::Replace)
            .unwrap();
    }

    #[test]
    fn test_redefinition_mode_follows_settings_changes() {
        let mut wb = Workbook::new();
        wb.define_style("title", StylePatch::new()).unwrap();

        wb.settings_mut().style_redefinition = RedefinitionMode::Strict;
        assert!(matches!(
            wb.define_style("title", StylePatch::new().with_fill(FillStyle::solid(Color::RED))),
            Err(Error::DuplicateStyleRedefinition(_))
        ));
        assert!(wb.styles().get_by_name("title").unwrap().patch.is_empty());

        wb.settings_mut().style_redefinition = RedefinitionMode::Replace;
        wb.define_style("title", StylePatch::new().with_fill(FillStyle::solid(Color::RED)))
            .unwrap();
        assert!(!wb.styles().get_by_name("title").unwrap().patch.is_empty());
    }

    #[test]
    fn test_conditional_first_rule_wins() {
        let wb = yes_no_workbook();

        let s3 = wb.evaluate_conditional("Report", "S3").unwrap().unwrap();
        assert_eq!(s3.fill, Some(FillStyle::solid(Color::GREEN)));
        let s4 = wb.evaluate_conditional("Report", "S4").unwrap().unwrap();
        assert_eq!(s4.fill, Some(FillStyle::solid(Color::RED)));
        // Quoted operands are case-sensitive
        assert!(wb.evaluate_conditional("Report", "S5").unwrap().is_none());
        // Outside the range
        assert!(wb.evaluate_conditional("Report", "S70").unwrap().is_none());

        // Stored style is untouched; display style carries the override
        assert_eq!(wb.effective_style("Report", "S3").unwrap().fill, FillStyle::None);
        assert_eq!(
            wb.display_style("Report", "S3").unwrap().fill,
            FillStyle::solid(Color::GREEN)
        );
    }

    #[test]
    fn test_conditional_policy_switch() {
        let mut wb = yes_no_workbook();
        let always_blue = ConditionalFormatRule::cell_is(CfOperator::NotEqual, "\"zzz\"")
            .with_fill(FillStyle::solid(Color::BLUE));
        wb.add_conditional_format("Report", "S3", always_blue).unwrap();

        wb.settings_mut().rule_priority = RulePriority::LastAdded;
        let s3 = wb.evaluate_conditional("Report", "S3").unwrap().unwrap();
        assert_eq!(s3.fill, Some(FillStyle::solid(Color::BLUE)));
    }

    #[test]
    fn test_scan_extent_uses_configured_window() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();
        wb.write_cell_at("Data", 5, 3, 1).unwrap();
        wb.write_cell_at("Data", 4, 50, 2).unwrap();

        let report = wb.scan_extent("Data").unwrap();
        assert_eq!((report.last_row, report.last_col, report.clean), (5, 3, false));

        wb.settings_mut().extent_window = 46;
        assert!(wb.scan_extent("Data").unwrap().clean);
    }

    #[test]
    fn test_layout_helpers() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data", false).unwrap();
        wb.set_column_width("Data", "C", 20.0).unwrap();
        wb.set_freeze_panes("Data", "G2").unwrap();
        wb.set_auto_filter("Data", "A2:W2").unwrap();

        let ws = wb.require_sheet("Data").unwrap();
        assert!((ws.column_width(3) - 20.0).abs() < 0.001);
        assert_eq!(ws.freeze_panes().unwrap().cols(), 6);
        assert_eq!(ws.auto_filter(), Some(CellRange::parse("A2:W2").unwrap()));
    }

    #[test]
    fn test_workbook_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Workbook>();
    }
}
