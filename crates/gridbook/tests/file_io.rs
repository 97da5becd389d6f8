//! Path-based open/save through `WorkbookExt`

use gridbook::prelude::*;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");

    let mut wb = Workbook::new();
    wb.create_sheet("Data", false).unwrap();
    wb.write_cell("Data", "A1", "Hello").unwrap();
    wb.write_cell("Data", "B1", 42.0).unwrap();
    wb.write_cell("Data", "C1", true).unwrap();
    wb.save(&path).unwrap();

    let opened = Workbook::open(&path).unwrap();
    assert_eq!(opened.sheet_names(), vec!["Data"]);
    assert_eq!(opened.read_cell("Data", "A1").unwrap(), CellValue::from("Hello"));
    assert_eq!(opened.read_cell("Data", "B1").unwrap(), CellValue::Number(42.0));
    assert_eq!(opened.read_cell("Data", "C1").unwrap(), CellValue::Boolean(true));
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Workbook::open(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_open_corrupt_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"format":"gridbook","version":1,"sheets":[{"name":"a/b"}]}"#)
        .unwrap();

    let err = Workbook::open(file.path()).unwrap_err();
    assert!(matches!(err, Error::DocumentCorrupt(_)));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let wb = Workbook::new();
    let err = wb.save(dir.path().join("no/such/dir/book.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_overwrite_existing_file() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut wb = Workbook::new();
    wb.create_sheet("One", false).unwrap();
    wb.save(file.path()).unwrap();

    wb.create_sheet("Two", false).unwrap();
    wb.save(file.path()).unwrap();

    assert_eq!(Workbook::open(file.path()).unwrap().sheet_count(), 2);
}
