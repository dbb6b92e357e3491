//! Spreadsheet loading for CSV and Excel workbooks.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::dataset::{Cell, Dataset};
use crate::error::{AnalysisError, Result};

/// File extensions accepted by [`load_dataset`].
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Returns `true` if the file name carries a supported extension.
pub fn allowed_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Reads a `.csv`, `.xls` or `.xlsx` file fully into memory.
///
/// The first row is the header. Only the first sheet of a workbook is read.
///
/// # Errors
///
/// Returns [`AnalysisError::UnreadableFile`] for unsupported extensions and
/// for files that cannot be opened or parsed.
#[tracing::instrument]
pub fn load_dataset(path: &str) -> Result<Dataset> {
    let dataset = match extension(path).as_deref() {
        Some("csv") => {
            let bytes = std::fs::read(path).map_err(|e| AnalysisError::unreadable(path, e))?;
            parse_csv(path, &bytes)?
        }
        Some("xls") | Some("xlsx") => load_excel(path)?,
        Some(ext) => {
            return Err(AnalysisError::unreadable(
                path,
                format!("unsupported file format: .{ext}"),
            ));
        }
        None => return Err(AnalysisError::unreadable(path, "missing file extension")),
    };

    debug!(
        columns = ?dataset.headers(),
        rows = dataset.row_count(),
        "Dataset loaded"
    );
    for row in 0..dataset.row_count().min(3) {
        let cells: Vec<String> = dataset.row(row).iter().map(|c| c.to_string()).collect();
        debug!(row, ?cells, "Preview row");
    }

    Ok(dataset)
}

/// Parses CSV bytes into a [`Dataset`]. Non-UTF-8 input is decoded as Latin-1.
///
/// Rows shorter than the header are padded with missing cells. A row with
/// more fields than the header is an [`AnalysisError::UnreadableFile`];
/// `path` only labels the error.
pub fn parse_csv(path: &str, bytes: &[u8]) -> Result<Dataset> {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::unreadable(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AnalysisError::unreadable(path, e))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(AnalysisError::unreadable(
                path,
                format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(Dataset::from_rows(headers, rows))
}

fn text_cell(raw: &str) -> Cell {
    if raw.trim().is_empty() {
        Cell::Missing
    } else {
        Cell::Text(raw.to_string())
    }
}

fn load_excel(path: &str) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AnalysisError::unreadable(path, e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AnalysisError::unreadable(path, "no sheets found"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AnalysisError::unreadable(path, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| excel_cell(c).to_string()).collect(),
        None => return Err(AnalysisError::unreadable(path, "sheet is empty")),
    };

    let data_rows = rows.map(|row| row.iter().map(excel_cell).collect()).collect();

    Ok(Dataset::from_rows(headers, data_rows))
}

fn excel_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Missing,
        Data::String(s) => text_cell(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(
            dt.as_datetime()
                .filter(|_| dt.is_datetime())
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| dt.to_string()),
        ),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("marks.csv"));
        assert!(allowed_file("marks.XLSX"));
        assert!(allowed_file("dir/marks.xls"));
        assert!(!allowed_file("marks.txt"));
        assert!(!allowed_file("marks"));
    }

    #[test]
    fn test_parse_csv_basic() {
        let ds = parse_csv("marks.csv", b"Name,Math\nA,95\nB,\n").unwrap();

        assert_eq!(ds.headers(), vec!["Name", "Math"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.cell(1, 0), Some(&Cell::Text("95".into())));
        assert_eq!(ds.cell(1, 1), Some(&Cell::Missing));
    }

    #[test]
    fn test_parse_csv_latin1_fallback() {
        let ds = parse_csv("marks.csv", b"Name,Math\nJos\xe9,70\n").unwrap();
        assert_eq!(ds.cell(0, 0), Some(&Cell::Text("José".into())));
    }

    #[test]
    fn test_parse_csv_header_only_has_no_rows() {
        let ds = parse_csv("marks.csv", b"Name,Math\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn test_parse_csv_pads_short_rows() {
        let ds = parse_csv("marks.csv", b"Name,Math,Sci\nA,95\nB,40,30\n").unwrap();

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.cell(2, 0), Some(&Cell::Missing));
        assert_eq!(ds.cell(2, 1), Some(&Cell::Text("30".into())));
    }

    #[test]
    fn test_parse_csv_rejects_long_rows() {
        let err = parse_csv("marks.csv", b"Name,Math,Sci\nA,95,85,77\nB,40,30\n").unwrap_err();

        match err {
            AnalysisError::UnreadableFile { path, reason } => {
                assert_eq!(path, "marks.csv");
                assert!(reason.contains("line 2"), "{reason}");
                assert!(reason.contains("found 4"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_excel_cell_numbers() {
        assert_eq!(excel_cell(&Data::Float(92.5)), Cell::Number(92.5));
        assert_eq!(excel_cell(&Data::Int(40)), Cell::Number(40.0));
    }

    #[test]
    fn test_excel_cell_text_and_empty() {
        assert_eq!(excel_cell(&Data::String("Asha".into())), Cell::Text("Asha".into()));
        assert_eq!(excel_cell(&Data::String("  ".into())), Cell::Missing);
        assert_eq!(excel_cell(&Data::Empty), Cell::Missing);
    }

    #[test]
    fn test_excel_cell_other_values_are_text() {
        assert_eq!(excel_cell(&Data::Bool(true)), Cell::Text("true".into()));
        assert_eq!(
            excel_cell(&Data::DateTimeIso("2024-06-01T00:00:00".into())),
            Cell::Text("2024-06-01T00:00:00".into())
        );
        assert_eq!(
            excel_cell(&Data::DurationIso("PT1H".into())),
            Cell::Text("PT1H".into())
        );
        assert_eq!(
            excel_cell(&Data::Error(CellErrorType::Div0)),
            Cell::Text("#DIV/0!".into())
        );
    }

    #[test]
    fn test_excel_cell_dates_are_text() {
        let date = ExcelDateTime::new(45444.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            excel_cell(&Data::DateTime(date)),
            Cell::Text("2024-06-01 00:00:00".into())
        );

        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(
            excel_cell(&Data::DateTime(duration)),
            Cell::Text("1.5".into())
        );
    }

    #[test]
    fn test_load_dataset_rejects_unknown_extension() {
        let err = load_dataset("marks.txt").unwrap_err();
        assert!(matches!(err, AnalysisError::UnreadableFile { .. }));
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(&temp_path("eduinsight_does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::UnreadableFile { .. }));
    }

    #[test]
    fn test_load_dataset_reads_csv_file() {
        let path = temp_path("eduinsight_loader_test.csv");
        fs::write(&path, "Roll No,Name,Math\n1,A,80\n2,B,60\n").unwrap();

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.row_count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
