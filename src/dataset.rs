//! In-memory table of marks as loaded from a spreadsheet.

use serde::Serialize;
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Best-effort numeric coercion. Unparseable and non-finite values are missing.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Missing)
    }
}

/// A named column holding one cell per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Coerces every cell to a number, keeping row positions.
    pub fn coerce_numeric(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::to_number).collect()
    }
}

/// Ordered columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    /// Builds a dataset, padding short columns with [`Cell::Missing`].
    pub fn new(mut columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(rows, Cell::Missing);
        }
        Self { columns }
    }

    /// Builds a dataset from a header row and row-major records.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let name = if name.trim().is_empty() {
                    format!("Unnamed: {idx}")
                } else {
                    name.trim().to_string()
                };
                Column::new(name, Vec::with_capacity(rows.len()))
            })
            .collect();

        for row in rows {
            let mut row = row.into_iter();
            for column in &mut columns {
                column.cells.push(row.next().unwrap_or(Cell::Missing));
            }
        }

        Self { columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Returns one row as a vector of cell references.
    pub fn row(&self, row: usize) -> Vec<&Cell> {
        self.columns
            .iter()
            .map(|c| c.cells.get(row).unwrap_or(&Cell::Missing))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_to_number_parses_trimmed_text() {
        assert_eq!(text(" 85 ").to_number(), Some(85.0));
        assert_eq!(text("72.5").to_number(), Some(72.5));
        assert_eq!(Cell::Number(40.0).to_number(), Some(40.0));
    }

    #[test]
    fn test_to_number_rejects_non_numeric() {
        assert_eq!(text("absent").to_number(), None);
        assert_eq!(text("").to_number(), None);
        assert_eq!(Cell::Missing.to_number(), None);
        assert_eq!(text("inf").to_number(), None);
        assert_eq!(Cell::Number(f64::NAN).to_number(), None);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let ds = Dataset::from_rows(
            vec!["Name".into(), "Math".into()],
            vec![vec![text("A"), text("90")], vec![text("B")]],
        );

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.cell(1, 1), Some(&Cell::Missing));
    }

    #[test]
    fn test_from_rows_names_blank_headers() {
        let ds = Dataset::from_rows(vec!["Name".into(), " ".into()], vec![]);
        assert_eq!(ds.headers(), vec!["Name", "Unnamed: 1"]);
    }

    #[test]
    fn test_new_pads_columns_to_equal_length() {
        let ds = Dataset::new(vec![
            Column::new("Name", vec![text("A"), text("B")]),
            Column::new("Math", vec![Cell::Number(50.0)]),
        ]);

        assert_eq!(ds.columns[1].cells.len(), 2);
        assert!(ds.columns[1].cells[1].is_missing());
    }
}
