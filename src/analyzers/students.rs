use crate::analyzers::types::StudentRecord;
use crate::classify::Classification;
use crate::dataset::{Cell, Column, Dataset};

pub const TOTAL_COLUMN: &str = "Total";
pub const PERCENTAGE_COLUMN: &str = "Percentage";
pub const GRADE_COLUMN: &str = "Grade";

/// Derives one [`StudentRecord`] per row.
pub fn build_records(dataset: &Dataset, classification: &Classification) -> Vec<StudentRecord> {
    (0..dataset.row_count())
        .map(|row| {
            let name = dataset
                .cell(classification.name, row)
                .map(Cell::to_string)
                .unwrap_or_default();

            let identifier = classification
                .identifier
                .and_then(|col| dataset.cell(col, row))
                .filter(|c| !c.is_missing())
                .map(Cell::to_string);

            let scores = classification
                .subjects
                .iter()
                .map(|s| s.scores.get(row).copied().flatten())
                .collect();

            StudentRecord::from_scores(row, name, identifier, scores)
        })
        .collect()
}

/// Input table with subject columns replaced by their coerced values and
/// Total, Percentage and Grade appended.
pub fn augmented_table(
    dataset: &Dataset,
    classification: &Classification,
    records: &[StudentRecord],
) -> Dataset {
    let mut columns = dataset.columns.clone();

    for subject in &classification.subjects {
        if let Some(column) = columns.get_mut(subject.index) {
            column.cells = subject.scores.iter().map(|v| Cell::from(*v)).collect();
        }
    }

    columns.push(Column::new(
        TOTAL_COLUMN,
        records.iter().map(|r| Cell::Number(r.total)).collect(),
    ));
    columns.push(Column::new(
        PERCENTAGE_COLUMN,
        records.iter().map(|r| Cell::Number(r.percentage)).collect(),
    ));
    columns.push(Column::new(
        GRADE_COLUMN,
        records
            .iter()
            .map(|r| Cell::Text(r.grade.to_string()))
            .collect(),
    ));

    Dataset::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::Grade;
    use crate::classify::classify;

    fn text_column(name: &str, values: &[&str]) -> Column {
        Column::new(
            name,
            values.iter().map(|v| Cell::Text(v.to_string())).collect(),
        )
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            text_column("Roll No", &["1", "2", "3"]),
            text_column("Name", &["A", "B", "C"]),
            text_column("Math", &["95", "40", "60"]),
            text_column("Sci", &["85", "30", "absent"]),
        ])
    }

    #[test]
    fn test_build_records() {
        let ds = sample();
        let c = classify(&ds).unwrap();

        let records = build_records(&ds, &c);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].identifier.as_deref(), Some("1"));
        assert_eq!(records[0].total, 180.0);
        assert_eq!(records[0].grade, Grade::A);
        assert_eq!(records[2].scores, vec![Some(60.0), None]);
        assert_eq!(records[2].total, 60.0);
        assert_eq!(records[2].percentage, 30.0);
    }

    #[test]
    fn test_blank_identifier_is_none() {
        let mut ds = Dataset::new(vec![
            text_column("Roll No", &["1", "2"]),
            text_column("Name", &["A", "B"]),
            text_column("Math", &["95", "40"]),
        ]);
        ds.columns[0].cells[1] = Cell::Missing;
        let c = classify(&ds).unwrap();

        let records = build_records(&ds, &c);

        assert_eq!(records[1].identifier, None);
    }

    #[test]
    fn test_augmented_table_appends_columns() {
        let ds = sample();
        let c = classify(&ds).unwrap();
        let records = build_records(&ds, &c);

        let table = augmented_table(&ds, &c, &records);

        assert_eq!(
            table.headers(),
            vec!["Roll No", "Name", "Math", "Sci", "Total", "Percentage", "Grade"]
        );
        assert_eq!(table.cell(3, 2), Some(&Cell::Missing));
        assert_eq!(table.cell(2, 0), Some(&Cell::Number(95.0)));
        assert_eq!(table.cell(6, 0), Some(&Cell::Text("A".into())));
    }
}
