//! Data types produced by the metrics pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::analyzers::grade::{Grade, grade};
use crate::dataset::Dataset;

/// Derived marks for a single row of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    /// 0-based row index in the input.
    pub row: usize,
    pub name: String,
    pub identifier: Option<String>,
    /// One entry per subject column; `None` marks a missing or non-numeric value.
    pub scores: Vec<Option<f64>>,
    pub total: f64,
    pub percentage: f64,
    pub grade: Grade,
}

impl StudentRecord {
    /// Builds a record, deriving total, percentage and grade from `scores`.
    ///
    /// The percentage denominator is the number of subject columns, so a
    /// missing score counts against the student.
    pub fn from_scores(
        row: usize,
        name: String,
        identifier: Option<String>,
        scores: Vec<Option<f64>>,
    ) -> Self {
        let total: f64 = scores.iter().flatten().sum();
        let percentage = percentage(total, scores.len());
        Self {
            row,
            name,
            identifier,
            scores,
            total,
            percentage,
            grade: grade(percentage),
        }
    }

    /// Name prefixed with the identifier in parentheses, if there is one.
    pub fn display_name(&self) -> String {
        match &self.identifier {
            Some(id) => format!("({id}) {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// `total / (subject_count * 100) * 100`. Zero subjects yields 0.0.
pub fn percentage(total: f64, subject_count: usize) -> f64 {
    if subject_count == 0 {
        return 0.0;
    }
    total / (subject_count as f64 * 100.0) * 100.0
}

/// Aggregate statistics for one subject column over its non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub subject: String,
    pub average: Option<f64>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    /// Percentage (0–100) of scored values at or above the pass mark.
    pub pass_rate: Option<f64>,
    /// Number of non-missing values.
    pub scored: usize,
}

/// Counts per grade letter; only letters that occur are present.
pub type GradeDistribution = BTreeMap<Grade, usize>;

/// Best and worst students by total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rankings {
    pub top: Vec<StudentRecord>,
    pub bottom: Vec<StudentRecord>,
}

/// Locations of the rendered chart images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPaths {
    pub subject_averages: PathBuf,
    pub grade_distribution: PathBuf,
}

/// Headline figures for the whole class.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub source: String,
    pub total_students: usize,
    pub name_column: String,
    pub identifier_column: Option<String>,
    pub subjects_found: Vec<String>,
    /// Mean percentage across all students.
    pub class_average: f64,
    /// Highest total.
    pub top_score: f64,
    pub generated_at: DateTime<Utc>,
}

/// Complete analysis result handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub subject_stats: Vec<SubjectStats>,
    pub grade_distribution: GradeDistribution,
    pub rankings: Rankings,
    pub charts: ChartPaths,
    pub students: Vec<StudentRecord>,
    /// Input columns (subjects coerced) plus Total, Percentage and Grade.
    pub table: Dataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_formula() {
        assert_eq!(percentage(180.0, 2), 90.0);
        assert_eq!(percentage(125.0, 2), 62.5);
        assert_eq!(percentage(0.0, 0), 0.0);
    }

    #[test]
    fn test_from_scores_sums_available_values() {
        let record = StudentRecord::from_scores(
            0,
            "Asha".into(),
            None,
            vec![Some(80.0), None, Some(70.0)],
        );

        assert_eq!(record.total, 150.0);
        assert_eq!(record.percentage, 50.0);
        assert_eq!(record.grade, Grade::D);
    }

    #[test]
    fn test_all_missing_scores_total_zero() {
        let record = StudentRecord::from_scores(0, "Ben".into(), None, vec![None, None]);
        assert_eq!(record.total, 0.0);
        assert_eq!(record.grade, Grade::F);
    }

    #[test]
    fn test_display_name() {
        let with_id = StudentRecord::from_scores(0, "Asha".into(), Some("7".into()), vec![]);
        let without = StudentRecord::from_scores(1, "Ben".into(), None, vec![]);

        assert_eq!(with_id.display_name(), "(7) Asha");
        assert_eq!(without.display_name(), "Ben");
    }
}
