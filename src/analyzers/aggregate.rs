use crate::analyzers::types::{GradeDistribution, StudentRecord, SubjectStats};
use crate::analyzers::utility::{max, mean, min, pct, present};
use crate::classify::SubjectColumn;

/// Minimum mark that counts as a pass in a single subject.
pub const PASS_MARK: f64 = 40.0;

/// Computes mean, max, min and pass rate for one subject.
///
/// Missing values are excluded from every figure, including the pass-rate
/// denominator. A subject with no numeric values has no statistics.
pub fn subject_stats(subject: &SubjectColumn) -> SubjectStats {
    let values = present(&subject.scores);

    if values.is_empty() {
        return SubjectStats {
            subject: subject.name.clone(),
            average: None,
            highest: None,
            lowest: None,
            pass_rate: None,
            scored: 0,
        };
    }

    let passed = values.iter().filter(|v| **v >= PASS_MARK).count();

    SubjectStats {
        subject: subject.name.clone(),
        average: Some(mean(&values)),
        highest: max(&values),
        lowest: min(&values),
        pass_rate: Some(pct(passed, values.len())),
        scored: values.len(),
    }
}

/// Statistics for every subject, in column order.
pub fn all_subject_stats(subjects: &[SubjectColumn]) -> Vec<SubjectStats> {
    subjects.iter().map(subject_stats).collect()
}

/// Counts students per grade.
pub fn grade_distribution(records: &[StudentRecord]) -> GradeDistribution {
    let mut counts = GradeDistribution::new();
    for record in records {
        *counts.entry(record.grade).or_insert(0) += 1;
    }
    counts
}

/// Mean percentage across all students.
pub fn class_average(records: &[StudentRecord]) -> f64 {
    let percentages: Vec<f64> = records.iter().map(|r| r.percentage).collect();
    mean(&percentages)
}

/// Highest total, or 0.0 for an empty class.
pub fn top_score(records: &[StudentRecord]) -> f64 {
    let totals: Vec<f64> = records.iter().map(|r| r.total).collect();
    max(&totals).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::Grade;

    fn subject(scores: Vec<Option<f64>>) -> SubjectColumn {
        SubjectColumn {
            index: 1,
            name: "Math".into(),
            scores,
        }
    }

    fn record(row: usize, scores: Vec<Option<f64>>) -> StudentRecord {
        StudentRecord::from_scores(row, format!("S{row}"), None, scores)
    }

    #[test]
    fn test_pass_rate_excludes_missing() {
        let stats = subject_stats(&subject(vec![Some(30.0), Some(40.0), Some(100.0), None]));

        let rate = stats.pass_rate.unwrap();
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.scored, 3);
    }

    #[test]
    fn test_subject_stats_values() {
        let stats = subject_stats(&subject(vec![Some(95.0), Some(40.0), Some(60.0)]));

        assert_eq!(stats.average, Some(65.0));
        assert_eq!(stats.highest, Some(95.0));
        assert_eq!(stats.lowest, Some(40.0));
        assert_eq!(stats.pass_rate, Some(100.0));
    }

    #[test]
    fn test_subject_without_values() {
        let stats = subject_stats(&subject(vec![None, None]));

        assert_eq!(stats.average, None);
        assert_eq!(stats.pass_rate, None);
        assert_eq!(stats.scored, 0);
    }

    #[test]
    fn test_grade_distribution_only_present_letters() {
        let records = vec![
            record(0, vec![Some(95.0)]),
            record(1, vec![Some(10.0)]),
            record(2, vec![Some(92.0)]),
        ];

        let dist = grade_distribution(&records);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[&Grade::A], 2);
        assert_eq!(dist[&Grade::F], 1);
        assert!(!dist.contains_key(&Grade::B));
    }

    #[test]
    fn test_class_average_and_top_score() {
        let records = vec![record(0, vec![Some(80.0)]), record(1, vec![Some(60.0)])];

        assert_eq!(class_average(&records), 70.0);
        assert_eq!(top_score(&records), 80.0);
        assert_eq!(top_score(&[]), 0.0);
    }
}
