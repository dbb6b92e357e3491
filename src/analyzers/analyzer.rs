use chrono::Utc;
use std::path::Path;
use tracing::info;

use crate::analyzers::aggregate::{all_subject_stats, class_average, grade_distribution, top_score};
use crate::analyzers::ranking::rank;
use crate::analyzers::students::{augmented_table, build_records};
use crate::analyzers::types::{AnalysisReport, ReportSummary};
use crate::charts::{ChartRenderer, PlottersRenderer, render_charts};
use crate::classify::classify;
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::loader::load_dataset;

/// Loads a marks file and runs the full analysis, drawing charts with
/// [`PlottersRenderer`].
pub fn analyze_file(path: &str, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let dataset = load_dataset(path)?;
    let source = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);
    analyze(&dataset, source, config, &PlottersRenderer::default())
}

/// Classifies the columns of `dataset`, derives every metric and renders
/// both charts into `config.chart_dir`.
///
/// Either the whole report is returned or an error; nothing is returned
/// for a partially analysed dataset.
#[tracing::instrument(skip(dataset, config, renderer), fields(rows = dataset.row_count()))]
pub fn analyze(
    dataset: &Dataset,
    source: &str,
    config: &AnalysisConfig,
    renderer: &dyn ChartRenderer,
) -> Result<AnalysisReport> {
    if dataset.row_count() == 0 {
        return Err(AnalysisError::EmptyDataset);
    }

    let classification = classify(dataset)?;

    let students = build_records(dataset, &classification);
    let subject_stats = all_subject_stats(&classification.subjects);
    let distribution = grade_distribution(&students);
    let rankings = rank(&students, config.ranking_size);

    let charts = render_charts(renderer, &config.chart_dir, &subject_stats, &distribution)?;

    let summary = ReportSummary {
        source: source.to_string(),
        total_students: students.len(),
        name_column: dataset.columns[classification.name].name.clone(),
        identifier_column: classification
            .identifier
            .map(|i| dataset.columns[i].name.clone()),
        subjects_found: classification
            .subject_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        class_average: class_average(&students),
        top_score: top_score(&students),
        generated_at: Utc::now(),
    };

    info!(
        students = summary.total_students,
        subjects = summary.subjects_found.len(),
        class_average = summary.class_average,
        "Analysis complete"
    );

    let table = augmented_table(dataset, &classification, &students);

    Ok(AnalysisReport {
        summary,
        subject_stats,
        grade_distribution: distribution,
        rankings,
        charts,
        students,
        table,
    })
}
