//! Chart rendering for subject averages and grade distribution.
//!
//! [`ChartRenderer`] is the seam to the image backend; [`PlottersRenderer`]
//! draws PNGs with `plotters`. File names inside the chart directory are
//! fixed, so a rerun overwrites the previous images.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::element::Pie;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::analyzers::grade::Grade;
use crate::analyzers::types::{ChartPaths, GradeDistribution, SubjectStats};
use crate::error::{AnalysisError, Result};

pub const SUBJECT_AVERAGES_FILE: &str = "subject_avg.png";
pub const GRADE_DISTRIBUTION_FILE: &str = "grade_pie.png";

const BAR_COLORS: [RGBColor; 3] = [
    RGBColor(0xff, 0x6b, 0x6b),
    RGBColor(0x4e, 0xcd, 0xc4),
    RGBColor(0x45, 0xb7, 0xd1),
];

/// Draws the two report charts.
pub trait ChartRenderer {
    /// Bar chart of per-subject averages on a 0–100 axis.
    fn subject_averages(&self, stats: &[SubjectStats], path: &Path) -> Result<()>;

    /// Pie chart of grade counts with percentage labels.
    fn grade_distribution(&self, distribution: &GradeDistribution, path: &Path) -> Result<()>;
}

/// Deterministic chart locations inside `chart_dir`.
pub fn chart_paths(chart_dir: &Path) -> ChartPaths {
    ChartPaths {
        subject_averages: chart_dir.join(SUBJECT_AVERAGES_FILE),
        grade_distribution: chart_dir.join(GRADE_DISTRIBUTION_FILE),
    }
}

/// Renders both charts into `chart_dir`, creating it if needed.
#[tracing::instrument(skip_all, fields(chart_dir = %chart_dir.display()))]
pub fn render_charts(
    renderer: &dyn ChartRenderer,
    chart_dir: &Path,
    stats: &[SubjectStats],
    distribution: &GradeDistribution,
) -> Result<ChartPaths> {
    std::fs::create_dir_all(chart_dir)?;

    let paths = chart_paths(chart_dir);
    renderer.subject_averages(stats, &paths.subject_averages)?;
    renderer.grade_distribution(distribution, &paths.grade_distribution)?;

    info!(
        subject_averages = %paths.subject_averages.display(),
        grade_distribution = %paths.grade_distribution.display(),
        "Charts rendered"
    );
    Ok(paths)
}

/// Bar heights per subject: missing averages draw as zero, all clamped to 0–100.
pub fn bar_values(stats: &[SubjectStats]) -> Vec<(String, f64)> {
    stats
        .iter()
        .map(|s| (s.subject.clone(), s.average.unwrap_or(0.0).clamp(0.0, 100.0)))
        .collect()
}

/// Pie slices in grade order, skipping empty grades.
pub fn pie_slices(distribution: &GradeDistribution) -> Vec<(Grade, f64)> {
    distribution
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(grade, count)| (*grade, *count as f64))
        .collect()
}

fn grade_color(grade: Grade) -> RGBColor {
    match grade {
        Grade::A => RGBColor(0x4c, 0xaf, 0x50),
        Grade::B => RGBColor(0x8b, 0xc3, 0x4a),
        Grade::C => RGBColor(0xff, 0xc1, 0x07),
        Grade::D => RGBColor(0xff, 0x98, 0x00),
        Grade::F => RGBColor(0xf4, 0x43, 0x36),
    }
}

fn render_err(e: impl Display) -> AnalysisError {
    AnalysisError::ChartRender(e.to_string())
}

/// PNG renderer backed by `plotters`' bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub bar_size: (u32, u32),
    pub pie_size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            bar_size: (1000, 600),
            pie_size: (800, 800),
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn subject_averages(&self, stats: &[SubjectStats], path: &Path) -> Result<()> {
        let bars = bar_values(stats);
        debug!(path = %path.display(), subjects = bars.len(), "Drawing subject averages");

        let root = BitMapBackend::new(path, self.bar_size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Subject-wise Average Marks", ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0usize..bars.len()).into_segmented(), 0f64..100f64)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Average Marks (%)")
            .x_desc("Subjects")
            .x_labels(bars.len().max(1))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => bars.get(*i).map(|(n, _)| n.clone()).unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, (_, avg))| {
                let color = BAR_COLORS[i % BAR_COLORS.len()];
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *avg)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 10, 10);
                bar
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn grade_distribution(&self, distribution: &GradeDistribution, path: &Path) -> Result<()> {
        let slices = pie_slices(distribution);
        debug!(path = %path.display(), slices = slices.len(), "Drawing grade distribution");

        let root = BitMapBackend::new(path, self.pie_size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let area = root
            .titled("Grade Distribution", ("sans-serif", 32))
            .map_err(render_err)?;

        if !slices.is_empty() {
            let (w, h) = area.dim_in_pixel();
            let center = (w as i32 / 2, h as i32 / 2);
            let radius = f64::from(w.min(h)) * 0.35;

            let sizes: Vec<f64> = slices.iter().map(|(_, n)| *n).collect();
            let colors: Vec<RGBColor> = slices.iter().map(|(g, _)| grade_color(*g)).collect();
            let labels: Vec<String> = slices.iter().map(|(g, _)| g.to_string()).collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(90.0);
            pie.label_style(("sans-serif", 28).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 22).into_font().color(&BLACK));
            area.draw(&pie).map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

/// Chart path relative to `base`, for embedding in a report next to the charts.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
