//! Standalone HTML rendering of an [`AnalysisReport`].

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::analyzers::types::{AnalysisReport, StudentRecord, SubjectStats};
use crate::charts::relative_to;
use crate::error::Result;

const STYLE: &str = "body{font-family:sans-serif;background:#f4f6fb;margin:0;padding:20px}\
.report{max-width:1200px;margin:auto;background:#fff;border-radius:12px;padding:24px}\
.cards{display:flex;flex-wrap:wrap;gap:12px}\
.card{flex:1 1 220px;border-radius:10px;padding:14px;background:#eef3ff}\
table{border-collapse:collapse;width:100%}\
td,th{border:1px solid #ccc;padding:4px 8px;text-align:left}\
img{max-height:300px}";

/// Escapes text for safe inclusion in HTML element content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_opt(value: Option<f64>, precision: usize, suffix: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}{suffix}"))
}

fn fmt_mark(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

/// Renders the report as a complete HTML page.
///
/// Chart image links are made relative to `html_dir`, the directory the page
/// will be written to, when the charts live beneath it.
pub fn render_html(report: &AnalysisReport, html_dir: &Path) -> String {
    let summary = &report.summary;
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <title>EduInsight Report</title><style>{STYLE}</style></head><body>\
         <div class=\"report\"><h1>EduInsight Analytics Report</h1>\
         <p>{} | {} Students</p>",
        escape(&summary.source),
        summary.total_students
    );

    let _ = write!(
        html,
        "<div class=\"cards\">\
         <div class=\"card\"><h4>Class Average</h4><h2>{:.1}%</h2></div>\
         <div class=\"card\"><h4>Total Students</h4><h2>{}</h2></div>\
         <div class=\"card\"><h4>Top Score</h4><h2>{}</h2></div></div>",
        summary.class_average, summary.total_students, summary.top_score
    );

    html.push_str("<h3>Subject-wise Performance</h3><div class=\"cards\">");
    for stats in &report.subject_stats {
        subject_card(&mut html, stats);
    }
    html.push_str("</div>");

    html.push_str("<h3>Top Performers</h3><div class=\"cards\">");
    for (rank, student) in report.rankings.top.iter().enumerate() {
        student_card(&mut html, rank + 1, student);
    }
    html.push_str("</div>");

    html.push_str("<h3>Needs Support</h3><div class=\"cards\">");
    for (rank, student) in report.rankings.bottom.iter().enumerate() {
        student_card(&mut html, rank + 1, student);
    }
    html.push_str("</div>");

    let bar = relative_to(&report.charts.subject_averages, html_dir);
    let pie = relative_to(&report.charts.grade_distribution, html_dir);
    let _ = write!(
        html,
        "<h3>Visual Analytics</h3><div class=\"cards\">\
         <div class=\"card\"><h5>Subject Averages</h5><img src=\"{}\" alt=\"Subject averages\"></div>\
         <div class=\"card\"><h5>Grade Distribution</h5><img src=\"{}\" alt=\"Grade distribution\"></div></div>",
        escape(&bar.to_string_lossy()),
        escape(&pie.to_string_lossy())
    );

    html.push_str("<h3>Complete Student Data</h3><table><thead><tr>");
    for header in report.table.headers() {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in 0..report.table.row_count() {
        html.push_str("<tr>");
        for cell in report.table.row(row) {
            let _ = write!(html, "<td>{}</td>", escape(&cell.to_string()));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    let _ = write!(
        html,
        "<p>Generated by EduInsight | Report Date: {}</p></div></body></html>",
        summary.generated_at.format("%Y-%m-%d %H:%M")
    );

    html
}

fn subject_card(html: &mut String, stats: &SubjectStats) {
    let _ = write!(
        html,
        "<div class=\"card\"><h5>{}</h5>\
         <div>Average: <strong>{}</strong></div>\
         <div>Highest: <strong>{}</strong></div>\
         <div>Lowest: <strong>{}</strong></div>\
         <div>Pass Rate: <strong>{}</strong></div></div>",
        escape(&stats.subject),
        fmt_opt(stats.average, 1, "%"),
        fmt_mark(stats.highest),
        fmt_mark(stats.lowest),
        fmt_opt(stats.pass_rate, 1, "%")
    );
}

fn student_card(html: &mut String, rank: usize, student: &StudentRecord) {
    let _ = write!(
        html,
        "<div class=\"card\"><h3>#{rank}</h3><h5>{}</h5>\
         <strong>{} marks</strong><br>({:.1}%)<br>Grade: {}</div>",
        escape(&student.display_name()),
        student.total,
        student.percentage,
        student.grade
    );
}

/// Renders the report and writes it to `path`.
pub fn write_html(path: &str, report: &AnalysisReport) -> Result<()> {
    let dir = Path::new(path).parent().unwrap_or(Path::new(""));
    std::fs::write(path, render_html(report, dir))?;
    info!(path, "HTML report written");
    Ok(())
}
