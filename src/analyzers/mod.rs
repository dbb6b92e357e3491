//! Marks analysis and grading.
//!
//! This module derives per-student totals, percentages and letter grades,
//! per-subject statistics, the grade distribution and top/bottom rankings,
//! and assembles them into an [`types::AnalysisReport`].

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod ranking;
pub mod students;
pub mod types;
pub mod utility;
