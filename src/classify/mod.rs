//! Column role inference.
//!
//! Each column is run through [`rules::DEFAULT_RULES`] in header order and
//! assigned exactly one [`ColumnRole`]. When no subject column is found the
//! classifier falls back to "first column is the name, the rest are marks".

pub mod rules;

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use rules::{Candidate, ClassifierRule, DEFAULT_RULES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnRole {
    Identifier,
    StudentName,
    SubjectScore,
    Unclassified,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnRole::Identifier => "identifier",
            ColumnRole::StudentName => "student name",
            ColumnRole::SubjectScore => "subject score",
            ColumnRole::Unclassified => "unclassified",
        };
        f.write_str(s)
    }
}

/// A subject column with its values coerced to numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectColumn {
    pub index: usize,
    pub name: String,
    pub scores: Vec<Option<f64>>,
}

/// Role assignment covering every column of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// One role per column, in header order.
    pub roles: Vec<ColumnRole>,
    pub identifier: Option<usize>,
    pub name: usize,
    pub subjects: Vec<SubjectColumn>,
    /// `true` when the first-column fallback produced the subjects.
    pub used_fallback: bool,
}

impl Classification {
    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn role_of(&self, column: usize) -> Option<ColumnRole> {
        self.roles.get(column).copied()
    }
}

/// Classifies `dataset` with [`DEFAULT_RULES`].
pub fn classify(dataset: &Dataset) -> Result<Classification> {
    classify_with(dataset, DEFAULT_RULES)
}

/// Classifies `dataset` with a caller-supplied rule list.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] if no subject column remains
/// after the fallback.
#[tracing::instrument(skip_all, fields(columns = dataset.column_count()))]
pub fn classify_with(dataset: &Dataset, rules: &[ClassifierRule]) -> Result<Classification> {
    let mut pass = KeywordPass::new(dataset.column_count());

    for (idx, column) in dataset.columns.iter().enumerate() {
        match rules::first_match(rules, column) {
            Some(Candidate::Keyword(ColumnRole::Identifier)) => pass.identifier(idx, &column.name),
            Some(Candidate::Keyword(ColumnRole::StudentName)) => {
                pass.keyword_name(idx, &column.name)
            }
            Some(Candidate::Keyword(ColumnRole::SubjectScore)) => {
                pass.subject(idx, &column.name, column.coerce_numeric())
            }
            Some(Candidate::Scores(scores)) => pass.subject(idx, &column.name, scores),
            Some(Candidate::Keyword(ColumnRole::Unclassified)) | None => {}
            Some(Candidate::InferredName) => pass.inferred_name(idx, &column.name),
        }
    }

    let classification = match pass.finish() {
        Some(c) => c,
        None => fallback(dataset)?,
    };

    info!(
        identifier = ?classification.identifier.map(|i| &dataset.columns[i].name),
        name = %dataset.columns[classification.name].name,
        subjects = ?classification.subject_names(),
        fallback = classification.used_fallback,
        "Columns classified"
    );

    Ok(classification)
}

struct KeywordPass {
    roles: Vec<ColumnRole>,
    identifier: Option<usize>,
    name: Option<usize>,
    name_from_keyword: bool,
    subjects: Vec<SubjectColumn>,
}

impl KeywordPass {
    fn new(columns: usize) -> Self {
        Self {
            roles: vec![ColumnRole::Unclassified; columns],
            identifier: None,
            name: None,
            name_from_keyword: false,
            subjects: Vec::new(),
        }
    }

    fn identifier(&mut self, idx: usize, header: &str) {
        if self.identifier.is_some() {
            warn!(column = header, "Additional identifier column ignored");
            return;
        }
        debug!(column = header, "Identifier column");
        self.identifier = Some(idx);
        self.roles[idx] = ColumnRole::Identifier;
    }

    /// A keyword match replaces a name that was only inferred from content.
    fn keyword_name(&mut self, idx: usize, header: &str) {
        if self.name_from_keyword {
            warn!(column = header, "Additional name column ignored");
            return;
        }
        if let Some(previous) = self.name.replace(idx) {
            self.roles[previous] = ColumnRole::Unclassified;
        }
        debug!(column = header, "Name column");
        self.name_from_keyword = true;
        self.roles[idx] = ColumnRole::StudentName;
    }

    fn subject(&mut self, idx: usize, header: &str, scores: Vec<Option<f64>>) {
        debug!(column = header, "Subject column");
        self.roles[idx] = ColumnRole::SubjectScore;
        self.subjects.push(SubjectColumn {
            index: idx,
            name: header.to_string(),
            scores,
        });
    }

    fn inferred_name(&mut self, idx: usize, header: &str) {
        if self.name.is_none() {
            debug!(column = header, "Assuming name column");
            self.name = Some(idx);
            self.roles[idx] = ColumnRole::StudentName;
        }
    }

    /// Returns `None` when the fallback has to run.
    fn finish(mut self) -> Option<Classification> {
        if self.subjects.is_empty() {
            return None;
        }

        let name = match self.name {
            Some(name) => name,
            None => {
                // First column doubles as the name; it gives up whatever role it had.
                if self.identifier == Some(0) {
                    self.identifier = None;
                }
                self.subjects.retain(|s| s.index != 0);
                if self.subjects.is_empty() {
                    return None;
                }
                self.roles[0] = ColumnRole::StudentName;
                0
            }
        };

        Some(Classification {
            roles: self.roles,
            identifier: self.identifier,
            name,
            subjects: self.subjects,
            used_fallback: false,
        })
    }
}

fn fallback(dataset: &Dataset) -> Result<Classification> {
    if dataset.column_count() == 0 {
        return Err(AnalysisError::InsufficientData);
    }

    let mut roles = vec![ColumnRole::Unclassified; dataset.column_count()];
    roles[0] = ColumnRole::StudentName;

    let subjects: Vec<SubjectColumn> = dataset
        .columns
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, column)| {
            let scores = column.coerce_numeric();
            scores.iter().any(Option::is_some).then(|| SubjectColumn {
                index: idx,
                name: column.name.clone(),
                scores,
            })
        })
        .collect();

    if subjects.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    for subject in &subjects {
        roles[subject.index] = ColumnRole::SubjectScore;
    }

    info!(
        name = %dataset.columns[0].name,
        subjects = subjects.len(),
        "Using first-column fallback"
    );

    Ok(Classification {
        roles,
        identifier: None,
        name: 0,
        subjects,
        used_fallback: true,
    })
}
