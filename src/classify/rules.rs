//! Priority-ordered column classification rules.

use crate::classify::ColumnRole;
use crate::dataset::Column;

pub const IDENTIFIER_KEYWORDS: &[&str] = &["roll", "id", "number", "reg"];
pub const NAME_KEYWORDS: &[&str] = &["name", "student", "candidate"];

/// A single classification rule. Rules are tried in order and the first
/// one that matches a column decides its candidate role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierRule {
    /// Case-insensitive substring match of any keyword against the header.
    HeaderKeyword {
        role: ColumnRole,
        keywords: &'static [&'static str],
    },
    /// At least one value coerces to a number.
    NumericContent,
    /// Anything left over may serve as the name column.
    TextFallback,
}

/// What a matching rule proposes for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Role claimed from a header keyword.
    Keyword(ColumnRole),
    /// Subject scores, coerced in row order.
    Scores(Vec<Option<f64>>),
    /// Name column, only if no name has been chosen yet.
    InferredName,
}

/// Rule list used by [`crate::classify::classify`].
pub const DEFAULT_RULES: &[ClassifierRule] = &[
    ClassifierRule::HeaderKeyword {
        role: ColumnRole::Identifier,
        keywords: IDENTIFIER_KEYWORDS,
    },
    ClassifierRule::HeaderKeyword {
        role: ColumnRole::StudentName,
        keywords: NAME_KEYWORDS,
    },
    ClassifierRule::NumericContent,
    ClassifierRule::TextFallback,
];

impl ClassifierRule {
    /// Applies the rule to a column, returning `None` if it does not match.
    pub fn apply(&self, column: &Column) -> Option<Candidate> {
        match self {
            ClassifierRule::HeaderKeyword { role, keywords } => {
                header_contains_any(&column.name, keywords).then_some(Candidate::Keyword(*role))
            }
            ClassifierRule::NumericContent => {
                let scores = column.coerce_numeric();
                scores
                    .iter()
                    .any(Option::is_some)
                    .then_some(Candidate::Scores(scores))
            }
            ClassifierRule::TextFallback => Some(Candidate::InferredName),
        }
    }
}

/// Returns the first candidate produced by `rules` for `column`.
pub fn first_match(rules: &[ClassifierRule], column: &Column) -> Option<Candidate> {
    rules.iter().find_map(|rule| rule.apply(column))
}

pub fn header_contains_any(header: &str, keywords: &[&str]) -> bool {
    let lower = header.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
