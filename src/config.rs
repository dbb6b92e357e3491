use serde::Deserialize;
use std::path::PathBuf;

use crate::analyzers::ranking::DEFAULT_RANKING_SIZE;
use crate::error::Result;

pub const DEFAULT_CHART_DIR: &str = "static/charts";

/// Settings for one analysis run.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "chart_dir": "static/charts",
///   "ranking_size": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory the two chart images are written to.
    pub chart_dir: PathBuf,
    /// Number of students in each of the top and bottom lists.
    pub ranking_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
            ranking_size: DEFAULT_RANKING_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, chart_dir: Option<PathBuf>, ranking_size: Option<usize>) -> Self {
        if let Some(dir) = chart_dir {
            self.chart_dir = dir;
        }
        if let Some(n) = ranking_size {
            self.ranking_size = n;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.chart_dir, PathBuf::from("static/charts"));
        assert_eq!(config.ranking_size, 3);
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_path("eduinsight_config_partial.json");
        fs::write(&path, r#"{ "ranking_size": 5 }"#).unwrap();

        let config = AnalysisConfig::load(&path).unwrap();

        assert_eq!(config.ranking_size, 5);
        assert_eq!(config.chart_dir, PathBuf::from(DEFAULT_CHART_DIR));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("eduinsight_config_invalid.json");
        fs::write(&path, "not json").unwrap();

        assert!(AnalysisConfig::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::default().with_overrides(Some("out".into()), None);

        assert_eq!(config.chart_dir, PathBuf::from("out"));
        assert_eq!(config.ranking_size, 3);
    }
}
