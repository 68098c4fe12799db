use std::path::PathBuf;

use crate::data::model::NumericField;

/// File loaded at startup when no path is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "students_with_personas.json";

/// Startup configuration of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Data file read at startup.
    pub data_path: PathBuf,
    /// Class labels reported in the insights, in display order. Classes
    /// missing from the data still get an entry.
    pub classes: Vec<String>,
    /// Attributes correlated against the assessment score and charted.
    pub predictors: Vec<NumericField>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            classes: ["A", "B", "C"].map(String::from).to_vec(),
            predictors: NumericField::PREDICTORS.to_vec(),
        }
    }
}

impl DashboardConfig {
    /// Build from command-line arguments (program name already skipped).
    /// The first positional argument overrides the data path.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from("students_with_personas.json"));
        assert_eq!(config.classes, vec!["A", "B", "C"]);
        assert_eq!(config.predictors.len(), 5);
        assert_eq!(config.predictors[0], NumericField::Comprehension);
    }

    #[test]
    fn first_argument_overrides_path() {
        let config = DashboardConfig::from_args(["data/other.csv".to_string(), "ignored".to_string()]);
        assert_eq!(config.data_path, PathBuf::from("data/other.csv"));
        assert_eq!(DashboardConfig::from_args(Vec::new()), DashboardConfig::default());
    }
}
