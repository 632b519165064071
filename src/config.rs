use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the dataset path.
pub const DATA_ENV: &str = "SALARY_TIER_DATA";
/// Environment variable holding a JSON override of [`TreeParams`].
pub const TREE_ENV: &str = "SALARY_TIER_TREE";

// ---------------------------------------------------------------------------
// Classifier hyper-parameters
// ---------------------------------------------------------------------------

/// Decision tree settings. Partial JSON is accepted; absent keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction-time fallbacks
// ---------------------------------------------------------------------------

/// Values used when a queried company or posting is not in the reference
/// table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupDefaults {
    pub ratings: f64,
    pub reviews: i64,
    pub job_post_days_ago: f64,
}

pub const LOOKUP_DEFAULTS: LookupDefaults = LookupDefaults {
    ratings: 4.0,
    reviews: 100,
    job_post_days_ago: 30.0,
};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Dataset to train on; chosen from the UI when absent.
    pub data_path: Option<PathBuf>,
    pub tree: TreeParams,
}

impl AppConfig {
    /// Read [`DATA_ENV`] and [`TREE_ENV`]; a command-line path wins over
    /// the environment.
    pub fn from_env(cli_path: Option<PathBuf>) -> Result<Self> {
        let data_path = cli_path.or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from));
        let tree = match std::env::var(TREE_ENV) {
            Ok(json) => parse_tree_params(&json)?,
            Err(_) => TreeParams::default(),
        };
        Ok(Self { data_path, tree })
    }
}

pub fn parse_tree_params(json: &str) -> Result<TreeParams> {
    serde_json::from_str(json).with_context(|| format!("invalid {TREE_ENV} value {json:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_classifier() {
        let p = TreeParams::default();
        assert_eq!((p.max_depth, p.min_samples_split, p.seed), (10, 2, 42));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let p = parse_tree_params(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(p.max_depth, 4);
        assert_eq!(p.min_samples_split, 2);
        assert!(parse_tree_params("{max_depth}").is_err());
    }

    #[test]
    fn command_line_path_wins() {
        let cfg = AppConfig::from_env(Some(PathBuf::from("jobs.csv"))).unwrap();
        assert_eq!(cfg.data_path, Some(PathBuf::from("jobs.csv")));
    }
}
