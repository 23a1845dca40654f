use std::path::Path;

use serde::{Deserialize, Serialize};
use stim_core::errors::{ErrorInfo, StimError};
use stim_core::{load_yaml, DEFAULT_TARGET_COLUMN};

/// Parameters controlling sublist generation. Loadable from YAML; every
/// field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SublistConfig {
    /// Explicit seed column. When unset the candidates are tried in order.
    #[serde(default)]
    pub seed_column: Option<String>,
    /// Preference-ordered seed column names used for auto-detection.
    #[serde(default = "default_seed_candidates")]
    pub seed_column_candidates: Vec<String>,
    #[serde(default = "default_entropy_column")]
    pub entropy_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// Groups smaller than this are dropped from every sublist.
    #[serde(default = "default_min_variants")]
    pub min_variants: usize,
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

fn default_seed_candidates() -> Vec<String> {
    [
        "passage_seed_num",
        "og_passage_seed_number",
        "seed_number",
        "seed_id",
        "passage_id",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_entropy_column() -> String {
    "entropy".to_string()
}

fn default_target_column() -> String {
    DEFAULT_TARGET_COLUMN.to_string()
}

fn default_min_variants() -> usize {
    4
}

fn default_output_prefix() -> String {
    "trial_list_sublist".to_string()
}

impl Default for SublistConfig {
    fn default() -> Self {
        Self {
            seed_column: None,
            seed_column_candidates: default_seed_candidates(),
            entropy_column: default_entropy_column(),
            target_column: default_target_column(),
            min_variants: default_min_variants(),
            output_prefix: default_output_prefix(),
        }
    }
}

impl SublistConfig {
    /// Loads a YAML configuration file and validates it.
    pub fn load(path: &Path) -> Result<Self, StimError> {
        let config: Self = load_yaml(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StimError> {
        if self.min_variants == 0 {
            return Err(StimError::Config(
                ErrorInfo::new("stim.min_variants", "min_variants must be at least 1")
                    .with_hint("the default of 4 gives every sublist a distinct rank"),
            ));
        }
        if self.output_prefix.trim().is_empty() {
            return Err(StimError::Config(ErrorInfo::new(
                "stim.output_prefix",
                "output_prefix must not be empty",
            )));
        }
        if self.seed_column.is_none() && self.seed_column_candidates.is_empty() {
            return Err(StimError::Config(ErrorInfo::new(
                "stim.seed_candidates",
                "either seed_column or seed_column_candidates must be set",
            )));
        }
        Ok(())
    }
}
