use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stim_core::errors::{ErrorInfo, StimError};
use stim_core::{load_yaml, DEFAULT_TARGET_COLUMN};

/// Column names and batch file list for annotation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateConfig {
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// Passage columns tried in order; the first present one is used.
    #[serde(default = "default_passage_columns")]
    pub passage_columns: Vec<String>,
    #[serde(default = "default_position_column")]
    pub position_column: String,
    /// Stimuli file processed first in batch mode.
    #[serde(default = "default_batch_primary")]
    pub batch_primary: String,
    /// Prefix of the `<prefix>_1.csv` .. `<prefix>_4.csv` sublist files.
    #[serde(default = "default_batch_prefix")]
    pub batch_prefix: String,
}

fn default_target_column() -> String {
    DEFAULT_TARGET_COLUMN.to_string()
}

fn default_passage_columns() -> Vec<String> {
    vec!["passage_variant".to_string(), "jabber_passage".to_string()]
}

fn default_position_column() -> String {
    "target_word_position".to_string()
}

fn default_batch_primary() -> String {
    "final_pilot_stimuli.csv".to_string()
}

fn default_batch_prefix() -> String {
    "trial_list_sublist".to_string()
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            target_column: default_target_column(),
            passage_columns: default_passage_columns(),
            position_column: default_position_column(),
            batch_primary: default_batch_primary(),
            batch_prefix: default_batch_prefix(),
        }
    }
}

impl AnnotateConfig {
    pub fn load(path: &Path) -> Result<Self, StimError> {
        let config: Self = load_yaml(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StimError> {
        if self.passage_columns.is_empty() {
            return Err(StimError::Config(ErrorInfo::new(
                "stim.passage_candidates",
                "passage_columns must list at least one column",
            )));
        }
        if self.position_column.is_empty() {
            return Err(StimError::Config(ErrorInfo::new(
                "stim.position_column",
                "position_column must not be empty",
            )));
        }
        Ok(())
    }

    /// Well-known files processed when no input is named, relative to `dir`.
    pub fn batch_files(&self, dir: &Path) -> Vec<PathBuf> {
        std::iter::once(dir.join(&self.batch_primary))
            .chain((1..=4).map(|index| dir.join(format!("{}_{index}.csv", self.batch_prefix))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_batch_list_covers_primary_and_sublists() {
        let files = AnnotateConfig::default().batch_files(Path::new("data"));
        let names: Vec<_> = files.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(names.len(), 5);
        assert!(names[0].ends_with("final_pilot_stimuli.csv"));
        assert!(names[4].ends_with("trial_list_sublist_4.csv"));
    }
}
