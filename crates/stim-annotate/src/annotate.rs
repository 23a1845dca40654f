use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use stim_core::errors::{ErrorInfo, StimError};
use stim_core::{available_columns, require_column, resolve_column, TrialTable};
use tracing::info;

use crate::config::AnnotateConfig;
use crate::position::find_target_position;

/// Value written for targets that are missing or not found.
pub const NOT_FOUND: i64 = -1;

/// A row whose target could not be located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedTarget {
    pub row: usize,
    pub target_word: Option<String>,
    pub passage: Option<String>,
}

/// Min, max and mean of the positions that were found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl PositionStats {
    pub fn from_positions(positions: &[Option<usize>]) -> Option<Self> {
        let found: Vec<usize> = positions.iter().flatten().copied().collect();
        let min = *found.iter().min()?;
        let max = *found.iter().max()?;
        let mean = found.iter().sum::<usize>() as f64 / found.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// Observational summary of one annotation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationReport {
    pub rows: usize,
    pub passage_column: String,
    pub found: usize,
    pub missed: Vec<MissedTarget>,
    pub stats: Option<PositionStats>,
}

impl AnnotationReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Found: {} / {}", self.found, self.rows);
        if !self.missed.is_empty() {
            let _ = writeln!(out, "Not found: {}", self.missed.len());
            let _ = writeln!(out, "{:>6}  {:<20}  {}", "row", "target_word", self.passage_column);
            for miss in &self.missed {
                let _ = writeln!(
                    out,
                    "{:>6}  {:<20}  {}",
                    miss.row,
                    miss.target_word.as_deref().unwrap_or("NaN"),
                    miss.passage.as_deref().unwrap_or("NaN"),
                );
            }
        }
        if let Some(stats) = &self.stats {
            let _ = writeln!(out, "Target word position statistics:");
            let _ = writeln!(out, "  Min position: {}", stats.min);
            let _ = writeln!(out, "  Max position: {}", stats.max);
            let _ = writeln!(out, "  Mean position: {:.2}", stats.mean);
        }
        out
    }
}

/// Annotated copy of a table plus the per-row lookups behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub table: TrialTable,
    pub positions: Vec<Option<usize>>,
    pub report: AnnotationReport,
}

/// Picks the passage column from the configured candidates.
pub fn resolve_passage_column(
    table: &TrialTable,
    config: &AnnotateConfig,
) -> Result<String, StimError> {
    resolve_column(table, &config.passage_columns)
        .map(str::to_string)
        .ok_or_else(|| {
            StimError::Config(
                ErrorInfo::new(
                    "stim.passage_column_missing",
                    format!(
                        "no passage column found, expected one of: {}",
                        config.passage_columns.join(", ")
                    ),
                )
                .with_context("available", available_columns(table)),
            )
        })
}

/// Adds the position column to a copy of `table`. Rows, their order and
/// every other column are left untouched; an existing position column is
/// overwritten in place.
pub fn annotate(table: &TrialTable, config: &AnnotateConfig) -> Result<Annotation, StimError> {
    config.validate()?;
    let target_idx = require_column(table, &config.target_column, "stim.target_column_missing")?;
    let passage_column = resolve_passage_column(table, config)?;
    let passage_idx = require_column(table, &passage_column, "stim.passage_column_missing")?;
    info!("Using passage column: '{passage_column}'");

    let mut positions = Vec::with_capacity(table.len());
    let mut missed = Vec::new();
    for row in 0..table.len() {
        let passage = table.value(row, passage_idx);
        let target = table.value(row, target_idx);
        let position = find_target_position(passage, target);
        if position.is_none() {
            missed.push(MissedTarget {
                row,
                target_word: target.map(str::to_string),
                passage: passage.map(str::to_string),
            });
        }
        positions.push(position);
    }

    let mut annotated = table.clone();
    annotated.set_column(
        &config.position_column,
        positions
            .iter()
            .map(|position| position.map_or(NOT_FOUND, |p| p as i64).to_string())
            .collect(),
    )?;

    let report = AnnotationReport {
        rows: table.len(),
        passage_column,
        found: positions.len() - missed.len(),
        missed,
        stats: PositionStats::from_positions(&positions),
    };
    Ok(Annotation {
        table: annotated,
        positions,
        report,
    })
}
