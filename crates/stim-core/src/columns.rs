//! Column resolution against ordered candidate lists.

use crate::errors::{ErrorInfo, StimError};
use crate::table::TrialTable;

/// Returns the first candidate present in the table header, if any.
pub fn resolve_column<'a, S: AsRef<str>>(table: &TrialTable, candidates: &'a [S]) -> Option<&'a str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| table.has_column(candidate))
}

/// Index of a column that must be present, or a configuration error.
pub fn require_column(table: &TrialTable, name: &str, code: &str) -> Result<usize, StimError> {
    table.column_index(name).ok_or_else(|| {
        StimError::Config(
            ErrorInfo::new(code, format!("required column '{name}' not found"))
                .with_context("column", name)
                .with_context("available", available_columns(table)),
        )
    })
}

/// Comma separated header listing used in diagnostics.
pub fn available_columns(table: &TrialTable) -> String {
    table.headers().join(", ")
}
