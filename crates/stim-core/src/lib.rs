#![deny(missing_docs)]
//! Core types shared by the stimulus preparation tools: the in-memory trial
//! table, CSV persistence, ordered column resolution and the structured
//! error surface.

pub mod columns;
pub mod errors;
/// Content hashing for provenance records.
pub mod hash;
/// Canonical JSON and YAML helpers.
pub mod serde;
#[allow(missing_docs)]
pub mod table;

pub use columns::{available_columns, require_column, resolve_column};
pub use errors::{ErrorInfo, StimError};
pub use hash::{file_sha256, sha256_hex};
pub use crate::serde::{from_yaml_slice, load_yaml, to_canonical_json_bytes};
pub use table::{read_csv, write_csv, TrialTable};

/// Name of the column holding the word of interest in every stimulus table.
pub const DEFAULT_TARGET_COLUMN: &str = "target_word";
