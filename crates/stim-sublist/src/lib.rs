//! Counterbalanced sublist generation.
//!
//! A trial table is grouped by seed passage, every group is ranked by
//! entropy, and four sublists are assembled by rotating through the ranks so
//! that each sublist receives exactly one variant per seed.

pub mod config;
pub mod entropy;
pub mod grouping;
pub mod output;
pub mod report;
pub mod rotation;
pub mod summary;

pub use config::SublistConfig;
pub use entropy::{compare_entropy, sort_by_entropy, EntropyStats};
pub use grouping::SeedGroups;
pub use output::{
    generate_file, summary_path, sublist_path, write_generation, write_report, write_summary,
    GenerationRun,
};
pub use report::{GenerationReport, SublistStats};
pub use rotation::{
    generate, resolve_seed_column, variant_rank, Generation, ResolvedColumns, Selection, Sublist,
    SUBLIST_COLUMN, SUBLIST_COUNT, TRIAL_NUMBER_COLUMN,
};
pub use summary::{PivotRow, PivotView, SummaryRecord};
