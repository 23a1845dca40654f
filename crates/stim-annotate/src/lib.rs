//! Locates the target word inside each stimulus passage and records its
//! zero-based word index in a `target_word_position` column.

pub mod annotate;
pub mod batch;
pub mod config;
pub mod position;

pub use annotate::{
    annotate, resolve_passage_column, Annotation, AnnotationReport, MissedTarget, PositionStats,
    NOT_FOUND,
};
pub use batch::{preprocess_file, process_batch, BatchOutcome};
pub use config::AnnotateConfig;
pub use position::{excerpt, find_target_position, normalize_word};
