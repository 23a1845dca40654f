//! Structured error types shared across the stimulus preparation crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`StimError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (column names, paths, counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the operator fix the input and re-run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for stimulus preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum StimError {
    /// A required column is absent or a configuration value is invalid.
    #[error("configuration error: {0}")]
    Config(ErrorInfo),
    /// No seed group satisfies the minimum variant threshold.
    #[error("insufficient data: {0}")]
    InsufficientData(ErrorInfo),
    /// An input file does not exist.
    #[error("file not found: {0}")]
    NotFound(ErrorInfo),
    /// Any other filesystem failure.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed CSV content.
    #[error("csv error: {0}")]
    Csv(ErrorInfo),
    /// JSON or YAML encoding and decoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl StimError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            StimError::Config(info)
            | StimError::InsufficientData(info)
            | StimError::NotFound(info)
            | StimError::Io(info)
            | StimError::Csv(info)
            | StimError::Serde(info) => info,
        }
    }

    /// True when the error reports a missing input file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StimError::NotFound(_))
    }

    /// Maps an I/O failure on `path` onto [`StimError::NotFound`] or [`StimError::Io`].
    pub fn from_io(code: &str, path: &Path, err: io::Error) -> Self {
        let shown = path.display().to_string();
        if err.kind() == io::ErrorKind::NotFound {
            StimError::NotFound(
                ErrorInfo::new("stim.file_not_found", format!("{shown} does not exist"))
                    .with_context("path", shown),
            )
        } else {
            StimError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", shown))
        }
    }
}
