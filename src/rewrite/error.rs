//! Error types for plan loading and file rewriting

use std::path::PathBuf;

/// Per-file failures. These are reported and never stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RewriteError {
    /// Stable code for the result model
    pub fn code(&self) -> &'static str {
        match self {
            RewriteError::NotFound(_) => "NOT_FOUND",
            RewriteError::Read { .. } => "READ_FAILED",
            RewriteError::Write { .. } => "WRITE_FAILED",
        }
    }
}

/// Failures that prevent a plan from starting
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read plan file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid plan: {0}")]
    Invalid(String),

    #[error("unknown plan '{0}' (run `resub plans` to list built-in plans)")]
    UnknownPlan(String),
}
