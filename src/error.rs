// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Errors raised while generating, applying, or checking edits.
//!
//! None of these are retried. A precondition violation means the caller
//! handed us a bad document; a mismatch means either the generator or the
//! document type is wrong.

use thiserror::Error;

use crate::driver::Mismatch;

#[derive(Debug, Error)]
pub enum FuzzError {
    /// A document contained a retain or delete.
    #[error("snapshot should only have inserts (op {index} is not an insert)")]
    NotInsertOnly { index: usize },

    /// More content was requested from a document than it holds.
    #[error("requested {requested} units from a snapshot with {available} remaining")]
    SnapshotExhausted { requested: usize, available: usize },

    /// An edit retained or deleted past the end of the document.
    #[error("edit op {op_index} needs {needed} units but only {available} remain")]
    EditOutOfBounds {
        op_index: usize,
        needed: usize,
        available: usize,
    },

    /// The document type disagreed with the predicted result.
    #[error("convergence mismatch at iteration {iteration}")]
    ConvergenceMismatch {
        iteration: usize,
        mismatch: Box<Mismatch>,
    },

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
