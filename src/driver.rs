// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! The fuzz loop.
//!
//! Starting from a document, repeatedly ask the generator for an edit and a
//! predicted result, apply the edit through the document type, and fail on
//! the first disagreement. The applied document seeds the next iteration, so
//! a run explores a chain of edits rather than independent ones.

use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::delta::AttrValue;
use crate::delta::Attributes;
use crate::delta::Delta;
use crate::delta::DocumentType;
use crate::delta::InsertOp;
use crate::delta::Snapshot;
use crate::delta::DETECTION_ID;
use crate::error::FuzzError;

/// Everything needed to reproduce a convergence failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// The document the edit was generated against.
    pub snapshot: Snapshot,
    pub edit: Delta,
    /// What the generator predicted.
    pub expected: Snapshot,
    /// What the document type produced.
    pub actual: Snapshot,
}

/// Summary of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FuzzReport {
    pub iterations: usize,
    /// Ops across all generated edits.
    pub edit_ops: usize,
    pub final_len: usize,
    pub max_len: usize,
}

/// A fuzz case decoded from raw fuzzer bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteCase {
    pub seed: u64,
    pub initial: Snapshot,
}

impl ByteCase {
    /// The first eight bytes are the seed (little endian); the rest, read as
    /// lossy UTF-8, is the starting text, tagged as a single detection span
    /// so every case exercises the continuity check. Returns `None` for
    /// inputs shorter than a seed.
    pub fn from_bytes(data: &[u8]) -> Option<ByteCase> {
        let (seed, rest) = data.split_first_chunk::<8>()?;
        let text = String::from_utf8_lossy(rest);
        let attributes = Attributes::new().with(DETECTION_ID, AttrValue::text("afl"));
        let initial = Snapshot::from_ops(vec![InsertOp::new(&*text, Some(attributes))]);
        return Some(ByteCase {
            seed: u64::from_le_bytes(*seed),
            initial: initial.normalized(),
        });
    }
}

/// Run `iterations` rounds starting from the document type's empty document.
pub fn run<D, F>(doc_type: &D, generate: F, iterations: usize) -> Result<FuzzReport, FuzzError>
where
    D: DocumentType,
    F: FnMut(&Snapshot) -> Result<(Delta, Snapshot), FuzzError>,
{
    return run_from(doc_type, generate, doc_type.create(), iterations);
}

/// Run `iterations` rounds starting from `initial`.
pub fn run_from<D, F>(
    doc_type: &D,
    mut generate: F,
    initial: Snapshot,
    iterations: usize,
) -> Result<FuzzReport, FuzzError>
where
    D: DocumentType,
    F: FnMut(&Snapshot) -> Result<(Delta, Snapshot), FuzzError>,
{
    let mut report = FuzzReport {
        max_len: initial.len(),
        ..FuzzReport::default()
    };
    let mut current = initial;

    for iteration in 0..iterations {
        let (edit, expected) = generate(&current)?;
        let actual = doc_type.apply(&current, &edit)?;

        if !actual.content_eq(&expected) {
            return Err(FuzzError::ConvergenceMismatch {
                iteration,
                mismatch: Box::new(Mismatch {
                    snapshot: current,
                    edit,
                    expected,
                    actual,
                }),
            });
        }

        debug!(iteration, len = actual.len(), ops = edit.ops().len(), "round converged");
        report.iterations += 1;
        report.edit_ops += edit.ops().len();
        report.max_len = report.max_len.max(actual.len());
        current = actual;
    }

    report.final_len = current.len();
    info!(
        doc_type = doc_type.name(),
        iterations = report.iterations,
        max_len = report.max_len,
        final_len = report.final_len,
        "fuzz run finished"
    );
    return Ok(report);
}
