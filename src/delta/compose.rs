// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Applying edits to documents.
//!
//! `DocumentType` is the seam the fuzz driver checks generated edits against.
//! `RichText` is the reference implementation: plain delta composition of an
//! insert-only document with an edit, followed by the engine's detection
//! integrity rule (a detection span that an edit fragments or resizes loses
//! its id everywhere).

use crate::error::FuzzError;
use crate::fuzz::detection;

use super::split_chars;
use super::ContentUnit;
use super::Delta;
use super::InsertOp;
use super::Op;
use super::Snapshot;

/// A document type the generated edits can be applied through.
pub trait DocumentType {
    /// A short name for logs.
    fn name(&self) -> &'static str;

    /// The empty document.
    fn create(&self) -> Snapshot {
        return Snapshot::new();
    }

    /// Apply `edit` to `snapshot`, producing the new document.
    fn apply(&self, snapshot: &Snapshot, edit: &Delta) -> Result<Snapshot, FuzzError>;
}

/// The reference rich-text document type.
///
/// The integrity rule here is `detection::validate`, the same function the
/// generator uses to repair its prediction. Driver runs against `RichText`
/// therefore only check composition against the generator; detection
/// handling is covered by the validator's own tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct RichText;

impl DocumentType for RichText {
    fn name(&self) -> &'static str {
        return "rich-text";
    }

    fn apply(&self, snapshot: &Snapshot, edit: &Delta) -> Result<Snapshot, FuzzError> {
        let composed = compose(snapshot, edit)?;
        let original = detection::covered_lengths(snapshot);
        return Ok(detection::validate(&composed, &original).snapshot);
    }
}

/// Walks a document's ops, handing out pieces of at most a given length.
struct Cursor<'a> {
    ops: &'a [InsertOp],
    index: usize,
    /// Characters of `ops[index]` already handed out.
    offset: usize,
    remaining: usize,
}

impl<'a> Cursor<'a> {
    fn new(snapshot: &'a Snapshot) -> Cursor<'a> {
        return Cursor {
            ops: snapshot.ops(),
            index: 0,
            offset: 0,
            remaining: snapshot.len(),
        };
    }

    /// The next piece, at most `max` units long.
    fn next(&mut self, max: usize) -> Option<InsertOp> {
        // Skip empty runs so a piece is never zero length.
        while self.index < self.ops.len() && self.ops[self.index].len() == self.offset {
            self.index += 1;
            self.offset = 0;
        }
        let op = self.ops.get(self.index)?;

        let piece = match &op.insert {
            ContentUnit::Text(text) => {
                let (_, rest) = split_chars(text, self.offset);
                let (head, _) = split_chars(rest, max);
                ContentUnit::Text(head.to_string())
            }
            ContentUnit::Embed(embed) => ContentUnit::Embed(embed.clone()),
        };
        let len = piece.len();

        self.offset += len;
        self.remaining -= len;
        return Some(InsertOp {
            insert: piece,
            attributes: op.attributes.clone(),
        });
    }
}

/// Compose an insert-only document with an edit.
///
/// Inserts are copied into the output, deletes skip document content, and
/// retains copy document content with the retain's attributes composed on
/// top (a `null` value removes the key). Content past the last op is kept.
/// Reading past the end of the document is an error.
pub fn compose(snapshot: &Snapshot, edit: &Delta) -> Result<Snapshot, FuzzError> {
    let mut cursor = Cursor::new(snapshot);
    let mut out = Snapshot::new();

    for (op_index, op) in edit.ops().iter().enumerate() {
        match op {
            Op::Insert { insert, attributes } => {
                out.push(InsertOp::new(insert.clone(), attributes.clone()));
            }
            Op::Retain { retain, attributes } => {
                check_bounds(&cursor, op_index, *retain)?;
                let mut left = *retain;
                while left > 0 {
                    let Some(piece) = cursor.next(left) else { break };
                    left -= piece.len();
                    let attributes = match attributes {
                        Some(patch) => patch.apply_to(piece.attributes.as_ref()),
                        None => piece.attributes,
                    };
                    out.push(InsertOp::new(piece.insert, attributes));
                }
            }
            Op::Delete { delete } => {
                check_bounds(&cursor, op_index, *delete)?;
                let mut left = *delete;
                while left > 0 {
                    let Some(piece) = cursor.next(left) else { break };
                    left -= piece.len();
                }
            }
        }
    }

    while let Some(piece) = cursor.next(usize::MAX) {
        out.push(piece);
    }
    return Ok(out);
}

fn check_bounds(cursor: &Cursor<'_>, op_index: usize, needed: usize) -> Result<(), FuzzError> {
    if needed > cursor.remaining {
        return Err(FuzzError::EditOutOfBounds {
            op_index,
            needed,
            available: cursor.remaining,
        });
    }
    return Ok(());
}
