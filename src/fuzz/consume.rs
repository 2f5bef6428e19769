// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Consuming content from the front of a document.
//!
//! The generator walks its private copy of the input document left to right.
//! Every retain, delete, or format action takes some number of units off the
//! front; `SpanQueue::take` hands them back as whole ops, splitting a text
//! run when the cut lands inside it. Embeds are atomic: an embed at the front
//! is always taken whole.

use std::collections::VecDeque;

use crate::delta::split_chars;
use crate::delta::ContentUnit;
use crate::delta::InsertOp;
use crate::delta::Snapshot;
use crate::error::FuzzError;

/// A document being consumed from the front.
#[derive(Clone, Debug, Default)]
pub struct SpanQueue {
    ops: VecDeque<InsertOp>,
    /// Total units left in `ops`.
    remaining: usize,
}

impl SpanQueue {
    /// Units not yet consumed.
    pub fn remaining(&self) -> usize {
        return self.remaining;
    }

    pub fn is_empty(&self) -> bool {
        return self.remaining == 0;
    }

    /// Take exactly `length` units off the front.
    ///
    /// A text run longer than what is still needed is split: the prefix is
    /// returned with a copy of the run's attributes and the rest stays at the
    /// front. Fails without consuming anything if fewer than `length` units
    /// remain.
    pub fn take(&mut self, length: usize) -> Result<Vec<InsertOp>, FuzzError> {
        if length > self.remaining {
            return Err(FuzzError::SnapshotExhausted {
                requested: length,
                available: self.remaining,
            });
        }

        let mut out = Vec::new();
        let mut left = length;
        while left > 0 {
            let Some(front) = self.ops.front_mut() else {
                break;
            };

            let taken = match split_front(front, left) {
                Some(head) => head,
                None => match self.ops.pop_front() {
                    Some(op) => op,
                    None => break,
                },
            };

            let taken_len = taken.len();
            // Empty runs carry no content; drop them instead of returning them.
            if taken_len > 0 {
                out.push(taken);
            }
            left = left.saturating_sub(taken_len);
            self.remaining -= taken_len;
        }
        return Ok(out);
    }

    /// Everything not yet consumed, in order.
    pub fn into_rest(self) -> Vec<InsertOp> {
        return self.ops.into_iter().filter(|op| !op.is_empty()).collect();
    }
}

/// Cut the first `n` characters off a text run longer than `n`. Returns
/// `None` when the whole op should be taken instead.
fn split_front(op: &mut InsertOp, n: usize) -> Option<InsertOp> {
    if n >= op.len() {
        return None;
    }
    let ContentUnit::Text(text) = &mut op.insert else {
        return None;
    };
    let (head, tail) = split_chars(text, n);
    let head = head.to_string();
    *text = tail.to_string();
    return Some(InsertOp {
        insert: ContentUnit::Text(head),
        attributes: op.attributes.clone(),
    });
}

impl From<Snapshot> for SpanQueue {
    fn from(snapshot: Snapshot) -> SpanQueue {
        let remaining = snapshot.len();
        return SpanQueue {
            ops: snapshot.into_ops().into(),
            remaining,
        };
    }
}
