// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Detection span continuity.
//!
//! A detection id marks one contiguous annotated range. Concurrent edits are
//! free to break such a range, and when they do the engine drops the id
//! rather than keep a fragmented or resized span. So a predicted document is
//! only expected to keep an id that existed before the edit when:
//!
//! 1. the id still covers exactly as many units as before, and
//! 2. those units form one unbroken extent (first start to last end equals
//!    the covered length).
//!
//! Any other pre-existing id is stripped from every op that carries it.
//! Ids minted by the edit itself are left alone.
//!
//! Reading (`scan`, `broken_ids`) and writing (`strip_detections`) are
//! separate so each can be tested on its own.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::delta::InsertOp;
use crate::delta::Snapshot;
use crate::delta::DETECTION_ID;

/// A half-open range `[start, end)` in document units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub start: usize,
    pub end: usize,
}

/// Where one detection id appears in a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectionSpan {
    /// Total units carrying the id.
    pub covered: usize,
    /// One extent per op carrying the id, in document order.
    pub appearances: SmallVec<[Extent; 2]>,
}

impl DetectionSpan {
    /// From the start of the first appearance to the end of the last.
    pub fn extent_len(&self) -> usize {
        return match (self.appearances.first(), self.appearances.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0,
        };
    }

    /// True if nothing else sits between the appearances.
    pub fn is_contiguous(&self) -> bool {
        return self.covered == self.extent_len();
    }
}

/// Every detection id in a document, with where it appears.
pub fn scan(snapshot: &Snapshot) -> FxHashMap<String, DetectionSpan> {
    let mut spans: FxHashMap<String, DetectionSpan> = FxHashMap::default();
    let mut offset = 0;
    for op in snapshot.ops() {
        let len = op.len();
        if let Some(id) = op.detection_id() {
            let span = spans.entry(id.to_string()).or_default();
            span.covered += len;
            span.appearances.push(Extent { start: offset, end: offset + len });
        }
        offset += len;
    }
    return spans;
}

/// Covered length per detection id. Taken on a document before an edit, this
/// is what `broken_ids` compares against.
pub fn covered_lengths(snapshot: &Snapshot) -> FxHashMap<String, usize> {
    return scan(snapshot)
        .into_iter()
        .map(|(id, span)| (id, span.covered))
        .collect();
}

/// Ids that existed before the edit and whose span was resized or
/// fragmented by it.
pub fn broken_ids(
    spans: &FxHashMap<String, DetectionSpan>,
    original: &FxHashMap<String, usize>,
) -> FxHashSet<String> {
    return spans
        .iter()
        .filter(|(id, span)| match original.get(id.as_str()) {
            Some(&before) => span.covered != before || !span.is_contiguous(),
            None => false,
        })
        .map(|(id, _)| id.clone())
        .collect();
}

/// A copy of `snapshot` with the detection id removed from every op whose id
/// is in `ids`. Op boundaries are kept as they are.
pub fn strip_detections(snapshot: &Snapshot, ids: &FxHashSet<String>) -> Snapshot {
    let ops = snapshot
        .ops()
        .iter()
        .map(|op| match op.detection_id() {
            Some(id) if ids.contains(id) => {
                let mut attributes = op.attributes.clone().unwrap_or_default();
                attributes.remove(DETECTION_ID);
                InsertOp {
                    insert: op.insert.clone(),
                    attributes: attributes.non_empty(),
                }
            }
            _ => op.clone(),
        })
        .collect();
    return Snapshot::from_ops(ops);
}

/// The outcome of checking a predicted document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repair {
    /// The document with broken ids stripped.
    pub snapshot: Snapshot,
    /// The ids that were stripped.
    pub broken: FxHashSet<String>,
}

/// Scan `snapshot`, find ids broken relative to `original`, and strip them.
pub fn validate(snapshot: &Snapshot, original: &FxHashMap<String, usize>) -> Repair {
    let spans = scan(snapshot);
    let broken = broken_ids(&spans, original);
    if broken.is_empty() {
        return Repair { snapshot: snapshot.clone(), broken };
    }
    return Repair {
        snapshot: strip_detections(snapshot, &broken),
        broken,
    };
}
