// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Rich-text deltas: the data model shared by the generator and the
//! document types it is checked against.
//!
//! A delta is a list of ops. Documents are insert-only deltas, which we keep
//! in their own type (`Snapshot`) so that a retain or delete can never sneak
//! into a document. Edits are general deltas (`Delta`).
//!
//! Lengths are measured in content units: one per character of text, one per
//! embed. Embeds are atomic and are never split.

pub mod attributes;
pub mod compose;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FuzzError;

pub use attributes::AttrValue;
pub use attributes::AttributePatch;
pub use attributes::Attributes;
pub use attributes::DETECTION_ID;
pub use compose::DocumentType;
pub use compose::RichText;

/// An opaque embedded object. Always one content unit long.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Embed {
    Number(u64),
    Image { image: String },
    Url { url: String },
}

/// The payload of an insert: a run of text or a single embed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentUnit {
    Text(String),
    Embed(Embed),
}

impl ContentUnit {
    /// Length in content units.
    pub fn len(&self) -> usize {
        return match self {
            ContentUnit::Text(text) => text.chars().count(),
            ContentUnit::Embed(_) => 1,
        };
    }

    pub fn is_empty(&self) -> bool {
        return match self {
            ContentUnit::Text(text) => text.is_empty(),
            ContentUnit::Embed(_) => false,
        };
    }
}

impl From<&str> for ContentUnit {
    fn from(text: &str) -> ContentUnit {
        return ContentUnit::Text(text.to_string());
    }
}

impl From<String> for ContentUnit {
    fn from(text: String) -> ContentUnit {
        return ContentUnit::Text(text);
    }
}

impl From<Embed> for ContentUnit {
    fn from(embed: Embed) -> ContentUnit {
        return ContentUnit::Embed(embed);
    }
}

/// Split `text` after `n` characters.
pub(crate) fn split_chars(text: &str, n: usize) -> (&str, &str) {
    let at = text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len());
    return text.split_at(at);
}

/// One op of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOp {
    pub insert: ContentUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl InsertOp {
    /// Build an op, collapsing empty attributes to `None`.
    pub fn new(insert: impl Into<ContentUnit>, attributes: Option<Attributes>) -> InsertOp {
        return InsertOp {
            insert: insert.into(),
            attributes: attributes.and_then(Attributes::non_empty),
        };
    }

    /// A text op without attributes.
    pub fn text(text: impl Into<String>) -> InsertOp {
        return InsertOp::new(ContentUnit::Text(text.into()), None);
    }

    pub fn len(&self) -> usize {
        return self.insert.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.insert.is_empty();
    }

    /// The detection id on this op, if any.
    pub fn detection_id(&self) -> Option<&str> {
        return self.attributes.as_ref().and_then(Attributes::detection_id);
    }
}

/// One op of an edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Op {
    Insert {
        insert: ContentUnit,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Attributes>,
    },
    Retain {
        retain: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<AttributePatch>,
    },
    Delete {
        delete: usize,
    },
}

impl Op {
    /// Length in content units: inserted, retained, or deleted.
    pub fn len(&self) -> usize {
        return match self {
            Op::Insert { insert, .. } => insert.len(),
            Op::Retain { retain, .. } => *retain,
            Op::Delete { delete } => *delete,
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}

/// An edit: an ordered list of retain, insert, and delete ops.
///
/// `push` keeps the list normalized: empty ops are dropped, neighbours with
/// the same kind and attributes are merged, and an insert that follows a
/// delete is moved in front of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Delta {
        return Delta { ops: Vec::new() };
    }

    pub fn ops(&self) -> &[Op] {
        return &self.ops;
    }

    /// Keep `n` units, optionally reformatting them.
    pub fn retain(&mut self, n: usize, attributes: Option<AttributePatch>) -> &mut Delta {
        let attributes = attributes.filter(|a| !a.is_empty());
        self.push(Op::Retain { retain: n, attributes });
        return self;
    }

    /// Insert content with optional attributes.
    pub fn insert(&mut self, content: impl Into<ContentUnit>, attributes: Option<Attributes>) -> &mut Delta {
        let attributes = attributes.and_then(Attributes::non_empty);
        self.push(Op::Insert { insert: content.into(), attributes });
        return self;
    }

    /// Remove `n` units.
    pub fn delete(&mut self, n: usize) -> &mut Delta {
        self.push(Op::Delete { delete: n });
        return self;
    }

    /// Append an op, normalizing as described on the type.
    pub fn push(&mut self, op: Op) {
        if op.is_empty() {
            return;
        }

        let mut index = self.ops.len();
        if let (Some(Op::Delete { delete: last }), Op::Delete { delete }) = (self.ops.last_mut(), &op) {
            *last += *delete;
            return;
        }

        // Inserts are placed before a trailing delete.
        if matches!(self.ops.last(), Some(Op::Delete { .. })) && matches!(op, Op::Insert { .. }) {
            index -= 1;
            if index == 0 {
                self.ops.insert(0, op);
                return;
            }
        }

        if index > 0 {
            match (&mut self.ops[index - 1], &op) {
                (
                    Op::Insert { insert: ContentUnit::Text(prev), attributes: prev_attrs },
                    Op::Insert { insert: ContentUnit::Text(next), attributes },
                ) if prev_attrs == attributes => {
                    prev.push_str(next);
                    return;
                }
                (
                    Op::Retain { retain: prev, attributes: prev_attrs },
                    Op::Retain { retain, attributes },
                ) if prev_attrs == attributes => {
                    *prev += *retain;
                    return;
                }
                _ => {}
            }
        }

        self.ops.insert(index, op);
    }

    /// Number of document units this edit reads (retained plus deleted).
    /// Applying the edit needs a document at least this long.
    pub fn base_len(&self) -> usize {
        return self.ops
            .iter()
            .map(|op| match op {
                Op::Insert { .. } => 0,
                other => other.len(),
            })
            .sum();
    }

    /// Net change in document length.
    pub fn change_len(&self) -> isize {
        let mut change = 0isize;
        for op in &self.ops {
            match op {
                Op::Insert { insert, .. } => change += insert.len() as isize,
                Op::Delete { delete } => change -= *delete as isize,
                Op::Retain { .. } => {}
            }
        }
        return change;
    }
}

/// An insert-only document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    ops: Vec<InsertOp>,
}

impl Snapshot {
    pub fn new() -> Snapshot {
        return Snapshot { ops: Vec::new() };
    }

    /// Wrap ops as-is, without merging neighbours.
    pub fn from_ops(ops: Vec<InsertOp>) -> Snapshot {
        return Snapshot { ops };
    }

    /// A document holding one run of plain text.
    pub fn from_text(text: &str) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.push(InsertOp::text(text));
        return snapshot;
    }

    pub fn ops(&self) -> &[InsertOp] {
        return &self.ops;
    }

    pub fn into_ops(self) -> Vec<InsertOp> {
        return self.ops;
    }

    /// Total length in content units.
    pub fn len(&self) -> usize {
        return self.ops.iter().map(InsertOp::len).sum();
    }

    pub fn is_empty(&self) -> bool {
        return self.ops.iter().all(InsertOp::is_empty);
    }

    /// Append an op, merging it into the previous text run when both are
    /// text with equal attributes. Empty text is dropped.
    pub fn push(&mut self, op: InsertOp) {
        if op.is_empty() {
            return;
        }
        if let Some(last) = self.ops.last_mut() {
            if let (ContentUnit::Text(prev), ContentUnit::Text(next)) = (&mut last.insert, &op.insert) {
                if last.attributes == op.attributes {
                    prev.push_str(next);
                    return;
                }
            }
        }
        self.ops.push(op);
    }

    /// The canonical form: empty attributes collapsed and neighbouring runs
    /// merged. Two documents with the same content have the same normal form.
    pub fn normalized(&self) -> Snapshot {
        let mut out = Snapshot::new();
        for op in &self.ops {
            out.push(InsertOp::new(op.insert.clone(), op.attributes.clone()));
        }
        return out;
    }

    /// Compare content, ignoring where runs happen to be split.
    pub fn content_eq(&self, other: &Snapshot) -> bool {
        return self.normalized() == other.normalized();
    }

    /// The plain text of the document, with embeds shown as U+FFFC.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match &op.insert {
                ContentUnit::Text(text) => out.push_str(text),
                ContentUnit::Embed(_) => out.push('\u{FFFC}'),
            }
        }
        return out;
    }
}

impl FromIterator<InsertOp> for Snapshot {
    fn from_iter<T: IntoIterator<Item = InsertOp>>(iter: T) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for op in iter {
            snapshot.push(op);
        }
        return snapshot;
    }
}

impl TryFrom<Delta> for Snapshot {
    type Error = FuzzError;

    /// Fails if any op is a retain or delete.
    fn try_from(delta: Delta) -> Result<Snapshot, FuzzError> {
        let mut ops = Vec::with_capacity(delta.ops.len());
        for (index, op) in delta.ops.into_iter().enumerate() {
            match op {
                Op::Insert { insert, attributes } => ops.push(InsertOp { insert, attributes }),
                _ => return Err(FuzzError::NotInsertOnly { index }),
            }
        }
        return Ok(Snapshot { ops });
    }
}

impl From<Snapshot> for Delta {
    fn from(snapshot: Snapshot) -> Delta {
        let mut delta = Delta::new();
        for op in snapshot.ops {
            delta.insert(op.insert, op.attributes);
        }
        return delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Attributes {
        return Attributes::new().with("bold", AttrValue::Bool(true));
    }

    #[test]
    fn text_length_counts_chars() {
        assert_eq!(ContentUnit::from("naïve").len(), 5);
        assert_eq!(ContentUnit::Embed(Embed::Number(1)).len(), 1);
    }

    #[test]
    fn split_chars_respects_boundaries() {
        assert_eq!(split_chars("héllo", 2), ("hé", "llo"));
        assert_eq!(split_chars("abc", 3), ("abc", ""));
        assert_eq!(split_chars("abc", 10), ("abc", ""));
    }

    #[test]
    fn push_drops_empty_ops() {
        let mut delta = Delta::new();
        delta.retain(0, None).delete(0).insert("", None);
        assert!(delta.ops().is_empty());
    }

    #[test]
    fn push_merges_neighbours() {
        let mut delta = Delta::new();
        delta.retain(2, None).retain(3, None);
        delta.insert("ab", None).insert("cd", None);
        delta.delete(1).delete(2);
        assert_eq!(delta.ops(), &[
            Op::Retain { retain: 5, attributes: None },
            Op::Insert { insert: "abcd".into(), attributes: None },
            Op::Delete { delete: 3 },
        ]);
    }

    #[test]
    fn push_keeps_differently_formatted_inserts_apart() {
        let mut delta = Delta::new();
        delta.insert("a", None).insert("b", Some(bold()));
        assert_eq!(delta.ops().len(), 2);
    }

    #[test]
    fn insert_moves_before_delete() {
        let mut delta = Delta::new();
        delta.retain(1, None).delete(2).insert("x", None);
        assert_eq!(delta.ops(), &[
            Op::Retain { retain: 1, attributes: None },
            Op::Insert { insert: "x".into(), attributes: None },
            Op::Delete { delete: 2 },
        ]);

        let mut leading = Delta::new();
        leading.delete(2).insert("y", None);
        assert_eq!(leading.ops()[0], Op::Insert { insert: "y".into(), attributes: None });
    }

    #[test]
    fn base_and_change_len() {
        let mut delta = Delta::new();
        delta.retain(3, None).insert("xy", None).delete(4);
        assert_eq!(delta.base_len(), 7);
        assert_eq!(delta.change_len(), -2);
    }

    #[test]
    fn snapshot_rejects_non_inserts() {
        let mut delta = Delta::new();
        delta.insert("ab", None).retain(1, None);
        match Snapshot::try_from(delta) {
            Err(FuzzError::NotInsertOnly { index }) => assert_eq!(index, 1),
            other => panic!("expected NotInsertOnly, got {:?}", other),
        }
    }

    #[test]
    fn content_eq_ignores_split_points() {
        let split = Snapshot::from_ops(vec![
            InsertOp::text("hel"),
            InsertOp::text("lo"),
            InsertOp::new("!", Some(bold())),
        ]);
        let merged = Snapshot::from_ops(vec![
            InsertOp::text("hello"),
            InsertOp::new("!", Some(bold())),
        ]);
        assert_ne!(split, merged);
        assert!(split.content_eq(&merged));
    }

    #[test]
    fn embeds_never_merge() {
        let mut snapshot = Snapshot::new();
        snapshot.push(InsertOp::new(Embed::Number(1), None));
        snapshot.push(InsertOp::new(Embed::Number(1), None));
        assert_eq!(snapshot.ops().len(), 2);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.plain_text(), "\u{FFFC}\u{FFFC}");
    }

    #[test]
    fn serializes_like_a_delta() {
        let mut delta = Delta::new();
        delta.retain(2, None).insert("hi", Some(bold())).delete(1);
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"ops":[{"retain":2},{"insert":"hi","attributes":{"bold":true}},{"delete":1}]}"#);

        let back: Delta = serde_json::from_str(&json).unwrap();
        assert_eq!(back, delta);
    }

    #[test]
    fn embeds_deserialize() {
        let op: InsertOp = serde_json::from_str(r#"{"insert":{"image":"http://quilljs.com"}}"#).unwrap();
        assert_eq!(op.insert, ContentUnit::Embed(Embed::Image { image: "http://quilljs.com".to_string() }));
        let op: InsertOp = serde_json::from_str(r#"{"insert":2}"#).unwrap();
        assert_eq!(op.len(), 1);
    }
}
