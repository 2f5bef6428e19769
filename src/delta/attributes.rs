// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Attribute maps carried by delta ops.
//!
//! Documents only ever hold concrete values (`Attributes`). Edits may also
//! carry clearing markers, which remove a key when composed onto a document
//! (`AttributePatch`, where `None` is the marker and serializes as `null`).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// The attribute key that marks a detection span.
pub const DETECTION_ID: &str = "detectionId";

/// A concrete attribute value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl AttrValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> AttrValue {
        return AttrValue::Text(value.into());
    }

    /// The string payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        return match self {
            AttrValue::Text(text) => Some(text.as_str()),
            AttrValue::Bool(_) => None,
        };
    }
}

/// Attributes stored on a document op. Never contains clearing markers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Attributes {
        return Attributes(BTreeMap::new());
    }

    /// Builder-style insert, handy in tests and literals.
    pub fn with(mut self, key: impl Into<String>, value: AttrValue) -> Attributes {
        self.0.insert(key.into(), value);
        return self;
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        return self.0.get(key);
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        return self.0.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        return self.0.is_empty();
    }

    pub fn len(&self) -> usize {
        return self.0.len();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        return self.0.iter();
    }

    /// The detection id carried by these attributes, if any.
    pub fn detection_id(&self) -> Option<&str> {
        return self.get(DETECTION_ID).and_then(AttrValue::as_str);
    }

    /// Collapse an empty map to "no attributes".
    pub fn non_empty(self) -> Option<Attributes> {
        if self.is_empty() {
            return None;
        }
        return Some(self);
    }
}

/// Attributes carried by an edit. A `None` value clears the key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePatch(BTreeMap<String, Option<AttrValue>>);

impl AttributePatch {
    pub fn new() -> AttributePatch {
        return AttributePatch(BTreeMap::new());
    }

    /// Set a key to a concrete value.
    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.0.insert(key.into(), Some(value));
    }

    /// Set a clearing marker for a key.
    pub fn clear(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    pub fn get(&self, key: &str) -> Option<&Option<AttrValue>> {
        return self.0.get(key);
    }

    pub fn is_empty(&self) -> bool {
        return self.0.is_empty();
    }

    pub fn len(&self) -> usize {
        return self.0.len();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<AttrValue>)> {
        return self.0.iter();
    }

    /// True if the patch holds at least one concrete value.
    pub fn has_value(&self) -> bool {
        return self.0.values().any(Option::is_some);
    }

    /// Drop clearing markers, keeping the concrete values as document
    /// attributes. Inserts never carry clearing markers, so this is how a
    /// sampled patch becomes the attributes of inserted content.
    pub fn into_attributes(self) -> Option<Attributes> {
        let map = self.0
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect();
        return Attributes(map).non_empty();
    }

    /// Compose this patch onto existing document attributes.
    ///
    /// Concrete values overwrite, clearing markers remove, and the result
    /// collapses to `None` when nothing is left.
    pub fn apply_to(&self, base: Option<&Attributes>) -> Option<Attributes> {
        let mut out = base.cloned().unwrap_or_default();
        for (key, value) in &self.0 {
            match value {
                Some(value) => out.insert(key.clone(), value.clone()),
                None => {
                    out.remove(key);
                }
            }
        }
        return out.non_empty();
    }
}
