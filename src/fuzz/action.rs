// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! The weighted choice of what each generator step does.
//!
//! Each table is a list of equally likely slots. Short documents get a
//! balanced table; long ones get extra delete slots so that documents shrink
//! back down instead of growing without bound over a long run.

use crate::random::RandomSource;

/// What one generator step does after skipping ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert a plain word.
    InsertText,
    /// Insert a word with a sampled format.
    InsertFormatted,
    /// Insert an embed with a sampled format.
    InsertEmbed,
    /// Retain a range with a sampled format, possibly clearing keys.
    Format,
    /// Delete a range.
    Delete,
}

const SHORT_SLOTS: [Action; 7] = [
    Action::InsertText,
    Action::InsertFormatted,
    Action::InsertEmbed,
    Action::Format,
    Action::Format,
    Action::Delete,
    Action::Delete,
];

const LONG_SLOTS: [Action; 10] = [
    Action::InsertText,
    Action::InsertFormatted,
    Action::InsertEmbed,
    Action::Format,
    Action::Format,
    Action::Delete,
    Action::Delete,
    Action::Delete,
    Action::Delete,
    Action::Delete,
];

/// A discrete distribution over actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionTable {
    slots: &'static [Action],
}

impl ActionTable {
    /// The table for a document of `length` units. Documents longer than
    /// `threshold` favor deletion.
    pub fn for_length(length: usize, threshold: usize) -> ActionTable {
        if length > threshold {
            return ActionTable { slots: &LONG_SLOTS };
        }
        return ActionTable { slots: &SHORT_SLOTS };
    }

    pub fn slots(&self) -> &'static [Action] {
        return self.slots;
    }

    /// Chance of picking `action` from this table.
    pub fn probability(&self, action: Action) -> f64 {
        let hits = self.slots.iter().filter(|slot| **slot == action).count();
        return hits as f64 / self.slots.len() as f64;
    }

    /// Draw one action.
    pub fn pick(&self, random: &mut impl RandomSource) -> Action {
        return self.slots[random.random_int(self.slots.len())];
    }
}
