// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! The random edit generator.
//!
//! Each call builds one edit against a document and, independently of any
//! document type, predicts the document that applying the edit produces.
//!
//! The generator walks a private copy of the input from left to right. Every
//! step skips a few units (a retain, copied verbatim into the prediction),
//! then picks an action from the action table:
//!
//! - inserts go into both the edit and the prediction and consume nothing;
//! - deletes consume units from the copy and drop them;
//! - formats consume units from the copy and copy them into the prediction
//!   with the sampled attributes composed on top.
//!
//! Steps repeat while content remains, each time with a fixed chance of
//! stopping early, so an edit may only touch a prefix of the document. The
//! untouched tail is appended to the prediction, and finally detection spans
//! broken by the edit are stripped.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing::trace;

use crate::config::GeneratorConfig;
use crate::delta::ContentUnit;
use crate::delta::Delta;
use crate::delta::InsertOp;
use crate::delta::Snapshot;
use crate::error::FuzzError;
use crate::random::IdSource;
use crate::random::RandomSource;
use crate::random::SeededUuids;

use super::action::Action;
use super::action::ActionTable;
use super::consume::SpanQueue;
use super::detection;
use super::format::sample_embed;
use super::format::sample_format;

/// Seeds the id stream apart from the action stream of a seeded generator.
const ID_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Generates random edits and their predicted results.
///
/// Holds no state between calls other than its random and id sources.
#[derive(Clone, Debug)]
pub struct OpGenerator<R, I> {
    random: R,
    ids: I,
    config: GeneratorConfig,
}

impl OpGenerator<StdRng, SeededUuids> {
    /// A fully reproducible generator: the same seed yields the same edits
    /// and the same detection ids.
    pub fn seeded(seed: u64, config: GeneratorConfig) -> Result<OpGenerator<StdRng, SeededUuids>, FuzzError> {
        return OpGenerator::new(
            StdRng::seed_from_u64(seed),
            SeededUuids::new(seed ^ ID_STREAM),
            config,
        );
    }
}

impl<R: RandomSource, I: IdSource> OpGenerator<R, I> {
    /// Fails with `InvalidConfig` if `config` does not pass
    /// `GeneratorConfig::validate`.
    pub fn new(random: R, ids: I, config: GeneratorConfig) -> Result<OpGenerator<R, I>, FuzzError> {
        config.validate()?;
        return Ok(OpGenerator { random, ids, config });
    }

    /// Build one random edit against `snapshot` and predict its result.
    ///
    /// `snapshot` is never modified. Retains and deletes in the returned
    /// edit never reach past the end of `snapshot`.
    pub fn generate(&mut self, snapshot: &Snapshot) -> Result<(Delta, Snapshot), FuzzError> {
        let original = detection::covered_lengths(snapshot);
        let mut live: Vec<&str> = original.keys().map(String::as_str).collect();
        live.sort_unstable();

        let mut length = snapshot.len();
        let table = ActionTable::for_length(length, self.config.long_document_threshold);
        let mut queue = SpanQueue::from(snapshot.clone());
        let mut edit = Delta::new();
        let mut result = Snapshot::new();

        loop {
            let skip = self.random.random_int(length.min(self.config.max_skip) + 1);
            length -= skip;
            let modify = length.min(self.random.random_int(self.config.max_modification) + 1);

            edit.retain(skip, None);
            for op in queue.take(skip)? {
                result.push(op);
            }

            let action = table.pick(&mut self.random);
            trace!(?action, skip, modify, remaining = length, "generator step");
            match action {
                Action::InsertText => {
                    let word = self.random.random_word();
                    edit.insert(word.as_str(), None);
                    result.push(InsertOp::text(word));
                }
                Action::InsertFormatted => {
                    let word = self.random.random_word();
                    let attributes = sample_format(&mut self.random, &mut self.ids, &self.config, false, &live)
                        .and_then(|patch| patch.into_attributes());
                    edit.insert(word.as_str(), attributes.clone());
                    result.push(InsertOp::new(word, attributes));
                }
                Action::InsertEmbed => {
                    let embed = ContentUnit::Embed(sample_embed(&mut self.random));
                    let attributes = sample_format(&mut self.random, &mut self.ids, &self.config, false, &live)
                        .and_then(|patch| patch.into_attributes());
                    edit.insert(embed.clone(), attributes.clone());
                    result.push(InsertOp::new(embed, attributes));
                }
                Action::Format => {
                    let patch = sample_format(&mut self.random, &mut self.ids, &self.config, true, &live);
                    edit.retain(modify, patch.clone());
                    for op in queue.take(modify)? {
                        let attributes = match &patch {
                            Some(patch) => patch.apply_to(op.attributes.as_ref()),
                            None => op.attributes,
                        };
                        result.push(InsertOp::new(op.insert, attributes));
                    }
                    length -= modify;
                }
                Action::Delete => {
                    queue.take(modify)?;
                    edit.delete(modify);
                    length -= modify;
                }
            }

            if length == 0 || self.random.random_real() >= self.config.continue_probability {
                break;
            }
        }

        for op in queue.into_rest() {
            result.push(op);
        }

        let repair = detection::validate(&result, &original);
        debug!(
            input_len = snapshot.len(),
            output_len = repair.snapshot.len(),
            ops = edit.ops().len(),
            live = live.len(),
            broken = repair.broken.len(),
            "generated edit"
        );
        return Ok((edit, repair.snapshot));
    }
}
