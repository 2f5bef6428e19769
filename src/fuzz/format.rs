// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Random formats and embeds.
//!
//! Every catalog key is considered independently and included half the time.
//! Option lists contain a `None` entry, which becomes a clearing marker when
//! clearing is allowed (formatting an existing range) and is dropped when it
//! isn't (inserting new content). Detection ids are never picked from a list:
//! they are minted fresh so that every formatted range gets its own span.

use tracing::trace;

use crate::config::GeneratorConfig;
use crate::delta::AttrValue;
use crate::delta::AttributePatch;
use crate::delta::Embed;
use crate::delta::DETECTION_ID;
use crate::random::IdSource;
use crate::random::RandomSource;

const COLORS: &[Option<&str>] = &[
    Some("red"),
    Some("orange"),
    Some("yellow"),
    Some("green"),
    Some("blue"),
    Some("purple"),
    None,
];

const FONTS: &[Option<&str>] = &[Some("serif"), Some("sans-serif"), Some("monospace"), None];

const FLAGS: &[Option<bool>] = &[Some(true), None];

/// Target for every sampled image or url embed.
const EMBED_URL: &str = "http://quilljs.com";

/// The keys of the format catalog, in sampling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKey {
    Color,
    Font,
    Bold,
    Italic,
    DetectionId,
}

impl FormatKey {
    pub const ALL: [FormatKey; 5] = [
        FormatKey::Color,
        FormatKey::Font,
        FormatKey::Bold,
        FormatKey::Italic,
        FormatKey::DetectionId,
    ];

    /// The attribute name this key is stored under.
    pub fn name(self) -> &'static str {
        return match self {
            FormatKey::Color => "color",
            FormatKey::Font => "font",
            FormatKey::Bold => "bold",
            FormatKey::Italic => "italic",
            FormatKey::DetectionId => DETECTION_ID,
        };
    }

    /// Pick uniformly from this key's option list. `None` is the list's
    /// clearing option. Detection ids have no list and always yield `None`.
    fn pick(self, random: &mut impl RandomSource) -> Option<AttrValue> {
        return match self {
            FormatKey::Color => pick(random, COLORS).map(AttrValue::text),
            FormatKey::Font => pick(random, FONTS).map(AttrValue::text),
            FormatKey::Bold | FormatKey::Italic => pick(random, FLAGS).map(AttrValue::Bool),
            FormatKey::DetectionId => None,
        };
    }
}

fn pick<T: Copy>(random: &mut impl RandomSource, options: &[Option<T>]) -> Option<T> {
    return options[random.random_int(options.len())];
}

/// Sample a random format.
///
/// With `include_null` set, the result may clear keys. Without it, any
/// returned patch holds only concrete values. Returns `None` when no key was
/// chosen. `live_ids` are the detection ids already in the document; they are
/// only reported, never reused.
pub fn sample_format(
    random: &mut impl RandomSource,
    ids: &mut impl IdSource,
    config: &GeneratorConfig,
    include_null: bool,
    live_ids: &[&str],
) -> Option<AttributePatch> {
    let mut patch = AttributePatch::new();
    for key in FormatKey::ALL {
        if random.random_real() >= config.attribute_probability {
            continue;
        }
        match key {
            FormatKey::DetectionId => {
                if random.random_real() < config.fresh_detection_probability {
                    patch.set(key.name(), AttrValue::Text(ids.mint()));
                } else if include_null {
                    patch.clear(key.name());
                }
            }
            _ => match key.pick(random) {
                Some(value) => patch.set(key.name(), value),
                None if include_null => patch.clear(key.name()),
                None => {}
            },
        }
    }

    trace!(keys = patch.len(), include_null, live = live_ids.len(), "sampled format");
    if patch.is_empty() {
        return None;
    }
    return Some(patch);
}

/// Sample one of the embed kinds.
pub fn sample_embed(random: &mut impl RandomSource) -> Embed {
    return match random.random_int(4) {
        0 => Embed::Number(1),
        1 => Embed::Number(2),
        2 => Embed::Image { image: EMBED_URL.to_string() },
        _ => Embed::Url { url: EMBED_URL.to_string() },
    };
}
