// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Sources of randomness and unique ids.
//!
//! The generator only talks to these traits, so a run can be driven by a
//! seeded rng for reproducible failures, by the OS for broad coverage, or by
//! a fixed script in unit tests.

use rand::rngs::StdRng;
use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use uuid::Builder;
use uuid::Uuid;

/// Words handed out by `random_word`. A few are multi-byte so that text
/// splitting is exercised on character boundaries.
const WORDS: &[&str] = &[
    "a", "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog",
    "lorem", "ipsum", "dolor", "sit", "amet", "delta", "retain", "insert",
    "naïve", "café", "über", "日本", "😀", "x", "hello", "world",
];

/// Uniform random choices.
pub trait RandomSource {
    /// An integer in `[0, n)`. `n` must be at least 1.
    fn random_int(&mut self, n: usize) -> usize;

    /// A real in `[0, 1)`.
    fn random_real(&mut self) -> f64;

    /// A short non-empty word.
    fn random_word(&mut self) -> String;
}

impl<R: RngCore> RandomSource for R {
    fn random_int(&mut self, n: usize) -> usize {
        return self.gen_range(0..n);
    }

    fn random_real(&mut self) -> f64 {
        return self.r#gen::<f64>();
    }

    fn random_word(&mut self) -> String {
        return WORDS[self.gen_range(0..WORDS.len())].to_string();
    }
}

/// Mints effectively collision-free string tokens.
pub trait IdSource {
    fn mint(&mut self) -> String;
}

/// Random v4 uuids from the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn mint(&mut self) -> String {
        return Uuid::new_v4().to_string();
    }
}

/// v4 uuids drawn from a seeded rng, so a seed reproduces the same ids.
#[derive(Clone, Debug)]
pub struct SeededUuids {
    rng: StdRng,
}

impl SeededUuids {
    pub fn new(seed: u64) -> SeededUuids {
        return SeededUuids { rng: StdRng::seed_from_u64(seed) };
    }
}

impl IdSource for SeededUuids {
    fn mint(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        return Builder::from_random_bytes(bytes).into_uuid().to_string();
    }
}

/// `prefix-0`, `prefix-1`, ... Readable ids for tests and debugging.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> SequentialIds {
        return SequentialIds { prefix: prefix.into(), next: 0 };
    }
}

impl IdSource for SequentialIds {
    fn mint(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        return id;
    }
}

/// A random source that replays fixed choices, for pinning down exact
/// generator paths in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    ints: std::collections::VecDeque<usize>,
    reals: std::collections::VecDeque<f64>,
    words: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(ints: &[usize], reals: &[f64], words: &[&str]) -> ScriptedRandom {
        return ScriptedRandom {
            ints: ints.iter().copied().collect(),
            reals: reals.iter().copied().collect(),
            words: words.iter().map(|w| w.to_string()).collect(),
        };
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        return self.ints.is_empty() && self.reals.is_empty() && self.words.is_empty();
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, n: usize) -> usize {
        let value = self.ints.pop_front().expect("script ran out of ints");
        assert!(value < n, "scripted int {} out of range 0..{}", value, n);
        return value;
    }

    fn random_real(&mut self) -> f64 {
        return self.reals.pop_front().expect("script ran out of reals");
    }

    fn random_word(&mut self) -> String {
        return self.words.pop_front().expect("script ran out of words");
    }
}
