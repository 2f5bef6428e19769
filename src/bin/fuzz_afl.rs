//! AFL fuzz harness for the edit generator.
//!
//! Each input becomes a seed and a starting document (see `ByteCase`). The
//! harness runs a short chain of generated edits through the reference
//! rich-text type and crashes on any disagreement, so AFL can minimize the
//! input. Replay a crash with `fuzz_delta --repro <crash_file>`.

use afl::fuzz;
use deltafuzz::config::GeneratorConfig;
use deltafuzz::delta::RichText;
use deltafuzz::driver;
use deltafuzz::driver::ByteCase;
use deltafuzz::fuzz::OpGenerator;

/// Edits applied per input.
const ITERATIONS: usize = 32;

fn main() {
    fuzz!(|data: &[u8]| {
        let Some(case) = ByteCase::from_bytes(data) else {
            return;
        };

        let mut generator = match OpGenerator::seeded(case.seed, GeneratorConfig::default()) {
            Ok(generator) => generator,
            Err(err) => panic!("default config rejected: {}", err),
        };
        if let Err(err) = driver::run_from(&RichText, |s| generator.generate(s), case.initial, ITERATIONS) {
            panic!("seed {}: {}", case.seed, err);
        }
    });
}
