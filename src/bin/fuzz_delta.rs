//! Run the edit generator against the reference rich-text type.
//!
//! Usage:
//!   cargo run --bin fuzz_delta -- --seed 1 --iterations 1000 --rounds 10
//!   cargo run --bin fuzz_delta -- --repro <afl_crash_file>
//!
//! Each round uses seed `seed + round`, so a failing round can be rerun on
//! its own. Logging follows `RUST_LOG` (default `info`). On a mismatch the
//! reproduction is printed to stdout as JSON and the process exits non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deltafuzz::config::GeneratorConfig;
use deltafuzz::delta::RichText;
use deltafuzz::delta::Snapshot;
use deltafuzz::driver;
use deltafuzz::driver::ByteCase;
use deltafuzz::fuzz::OpGenerator;
use deltafuzz::FuzzError;

#[derive(Debug, Parser)]
#[command(about = "Fuzz rich-text edits against a convergence oracle")]
struct Args {
    /// Seed for the first round.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Edits per round.
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// Independent rounds, each starting from the initial document.
    #[arg(long, default_value_t = 1)]
    rounds: u64,

    /// Generator config as JSON. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial document text.
    #[arg(long, default_value = "")]
    initial: String,

    /// Replay a raw fuzzer input (seed and initial text) instead.
    #[arg(long, conflicts_with_all = ["seed", "initial", "rounds"])]
    repro: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match fuzz(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(FuzzError::ConvergenceMismatch { iteration, mismatch }) => {
            error!(iteration, "convergence mismatch");
            match serde_json::to_string_pretty(&mismatch) {
                Ok(json) => println!("{}", json),
                Err(err) => error!(%err, "failed to serialize mismatch"),
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(%err, "fuzz run failed");
            ExitCode::FAILURE
        }
    }
}

fn fuzz(args: &Args) -> Result<(), FuzzError> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let cases: Vec<ByteCase> = match &args.repro {
        Some(path) => {
            let data = std::fs::read(path)?;
            let case = ByteCase::from_bytes(&data).ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "fuzzer input shorter than a seed")
            })?;
            vec![case]
        }
        None => (0..args.rounds)
            .map(|round| ByteCase {
                seed: args.seed.wrapping_add(round),
                initial: Snapshot::from_text(&args.initial),
            })
            .collect(),
    };

    for case in cases {
        info!(seed = case.seed, len = case.initial.len(), "starting round");
        let mut generator = OpGenerator::seeded(case.seed, config.clone())?;
        let report = driver::run_from(&RichText, |s| generator.generate(s), case.initial, args.iterations)?;
        info!(
            seed = case.seed,
            edit_ops = report.edit_ops,
            max_len = report.max_len,
            final_len = report.final_len,
            "round passed"
        );
    }
    return Ok(());
}
