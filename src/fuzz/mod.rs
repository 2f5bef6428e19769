// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Random edit generation and the detection continuity oracle.

pub mod action;
pub mod consume;
pub mod detection;
pub mod format;
pub mod generator;

pub use generator::OpGenerator;
