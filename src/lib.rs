// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Deltafuzz - a random edit generator and convergence oracle for rich-text
//! operational transformation engines.
//!
//! The generator builds an edit against a document and predicts the result
//! without consulting the engine under test. The fuzz driver applies the
//! edit through a `DocumentType` and checks both agree.
//!
//! # Quick Start
//!
//! ```
//! use deltafuzz::config::GeneratorConfig;
//! use deltafuzz::delta::DocumentType;
//! use deltafuzz::delta::RichText;
//! use deltafuzz::delta::Snapshot;
//! use deltafuzz::fuzz::OpGenerator;
//!
//! let mut generator = OpGenerator::seeded(7, GeneratorConfig::default()).unwrap();
//! let doc = Snapshot::from_text("Hello, World!");
//!
//! let (edit, predicted) = generator.generate(&doc).unwrap();
//! let actual = RichText.apply(&doc, &edit).unwrap();
//! assert!(actual.content_eq(&predicted));
//! ```

pub mod config;
pub mod delta;
pub mod driver;
pub mod error;
pub mod fuzz;
pub mod random;

pub use error::FuzzError;
