// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Generator tuning knobs.
//!
//! The defaults keep edits small and bias toward deletion on long documents,
//! so a long fuzz run stays bounded. Every field can be overridden from JSON;
//! missing fields fall back to the defaults.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FuzzError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Largest number of units skipped (retained) before each action.
    pub max_skip: usize,
    /// Largest number of units a delete or format action touches.
    pub max_modification: usize,
    /// Documents longer than this use the delete-heavy action table.
    pub long_document_threshold: usize,
    /// Chance of emitting another action while content remains.
    pub continue_probability: f64,
    /// Chance that the format sampler includes any one catalog key.
    pub attribute_probability: f64,
    /// Chance that a sampled detection id is freshly minted rather than
    /// cleared.
    pub fresh_detection_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        return GeneratorConfig {
            max_skip: 5,
            max_modification: 4,
            long_document_threshold: 100,
            continue_probability: 0.5,
            attribute_probability: 0.5,
            fresh_detection_probability: 0.8,
        };
    }
}

impl GeneratorConfig {
    /// Check that the config can drive the generator.
    pub fn validate(&self) -> Result<(), FuzzError> {
        if self.max_modification == 0 {
            return Err(FuzzError::InvalidConfig("max_modification must be at least 1".to_string()));
        }
        let probabilities = [
            ("continue_probability", self.continue_probability),
            ("attribute_probability", self.attribute_probability),
            ("fresh_detection_probability", self.fresh_detection_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(FuzzError::InvalidConfig(format!("{} must be within [0, 1], got {}", name, p)));
            }
        }
        return Ok(());
    }

    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<GeneratorConfig, FuzzError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        return Ok(config);
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<GeneratorConfig, FuzzError> {
        let json = std::fs::read_to_string(path)?;
        return GeneratorConfig::from_json(&json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GeneratorConfig::from_json(r#"{"max_skip": 2}"#).unwrap();
        assert_eq!(config.max_skip, 2);
        assert_eq!(config.long_document_threshold, 100);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let err = GeneratorConfig::from_json(r#"{"continue_probability": 1.5}"#).unwrap_err();
        assert!(matches!(err, FuzzError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_modification() {
        let err = GeneratorConfig::from_json(r#"{"max_modification": 0}"#).unwrap_err();
        assert!(matches!(err, FuzzError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GeneratorConfig::from_json("{").unwrap_err();
        assert!(matches!(err, FuzzError::ConfigParse(_)));
    }
}
