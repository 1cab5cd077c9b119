//! Run configuration for both assay pipelines.
//!
//! Defaults reproduce the standard bench protocol (duplicates, 20 µg target,
//! 2.5 µL loaded per assay well). `BcaConfig::from_env` lets a deployment override
//! them through environment variables or a `.env` file.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DEFAULT_DILUTION_VOLUME_UL, DEFAULT_TARGET_MASS_UG, ReplicateMode, SampleGating,
};
use crate::error::AssayError;

pub const ENV_REPLICATES: &str = "PLATE_REPLICATES";
pub const ENV_TARGET_MASS_UG: &str = "PLATE_TARGET_MASS_UG";
pub const ENV_DILUTION_VOLUME_UL: &str = "PLATE_DILUTION_VOLUME_UL";
pub const ENV_SAMPLE_GATING: &str = "PLATE_SAMPLE_GATING";

/// Parameters of a BCA protein quantification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BcaConfig {
    pub replicate_mode: ReplicateMode,
    /// Protein mass (µg) each load volume should deliver.
    pub target_mass_ug: f64,
    /// Sample volume (µL) loaded per well during the assay read.
    pub dilution_volume_ul: f64,
    pub gating: SampleGating,
}

impl Default for BcaConfig {
    fn default() -> Self {
        Self {
            replicate_mode: ReplicateMode::Duplicate,
            target_mass_ug: DEFAULT_TARGET_MASS_UG,
            dilution_volume_ul: DEFAULT_DILUTION_VOLUME_UL,
            gating: SampleGating::DropNonPositive,
        }
    }
}

impl BcaConfig {
    /// Load overrides from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AssayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AssayError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_REPLICATES) {
            config.replicate_mode = ReplicateMode::parse(&raw).ok_or_else(|| {
                AssayError::configuration(format!(
                    "{ENV_REPLICATES} must be 'duplicate' or 'triplicate', got '{raw}'"
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_TARGET_MASS_UG) {
            config.target_mass_ug = parse_f64(ENV_TARGET_MASS_UG, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DILUTION_VOLUME_UL) {
            config.dilution_volume_ul = parse_f64(ENV_DILUTION_VOLUME_UL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SAMPLE_GATING) {
            config.gating = SampleGating::parse(&raw).ok_or_else(|| {
                AssayError::configuration(format!(
                    "{ENV_SAMPLE_GATING} must be 'drop' or 'mark', got '{raw}'"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_replicate_mode(mut self, mode: ReplicateMode) -> Self {
        self.replicate_mode = mode;
        self
    }

    pub fn with_target_mass_ug(mut self, target_mass_ug: f64) -> Self {
        self.target_mass_ug = target_mass_ug;
        self
    }

    pub fn with_gating(mut self, gating: SampleGating) -> Self {
        self.gating = gating;
        self
    }

    /// Reject values that would make every downstream quantity meaningless.
    pub fn validate(&self) -> Result<(), AssayError> {
        if !(self.target_mass_ug.is_finite() && self.target_mass_ug > 0.0) {
            return Err(AssayError::configuration(format!(
                "target mass must be a positive number of µg, got {}",
                self.target_mass_ug
            )));
        }
        if !(self.dilution_volume_ul.is_finite() && self.dilution_volume_ul > 0.0) {
            return Err(AssayError::configuration(format!(
                "dilution volume must be a positive number of µL, got {}",
                self.dilution_volume_ul
            )));
        }
        Ok(())
    }
}

/// Parameters of a CTG viability run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtgConfig {
    /// Normalize plate halves on the rayon pool.
    pub parallel: bool,
}

impl Default for CtgConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64, AssayError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| AssayError::configuration(format!("{key} is not a number ('{raw}'): {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_bench_protocol() {
        let config = BcaConfig::default();
        assert_eq!(config.replicate_mode, ReplicateMode::Duplicate);
        assert!((config.target_mass_ug - 20.0).abs() < 1e-12);
        assert!((config.dilution_volume_ul - 2.5).abs() < 1e-12);
        assert_eq!(config.gating, SampleGating::DropNonPositive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = BcaConfig::from_lookup(lookup_from(&[
            (ENV_REPLICATES, "triplicate"),
            (ENV_TARGET_MASS_UG, "15"),
            (ENV_DILUTION_VOLUME_UL, " 5.0 "),
            (ENV_SAMPLE_GATING, "mark"),
        ]))
        .unwrap();

        assert_eq!(config.replicate_mode, ReplicateMode::Triplicate);
        assert!((config.target_mass_ug - 15.0).abs() < 1e-12);
        assert!((config.dilution_volume_ul - 5.0).abs() < 1e-12);
        assert_eq!(config.gating, SampleGating::MarkAbsent);
    }

    #[test]
    fn serialized_config_carries_only_tunable_fields() {
        let json = serde_json::to_value(BcaConfig::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["dilution_volume_ul", "gating", "replicate_mode", "target_mass_ug"]);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = BcaConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BcaConfig::default());
    }

    #[test]
    fn unparsable_override_is_configuration_error() {
        let err =
            BcaConfig::from_lookup(lookup_from(&[(ENV_TARGET_MASS_UG, "twenty")])).unwrap_err();
        assert!(matches!(err, AssayError::Configuration(_)));

        let err = BcaConfig::from_lookup(lookup_from(&[(ENV_REPLICATES, "quadruplicate")]))
            .unwrap_err();
        assert!(matches!(err, AssayError::Configuration(_)));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let err = BcaConfig::default().with_target_mass_ug(0.0).validate().unwrap_err();
        assert!(matches!(err, AssayError::Configuration(_)));

        let config = BcaConfig {
            dilution_volume_ul: -2.5,
            ..BcaConfig::default()
        };
        assert!(matches!(config.validate(), Err(AssayError::Configuration(_))));
    }
}
