//! Evaluation configuration.
//!
//! Everything that is a policy choice rather than a system invariant
//! lives here: the declared experiment matrix, the severity
//! thresholds, the nominal payload size, and the on-disk naming scheme.
//! The tool runs with built-in defaults when no config file is given.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::analysis::types::{AttackType, MitigationStage};
use crate::error::EvalError;

/// The declared experiment matrix: which scenario keys the sweep expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixConfig {
    pub attack_types: Vec<AttackType>,
    /// Attack intensities in percent of compromised nodes, ascending.
    pub intensities: Vec<u32>,
    pub stages: Vec<MitigationStage>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            attack_types: vec![
                AttackType::Wormhole,
                AttackType::Blackhole,
                AttackType::Sybil,
                AttackType::Replay,
                AttackType::RouteTamper,
                AttackType::Combined,
            ],
            intensities: vec![20, 40, 60, 80, 100],
            stages: MitigationStage::ALL.to_vec(),
        }
    }
}

/// Severity thresholds on the combined pdr-drop + delay-increase score.
///
/// These are calibration choices copied from the research scripts, not
/// invariants, which is why they are configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeverityThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self { critical: 1.0, high: 0.5, medium: 0.2 }
    }
}

/// Numeric policy knobs for metric computation and classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    /// Nominal payload size used for the throughput estimate. The tracker
    /// does not record per-packet byte counts, so this stands in for true
    /// byte accounting.
    pub payload_bytes: u64,
    pub severity: SeverityThresholds,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { payload_bytes: 512, severity: SeverityThresholds::default() }
    }
}

/// How scenario keys map to result directories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamingConfig {
    /// Dataset file expected inside each scenario directory.
    pub dataset_file: String,
    /// Optional directory-name template with `{attack}`, `{intensity}` and
    /// `{stage}` placeholders. When unset the canonical scheme is used.
    pub dir_template: Option<String>,
    /// Also try the test-number-prefixed names the old shell harness wrote.
    pub legacy_names: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            dataset_file: "packet-delivery-analysis.csv".to_string(),
            dir_template: None,
            legacy_names: true,
        }
    }
}

/// Top-level evaluation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvalConfig {
    #[serde(default)]
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub naming: NamingConfig,
}

impl EvalConfig {
    /// Validate the configuration. Failures here are fatal at startup.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.matrix.attack_types.is_empty() {
            return Err(EvalError::Configuration(
                "matrix.attack_types cannot be empty".to_string(),
            ));
        }
        if self.matrix.attack_types.contains(&AttackType::None) {
            return Err(EvalError::Configuration(
                "matrix.attack_types must not list 'none'; the baseline is implicit".to_string(),
            ));
        }
        if self.matrix.intensities.is_empty() {
            return Err(EvalError::Configuration(
                "matrix.intensities cannot be empty".to_string(),
            ));
        }
        if self.matrix.stages.is_empty() {
            return Err(EvalError::Configuration(
                "matrix.stages cannot be empty".to_string(),
            ));
        }

        let t = &self.policy.severity;
        if !(t.critical > t.high && t.high > t.medium && t.medium > 0.0) {
            return Err(EvalError::Configuration(format!(
                "severity thresholds must satisfy critical > high > medium > 0 \
                 (got {} / {} / {})",
                t.critical, t.high, t.medium
            )));
        }

        if self.policy.payload_bytes == 0 {
            return Err(EvalError::Configuration(
                "policy.payload_bytes must be positive".to_string(),
            ));
        }

        if self.naming.dataset_file.trim().is_empty() {
            return Err(EvalError::Configuration(
                "naming.dataset_file cannot be empty".to_string(),
            ));
        }

        if let Some(template) = &self.naming.dir_template {
            for placeholder in ["{attack}", "{intensity}", "{stage}"] {
                if !template.contains(placeholder) {
                    return Err(EvalError::Configuration(format!(
                        "naming.dir_template {template:?} is missing the {placeholder} placeholder"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> color_eyre::Result<EvalConfig> {
    log::info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)?;
    let config: EvalConfig = serde_yaml::from_reader(file)?;
    config.validate()?;

    Ok(config)
}
