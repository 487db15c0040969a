//! Scenario resolution: mapping logical keys to result directories.
//!
//! The canonical scheme derives a directory name purely from the key fields,
//! so adding an attack type or intensity never renumbers anything. The old
//! shell harness instead wrote positional test-number prefixes
//! (test02_wormhole_..., test05_blackhole_...); that coupling is isolated
//! here as a lookup table so existing result trees still resolve.

use std::path::{Path, PathBuf};

use crate::analysis::dataset::Dataset;
use crate::analysis::schema::detect_capabilities;
use crate::analysis::summary::summarize;
use crate::analysis::types::{AttackType, MitigationStage, ScenarioData, ScenarioKey};
use crate::config::EvalConfig;
use crate::error::EvalError;

/// Canonical directory name for a scenario key.
pub fn canonical_dir_name(key: &ScenarioKey) -> String {
    if key.is_baseline() {
        "baseline".to_string()
    } else {
        format!("{}_{}_{}", key.attack, key.intensity, key.stage)
    }
}

/// Legacy directory name as written by the original test harness, if that
/// harness had a slot for this key.
///
/// The prefixes were positional: one block of three test numbers per attack
/// type, one number per stage, and a dedicated test17 slot for the combined
/// attack (which only ever ran with all mitigations active).
pub fn legacy_dir_name(key: &ScenarioKey) -> Option<String> {
    if key.is_baseline() {
        return Some("test01_baseline".to_string());
    }

    if key.attack == AttackType::Combined {
        return match key.stage {
            MitigationStage::FullMitigation => {
                Some(format!("test17_combined_{}_with_all_mitigations", key.intensity))
            }
            _ => None,
        };
    }

    let base = match key.attack {
        AttackType::Wormhole => 2,
        AttackType::Blackhole => 5,
        AttackType::Sybil => 8,
        AttackType::Replay => 11,
        AttackType::RouteTamper => 14,
        _ => return None,
    };
    let offset = match key.stage {
        MitigationStage::NoMitigation => 0,
        MitigationStage::DetectionOnly => 1,
        MitigationStage::FullMitigation => 2,
    };

    Some(format!(
        "test{:02}_{}_{}_{}",
        base + offset,
        key.attack,
        key.intensity,
        key.stage.legacy_str()
    ))
}

/// Expand a user-supplied directory template for a key.
fn template_dir_name(template: &str, key: &ScenarioKey) -> String {
    template
        .replace("{attack}", key.attack.as_str())
        .replace("{intensity}", &key.intensity.to_string())
        .replace("{stage}", key.stage.as_str())
}

/// Resolves scenario keys to datasets under one results root.
pub struct ScenarioResolver<'a> {
    root: &'a Path,
    config: &'a EvalConfig,
}

impl<'a> ScenarioResolver<'a> {
    pub fn new(root: &'a Path, config: &'a EvalConfig) -> Self {
        Self { root, config }
    }

    /// Candidate dataset paths for a key, in resolution order: template (if
    /// configured), canonical name, then legacy harness names.
    pub fn candidate_paths(&self, key: &ScenarioKey) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(template) = &self.config.naming.dir_template {
            dirs.push(template_dir_name(template, key));
        }
        dirs.push(canonical_dir_name(key));
        if self.config.naming.legacy_names {
            if let Some(legacy) = legacy_dir_name(key) {
                dirs.push(legacy);
            }
        }

        dirs.into_iter()
            .map(|d| self.root.join(d).join(&self.config.naming.dataset_file))
            .collect()
    }

    /// Resolve a key to the first candidate dataset that exists on disk.
    pub fn resolve(&self, key: &ScenarioKey) -> Option<PathBuf> {
        self.candidate_paths(key).into_iter().find(|p| p.exists())
    }

    /// Resolve and load one scenario.
    ///
    /// Never returns an error: a key without a dataset is `Missing`, and a
    /// dataset that fails its own declared schema is `Failed`. Either way
    /// the sweep continues.
    pub fn load(&self, key: &ScenarioKey) -> ScenarioData {
        let path = match self.resolve(key) {
            Some(path) => path,
            None => {
                let canonical = self
                    .root
                    .join(canonical_dir_name(key))
                    .join(&self.config.naming.dataset_file);
                log::debug!("No dataset for {key}; tried {} candidates", self.candidate_paths(key).len());
                return ScenarioData::Missing { path: canonical.display().to_string() };
            }
        };

        match self.load_dataset(&path) {
            Ok(metrics) => {
                log::debug!(
                    "Loaded {key} from {}: PDR={:.4}, {} packets",
                    path.display(),
                    metrics.pdr,
                    metrics.total_packets
                );
                ScenarioData::Loaded { metrics }
            }
            Err(EvalError::MissingData { path }) => ScenarioData::Missing { path },
            Err(err) => {
                log::warn!("Failed to load {key} from {}: {err}", path.display());
                ScenarioData::Failed { error: format!("{} ({})", err, path.display()) }
            }
        }
    }

    fn load_dataset(&self, path: &Path) -> Result<crate::analysis::types::SummaryMetrics, EvalError> {
        let dataset = Dataset::from_path(path)?;
        let caps = detect_capabilities(dataset.headers());
        if caps.is_empty() && !dataset.is_empty() {
            log::warn!(
                "{} has no recognized metric columns; metrics will be zero-filled",
                path.display()
            );
        }
        summarize(&dataset, &caps, self.config.policy.payload_bytes)
    }
}
