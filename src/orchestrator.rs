//! High-level orchestration of one evaluation run.
//!
//! Declares the scenario matrix from configuration, fans the per-scenario
//! loads out across the rayon pool (each scenario owns exactly one key, so
//! the loads share nothing), joins, populates the result matrix on the
//! calling thread, and derives the comparison tables.

use std::path::Path;

use rayon::prelude::*;

use crate::analysis::compare::build_comparison_rows;
use crate::analysis::matrix::ResultMatrix;
use crate::analysis::resolver::ScenarioResolver;
use crate::analysis::types::{
    EvaluationReport, ReportMetadata, ScenarioKey, ScenarioSummaryRow, SkippedScenario,
};
use crate::config::EvalConfig;
use crate::error::EvalError;

/// All scenario keys the configured matrix declares, baseline first.
pub fn declared_matrix(config: &EvalConfig) -> Vec<ScenarioKey> {
    let mut keys = vec![ScenarioKey::baseline()];
    for &attack in &config.matrix.attack_types {
        for &intensity in &config.matrix.intensities {
            for &stage in &config.matrix.stages {
                keys.push(ScenarioKey::new(attack, intensity, stage));
            }
        }
    }
    keys
}

/// Run the full evaluation pipeline over one results tree.
///
/// Per-scenario problems never abort the run: missing and failed scenarios
/// are recorded in the report's skipped list and everything loadable still
/// contributes. Only configuration errors are fatal.
pub fn run_evaluation(
    results_root: &Path,
    config: &EvalConfig,
) -> Result<(ResultMatrix, EvaluationReport), EvalError> {
    config.validate()?;

    let keys = declared_matrix(config);
    log::info!(
        "Evaluating {} declared scenarios under {}",
        keys.len(),
        results_root.display()
    );

    let resolver = ScenarioResolver::new(results_root, config);

    // Scenario loads are independent; fan out and join before any
    // comparison is computed.
    let loaded: Vec<_> = keys
        .par_iter()
        .map(|key| (*key, resolver.load(key)))
        .collect();

    let mut matrix = ResultMatrix::new();
    for (key, data) in loaded {
        matrix.register(key, data);
    }

    let report = build_report(results_root, config, &matrix, keys.len());
    log::info!(
        "Loaded {} scenarios, skipped {}",
        report.metadata.scenarios_loaded,
        report.metadata.scenarios_skipped
    );

    Ok((matrix, report))
}

/// Derive the report tables from a populated matrix.
pub fn build_report(
    results_root: &Path,
    config: &EvalConfig,
    matrix: &ResultMatrix,
    declared: usize,
) -> EvaluationReport {
    let mut summaries = Vec::new();
    let mut skipped = Vec::new();

    for (key, data) in matrix.iter() {
        match data.metrics() {
            Some(metrics) => summaries.push(ScenarioSummaryRow {
                key: *key,
                label: key.label(),
                metrics: metrics.clone(),
            }),
            None => {
                let reason = data.skip_reason().unwrap_or_default();
                log::warn!("Skipping {key}: {reason}");
                skipped.push(SkippedScenario { key: *key, label: key.label(), reason });
            }
        }
    }

    let comparisons = build_comparison_rows(matrix, &config.policy.severity);

    EvaluationReport {
        metadata: ReportMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            results_root: results_root.display().to_string(),
            scenarios_declared: declared,
            scenarios_loaded: summaries.len(),
            scenarios_skipped: skipped.len(),
        },
        baseline: matrix.baseline().cloned(),
        summaries,
        comparisons,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{AttackType, MitigationStage};

    #[test]
    fn test_declared_matrix_shape() {
        let config = EvalConfig::default();
        let keys = declared_matrix(&config);

        // baseline + 6 attacks × 5 intensities × 3 stages
        assert_eq!(keys.len(), 1 + 6 * 5 * 3);
        assert_eq!(keys[0], ScenarioKey::baseline());
        assert!(keys[1..].iter().all(|k| !k.is_baseline()));
    }

    #[test]
    fn test_declared_matrix_respects_config() {
        let mut config = EvalConfig::default();
        config.matrix.attack_types = vec![AttackType::Wormhole];
        config.matrix.intensities = vec![50];
        config.matrix.stages = vec![MitigationStage::NoMitigation];

        let keys = declared_matrix(&config);
        assert_eq!(keys.len(), 2);
        assert_eq!(
            keys[1],
            ScenarioKey::new(AttackType::Wormhole, 50, MitigationStage::NoMitigation)
        );
    }

    #[test]
    fn test_empty_root_reports_everything_skipped() {
        let root = tempfile::tempdir().unwrap();
        let config = EvalConfig::default();

        let (matrix, report) = run_evaluation(root.path(), &config).unwrap();
        assert!(matrix.baseline().is_none());
        assert_eq!(report.metadata.scenarios_loaded, 0);
        assert_eq!(report.metadata.scenarios_skipped, report.metadata.scenarios_declared);
        assert!(report.comparisons.iter().all(|r| r.severity.is_none()));
    }
}
