//! Comparative metrics: degradation, effectiveness, severity.
//!
//! Pure functions over summary pairs. Every division is guarded: a zero
//! reference yields zero, never infinity or NaN, and a missing input makes
//! the whole comparison missing rather than zero (a zero here would be
//! indistinguishable from a real zero-impact measurement).

use crate::analysis::matrix::ResultMatrix;
use crate::analysis::types::{
    AttackType, ComparisonRecord, ComparisonRow, MitigationStage, ScenarioKey, Severity,
    SummaryMetrics,
};
use crate::config::SeverityThresholds;

/// Signed percentage change of `subject` relative to `reference`.
fn pct_change(subject: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        (subject - reference) / reference * 100.0
    } else {
        0.0
    }
}

/// Classify attack impact from pdr-drop and delay-increase fractions.
pub fn classify_severity(
    subject: &SummaryMetrics,
    reference: &SummaryMetrics,
    thresholds: &SeverityThresholds,
) -> Severity {
    let pdr_drop = if reference.pdr > 0.0 {
        (reference.pdr - subject.pdr) / reference.pdr
    } else {
        0.0
    };
    let delay_increase = if reference.avg_delay_ms > 0.0 {
        (subject.avg_delay_ms - reference.avg_delay_ms) / reference.avg_delay_ms
    } else {
        0.0
    };

    let score = pdr_drop + delay_increase;
    if score > thresholds.critical {
        Severity::Critical
    } else if score > thresholds.high {
        Severity::High
    } else if score > thresholds.medium {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Full subject-vs-reference comparison record.
pub fn compare_to_reference(
    subject: &SummaryMetrics,
    reference: &SummaryMetrics,
    thresholds: &SeverityThresholds,
) -> ComparisonRecord {
    ComparisonRecord {
        pdr_delta: subject.pdr - reference.pdr,
        pdr_delta_pct: pct_change(subject.pdr, reference.pdr),
        delay_delta_ms: subject.avg_delay_ms - reference.avg_delay_ms,
        delay_delta_pct: pct_change(subject.avg_delay_ms, reference.avg_delay_ms),
        throughput_delta_mbps: subject.throughput_mbps - reference.throughput_mbps,
        throughput_delta_pct: pct_change(subject.throughput_mbps, reference.throughput_mbps),
        severity: classify_severity(subject, reference, thresholds),
    }
}

/// Fraction of the recoverable PDR gap closed by mitigation, in percent.
///
/// Measured against the gap to perfect delivery, not as raw improvement, so
/// that an attack with shallow impact does not look artificially
/// well-mitigated. When the unmitigated run already delivered everything
/// there is no gap to close and the answer is 0 by definition.
pub fn mitigation_effectiveness(no_mitigation: &SummaryMetrics, mitigated: &SummaryMetrics) -> f64 {
    if no_mitigation.pdr < 1.0 {
        (mitigated.pdr - no_mitigation.pdr) / (1.0 - no_mitigation.pdr) * 100.0
    } else {
        0.0
    }
}

/// Build the comparison table: one row per attack type × intensity found in
/// the matrix, with per-stage baseline comparisons and mitigation
/// effectiveness. Missing scenarios surface as `None` fields.
pub fn build_comparison_rows(
    matrix: &ResultMatrix,
    thresholds: &SeverityThresholds,
) -> Vec<ComparisonRow> {
    let baseline = matrix.baseline();
    let mut rows = Vec::new();

    for attack in matrix.attacks() {
        for intensity in matrix.intensities(attack) {
            let stage_summary = |stage: MitigationStage| {
                matrix.summary(&ScenarioKey::new(attack, intensity, stage))
            };

            let no_miti = stage_summary(MitigationStage::NoMitigation);
            let detection = stage_summary(MitigationStage::DetectionOnly);
            let full = stage_summary(MitigationStage::FullMitigation);

            let vs_baseline = |summary: Option<&SummaryMetrics>| {
                match (summary, baseline) {
                    (Some(s), Some(b)) => Some(compare_to_reference(s, b, thresholds)),
                    _ => None,
                }
            };

            rows.push(ComparisonRow {
                attack,
                intensity,
                no_mitigation: vs_baseline(no_miti),
                detection_only: vs_baseline(detection),
                full_mitigation: vs_baseline(full),
                detection_effectiveness_pct: match (no_miti, detection) {
                    (Some(n), Some(d)) => Some(mitigation_effectiveness(n, d)),
                    _ => None,
                },
                mitigation_effectiveness_pct: match (no_miti, full) {
                    (Some(n), Some(m)) => Some(mitigation_effectiveness(n, m)),
                    _ => None,
                },
                severity: match (no_miti, baseline) {
                    (Some(n), Some(b)) => Some(classify_severity(n, b, thresholds)),
                    _ => None,
                },
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::ScenarioData;

    fn metrics(pdr: f64, delay: f64, throughput: f64) -> SummaryMetrics {
        SummaryMetrics {
            total_packets: 100,
            delivered_packets: (pdr * 100.0).round() as u64,
            pdr,
            avg_delay_ms: delay,
            throughput_mbps: throughput,
            loss_rate: 1.0 - pdr,
            attack_counters: Default::default(),
        }
    }

    fn thresholds() -> SeverityThresholds {
        SeverityThresholds::default()
    }

    #[test]
    fn test_identity_comparison_is_zero() {
        let summary = metrics(0.9, 12.0, 1.5);
        let record = compare_to_reference(&summary, &summary, &thresholds());

        assert_eq!(record.pdr_delta, 0.0);
        assert_eq!(record.pdr_delta_pct, 0.0);
        assert_eq!(record.delay_delta_pct, 0.0);
        assert_eq!(record.throughput_delta_pct, 0.0);
        assert_eq!(record.severity, Severity::Low);
    }

    #[test]
    fn test_pdr_degradation_against_baseline() {
        // baseline PDR 0.99, subject 0.50: (0.50-0.99)/0.99*100 ≈ -49.49
        let baseline = metrics(0.99, 10.0, 2.0);
        let subject = metrics(0.50, 10.0, 2.0);
        let record = compare_to_reference(&subject, &baseline, &thresholds());

        assert!((record.pdr_delta_pct - (-49.494949494949495)).abs() < 1e-9);
        assert!((record.pdr_delta - (-0.49)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_baseline_pdr_is_guarded() {
        let baseline = metrics(0.0, 0.0, 0.0);
        let subject = metrics(0.5, 10.0, 1.0);
        let record = compare_to_reference(&subject, &baseline, &thresholds());

        assert_eq!(record.pdr_delta_pct, 0.0);
        assert_eq!(record.delay_delta_pct, 0.0);
        assert_eq!(record.throughput_delta_pct, 0.0);
        assert!(record.pdr_delta_pct.is_finite());
    }

    #[test]
    fn test_effectiveness_recovers_gap_fraction() {
        // no-mitigation PDR 60%, mitigated 90%: (0.9-0.6)/(1-0.6)*100 = 75
        let no_miti = metrics(0.60, 20.0, 1.0);
        let mitigated = metrics(0.90, 15.0, 1.5);
        let eff = mitigation_effectiveness(&no_miti, &mitigated);
        assert!((eff - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_effectiveness_zero_when_no_gap() {
        // Attack had no effect: nothing to recover, guarded division
        let no_miti = metrics(1.0, 10.0, 1.0);
        let mitigated = metrics(1.0, 10.0, 1.0);
        assert_eq!(mitigation_effectiveness(&no_miti, &mitigated), 0.0);
    }

    #[test]
    fn test_effectiveness_zero_pdr_both_sides() {
        // N.pdr == 0 with M.pdr == 0 must be 0, not NaN
        let no_miti = metrics(0.0, 0.0, 0.0);
        let mitigated = metrics(0.0, 0.0, 0.0);
        let eff = mitigation_effectiveness(&no_miti, &mitigated);
        assert_eq!(eff, 0.0);
        assert!(eff.is_finite());
    }

    #[test]
    fn test_severity_classification_bands() {
        let baseline = metrics(1.0, 10.0, 2.0);

        // 10% PDR drop, no delay change: score 0.1 -> Low
        assert_eq!(
            classify_severity(&metrics(0.9, 10.0, 2.0), &baseline, &thresholds()),
            Severity::Low
        );
        // 30% PDR drop: score 0.3 -> Medium
        assert_eq!(
            classify_severity(&metrics(0.7, 10.0, 2.0), &baseline, &thresholds()),
            Severity::Medium
        );
        // 40% PDR drop + 30% delay increase: score 0.7 -> High
        assert_eq!(
            classify_severity(&metrics(0.6, 13.0, 2.0), &baseline, &thresholds()),
            Severity::High
        );
        // 80% PDR drop + 50% delay increase: score 1.3 -> Critical
        assert_eq!(
            classify_severity(&metrics(0.2, 15.0, 2.0), &baseline, &thresholds()),
            Severity::Critical
        );
    }

    #[test]
    fn test_severity_thresholds_are_policy() {
        let baseline = metrics(1.0, 10.0, 2.0);
        let subject = metrics(0.7, 10.0, 2.0); // score 0.3

        let strict = SeverityThresholds { critical: 0.25, high: 0.15, medium: 0.05 };
        assert_eq!(classify_severity(&subject, &baseline, &strict), Severity::Critical);
        assert_eq!(
            classify_severity(&subject, &baseline, &thresholds()),
            Severity::Medium
        );
    }

    #[test]
    fn test_comparison_rows_propagate_missing() {
        let mut matrix = ResultMatrix::new();
        matrix.register(
            ScenarioKey::baseline(),
            ScenarioData::Loaded { metrics: metrics(0.99, 10.0, 2.0) },
        );
        matrix.register(
            ScenarioKey::new(AttackType::Wormhole, 40, MitigationStage::NoMitigation),
            ScenarioData::Loaded { metrics: metrics(0.6, 20.0, 1.0) },
        );
        // full_mitigation for wormhole/40 was never produced on disk
        matrix.register(
            ScenarioKey::new(AttackType::Wormhole, 40, MitigationStage::FullMitigation),
            ScenarioData::Missing { path: "gone".to_string() },
        );

        let rows = build_comparison_rows(&matrix, &thresholds());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert!(row.no_mitigation.is_some());
        assert!(row.full_mitigation.is_none());
        assert!(row.mitigation_effectiveness_pct.is_none());
        assert!(row.detection_effectiveness_pct.is_none());
        // pdr drop 0.394 + delay increase 1.0 lands above the critical line
        assert_eq!(row.severity, Some(Severity::Critical));
    }

    #[test]
    fn test_comparison_rows_without_baseline() {
        // No baseline loaded: effectiveness (baseline-free) still computes,
        // baseline-relative fields stay missing.
        let mut matrix = ResultMatrix::new();
        matrix.register(
            ScenarioKey::new(AttackType::Sybil, 20, MitigationStage::NoMitigation),
            ScenarioData::Loaded { metrics: metrics(0.5, 30.0, 0.5) },
        );
        matrix.register(
            ScenarioKey::new(AttackType::Sybil, 20, MitigationStage::FullMitigation),
            ScenarioData::Loaded { metrics: metrics(0.875, 12.0, 1.2) },
        );

        let rows = build_comparison_rows(&matrix, &thresholds());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert!(row.no_mitigation.is_none());
        assert!(row.severity.is_none());
        let eff = row.mitigation_effectiveness_pct.unwrap();
        assert!((eff - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rows_ordered_by_attack_then_intensity() {
        let mut matrix = ResultMatrix::new();
        for (attack, intensity) in [
            (AttackType::Blackhole, 40),
            (AttackType::Wormhole, 80),
            (AttackType::Wormhole, 20),
        ] {
            matrix.register(
                ScenarioKey::new(attack, intensity, MitigationStage::NoMitigation),
                ScenarioData::Loaded { metrics: metrics(0.5, 10.0, 1.0) },
            );
        }

        let rows = build_comparison_rows(&matrix, &thresholds());
        let order: Vec<(AttackType, u32)> = rows.iter().map(|r| (r.attack, r.intensity)).collect();
        assert_eq!(
            order,
            vec![
                (AttackType::Wormhole, 20),
                (AttackType::Wormhole, 80),
                (AttackType::Blackhole, 40),
            ]
        );
    }
}
